//! Core types: Entry, Bibkey, Tag, Genre, ImageLink, NoteId

mod bibkey;
mod entry;
mod genre;
mod image_link;
mod note_id;
mod tag;

pub use bibkey::{Bibkey, ParseBibkeyError};
pub use entry::{Entry, EntryBuilder};
pub use genre::{Genre, ParseGenreError};
pub use image_link::{ImageLink, ParseImageLinkError};
pub use note_id::NoteId;
pub use tag::{ParseTagError, Tag};
