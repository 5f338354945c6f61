//! Entry struct representing one reviewed paper with structured notes.

use crate::domain::{Bibkey, Genre, ImageLink, NoteId, Tag};
use std::collections::BTreeSet;
use std::fmt;

/// A literature note for a single paper.
///
/// An entry is identified by its [`Bibkey`] in the user interface and
/// by its [`NoteId`] inside the store. The id is `None` until the
/// entry has been persisted; store reads always return `Some`.
///
/// # Required Fields
/// - `bibkey`: Citation key (non-empty)
///
/// # Free-Text Fields
/// Title, author, thesis, hypothesis, method, finding, and comment
/// are free text and may be left blank. A freshly inserted bibkey has
/// all of them blank.
///
/// # Examples
///
/// ```
/// use liternote::domain::{Bibkey, Entry, Genre};
///
/// let key = Bibkey::new("Smith2020").unwrap();
/// let entry = Entry::builder(key)
///     .title("Dark clouds revisited")
///     .genre(Genre::Theory)
///     .build();
/// assert_eq!(entry.title(), "Dark clouds revisited");
/// assert!(entry.id().is_none());
/// ```
#[derive(Clone, PartialEq)]
pub struct Entry {
    id: Option<NoteId>,
    bibkey: Bibkey,
    title: String,
    author: String,
    genre: Genre,
    thesis: String,
    hypothesis: String,
    method: String,
    finding: String,
    comment: String,
    img_links: Vec<ImageLink>,
    tags: BTreeSet<Tag>,
}

impl Entry {
    /// Creates a blank entry for the given bibkey.
    ///
    /// All free-text fields start empty and the genre starts at its
    /// default. This is exactly the shape a new bibkey takes when it
    /// is first inserted into the store.
    pub fn new(bibkey: Bibkey) -> Self {
        Self {
            id: None,
            bibkey,
            title: String::new(),
            author: String::new(),
            genre: Genre::default(),
            thesis: String::new(),
            hypothesis: String::new(),
            method: String::new(),
            finding: String::new(),
            comment: String::new(),
            img_links: Vec::new(),
            tags: BTreeSet::new(),
        }
    }

    /// Creates a builder for constructing an Entry with content.
    pub fn builder(bibkey: Bibkey) -> EntryBuilder {
        EntryBuilder::new(bibkey)
    }

    /// Returns the store id, or `None` if the entry was never persisted.
    pub fn id(&self) -> Option<NoteId> {
        self.id
    }

    /// Returns the entry's citation key.
    pub fn bibkey(&self) -> &Bibkey {
        &self.bibkey
    }

    /// Returns the paper title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the author line.
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Returns the entry's genre.
    pub fn genre(&self) -> Genre {
        self.genre
    }

    /// Returns the thesis notes.
    pub fn thesis(&self) -> &str {
        &self.thesis
    }

    /// Returns the hypothesis notes.
    pub fn hypothesis(&self) -> &str {
        &self.hypothesis
    }

    /// Returns the method notes.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Returns the finding notes.
    pub fn finding(&self) -> &str {
        &self.finding
    }

    /// Returns the free-form comment.
    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Returns the attached image links in attachment order.
    pub fn img_links(&self) -> &[ImageLink] {
        &self.img_links
    }

    /// Returns the entry's tags in alphabetical order.
    pub fn tags(&self) -> &BTreeSet<Tag> {
        &self.tags
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.bibkey, self.genre)
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("id", &self.id)
            .field("bibkey", &self.bibkey)
            .field("title", &self.title)
            .field("author", &self.author)
            .field("genre", &self.genre)
            .field("thesis", &self.thesis)
            .field("hypothesis", &self.hypothesis)
            .field("method", &self.method)
            .field("finding", &self.finding)
            .field("comment", &self.comment)
            .field("img_links", &self.img_links)
            .field("tags", &self.tags)
            .finish()
    }
}

/// Builder for constructing an Entry with content.
pub struct EntryBuilder {
    id: Option<NoteId>,
    bibkey: Bibkey,
    title: String,
    author: String,
    genre: Genre,
    thesis: String,
    hypothesis: String,
    method: String,
    finding: String,
    comment: String,
    img_links: Vec<ImageLink>,
    tags: BTreeSet<Tag>,
}

impl EntryBuilder {
    fn new(bibkey: Bibkey) -> Self {
        Self {
            id: None,
            bibkey,
            title: String::new(),
            author: String::new(),
            genre: Genre::default(),
            thesis: String::new(),
            hypothesis: String::new(),
            method: String::new(),
            finding: String::new(),
            comment: String::new(),
            img_links: Vec::new(),
            tags: BTreeSet::new(),
        }
    }

    /// Sets the store id, linking the entry to an existing row.
    pub fn id(mut self, id: NoteId) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the paper title. Surrounding whitespace is trimmed.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into().trim().to_string();
        self
    }

    /// Sets the author line. Surrounding whitespace is trimmed.
    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into().trim().to_string();
        self
    }

    /// Sets the genre.
    pub fn genre(mut self, genre: Genre) -> Self {
        self.genre = genre;
        self
    }

    /// Sets the thesis notes. Surrounding whitespace is trimmed;
    /// internal line breaks are preserved.
    pub fn thesis(mut self, thesis: impl Into<String>) -> Self {
        self.thesis = thesis.into().trim().to_string();
        self
    }

    /// Sets the hypothesis notes. Surrounding whitespace is trimmed;
    /// internal line breaks are preserved.
    pub fn hypothesis(mut self, hypothesis: impl Into<String>) -> Self {
        self.hypothesis = hypothesis.into().trim().to_string();
        self
    }

    /// Sets the method notes. Surrounding whitespace is trimmed;
    /// internal line breaks are preserved.
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into().trim().to_string();
        self
    }

    /// Sets the finding notes. Surrounding whitespace is trimmed;
    /// internal line breaks are preserved.
    pub fn finding(mut self, finding: impl Into<String>) -> Self {
        self.finding = finding.into().trim().to_string();
        self
    }

    /// Sets the free-form comment. Surrounding whitespace is trimmed;
    /// internal line breaks are preserved.
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into().trim().to_string();
        self
    }

    /// Sets the image links.
    ///
    /// Duplicates are removed (first occurrence kept); attachment
    /// order is otherwise preserved.
    pub fn img_links(mut self, links: Vec<ImageLink>) -> Self {
        self.img_links = deduplicate_links(links);
        self
    }

    /// Sets the tags. Duplicates collapse; iteration is alphabetical.
    pub fn tags(mut self, tags: Vec<Tag>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }

    /// Builds the Entry.
    pub fn build(self) -> Entry {
        Entry {
            id: self.id,
            bibkey: self.bibkey,
            title: self.title,
            author: self.author,
            genre: self.genre,
            thesis: self.thesis,
            hypothesis: self.hypothesis,
            method: self.method,
            finding: self.finding,
            comment: self.comment,
            img_links: self.img_links,
            tags: self.tags,
        }
    }
}

/// Removes duplicate links (by equality), keeping first occurrences.
fn deduplicate_links(links: Vec<ImageLink>) -> Vec<ImageLink> {
    let mut seen = Vec::new();
    for link in links {
        if !seen.contains(&link) {
            seen.push(link);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn key(s: &str) -> Bibkey {
        Bibkey::new(s).unwrap()
    }

    #[test]
    fn new_creates_blank_entry() {
        let entry = Entry::new(key("Smith2020"));
        assert_eq!(entry.bibkey().as_str(), "Smith2020");
        assert!(entry.id().is_none());
        assert_eq!(entry.title(), "");
        assert_eq!(entry.author(), "");
        assert_eq!(entry.genre(), Genre::default());
        assert_eq!(entry.thesis(), "");
        assert_eq!(entry.hypothesis(), "");
        assert_eq!(entry.method(), "");
        assert_eq!(entry.finding(), "");
        assert_eq!(entry.comment(), "");
        assert!(entry.img_links().is_empty());
        assert!(entry.tags().is_empty());
    }

    #[test]
    fn builder_sets_all_fields() {
        let entry = Entry::builder(key("Smith2020"))
            .title("Dark clouds revisited")
            .author("J. Smith and A. Doe")
            .genre(Genre::Theory)
            .thesis("Cold cores fragment earlier than assumed")
            .hypothesis("Fragmentation is driven by ambipolar diffusion")
            .method("3D MHD simulation suite")
            .finding("Cores fragment at 0.1 pc scales")
            .comment("Compare against the 2018 survey")
            .tags(vec![Tag::new("theory").unwrap(), Tag::new("mhd").unwrap()])
            .build();

        assert_eq!(entry.title(), "Dark clouds revisited");
        assert_eq!(entry.author(), "J. Smith and A. Doe");
        assert_eq!(entry.genre(), Genre::Theory);
        assert_eq!(entry.thesis(), "Cold cores fragment earlier than assumed");
        assert_eq!(
            entry.hypothesis(),
            "Fragmentation is driven by ambipolar diffusion"
        );
        assert_eq!(entry.method(), "3D MHD simulation suite");
        assert_eq!(entry.finding(), "Cores fragment at 0.1 pc scales");
        assert_eq!(entry.comment(), "Compare against the 2018 survey");
        assert_eq!(entry.tags().len(), 2);
    }

    #[test]
    fn builder_trims_text_fields() {
        let entry = Entry::builder(key("Smith2020"))
            .title("  Dark clouds  ")
            .author("\tJ. Smith\n")
            .build();
        assert_eq!(entry.title(), "Dark clouds");
        assert_eq!(entry.author(), "J. Smith");
    }

    #[test]
    fn builder_preserves_internal_line_breaks() {
        let entry = Entry::builder(key("Smith2020"))
            .method("step 1\nstep 2\nstep 3")
            .build();
        assert_eq!(entry.method(), "step 1\nstep 2\nstep 3");
    }

    #[test]
    fn builder_deduplicates_img_links_keeping_order() {
        let a = ImageLink::new("a.png").unwrap();
        let b = ImageLink::new("b.png").unwrap();
        let entry = Entry::builder(key("Smith2020"))
            .img_links(vec![b.clone(), a.clone(), b.clone()])
            .build();
        assert_eq!(entry.img_links(), &[b, a]);
    }

    #[test]
    fn builder_deduplicates_tags() {
        let entry = Entry::builder(key("Smith2020"))
            .tags(vec![
                Tag::new("astro").unwrap(),
                Tag::new("ASTRO").unwrap(),
                Tag::new("lab").unwrap(),
            ])
            .build();
        assert_eq!(entry.tags().len(), 2);
    }

    #[test]
    fn tags_iterate_alphabetically() {
        let entry = Entry::builder(key("Smith2020"))
            .tags(vec![
                Tag::new("zeta").unwrap(),
                Tag::new("alpha").unwrap(),
                Tag::new("mid").unwrap(),
            ])
            .build();
        let names: Vec<&str> = entry.tags().iter().map(Tag::as_str).collect();
        assert_eq!(names, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn builder_id_links_to_row() {
        let blank = Entry::new(key("Smith2020"));
        assert!(blank.id().is_none());
        // Ids normally come back from the store; any value works here.
        let entry = Entry::builder(key("Smith2020"))
            .id(NoteId::from_raw(7))
            .build();
        assert_eq!(entry.id().unwrap().as_i64(), 7);
    }

    #[test]
    fn display_shows_bibkey_and_genre() {
        let entry = Entry::builder(key("Smith2020"))
            .genre(Genre::Review)
            .build();
        assert_eq!(format!("{}", entry), "Smith2020 [Review]");
    }

    #[test]
    fn debug_includes_field_names() {
        let entry = Entry::new(key("Smith2020"));
        let debug = format!("{:?}", entry);
        assert!(debug.contains("Entry"));
        assert!(debug.contains("bibkey"));
        assert!(debug.contains("finding"));
    }

    #[test]
    fn clone_and_equality() {
        let entry = Entry::builder(key("Smith2020"))
            .title("Dark clouds")
            .tags(vec![Tag::new("astro").unwrap()])
            .build();
        let copy = entry.clone();
        assert_eq!(entry, copy);
    }
}
