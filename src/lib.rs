//! liternote - literature review notes with full-text search

pub mod config;
pub mod domain;
pub mod img;
pub mod store;
