//! Title and author suggestions from an external metadata search API.

pub mod client;
mod dto;

use serde::Serialize;

pub use client::SuggestionService;

/// One normalized suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    /// Work title; empty when upstream has none.
    pub title: String,
    /// Author names joined with `", "`.
    pub authors: String,
    /// First publication year.
    pub year: Option<i64>,
    /// First listed ISBN.
    pub isbn: Option<String>,
}
