//! Wire shapes of the upstream search response.

use serde::Deserialize;

use super::Suggestion;

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponseDto {
    #[serde(default)]
    pub docs: Vec<SearchDocDto>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchDocDto {
    pub title: Option<String>,
    pub title_suggest: Option<String>,
    #[serde(default)]
    pub author_name: Vec<String>,
    pub first_publish_year: Option<i64>,
    #[serde(default)]
    pub isbn: Vec<String>,
}

impl SearchDocDto {
    pub fn into_suggestion(self) -> Suggestion {
        Suggestion {
            title: self.title.or(self.title_suggest).unwrap_or_default(),
            authors: self.author_name.join(", "),
            year: self.first_publish_year,
            isbn: self.isbn.into_iter().next(),
        }
    }
}
