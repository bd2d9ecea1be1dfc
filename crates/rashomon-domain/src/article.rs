//! Article module - one row of the loaded corpus

/// A news article loaded from the corpus snapshot.
///
/// Identity is the zero-based row index in the corpus file, so ids are
/// stable only within one loaded snapshot. Articles are immutable once
/// loaded; every downstream stage refers back to them by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    /// Corpus-assigned id (zero-based row index)
    pub id: usize,

    /// Headline
    pub title: String,

    /// Full body text
    pub text: String,

    /// Publication date as the corpus gives it, when present
    pub published_at: Option<String>,

    /// Outlet location as the corpus gives it, when present
    pub source_location: Option<String>,
}

impl Article {
    /// Create an article with no optional metadata
    pub fn new(id: usize, title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            text: text.into(),
            published_at: None,
            source_location: None,
        }
    }

    /// True when the body is empty or whitespace-only.
    ///
    /// The loader skips such rows with a logged warning rather than
    /// failing the run.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}
