//! Unit module - the atomic clustering input

/// A minimal segment of article text.
///
/// Units come out of the segmenter as either a (possibly merged) paragraph
/// or a single sentence carved from an overlong one. Unit text is always
/// non-empty and trimmed; the constructor enforces this so no later stage
/// has to re-check. Order within an article is insertion order and carries
/// no meaning once units are embedded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    /// Id of the article this unit was cut from
    pub article_id: usize,
    text: String,
}

impl Unit {
    /// Create a unit, trimming surrounding whitespace.
    ///
    /// Returns `None` when the trimmed text is empty; the empty string is
    /// not a unit.
    ///
    /// # Examples
    ///
    /// ```
    /// use rashomon_domain::Unit;
    ///
    /// let unit = Unit::new(3, "  The cable was cut.  ").unwrap();
    /// assert_eq!(unit.text(), "The cable was cut.");
    /// assert!(Unit::new(3, "   ").is_none());
    /// ```
    pub fn new(article_id: usize, text: impl AsRef<str>) -> Option<Self> {
        let trimmed = text.as_ref().trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            article_id,
            text: trimmed.to_string(),
        })
    }

    /// The unit text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of whitespace-separated words
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}
