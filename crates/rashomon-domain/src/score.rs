//! Agreement score module

use serde::Serialize;

/// How strongly one article agrees with one narrative.
///
/// Scores live in [-1.0, 1.0]: values above 0 indicate agreement
/// (1 = complete agreement), values below 0 indicate disagreement
/// (-1 = complete disagreement), and 0 is neutral or unrelated.
/// Construction clamps, so an out-of-range model value can never escape
/// into the score matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AgreementScore {
    /// Narrative side of the pair
    pub narrative_id: usize,

    /// Article side of the pair
    pub article_id: usize,

    /// Clamped agreement value
    pub score: f64,
}

impl AgreementScore {
    /// Create a score, clamping the value into [-1.0, 1.0].
    ///
    /// NaN collapses to the neutral 0.0 so the matrix stays orderable.
    ///
    /// # Examples
    ///
    /// ```
    /// use rashomon_domain::AgreementScore;
    ///
    /// assert_eq!(AgreementScore::new(0, 1, 0.42).score, 0.42);
    /// assert_eq!(AgreementScore::new(0, 1, 7.0).score, 1.0);
    /// assert_eq!(AgreementScore::new(0, 1, -3.5).score, -1.0);
    /// ```
    pub fn new(narrative_id: usize, article_id: usize, score: f64) -> Self {
        let score = if score.is_nan() {
            0.0
        } else {
            score.clamp(-1.0, 1.0)
        };
        Self {
            narrative_id,
            article_id,
            score,
        }
    }

    /// The neutral score used when a model response cannot be interpreted
    pub fn neutral(narrative_id: usize, article_id: usize) -> Self {
        Self {
            narrative_id,
            article_id,
            score: 0.0,
        }
    }

    /// True when this is the 0.0 sentinel
    pub fn is_neutral(&self) -> bool {
        self.score == 0.0
    }
}
