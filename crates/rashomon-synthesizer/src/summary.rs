//! Structured per-article summaries for the summary discovery path

use serde_json::Value;

/// Placeholder used for any summary dimension that could not be filled
pub const UNAVAILABLE: &str = "unavailable";

/// A six-dimension structured summary of one article
///
/// Produced by a completion model in JSON mode and parsed leniently:
/// markdown code fences are stripped, missing or non-string dimensions
/// fall back to [`UNAVAILABLE`] rather than failing the article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleSummary {
    /// Who is blamed or suspected, and how directly
    pub blame_attribution: String,
    /// Who or what is described as harmed
    pub victim_entities: String,
    /// Locations and regions the article names
    pub geographic_scope: String,
    /// Causes and explanations the article offers
    pub plausible_causes: String,
    /// Economic impacts described or implied
    pub economic_consequences: String,
    /// Environmental harms mentioned
    pub environmental_consequences: String,
}

impl ArticleSummary {
    /// A summary with every dimension set to the unavailable placeholder
    pub fn unavailable() -> Self {
        Self {
            blame_attribution: UNAVAILABLE.to_string(),
            victim_entities: UNAVAILABLE.to_string(),
            geographic_scope: UNAVAILABLE.to_string(),
            plausible_causes: UNAVAILABLE.to_string(),
            economic_consequences: UNAVAILABLE.to_string(),
            environmental_consequences: UNAVAILABLE.to_string(),
        }
    }

    /// Whether every dimension is the unavailable placeholder
    pub fn is_placeholder(&self) -> bool {
        self == &Self::unavailable()
    }

    /// Parse a model response into a summary
    ///
    /// Returns `None` when the response is not a JSON object at all.
    /// Individual missing dimensions degrade to [`UNAVAILABLE`].
    pub fn parse(response: &str) -> Option<Self> {
        let json_str = strip_code_fences(response);
        let json: Value = serde_json::from_str(&json_str).ok()?;
        let object = json.as_object()?;

        Some(Self {
            blame_attribution: field_text(object.get("Blame Attribution")),
            victim_entities: field_text(object.get("Victim Entities")),
            geographic_scope: field_text(object.get("Geographic Scope")),
            plausible_causes: field_text(object.get("Plausible Causes")),
            economic_consequences: field_text(object.get("Economic Consequences")),
            environmental_consequences: field_text(object.get("Environmental Consequences")),
        })
    }

    /// Flatten the summary into `"dimension: value"` lines
    ///
    /// This is the text that gets embedded for summary-path clustering.
    pub fn to_lines(&self) -> String {
        [
            ("Blame Attribution", &self.blame_attribution),
            ("Victim Entities", &self.victim_entities),
            ("Geographic Scope", &self.geographic_scope),
            ("Plausible Causes", &self.plausible_causes),
            ("Economic Consequences", &self.economic_consequences),
            ("Environmental Consequences", &self.environmental_consequences),
        ]
        .iter()
        .map(|(dimension, value)| format!("{}: {}", dimension, value))
        .collect::<Vec<_>>()
        .join("\n")
    }
}

/// Flatten one dimension value to text
///
/// Models sometimes answer a dimension with a nested object or array
/// instead of a string; those are kept as compact JSON rather than
/// discarded.
fn field_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                UNAVAILABLE.to_string()
            } else {
                trimmed.to_string()
            }
        }
        Some(Value::Null) | None => UNAVAILABLE.to_string(),
        Some(other) => other.to_string(),
    }
}

/// Strip a markdown code fence wrapper, if present
fn strip_code_fences(response: &str) -> String {
    let trimmed = response.trim();

    if trimmed.starts_with("```") {
        let lines: Vec<&str> = trimmed.lines().collect();
        if lines.len() < 2 {
            return String::new();
        }
        // Drop the opening fence line (``` or ```json) and the closing fence
        let inner = &lines[1..lines.len().saturating_sub(1)];
        inner.join("\n")
    } else {
        trimmed.to_string()
    }
}
