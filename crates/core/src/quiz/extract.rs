use regex::Regex;
use std::sync::LazyLock;

use super::types::Extraction;

/// First statement of the quiz block.
pub const MARKER: &str = "questions = [];";

/// Last statement of the quiz block.
pub const TERMINATOR: &str = "soundwrong = -1;";

// Singular `question` is accepted too; some models drop the plural.
static GML_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)questions?\s*=\s*\[\];.*?soundwrong\s*=\s*-1;").expect("valid GML block regex")
});

/// Extract the quiz GML block from a model response.
///
/// Returns the shortest span starting at the `questions = [];` marker and
/// ending at the `soundwrong = -1;` terminator, both included. When the
/// response holds no such span the whole trimmed response is returned with
/// `matched` set to `false`; the caller decides whether to warn.
pub fn extract_gml(response: &str) -> Extraction {
    match GML_BLOCK.find(response) {
        Some(m) => Extraction {
            code: m.as_str().to_string(),
            matched: true,
        },
        None => Extraction {
            code: response.trim().to_string(),
            matched: false,
        },
    }
}
