use once_cell::sync::Lazy;
use regex::Regex;

use super::company::NOT_AVAILABLE;

static LETTER_THEN_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"([가-힣a-zA-Z])(\d)").unwrap());
static COUNT_WITH_UNIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s*명").unwrap());
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Display formatting for head counts such as `"32.5 명외주 3명"`.
///
/// Glues the person counter `명` to its number, separates it from whatever
/// follows, and collapses whitespace. Text without counts passes through
/// with only whitespace cleanup.
pub fn normalize_personnel_count(text: &str) -> String {
    if text.is_empty() || text == NOT_AVAILABLE {
        return text.to_string();
    }

    let text = LETTER_THEN_DIGIT.replace_all(text, "$1 $2");
    let text = COUNT_WITH_UNIT.replace_all(&text, "${1}명 ");
    let text = WHITESPACE_RUN.replace_all(&text, " ");

    text.trim().to_string()
}
