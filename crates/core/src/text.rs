//! Small text helpers for API projections.

/// Marker appended to truncated text.
pub const OMISSION: &str = "...";

/// Maximum length of a question's `short_title`.
pub const SHORT_TITLE_LEN: usize = 10;

/// Truncate `text` to at most `max_chars` characters, replacing the tail with
/// [`OMISSION`] when anything was cut. The result including the omission
/// never exceeds `max_chars`.
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(OMISSION.len());
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(OMISSION);
    out
}

/// The short form of a question title shown in listings.
pub fn short_title(title: &str) -> String {
    truncate(title, SHORT_TITLE_LEN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(truncate("Hello", 10), "Hello");
        assert_eq!(truncate("0123456789", 10), "0123456789");
    }

    #[test]
    fn long_text_is_cut_with_omission() {
        assert_eq!(truncate("Question #12 title", 10), "Questio...");
        assert_eq!(short_title("Question #12 title").chars().count(), 10);
    }

    #[test]
    fn counts_characters_not_bytes() {
        assert_eq!(truncate("Вопрос про модули", 10), "Вопрос ...");
    }
}
