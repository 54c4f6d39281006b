use once_cell::sync::Lazy;
use regex::Regex;

static RE_MARKUP_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[*#$]").unwrap());
static RE_WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Strips markdown emphasis/heading/math markers and collapses whitespace.
pub fn clean_source_text(text: &str) -> String {
    let stripped = RE_MARKUP_CHARS.replace_all(text, "");
    RE_WHITESPACE_RUN
        .replace_all(&stripped, " ")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_markdown_noise() {
        let raw = "## Cells\n\n**The nucleus** holds $DNA$ and   #genes.";
        assert_eq!(clean_source_text(raw), "Cells The nucleus holds DNA and genes.");
    }

    #[test]
    fn empty_and_blank_input() {
        assert_eq!(clean_source_text(""), "");
        assert_eq!(clean_source_text(" \t\n "), "");
    }

    #[test]
    fn tabs_and_newlines_become_single_spaces() {
        assert_eq!(clean_source_text("a\tb\n\nc"), "a b c");
    }
}
