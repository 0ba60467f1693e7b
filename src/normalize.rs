//! Transcript normalization applied before both scoring and display
//!
//! Recognizer output and reference text go through the same pipeline, so a
//! hypothesis is never penalized for casing, stray punctuation, or the
//! bracketed annotations transcribers add ("[inaudible]", "[laughs]").

use std::sync::LazyLock;

use regex::Regex;

static ANNOTATION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" *\[[^\]]*\]").unwrap());
static PUNCT_BEFORE_SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[,.?!]+ ").unwrap());
static PUNCT_AFTER_SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" [,.?!]+").unwrap());
static PUNCT_AT_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[,.?!]+|[,.?!]+$").unwrap());
static QUOTES_AND_PARENS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"["()\[\]]"#).unwrap());
static EXTRA_SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" +").unwrap());

/// Normalize raw transcript text for word-level comparison.
///
/// Transformations, in order: strip bracketed annotations, lowercase,
/// collapse tabs/newlines to spaces, drop punctuation runs (`,.?!`) that
/// touch a space or a string boundary, drop quotes and parentheses, then
/// trim and collapse repeated spaces. Blank input normalizes to the empty
/// string.
pub fn normalize(text: &str) -> String {
    let text = ANNOTATION.replace_all(text, "");
    let text = text.to_lowercase().replace(['\t', '\n'], " ");
    let text = PUNCT_BEFORE_SPACE.replace_all(&text, " ");
    let text = PUNCT_AFTER_SPACE.replace_all(&text, " ");
    let text = PUNCT_AT_BOUNDARY.replace_all(&text, "");
    let text = QUOTES_AND_PARENS.replace_all(&text, "");
    EXTRA_SPACE.replace_all(text.trim(), " ").into_owned()
}

/// Split normalized text into words.
///
/// An empty string yields zero tokens, never one empty token.
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_and_trim() {
        assert_eq!(normalize("  The Cat SAT  "), "the cat sat");
    }

    #[test]
    fn test_strips_annotations() {
        assert_eq!(normalize("the cat [inaudible] sat"), "the cat sat");
        assert_eq!(normalize("[laughs] hello"), "hello");
    }

    #[test]
    fn test_strips_trailing_punctuation() {
        assert_eq!(normalize("The cat sat."), "the cat sat");
        assert_eq!(normalize("Did the cat sit?!"), "did the cat sit");
    }

    #[test]
    fn test_strips_punctuation_at_spaces() {
        assert_eq!(normalize("yes, the cat. sat"), "yes the cat sat");
        assert_eq!(normalize("well , fine"), "well fine");
    }

    #[test]
    fn test_keeps_interior_punctuation() {
        // an apostrophe is part of the word, and punctuation not adjacent
        // to a space or boundary stays put
        assert_eq!(normalize("don't"), "don't");
        assert_eq!(normalize("3.14"), "3.14");
    }

    #[test]
    fn test_strips_quotes_and_parens() {
        assert_eq!(normalize("\"the\" (cat) sat"), "the cat sat");
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(normalize("the\tcat\nsat"), "the cat sat");
        assert_eq!(normalize("the    cat"), "the cat");
    }

    #[test]
    fn test_blank_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \t\n  "), "");
        assert_eq!(normalize("..."), "");
    }

    #[test]
    fn test_tokenize_empty_yields_no_tokens() {
        assert!(tokenize("").is_empty());
        assert_eq!(tokenize("the cat sat"), vec!["the", "cat", "sat"]);
    }
}
