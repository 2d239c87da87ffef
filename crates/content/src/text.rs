//! Text normalization and tokenization.
//!
//! Shared by the per-item scorer (matched item terms) and the global TF-IDF
//! ranker. Pure functions; no I/O, no failure modes.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Common English function words dropped during tokenization.
static STOPWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "the", "a", "an", "and", "or", "of", "in", "on", "for", "to", "with", "by",
        "at", "from", "is", "are", "was", "were", "it", "this", "that", "as", "be",
        "about", "into", "over", "under", "after", "before", "between", "through",
        "your", "you", "we", "our", "their", "his", "her",
    ]
    .into_iter()
    .collect()
});

/// Split text into lowercase content tokens.
///
/// ## Algorithm
/// 1. Lowercase the input
/// 2. Split on any run of characters outside `[a-z0-9-_]`
/// 3. Drop empty tokens, stopwords, and tokens of length <= 2
///
/// Order-preserving relative to the input. Hyphens and underscores stay part
/// of a token, so "sci-fi" survives as one term.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    lowered
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
        .filter(|t| t.len() > 2 && !STOPWORDS.contains(*t))
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_drops_stopwords_and_short_tokens() {
        let tokens = tokenize("The Matrix: A Sci-Fi Classic!");
        assert_eq!(tokens, vec!["matrix", "sci-fi", "classic"]);
    }

    #[test]
    fn test_tokenize_empty_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   !!! ???").is_empty());
    }

    #[test]
    fn test_tokenize_preserves_input_order() {
        let tokens = tokenize("galactic battles and interstellar travel");
        assert_eq!(tokens, vec!["galactic", "battles", "interstellar", "travel"]);
    }

    #[test]
    fn test_tokenize_keeps_hyphens_underscores_and_digits() {
        let tokens = tokenize("hard-hitting lo_fi beats 2024");
        assert_eq!(tokens, vec!["hard-hitting", "lo_fi", "beats", "2024"]);
    }

    #[test]
    fn test_tokenize_lowercases() {
        let tokens = tokenize("EPIC Space OPERA");
        assert_eq!(tokens, vec!["epic", "space", "opera"]);
    }

    #[test]
    fn test_tokenize_keeps_repeated_tokens() {
        // Deduplication is the caller's concern, not the tokenizer's
        let tokens = tokenize("space space space");
        assert_eq!(tokens, vec!["space", "space", "space"]);
    }
}
