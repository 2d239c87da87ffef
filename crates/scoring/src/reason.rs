//! Human-readable justification strings.

use content::Domain;

/// Fallback sentence used when embeddings are unavailable for a batch.
pub const DEGRADED_REASON: &str = "We could not compute detailed term-level contributions \
    due to a temporary AI service issue. Displaying basic recommendation without breakdown.";

/// Compose the one-sentence justification for a scored item.
///
/// Deterministic template: score to 2 decimal places, up to 2 user terms
/// joined by "and", up to 3 matched item terms joined by ", ", and the
/// domain noun. Falls back to "your interests" / "key themes" when a term
/// list is empty. Pure string formatting.
pub fn compose_reason(
    score: f32,
    top_user_terms: &[String],
    matched_item_terms: &[String],
    item_title: &str,
    domain: Domain,
) -> String {
    let interests = if top_user_terms.is_empty() {
        "your interests".to_string()
    } else {
        top_user_terms
            .iter()
            .take(2)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" and ")
    };

    let themes = if matched_item_terms.is_empty() {
        "key themes".to_string()
    } else {
        matched_item_terms
            .iter()
            .take(3)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    };

    format!(
        "This {} scored {:.2} for you because your interest in {} matches {}'s \
         description featuring {}. These signals align strongly with your preferences.",
        domain.noun(),
        score,
        interests,
        item_title,
        themes
    )
}
