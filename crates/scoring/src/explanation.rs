//! Explanation data model for scored recommendations.
//!
//! These are the records the delivery layer serializes back to clients.
//! Created fresh per (profile, item) pair; nothing here is persisted by the
//! core itself.

use content::CandidateItem;
use serde::Serialize;

/// How much one user-preference term contributed to an item's score.
#[derive(Debug, Clone, Serialize)]
pub struct TermContribution {
    pub term: String,
    /// Raw cosine similarity between the term's embedding and the item
    /// embedding; may be negative.
    pub contribution_score: f32,
    /// Share of the positive contribution mass, in [0, 1].
    pub normalized_contribution: f32,
}

/// A candidate item with its relevance score and attribution breakdown.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredExplanation {
    #[serde(flatten)]
    pub item: CandidateItem,
    pub score: f32,
    /// Up to 5 user terms, strongest contribution first.
    pub top_user_terms: Vec<String>,
    /// Up to 5 item-text tokens that resonate with some user interest.
    pub matched_item_terms: Vec<String>,
    /// Up to 8 contributions, strongest first.
    pub term_contributions: Vec<TermContribution>,
    pub plain_text_reason: String,
}

/// A candidate item with just its relevance score (baseline path, no
/// attribution).
#[derive(Debug, Clone, Serialize)]
pub struct ScoredItem {
    #[serde(flatten)]
    pub item: CandidateItem,
    pub score: f32,
}

/// Outcome of scoring one batch.
///
/// Degradation is decided once per batch, not per item: a single embedding
/// failure degrades every item uniformly, so the endpoint always returns a
/// well-formed explanation object.
#[derive(Debug, Clone)]
pub enum BatchExplanations {
    /// Every item fully scored and attributed.
    Scored(Vec<ScoredExplanation>),
    /// Embeddings were unavailable; every item carries score 0, empty term
    /// lists, and the fixed fallback sentence.
    Degraded(Vec<ScoredExplanation>),
}

impl BatchExplanations {
    pub fn is_degraded(&self) -> bool {
        matches!(self, BatchExplanations::Degraded(_))
    }

    pub fn explanations(&self) -> &[ScoredExplanation] {
        match self {
            BatchExplanations::Scored(items) | BatchExplanations::Degraded(items) => items,
        }
    }

    pub fn into_explanations(self) -> Vec<ScoredExplanation> {
        match self {
            BatchExplanations::Scored(items) | BatchExplanations::Degraded(items) => items,
        }
    }
}
