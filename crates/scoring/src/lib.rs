//! Relevance scoring and explanation for PickWise candidates.
//!
//! This crate provides:
//! - RelevanceScorer: scores candidate items against a user profile and
//!   decomposes each score into approximate per-term contributions
//! - Explanation records (ScoredExplanation, TermContribution) the delivery
//!   layer serializes to clients
//! - The plain-text reason composer and the degraded-batch fallback
//!
//! ## Architecture
//! The scorer leans on the embedder crate for vectors and similarity:
//! 1. Embed the user profile (aggregated text plus each individual term)
//! 2. Fan out over items with a bounded concurrency cap
//! 3. Attribute, rank, truncate, and phrase the result
//!
//! A batch either fully succeeds or degrades as a whole; callers never see a
//! raw embedding error from the explanation path.
//!
//! ## Example Usage
//! ```ignore
//! use scoring::RelevanceScorer;
//!
//! let scorer = RelevanceScorer::new(embedder).with_concurrency(8);
//! let batch = scorer.score_with_explanations(&profile, &items, Domain::Movies).await;
//! for explanation in batch.explanations() {
//!     println!("{}: {}", explanation.item.title, explanation.plain_text_reason);
//! }
//! ```

pub mod explanation;
pub mod reason;
pub mod scorer;

// Re-export main types
pub use explanation::{BatchExplanations, ScoredExplanation, ScoredItem, TermContribution};
pub use reason::{compose_reason, DEGRADED_REASON};
pub use scorer::RelevanceScorer;
