//! Per-item relevance scoring with approximate term attribution.
//!
//! ## Algorithm
//! 1. Flatten the user's genres and favorites into an ordered term list
//!    (duplicates kept) and embed both the joined "user text" and each
//!    individual term
//! 2. Per item: embed the item text, score it by cosine against the user
//!    vector, and estimate each term's contribution as the cosine of its
//!    isolated embedding against the item vector
//! 3. Normalize contributions over the positive mass, keep the strongest 8
//! 4. Embed distinct item tokens and surface the 5 that best match any
//!    single user interest
//! 5. Sort by score descending, return the top 10
//!
//! The attribution is an estimate, not an exact decomposition: the score
//! itself comes from one aggregated user embedding, so isolated term
//! similarities can only approximate their influence on it.

use std::cmp::Ordering;
use std::collections::HashSet;

use content::{tokenize, CandidateItem, Domain, UserPreferenceProfile};
use embedder::{cosine_similarity, Embedder, EmbedderError, EmbeddingVector};
use futures::future;
use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::{debug, instrument, warn};

use crate::explanation::{BatchExplanations, ScoredExplanation, ScoredItem, TermContribution};
use crate::reason::{compose_reason, DEGRADED_REASON};

/// Most recommendations returned from one batch.
const MAX_RESULTS: usize = 10;

/// Most term contributions kept per item.
const MAX_TERM_CONTRIBUTIONS: usize = 8;

/// Most user terms cited per item.
const MAX_TOP_USER_TERMS: usize = 5;

/// Most matched item terms cited per item.
const MAX_MATCHED_ITEM_TERMS: usize = 5;

/// Most distinct item tokens embedded per item; bounds the embedding cost of
/// long descriptions.
const MAX_ITEM_TOKENS: usize = 50;

/// Default cap on items scored concurrently.
const DEFAULT_CONCURRENCY: usize = 8;

/// Scores candidate items against a user profile and explains the result.
#[derive(Clone)]
pub struct RelevanceScorer {
    embedder: Embedder,
    concurrency: usize,
}

impl RelevanceScorer {
    /// Create a scorer over an embedding service.
    pub fn new(embedder: Embedder) -> Self {
        Self {
            embedder,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// Configure how many items are scored concurrently (default: 8).
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Score a batch of candidates and attribute each score to user terms.
    ///
    /// Items come back sorted by score descending, truncated to the top 10.
    /// Empty item lists and empty profiles are valid degenerate inputs.
    ///
    /// If the embedding backend fails anywhere in the batch, the whole batch
    /// degrades uniformly: every item keeps score 0, empty term lists, and a
    /// fixed fallback sentence. A raw error never reaches the caller on this
    /// path.
    #[instrument(skip(self, profile, items), fields(domain = %domain, item_count = items.len()))]
    pub async fn score_with_explanations(
        &self,
        profile: &UserPreferenceProfile,
        items: &[CandidateItem],
        domain: Domain,
    ) -> BatchExplanations {
        let user_terms = profile.for_domain(domain).terms();

        match self.score_batch(&user_terms, items, domain).await {
            Ok(scored) => BatchExplanations::Scored(scored),
            Err(e) => {
                warn!("Degrading explanation batch, embeddings unavailable: {e}");
                BatchExplanations::Degraded(Self::degraded_batch(items))
            }
        }
    }

    /// Baseline ranking without attribution.
    ///
    /// Unlike [`Self::score_with_explanations`], an embedding failure here
    /// propagates to the caller.
    #[instrument(skip(self, profile, items), fields(domain = %domain, item_count = items.len()))]
    pub async fn rank(
        &self,
        profile: &UserPreferenceProfile,
        items: &[CandidateItem],
        domain: Domain,
    ) -> Result<Vec<ScoredItem>, EmbedderError> {
        let user_terms = profile.for_domain(domain).terms();
        let user_text = user_terms.join(", ");
        let user_vector = self.embedder.embed(&user_text).await?;

        let mut scored: Vec<ScoredItem> = stream::iter(items)
            .map(|item| {
                let embedder = &self.embedder;
                let user_vector = &user_vector;
                async move {
                    let item_vector = embedder.embed(&item.text()).await?;
                    Ok::<_, EmbedderError>(ScoredItem {
                        item: item.clone(),
                        score: cosine_similarity(user_vector, &item_vector),
                    })
                }
            })
            .buffer_unordered(self.concurrency)
            .try_collect()
            .await?;

        sort_by_score_desc(&mut scored, |s| s.score);
        scored.truncate(MAX_RESULTS);
        Ok(scored)
    }

    /// Score every item in the batch; any embedding failure aborts the whole
    /// batch so the caller can degrade it uniformly.
    async fn score_batch(
        &self,
        user_terms: &[String],
        items: &[CandidateItem],
        domain: Domain,
    ) -> Result<Vec<ScoredExplanation>, EmbedderError> {
        // The aggregated user text embeds to a valid vector even when the
        // profile is empty.
        let user_text = user_terms.join(", ");
        let user_vector = self.embedder.embed(&user_text).await?;

        // One embedding per individual term; order mirrors user_terms.
        let user_term_vectors: Vec<EmbeddingVector> =
            future::try_join_all(user_terms.iter().map(|t| self.embedder.embed(t))).await?;

        debug!(
            terms = user_terms.len(),
            "Embedded user profile, scoring items"
        );

        let mut scored: Vec<ScoredExplanation> = stream::iter(items)
            .map(|item| self.score_item(item, &user_vector, user_terms, &user_term_vectors, domain))
            .buffer_unordered(self.concurrency)
            .try_collect()
            .await?;

        sort_by_score_desc(&mut scored, |s| s.score);
        scored.truncate(MAX_RESULTS);
        Ok(scored)
    }

    /// Score one item and build its full attribution breakdown.
    async fn score_item(
        &self,
        item: &CandidateItem,
        user_vector: &EmbeddingVector,
        user_terms: &[String],
        user_term_vectors: &[EmbeddingVector],
        domain: Domain,
    ) -> Result<ScoredExplanation, EmbedderError> {
        let item_text = item.text();
        let item_vector = self.embedder.embed(&item_text).await?;
        let score = cosine_similarity(user_vector, &item_vector);

        let term_contributions = attribute_terms(user_terms, user_term_vectors, &item_vector);
        let top_user_terms: Vec<String> = term_contributions
            .iter()
            .take(MAX_TOP_USER_TERMS)
            .map(|c| c.term.clone())
            .collect();

        let matched_item_terms = self
            .matched_item_terms(&item_text, user_term_vectors)
            .await?;

        let plain_text_reason = compose_reason(
            score,
            &top_user_terms,
            &matched_item_terms,
            &item.title,
            domain,
        );

        Ok(ScoredExplanation {
            item: item.clone(),
            score,
            top_user_terms,
            matched_item_terms,
            term_contributions,
            plain_text_reason,
        })
    }

    /// Item-text tokens that resonate with any single user interest.
    ///
    /// Each distinct token (first occurrence wins, capped for cost) is
    /// embedded and ranked by its best cosine against the user-term vectors.
    /// Max rather than average: a token counts as matched when it lands close
    /// to one interest, not when it blends with all of them.
    async fn matched_item_terms(
        &self,
        item_text: &str,
        user_term_vectors: &[EmbeddingVector],
    ) -> Result<Vec<String>, EmbedderError> {
        let mut seen = HashSet::new();
        let tokens: Vec<String> = tokenize(item_text)
            .into_iter()
            .filter(|t| seen.insert(t.clone()))
            .take(MAX_ITEM_TOKENS)
            .collect();

        let token_vectors =
            future::try_join_all(tokens.iter().map(|t| self.embedder.embed(t))).await?;

        let mut token_scores: Vec<(String, f32)> = tokens
            .into_iter()
            .zip(token_vectors)
            .map(|(token, vector)| {
                let best = user_term_vectors
                    .iter()
                    .map(|u| cosine_similarity(u, &vector))
                    .fold(f32::NEG_INFINITY, f32::max);
                (token, best)
            })
            .collect();

        token_scores.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        Ok(token_scores
            .into_iter()
            .take(MAX_MATCHED_ITEM_TERMS)
            .map(|(token, _)| token)
            .collect())
    }

    /// Placeholder explanations for a batch whose embeddings failed.
    fn degraded_batch(items: &[CandidateItem]) -> Vec<ScoredExplanation> {
        items
            .iter()
            .take(MAX_RESULTS)
            .map(|item| ScoredExplanation {
                item: item.clone(),
                score: 0.0,
                top_user_terms: Vec::new(),
                matched_item_terms: Vec::new(),
                term_contributions: Vec::new(),
                plain_text_reason: DEGRADED_REASON.to_string(),
            })
            .collect()
    }
}

/// Approximate per-term attribution: cosine of each isolated term embedding
/// against the item vector, normalized over the positive contribution mass.
fn attribute_terms(
    user_terms: &[String],
    user_term_vectors: &[EmbeddingVector],
    item_vector: &EmbeddingVector,
) -> Vec<TermContribution> {
    let raw: Vec<f32> = user_term_vectors
        .iter()
        .map(|v| cosine_similarity(v, item_vector))
        .collect();

    // Floor of 1 keeps the division sane when nothing contributes positively.
    let positive_sum: f32 = raw.iter().filter(|c| **c > 0.0).sum();
    let positive_sum = if positive_sum > 0.0 { positive_sum } else { 1.0 };

    let mut contributions: Vec<TermContribution> = user_terms
        .iter()
        .zip(raw)
        .map(|(term, contribution)| TermContribution {
            term: term.clone(),
            contribution_score: contribution,
            normalized_contribution: contribution.max(0.0) / positive_sum,
        })
        .collect();

    contributions.sort_by(|a, b| {
        b.normalized_contribution
            .partial_cmp(&a.normalized_contribution)
            .unwrap_or(Ordering::Equal)
    });
    contributions.truncate(MAX_TERM_CONTRIBUTIONS);
    contributions
}

fn sort_by_score_desc<T>(items: &mut [T], score: impl Fn(&T) -> f32) {
    items.sort_by(|a, b| score(b).partial_cmp(&score(a)).unwrap_or(Ordering::Equal));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn arc(values: Vec<f32>) -> EmbeddingVector {
        Arc::new(values)
    }

    fn terms(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_attribute_terms_normalizes_over_positive_mass() {
        let user_terms = terms(&["aligned", "orthogonal", "opposed"]);
        let item_vector = arc(vec![1.0, 0.0]);
        let user_term_vectors = vec![
            arc(vec![1.0, 0.0]),  // cosine 1.0
            arc(vec![0.0, 1.0]),  // cosine 0.0
            arc(vec![-1.0, 0.0]), // cosine -1.0
        ];

        let contributions = attribute_terms(&user_terms, &user_term_vectors, &item_vector);

        assert_eq!(contributions.len(), 3);
        assert_eq!(contributions[0].term, "aligned");
        assert!((contributions[0].normalized_contribution - 1.0).abs() < 1e-6);

        let total: f32 = contributions
            .iter()
            .map(|c| c.normalized_contribution)
            .sum();
        assert!(total <= 1.000001, "normalized mass must not exceed 1");
        for c in &contributions {
            assert!(
                (0.0..=1.0).contains(&c.normalized_contribution),
                "{} out of range",
                c.term
            );
        }

        // Raw scores keep their sign even though normalized values clamp at 0
        let opposed = contributions.iter().find(|c| c.term == "opposed").unwrap();
        assert!(opposed.contribution_score < 0.0);
        assert_eq!(opposed.normalized_contribution, 0.0);
    }

    #[test]
    fn test_attribute_terms_all_negative_uses_unit_floor() {
        let user_terms = terms(&["a", "b"]);
        let item_vector = arc(vec![1.0, 0.0]);
        let user_term_vectors = vec![arc(vec![-1.0, 0.0]), arc(vec![-0.5, -0.5])];

        let contributions = attribute_terms(&user_terms, &user_term_vectors, &item_vector);
        for c in &contributions {
            assert_eq!(c.normalized_contribution, 0.0);
        }
    }

    #[test]
    fn test_attribute_terms_caps_at_eight() {
        let user_terms: Vec<String> = (0..12).map(|i| format!("term{i}")).collect();
        let user_term_vectors: Vec<EmbeddingVector> = (0..12)
            .map(|i| arc(vec![1.0, i as f32 / 12.0]))
            .collect();
        let item_vector = arc(vec![1.0, 0.5]);

        let contributions = attribute_terms(&user_terms, &user_term_vectors, &item_vector);
        assert_eq!(contributions.len(), MAX_TERM_CONTRIBUTIONS);

        // Sorted descending by normalized contribution
        for pair in contributions.windows(2) {
            assert!(pair[0].normalized_contribution >= pair[1].normalized_contribution);
        }
    }

    #[test]
    fn test_attribute_terms_keeps_duplicate_terms() {
        let user_terms = terms(&["sci-fi", "sci-fi"]);
        let item_vector = arc(vec![1.0, 0.0]);
        let user_term_vectors = vec![arc(vec![1.0, 0.0]), arc(vec![1.0, 0.0])];

        let contributions = attribute_terms(&user_terms, &user_term_vectors, &item_vector);
        assert_eq!(contributions.len(), 2, "duplicates are scored separately");
        // Two equal positive contributions split the mass evenly
        for c in &contributions {
            assert!((c.normalized_contribution - 0.5).abs() < 1e-6);
        }
    }

    #[test]
    fn test_attribute_terms_empty_profile() {
        let contributions = attribute_terms(&[], &[], &arc(vec![1.0, 0.0]));
        assert!(contributions.is_empty());
    }
}
