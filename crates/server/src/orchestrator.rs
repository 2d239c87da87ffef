//! # Recommendation Orchestrator
//!
//! Coordinates one recommendation request end to end:
//! 1. Fetch the user's preference profile and the domain's candidates in
//!    parallel
//! 2. Score the candidates, with or without explanations
//! 3. Assemble the client-facing response
//!
//! Also serves the global term-importance view, which only needs candidates.
//!
//! The explained path never fails on embeddings: the scorer degrades the
//! batch and the response says so in its message. Collaborator failures
//! (unknown user, content API down) do surface as errors here; mapping them
//! to HTTP is the delivery layer's concern.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;

use content::Domain;
use insights::global_term_importances;
use scoring::RelevanceScorer;

use crate::ports::{CandidateProvider, PreferenceStore};
use crate::response::{BasicRecommendationResponse, RecommendationResponse, TermReportResponse};

/// Main orchestrator tying collaborator ports to the scoring core.
pub struct RecommendationOrchestrator {
    preferences: Arc<dyn PreferenceStore>,
    candidates: Arc<dyn CandidateProvider>,
    scorer: RelevanceScorer,
}

impl RecommendationOrchestrator {
    /// Create an orchestrator with all collaborators injected.
    pub fn new(
        preferences: Arc<dyn PreferenceStore>,
        candidates: Arc<dyn CandidateProvider>,
        scorer: RelevanceScorer,
    ) -> Self {
        Self {
            preferences,
            candidates,
            scorer,
        }
    }

    /// Recommendations with full explanations.
    ///
    /// Always returns a well-formed response when collaborators deliver:
    /// empty candidates yield an empty success response, and an embedding
    /// outage yields placeholder explanations rather than an error.
    pub async fn recommend(&self, user_id: &str, domain: Domain) -> Result<RecommendationResponse> {
        let start_time = Instant::now();

        let (profile, items) = tokio::join!(
            self.preferences.preferences(user_id),
            self.candidates.candidates(domain),
        );
        let profile = profile.context("Failed to load user preferences")?;
        let items = items.context("Failed to fetch candidates")?;
        info!(
            "Loaded profile and {} {} candidates for {}",
            items.len(),
            domain,
            user_id
        );

        if items.is_empty() {
            return Ok(RecommendationResponse {
                success: true,
                recommendations: Vec::new(),
                message: format!("No {domain} recommendations found."),
            });
        }

        let batch = self
            .scorer
            .score_with_explanations(&profile, &items, domain)
            .await;
        let degraded = batch.is_degraded();
        let recommendations = batch.into_explanations();

        info!(
            "Scored {} {} recommendations in {:.2?} (degraded: {})",
            recommendations.len(),
            domain,
            start_time.elapsed(),
            degraded
        );

        let message = if degraded {
            format!("{domain} recommendations fetched without detailed explanations")
        } else {
            format!("{domain} recommendations with explanations fetched successfully")
        };

        Ok(RecommendationResponse {
            success: true,
            recommendations,
            message,
        })
    }

    /// Baseline recommendations without the attribution breakdown.
    ///
    /// This path has no degraded fallback; an embedding outage surfaces as
    /// an error for the delivery layer to map.
    pub async fn recommend_basic(
        &self,
        user_id: &str,
        domain: Domain,
    ) -> Result<BasicRecommendationResponse> {
        let (profile, items) = tokio::join!(
            self.preferences.preferences(user_id),
            self.candidates.candidates(domain),
        );
        let profile = profile.context("Failed to load user preferences")?;
        let items = items.context("Failed to fetch candidates")?;

        if items.is_empty() {
            return Ok(BasicRecommendationResponse {
                success: true,
                recommendations: Vec::new(),
                message: format!("No {domain} recommendations found."),
            });
        }

        let recommendations = self
            .scorer
            .rank(&profile, &items, domain)
            .await
            .context("Failed to score candidates")?;

        Ok(BasicRecommendationResponse {
            success: true,
            recommendations,
            message: format!("{domain} recommendations fetched successfully"),
        })
    }

    /// Global term-importance report for a domain.
    ///
    /// Candidates may legitimately be empty; the ranker then falls back to
    /// its built-in corpus.
    pub async fn term_importances(&self, domain: Domain, top_n: usize) -> Result<TermReportResponse> {
        let items = self
            .candidates
            .candidates(domain)
            .await
            .context("Failed to fetch candidates")?;

        let report = global_term_importances(&items, domain, top_n);
        info!(
            "Computed {} global terms for {}",
            report.top_terms.len(),
            domain
        );

        Ok(TermReportResponse {
            success: true,
            report,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use content::{CandidateItem, DomainPreferences, UserPreferenceProfile};
    use embedder::{Embedder, EmbedderConfig, EmbedderError, EmbeddingBackend};
    use crate::memory::{InMemoryPreferenceStore, StaticCandidateProvider};

    // ============================================================================
    // Test Fixtures
    // ============================================================================

    /// Deterministic stand-in for the embedding model: one axis per known
    /// keyword group.
    struct StubBackend;

    #[async_trait]
    impl EmbeddingBackend for StubBackend {
        async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedderError> {
            let lowered = text.to_lowercase();
            let mut vector = vec![0.01f32; 3];
            for (axis, keywords) in [
                ["sci-fi", "space", "galactic"],
                ["romance", "love", "hearts"],
                ["crime", "gritty", "urban"],
            ]
            .iter()
            .enumerate()
            {
                for keyword in keywords.iter() {
                    if lowered.contains(keyword) {
                        vector[axis] += 1.0;
                    }
                }
            }
            Ok(vector)
        }

        fn dimensions(&self) -> usize {
            3
        }
    }

    /// Backend that is permanently down.
    struct DownBackend;

    #[async_trait]
    impl EmbeddingBackend for DownBackend {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbedderError> {
            Err(EmbedderError::Inference("model offline".to_string()))
        }

        fn dimensions(&self) -> usize {
            3
        }
    }

    fn sci_fi_profile() -> UserPreferenceProfile {
        UserPreferenceProfile {
            movies: DomainPreferences {
                genres: vec!["sci-fi".to_string()],
                favorites: vec!["space".to_string()],
            },
            ..Default::default()
        }
    }

    fn movie_candidates() -> Vec<CandidateItem> {
        vec![
            CandidateItem::movie("1", "Star Voyager", "galactic space battles"),
            CandidateItem::movie("2", "Autumn Hearts", "a romance about love"),
        ]
    }

    fn build_orchestrator(backend: Arc<dyn EmbeddingBackend>) -> RecommendationOrchestrator {
        let preferences = Arc::new(
            InMemoryPreferenceStore::new().with_profile("ana@example.com", sci_fi_profile()),
        );
        let candidates = Arc::new(
            StaticCandidateProvider::new().with_items(Domain::Movies, movie_candidates()),
        );
        let scorer = RelevanceScorer::new(Embedder::new(backend, EmbedderConfig::default()));
        RecommendationOrchestrator::new(preferences, candidates, scorer)
    }

    // ============================================================================
    // Explained path
    // ============================================================================

    #[tokio::test]
    async fn test_recommend_returns_sorted_explanations() {
        let orchestrator = build_orchestrator(Arc::new(StubBackend));

        let response = orchestrator
            .recommend("ana@example.com", Domain::Movies)
            .await
            .expect("recommend failed");

        assert!(response.success);
        assert!(response.message.contains("explanations"));
        assert_eq!(response.recommendations.len(), 2);
        assert_eq!(response.recommendations[0].item.title, "Star Voyager");
        assert!(!response.recommendations[0].plain_text_reason.is_empty());
    }

    #[tokio::test]
    async fn test_recommend_for_unknown_user_fails() {
        let orchestrator = build_orchestrator(Arc::new(StubBackend));

        let result = orchestrator.recommend("nobody@example.com", Domain::Movies).await;
        assert!(result.is_err(), "unknown user is a collaborator error");
    }

    #[tokio::test]
    async fn test_recommend_with_no_candidates_is_well_formed() {
        let orchestrator = build_orchestrator(Arc::new(StubBackend));

        // Books has no registered candidates
        let response = orchestrator
            .recommend("ana@example.com", Domain::Books)
            .await
            .expect("recommend failed");

        assert!(response.success);
        assert!(response.recommendations.is_empty());
        assert_eq!(response.message, "No books recommendations found.");
    }

    #[tokio::test]
    async fn test_recommend_degrades_when_embeddings_are_down() {
        let orchestrator = build_orchestrator(Arc::new(DownBackend));

        let response = orchestrator
            .recommend("ana@example.com", Domain::Movies)
            .await
            .expect("degraded batch must still be a success response");

        assert!(response.success);
        assert_eq!(response.recommendations.len(), 2);
        assert!(response.message.contains("without detailed explanations"));
        for rec in &response.recommendations {
            assert_eq!(rec.score, 0.0);
            assert!(rec.plain_text_reason.contains("temporary"));
        }
    }

    // ============================================================================
    // Baseline path
    // ============================================================================

    #[tokio::test]
    async fn test_recommend_basic_scores_without_attribution() {
        let orchestrator = build_orchestrator(Arc::new(StubBackend));

        let response = orchestrator
            .recommend_basic("ana@example.com", Domain::Movies)
            .await
            .expect("recommend_basic failed");

        assert_eq!(response.recommendations.len(), 2);
        assert_eq!(response.recommendations[0].item.title, "Star Voyager");
    }

    #[tokio::test]
    async fn test_recommend_basic_propagates_embedding_outage() {
        let orchestrator = build_orchestrator(Arc::new(DownBackend));

        let result = orchestrator
            .recommend_basic("ana@example.com", Domain::Movies)
            .await;
        assert!(result.is_err(), "baseline path has no degraded fallback");
    }

    // ============================================================================
    // Term report
    // ============================================================================

    #[tokio::test]
    async fn test_term_importances_over_live_candidates() {
        let orchestrator = build_orchestrator(Arc::new(StubBackend));

        let response = orchestrator
            .term_importances(Domain::Movies, 5)
            .await
            .expect("term_importances failed");

        assert!(response.success);
        assert!(response.report.top_terms.len() <= 5);
        assert!(response
            .report
            .top_terms
            .iter()
            .any(|t| t.term == "galactic" || t.term == "romance"));
    }

    #[tokio::test]
    async fn test_term_importances_falls_back_without_candidates() {
        let orchestrator = build_orchestrator(Arc::new(StubBackend));

        let response = orchestrator
            .term_importances(Domain::Music, 5)
            .await
            .expect("term_importances failed");

        assert_eq!(response.report.top_terms.len(), 5);
        assert!(response.report.summary.contains("music"));
    }

    #[tokio::test]
    async fn test_response_serializes_to_client_shape() {
        let orchestrator = build_orchestrator(Arc::new(StubBackend));

        let response = orchestrator
            .recommend("ana@example.com", Domain::Movies)
            .await
            .unwrap();

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], true);
        assert!(json["recommendations"].as_array().unwrap().len() == 2);
        let first = &json["recommendations"][0];
        assert!(first["score"].is_number());
        assert!(first["plain_text_reason"].is_string());
        assert!(first["title"].is_string(), "item fields flatten into the record");
    }
}
