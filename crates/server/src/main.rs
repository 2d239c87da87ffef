//! Demo harness for the PickWise recommendation core.
//!
//! Wires the orchestrator to in-memory collaborators and the real local
//! embedding model, then requests explained recommendations and a global
//! term report. The first run downloads the model weights.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use content::{CandidateItem, Domain, DomainPreferences, UserPreferenceProfile};
use embedder::{Embedder, EmbedderConfig, LocalModelBackend};
use scoring::RelevanceScorer;
use server::{InMemoryPreferenceStore, RecommendationOrchestrator, StaticCandidateProvider};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("info,server=debug,scoring=debug,embedder=debug")
        .init();

    info!("Starting PickWise demo harness");

    let profile = UserPreferenceProfile {
        movies: DomainPreferences {
            genres: vec!["sci-fi".to_string(), "thriller".to_string()],
            favorites: vec!["Inception".to_string()],
        },
        ..Default::default()
    };
    let preferences =
        Arc::new(InMemoryPreferenceStore::new().with_profile("demo@pickwise.app", profile));

    let items = vec![
        CandidateItem::movie(
            "603",
            "The Matrix",
            "A hacker discovers reality is a simulation and joins a rebellion",
        ),
        CandidateItem::movie(
            "27205",
            "Inception",
            "A thief enters dreams to plant an idea in a target's mind",
        ),
        CandidateItem::movie(
            "194",
            "Amelie",
            "A whimsical Parisian waitress orchestrates small acts of kindness",
        ),
        CandidateItem::movie(
            "157336",
            "Interstellar",
            "Explorers travel through a wormhole in search of a new home for humanity",
        ),
    ];
    let candidates = Arc::new(StaticCandidateProvider::new().with_items(Domain::Movies, items));

    info!("Loading embedding model (downloads weights on first run)...");
    let embedder = Embedder::new(
        Arc::new(LocalModelBackend::mini_lm()),
        EmbedderConfig::default(),
    );
    let scorer = RelevanceScorer::new(embedder);

    let orchestrator = RecommendationOrchestrator::new(preferences, candidates, scorer);

    let response = orchestrator
        .recommend("demo@pickwise.app", Domain::Movies)
        .await?;
    info!("{}", response.message);
    for (i, rec) in response.recommendations.iter().enumerate() {
        info!("{}. {} - Score: {:.3}", i + 1, rec.item.title, rec.score);
        info!("   {}", rec.plain_text_reason);
    }

    let report = orchestrator.term_importances(Domain::Movies, 10).await?;
    info!("{}", report.report.summary);

    Ok(())
}
