use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use content::{tokenize, CandidateItem, Domain, UserPreferenceProfile};
use embedder::{Embedder, EmbedderConfig, LocalModelBackend};
use scoring::RelevanceScorer;
use server::{InMemoryPreferenceStore, RecommendationOrchestrator, StaticCandidateProvider};

/// User id the CLI registers its profile under.
const CLI_USER: &str = "cli";

/// PickWise - Explainable Recommendation Engine
#[derive(Parser)]
#[command(name = "pickwise")]
#[command(about = "Explainable movie/book/music recommendations", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score candidate items against a preference profile
    Recommend {
        /// Path to a JSON preference profile
        #[arg(long)]
        profile: PathBuf,

        /// Path to a JSON array of candidate items
        #[arg(long)]
        items: PathBuf,

        /// Domain to recommend in (movies, books, music)
        #[arg(long)]
        domain: Domain,

        /// Show the full attribution breakdown for each recommendation
        #[arg(long)]
        explain: bool,
    },

    /// Rank globally important terms for a domain
    Terms {
        /// Domain to analyze (movies, books, music)
        #[arg(long)]
        domain: Domain,

        /// Optional JSON array of candidate items; built-in corpus otherwise
        #[arg(long)]
        items: Option<PathBuf>,

        /// Number of terms to report
        #[arg(long, default_value = "20")]
        top: usize,
    },

    /// Tokenize a text the way the scoring core does
    Tokenize {
        /// Text to tokenize
        #[arg(long)]
        text: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    // Dispatch to the appropriate command handler
    match cli.command {
        Commands::Recommend {
            profile,
            items,
            domain,
            explain,
        } => handle_recommend(profile, items, domain, explain).await?,
        Commands::Terms { domain, items, top } => handle_terms(domain, items, top)?,
        Commands::Tokenize { text } => handle_tokenize(&text),
    }

    Ok(())
}

/// Handle the 'recommend' command
async fn handle_recommend(
    profile_path: PathBuf,
    items_path: PathBuf,
    domain: Domain,
    explain: bool,
) -> Result<()> {
    let profile = load_profile(&profile_path)?;
    let items = load_items(&items_path)?;
    println!("Scoring {} {} candidates...", items.len(), domain);

    let start = Instant::now();
    let orchestrator = build_orchestrator(profile, domain, items);

    if explain {
        let response = orchestrator.recommend(CLI_USER, domain).await?;
        println!("{} {} in {:?}", "✓".green(), response.message, start.elapsed());

        for (i, rec) in response.recommendations.iter().enumerate() {
            println!(
                "{}. {} {}",
                i + 1,
                rec.item.title.bold(),
                format!("(score {:.3})", rec.score).dimmed()
            );
            println!("   {}", rec.plain_text_reason);
            if !rec.term_contributions.is_empty() {
                println!("   Term contributions:");
                for c in &rec.term_contributions {
                    println!(
                        "     {:<20} raw {:+.3}  share {:.3}",
                        c.term, c.contribution_score, c.normalized_contribution
                    );
                }
            }
            if !rec.matched_item_terms.is_empty() {
                println!("   Matched terms: {}", rec.matched_item_terms.join(", "));
            }
        }
    } else {
        let response = orchestrator.recommend_basic(CLI_USER, domain).await?;
        println!("{} {} in {:?}", "✓".green(), response.message, start.elapsed());

        for (i, rec) in response.recommendations.iter().enumerate() {
            println!(
                "{}. {} {}",
                i + 1,
                rec.item.title.bold(),
                format!("(score {:.3})", rec.score).dimmed()
            );
        }
    }

    Ok(())
}

/// Handle the 'terms' command
fn handle_terms(domain: Domain, items_path: Option<PathBuf>, top: usize) -> Result<()> {
    let items = match items_path {
        Some(path) => load_items(&path)?,
        None => Vec::new(),
    };

    let report = insights::global_term_importances(&items, domain, top);
    println!("{}", report.summary.bold());
    for weight in &report.top_terms {
        println!("  {:<20} {:.4}", weight.term, weight.score);
    }

    Ok(())
}

/// Handle the 'tokenize' command
fn handle_tokenize(text: &str) {
    for token in tokenize(text) {
        println!("{token}");
    }
}

/// Wire the orchestrator over in-memory collaborators holding the loaded data.
fn build_orchestrator(
    profile: UserPreferenceProfile,
    domain: Domain,
    items: Vec<CandidateItem>,
) -> RecommendationOrchestrator {
    let preferences = Arc::new(InMemoryPreferenceStore::new().with_profile(CLI_USER, profile));
    let candidates = Arc::new(StaticCandidateProvider::new().with_items(domain, items));
    let embedder = Embedder::new(
        Arc::new(LocalModelBackend::mini_lm()),
        EmbedderConfig::default(),
    );
    RecommendationOrchestrator::new(preferences, candidates, RelevanceScorer::new(embedder))
}

fn load_profile(path: &Path) -> Result<UserPreferenceProfile> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read profile file {}", path.display()))?;
    serde_json::from_str(&raw).context("Failed to parse preference profile JSON")
}

fn load_items(path: &Path) -> Result<Vec<CandidateItem>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read items file {}", path.display()))?;
    serde_json::from_str(&raw).context("Failed to parse candidate items JSON")
}
