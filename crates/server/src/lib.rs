//! Server crate for the PickWise recommendation core.
//!
//! This crate contains the orchestrator that ties the collaborator ports
//! (preference store, candidate provider) to the scorer and the global term
//! ranker, plus the response shapes the delivery layer serializes.

pub mod memory;
pub mod orchestrator;
pub mod ports;
pub mod response;

pub use memory::{InMemoryPreferenceStore, StaticCandidateProvider};
pub use orchestrator::RecommendationOrchestrator;
pub use ports::{CandidateProvider, PreferenceStore};
pub use response::{BasicRecommendationResponse, RecommendationResponse, TermReportResponse};
