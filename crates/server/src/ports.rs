//! Collaborator ports the orchestrator depends on.
//!
//! The preference store and candidate fetch live outside the core (a
//! document database and third-party content APIs). The orchestrator only
//! sees these traits; deployment wiring and tests supply implementations.

use anyhow::Result;
use async_trait::async_trait;
use content::{CandidateItem, Domain, UserPreferenceProfile};

/// Read-only access to stored user preferences.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Fetch the preference profile for a user.
    async fn preferences(&self, user_id: &str) -> Result<UserPreferenceProfile>;
}

/// Supplies candidate items for a domain.
#[async_trait]
pub trait CandidateProvider: Send + Sync {
    /// Fetch the current candidates for a domain.
    ///
    /// An empty list is a valid answer; the orchestrator handles it.
    async fn candidates(&self, domain: Domain) -> Result<Vec<CandidateItem>>;
}
