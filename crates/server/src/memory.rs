//! In-memory collaborator implementations.
//!
//! These back the CLI and the demo harness and double as test fixtures. A
//! real deployment substitutes the document database and the content API
//! clients behind the same ports.

use std::collections::HashMap;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use content::{CandidateItem, Domain, UserPreferenceProfile};

use crate::ports::{CandidateProvider, PreferenceStore};

/// Preference store holding profiles in a map keyed by user id.
#[derive(Default)]
pub struct InMemoryPreferenceStore {
    profiles: HashMap<String, UserPreferenceProfile>,
}

impl InMemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user's profile (builder pattern).
    pub fn with_profile(
        mut self,
        user_id: impl Into<String>,
        profile: UserPreferenceProfile,
    ) -> Self {
        self.profiles.insert(user_id.into(), profile);
        self
    }
}

#[async_trait]
impl PreferenceStore for InMemoryPreferenceStore {
    async fn preferences(&self, user_id: &str) -> Result<UserPreferenceProfile> {
        self.profiles
            .get(user_id)
            .cloned()
            .ok_or_else(|| anyhow!("User {} not found", user_id))
    }
}

/// Candidate provider serving fixed per-domain item lists.
#[derive(Default)]
pub struct StaticCandidateProvider {
    items: HashMap<Domain, Vec<CandidateItem>>,
}

impl StaticCandidateProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the candidate list for a domain (builder pattern).
    pub fn with_items(mut self, domain: Domain, items: Vec<CandidateItem>) -> Self {
        self.items.insert(domain, items);
        self
    }
}

#[async_trait]
impl CandidateProvider for StaticCandidateProvider {
    async fn candidates(&self, domain: Domain) -> Result<Vec<CandidateItem>> {
        Ok(self.items.get(&domain).cloned().unwrap_or_default())
    }
}
