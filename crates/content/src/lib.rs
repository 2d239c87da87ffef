//! # Content Crate
//!
//! Domain types and text utilities for the PickWise recommendation core.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Domain, UserPreferenceProfile, CandidateItem)
//! - **text**: Normalizing tokenizer shared by scoring and insights
//! - **error**: Error types for content handling
//!
//! ## Example Usage
//!
//! ```ignore
//! use content::{CandidateItem, Domain, UserPreferenceProfile, tokenize};
//!
//! let item = CandidateItem::movie("603", "The Matrix", "A hacker discovers reality");
//! let tokens = tokenize(&item.text());
//!
//! let profile: UserPreferenceProfile = serde_json::from_str(json)?;
//! let terms = profile.for_domain(Domain::Movies).terms();
//! ```

// Public modules
pub mod error;
pub mod text;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{ContentError, Result};
pub use text::tokenize;
pub use types::{
    // Type aliases
    ItemId,
    // Core types
    CandidateItem,
    DomainPreferences,
    ItemDetails,
    UserPreferenceProfile,
    // Enums
    Domain,
};
