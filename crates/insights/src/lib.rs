//! # Insights Crate
//!
//! Corpus-wide explainability for PickWise: which terms drive
//! recommendations in a domain overall, independent of any single user.
//!
//! ## Components
//!
//! ### Global Term Ranker
//! Classic TF-IDF over a domain's item descriptions:
//! - Live candidates when the caller has them
//! - A small built-in corpus per domain otherwise
//!
//! Unlike the per-item scorer, nothing here touches the embedding model; the
//! ranking is pure tokenization and arithmetic, so it cannot degrade.
//!
//! ## Example Usage
//!
//! ```ignore
//! use content::Domain;
//! use insights::global_term_importances;
//!
//! let report = global_term_importances(&items, Domain::Movies, 20);
//! println!("{}", report.summary);
//! ```

// Public modules
pub mod corpus;
pub mod tfidf;

// Re-export commonly used items
pub use corpus::fallback_corpus;
pub use tfidf::{global_term_importances, GlobalTermReport, TermWeight, DEFAULT_TOP_TERMS};

#[cfg(test)]
mod tests {
    use super::*;
    use content::Domain;

    #[test]
    fn test_report_for_every_domain() {
        for domain in Domain::ALL {
            let report = global_term_importances(&[], domain, DEFAULT_TOP_TERMS);
            assert_eq!(report.domain, domain);
            assert!(!report.top_terms.is_empty());
            assert!(report.summary.contains(domain.as_str()));
        }
    }
}
