//! Corpus-wide term importance via TF-IDF.
//!
//! ## Algorithm
//! 1. Build one document per candidate item (the same text shape the scorer
//!    embeds), or fall back to the built-in corpus when no items are given
//! 2. Tokenize every document (rayon fan-out; tokenization dominates the cost)
//! 3. Weigh each term per document: term frequency (count / document length)
//!    times smoothed inverse document frequency `ln((N+1)/(df+1)) + 1`, and
//!    sum the weights across documents
//! 4. Sort descending, round to 4 decimals, truncate to the requested count

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use content::{tokenize, CandidateItem, Domain};
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::corpus::fallback_corpus;

/// Default number of terms in a report.
pub const DEFAULT_TOP_TERMS: usize = 20;

/// Number of terms cited in the one-line summary.
const SUMMARY_TERMS: usize = 6;

/// One globally important term and its aggregate TF-IDF weight.
#[derive(Debug, Clone, Serialize)]
pub struct TermWeight {
    pub term: String,
    pub score: f64,
}

/// Corpus-wide term-importance ranking for one domain.
#[derive(Debug, Clone, Serialize)]
pub struct GlobalTermReport {
    pub domain: Domain,
    /// Up to the requested number of terms, heaviest first.
    pub top_terms: Vec<TermWeight>,
    pub summary: String,
}

/// Rank the globally most important terms for a domain.
///
/// With no items the built-in fallback corpus is ranked instead, so the view
/// works without live data. Ties sort lexicographically: hash maps iterate
/// in arbitrary order, and the report must be stable across runs.
///
/// Pure and deterministic given the same corpus; tokenization is the only
/// text processing involved, so there is no failure mode.
pub fn global_term_importances(
    items: &[CandidateItem],
    domain: Domain,
    top_n: usize,
) -> GlobalTermReport {
    let documents: Vec<String> = if items.is_empty() {
        fallback_corpus(domain)
    } else {
        items.iter().map(|item| item.text()).collect()
    };

    let doc_tokens: Vec<Vec<String>> = documents.par_iter().map(|d| tokenize(d)).collect();
    debug!(
        documents = doc_tokens.len(),
        "Tokenized corpus for term ranking"
    );

    // Document frequency: in how many documents a term appears at all
    let mut document_frequency: HashMap<&str, usize> = HashMap::new();
    for tokens in &doc_tokens {
        let distinct: HashSet<&str> = tokens.iter().map(String::as_str).collect();
        for term in distinct {
            *document_frequency.entry(term).or_insert(0) += 1;
        }
    }

    let corpus_size = doc_tokens.len() as f64;
    let mut aggregate: HashMap<&str, f64> = HashMap::new();
    for tokens in &doc_tokens {
        if tokens.is_empty() {
            continue;
        }
        let mut term_frequency: HashMap<&str, usize> = HashMap::new();
        for term in tokens {
            *term_frequency.entry(term).or_insert(0) += 1;
        }
        let doc_len = tokens.len() as f64;
        for (term, count) in term_frequency {
            let df = *document_frequency.get(term).unwrap_or(&1) as f64;
            let idf = ((corpus_size + 1.0) / (df + 1.0)).ln() + 1.0;
            *aggregate.entry(term).or_insert(0.0) += (count as f64 / doc_len) * idf;
        }
    }

    let mut top_terms: Vec<TermWeight> = aggregate
        .into_iter()
        .map(|(term, score)| TermWeight {
            term: term.to_string(),
            score: (score * 10_000.0).round() / 10_000.0,
        })
        .collect();

    top_terms.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.term.cmp(&b.term))
    });
    top_terms.truncate(top_n);

    let summary = compose_summary(domain, &top_terms);

    GlobalTermReport {
        domain,
        top_terms,
        summary,
    }
}

/// One-line summary citing the heaviest terms.
fn compose_summary(domain: Domain, top_terms: &[TermWeight]) -> String {
    let cited: Vec<&str> = top_terms
        .iter()
        .take(SUMMARY_TERMS)
        .map(|t| t.term.as_str())
        .collect();
    format!(
        "Top signals we use to recommend {}: {}.",
        domain,
        cited.join(", ")
    )
}
