//! Built-in fallback corpora.
//!
//! Three representative sentences per domain, used when no live candidates
//! are supplied. Keeps the explainability view functional without external
//! calls or stored data.

use content::Domain;

const MOVIES: [&str; 3] = [
    "epic space opera with galactic battles and interstellar travel",
    "gritty crime drama set in urban streets with complex characters",
    "heartwarming family adventure with friendship and discovery",
];

const MUSIC: [&str; 3] = [
    "upbeat pop anthem with synthwave vibes and catchy chorus",
    "mellow acoustic ballad with soulful vocals and intimate lyrics",
    "energetic hip hop track with hard-hitting beats and flow",
];

const BOOKS: [&str; 3] = [
    "epic fantasy saga featuring magic kingdoms and ancient prophecies",
    "thought-provoking dystopian novel with political intrigue",
    "inspiring self-help guide focused on habits and growth",
];

/// Fallback sentences for a domain.
pub fn fallback_corpus(domain: Domain) -> Vec<String> {
    let sentences: &[&str] = match domain {
        Domain::Movies => &MOVIES,
        Domain::Music => &MUSIC,
        Domain::Books => &BOOKS,
    };
    sentences.iter().map(|s| s.to_string()).collect()
}
