//! Core domain types for the PickWise recommendation core.
//!
//! This module defines the fundamental data structures used throughout the system:
//! - Domain: the three content categories the app serves
//! - UserPreferenceProfile / DomainPreferences: read-only user taste input
//! - CandidateItem / ItemDetails: content records being evaluated for relevance

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ContentError;

// =============================================================================
// Type Aliases
// =============================================================================

/// Identifier assigned by the upstream content API (TMDB, Google Books, Spotify, ...)
///
/// Kept as an opaque string: the core never interprets it, only carries it
/// through to the delivery layer.
pub type ItemId = String;

// =============================================================================
// Domain
// =============================================================================

/// Content categories served by the recommendation core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Movies,
    Books,
    Music,
}

impl Domain {
    /// All domains, in display order.
    pub const ALL: [Domain; 3] = [Domain::Movies, Domain::Books, Domain::Music];

    /// Lowercase name used in requests and reports.
    pub fn as_str(self) -> &'static str {
        match self {
            Domain::Movies => "movies",
            Domain::Books => "books",
            Domain::Music => "music",
        }
    }

    /// Singular noun used in human-readable explanations.
    pub fn noun(self) -> &'static str {
        match self {
            Domain::Movies => "movie",
            Domain::Books => "book",
            Domain::Music => "track",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Domain {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "movies" | "movie" => Ok(Domain::Movies),
            "books" | "book" => Ok(Domain::Books),
            "music" => Ok(Domain::Music),
            _ => Err(ContentError::UnknownDomain {
                value: s.to_string(),
            }),
        }
    }
}

// =============================================================================
// User Preferences
// =============================================================================

/// Preferences for a single domain: ordered genre and favorite-title lists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DomainPreferences {
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub favorites: Vec<String>,
}

impl DomainPreferences {
    /// Flatten genres and favorites into the ordered list of user terms.
    ///
    /// Terms are trimmed and empties dropped. Duplicates are kept: a term
    /// listed both as a genre and a favorite contributes twice to the
    /// attribution breakdown.
    pub fn terms(&self) -> Vec<String> {
        self.genres
            .iter()
            .chain(self.favorites.iter())
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_owned)
            .collect()
    }

    /// True when the user has expressed no taste for this domain.
    pub fn is_empty(&self) -> bool {
        self.genres.is_empty() && self.favorites.is_empty()
    }
}

/// Per-domain user taste profile.
///
/// Owned by the preference-store collaborator; the core only reads it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPreferenceProfile {
    #[serde(default)]
    pub movies: DomainPreferences,
    #[serde(default)]
    pub books: DomainPreferences,
    #[serde(default)]
    pub music: DomainPreferences,
}

impl UserPreferenceProfile {
    /// Borrow the preferences for one domain.
    pub fn for_domain(&self, domain: Domain) -> &DomainPreferences {
        match domain {
            Domain::Movies => &self.movies,
            Domain::Books => &self.books,
            Domain::Music => &self.music,
        }
    }
}

// =============================================================================
// Candidate Items
// =============================================================================

/// A content record being evaluated for relevance to a user.
///
/// Supplied by the candidate-fetch collaborator; immutable within a scoring
/// call. The descriptive fields differ per domain, so they live in
/// [`ItemDetails`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateItem {
    pub id: ItemId,
    pub title: String,
    #[serde(flatten)]
    pub details: ItemDetails,
}

/// Domain-specific descriptive fields of a candidate item.
///
/// Missing fields default to empty, so sparse API payloads still deserialize.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemDetails {
    Movie {
        #[serde(default)]
        overview: String,
    },
    Book {
        #[serde(default)]
        description: String,
        #[serde(default)]
        categories: Vec<String>,
        #[serde(default)]
        authors: Vec<String>,
    },
    Track {
        #[serde(default)]
        artist: String,
        #[serde(default)]
        genre: String,
    },
}

impl CandidateItem {
    /// Create a movie candidate.
    pub fn movie(
        id: impl Into<ItemId>,
        title: impl Into<String>,
        overview: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            details: ItemDetails::Movie {
                overview: overview.into(),
            },
        }
    }

    /// Create a book candidate.
    pub fn book(
        id: impl Into<ItemId>,
        title: impl Into<String>,
        description: impl Into<String>,
        categories: Vec<String>,
        authors: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            details: ItemDetails::Book {
                description: description.into(),
                categories,
                authors,
            },
        }
    }

    /// Create a music track candidate.
    pub fn track(
        id: impl Into<ItemId>,
        title: impl Into<String>,
        artist: impl Into<String>,
        genre: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            details: ItemDetails::Track {
                artist: artist.into(),
                genre: genre.into(),
            },
        }
    }

    /// Build the free-text representation that gets embedded and tokenized.
    ///
    /// Movies: title + overview. Music: title + artist + genre.
    /// Books: title + description + categories + authors.
    pub fn text(&self) -> String {
        match &self.details {
            ItemDetails::Movie { overview } => format!("{} {}", self.title, overview),
            ItemDetails::Track { artist, genre } => {
                format!("{} {} {}", self.title, artist, genre)
            }
            ItemDetails::Book {
                description,
                categories,
                authors,
            } => format!(
                "{} {} {} {}",
                self.title,
                description,
                categories.join(" "),
                authors.join(" ")
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_parse_and_display() {
        assert_eq!("movies".parse::<Domain>().unwrap(), Domain::Movies);
        assert_eq!("Books".parse::<Domain>().unwrap(), Domain::Books);
        assert_eq!("MUSIC".parse::<Domain>().unwrap(), Domain::Music);
        assert_eq!(Domain::Music.to_string(), "music");

        let err = "podcasts".parse::<Domain>();
        assert!(err.is_err(), "unsupported domain should fail to parse");
    }

    #[test]
    fn test_domain_noun() {
        assert_eq!(Domain::Movies.noun(), "movie");
        assert_eq!(Domain::Books.noun(), "book");
        assert_eq!(Domain::Music.noun(), "track");
    }

    #[test]
    fn test_terms_keeps_duplicates_and_order() {
        let prefs = DomainPreferences {
            genres: vec!["sci-fi".to_string(), "  drama ".to_string(), "".to_string()],
            favorites: vec!["Inception".to_string(), "sci-fi".to_string()],
        };

        let terms = prefs.terms();
        assert_eq!(terms, vec!["sci-fi", "drama", "Inception", "sci-fi"]);
    }

    #[test]
    fn test_empty_preferences() {
        let prefs = DomainPreferences::default();
        assert!(prefs.is_empty());
        assert!(prefs.terms().is_empty());
    }

    #[test]
    fn test_movie_text() {
        let item = CandidateItem::movie("603", "The Matrix", "A hacker discovers reality");
        assert_eq!(item.text(), "The Matrix A hacker discovers reality");
    }

    #[test]
    fn test_track_text() {
        let item = CandidateItem::track("t1", "Blinding Lights", "The Weeknd", "synthpop");
        assert_eq!(item.text(), "Blinding Lights The Weeknd synthpop");
    }

    #[test]
    fn test_book_text_joins_categories_and_authors() {
        let item = CandidateItem::book(
            "b1",
            "Dune",
            "Desert planet epic",
            vec!["fiction".to_string(), "classics".to_string()],
            vec!["Frank Herbert".to_string()],
        );
        assert_eq!(item.text(), "Dune Desert planet epic fiction classics Frank Herbert");
    }

    #[test]
    fn test_item_text_with_missing_fields() {
        // Sparse API payloads leave descriptive fields empty
        let item = CandidateItem::movie("1", "Untitled", "");
        assert_eq!(item.text(), "Untitled ");
    }

    #[test]
    fn test_candidate_item_deserializes_sparse_payload() {
        let item: CandidateItem =
            serde_json::from_str(r#"{"id": "42", "title": "Dune", "kind": "book"}"#).unwrap();
        assert_eq!(item.id, "42");
        match item.details {
            ItemDetails::Book {
                ref description,
                ref categories,
                ref authors,
            } => {
                assert!(description.is_empty());
                assert!(categories.is_empty());
                assert!(authors.is_empty());
            }
            _ => panic!("expected book details"),
        }
    }
}
