//! Core types for meme resolution: sources, candidates, and outcomes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A meme knowledge source that can be searched by listing + detail fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Source {
    /// Know Your Meme — broad, English-leaning coverage.
    KnowYourMeme,
    /// Memepedia — Russian-leaning coverage.
    Memepedia,
}

impl Source {
    /// Returns the human-readable name of this source.
    pub fn name(&self) -> &'static str {
        match self {
            Self::KnowYourMeme => "Know Your Meme",
            Self::Memepedia => "Memepedia",
        }
    }

    /// Returns the other source, used for the single-hop fallback.
    pub fn other(&self) -> Source {
        match self {
            Self::KnowYourMeme => Self::Memepedia,
            Self::Memepedia => Self::KnowYourMeme,
        }
    }

    /// Returns all available source variants.
    pub fn all() -> &'static [Source] {
        &[Self::KnowYourMeme, Self::Memepedia]
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single entry from a source's search-results listing.
///
/// `href` is absolute for Memepedia and site-relative for Know Your Meme;
/// the source implementation resolves it before fetching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Listing entry title.
    pub title: String,
    /// Link to the entry's detail page, as it appeared in the listing.
    pub href: String,
}

/// A [`Candidate`] with a similarity score against the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    /// Listing entry title.
    pub title: String,
    /// Link to the entry's detail page, as it appeared in the listing.
    pub href: String,
    /// Similarity of `title` to the query, in `[0.0, 1.0]`.
    pub score: f64,
}

impl ScoredCandidate {
    /// Strips the score, yielding the plain candidate for session storage.
    pub fn to_candidate(&self) -> Candidate {
        Candidate {
            title: self.title.clone(),
            href: self.href.clone(),
        }
    }
}

/// A fully resolved meme entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemeDetail {
    /// Entry title, `"Untitled"` when the page carried none.
    pub title: String,
    /// Cleaned summary text, truncated to the configured maximum.
    pub summary: String,
    /// Absolute URL of the detail page.
    pub url: String,
    /// Which source the entry came from.
    pub source: Source,
}

/// Outcome of resolving a query against one or both sources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Resolution {
    /// Exactly one entry matched the query.
    Detail(MemeDetail),
    /// No exact match; ranked near-matches, best first. Never empty.
    Suggestions {
        /// The source whose listing produced these candidates.
        source: Source,
        /// Candidates sorted descending by score, ties in listing order.
        items: Vec<ScoredCandidate>,
    },
    /// No candidates anywhere.
    NotFound,
    /// Transport or parse failure, distinct from [`Resolution::NotFound`].
    Unavailable {
        /// Human-readable failure description.
        reason: String,
    },
}

impl Resolution {
    /// Short tag for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Detail(_) => "detail",
            Self::Suggestions { .. } => "suggestions",
            Self::NotFound => "not-found",
            Self::Unavailable { .. } => "unavailable",
        }
    }
}
