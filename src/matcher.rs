//! Pure matching functions: exact-match detection, similarity ranking,
//! and strict-threshold reply selection.
//!
//! All comparisons are case-insensitive. The similarity metric is a
//! character-diff ratio in `[0.0, 1.0]`, symmetric, and `1.0` exactly
//! when the two strings are equal after case folding.

use crate::types::{Candidate, ScoredCandidate};
use similar::TextDiff;

/// Outcome of matching a user reply against stored candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMatch {
    /// Exactly one candidate scored highest above the threshold.
    Unique(usize),
    /// Two or more candidates tied at the maximal qualifying score.
    Ambiguous,
    /// No candidate reached the threshold.
    NoMatch,
}

/// Similarity ratio between two strings, case-folded.
///
/// `2 * matching_chars / total_chars` over a character diff, so the
/// result is deterministic, symmetric, and `1.0` only for strings that
/// are equal ignoring case.
pub fn similarity(a: &str, b: &str) -> f64 {
    let folded_a = a.to_lowercase();
    let folded_b = b.to_lowercase();
    let diff = TextDiff::from_chars(folded_a.as_str(), folded_b.as_str());
    f64::from(diff.ratio())
}

/// Find the first candidate whose title equals the query, ignoring case.
///
/// Listing order is source-provided relevance, so the first match is
/// authoritative.
pub fn find_exact(query: &str, candidates: &[Candidate]) -> Option<usize> {
    let folded = query.trim().to_lowercase();
    candidates
        .iter()
        .position(|c| c.title.trim().to_lowercase() == folded)
}

/// Score every candidate against the query, drop those below `threshold`,
/// and sort descending by score.
///
/// The sort is stable, so candidates with equal scores keep their
/// original listing order. No display cap is applied here — callers cap
/// at presentation time so the best-scoring items are always chosen.
pub fn rank_suggestions(
    query: &str,
    candidates: &[Candidate],
    threshold: f64,
) -> Vec<ScoredCandidate> {
    let mut scored: Vec<ScoredCandidate> = candidates
        .iter()
        .map(|c| ScoredCandidate {
            title: c.title.clone(),
            href: c.href.clone(),
            score: similarity(query, &c.title),
        })
        .filter(|s| s.score >= threshold)
        .collect();

    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    scored
}

/// Match a user reply against stored candidates with a strict threshold.
///
/// Returns the single best-scoring candidate at or above `threshold`.
/// If several candidates tie at that maximal score the selection is
/// [`SelectionMatch::Ambiguous`] — the caller re-prompts rather than
/// guessing.
pub fn match_selection(reply: &str, candidates: &[Candidate], threshold: f64) -> SelectionMatch {
    let mut best: Option<(usize, f64)> = None;
    let mut tied = false;

    for (index, candidate) in candidates.iter().enumerate() {
        let score = similarity(reply, &candidate.title);
        if score < threshold {
            continue;
        }
        match best {
            None => {
                best = Some((index, score));
                tied = false;
            }
            Some((_, best_score)) if score > best_score => {
                best = Some((index, score));
                tied = false;
            }
            Some((_, best_score)) if (score - best_score).abs() < f64::EPSILON => {
                tied = true;
            }
            Some(_) => {}
        }
    }

    match best {
        Some(_) if tied => SelectionMatch::Ambiguous,
        Some((index, _)) => SelectionMatch::Unique(index),
        None => SelectionMatch::NoMatch,
    }
}
