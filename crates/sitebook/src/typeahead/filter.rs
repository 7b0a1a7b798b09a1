//! Candidate filtering.
//!
//! Matching is a case-insensitive substring test of the trimmed query
//! against a candidate's label and secondary label. Order is preserved and
//! nothing is truncated here; the rendered list applies its own cap.

use unicode_segmentation::UnicodeSegmentation;

use super::candidate::Candidate;

/// Default minimum query length, in characters, before anything matches.
pub const DEFAULT_MIN_CHARS: usize = 1;

/// Return the candidates matching `query`, in input order.
///
/// A trimmed query shorter than `min_chars` user-perceived characters
/// matches nothing.
pub fn filter<C: Candidate>(query: &str, candidates: &[C], min_chars: usize) -> Vec<C> {
    let needle = query.trim();
    if needle.graphemes(true).count() < min_chars {
        return Vec::new();
    }
    let needle = needle.to_lowercase();

    candidates
        .iter()
        .filter(|candidate| matches(*candidate, &needle))
        .cloned()
        .collect()
}

/// Whether `candidate` matches an already lowercased needle.
pub fn matches<C: Candidate>(candidate: &C, needle: &str) -> bool {
    contains_folded(candidate.label(), needle)
        || candidate
            .secondary_label()
            .is_some_and(|secondary| contains_folded(secondary, needle))
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}
