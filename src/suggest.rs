//! Suggestion source plumbing: queries out, staleness guard in.
//!
//! The engine never matches or ranks suggestions itself. It submits the
//! active token substring to a [`SuggestionSource`] and tells the host when
//! to dismiss the suggestion view. Result delivery is the host's affair and
//! may be asynchronous; every query carries a monotonically increasing
//! sequence number so late results for superseded queries can be thrown
//! away (see [`TokenField::is_current_query`]).
//!
//! [`TokenField::is_current_query`]: crate::field::TokenField::is_current_query

use std::ops::Range;

/// Provider of completion candidates for a query substring.
///
/// `query` starts (or restarts) matching against the given pattern; `clear`
/// drops any cached results because the field no longer has enough text to
/// filter on. A query error and an empty result are indistinguishable to
/// the engine: in both cases the view simply shows nothing.
pub trait SuggestionSource {
    fn query(&mut self, pattern: &str);
    fn clear(&mut self);
}

/// A filter query issued to the suggestion source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterQuery {
    /// Sequence number; results tagged with an older number are stale
    pub seq: u64,
    /// Char range of the active token in the buffer, `[start, cursor)`
    pub span: Range<usize>,
    /// The substring submitted to the source
    pub pattern: String,
}

/// What a filtering pass decided: exactly one of these per text-change or
/// selection-change event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOutcome {
    /// Enough text under the cursor; a query went out
    Query(FilterQuery),
    /// Not enough text; the suggestion view must close and the source was
    /// told to clear cached results
    Dismiss { seq: u64 },
}

impl FilterOutcome {
    /// Sequence number stamped on this outcome
    pub fn seq(&self) -> u64 {
        match self {
            FilterOutcome::Query(q) => q.seq,
            FilterOutcome::Dismiss { seq } => *seq,
        }
    }
}
