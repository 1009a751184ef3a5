//! `TokenField` - the multi-token autocomplete editing engine.
//!
//! Owns the field buffer and the configured capabilities (tokenizer,
//! validator, suggestion source) and turns host events into the four core
//! operations: the filtering gate, filtering dispatch, the validation pass,
//! and suggestion replacement.
//!
//! Without a tokenizer every operation degrades to whole-buffer behavior,
//! which is the ordinary single-value autocomplete mode for non-list fields
//! sharing the component.
//!
//! All operations are synchronous and run on the host's event thread; the
//! engine holds no locks and spawns no work.

use std::fmt;
use std::ops::Range;

use crate::buffer::{StringBuffer, TextBuffer, TextBufferMut};
use crate::messages::{FieldMsg, FieldReaction};
use crate::spans::{StyledBuffer, StyledText};
use crate::suggest::{FilterOutcome, FilterQuery, SuggestionSource};
use crate::tokenizer::Tokenizer;
use crate::validator::Validator;

/// Minimum token length before a suggestion query goes out
pub const DEFAULT_THRESHOLD: usize = 1;

/// Marker for a suggestion substitution: the range the replacement occupies
/// in the buffer after the edit, and the text it displaced.
///
/// This is a policy hook, not an undo record: a host may restore `original`
/// over `span` when the very next user action is a single backspace, so the
/// whole substitution is undone instead of one character. The engine itself
/// never consults it again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacedToken {
    pub span: Range<usize>,
    pub original: String,
}

/// The multi-token autocomplete editing engine, generic over the buffer
/// backend (`StringBuffer` by default, `RopeBuffer` or `StyledBuffer` for
/// hosts that need them).
pub struct TokenField<B: TextBufferMut = StringBuffer> {
    buffer: B,
    /// Cursor offset reported by the host; `None` = no selection
    selection_end: Option<usize>,
    tokenizer: Option<Box<dyn Tokenizer>>,
    validator: Option<Box<dyn Validator>>,
    suggestions: Option<Box<dyn SuggestionSource>>,
    threshold: usize,
    filter_seq: u64,
}

impl TokenField<StringBuffer> {
    pub fn new() -> Self {
        Self::with_buffer(StringBuffer::new())
    }

    pub fn from_text(text: &str) -> Self {
        Self::with_buffer(StringBuffer::from_text(text))
    }
}

impl Default for TokenField<StringBuffer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: TextBufferMut> TokenField<B> {
    /// Wrap an existing buffer. No tokenizer, validator, or suggestion
    /// source is configured; the field starts in whole-buffer mode.
    pub fn with_buffer(buffer: B) -> Self {
        Self {
            buffer,
            selection_end: None,
            tokenizer: None,
            validator: None,
            suggestions: None,
            threshold: DEFAULT_THRESHOLD,
            filter_seq: 0,
        }
    }

    pub fn buffer(&self) -> &B {
        &self.buffer
    }

    /// Direct buffer access for host-side editing. The host must follow up
    /// with a `TextChanged` event (or call `perform_filtering`) itself.
    pub fn buffer_mut(&mut self) -> &mut B {
        &mut self.buffer
    }

    pub fn text(&self) -> String {
        self.buffer.content()
    }

    pub fn len_chars(&self) -> usize {
        self.buffer.len_chars()
    }

    /// Sets the tokenizer used to find the token range the user is editing.
    /// `None` switches the field back to whole-buffer behavior.
    pub fn set_tokenizer(&mut self, tokenizer: Option<Box<dyn Tokenizer>>) {
        self.tokenizer = tokenizer;
    }

    pub fn set_validator(&mut self, validator: Option<Box<dyn Validator>>) {
        self.validator = validator;
    }

    pub fn set_suggestion_source(&mut self, source: Option<Box<dyn SuggestionSource>>) {
        self.suggestions = source;
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Set the minimum active-token length for filtering. Values below 1
    /// are clamped to 1.
    pub fn set_threshold(&mut self, threshold: usize) {
        self.threshold = threshold.max(1);
    }

    pub fn selection_end(&self) -> Option<usize> {
        self.selection_end
    }

    /// Report the host's cursor position. `Some` offsets are clamped to the
    /// buffer length; `None` means no selection and closes the filtering
    /// gate.
    pub fn set_selection(&mut self, selection_end: Option<usize>) {
        self.selection_end = selection_end.map(|n| n.min(self.buffer.len_chars()));
    }

    /// Insert text at the cursor and move the cursor past it
    pub fn insert_at_cursor(&mut self, text: &str) {
        let len = self.buffer.len_chars();
        let at = self.selection_end.unwrap_or(len).min(len);
        self.buffer.insert(at, text);
        self.selection_end = Some(at + text.chars().count());
    }

    /// Delete the character before the cursor, if any
    pub fn delete_backward(&mut self) {
        let len = self.buffer.len_chars();
        let at = self.selection_end.unwrap_or(len).min(len);
        if at > 0 {
            self.buffer.remove(at - 1..at);
            self.selection_end = Some(at - 1);
        }
    }

    /// Sequence number of the most recent filtering pass
    pub fn latest_query_seq(&self) -> u64 {
        self.filter_seq
    }

    /// Whether results stamped with `seq` are still current. Stale results
    /// (superseded by a later filtering pass) must be discarded.
    pub fn is_current_query(&self, seq: u64) -> bool {
        seq == self.filter_seq
    }

    /// Whether the text around the cursor is long enough to filter on.
    ///
    /// With a tokenizer: the distance from the active token's start to the
    /// cursor must meet the threshold; no selection fails closed. Without
    /// one: the whole text length is measured instead.
    pub fn enough_to_filter(&self) -> bool {
        match self.tokenizer.as_deref() {
            None => self.buffer.len_chars() >= self.threshold,
            Some(tokenizer) => {
                let Some(end) = self.selection_end else {
                    return false;
                };
                let end = end.min(self.buffer.len_chars());
                let start = tokenizer.find_token_start(&self.buffer.content(), end);
                end - start >= self.threshold
            }
        }
    }

    /// Run the filtering gate and dispatch the result.
    ///
    /// Exactly one of the two outcomes happens per call: either the active
    /// token substring goes out as a query, or the suggestion source is
    /// cleared and the host must dismiss any open suggestion view. Each
    /// call supersedes all earlier queries.
    pub fn perform_filtering(&mut self) -> FilterOutcome {
        self.filter_seq += 1;
        let seq = self.filter_seq;

        if !self.enough_to_filter() {
            tracing::debug!(seq, "filtering: below threshold, dismissing");
            if let Some(source) = self.suggestions.as_deref_mut() {
                source.clear();
            }
            return FilterOutcome::Dismiss { seq };
        }

        let span = match self.tokenizer.as_deref() {
            None => 0..self.buffer.len_chars(),
            Some(tokenizer) => {
                let len = self.buffer.len_chars();
                let end = self.selection_end.unwrap_or(len).min(len);
                let start = tokenizer.find_token_start(&self.buffer.content(), end);
                start..end
            }
        };
        let pattern = self.buffer.slice(span.clone());
        tracing::debug!(seq, pattern = %pattern, "filtering: querying");
        if let Some(source) = self.suggestions.as_deref_mut() {
            source.query(&pattern);
        }
        FilterOutcome::Query(FilterQuery { seq, span, pattern })
    }

    /// Validate every token of the text individually, in one right-to-left
    /// pass over the delimiter-separated segments.
    ///
    /// Empty (or all-space) segments are removed together with their
    /// separator; invalid tokens are replaced with the terminated repair
    /// from the validator; a repair that trims to nothing collapses to a
    /// deletion so no stray separator is introduced. Working from the end
    /// of the buffer toward its start means an edit never shifts the
    /// offsets of segments not yet visited, and each segment is re-read at
    /// its current right boundary.
    ///
    /// Without a tokenizer the whole buffer is validated as one value.
    /// Without a validator this is a no-op.
    pub fn perform_validation(&mut self) {
        let Some(validator) = self.validator.as_deref() else {
            return;
        };
        match self.tokenizer.as_deref() {
            None => {
                let text = self.buffer.content();
                if !text.is_empty() && !validator.is_valid(&text) {
                    let fixed = validator.fix_text(&text);
                    tracing::debug!(fixed = %fixed, "validation: repairing whole field");
                    self.buffer.set_content(&fixed);
                }
            }
            Some(tokenizer) => {
                let mut right = self.buffer.len_chars();
                while right > 0 {
                    let text = self.buffer.content();
                    let chars: Vec<char> = text.chars().collect();
                    // a right edge sitting just past a separator hands that
                    // separator to this segment's replacement range
                    let content_end = if tokenizer.find_token_end(&text, right - 1) == right - 1 {
                        right - 1
                    } else {
                        right
                    };
                    let start = tokenizer.find_token_start(&text, content_end);
                    // raw left edge: undo the space skip so the segment is
                    // read (and replaced) from just past the separator
                    let mut seg = start;
                    while seg > 0 && chars[seg - 1] == ' ' {
                        seg -= 1;
                    }
                    let token: String = chars[seg..content_end].iter().collect();
                    if token.trim().is_empty() {
                        tracing::trace!(seg, right, "validation: deleting empty segment");
                        self.buffer.remove(seg..right);
                    } else if !validator.is_valid(&token) {
                        let fixed = validator.fix_text(&token);
                        if fixed.trim().is_empty() {
                            tracing::trace!(token = %token, "validation: fix is empty, deleting");
                            self.buffer.remove(seg..right);
                        } else {
                            let replacement = tokenizer.terminate_token(&fixed);
                            tracing::trace!(token = %token, replacement = %replacement, "validation: repairing");
                            self.buffer.replace(seg..right, &replacement);
                        }
                    }
                    right = seg;
                }
            }
        }
        self.selection_end = self.selection_end.map(|n| n.min(self.buffer.len_chars()));
    }

    /// Replace the token the cursor is in with the chosen suggestion,
    /// terminated; or, without a tokenizer, set the whole buffer to it.
    ///
    /// Text before the token start and after the cursor is untouched. The
    /// cursor lands right after the inserted text. The returned
    /// [`ReplacedToken`] marks the substitution for the host's
    /// backspace-undo policy.
    pub fn set_or_replace_text(&mut self, suggestion: &str) -> ReplacedToken {
        tracing::debug!(suggestion = %suggestion, "set_or_replace_text");
        match self.tokenizer.as_deref() {
            None => {
                let original = self.buffer.content();
                self.buffer.set_content(suggestion);
                let len = self.buffer.len_chars();
                self.selection_end = Some(len);
                ReplacedToken {
                    span: 0..len,
                    original,
                }
            }
            Some(tokenizer) => {
                let len = self.buffer.len_chars();
                let end = self.selection_end.unwrap_or(len).min(len);
                let start = tokenizer.find_token_start(&self.buffer.content(), end);
                let original = self.buffer.slice(start..end);
                let replacement = tokenizer.terminate_token(suggestion);
                let replaced_len = replacement.chars().count();
                self.buffer.replace(start..end, &replacement);
                self.selection_end = Some(start + replaced_len);
                ReplacedToken {
                    span: start..start + replaced_len,
                    original,
                }
            }
        }
    }

    /// Host event entry point (Elm-style): routes each event to the
    /// operation it drives.
    pub fn update(&mut self, msg: FieldMsg) -> FieldReaction {
        match msg {
            FieldMsg::TextChanged => FieldReaction::Filtered(self.perform_filtering()),
            FieldMsg::SelectionChanged(selection_end) => {
                self.set_selection(selection_end);
                FieldReaction::Filtered(self.perform_filtering())
            }
            FieldMsg::SuggestionChosen(suggestion) => {
                FieldReaction::Replaced(self.set_or_replace_text(&suggestion))
            }
            FieldMsg::FocusLost => {
                self.perform_validation();
                FieldReaction::Validated
            }
        }
    }
}

impl<A: Clone> TokenField<StyledBuffer<A>> {
    /// Styled variant of [`TokenField::set_or_replace_text`]: the
    /// suggestion's own spans are carried into the buffer, the appended
    /// separator stays unspanned, and spans outside the replaced token are
    /// preserved.
    pub fn set_or_replace_styled(&mut self, suggestion: &StyledText<A>) -> ReplacedToken {
        match self.tokenizer.as_deref() {
            None => {
                let original = self.buffer.content();
                self.buffer = StyledBuffer::from_styled(suggestion.clone());
                let len = self.buffer.len_chars();
                self.selection_end = Some(len);
                ReplacedToken {
                    span: 0..len,
                    original,
                }
            }
            Some(tokenizer) => {
                let len = self.buffer.len_chars();
                let end = self.selection_end.unwrap_or(len).min(len);
                let start = tokenizer.find_token_start(&self.buffer.content(), end);
                let original = self.buffer.slice(start..end);
                let terminated = suggestion.terminated_with(tokenizer);
                let replaced_len = terminated.text().chars().count();
                self.buffer.replace_styled(start..end, &terminated);
                self.selection_end = Some(start + replaced_len);
                ReplacedToken {
                    span: start..start + replaced_len,
                    original,
                }
            }
        }
    }
}

impl<B: TextBufferMut + fmt::Debug> fmt::Debug for TokenField<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenField")
            .field("buffer", &self.buffer)
            .field("selection_end", &self.selection_end)
            .field("threshold", &self.threshold)
            .field("filter_seq", &self.filter_seq)
            .field("tokenizer", &self.tokenizer.is_some())
            .field("validator", &self.validator.is_some())
            .field("suggestions", &self.suggestions.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::SingleCharTokenizer;

    fn list_field(text: &str, cursor: usize) -> TokenField {
        let mut field = TokenField::from_text(text);
        field.set_tokenizer(Some(Box::new(SingleCharTokenizer::default())));
        field.set_selection(Some(cursor));
        field
    }

    #[test]
    fn test_enough_to_filter_fails_closed_without_selection() {
        let mut field = TokenField::from_text("highway;residential");
        field.set_tokenizer(Some(Box::new(SingleCharTokenizer::default())));
        assert!(!field.enough_to_filter());
    }

    #[test]
    fn test_enough_to_filter_below_threshold() {
        let mut field = list_field("highway;re", 10);
        field.set_threshold(3);
        // active token "re" has 2 chars before the cursor, below 3
        assert!(!field.enough_to_filter());
    }

    #[test]
    fn test_enough_to_filter_at_threshold() {
        let mut field = list_field("highway;res", 11);
        field.set_threshold(3);
        assert!(field.enough_to_filter());
    }

    #[test]
    fn test_threshold_clamped_to_one() {
        let mut field = TokenField::new();
        field.set_threshold(0);
        assert_eq!(field.threshold(), 1);
    }

    #[test]
    fn test_whole_text_mode_measures_buffer() {
        let mut field = TokenField::from_text("re");
        field.set_threshold(3);
        assert!(!field.enough_to_filter());
        field.insert_at_cursor("s");
        assert!(field.enough_to_filter());
    }

    #[test]
    fn test_insert_and_delete_at_cursor() {
        let mut field = TokenField::from_text("ab");
        field.set_selection(Some(1));
        field.insert_at_cursor("XY");
        assert_eq!(field.text(), "aXYb");
        assert_eq!(field.selection_end(), Some(3));
        field.delete_backward();
        assert_eq!(field.text(), "aXb");
        assert_eq!(field.selection_end(), Some(2));
    }

    #[test]
    fn test_selection_clamped() {
        let mut field = TokenField::from_text("abc");
        field.set_selection(Some(99));
        assert_eq!(field.selection_end(), Some(3));
    }

    #[test]
    fn test_query_sequence_supersedes() {
        let mut field = list_field("highway;res", 11);
        let first = field.perform_filtering();
        let second = field.perform_filtering();
        assert!(second.seq() > first.seq());
        assert!(!field.is_current_query(first.seq()));
        assert!(field.is_current_query(second.seq()));
    }
}
