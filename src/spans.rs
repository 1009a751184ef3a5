//! Formatting spans: metadata ranges that ride along with field text.
//!
//! Hosts that render styled field content (e.g. highlighted or linkified
//! tokens) attach [`Span`]s to sub-ranges of the buffer. Range edits keep
//! spans that lie entirely outside the edited range and drop spans that
//! overlap it; replaced content never inherits formatting.
//!
//! The attribute type `A` is host-defined and opaque to this crate.

use serde::{Deserialize, Serialize};
use std::ops::Range;

use crate::buffer::{TextBuffer, TextBufferMut};
use crate::tokenizer::Tokenizer;

/// A formatting attribute attached to `[start, end)` of the text.
/// Offsets are char offsets, independent of token boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span<A> {
    pub start: usize,
    pub end: usize,
    pub attr: A,
}

impl<A> Span<A> {
    pub fn new(start: usize, end: usize, attr: A) -> Self {
        Self { start, end, attr }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

// =============================================================================
// StyledText - an owned text + spans value (token payloads)
// =============================================================================

/// Owned text with formatting spans, used for styled token payloads moving
/// in and out of the buffer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StyledText<A> {
    text: String,
    spans: Vec<Span<A>>,
}

impl<A: Clone> StyledText<A> {
    pub fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            spans: Vec::new(),
        }
    }

    pub fn with_spans(text: &str, spans: Vec<Span<A>>) -> Self {
        let len = text.chars().count();
        let spans = spans
            .into_iter()
            .map(|mut s| {
                s.start = s.start.min(len);
                s.end = s.end.min(len);
                s
            })
            .filter(|s| !s.is_empty())
            .collect();
        Self {
            text: text.to_string(),
            spans,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn spans(&self) -> &[Span<A>] {
        &self.spans
    }

    /// Terminate this token with the given tokenizer, keeping the spans of
    /// the unchanged prefix. An appended separator carries no span.
    pub fn terminated_with(&self, tokenizer: &dyn Tokenizer) -> StyledText<A> {
        let terminated = tokenizer.terminate_token(&self.text);
        StyledText {
            text: terminated.into_owned(),
            spans: self.spans.clone(),
        }
    }
}

// =============================================================================
// StyledBuffer - span-aware buffer backend
// =============================================================================

/// TextBuffer implementation that keeps formatting spans consistent across
/// range edits.
#[derive(Debug, Clone, Default)]
pub struct StyledBuffer<A> {
    text: String,
    spans: Vec<Span<A>>,
}

impl<A: Clone> StyledBuffer<A> {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            spans: Vec::new(),
        }
    }

    pub fn from_text(s: &str) -> Self {
        Self {
            text: s.to_string(),
            spans: Vec::new(),
        }
    }

    pub fn from_styled(styled: StyledText<A>) -> Self {
        Self {
            text: styled.text,
            spans: styled.spans,
        }
    }

    /// Current spans, ordered as attached
    pub fn spans(&self) -> &[Span<A>] {
        &self.spans
    }

    /// Attach a span, clamped to the current text
    pub fn push_span(&mut self, span: Span<A>) {
        let len = self.len_chars();
        let mut span = span;
        span.start = span.start.min(len);
        span.end = span.end.min(len);
        if !span.is_empty() {
            self.spans.push(span);
        }
    }

    /// Snapshot the buffer as a StyledText value
    pub fn styled(&self) -> StyledText<A> {
        StyledText {
            text: self.text.clone(),
            spans: self.spans.clone(),
        }
    }

    /// Replace `range` with a styled payload: spans outside the range are
    /// preserved (shifted past the edit), spans inside are discarded, and
    /// the payload's own spans come in at the replacement offset.
    pub fn replace_styled(&mut self, range: Range<usize>, styled: &StyledText<A>) {
        self.replace(range.clone(), &styled.text);
        for span in &styled.spans {
            self.push_span(Span::new(
                range.start + span.start,
                range.start + span.end,
                span.attr.clone(),
            ));
        }
    }

    fn char_to_byte(&self, char_offset: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_offset)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }
}

impl<A: Clone> TextBuffer for StyledBuffer<A> {
    fn len_chars(&self) -> usize {
        self.text.chars().count()
    }

    fn len_bytes(&self) -> usize {
        self.text.len()
    }

    fn char_at(&self, offset: usize) -> Option<char> {
        self.text.chars().nth(offset)
    }

    fn slice(&self, range: Range<usize>) -> String {
        let start = range.start.min(self.len_chars());
        let end = range.end.min(self.len_chars());
        if start >= end {
            return String::new();
        }
        self.text.chars().skip(start).take(end - start).collect()
    }

    fn content(&self) -> String {
        self.text.clone()
    }
}

impl<A: Clone> TextBufferMut for StyledBuffer<A> {
    fn insert(&mut self, offset: usize, text: &str) {
        let offset = offset.min(self.len_chars());
        let inserted = text.chars().count();
        if inserted == 0 {
            return;
        }
        let byte_offset = self.char_to_byte(offset);
        self.text.insert_str(byte_offset, text);
        for span in &mut self.spans {
            if span.start >= offset {
                span.start += inserted;
                span.end += inserted;
            } else if span.end > offset {
                // insertion inside a span grows it
                span.end += inserted;
            }
        }
    }

    fn remove(&mut self, range: Range<usize>) {
        let start = range.start.min(self.len_chars());
        let end = range.end.min(self.len_chars());
        if start >= end {
            return;
        }
        let removed = end - start;
        let start_byte = self.char_to_byte(start);
        let end_byte = self.char_to_byte(end);
        self.text.replace_range(start_byte..end_byte, "");
        self.spans.retain(|s| s.end <= start || s.start >= end);
        for span in &mut self.spans {
            if span.start >= end {
                span.start -= removed;
                span.end -= removed;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::SingleCharTokenizer;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    enum Attr {
        Bold,
        Link,
    }

    #[test]
    fn test_styled_text_clamps_spans() {
        let styled = StyledText::with_spans("abc", vec![Span::new(1, 99, Attr::Bold)]);
        assert_eq!(styled.spans(), &[Span::new(1, 3, Attr::Bold)]);
    }

    #[test]
    fn test_terminated_with_keeps_prefix_spans() {
        let t = SingleCharTokenizer::default();
        let styled = StyledText::with_spans("residential", vec![Span::new(0, 11, Attr::Bold)]);
        let terminated = styled.terminated_with(&t);
        assert_eq!(terminated.text(), "residential;");
        // the appended separator is unspanned
        assert_eq!(terminated.spans(), &[Span::new(0, 11, Attr::Bold)]);
    }

    #[test]
    fn test_terminated_with_already_terminated() {
        let t = SingleCharTokenizer::default();
        let styled = StyledText::with_spans("residential;", vec![Span::new(0, 11, Attr::Bold)]);
        let terminated = styled.terminated_with(&t);
        assert_eq!(terminated, styled);
    }

    #[test]
    fn test_remove_drops_overlapping_spans() {
        let mut buf: StyledBuffer<Attr> = StyledBuffer::from_text("one;two;three");
        buf.push_span(Span::new(0, 3, Attr::Bold)); // "one"
        buf.push_span(Span::new(4, 7, Attr::Link)); // "two"
        buf.push_span(Span::new(8, 13, Attr::Bold)); // "three"
        buf.remove(4..7);
        assert_eq!(buf.content(), "one;;three");
        assert_eq!(
            buf.spans(),
            &[Span::new(0, 3, Attr::Bold), Span::new(5, 10, Attr::Bold)]
        );
    }

    #[test]
    fn test_insert_shifts_and_grows_spans() {
        let mut buf: StyledBuffer<Attr> = StyledBuffer::from_text("ab;cd");
        buf.push_span(Span::new(0, 2, Attr::Bold)); // "ab"
        buf.push_span(Span::new(3, 5, Attr::Link)); // "cd"
        buf.insert(1, "XY"); // inside "ab"
        assert_eq!(buf.content(), "aXYb;cd");
        assert_eq!(
            buf.spans(),
            &[Span::new(0, 4, Attr::Bold), Span::new(5, 7, Attr::Link)]
        );
    }

    #[test]
    fn test_replace_preserves_outside_spans() {
        let mut buf: StyledBuffer<Attr> = StyledBuffer::from_text("highway;resi");
        buf.push_span(Span::new(0, 7, Attr::Bold)); // "highway"
        buf.push_span(Span::new(8, 12, Attr::Link)); // "resi"
        buf.replace(8..12, "residential;");
        assert_eq!(buf.content(), "highway;residential;");
        // span before the replaced range survives; span inside is discarded
        assert_eq!(buf.spans(), &[Span::new(0, 7, Attr::Bold)]);
    }

    #[test]
    fn test_replace_styled_carries_payload_spans() {
        let mut buf: StyledBuffer<Attr> = StyledBuffer::from_text("a;xyz");
        buf.push_span(Span::new(0, 1, Attr::Bold));
        let payload = StyledText::with_spans("link;", vec![Span::new(0, 4, Attr::Link)]);
        buf.replace_styled(2..5, &payload);
        assert_eq!(buf.content(), "a;link;");
        assert_eq!(
            buf.spans(),
            &[Span::new(0, 1, Attr::Bold), Span::new(2, 6, Attr::Link)]
        );
    }
}
