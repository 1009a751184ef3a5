//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use tokenfield::{SingleCharTokenizer, SuggestionSource, TokenField, Validator};

/// Create a `;`-separated list field with the given text and cursor
pub fn list_field(text: &str, cursor: usize) -> TokenField {
    let mut field = TokenField::from_text(text);
    field.set_tokenizer(Some(Box::new(SingleCharTokenizer::default())));
    field.set_selection(Some(cursor));
    field
}

/// Validator that accepts only non-empty, already-trimmed tokens and
/// repairs by trimming
pub struct TrimValidator;

impl Validator for TrimValidator {
    fn is_valid(&self, token: &str) -> bool {
        !token.trim().is_empty() && token == token.trim()
    }

    fn fix_text(&self, token: &str) -> String {
        token.trim().to_string()
    }
}

/// Validator that rejects one specific token and replaces it with a fixed
/// repair (possibly empty)
pub struct RejectToken {
    pub reject: String,
    pub fix: String,
}

impl Validator for RejectToken {
    fn is_valid(&self, token: &str) -> bool {
        token != self.reject
    }

    fn fix_text(&self, _token: &str) -> String {
        self.fix.clone()
    }
}

/// What a suggestion source was asked to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceEvent {
    Query(String),
    Clear,
}

/// Suggestion source that records every call for inspection
#[derive(Debug, Clone, Default)]
pub struct RecordingSource {
    events: Rc<RefCell<Vec<SourceEvent>>>,
}

impl RecordingSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// A second handle observing the same event log
    pub fn handle(&self) -> Self {
        self.clone()
    }

    pub fn events(&self) -> Vec<SourceEvent> {
        self.events.borrow().clone()
    }

    pub fn take_events(&self) -> Vec<SourceEvent> {
        self.events.borrow_mut().drain(..).collect()
    }
}

impl SuggestionSource for RecordingSource {
    fn query(&mut self, pattern: &str) {
        self.events
            .borrow_mut()
            .push(SourceEvent::Query(pattern.to_string()));
    }

    fn clear(&mut self) {
        self.events.borrow_mut().push(SourceEvent::Clear);
    }
}
