//! Host event types for the token field engine.
//!
//! The host UI layer translates its own text-field callbacks into
//! [`FieldMsg`] values and feeds them to [`TokenField::update`], which
//! answers with a [`FieldReaction`] describing what the view layer has to
//! do (dismiss or repopulate the suggestion view, remember a substitution
//! marker).
//!
//! [`TokenField::update`]: crate::field::TokenField::update

use crate::field::ReplacedToken;
use crate::suggest::FilterOutcome;

/// An event delivered by the host text field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldMsg {
    /// The buffer content changed (typing, paste, programmatic edit)
    TextChanged,
    /// The cursor moved; `None` means the selection was lost
    SelectionChanged(Option<usize>),
    /// The user picked this suggestion from the dropdown
    SuggestionChosen(String),
    /// The field lost focus (or the host committed the value)
    FocusLost,
}

/// What the engine did in response to a [`FieldMsg`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldReaction {
    /// A filtering pass ran; the outcome says query-or-dismiss
    Filtered(FilterOutcome),
    /// A suggestion was inserted; the marker supports backspace-undo
    Replaced(ReplacedToken),
    /// The validation pass ran over the committed value
    Validated,
}
