//! tokenfield - a delimited multi-token autocomplete engine
//!
//! This crate powers list-style autocomplete entry: several values typed
//! into one text field, separated by a configurable character (`;` by
//! default). It owns the stateful algorithms over the field buffer -
//! locating the token under the cursor, deciding when suggestion filtering
//! should trigger, validating and repairing each token independently, and
//! replacing the active token with a chosen suggestion - and leaves all
//! presentation (dropdown rendering, positioning, click handling) to the
//! host.
//!
//! # Architecture
//!
//! - [`TextBuffer`] / [`TextBufferMut`]: traits abstracting over buffer
//!   backends ([`StringBuffer`], [`RopeBuffer`], span-aware
//!   [`StyledBuffer`])
//! - [`Tokenizer`]: boundary-finding capability, with
//!   [`SingleCharTokenizer`] as the stock delimiter-based implementation
//! - [`Validator`] / [`SuggestionSource`]: external capabilities the
//!   engine consumes
//! - [`TokenField`]: the engine - filtering gate, validation pass, and
//!   suggestion replacement, driven by [`FieldMsg`] events
//!
//! # Example
//!
//! ```
//! use tokenfield::{SingleCharTokenizer, TokenField};
//!
//! let mut field = TokenField::from_text("highway;resi");
//! field.set_tokenizer(Some(Box::new(SingleCharTokenizer::default())));
//! field.set_selection(Some(12));
//!
//! let marker = field.set_or_replace_text("residential");
//! assert_eq!(field.text(), "highway;residential;");
//! assert_eq!(marker.original, "resi");
//! ```

pub mod buffer;
pub mod config;
pub mod field;
pub mod messages;
pub mod spans;
pub mod suggest;
pub mod tokenizer;
pub mod validator;

// Re-export commonly used types
pub use buffer::{RopeBuffer, StringBuffer, TextBuffer, TextBufferMut};
pub use config::FieldConfig;
pub use field::{ReplacedToken, TokenField, DEFAULT_THRESHOLD};
pub use messages::{FieldMsg, FieldReaction};
pub use spans::{Span, StyledBuffer, StyledText};
pub use suggest::{FilterOutcome, FilterQuery, SuggestionSource};
pub use tokenizer::{SingleCharTokenizer, Tokenizer, DEFAULT_SEPARATOR};
pub use validator::Validator;
