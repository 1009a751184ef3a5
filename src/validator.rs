//! Token validation capability.
//!
//! Validation is an external concern: the host knows which values are
//! acceptable for the field (a preset list, a value grammar, ...). The
//! engine only drives the walk over tokens and applies whatever repair the
//! validator proposes; it never re-validates the repaired text.

/// Decides whether a token is acceptable and proposes a replacement when it
/// is not.
pub trait Validator {
    /// Is this token acceptable as-is?
    fn is_valid(&self, token: &str) -> bool;

    /// A corrected form of an invalid token. May return an empty string to
    /// mean "drop this token".
    fn fix_text(&self, token: &str) -> String;
}
