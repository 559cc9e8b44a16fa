//! Session keys.
//!
//! Values stored in the tower-sessions session for each visitor.

/// Session keys for per-visitor state.
pub mod keys {
    /// Key for the CSRF token handed to the page and required on mutations.
    pub const CSRF_TOKEN: &str = "csrf_token";

    /// Key for the one-shot flash message.
    pub const FLASH: &str = "flash";
}
