//! One-shot flash messages kept in the session.

use tower_sessions::Session;

use catalog_core::Flash;

use crate::models::session::keys;

/// Store a flash message for the next page render.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_flash(session: &Session, flash: &Flash) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::FLASH, flash).await
}

/// Take the pending flash message, if any, removing it from the session.
///
/// # Errors
///
/// Returns an error if the session cannot be read or modified.
pub async fn take_flash(session: &Session) -> Result<Option<Flash>, tower_sessions::session::Error> {
    session.remove::<Flash>(keys::FLASH).await
}
