//! CSRF protection for mutating requests.
//!
//! Each session holds one random token. The page hands it out (meta tag and
//! JSON payload); `POST`, `PUT`, `PATCH` and `DELETE` must echo it in
//! `X-CSRF-TOKEN` and identify themselves with `X-Requested-With:
//! XMLHttpRequest`. Anything else is rejected with 403.

use axum::{
    extract::Request,
    http::{HeaderMap, Method},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::RngCore;
use tower_sessions::Session;

use crate::error::AppError;
use crate::models::session::keys;

/// Header carrying the session's CSRF token.
pub const CSRF_HEADER: &str = "x-csrf-token";

/// Header marking a request as scripted rather than a plain form post.
pub const REQUESTED_WITH_HEADER: &str = "x-requested-with";

/// Expected value of [`REQUESTED_WITH_HEADER`].
pub const XML_HTTP_REQUEST: &str = "XMLHttpRequest";

/// Generate a new random token (256-bit, base64url without padding).
#[must_use]
pub fn generate_token() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Get the session's CSRF token, creating one on first use.
///
/// # Errors
///
/// Returns an error if the session cannot be read or written.
pub async fn session_token(session: &Session) -> Result<String, tower_sessions::session::Error> {
    if let Some(token) = session.get::<String>(keys::CSRF_TOKEN).await? {
        return Ok(token);
    }
    let token = generate_token();
    session.insert(keys::CSRF_TOKEN, &token).await?;
    Ok(token)
}

/// Reject mutating requests without the AJAX marker and a matching token.
pub async fn csrf_middleware(session: Session, request: Request, next: Next) -> Response {
    if is_safe_method(request.method()) {
        return next.run(request).await;
    }

    match verify(&session, request.headers()).await {
        Ok(()) => next.run(request).await,
        Err(err) => err.into_response(),
    }
}

const fn is_safe_method(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

async fn verify(session: &Session, headers: &HeaderMap) -> Result<(), AppError> {
    let requested_with = headers
        .get(REQUESTED_WITH_HEADER)
        .and_then(|v| v.to_str().ok());
    if requested_with != Some(XML_HTTP_REQUEST) {
        tracing::warn!("Rejected mutation without X-Requested-With");
        return Err(AppError::Forbidden("Missing X-Requested-With header".to_string()));
    }

    let presented = headers.get(CSRF_HEADER).and_then(|v| v.to_str().ok());
    let expected = session.get::<String>(keys::CSRF_TOKEN).await?;

    match (presented, expected) {
        (Some(presented), Some(expected))
            if constant_time_eq(presented.as_bytes(), expected.as_bytes()) =>
        {
            Ok(())
        }
        _ => {
            tracing::warn!("Rejected mutation with missing or mismatched CSRF token");
            Err(AppError::Forbidden("CSRF token mismatch".to_string()))
        }
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
