//! HTTP middleware stack.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request span with status and latency)
//! 3. Request ID (add unique ID to each request)
//! 4. Session layer (tower-sessions, `PostgreSQL` or memory store)
//! 5. Security headers
//! 6. CSRF guard (mutating requests only)

pub mod csrf;
pub mod flash;
pub mod request_id;
pub mod security_headers;
pub mod session;

pub use csrf::{csrf_middleware, session_token};
pub use flash::{set_flash, take_flash};
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::{create_memory_session_layer, create_session_layer};
