//! HTTP session management.
//!
//! Cookie-based sessions backed by an in-memory store, carrying the two
//! kinds of per-request state the renderer consumes:
//!
//! - **One-shot messages**: flash/error/warning strings surfaced on the next
//!   rendered page, then cleared (post-redirect-get pattern).
//! - **CSRF token**: a per-session anti-forgery token embedded in rendered
//!   forms.

mod csrf;
mod flash;

pub use csrf::CsrfToken;
pub use flash::{Flash, FlashKind};

// Re-export tower-sessions types for convenience
pub use tower_sessions::{Expiry, Session, SessionManagerLayer};
pub use tower_sessions_memory_store::MemoryStore;

use time::Duration;

use crate::config::SessionConfig;

/// Create a `SessionManagerLayer` from configuration.
///
/// The layer inserts a [`Session`] into every request's extensions; apply it
/// to the router before any handler that touches session state.
pub fn create_memory_session_layer(config: &SessionConfig) -> SessionManagerLayer<MemoryStore> {
    use tower_sessions::cookie::SameSite;

    let store = MemoryStore::default();

    let expiry = if config.expiry_secs == 0 {
        Expiry::OnSessionEnd
    } else {
        Expiry::OnInactivity(Duration::seconds(config.expiry_secs as i64))
    };

    let same_site = match config.same_site.to_lowercase().as_str() {
        "strict" => SameSite::Strict,
        "none" => SameSite::None,
        _ => SameSite::Lax,
    };

    SessionManagerLayer::new(store)
        .with_name(config.cookie_name.clone())
        .with_expiry(expiry)
        .with_secure(config.secure)
        .with_http_only(config.http_only)
        .with_same_site(same_site)
}
