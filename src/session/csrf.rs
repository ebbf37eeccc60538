//! Anti-forgery token provisioning.
//!
//! A token is generated once per session and surfaced to templates as a
//! hidden form field. Reading the token does not consume it: every render
//! within the same session sees the same stable value.

use axum::{extract::FromRequestParts, http::request::Parts};
use rand::Rng;
use tower_sessions::Session;

use crate::error::Error;

const CSRF_SESSION_KEY: &str = "_csrf_token";
const DEFAULT_TOKEN_LENGTH: usize = 32;

/// CSRF token extractor and helper.
///
/// Use this extractor in page handlers to obtain the token for the current
/// request; it is generated and stored in the session on first use.
#[derive(Debug, Clone)]
pub struct CsrfToken(String);

impl CsrfToken {
    /// Create a token with the given value.
    #[must_use]
    pub fn new(token: String) -> Self {
        Self(token)
    }

    /// Get the raw token string.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.0
    }

    /// Generate HTML for a hidden form field.
    #[must_use]
    pub fn as_hidden_field(&self) -> String {
        format!(
            r#"<input type="hidden" name="_csrf" value="{}">"#,
            html_escape(&self.0)
        )
    }

    /// Generate a new random token.
    #[must_use]
    pub fn generate(length: usize) -> Self {
        let token: String = rand::rng()
            .sample_iter(&rand::distr::Alphanumeric)
            .take(length)
            .map(char::from)
            .collect();
        Self(token)
    }

    /// Get or create a token for the session.
    ///
    /// If a token exists in the session it is returned; otherwise a new one
    /// is generated and stored.
    pub async fn get_or_create(session: &Session, length: usize) -> Result<Self, Error> {
        if let Some(token) = session
            .get::<String>(CSRF_SESSION_KEY)
            .await
            .map_err(|e| Error::Session(format!("failed to read CSRF token: {e}")))?
        {
            return Ok(Self(token));
        }

        let token = Self::generate(length);
        session
            .insert(CSRF_SESSION_KEY, &token.0)
            .await
            .map_err(|e| Error::Session(format!("failed to store CSRF token: {e}")))?;

        Ok(token)
    }
}

impl std::fmt::Display for CsrfToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<S> FromRequestParts<S> for CsrfToken
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // The session is placed in request extensions by SessionManagerLayer
        let session = parts.extensions.get::<Session>().cloned().ok_or_else(|| {
            Error::Session("Session not found in request extensions for CSRF".to_string())
        })?;

        Self::get_or_create(&session, DEFAULT_TOKEN_LENGTH).await
    }
}

/// Basic HTML escaping for attribute values.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tower_sessions_memory_store::MemoryStore;

    #[test]
    fn test_token_generation() {
        let token = CsrfToken::generate(32);
        assert_eq!(token.token().len(), 32);

        let token2 = CsrfToken::generate(32);
        assert_ne!(token.token(), token2.token()); // Should be random
    }

    #[test]
    fn test_hidden_field_output() {
        let token = CsrfToken::new("abc123".to_string());
        let hidden = token.as_hidden_field();
        assert!(hidden.contains("name=\"_csrf\""));
        assert!(hidden.contains("value=\"abc123\""));
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("\"quoted\""), "&quot;quoted&quot;");
        assert_eq!(html_escape("a&b"), "a&amp;b");
    }

    #[tokio::test]
    async fn test_get_or_create_is_stable_per_session() {
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);

        let first = CsrfToken::get_or_create(&session, 32).await.unwrap();
        let second = CsrfToken::get_or_create(&session, 32).await.unwrap();
        assert_eq!(first.token(), second.token());
    }
}
