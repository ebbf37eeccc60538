//! One-shot status messages stored in the session.
//!
//! Each slot holds at most one string. A pushed value survives exactly one
//! pop: reading a slot removes it, so a message set before a redirect shows
//! up on the next rendered page and nowhere else.
//!
//! # Example
//!
//! ```rust,ignore
//! // In a form handler, before redirecting:
//! Flash::push(&session, FlashKind::Flash, "Reservation saved!").await?;
//!
//! // The renderer pops all three slots per render:
//! let pending = Flash::pop(&session, FlashKind::Flash).await?;
//! ```

use tower_sessions::Session;

use crate::error::{Error, Result};

/// The three one-shot message slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    /// Neutral/success notice (e.g., "Reservation saved")
    Flash,
    /// Error notice (e.g., "Invalid dates")
    Error,
    /// Warning notice (e.g., "Only one room left")
    Warning,
}

impl FlashKind {
    fn session_key(self) -> &'static str {
        match self {
            Self::Flash => "_flash",
            Self::Error => "_error",
            Self::Warning => "_warning",
        }
    }
}

/// Namespace for pushing and popping one-shot session messages.
pub struct Flash;

impl Flash {
    /// Store `message` in the slot, replacing any pending value.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be accessed.
    pub async fn push(
        session: &Session,
        kind: FlashKind,
        message: impl Into<String>,
    ) -> Result<()> {
        session
            .insert(kind.session_key(), &message.into())
            .await
            .map_err(|e| {
                Error::Session(format!(
                    "failed to write {} message: {e}",
                    kind.session_key()
                ))
            })
    }

    /// Read and clear the slot. Each pushed value is observed at most once.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be accessed.
    pub async fn pop(session: &Session, kind: FlashKind) -> Result<Option<String>> {
        session
            .remove::<String>(kind.session_key())
            .await
            .map_err(|e| {
                Error::Session(format!(
                    "failed to read {} message: {e}",
                    kind.session_key()
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tower_sessions::Session;
    use tower_sessions_memory_store::MemoryStore;

    fn test_session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn test_pop_empty_slot_is_none() {
        let session = test_session();
        assert_eq!(Flash::pop(&session, FlashKind::Flash).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_pushed_value_pops_exactly_once() {
        let session = test_session();
        Flash::push(&session, FlashKind::Error, "bad dates")
            .await
            .unwrap();

        assert_eq!(
            Flash::pop(&session, FlashKind::Error).await.unwrap(),
            Some("bad dates".to_string())
        );
        assert_eq!(Flash::pop(&session, FlashKind::Error).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_slots_are_independent() {
        let session = test_session();
        Flash::push(&session, FlashKind::Flash, "saved").await.unwrap();
        Flash::push(&session, FlashKind::Warning, "one left")
            .await
            .unwrap();

        assert_eq!(Flash::pop(&session, FlashKind::Error).await.unwrap(), None);
        assert_eq!(
            Flash::pop(&session, FlashKind::Flash).await.unwrap(),
            Some("saved".to_string())
        );
        assert_eq!(
            Flash::pop(&session, FlashKind::Warning).await.unwrap(),
            Some("one left".to_string())
        );
    }

    #[tokio::test]
    async fn test_second_push_replaces_pending_value() {
        let session = test_session();
        Flash::push(&session, FlashKind::Flash, "first").await.unwrap();
        Flash::push(&session, FlashKind::Flash, "second").await.unwrap();

        assert_eq!(
            Flash::pop(&session, FlashKind::Flash).await.unwrap(),
            Some("second".to_string())
        );
    }
}
