//! Store failures.
//!
//! Backends and form validation return [`StoreError`]. Lower-level failures
//! (filesystem, JSON, transport) are wrapped with a message naming what was
//! being attempted through [`Context::with_ctx`].
use crate::store::UserId;

pub type DynError = Box<dyn std::error::Error + Send + Sync + 'static>;
pub type Result<T, E = StoreError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("user {0} not found")]
    NotFound(UserId),
    /// Rejected draft; the message is shown inline in the add form.
    #[error("{0}")]
    Invalid(String),
    /// The server answered with a non-2xx status.
    #[error("{op}: HTTP {status}")]
    Http { op: &'static str, status: u16 },
    #[error("{context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
    /// Connection, timeout or client setup failure.
    #[error("{context}: {source}")]
    Transport {
        context: String,
        #[source]
        source: DynError,
    },
}

impl StoreError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }
}

/// A lower-level error that becomes a [`StoreError`] once given context.
pub trait Cause {
    fn in_context(self, context: String) -> StoreError;
}

impl Cause for std::io::Error {
    fn in_context(self, context: String) -> StoreError {
        StoreError::Io { context, source: self }
    }
}

impl Cause for serde_json::Error {
    fn in_context(self, context: String) -> StoreError {
        StoreError::Decode { context, source: self }
    }
}

#[cfg(feature = "http")]
impl Cause for reqwest::Error {
    fn in_context(self, context: String) -> StoreError {
        StoreError::Transport { context, source: Box::new(self) }
    }
}

/// Attach a human-readable context message to a failing backend call.
pub trait Context<T> {
    fn with_ctx<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Cause> Context<T> for std::result::Result<T, E> {
    fn with_ctx<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| e.in_context(f()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn context_prefixes_the_source_message() {
        let res: std::result::Result<(), std::io::Error> =
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "boom"));
        let err = res.with_ctx(|| "reading seed file team.json".to_string()).unwrap_err();
        assert!(matches!(&err, StoreError::Io { context, .. } if context == "reading seed file team.json"));
        assert_eq!(err.to_string(), "reading seed file team.json: boom");
        assert!(err.source().is_some());
    }

    #[test]
    fn bad_json_is_a_decode_error() {
        let err = serde_json::from_str::<Vec<u32>>("[1,").with_ctx(|| "decoding /users".to_string()).unwrap_err();
        assert!(matches!(err, StoreError::Decode { .. }));
    }

    #[test]
    fn status_and_missing_id_render_plainly() {
        assert_eq!(StoreError::Http { op: "fetch users", status: 503 }.to_string(), "fetch users: HTTP 503");
        assert_eq!(StoreError::NotFound(42).to_string(), "user 42 not found");
    }
}
