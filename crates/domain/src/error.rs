//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`SigboxError`]
//! at the port boundary.

/// Base error returned by every port and service.
#[derive(Debug, thiserror::Error)]
pub enum SigboxError {
    /// The persistence layer failed (unreachable, locked, I/O, …).
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl SigboxError {
    /// Wrap any error coming out of a storage adapter.
    pub fn storage<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Storage(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn should_keep_source_when_wrapping_storage_error() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only file");
        let err = SigboxError::storage(io);

        assert_eq!(err.to_string(), "storage error");
        let source = err.source().unwrap();
        assert_eq!(source.to_string(), "read-only file");
    }
}
