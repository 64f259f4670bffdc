//! Error sentinels that callers can match on.

use thiserror::Error;

/// Errors that are part of the public contract: callers distinguish these
/// kinds to decide between retrying, failing the request, or giving up.
///
/// Everything else in the crate travels as `anyhow::Error` context chains;
/// these sentinels stay downcastable at the API boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TopographerError {
    /// The topographer was shut down; no further resolves are accepted.
    #[error("topographer instance was shut down")]
    Shutdown,

    /// The caller's cancellation token fired while the operation was running.
    #[error("operation was cancelled")]
    Cancelled,

    /// The circuit breaker is open; the request was rejected without an
    /// outbound call.
    #[error("circuit breaker is open")]
    CircuitBreakerOpen,

    /// A provider name passed to resolve does not match any configured
    /// provider.
    #[error("provider {0} is unknown")]
    UnknownProvider(String),

    /// An offline provider has not completed a successful database open yet.
    #[error("database is not ready yet")]
    DatabaseNotReady,

    /// A provider that requires an authentication token was configured
    /// without one.
    #[error("authentication token is required")]
    AuthTokenRequired,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinels_survive_anyhow_wrapping() {
        let err = anyhow::Error::from(TopographerError::Shutdown).context("resolve failed");
        assert_eq!(
            err.downcast_ref::<TopographerError>(),
            Some(&TopographerError::Shutdown)
        );
    }

    #[test]
    fn test_unknown_provider_carries_name() {
        let err = TopographerError::UnknownProvider("ip2c".to_string());
        assert_eq!(err.to_string(), "provider ip2c is unknown");
    }
}
