//! Routing error types.

use thiserror::Error;

/// Errors raised by the routing engine.
///
/// Neither kind is recoverable locally: `InvalidArgument` means a call site
/// passed something it must not, `Configuration` means the deployment's
/// site roster cannot answer the question at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("configuration error: {0}")]
    Configuration(String),
}

impl RoutingError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Check if this error signals a deployment misconfiguration.
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routing_error_display() {
        let err = RoutingError::invalid_argument("url is required");
        assert_eq!(err.to_string(), "invalid argument: url is required");
        assert!(!err.is_configuration());

        let err = RoutingError::configuration("no sites configured");
        assert_eq!(err.to_string(), "configuration error: no sites configured");
        assert!(err.is_configuration());
    }
}
