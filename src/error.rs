//! Error types for route registration, parameter coercion and handler failures.
//!
//! Registration errors ([`RouterError`]) are returned to the caller and are meant to
//! abort startup. Per-request failures ([`ConversionError`], [`HandlerError`]) never
//! escape [`Router::handle`](crate::router::Router::handle); they are rendered as
//! `400 Bad Request` responses.

use crate::router::ParamType;
use thiserror::Error;

/// Errors raised while registering a route.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
    /// The path pattern is malformed or uses an unknown parameter type.
    #[error("invalid route pattern '{pattern}': {reason}")]
    InvalidRoutePattern { pattern: String, reason: String },

    /// The handler's declared parameters do not line up with the pattern.
    #[error("handler signature does not match route {method} {pattern}: {reason}")]
    SignatureMismatch {
        method: String,
        pattern: String,
        reason: String,
    },
}

impl RouterError {
    pub(crate) fn invalid_pattern(pattern: &str, reason: impl Into<String>) -> Self {
        Self::InvalidRoutePattern {
            pattern: pattern.to_string(),
            reason: reason.into(),
        }
    }
}

/// A raw path segment could not be coerced to the parameter's declared type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to convert '{value}' to {ty}")]
pub struct ConversionError {
    /// The raw segment taken from the request path
    pub value: String,
    /// The type the segment was declared as
    pub ty: ParamType,
}

/// Errors a handler may return while processing a matched request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandlerError {
    /// The request is well-routed but its values are unacceptable.
    #[error("{0}")]
    Validation(String),
}

impl HandlerError {
    /// Shorthand for [`HandlerError::Validation`].
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_error_message() {
        let err = ConversionError {
            value: "abc".into(),
            ty: ParamType::Int,
        };
        assert_eq!(err.to_string(), "Failed to convert 'abc' to int");
    }

    #[test]
    fn test_invalid_pattern_message() {
        let err = RouterError::invalid_pattern("book", "Route must start with '/': book");
        assert_eq!(
            err.to_string(),
            "invalid route pattern 'book': Route must start with '/': book"
        );
    }

    #[test]
    fn test_handler_error_is_plain_message() {
        assert_eq!(HandlerError::invalid("id must be positive").to_string(), "id must be positive");
    }
}
