//! Error types for the JSON:API server request layer.
//!
//! Two error enums live here:
//!
//! - [`ConfigError`] for validating [`ServerConfig`](crate::ServerConfig) values
//! - [`JsonApiError`] for everything raised while interpreting a request or
//!   dispatching it to a resource provider
//!
//! # Error Handling
//!
//! Errors are raised where they are detected and propagated with `?` up to the
//! HTTP boundary, which translates them into client-facing responses. Nothing
//! in this crate retries or recovers from them.
//!
//! # Example
//!
//! ```rust
//! use jsonapi_server::{JsonApiError, Operation};
//!
//! let error = JsonApiError::not_allowed(Operation::Delete, "articles");
//! assert!(error.is_not_allowed());
//! assert_eq!(
//!     error.to_string(),
//!     "You are not allowed to delete resources of type articles"
//! );
//! ```

use std::fmt;

use thiserror::Error;

/// Errors that can occur while building the server configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The API prefix is empty or consists only of slashes.
    #[error("API prefix cannot be empty. Use e.g. '/api' or omit the prefix entirely.")]
    EmptyApiPrefix,

    /// The API prefix contains characters that cannot appear in a path.
    #[error("Invalid API prefix '{prefix}'. A prefix must not contain '?', '#' or whitespace.")]
    InvalidApiPrefix {
        /// The invalid prefix that was provided.
        prefix: String,
    },

    /// The base URL is invalid.
    #[error("Invalid base URL '{url}'. Please provide a URL with scheme and host (e.g., 'https://api.example.com').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },
}

/// Mutating operations of the resource provider contract.
///
/// Carried by [`JsonApiError::NotAllowed`] so the HTTP boundary can report
/// which capability a provider refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Create a new resource.
    Create,
    /// Patch an existing resource.
    Patch,
    /// Delete a resource.
    Delete,
    /// Replace, add to or remove from a relationship.
    ModifyRelationship,
}

impl Operation {
    /// Returns the operation name as used in error messages.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Patch => "patch",
            Self::Delete => "delete",
            Self::ModifyRelationship => "modify",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type for request interpretation and provider dispatch.
#[derive(Debug, Error)]
pub enum JsonApiError {
    /// Malformed or self-contradictory client input.
    ///
    /// Raised for a missing document body, a body whose type or id disagrees
    /// with the URI, or a URI path that cannot be interpreted.
    #[error("Bad request: {message}")]
    BadRequest {
        /// Human-readable description of the problem.
        message: String,
    },

    /// The resource provider does not support the requested operation.
    #[error("{}", not_allowed_message(.operation, .resource_type, .relationship))]
    NotAllowed {
        /// The refused operation.
        operation: Operation,
        /// The resource type the operation targeted.
        resource_type: String,
        /// The relationship name, for relationship modification.
        relationship: Option<String>,
    },

    /// A caller passed an argument that contradicts the request.
    ///
    /// Unlike [`JsonApiError::BadRequest`] this is a server-side programming
    /// error, not a client error.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Human-readable description of the problem.
        message: String,
    },

    /// No resource provider is registered for the type.
    #[error("Resources of type '{resource_type}' are not supported")]
    UnsupportedType {
        /// The requested resource type.
        resource_type: String,
    },

    /// A provider could not find the requested resource.
    #[error("Resource {resource_type} with id {id} not found")]
    NotFound {
        /// The resource type.
        resource_type: String,
        /// The id that was requested.
        id: String,
    },
}

fn not_allowed_message(
    operation: &Operation,
    resource_type: &str,
    relationship: &Option<String>,
) -> String {
    match relationship {
        Some(relationship) => {
            format!("You are not allowed to modify the relationship {relationship}")
        }
        None => format!("You are not allowed to {operation} resources of type {resource_type}"),
    }
}

impl JsonApiError {
    /// Creates a [`JsonApiError::BadRequest`].
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// Creates a [`JsonApiError::InvalidArgument`].
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Creates a [`JsonApiError::NotAllowed`] for a resource-level operation.
    #[must_use]
    pub fn not_allowed(operation: Operation, resource_type: impl Into<String>) -> Self {
        Self::NotAllowed {
            operation,
            resource_type: resource_type.into(),
            relationship: None,
        }
    }

    /// Creates a [`JsonApiError::NotAllowed`] for a relationship modification.
    #[must_use]
    pub fn relationship_not_allowed(
        resource_type: impl Into<String>,
        relationship: impl Into<String>,
    ) -> Self {
        Self::NotAllowed {
            operation: Operation::ModifyRelationship,
            resource_type: resource_type.into(),
            relationship: Some(relationship.into()),
        }
    }

    /// Returns `true` for [`JsonApiError::BadRequest`].
    #[must_use]
    pub const fn is_bad_request(&self) -> bool {
        matches!(self, Self::BadRequest { .. })
    }

    /// Returns `true` for [`JsonApiError::NotAllowed`].
    #[must_use]
    pub const fn is_not_allowed(&self) -> bool {
        matches!(self, Self::NotAllowed { .. })
    }

    /// Returns `true` for [`JsonApiError::InvalidArgument`].
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }
}

impl From<serde_json::Error> for JsonApiError {
    fn from(error: serde_json::Error) -> Self {
        Self::bad_request(format!("Invalid JSON document: {error}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_allowed_message_names_type() {
        let error = JsonApiError::not_allowed(Operation::Create, "tests");
        assert_eq!(
            error.to_string(),
            "You are not allowed to create resources of type tests"
        );
    }

    #[test]
    fn test_relationship_not_allowed_message_names_relationship() {
        let error = JsonApiError::relationship_not_allowed("articles", "comments");
        assert_eq!(
            error.to_string(),
            "You are not allowed to modify the relationship comments"
        );
        assert!(error.is_not_allowed());
    }

    #[test]
    fn test_serde_error_becomes_bad_request() {
        let parse_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error: JsonApiError = parse_error.into();
        assert!(error.is_bad_request());
        assert!(error.to_string().contains("Invalid JSON document"));
    }

    #[test]
    fn test_config_error_messages() {
        let error = ConfigError::InvalidBaseUrl {
            url: "nope".to_string(),
        };
        assert!(error.to_string().contains("nope"));
        assert!(ConfigError::EmptyApiPrefix
            .to_string()
            .contains("cannot be empty"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = JsonApiError::bad_request("missing body");
        let _: &dyn std::error::Error = &error;
    }
}
