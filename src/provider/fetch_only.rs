//! Refusal of mutating operations.
//!
//! The `deny_*` functions produce the [`JsonApiError::NotAllowed`] failures
//! used by the default methods of [`ResourceProvider`]. [`FetchOnly`] applies
//! them to an existing provider by composition.

use crate::document::{Relationship, Resource};
use crate::error::{JsonApiError, Operation};
use crate::provider::ResourceProvider;
use crate::request::{AdvancedRequest, FetchRequest, SaveRelationshipRequest, SaveRequest};

/// Refuses to create a resource of the request's type.
///
/// # Errors
///
/// Always returns [`JsonApiError::NotAllowed`].
pub fn deny_create(request: &SaveRequest) -> Result<Resource, JsonApiError> {
    Err(JsonApiError::not_allowed(Operation::Create, request.resource_type()))
}

/// Refuses to patch a resource of the request's type.
///
/// # Errors
///
/// Always returns [`JsonApiError::NotAllowed`].
pub fn deny_patch(request: &SaveRequest) -> Result<Resource, JsonApiError> {
    Err(JsonApiError::not_allowed(Operation::Patch, request.resource_type()))
}

/// Refuses to delete a resource of the request's type.
///
/// # Errors
///
/// Always returns [`JsonApiError::NotAllowed`].
pub fn deny_delete(request: &AdvancedRequest) -> Result<(), JsonApiError> {
    Err(JsonApiError::not_allowed(Operation::Delete, request.resource_type()))
}

/// Refuses to modify the request's relationship.
///
/// # Errors
///
/// Always returns [`JsonApiError::NotAllowed`].
pub fn deny_modify_relationship(
    request: &SaveRelationshipRequest,
) -> Result<Relationship, JsonApiError> {
    Err(JsonApiError::relationship_not_allowed(
        request.resource_type(),
        request.relationship(),
    ))
}

/// A provider that only answers fetch operations.
///
/// Reads are forwarded to the wrapped provider; every mutating operation is
/// refused, even if the wrapped provider implements it.
///
/// # Example
///
/// ```rust
/// use jsonapi_server::provider::{FetchOnly, ResourceProvider};
/// use jsonapi_server::{
///     AdvancedRequest, FetchRequest, HttpMethod, HttpRequest, JsonApiError, Resource,
///     ServerConfig,
/// };
///
/// struct Tests;
///
/// impl ResourceProvider for Tests {
///     fn resource_type(&self) -> &str {
///         "tests"
///     }
///
///     fn find_resource(&self, _: &FetchRequest, id: &str) -> Result<Resource, JsonApiError> {
///         Ok(Resource::new("tests", id))
///     }
///
///     fn find_resources(&self, _: &FetchRequest) -> Result<Vec<Resource>, JsonApiError> {
///         Ok(Vec::new())
///     }
///
///     fn delete_resource(&self, _: &AdvancedRequest) -> Result<(), JsonApiError> {
///         Ok(())
///     }
/// }
///
/// let http = HttpRequest::builder(HttpMethod::Delete, "/tests/test-1").build().unwrap();
/// let request = AdvancedRequest::new(http, &ServerConfig::default()).unwrap();
///
/// assert!(Tests.delete_resource(&request).is_ok());
/// assert!(FetchOnly::new(Tests).delete_resource(&request).unwrap_err().is_not_allowed());
/// ```
#[derive(Debug, Clone, Default)]
pub struct FetchOnly<P> {
    inner: P,
}

impl<P: ResourceProvider> FetchOnly<P> {
    /// Wraps a provider.
    #[must_use]
    pub const fn new(inner: P) -> Self {
        Self { inner }
    }

    /// Returns the wrapped provider.
    #[must_use]
    pub const fn inner(&self) -> &P {
        &self.inner
    }

    /// Unwraps the provider.
    #[must_use]
    pub fn into_inner(self) -> P {
        self.inner
    }
}

impl<P: ResourceProvider> ResourceProvider for FetchOnly<P> {
    fn resource_type(&self) -> &str {
        self.inner.resource_type()
    }

    fn find_resource(&self, request: &FetchRequest, id: &str) -> Result<Resource, JsonApiError> {
        self.inner.find_resource(request, id)
    }

    fn find_resources(&self, request: &FetchRequest) -> Result<Vec<Resource>, JsonApiError> {
        self.inner.find_resources(request)
    }

    fn create_resource(&self, request: &SaveRequest) -> Result<Resource, JsonApiError> {
        deny_create(request)
    }

    fn patch_resource(&self, request: &SaveRequest) -> Result<Resource, JsonApiError> {
        deny_patch(request)
    }

    fn delete_resource(&self, request: &AdvancedRequest) -> Result<(), JsonApiError> {
        deny_delete(request)
    }

    fn modify_relationship(
        &self,
        request: &SaveRelationshipRequest,
    ) -> Result<Relationship, JsonApiError> {
        deny_modify_relationship(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use crate::document::JsonDocumentDeserializer;
    use crate::http::{HttpMethod, HttpRequest};
    use serde_json::json;

    struct Writable;

    impl ResourceProvider for Writable {
        fn resource_type(&self) -> &str {
            "tests"
        }

        fn find_resource(&self, _: &FetchRequest, id: &str) -> Result<Resource, JsonApiError> {
            Ok(Resource::new("tests", id))
        }

        fn find_resources(&self, _: &FetchRequest) -> Result<Vec<Resource>, JsonApiError> {
            Ok(vec![Resource::new("tests", "test-1")])
        }

        fn create_resource(&self, request: &SaveRequest) -> Result<Resource, JsonApiError> {
            let mut resource = request.resource().clone();
            resource.id = Some("created".to_string());
            Ok(resource)
        }
    }

    fn save_request() -> SaveRequest {
        let http = HttpRequest::builder(HttpMethod::Post, "/tests")
            .json_body(&json!({"data": {"type": "tests"}}))
            .build()
            .unwrap();
        SaveRequest::new(http, &ServerConfig::default(), &JsonDocumentDeserializer).unwrap()
    }

    #[test]
    fn test_overridden_operation_is_used() {
        let created = Writable.create_resource(&save_request()).unwrap();
        assert_eq!(created.id.as_deref(), Some("created"));
    }

    #[test]
    fn test_default_operation_is_denied() {
        let error = Writable.patch_resource(&save_request()).unwrap_err();
        assert!(matches!(
            error,
            JsonApiError::NotAllowed {
                operation: Operation::Patch,
                ref resource_type,
                relationship: None,
            } if resource_type == "tests"
        ));
    }

    #[test]
    fn test_fetch_only_denies_overridden_operation() {
        let provider = FetchOnly::new(Writable);
        let error = provider.create_resource(&save_request()).unwrap_err();
        assert_eq!(
            error.to_string(),
            "You are not allowed to create resources of type tests"
        );
    }

    #[test]
    fn test_fetch_only_forwards_reads() {
        let provider = FetchOnly::new(Writable);
        let request = FetchRequest::new("tests", None, &crate::query::QueryParameters::default());
        assert_eq!(provider.resource_type(), "tests");
        assert_eq!(provider.find_resources(&request).unwrap().len(), 1);
        assert_eq!(
            provider.find_resource(&request, "x").unwrap().id.as_deref(),
            Some("x")
        );
    }
}
