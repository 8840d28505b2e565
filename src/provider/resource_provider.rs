//! The [`ResourceProvider`] trait.

use crate::document::{Relationship, Resource};
use crate::error::JsonApiError;
use crate::provider::fetch_only::{
    deny_create, deny_delete, deny_modify_relationship, deny_patch,
};
use crate::request::{AdvancedRequest, FetchRequest, SaveRelationshipRequest, SaveRequest};

/// Backend for one resource type.
///
/// # Required Methods
///
/// - `resource_type`: the type this provider answers for
/// - `find_resource` / `find_resources`: fetch one resource or a collection
///
/// # Mutating Methods
///
/// `create_resource`, `patch_resource`, `delete_resource` and
/// `modify_relationship` fail with [`JsonApiError::NotAllowed`] unless
/// overridden.
///
/// Providers receive the [`FetchRequest`] for the node of the include tree
/// they are answering. For included resources this is a sub-request
/// without pagination and sorting.
pub trait ResourceProvider: Send + Sync {
    /// The resource type served by this provider.
    fn resource_type(&self) -> &str;

    /// Fetches a single resource.
    ///
    /// # Errors
    ///
    /// Returns [`JsonApiError::NotFound`] if no resource has the id.
    fn find_resource(&self, request: &FetchRequest, id: &str) -> Result<Resource, JsonApiError>;

    /// Fetches the collection selected by the request's filters, sorting and
    /// pagination.
    ///
    /// # Errors
    ///
    /// Provider-defined.
    fn find_resources(&self, request: &FetchRequest) -> Result<Vec<Resource>, JsonApiError>;

    /// Creates a resource.
    ///
    /// # Errors
    ///
    /// Returns [`JsonApiError::NotAllowed`] unless overridden.
    fn create_resource(&self, request: &SaveRequest) -> Result<Resource, JsonApiError> {
        deny_create(request)
    }

    /// Patches a resource.
    ///
    /// # Errors
    ///
    /// Returns [`JsonApiError::NotAllowed`] unless overridden.
    fn patch_resource(&self, request: &SaveRequest) -> Result<Resource, JsonApiError> {
        deny_patch(request)
    }

    /// Deletes the resource addressed by the request.
    ///
    /// # Errors
    ///
    /// Returns [`JsonApiError::NotAllowed`] unless overridden.
    fn delete_resource(&self, request: &AdvancedRequest) -> Result<(), JsonApiError> {
        deny_delete(request)
    }

    /// Replaces, extends or reduces a relationship, depending on the request
    /// method, and returns the resulting linkage.
    ///
    /// # Errors
    ///
    /// Returns [`JsonApiError::NotAllowed`] unless overridden.
    fn modify_relationship(
        &self,
        request: &SaveRelationshipRequest,
    ) -> Result<Relationship, JsonApiError> {
        deny_modify_relationship(request)
    }
}
