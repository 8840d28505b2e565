//! Requests that carry a document to be saved.

use std::ops::Deref;

use crate::config::ServerConfig;
use crate::document::{
    DocumentDeserializer, PrimaryData, Relationship, Resource, ResourceIdentifier,
};
use crate::error::JsonApiError;
use crate::http::HttpRequest;
use crate::request::advanced::AdvancedRequest;
use crate::request::fetch::FetchRequest;

/// A request creating (`POST /{type}`) or patching (`PATCH /{type}/{id}`) a
/// single resource.
///
/// Construction validates the body against the URI: the document must hold
/// exactly one resource of the URI's type, and when the URI carries an id
/// the resource must carry the same one.
///
/// Dereferences to [`AdvancedRequest`] for the shared request metadata.
///
/// # Example
///
/// ```rust
/// use jsonapi_server::{
///     HttpMethod, HttpRequest, JsonDocumentDeserializer, SaveRequest, ServerConfig,
/// };
/// use serde_json::json;
///
/// let http = HttpRequest::builder(HttpMethod::Post, "/tests")
///     .json_body(&json!({"data": {"type": "tests", "attributes": {"title": "Lorem Ipsum"}}}))
///     .build()
///     .unwrap();
/// let request =
///     SaveRequest::new(http, &ServerConfig::default(), &JsonDocumentDeserializer).unwrap();
///
/// assert!(request.is_create());
/// assert!(request.fetch(None).is_err());
/// assert_eq!(request.fetch(Some("test-1")).unwrap().id(), Some("test-1"));
/// ```
#[derive(Debug, Clone)]
pub struct SaveRequest {
    request: AdvancedRequest,
    resource: Resource,
}

impl SaveRequest {
    /// Interprets and validates a save request.
    ///
    /// # Errors
    ///
    /// Returns [`JsonApiError::BadRequest`] if the method is neither `POST`
    /// nor `PATCH`, the URI addresses a relationship, the body is missing or
    /// holds no single resource, or the resource disagrees with the URI type
    /// or id.
    pub fn new(
        http: HttpRequest,
        config: &ServerConfig,
        deserializer: &dyn DocumentDeserializer,
    ) -> Result<Self, JsonApiError> {
        let request = AdvancedRequest::with_document(http, config, deserializer)?;

        if !request.method().expects_body() {
            return Err(JsonApiError::bad_request(format!(
                "A resource can not be saved with a {} request",
                request.method()
            )));
        }

        if request.relationship().is_some() {
            return Err(JsonApiError::bad_request(
                "A resource can not be saved through a relationship endpoint",
            ));
        }

        let document = request
            .document()
            .ok_or_else(|| JsonApiError::bad_request("Missing request body"))?;

        let resource = match &document.data {
            PrimaryData::Single(resource) => resource.as_ref().clone(),
            PrimaryData::Many(_) => {
                return Err(JsonApiError::bad_request(
                    "Expected a single resource as primary data, got a collection",
                ));
            }
            PrimaryData::Null => {
                return Err(JsonApiError::bad_request(
                    "Expected a single resource as primary data, got null",
                ));
            }
        };

        request.ensure_matches_path(&resource)?;

        tracing::debug!(
            resource_type = %resource.resource_type,
            id = ?resource.id,
            method = %request.method(),
            "Accepted save request"
        );

        Ok(Self { request, resource })
    }

    /// Returns the resource sent in the body.
    #[must_use]
    pub const fn resource(&self) -> &Resource {
        &self.resource
    }

    /// Consumes the request and returns the resource sent in the body.
    #[must_use]
    pub fn into_resource(self) -> Resource {
        self.resource
    }

    /// Returns `true` if the URI addressed a collection, i.e. the request
    /// creates a new resource.
    #[must_use]
    pub fn is_create(&self) -> bool {
        self.request.id().is_none()
    }

    /// Creates the main fetch request for the saved resource.
    ///
    /// The response to a save request renders the saved resource with the
    /// query parameters of the save request. `id` names the resource to
    /// fetch; it may be omitted when the URI carries the id.
    ///
    /// # Errors
    ///
    /// Returns [`JsonApiError::InvalidArgument`] if `id` contradicts the id
    /// in the URI, or if neither is available (a create request whose
    /// resource id is not known yet).
    pub fn fetch(&self, id: Option<&str>) -> Result<FetchRequest, JsonApiError> {
        let id = match (self.request.id(), id) {
            (Some(path_id), Some(given)) if path_id != given => {
                return Err(JsonApiError::invalid_argument(format!(
                    "Id '{given}' does not match the id '{path_id}' of the save request"
                )));
            }
            (Some(path_id), _) => path_id,
            (None, Some(given)) => given,
            (None, None) => {
                return Err(JsonApiError::invalid_argument(
                    "An id is required to fetch a resource that has just been created",
                ));
            }
        };

        Ok(FetchRequest::new(
            self.request.resource_type(),
            Some(id.to_string()),
            self.request.query(),
        ))
    }
}

impl Deref for SaveRequest {
    type Target = AdvancedRequest;

    fn deref(&self) -> &Self::Target {
        &self.request
    }
}

/// A request modifying the linkage of one relationship
/// (`POST|PATCH|DELETE /{type}/{id}/relationships/{relationship}`).
///
/// Dereferences to [`AdvancedRequest`] for the shared request metadata.
#[derive(Debug, Clone)]
pub struct SaveRelationshipRequest {
    request: AdvancedRequest,
    relationship: String,
    data: Relationship,
}

impl SaveRelationshipRequest {
    /// Interprets and validates a relationship modification.
    ///
    /// # Errors
    ///
    /// Returns [`JsonApiError::BadRequest`] if the URI is not a relationship
    /// endpoint, the body is missing, or the primary data contains a
    /// resource without id.
    pub fn new(
        http: HttpRequest,
        config: &ServerConfig,
        deserializer: &dyn DocumentDeserializer,
    ) -> Result<Self, JsonApiError> {
        let request = AdvancedRequest::with_document(http, config, deserializer)?;

        let relationship = match request.relationship() {
            Some(relationship) if request.only_identifiers() => relationship.to_string(),
            _ => {
                return Err(JsonApiError::bad_request(format!(
                    "Path '{}' is not a relationship endpoint",
                    request.path()
                )));
            }
        };

        let document = request
            .document()
            .ok_or_else(|| JsonApiError::bad_request("Missing request body"))?;

        let data = match &document.data {
            PrimaryData::Null => Relationship::to_one(None),
            PrimaryData::Single(resource) => Relationship::to_one(Some(identify(resource)?)),
            PrimaryData::Many(resources) => Relationship::to_many(
                resources
                    .iter()
                    .map(identify)
                    .collect::<Result<Vec<_>, _>>()?,
            ),
        };

        Ok(Self {
            request,
            relationship,
            data,
        })
    }

    /// Returns the name of the relationship being modified.
    #[must_use]
    pub fn relationship(&self) -> &str {
        &self.relationship
    }

    /// Returns the linkage sent in the body.
    #[must_use]
    pub const fn data(&self) -> &Relationship {
        &self.data
    }
}

impl Deref for SaveRelationshipRequest {
    type Target = AdvancedRequest;

    fn deref(&self) -> &Self::Target {
        &self.request
    }
}

fn identify(resource: &Resource) -> Result<ResourceIdentifier, JsonApiError> {
    resource.identifier().ok_or_else(|| {
        JsonApiError::bad_request(format!(
            "Relationship data of type '{}' is missing an id",
            resource.resource_type
        ))
    })
}
