//! Request metadata shared by fetch, save and delete requests.

use crate::config::ServerConfig;
use crate::document::{Document, DocumentDeserializer, Resource};
use crate::error::JsonApiError;
use crate::http::{HttpMethod, HttpRequest};
use crate::query::QueryParameters;
use crate::request::path::RequestPath;

/// An inbound request interpreted against the JSON:API endpoint shapes.
///
/// Holds the addressed resource type, id and relationship, the parsed query
/// parameters and, for requests with a body, the parsed document. It is
/// read-only after construction.
///
/// # Example
///
/// ```rust
/// use jsonapi_server::{AdvancedRequest, HttpMethod, HttpRequest, ServerConfig};
///
/// let http = HttpRequest::builder(HttpMethod::Delete, "/articles/1").build().unwrap();
/// let request = AdvancedRequest::new(http, &ServerConfig::default()).unwrap();
///
/// assert_eq!(request.resource_type(), "articles");
/// assert_eq!(request.id(), Some("1"));
/// assert_eq!(request.self_link(), "/articles/1");
/// ```
#[derive(Debug, Clone)]
pub struct AdvancedRequest {
    http: HttpRequest,
    path: RequestPath,
    query: QueryParameters,
    document: Option<Document>,
    config: ServerConfig,
}

impl AdvancedRequest {
    /// Interprets a request without reading its body.
    ///
    /// # Errors
    ///
    /// Returns [`JsonApiError::BadRequest`] if the path is not a JSON:API
    /// endpoint.
    pub fn new(http: HttpRequest, config: &ServerConfig) -> Result<Self, JsonApiError> {
        let path = RequestPath::parse(http.path(), config.api_prefix())?;
        let query = QueryParameters::parse(http.query_string());
        Ok(Self {
            http,
            path,
            query,
            document: None,
            config: config.clone(),
        })
    }

    /// Interprets a request and deserializes its body, if one is present.
    ///
    /// # Errors
    ///
    /// Returns [`JsonApiError::BadRequest`] if the path is not a JSON:API
    /// endpoint or the body is not a valid document.
    pub fn with_document(
        http: HttpRequest,
        config: &ServerConfig,
        deserializer: &dyn DocumentDeserializer,
    ) -> Result<Self, JsonApiError> {
        let document = http
            .body()
            .map(|body| deserializer.deserialize(body))
            .transpose()?;
        let mut request = Self::new(http, config)?;
        request.document = document;
        Ok(request)
    }

    /// Returns the HTTP method.
    #[must_use]
    pub const fn method(&self) -> HttpMethod {
        self.http.method()
    }

    /// Returns the resource type addressed by the URI.
    #[must_use]
    pub fn resource_type(&self) -> &str {
        self.path.resource_type()
    }

    /// Returns the resource id addressed by the URI.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.path.id()
    }

    /// Returns the relationship addressed by the URI.
    #[must_use]
    pub fn relationship(&self) -> Option<&str> {
        self.path.relationship()
    }

    /// Returns `true` if the URI addressed relationship linkage only.
    #[must_use]
    pub const fn only_identifiers(&self) -> bool {
        self.path.only_identifiers()
    }

    /// Returns the interpreted URI path.
    #[must_use]
    pub const fn path(&self) -> &RequestPath {
        &self.path
    }

    /// Returns a header value; header names are case-insensitive.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.http.header(name)
    }

    /// Returns the parsed query parameters.
    #[must_use]
    pub const fn query(&self) -> &QueryParameters {
        &self.query
    }

    /// Returns the parsed request document, if a body was sent.
    #[must_use]
    pub const fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    /// Returns the server configuration the request was interpreted with.
    #[must_use]
    pub const fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Returns the configured base URL, if any.
    #[must_use]
    pub fn base_url(&self) -> Option<&str> {
        self.config.base_url().map(AsRef::as_ref)
    }

    /// Builds a link for a path relative to the API root.
    #[must_use]
    pub fn link(&self, path: &str) -> String {
        self.config.link(path)
    }

    /// Builds the link to the endpoint this request addressed.
    #[must_use]
    pub fn self_link(&self) -> String {
        self.link(&self.path.to_string())
    }

    /// Checks that a body resource agrees with the type and id in the URI.
    ///
    /// # Errors
    ///
    /// Returns [`JsonApiError::BadRequest`] if the types differ, or if the
    /// URI carries an id and the resource has none or a different one.
    pub fn ensure_matches_path(&self, resource: &Resource) -> Result<(), JsonApiError> {
        if resource.resource_type != self.resource_type() {
            tracing::warn!(
                path_type = %self.resource_type(),
                body_type = %resource.resource_type,
                "Resource type in body does not match request path"
            );
            return Err(JsonApiError::bad_request(format!(
                "Resource type '{}' does not match the type '{}' of the request path",
                resource.resource_type,
                self.resource_type()
            )));
        }

        if let Some(path_id) = self.id() {
            match resource.id.as_deref() {
                Some(body_id) if body_id == path_id => {}
                Some(body_id) => {
                    tracing::warn!(
                        path_id = %path_id,
                        body_id = %body_id,
                        "Resource id in body does not match request path"
                    );
                    return Err(JsonApiError::bad_request(format!(
                        "Resource id '{body_id}' does not match the id '{path_id}' of the request path"
                    )));
                }
                None => {
                    return Err(JsonApiError::bad_request(format!(
                        "Resource in body is missing the id '{path_id}' of the request path"
                    )));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiPrefix, BaseUrl};
    use crate::document::JsonDocumentDeserializer;
    use serde_json::json;

    fn http(method: HttpMethod, uri: &str) -> HttpRequest {
        HttpRequest::builder(method, uri).build().unwrap()
    }

    #[test]
    fn test_query_is_parsed() {
        let request = AdvancedRequest::new(
            http(HttpMethod::Get, "/articles?include=author&sort=-title"),
            &ServerConfig::default(),
        )
        .unwrap();
        assert_eq!(request.query().include(), ["author".to_string()]);
        assert_eq!(request.method(), HttpMethod::Get);
    }

    #[test]
    fn test_links_use_prefix_and_base_url() {
        let config = ServerConfig::builder()
            .api_prefix(ApiPrefix::new("/api").unwrap())
            .base_url(BaseUrl::new("https://example.com").unwrap())
            .build();
        let request = AdvancedRequest::new(
            http(HttpMethod::Get, "/api/articles/1/relationships/author"),
            &config,
        )
        .unwrap();
        assert_eq!(request.base_url(), Some("https://example.com"));
        assert_eq!(
            request.self_link(),
            "https://example.com/api/articles/1/relationships/author"
        );
    }

    #[test]
    fn test_without_body_has_no_document() {
        let request = AdvancedRequest::with_document(
            http(HttpMethod::Get, "/articles"),
            &ServerConfig::default(),
            &JsonDocumentDeserializer,
        )
        .unwrap();
        assert!(request.document().is_none());
    }

    #[test]
    fn test_body_is_deserialized() {
        let http = HttpRequest::builder(HttpMethod::Post, "/articles")
            .json_body(&json!({"data": {"type": "articles"}}))
            .build()
            .unwrap();
        let request = AdvancedRequest::with_document(
            http,
            &ServerConfig::default(),
            &JsonDocumentDeserializer,
        )
        .unwrap();
        assert_eq!(
            request.document().unwrap().data().first().unwrap().resource_type,
            "articles"
        );
    }

    #[test]
    fn test_ensure_matches_path() {
        let request =
            AdvancedRequest::new(http(HttpMethod::Patch, "/tests/test-1"), &ServerConfig::default())
                .unwrap();
        assert!(request
            .ensure_matches_path(&Resource::new("tests", "test-1"))
            .is_ok());
        assert!(request
            .ensure_matches_path(&Resource::new("tests", "test-2"))
            .unwrap_err()
            .is_bad_request());
        assert!(request
            .ensure_matches_path(&Resource::new("others", "test-1"))
            .unwrap_err()
            .is_bad_request());
        assert!(request
            .ensure_matches_path(&Resource::without_id("tests"))
            .unwrap_err()
            .is_bad_request());
    }
}
