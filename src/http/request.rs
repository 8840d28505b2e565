//! HTTP request types consumed by the request layer.

use std::collections::HashMap;
use std::fmt;

use crate::error::JsonApiError;

/// HTTP methods relevant to JSON:API endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// Fetch resources or relationships.
    Get,
    /// Create a resource or add to a to-many relationship.
    Post,
    /// Update a resource or replace a relationship.
    Patch,
    /// Delete a resource or remove from a to-many relationship.
    Delete,
}

impl HttpMethod {
    /// Returns `true` for methods whose request carries a document body.
    #[must_use]
    pub const fn expects_body(&self) -> bool {
        matches!(self, Self::Post | Self::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Patch => write!(f, "PATCH"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

/// An inbound HTTP request.
///
/// Use [`HttpRequest::builder`] to construct requests. The URI may be
/// absolute (`https://example.com/articles?include=author`) or just the
/// path and query (`/articles?include=author`); scheme, host and fragment
/// are discarded.
///
/// # Example
///
/// ```rust
/// use jsonapi_server::{HttpMethod, HttpRequest};
///
/// let request =
///     HttpRequest::builder(HttpMethod::Get, "http://example.com/articles?include=author")
///         .header("Accept", "application/vnd.api+json")
///         .build()
///         .unwrap();
///
/// assert_eq!(request.path(), "/articles");
/// assert_eq!(request.query_string(), "include=author");
/// assert_eq!(request.header("accept"), Some("application/vnd.api+json"));
/// ```
#[derive(Clone, Debug)]
pub struct HttpRequest {
    method: HttpMethod,
    path: String,
    query: String,
    headers: HashMap<String, String>,
    body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, uri: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, uri)
    }

    /// Returns the HTTP method.
    #[must_use]
    pub const fn method(&self) -> HttpMethod {
        self.method
    }

    /// Returns the URI path, always starting with `/`.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the raw query string without the leading `?`.
    #[must_use]
    pub fn query_string(&self) -> &str {
        &self.query
    }

    /// Returns a header value; header names are case-insensitive.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Returns the request body, if any.
    ///
    /// An empty body is reported as `None`.
    #[must_use]
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref().filter(|body| !body.is_empty())
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    method: HttpMethod,
    uri: String,
    headers: HashMap<String, String>,
    body: Option<Vec<u8>>,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, uri: impl Into<String>) -> Self {
        Self {
            method,
            uri: uri.into(),
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Adds a header. A repeated name replaces the earlier value.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.into().to_ascii_lowercase(), value.into());
        self
    }

    /// Sets the raw body bytes.
    #[must_use]
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets a JSON body and the JSON:API content type.
    #[must_use]
    pub fn json_body(self, body: &serde_json::Value) -> Self {
        self.header("Content-Type", "application/vnd.api+json")
            .body(body.to_string())
    }

    /// Builds the [`HttpRequest`], splitting the URI into path and query.
    ///
    /// # Errors
    ///
    /// Returns [`JsonApiError::BadRequest`] if the URI is absolute but has no
    /// host, or if the path is not absolute.
    pub fn build(self) -> Result<HttpRequest, JsonApiError> {
        let (path, query) = split_uri(&self.uri)?;
        Ok(HttpRequest {
            method: self.method,
            path,
            query,
            headers: self.headers,
            body: self.body,
        })
    }
}

fn split_uri(uri: &str) -> Result<(String, String), JsonApiError> {
    let uri = uri.trim();
    let without_fragment = uri.split_once('#').map_or(uri, |(head, _)| head);
    let (target, query) = without_fragment
        .split_once('?')
        .unwrap_or((without_fragment, ""));

    let path = match target.find("://") {
        Some(scheme_end) if !target[..scheme_end].contains('/') => {
            let authority_and_path = &target[scheme_end + 3..];
            let path_start = authority_and_path
                .find('/')
                .unwrap_or(authority_and_path.len());
            if path_start == 0 {
                return Err(JsonApiError::bad_request(format!("URI '{uri}' has no host")));
            }
            &authority_and_path[path_start..]
        }
        _ => target,
    };

    let path = if path.is_empty() { "/" } else { path };
    if !path.starts_with('/') {
        return Err(JsonApiError::bad_request(format!(
            "URI '{uri}' does not contain an absolute path"
        )));
    }

    Ok((path.to_string(), query.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_uri_is_split() {
        let request = HttpRequest::builder(
            HttpMethod::Get,
            "https://example.com:8443/articles/1?include=author#top",
        )
        .build()
        .unwrap();
        assert_eq!(request.path(), "/articles/1");
        assert_eq!(request.query_string(), "include=author");
    }

    #[test]
    fn test_host_only_uri_has_root_path() {
        let request = HttpRequest::builder(HttpMethod::Get, "http://example.com?sort=title")
            .build()
            .unwrap();
        assert_eq!(request.path(), "/");
        assert_eq!(request.query_string(), "sort=title");
    }

    #[test]
    fn test_relative_path_is_rejected() {
        let result = HttpRequest::builder(HttpMethod::Get, "articles").build();
        assert!(result.unwrap_err().is_bad_request());
    }

    #[test]
    fn test_empty_body_is_none() {
        let request = HttpRequest::builder(HttpMethod::Post, "/articles")
            .body(Vec::new())
            .build()
            .unwrap();
        assert!(request.body().is_none());
    }

    #[test]
    fn test_json_body_sets_content_type() {
        let request = HttpRequest::builder(HttpMethod::Post, "/articles")
            .json_body(&serde_json::json!({"data": null}))
            .build()
            .unwrap();
        assert_eq!(
            request.header("CONTENT-TYPE"),
            Some("application/vnd.api+json")
        );
        assert_eq!(request.body(), Some(br#"{"data":null}"#.as_slice()));
    }

    #[test]
    fn test_url_in_query_of_relative_uri_is_kept() {
        let request = HttpRequest::builder(
            HttpMethod::Get,
            "/articles?filter[website]=https://example.com&include=author",
        )
        .build()
        .unwrap();
        assert_eq!(request.path(), "/articles");
        assert_eq!(
            request.query_string(),
            "filter[website]=https://example.com&include=author"
        );
    }

    #[test]
    fn test_url_in_query_of_absolute_uri_is_kept() {
        let request = HttpRequest::builder(
            HttpMethod::Get,
            "http://example.com?filter[website]=https://other.org/a",
        )
        .build()
        .unwrap();
        assert_eq!(request.path(), "/");
        assert_eq!(request.query_string(), "filter[website]=https://other.org/a");
    }

    #[test]
    fn test_url_in_path_segment_is_not_a_scheme() {
        let request = HttpRequest::builder(HttpMethod::Get, "/links/http://example.com")
            .build()
            .unwrap();
        assert_eq!(request.path(), "/links/http://example.com");
    }

    #[test]
    fn test_uri_without_host_is_rejected() {
        let result = HttpRequest::builder(HttpMethod::Get, "https:///articles").build();
        assert!(result.unwrap_err().is_bad_request());
    }

    #[test]
    fn test_only_post_and_patch_expect_body() {
        assert!(HttpMethod::Post.expects_body());
        assert!(HttpMethod::Patch.expects_body());
        assert!(!HttpMethod::Get.expects_body());
        assert!(!HttpMethod::Delete.expects_body());
    }
}
