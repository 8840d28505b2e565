//! Interpretation of the request URI path.
//!
//! JSON:API endpoints follow a fixed shape below the API prefix:
//!
//! - `/{type}` - a resource collection
//! - `/{type}/{id}` - a single resource
//! - `/{type}/{id}/{relationship}` - the related resources
//! - `/{type}/{id}/relationships/{relationship}` - the relationship linkage

use std::fmt;

use crate::config::ApiPrefix;
use crate::error::JsonApiError;

const RELATIONSHIPS_SEGMENT: &str = "relationships";

/// The resource addressed by a request URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestPath {
    resource_type: String,
    id: Option<String>,
    relationship: Option<String>,
    only_identifiers: bool,
}

impl RequestPath {
    /// Parses a URI path, stripping `prefix` first when given.
    ///
    /// # Errors
    ///
    /// Returns [`JsonApiError::BadRequest`] if the path is outside the API
    /// prefix or does not match one of the endpoint shapes.
    ///
    /// # Example
    ///
    /// ```rust
    /// use jsonapi_server::request::RequestPath;
    ///
    /// let path = RequestPath::parse("/articles/1/relationships/author", None).unwrap();
    /// assert_eq!(path.resource_type(), "articles");
    /// assert_eq!(path.id(), Some("1"));
    /// assert_eq!(path.relationship(), Some("author"));
    /// assert!(path.only_identifiers());
    /// ```
    pub fn parse(path: &str, prefix: Option<&ApiPrefix>) -> Result<Self, JsonApiError> {
        let relative = match prefix {
            Some(prefix) => prefix.strip(path).ok_or_else(|| {
                JsonApiError::bad_request(format!(
                    "Path '{path}' is outside of the API prefix '{}'",
                    prefix.as_ref()
                ))
            })?,
            None => path,
        };

        let segments: Vec<String> = relative
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(|segment| {
                urlencoding::decode(segment)
                    .map_or_else(|_| segment.to_string(), |s| s.into_owned())
            })
            .collect();

        let invalid =
            || JsonApiError::bad_request(format!("Path '{path}' is not a JSON:API endpoint"));

        match segments.as_slice() {
            [resource_type] => Ok(Self::new(resource_type, None, None, false)),
            [resource_type, id] => Ok(Self::new(resource_type, Some(id), None, false)),
            [resource_type, id, relationship] if relationship != RELATIONSHIPS_SEGMENT => {
                Ok(Self::new(resource_type, Some(id), Some(relationship), false))
            }
            [resource_type, id, marker, relationship] if marker == RELATIONSHIPS_SEGMENT => {
                Ok(Self::new(resource_type, Some(id), Some(relationship), true))
            }
            _ => Err(invalid()),
        }
    }

    fn new(
        resource_type: &str,
        id: Option<&String>,
        relationship: Option<&String>,
        only_identifiers: bool,
    ) -> Self {
        Self {
            resource_type: resource_type.to_string(),
            id: id.cloned(),
            relationship: relationship.cloned(),
            only_identifiers,
        }
    }

    /// Returns the resource type segment.
    #[must_use]
    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    /// Returns the id segment, if present.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Returns the relationship segment, if present.
    #[must_use]
    pub fn relationship(&self) -> Option<&str> {
        self.relationship.as_deref()
    }

    /// Returns `true` for `/{type}/{id}/relationships/{relationship}`.
    #[must_use]
    pub const fn only_identifiers(&self) -> bool {
        self.only_identifiers
    }
}

impl fmt::Display for RequestPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", urlencoding::encode(&self.resource_type))?;
        if let Some(id) = &self.id {
            write!(f, "/{}", urlencoding::encode(id))?;
        }
        if let Some(relationship) = &self.relationship {
            if self.only_identifiers {
                write!(f, "/{RELATIONSHIPS_SEGMENT}")?;
            }
            write!(f, "/{}", urlencoding::encode(relationship))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_path() {
        let path = RequestPath::parse("/articles/", None).unwrap();
        assert_eq!(path.resource_type(), "articles");
        assert!(path.id().is_none());
        assert!(path.relationship().is_none());
    }

    #[test]
    fn test_related_path() {
        let path = RequestPath::parse("/articles/1/comments", None).unwrap();
        assert_eq!(path.relationship(), Some("comments"));
        assert!(!path.only_identifiers());
    }

    #[test]
    fn test_prefix_is_stripped() {
        let prefix = ApiPrefix::new("/api").unwrap();
        let path = RequestPath::parse("/api/articles/1", Some(&prefix)).unwrap();
        assert_eq!(path.resource_type(), "articles");
        assert_eq!(path.id(), Some("1"));
    }

    #[test]
    fn test_path_outside_prefix_is_bad_request() {
        let prefix = ApiPrefix::new("/api").unwrap();
        let error = RequestPath::parse("/articles", Some(&prefix)).unwrap_err();
        assert!(error.is_bad_request());
    }

    #[test]
    fn test_invalid_shapes_are_bad_requests() {
        assert!(RequestPath::parse("/", None).is_err());
        assert!(RequestPath::parse("/articles/1/relationships", None).is_err());
        assert!(RequestPath::parse("/articles/1/links/author", None).is_err());
        assert!(RequestPath::parse("/a/b/c/d/e", None).is_err());
    }

    #[test]
    fn test_segments_are_decoded_and_reencoded() {
        let path = RequestPath::parse("/articles/a%20b", None).unwrap();
        assert_eq!(path.id(), Some("a b"));
        assert_eq!(path.to_string(), "/articles/a%20b");
    }

    #[test]
    fn test_display_relationship_path() {
        let path = RequestPath::parse("/articles/1/relationships/tags", None).unwrap();
        assert_eq!(path.to_string(), "/articles/1/relationships/tags");
    }
}
