//! Turning raw request bodies into [`Document`]s.

use serde_json::Value;

use crate::document::Document;
use crate::error::JsonApiError;

/// Deserializes a raw request body into a [`Document`].
///
/// Request types take the deserializer as a trait object so servers can
/// plug in their own document handling.
pub trait DocumentDeserializer: Send + Sync {
    /// Deserializes `body`.
    ///
    /// # Errors
    ///
    /// Returns [`JsonApiError::BadRequest`] if the body is not a valid
    /// JSON:API document.
    fn deserialize(&self, body: &[u8]) -> Result<Document, JsonApiError>;
}

/// A [`DocumentDeserializer`] backed by `serde_json`.
///
/// # Example
///
/// ```rust
/// use jsonapi_server::{DocumentDeserializer, JsonDocumentDeserializer};
///
/// let body = br#"{"data": {"type": "tests", "id": "test-1"}}"#;
/// let document = JsonDocumentDeserializer.deserialize(body).unwrap();
/// assert_eq!(document.data().first().unwrap().resource_type, "tests");
///
/// assert!(JsonDocumentDeserializer.deserialize(b"{}").is_err());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDocumentDeserializer;

impl DocumentDeserializer for JsonDocumentDeserializer {
    fn deserialize(&self, body: &[u8]) -> Result<Document, JsonApiError> {
        let value: Value = serde_json::from_slice(body)?;
        let Value::Object(members) = &value else {
            return Err(JsonApiError::bad_request(
                "A JSON:API document must be a JSON object",
            ));
        };
        if !members.contains_key("data") {
            return Err(JsonApiError::bad_request(
                "A JSON:API request document must contain a 'data' member",
            ));
        }
        Ok(serde_json::from_value(value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_json_is_bad_request() {
        let error = JsonDocumentDeserializer.deserialize(b"{not json").unwrap_err();
        assert!(error.is_bad_request());
    }

    #[test]
    fn test_non_object_is_bad_request() {
        let error = JsonDocumentDeserializer.deserialize(b"[]").unwrap_err();
        assert!(error.is_bad_request());
    }

    #[test]
    fn test_null_data_is_accepted() {
        let document = JsonDocumentDeserializer
            .deserialize(br#"{"data": null}"#)
            .unwrap();
        assert!(document.data().is_empty());
    }

    #[test]
    fn test_resource_without_type_is_bad_request() {
        let error = JsonDocumentDeserializer
            .deserialize(br#"{"data": {"id": "1"}}"#)
            .unwrap_err();
        assert!(error.is_bad_request());
    }
}
