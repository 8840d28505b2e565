//! Read-only view of an inbound HTTP request.
//!
//! The request layer does not talk to a transport directly. Whatever server
//! framework receives the request converts it into an [`HttpRequest`] and
//! hands it to the request types in [`crate::request`].

mod request;

pub use request::{HttpMethod, HttpRequest, HttpRequestBuilder};
