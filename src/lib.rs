//! # JSON:API Server Request Layer
//!
//! Turns inbound HTTP requests into validated JSON:API request models and
//! defines the contract resource providers implement to answer them.
//!
//! ## Overview
//!
//! This crate provides:
//! - Query parameter parsing for sparse fieldsets, includes, sorting,
//!   pagination and filters via [`query::QueryParameters`]
//! - [`FetchRequest`]: per-type field decisions, include decisions and a
//!   memoized tree of sub-requests for included relationships
//! - [`AdvancedRequest`]: URI interpretation, document body access and link
//!   helpers shared by every request kind
//! - [`SaveRequest`] and [`SaveRelationshipRequest`]: validated create,
//!   patch and relationship modification requests
//! - [`provider::ResourceProvider`]: the provider contract, whose mutating
//!   operations are refused unless a provider opts in
//! - [`provider::ProviderRegistry`]: dispatch by resource type and
//!   compound document resolution
//!
//! ## Fetching
//!
//! ```rust
//! use jsonapi_server::{AdvancedRequest, FetchRequest, HttpMethod, HttpRequest, ServerConfig};
//!
//! let http = HttpRequest::builder(
//!     HttpMethod::Get,
//!     "http://example.com/articles?fields[articles]=title&include=comments.author",
//! )
//! .build()
//! .unwrap();
//! let request = AdvancedRequest::new(http, &ServerConfig::default()).unwrap();
//! let fetch = FetchRequest::from_request(&request).unwrap();
//!
//! assert!(fetch.requested_field("articles", "title"));
//! assert!(!fetch.requested_field("articles", "body"));
//! assert!(fetch.requested_field("people", "name"));
//!
//! let comments = fetch.sub_request("comments", false);
//! assert!(comments.requested_include("author"));
//! assert!(comments.sort().is_empty());
//! ```
//!
//! ## Saving
//!
//! ```rust
//! use jsonapi_server::{
//!     HttpMethod, HttpRequest, JsonDocumentDeserializer, SaveRequest, ServerConfig,
//! };
//! use serde_json::json;
//!
//! let http = HttpRequest::builder(HttpMethod::Patch, "/tests/test-1")
//!     .json_body(&json!({"data": {"type": "tests", "id": "test-2"}}))
//!     .build()
//!     .unwrap();
//!
//! let result = SaveRequest::new(http, &ServerConfig::default(), &JsonDocumentDeserializer);
//! assert!(result.unwrap_err().is_bad_request());
//! ```
//!
//! ## Design Principles
//!
//! - **Request scoped**: every model lives for one request/response cycle
//! - **Fail-fast validation**: inconsistent requests are rejected on
//!   construction, before any provider is called
//! - **Thread-safe**: all types are `Send + Sync`
//! - **Opt-in mutation**: providers only implement what they support

pub mod config;
pub mod document;
pub mod error;
pub mod http;
pub mod provider;
pub mod query;
pub mod request;

pub use config::{ApiPrefix, BaseUrl, ServerConfig, ServerConfigBuilder};
pub use document::{
    Document, DocumentDeserializer, JsonDocumentDeserializer, PrimaryData, Relationship,
    RelationshipData, Resource, ResourceIdentifier,
};
pub use error::{ConfigError, JsonApiError, Operation};
pub use http::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use provider::{FetchOnly, ProviderRegistry, ResourceProvider};
pub use request::{AdvancedRequest, FetchRequest, SaveRelationshipRequest, SaveRequest};
