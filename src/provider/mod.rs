//! Resource provider contract.
//!
//! A [`ResourceProvider`] answers requests for one resource type. Only the
//! fetch operations are required; the mutating operations default to
//! failing with [`JsonApiError::NotAllowed`](crate::JsonApiError::NotAllowed),
//! so a provider overrides just the operations it supports.
//!
//! [`FetchOnly`] wraps any provider into one that refuses every mutation,
//! and [`ProviderRegistry`] dispatches requests to the provider owning the
//! requested type and resolves `include` paths into compound documents.
//!
//! # Example
//!
//! ```rust
//! use jsonapi_server::provider::{ProviderRegistry, ResourceProvider};
//! use jsonapi_server::{FetchRequest, JsonApiError, Resource};
//!
//! struct Articles;
//!
//! impl ResourceProvider for Articles {
//!     fn resource_type(&self) -> &str {
//!         "articles"
//!     }
//!
//!     fn find_resource(&self, _: &FetchRequest, id: &str) -> Result<Resource, JsonApiError> {
//!         Ok(Resource::new("articles", id))
//!     }
//!
//!     fn find_resources(&self, _: &FetchRequest) -> Result<Vec<Resource>, JsonApiError> {
//!         Ok(vec![Resource::new("articles", "1")])
//!     }
//! }
//!
//! let registry = ProviderRegistry::new().with_provider(Articles);
//! assert!(registry.provider("articles").is_ok());
//! assert!(registry.provider("people").is_err());
//! ```

mod fetch_only;
mod registry;
mod resource_provider;

pub use fetch_only::{deny_create, deny_delete, deny_modify_relationship, deny_patch, FetchOnly};
pub use registry::ProviderRegistry;
pub use resource_provider::ResourceProvider;
