//! Request models.
//!
//! - [`AdvancedRequest`]: URI interpretation, query parameters, document body
//!   and link helpers shared by every request kind
//! - [`FetchRequest`]: field and include decisions with memoized sub-requests
//! - [`SaveRequest`]: create or patch a single resource
//! - [`SaveRelationshipRequest`]: replace, add to or remove from a relationship
//! - [`RequestPath`]: the endpoint shape addressed by a URI path

mod advanced;
mod fetch;
mod path;
mod save;

pub use advanced::AdvancedRequest;
pub use fetch::FetchRequest;
pub use path::RequestPath;
pub use save::{SaveRelationshipRequest, SaveRequest};
