//! JSON:API document model.
//!
//! These are the value objects the request layer reads from request bodies
//! and hands back from resource providers. Only the parts of a document the
//! request layer needs are modelled: resources, relationship linkage and
//! the top-level `data`/`included`/`meta` members.

mod deserializer;
mod model;

pub use deserializer::{DocumentDeserializer, JsonDocumentDeserializer};
pub use model::{
    Document, PrimaryData, Relationship, RelationshipData, Resource, ResourceIdentifier,
};
