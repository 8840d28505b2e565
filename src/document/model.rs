//! Resource, relationship and document value objects.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A `{ "type": ..., "id": ... }` pair identifying one resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResourceIdentifier {
    /// The resource type.
    #[serde(rename = "type")]
    pub resource_type: String,
    /// The resource id.
    pub id: String,
}

impl ResourceIdentifier {
    /// Creates a new identifier.
    #[must_use]
    pub fn new(resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            id: id.into(),
        }
    }
}

/// Relationship linkage: empty/single for to-one, a list for to-many.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RelationshipData {
    /// A to-many relationship.
    ToMany(Vec<ResourceIdentifier>),
    /// A to-one relationship, `None` when empty.
    ToOne(Option<ResourceIdentifier>),
}

impl Default for RelationshipData {
    fn default() -> Self {
        Self::ToOne(None)
    }
}

/// A relationship object of a resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    /// Resource linkage.
    #[serde(default)]
    pub data: RelationshipData,
    /// Relationship links (`self`, `related`).
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub links: Map<String, Value>,
    /// Non-standard meta information.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub meta: Map<String, Value>,
}

impl Relationship {
    /// Creates a to-one relationship.
    #[must_use]
    pub fn to_one(related: Option<ResourceIdentifier>) -> Self {
        Self {
            data: RelationshipData::ToOne(related),
            ..Self::default()
        }
    }

    /// Creates a to-many relationship.
    #[must_use]
    pub fn to_many(related: Vec<ResourceIdentifier>) -> Self {
        Self {
            data: RelationshipData::ToMany(related),
            ..Self::default()
        }
    }

    /// Returns `true` for to-many relationships.
    #[must_use]
    pub const fn is_to_many(&self) -> bool {
        matches!(self.data, RelationshipData::ToMany(_))
    }

    /// Returns the related resource identifiers.
    #[must_use]
    pub fn identifiers(&self) -> &[ResourceIdentifier] {
        match &self.data {
            RelationshipData::ToMany(related) => related,
            RelationshipData::ToOne(Some(related)) => std::slice::from_ref(related),
            RelationshipData::ToOne(None) => &[],
        }
    }
}

/// A resource object.
///
/// # Example
///
/// ```rust
/// use jsonapi_server::{Relationship, Resource, ResourceIdentifier};
/// use serde_json::json;
///
/// let article = Resource::new("articles", "1")
///     .with_attribute("title", json!("JSON:API paints my bikeshed!"))
///     .with_relationship(
///         "author",
///         Relationship::to_one(Some(ResourceIdentifier::new("people", "9"))),
///     );
///
/// assert_eq!(article.identifier(), Some(ResourceIdentifier::new("articles", "1")));
/// assert_eq!(article.relationships["author"].identifiers().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// The resource type.
    #[serde(rename = "type")]
    pub resource_type: String,
    /// The resource id; absent for resources not yet created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Attribute values keyed by field name.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub attributes: Map<String, Value>,
    /// Relationships keyed by field name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub relationships: BTreeMap<String, Relationship>,
    /// Resource links.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub links: Map<String, Value>,
    /// Non-standard meta information.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub meta: Map<String, Value>,
}

impl Resource {
    /// Creates a resource with an id and no fields.
    #[must_use]
    pub fn new(resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        let mut resource = Self::without_id(resource_type);
        resource.id = Some(id.into());
        resource
    }

    /// Creates a resource that has no id yet.
    #[must_use]
    pub fn without_id(resource_type: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            id: None,
            attributes: Map::new(),
            relationships: BTreeMap::new(),
            links: Map::new(),
            meta: Map::new(),
        }
    }

    /// Adds an attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }

    /// Adds a relationship.
    #[must_use]
    pub fn with_relationship(
        mut self,
        name: impl Into<String>,
        relationship: Relationship,
    ) -> Self {
        self.relationships.insert(name.into(), relationship);
        self
    }

    /// Returns the identifier, or `None` when the resource has no id.
    #[must_use]
    pub fn identifier(&self) -> Option<ResourceIdentifier> {
        self.id
            .as_ref()
            .map(|id| ResourceIdentifier::new(self.resource_type.clone(), id.clone()))
    }

    /// Removes every attribute and relationship for which `keep` is false.
    pub fn retain_fields(&mut self, keep: impl Fn(&str) -> bool) {
        self.attributes.retain(|name, _| keep(name));
        self.relationships.retain(|name, _| keep(name));
    }
}

/// The top-level `data` member.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrimaryData {
    /// A collection of resources.
    Many(Vec<Resource>),
    /// A single resource.
    Single(Box<Resource>),
    /// `null`.
    #[default]
    Null,
}

impl PrimaryData {
    /// Returns the contained resources as a slice.
    #[must_use]
    pub fn resources(&self) -> &[Resource] {
        match self {
            Self::Many(resources) => resources,
            Self::Single(resource) => std::slice::from_ref(resource.as_ref()),
            Self::Null => &[],
        }
    }

    /// Returns `true` when no resource is contained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources().is_empty()
    }

    /// Returns the first contained resource.
    #[must_use]
    pub fn first(&self) -> Option<&Resource> {
        self.resources().first()
    }
}

/// A JSON:API document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Primary data.
    #[serde(default)]
    pub data: PrimaryData,
    /// Resources included through `include` paths.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub included: Vec<Resource>,
    /// Top-level links.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub links: Map<String, Value>,
    /// Non-standard meta information.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub meta: Map<String, Value>,
}

impl Document {
    /// Creates a document with a single primary resource.
    #[must_use]
    pub fn single(resource: Resource) -> Self {
        Self {
            data: PrimaryData::Single(Box::new(resource)),
            ..Self::default()
        }
    }

    /// Creates a document with a resource collection.
    #[must_use]
    pub fn collection(resources: Vec<Resource>) -> Self {
        Self {
            data: PrimaryData::Many(resources),
            ..Self::default()
        }
    }

    /// Returns the primary data.
    #[must_use]
    pub const fn data(&self) -> &PrimaryData {
        &self.data
    }
}
