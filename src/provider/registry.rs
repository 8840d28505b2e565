//! Dispatching requests to resource providers.

use std::collections::HashMap;

use crate::document::{Document, PrimaryData, Relationship, Resource, ResourceIdentifier};
use crate::error::JsonApiError;
use crate::provider::ResourceProvider;
use crate::request::{AdvancedRequest, FetchRequest, SaveRelationshipRequest, SaveRequest};

/// Maps resource types to their providers.
///
/// Besides plain dispatch, [`ProviderRegistry::fetch`] builds compound
/// documents: every relationship named by an include path is resolved
/// through a sub-request of the fetch request and the provider owning the
/// related type.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: HashMap<String, Box<dyn ResourceProvider>>,
}

impl ProviderRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a provider for its resource type.
    ///
    /// A provider registered earlier for the same type is replaced.
    pub fn register(&mut self, provider: impl ResourceProvider + 'static) -> &mut Self {
        let resource_type = provider.resource_type().to_string();
        if self
            .providers
            .insert(resource_type.clone(), Box::new(provider))
            .is_some()
        {
            tracing::warn!(resource_type = %resource_type, "Replaced resource provider");
        }
        self
    }

    /// Registers a provider, builder style.
    #[must_use]
    pub fn with_provider(mut self, provider: impl ResourceProvider + 'static) -> Self {
        self.register(provider);
        self
    }

    /// Returns the provider for a resource type.
    ///
    /// # Errors
    ///
    /// Returns [`JsonApiError::UnsupportedType`] if no provider is registered.
    pub fn provider(&self, resource_type: &str) -> Result<&dyn ResourceProvider, JsonApiError> {
        self.providers
            .get(resource_type)
            .map(AsRef::as_ref)
            .ok_or_else(|| JsonApiError::UnsupportedType {
                resource_type: resource_type.to_string(),
            })
    }

    /// Fetches the document answering a main fetch request.
    ///
    /// Depending on the URI the request was built from, the primary data is
    /// a collection, a single resource, the related resources of a
    /// relationship or (for `relationships/` endpoints) the relationship
    /// linkage. Included resources are resolved recursively and never
    /// repeat primary data. Sparse fieldsets are applied to every resource
    /// in the document.
    ///
    /// # Errors
    ///
    /// Returns [`JsonApiError::InvalidArgument`] for a sub-request,
    /// [`JsonApiError::UnsupportedType`] for types without provider, and
    /// propagates provider failures.
    pub fn fetch(&self, request: &FetchRequest) -> Result<Document, JsonApiError> {
        let resource_type = request.resource_type().ok_or_else(|| {
            JsonApiError::invalid_argument("Only main requests can be fetched from the registry")
        })?;
        let provider = self.provider(resource_type)?;

        tracing::debug!(
            resource_type = %resource_type,
            id = ?request.id(),
            relationship = ?request.relationship(),
            includes = ?request.includes(),
            "Fetching resources"
        );

        let data = match (request.id(), request.relationship()) {
            (None, _) => PrimaryData::Many(provider.find_resources(request)?),
            (Some(id), None) => PrimaryData::Single(Box::new(provider.find_resource(request, id)?)),
            (Some(id), Some(name)) => {
                let parent = provider.find_resource(request, id)?;
                let relationship = parent.relationships.get(name).ok_or_else(|| {
                    JsonApiError::bad_request(format!(
                        "Resources of type '{resource_type}' have no relationship '{name}'"
                    ))
                })?;

                if request.only_identifiers() {
                    return Ok(Document {
                        data: linkage(relationship),
                        ..Document::default()
                    });
                }
                self.related(request, relationship)?
            }
        };

        let mut included = Included::new(&data);
        for resource in data.resources() {
            self.include(resource, request, &mut included)?;
        }

        let mut document = Document {
            data,
            included: included.into_resources(),
            ..Document::default()
        };
        apply_fieldsets(&mut document, request);
        Ok(document)
    }

    fn related(
        &self,
        request: &FetchRequest,
        relationship: &Relationship,
    ) -> Result<PrimaryData, JsonApiError> {
        let mut resources = relationship
            .identifiers()
            .iter()
            .map(|identifier| {
                self.provider(&identifier.resource_type)?
                    .find_resource(request, &identifier.id)
            })
            .collect::<Result<Vec<_>, _>>()?;

        if relationship.is_to_many() {
            return Ok(PrimaryData::Many(resources));
        }
        Ok(resources
            .pop()
            .map_or(PrimaryData::Null, |resource| PrimaryData::Single(Box::new(resource))))
    }

    fn include(
        &self,
        resource: &Resource,
        request: &FetchRequest,
        included: &mut Included,
    ) -> Result<(), JsonApiError> {
        for (name, relationship) in &resource.relationships {
            if !request.requested_include(name) {
                continue;
            }
            let sub_request = request.sub_request(name, false);

            for identifier in relationship.identifiers() {
                let related = match included.get(identifier) {
                    Some(known) => known,
                    None => {
                        tracing::debug!(
                            path = %sub_request.path(),
                            resource_type = %identifier.resource_type,
                            id = %identifier.id,
                            "Including related resource"
                        );
                        let related = self
                            .provider(&identifier.resource_type)?
                            .find_resource(&sub_request, &identifier.id)?;
                        included.push(identifier.clone(), related)
                    }
                };

                if !sub_request.includes().is_empty() {
                    self.include(&related, &sub_request, included)?;
                }
            }
        }
        Ok(())
    }

    /// Creates a resource through the provider of the request's type.
    ///
    /// # Errors
    ///
    /// Returns [`JsonApiError::UnsupportedType`] or the provider's failure.
    pub fn create_resource(&self, request: &SaveRequest) -> Result<Resource, JsonApiError> {
        tracing::debug!(resource_type = %request.resource_type(), "Creating resource");
        self.provider(request.resource_type())?
            .create_resource(request)
    }

    /// Patches a resource through the provider of the request's type.
    ///
    /// # Errors
    ///
    /// Returns [`JsonApiError::UnsupportedType`] or the provider's failure.
    pub fn patch_resource(&self, request: &SaveRequest) -> Result<Resource, JsonApiError> {
        tracing::debug!(
            resource_type = %request.resource_type(),
            id = ?request.id(),
            "Patching resource"
        );
        self.provider(request.resource_type())?
            .patch_resource(request)
    }

    /// Deletes a resource through the provider of the request's type.
    ///
    /// # Errors
    ///
    /// Returns [`JsonApiError::BadRequest`] if the URI carries no id,
    /// [`JsonApiError::UnsupportedType`] or the provider's failure.
    pub fn delete_resource(&self, request: &AdvancedRequest) -> Result<(), JsonApiError> {
        if request.id().is_none() || request.relationship().is_some() {
            return Err(JsonApiError::bad_request(format!(
                "Path '{}' does not address a single resource",
                request.path()
            )));
        }
        tracing::debug!(
            resource_type = %request.resource_type(),
            id = ?request.id(),
            "Deleting resource"
        );
        self.provider(request.resource_type())?
            .delete_resource(request)
    }

    /// Modifies a relationship through the provider of the request's type.
    ///
    /// # Errors
    ///
    /// Returns [`JsonApiError::UnsupportedType`] or the provider's failure.
    pub fn modify_relationship(
        &self,
        request: &SaveRelationshipRequest,
    ) -> Result<Relationship, JsonApiError> {
        tracing::debug!(
            resource_type = %request.resource_type(),
            relationship = %request.relationship(),
            method = %request.method(),
            "Modifying relationship"
        );
        self.provider(request.resource_type())?
            .modify_relationship(request)
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut types: Vec<&String> = self.providers.keys().collect();
        types.sort();
        f.debug_struct("ProviderRegistry")
            .field("types", &types)
            .finish()
    }
}

/// Resources known while resolving includes.
///
/// Primary resources are known from the start so they are reused for
/// deeper include paths but never repeated in `included`.
struct Included {
    known: HashMap<ResourceIdentifier, Resource>,
    order: Vec<ResourceIdentifier>,
}

impl Included {
    fn new(data: &PrimaryData) -> Self {
        let known = data
            .resources()
            .iter()
            .filter_map(|resource| Some((resource.identifier()?, resource.clone())))
            .collect();
        Self {
            known,
            order: Vec::new(),
        }
    }

    fn get(&self, identifier: &ResourceIdentifier) -> Option<Resource> {
        self.known.get(identifier).cloned()
    }

    fn push(&mut self, identifier: ResourceIdentifier, resource: Resource) -> Resource {
        self.order.push(identifier.clone());
        self.known.insert(identifier, resource.clone());
        resource
    }

    fn into_resources(mut self) -> Vec<Resource> {
        self.order
            .iter()
            .filter_map(|identifier| self.known.remove(identifier))
            .collect()
    }
}

fn linkage(relationship: &Relationship) -> PrimaryData {
    let identifiers = relationship
        .identifiers()
        .iter()
        .map(|identifier| Resource::new(&identifier.resource_type, &identifier.id));
    if relationship.is_to_many() {
        PrimaryData::Many(identifiers.collect())
    } else {
        identifiers
            .last()
            .map_or(PrimaryData::Null, |resource| PrimaryData::Single(Box::new(resource)))
    }
}

fn apply_fieldsets(document: &mut Document, request: &FetchRequest) {
    let resources: Vec<&mut Resource> = match &mut document.data {
        PrimaryData::Many(resources) => resources.iter_mut().collect(),
        PrimaryData::Single(resource) => vec![&mut **resource],
        PrimaryData::Null => Vec::new(),
    };
    for resource in resources.into_iter().chain(document.included.iter_mut()) {
        let resource_type = resource.resource_type.clone();
        resource.retain_fields(|name| request.requested_field(&resource_type, name));
    }
}
