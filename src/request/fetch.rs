//! Fetch requests and their include tree.
//!
//! A [`FetchRequest`] answers which fields and relationships a response must
//! contain. The main request is built from the inbound query string; every
//! included relationship gets a derived sub-request via
//! [`FetchRequest::sub_request`], which strips the relationship from the
//! include paths and drops pagination and sorting.
//!
//! # Example
//!
//! ```rust
//! use jsonapi_server::query::QueryParameters;
//! use jsonapi_server::FetchRequest;
//!
//! let query = QueryParameters::parse("fields[articles]=title&include=comments.author");
//! let request = FetchRequest::new("articles", None, &query);
//!
//! assert!(request.requested_field("articles", "title"));
//! assert!(!request.requested_field("articles", "body"));
//! assert!(request.requested_include("comments"));
//!
//! let comments = request.sub_request("comments", false);
//! assert!(comments.requested_include("author"));
//! assert!(!comments.requested_include("comments"));
//! ```

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::JsonApiError;
use crate::query::{is_included, strip_include_prefix, QueryParameters, SortField};
use crate::request::advanced::AdvancedRequest;

type Fieldsets = BTreeMap<String, BTreeSet<String>>;

/// Cache key of a derived sub-request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct SubRequestKey {
    relationship: String,
    keep_filters: bool,
}

/// The structured request for one resource type at one node of the include
/// tree.
///
/// Sub-requests are shared as [`Arc`] handles. Deriving the same
/// sub-request twice returns the identical instance, so the tree is built at
/// most once per request however often providers ask for it.
#[derive(Debug)]
pub struct FetchRequest {
    resource_type: Option<String>,
    id: Option<String>,
    relationship: Option<String>,
    only_identifiers: bool,
    main_request: bool,
    requested_resource_body: bool,
    path: String,
    fields: Arc<Fieldsets>,
    include: Vec<String>,
    sort: Vec<SortField>,
    page: BTreeMap<String, String>,
    filter: BTreeMap<String, String>,
    sub_requests: Mutex<HashMap<SubRequestKey, Arc<FetchRequest>>>,
}

impl FetchRequest {
    /// Creates a main request for a resource type.
    ///
    /// `id` selects a single resource; `None` fetches the collection.
    #[must_use]
    pub fn new(
        resource_type: impl Into<String>,
        id: Option<String>,
        query: &QueryParameters,
    ) -> Self {
        Self {
            resource_type: Some(resource_type.into()),
            id,
            relationship: None,
            only_identifiers: false,
            main_request: true,
            requested_resource_body: true,
            path: String::new(),
            fields: Arc::new(query.all_fields().clone()),
            include: query.include().to_vec(),
            sort: query.sort().to_vec(),
            page: query.page().clone(),
            filter: query.filter().clone(),
            sub_requests: Mutex::new(HashMap::new()),
        }
    }

    /// Creates the main request for an interpreted `GET` request.
    ///
    /// The relationship addressed by the URI, if any, is carried over so
    /// providers can answer related and relationship endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`JsonApiError::BadRequest`] if the request carries a
    /// document body.
    pub fn from_request(request: &AdvancedRequest) -> Result<Self, JsonApiError> {
        if request.document().is_some() {
            return Err(JsonApiError::bad_request(
                "A fetch request must not contain a request body",
            ));
        }
        let mut fetch = Self::new(
            request.resource_type(),
            request.id().map(ToString::to_string),
            request.query(),
        );
        fetch.relationship = request.relationship().map(ToString::to_string);
        fetch.only_identifiers = request.only_identifiers();
        Ok(fetch)
    }

    /// Returns `true` only for the request built from the inbound query
    /// string.
    #[must_use]
    pub const fn is_main_request(&self) -> bool {
        self.main_request
    }

    /// Returns `true` if the response should contain attributes and
    /// relationships, not just resource identifiers.
    ///
    /// Always true for the main request. A sub-request reports true only
    /// when its relationship was named by an include path of its parent.
    #[must_use]
    pub const fn requested_resource_body(&self) -> bool {
        self.requested_resource_body
    }

    /// Returns `false` if a `fields[type]` parameter was sent for `type`
    /// and does not contain `name`.
    #[must_use]
    pub fn requested_field(&self, resource_type: &str, name: &str) -> bool {
        self.fields
            .get(resource_type)
            .map_or(true, |fields| fields.contains(name))
    }

    /// Returns `true` if resources fetched for this node must provide their
    /// relationships.
    ///
    /// A node keeps include paths only when its parent included it, so an
    /// identifier-only node never leads to deeper includes and this always
    /// agrees with [`FetchRequest::requested_resource_body`].
    #[must_use]
    pub const fn requested_relationships(&self) -> bool {
        self.requested_resource_body
    }

    /// Returns `true` if `relationship` is named by an include path, either
    /// as a whole path or as a leading segment of a longer one.
    #[must_use]
    pub fn requested_include(&self, relationship: &str) -> bool {
        is_included(&self.include, relationship)
    }

    /// Returns the request for the resources behind `relationship`.
    ///
    /// The sub-request keeps the sparse fieldsets, keeps the include paths
    /// that continue below `relationship` (with the leading segment
    /// removed), inherits the filters only if `keep_filters` is set and
    /// carries neither pagination nor sorting.
    ///
    /// A second call with the same arguments returns the cached instance.
    /// Asking for a relationship that is not included is allowed; the
    /// result then reports `requested_resource_body() == false`.
    #[must_use]
    pub fn sub_request(&self, relationship: &str, keep_filters: bool) -> Arc<Self> {
        let key = SubRequestKey {
            relationship: relationship.to_string(),
            keep_filters,
        };
        let mut sub_requests = self
            .sub_requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(existing) = sub_requests.get(&key) {
            tracing::trace!(path = %existing.path, keep_filters, "Reusing sub request");
            return Arc::clone(existing);
        }

        let sub_request = Arc::new(self.derive(relationship, keep_filters));
        tracing::debug!(
            path = %sub_request.path,
            includes = ?sub_request.include,
            requested_resource_body = sub_request.requested_resource_body,
            keep_filters,
            "Derived sub request"
        );
        sub_requests.insert(key, Arc::clone(&sub_request));
        sub_request
    }

    fn derive(&self, relationship: &str, keep_filters: bool) -> Self {
        let path = if self.path.is_empty() {
            relationship.to_string()
        } else {
            format!("{}.{relationship}", self.path)
        };

        Self {
            resource_type: None,
            id: None,
            relationship: None,
            only_identifiers: false,
            main_request: false,
            requested_resource_body: self.requested_include(relationship),
            path,
            fields: Arc::clone(&self.fields),
            include: strip_include_prefix(&self.include, relationship),
            sort: Vec::new(),
            page: BTreeMap::new(),
            filter: if keep_filters {
                self.filter.clone()
            } else {
                BTreeMap::new()
            },
            sub_requests: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the requested resource type.
    ///
    /// Set on the main request; `None` on sub-requests, whose type is only
    /// known to the provider that owns the relationship.
    #[must_use]
    pub fn resource_type(&self) -> Option<&str> {
        self.resource_type.as_deref()
    }

    /// Returns the requested resource id, if a single resource is fetched.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Returns the relationship addressed by the URI of the main request.
    #[must_use]
    pub fn relationship(&self) -> Option<&str> {
        self.relationship.as_deref()
    }

    /// Returns `true` if the main request addressed relationship linkage.
    #[must_use]
    pub const fn only_identifiers(&self) -> bool {
        self.only_identifiers
    }

    /// Returns the dot-separated relationship path from the main request to
    /// this node; empty for the main request.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns all sparse fieldsets keyed by type.
    #[must_use]
    pub fn fields(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.fields
    }

    /// Returns the include paths relative to this node.
    #[must_use]
    pub fn includes(&self) -> &[String] {
        &self.include
    }

    /// Returns the sort keys; always empty on sub-requests.
    #[must_use]
    pub fn sort(&self) -> &[SortField] {
        &self.sort
    }

    /// Returns the pagination parameters; always empty on sub-requests.
    #[must_use]
    pub const fn pagination(&self) -> &BTreeMap<String, String> {
        &self.page
    }

    /// Returns the filters.
    #[must_use]
    pub const fn filters(&self) -> &BTreeMap<String, String> {
        &self.filter
    }

    /// Returns a single filter value.
    #[must_use]
    pub fn filter(&self, name: &str) -> Option<&str> {
        self.filter.get(name).map(String::as_str)
    }

    /// Returns `true` if `a` and `b` share the same fieldset table.
    #[cfg(test)]
    fn shares_fields(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.fields, &b.fields)
    }
}

// FetchRequest nodes are handed to providers that may run on other threads.
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<FetchRequest>();
};
