//! Integration tests for fetch requests.
//!
//! These tests verify sparse fieldset decisions, include prefix matching and
//! the derivation of sub-requests from a main request built from a URI.

use std::sync::Arc;

use jsonapi_server::query::{QueryParameters, SortDirection};
use jsonapi_server::{AdvancedRequest, FetchRequest, HttpMethod, HttpRequest, ServerConfig};

// ============================================================================
// Helpers
// ============================================================================

fn fetch(uri: &str) -> FetchRequest {
    let http = HttpRequest::builder(HttpMethod::Get, uri).build().unwrap();
    let request = AdvancedRequest::new(http, &ServerConfig::default()).unwrap();
    FetchRequest::from_request(&request).unwrap()
}

// ============================================================================
// Sparse Fieldsets
// ============================================================================

#[test]
fn test_fields_absent_requests_every_field() {
    let request = fetch("/articles");
    for name in ["title", "body", "author", "anything"] {
        assert!(request.requested_field("articles", name));
        assert!(request.requested_field("people", name));
    }
}

#[test]
fn test_fields_restrict_only_their_type() {
    let request = fetch("/articles?fields[articles]=a,b");
    assert!(request.requested_field("articles", "a"));
    assert!(request.requested_field("articles", "b"));
    assert!(!request.requested_field("articles", "c"));
    assert!(request.requested_field("comments", "c"));
}

#[test]
fn test_empty_fieldset_requests_nothing() {
    let request = fetch("/articles?fields[articles]=");
    assert!(!request.requested_field("articles", "title"));
}

// ============================================================================
// Includes and Sub-Requests
// ============================================================================

#[test]
fn test_include_chain_through_sub_requests() {
    let request = fetch("/articles?include=a.b.c");
    assert!(request.requested_include("a"));
    assert!(!request.requested_include("b"));

    let a = request.sub_request("a", false);
    assert!(a.requested_include("b"));
    assert!(!a.requested_include("a"));
    assert!(!a.requested_include("c"));

    let b = a.sub_request("b", false);
    assert!(b.requested_include("c"));
    assert!(!b.requested_include("x"));

    let c = b.sub_request("c", false);
    assert!(c.requested_resource_body());
    assert!(c.includes().is_empty());
    assert!(!c.requested_include("c"));
}

#[test]
fn test_articles_comments_author_scenario() {
    let request = fetch("/articles?fields[articles]=title&include=comments.author");
    assert!(request.is_main_request());
    assert!(request.requested_field("articles", "title"));
    assert!(!request.requested_field("articles", "body"));
    assert!(request.requested_include("comments"));

    let comments = request.sub_request("comments", false);
    assert!(!comments.is_main_request());
    assert!(comments.requested_include("author"));
    assert!(!comments.requested_include("comments"));
    assert!(!comments.requested_field("articles", "body"));
}

#[test]
fn test_sub_request_is_idempotent() {
    let request = fetch("/articles?fields[articles]=title&include=comments");
    let fields_before = request.fields().clone();

    let first = request.sub_request("comments", false);
    let second = request.sub_request("comments", false);

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(request.fields(), &fields_before);
    assert_eq!(first.fields(), &fields_before);
}

#[test]
fn test_sub_requests_never_paginate_or_sort() {
    let request =
        fetch("/articles?include=comments.author&sort=-created&page[offset]=10&page[limit]=5");
    assert_eq!(request.sort().len(), 1);
    assert_eq!(request.sort()[0].direction, SortDirection::Descending);
    assert_eq!(request.pagination().len(), 2);

    let comments = request.sub_request("comments", true);
    assert!(comments.sort().is_empty());
    assert!(comments.pagination().is_empty());

    let author = comments.sub_request("author", true);
    assert!(author.sort().is_empty());
    assert!(author.pagination().is_empty());

    let unrelated = request.sub_request("tags", false);
    assert!(unrelated.sort().is_empty());
    assert!(unrelated.pagination().is_empty());
}

#[test]
fn test_filter_inheritance() {
    let request = fetch("/articles?include=comments&filter[state]=published&filter[lang]=en");

    let with_filters = request.sub_request("comments", true);
    assert_eq!(with_filters.filters(), request.filters());

    let without_filters = request.sub_request("comments", false);
    assert!(without_filters.filters().is_empty());
}

#[test]
fn test_sub_request_for_not_included_relationship() {
    let request = fetch("/articles?include=comments");
    let author = request.sub_request("author", false);
    assert!(!author.requested_resource_body());
    assert!(!author.is_main_request());
    assert_eq!(author.path(), "author");
}

#[test]
fn test_bare_and_nested_include_of_same_relationship() {
    let request = fetch("/articles?include=comments,comments.author");
    let comments = request.sub_request("comments", false);
    assert!(comments.requested_resource_body());
    assert!(comments.requested_relationships());
    assert_eq!(comments.includes(), ["author".to_string()]);
}

#[test]
fn test_sub_requests_can_be_shared_across_threads() {
    let request = Arc::new(fetch("/articles?include=comments.author,tags"));

    let handles: Vec<_> = ["comments", "tags"]
        .into_iter()
        .map(|relationship| {
            let request = Arc::clone(&request);
            std::thread::spawn(move || request.sub_request(relationship, false))
        })
        .collect();

    for handle in handles {
        let sub_request = handle.join().unwrap();
        assert!(sub_request.requested_resource_body());
    }

    let comments = request.sub_request("comments", false);
    assert!(comments.requested_include("author"));
}

// ============================================================================
// Main Request Construction
// ============================================================================

#[test]
fn test_main_request_from_single_resource_uri() {
    let request = fetch("/articles/1?include=author");
    assert_eq!(request.resource_type(), Some("articles"));
    assert_eq!(request.id(), Some("1"));
    assert!(request.relationship().is_none());
}

#[test]
fn test_main_request_from_relationship_uri() {
    let request = fetch("/articles/1/relationships/tags");
    assert_eq!(request.relationship(), Some("tags"));
    assert!(request.only_identifiers());
}

#[test]
fn test_url_valued_filter_passes_through() {
    let request = fetch("/articles?filter[website]=https://example.com&include=author");
    assert_eq!(request.resource_type(), Some("articles"));
    assert_eq!(request.filter("website"), Some("https://example.com"));
    assert!(request.requested_include("author"));

    let author = request.sub_request("author", true);
    assert_eq!(author.filter("website"), Some("https://example.com"));
}

#[test]
fn test_fetch_request_rejects_body() {
    let http = HttpRequest::builder(HttpMethod::Get, "/articles")
        .json_body(&serde_json::json!({"data": null}))
        .build()
        .unwrap();
    let request = AdvancedRequest::with_document(
        http,
        &ServerConfig::default(),
        &jsonapi_server::JsonDocumentDeserializer,
    )
    .unwrap();
    assert!(FetchRequest::from_request(&request)
        .unwrap_err()
        .is_bad_request());
}

#[test]
fn test_new_matches_parsed_query() {
    let query = QueryParameters::parse("include=author&filter[x]=1");
    let request = FetchRequest::new("articles", Some("1".to_string()), &query);
    assert_eq!(request.includes(), query.include());
    assert_eq!(request.filter("x"), Some("1"));
}
