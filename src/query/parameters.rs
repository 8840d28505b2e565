//! Parsing of JSON:API query parameters.

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Direction of a sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order (no prefix).
    Ascending,
    /// Descending order (`-` prefix).
    Descending,
}

/// A single entry of the `sort` parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortField {
    /// The field (or dotted relationship field) to sort by.
    pub field: String,
    /// The requested direction.
    pub direction: SortDirection,
}

impl SortField {
    /// Parses one comma-separated `sort` entry.
    ///
    /// Returns `None` for an empty entry.
    fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let (field, direction) = match raw.strip_prefix('-') {
            Some(field) => (field, SortDirection::Descending),
            None => (raw, SortDirection::Ascending),
        };
        if field.is_empty() {
            return None;
        }
        Some(Self {
            field: field.to_string(),
            direction,
        })
    }
}

/// Immutable snapshot of the JSON:API parameters in a query string.
///
/// # Example
///
/// ```rust
/// use jsonapi_server::query::{QueryParameters, SortDirection};
///
/// let query = QueryParameters::parse(
///     "fields[articles]=title,body&include=comments.author&sort=-created&page[limit]=10&filter[state]=draft",
/// );
///
/// assert!(query.fields("articles").unwrap().contains("title"));
/// assert_eq!(query.include(), ["comments.author".to_string()]);
/// assert_eq!(query.sort()[0].direction, SortDirection::Descending);
/// assert_eq!(query.page().get("limit").map(String::as_str), Some("10"));
/// assert_eq!(query.filter().get("state").map(String::as_str), Some("draft"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParameters {
    fields: BTreeMap<String, BTreeSet<String>>,
    include: Vec<String>,
    sort: Vec<SortField>,
    page: BTreeMap<String, String>,
    filter: BTreeMap<String, String>,
}

impl QueryParameters {
    /// Parses a raw query string (without the leading `?`).
    ///
    /// Keys and values are percent-decoded with `+` read as a space. A
    /// repeated `fields[<type>]`, `include` or `sort` parameter is merged with
    /// the earlier occurrence; a repeated `page` or `filter` key keeps the
    /// last value.
    #[must_use]
    pub fn parse(query: &str) -> Self {
        let mut parameters = Self::default();

        for pair in query.split('&').filter(|pair| !pair.is_empty()) {
            let (raw_key, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
            let key = decode(raw_key);
            let value = decode(raw_value);

            match bracketed(&key) {
                Some(("fields", resource_type)) => {
                    let fields = parameters
                        .fields
                        .entry(resource_type.to_string())
                        .or_default();
                    fields.extend(split_list(&value).map(ToString::to_string));
                }
                Some(("page", name)) => {
                    parameters.page.insert(name.to_string(), value.into_owned());
                }
                Some(("filter", name)) => {
                    parameters
                        .filter
                        .insert(name.to_string(), value.into_owned());
                }
                Some(_) => {}
                None => match key.as_ref() {
                    "include" => parameters.push_includes(&value),
                    "sort" => parameters.push_sort(&value),
                    _ => {}
                },
            }
        }

        parameters
    }

    fn push_includes(&mut self, value: &str) {
        for path in split_list(value) {
            if path.split('.').any(str::is_empty) {
                continue;
            }
            if !self.include.iter().any(|existing| existing == path) {
                self.include.push(path.to_string());
            }
        }
    }

    fn push_sort(&mut self, value: &str) {
        for field in value.split(',').filter_map(SortField::parse) {
            if !self.sort.iter().any(|existing| existing.field == field.field) {
                self.sort.push(field);
            }
        }
    }

    /// Returns the requested fields for a type, or `None` when the client
    /// did not restrict that type.
    #[must_use]
    pub fn fields(&self, resource_type: &str) -> Option<&BTreeSet<String>> {
        self.fields.get(resource_type)
    }

    /// Returns all sparse fieldsets keyed by type.
    #[must_use]
    pub const fn all_fields(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.fields
    }

    /// Returns the include paths in request order.
    #[must_use]
    pub fn include(&self) -> &[String] {
        &self.include
    }

    /// Returns the sort keys in request order.
    #[must_use]
    pub fn sort(&self) -> &[SortField] {
        &self.sort
    }

    /// Returns the pagination parameters.
    #[must_use]
    pub const fn page(&self) -> &BTreeMap<String, String> {
        &self.page
    }

    /// Returns the filter parameters.
    #[must_use]
    pub const fn filter(&self) -> &BTreeMap<String, String> {
        &self.filter
    }
}

fn decode(raw: &str) -> Cow<'_, str> {
    if !raw.contains(['%', '+']) {
        return Cow::Borrowed(raw);
    }
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => Cow::Owned(decoded.into_owned()),
        Err(_) => Cow::Owned(spaced),
    }
}

/// Splits `name[inner]` into `("name", "inner")`.
fn bracketed(key: &str) -> Option<(&str, &str)> {
    let (name, rest) = key.split_once('[')?;
    let inner = rest.strip_suffix(']')?;
    if name.is_empty() || inner.is_empty() || inner.contains(['[', ']']) {
        return None;
    }
    Some((name, inner))
}

fn split_list(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).filter(|item| !item.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_has_no_parameters() {
        let query = QueryParameters::parse("");
        assert_eq!(query, QueryParameters::default());
    }

    #[test]
    fn test_fields_are_scoped_by_type() {
        let query = QueryParameters::parse("fields[articles]=title,body&fields[people]=name");
        let articles = query.fields("articles").unwrap();
        assert_eq!(articles.len(), 2);
        assert!(articles.contains("body"));
        assert!(query.fields("people").unwrap().contains("name"));
        assert!(query.fields("comments").is_none());
    }

    #[test]
    fn test_empty_fieldset_is_kept() {
        let query = QueryParameters::parse("fields[articles]=");
        assert!(query.fields("articles").unwrap().is_empty());
    }

    #[test]
    fn test_encoded_brackets_are_decoded() {
        let query = QueryParameters::parse("fields%5Barticles%5D=title%2Cbody");
        assert!(query.fields("articles").unwrap().contains("body"));
    }

    #[test]
    fn test_include_skips_empty_entries_and_duplicates() {
        let query = QueryParameters::parse("include=a.b,,a.b,c&include=d,a..x");
        assert_eq!(query.include(), ["a.b", "c", "d"].map(String::from));
    }

    #[test]
    fn test_sort_directions() {
        let query = QueryParameters::parse("sort=-created,title,-created");
        assert_eq!(
            query.sort(),
            [
                SortField {
                    field: "created".to_string(),
                    direction: SortDirection::Descending,
                },
                SortField {
                    field: "title".to_string(),
                    direction: SortDirection::Ascending,
                },
            ]
        );
    }

    #[test]
    fn test_page_and_filter_keep_last_value() {
        let query =
            QueryParameters::parse("page[offset]=0&page[offset]=20&filter[name]=Jane+Doe");
        assert_eq!(query.page().get("offset").map(String::as_str), Some("20"));
        assert_eq!(
            query.filter().get("name").map(String::as_str),
            Some("Jane Doe")
        );
    }

    #[test]
    fn test_unknown_and_malformed_parameters_are_ignored() {
        let query = QueryParameters::parse("foo=bar&fields=title&page[]=1&filter[a][b]=c&%zz=1");
        assert_eq!(query, QueryParameters::default());
    }

    #[test]
    fn test_parsing_is_deterministic() {
        let raw = "include=b,a&fields[x]=2,1&filter[k]=v";
        assert_eq!(QueryParameters::parse(raw), QueryParameters::parse(raw));
    }
}
