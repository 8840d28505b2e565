//! Query parameter model.
//!
//! Parses the JSON:API query string conventions into [`QueryParameters`]:
//!
//! | Parameter | Example | Parsed into |
//! |-----------|---------|-------------|
//! | `fields[<type>]` | `fields[articles]=title,body` | type-scoped field sets |
//! | `include` | `include=comments.author,tags` | ordered include paths |
//! | `sort` | `sort=-created,title` | [`SortField`] list |
//! | `page[<key>]` | `page[offset]=20` | opaque key/value pairs |
//! | `filter[<key>]` | `filter[state]=published` | opaque key/value pairs |
//!
//! Unknown parameters are ignored. Parsing never fails.
//!
//! The include matching rules used by
//! [`FetchRequest`](crate::request::FetchRequest) live in this module as pure
//! functions over include path lists.

mod include;
mod parameters;

pub use include::{is_included, strip_include_prefix};
pub use parameters::{QueryParameters, SortDirection, SortField};
