//! Prefix matching over dot-separated include paths.

const SEPARATOR: char = '.';

/// Returns `true` if `relationship` is included by any of `paths`.
///
/// A relationship is included when it equals one of the paths or is a
/// dot-segment prefix of one, so `comments.author` includes both
/// `comments` and `comments.author` but not `comment`.
///
/// # Example
///
/// ```rust
/// use jsonapi_server::query::is_included;
///
/// let paths = vec!["comments.author".to_string()];
/// assert!(is_included(&paths, "comments"));
/// assert!(is_included(&paths, "comments.author"));
/// assert!(!is_included(&paths, "comment"));
/// assert!(!is_included(&paths, "author"));
/// ```
#[must_use]
pub fn is_included(paths: &[String], relationship: &str) -> bool {
    !relationship.is_empty()
        && paths.iter().any(|path| {
            path == relationship
                || path
                    .strip_prefix(relationship)
                    .is_some_and(|rest| rest.starts_with(SEPARATOR))
        })
}

/// Returns the remainder of every path that continues below `relationship`.
///
/// Paths equal to `relationship` contribute nothing; paths on other branches
/// are dropped. Order is preserved and duplicates are removed.
///
/// # Example
///
/// ```rust
/// use jsonapi_server::query::strip_include_prefix;
///
/// let paths = vec![
///     "comments".to_string(),
///     "comments.author".to_string(),
///     "comments.author.avatar".to_string(),
///     "tags".to_string(),
/// ];
/// assert_eq!(
///     strip_include_prefix(&paths, "comments"),
///     vec!["author".to_string(), "author.avatar".to_string()]
/// );
/// ```
#[must_use]
pub fn strip_include_prefix(paths: &[String], relationship: &str) -> Vec<String> {
    let mut remaining: Vec<String> = Vec::new();
    for path in paths {
        let Some(rest) = path
            .strip_prefix(relationship)
            .and_then(|rest| rest.strip_prefix(SEPARATOR))
        else {
            continue;
        };
        if !rest.is_empty() && !remaining.iter().any(|existing| existing == rest) {
            remaining.push(rest.to_string());
        }
    }
    remaining
}
