//! Validated newtype wrappers for configuration values.
//!
//! Invalid values are rejected on construction with a [`ConfigError`].

use crate::error::ConfigError;

/// A validated API path prefix such as `/api` or `/api/v1`.
///
/// The prefix is normalized to start with a single `/` and to carry no
/// trailing slash, so `api/`, `/api` and `//api//` all become `/api`.
///
/// # Example
///
/// ```rust
/// use jsonapi_server::ApiPrefix;
///
/// let prefix = ApiPrefix::new("api/v1/").unwrap();
/// assert_eq!(prefix.as_ref(), "/api/v1");
/// assert_eq!(prefix.strip("/api/v1/articles/1"), Some("/articles/1"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiPrefix(String);

impl ApiPrefix {
    /// Creates a new validated API prefix.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiPrefix`] if nothing but slashes remain,
    /// and [`ConfigError::InvalidApiPrefix`] if the prefix contains a query,
    /// fragment or whitespace.
    pub fn new(prefix: impl Into<String>) -> Result<Self, ConfigError> {
        let prefix = prefix.into();
        let trimmed = prefix.trim().trim_matches('/');
        if trimmed.is_empty() {
            return Err(ConfigError::EmptyApiPrefix);
        }
        if trimmed.contains(['?', '#']) || trimmed.contains(char::is_whitespace) {
            return Err(ConfigError::InvalidApiPrefix { prefix });
        }
        Ok(Self(format!("/{trimmed}")))
    }

    /// Strips this prefix from a request path.
    ///
    /// Matching is segment-aware: `/api` strips `/api/articles` but not
    /// `/apis/articles`. Returns `None` when the path does not start with
    /// the prefix.
    #[must_use]
    pub fn strip<'a>(&self, path: &'a str) -> Option<&'a str> {
        let rest = path.strip_prefix(self.0.as_str())?;
        if rest.is_empty() || rest.starts_with('/') {
            Some(rest)
        } else {
            None
        }
    }
}

impl AsRef<str> for ApiPrefix {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A validated absolute base URL used when building links.
///
/// Trailing slashes are removed so paths can be appended directly.
///
/// # Example
///
/// ```rust
/// use jsonapi_server::BaseUrl;
///
/// let url = BaseUrl::new("https://api.example.com/").unwrap();
/// assert_eq!(url.as_ref(), "https://api.example.com");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseUrl {
    url: String,
}

impl BaseUrl {
    /// Creates a new validated base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the URL has no scheme or host,
    /// or carries a query string or fragment.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();
        let invalid = || ConfigError::InvalidBaseUrl { url: url.clone() };

        let scheme_end = url.find("://").ok_or_else(invalid)?;
        let scheme = &url[..scheme_end];
        if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(invalid());
        }
        if url.contains(['?', '#']) {
            return Err(invalid());
        }

        let authority = &url[scheme_end + 3..];
        if authority.is_empty() || authority.starts_with([':', '/']) {
            return Err(invalid());
        }

        Ok(Self { url })
    }
}

impl AsRef<str> for BaseUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}
