//! Configuration types for the request layer.
//!
//! - [`ServerConfig`]: settings shared by every request of one server
//! - [`ServerConfigBuilder`]: builder for [`ServerConfig`]
//! - [`ApiPrefix`]: a validated path prefix stripped before routing
//! - [`BaseUrl`]: a validated absolute URL used for link building
//!
//! # Example
//!
//! ```rust
//! use jsonapi_server::{ApiPrefix, BaseUrl, ServerConfig};
//!
//! let config = ServerConfig::builder()
//!     .api_prefix(ApiPrefix::new("/api").unwrap())
//!     .base_url(BaseUrl::new("https://example.com").unwrap())
//!     .build();
//!
//! assert_eq!(config.link("/articles/1"), "https://example.com/api/articles/1");
//! ```

mod newtypes;

pub use newtypes::{ApiPrefix, BaseUrl};

/// Configuration for interpreting inbound requests.
///
/// The default configuration has no API prefix and no base URL, in which
/// case links are rendered relative to the server root.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ServerConfig {
    api_prefix: Option<ApiPrefix>,
    base_url: Option<BaseUrl>,
}

impl ServerConfig {
    /// Creates a new builder for constructing a `ServerConfig`.
    #[must_use]
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::new()
    }

    /// Returns the API prefix, if configured.
    #[must_use]
    pub const fn api_prefix(&self) -> Option<&ApiPrefix> {
        self.api_prefix.as_ref()
    }

    /// Returns the base URL, if configured.
    #[must_use]
    pub const fn base_url(&self) -> Option<&BaseUrl> {
        self.base_url.as_ref()
    }

    /// Builds a link for a path relative to the API root.
    ///
    /// The result is `<base_url><api_prefix><path>`; either part is left out
    /// when not configured.
    #[must_use]
    pub fn link(&self, path: &str) -> String {
        let mut link = String::new();
        if let Some(base_url) = &self.base_url {
            link.push_str(base_url.as_ref());
        }
        if let Some(prefix) = &self.api_prefix {
            link.push_str(prefix.as_ref());
        }
        if !path.starts_with('/') {
            link.push('/');
        }
        link.push_str(path);
        link
    }
}

// Verify ServerConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ServerConfig>();
};

/// Builder for constructing [`ServerConfig`] instances.
///
/// All fields are optional.
#[derive(Debug, Default)]
pub struct ServerConfigBuilder {
    api_prefix: Option<ApiPrefix>,
    base_url: Option<BaseUrl>,
}

impl ServerConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API prefix stripped from request paths.
    #[must_use]
    pub fn api_prefix(mut self, prefix: ApiPrefix) -> Self {
        self.api_prefix = Some(prefix);
        self
    }

    /// Sets the base URL used for absolute links.
    #[must_use]
    pub fn base_url(mut self, url: BaseUrl) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Builds the [`ServerConfig`].
    #[must_use]
    pub fn build(self) -> ServerConfig {
        ServerConfig {
            api_prefix: self.api_prefix,
            base_url: self.base_url,
        }
    }
}
