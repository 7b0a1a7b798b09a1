//! Client configuration.
//!
//! Configuration is read from TOML:
//!
//! ```toml
//! [api]
//! base_url = "https://sitebook.example.com/api"
//! timeout_secs = 30
//! max_retries = 3
//!
//! [typeahead]
//! min_chars = 1
//! max_rendered = 50
//! gutter = 6.0
//! min_width = 260.0
//! ```
//!
//! Every key is optional. The `SITEBOOK_API_URL` environment variable, when
//! set, replaces `api.base_url`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use sitebook_core::AppContext;
use sitebook_core::logging::targets;
use sitebook_net::{ApiError, HttpClient, RestApiClient, RetryConfig, SitebookApi};

use crate::typeahead::{
    DEFAULT_GUTTER, DEFAULT_MAX_RENDERED, DEFAULT_MIN_CHARS, DEFAULT_MIN_WIDTH, OverlayPlacement,
    TypeaheadOptions,
};

/// Environment variable overriding the API base URL.
pub const API_URL_ENV: &str = "SITEBOOK_API_URL";

/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors raised while loading or applying configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML did not parse or did not match the expected shape.
    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value parsed but is out of range.
    #[error("Invalid value for '{field}': {message}")]
    Invalid {
        field: &'static str,
        message: String,
    },

    /// The REST client could not be built from the configuration.
    #[error("Failed to build API client: {0}")]
    Api(#[from] ApiError),
}

impl ConfigError {
    fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            message: message.into(),
        }
    }
}

/// `[api]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub retry_initial_delay_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".to_string(),
            timeout_secs: 30,
            max_retries: RetryConfig::default().max_retries,
            retry_initial_delay_ms: RetryConfig::default().initial_delay_ms,
        }
    }
}

impl ApiConfig {
    /// Retry policy derived from this section.
    pub fn retry_config(&self) -> RetryConfig {
        RetryConfig {
            max_retries: self.max_retries,
            initial_delay_ms: self.retry_initial_delay_ms,
            ..RetryConfig::default()
        }
    }
}

/// `[typeahead]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeaheadConfig {
    pub min_chars: usize,
    pub max_rendered: usize,
    pub gutter: f32,
    pub min_width: f32,
}

impl Default for TypeaheadConfig {
    fn default() -> Self {
        Self {
            min_chars: DEFAULT_MIN_CHARS,
            max_rendered: DEFAULT_MAX_RENDERED,
            gutter: DEFAULT_GUTTER,
            min_width: DEFAULT_MIN_WIDTH,
        }
    }
}

impl TypeaheadConfig {
    /// Overlay options with these settings.
    pub fn options(&self) -> TypeaheadOptions {
        TypeaheadOptions::default()
            .min_chars(self.min_chars)
            .max_rendered(self.max_rendered)
            .placement(
                OverlayPlacement::default()
                    .with_gutter(self.gutter)
                    .with_min_width(self.min_width),
            )
    }
}

/// Complete client configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api: ApiConfig,
    pub typeahead: TypeaheadConfig,
}

impl ClientConfig {
    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(target: targets::CONFIG, path = %path.display(), "loading config");
        Self::from_toml_str(&text)
    }

    /// Apply overrides looked up by variable name.
    ///
    /// Blank values are ignored.
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(API_URL_ENV).filter(|url| !url.trim().is_empty()) {
            tracing::debug!(target: targets::CONFIG, env = API_URL_ENV, "base URL overridden");
            self.api.base_url = url.trim().to_string();
        }
        self.validate()?;
        Ok(self)
    }

    /// Apply overrides from the process environment.
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides_from(|name| std::env::var(name).ok())
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        let base = self.api.base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::invalid(
                "api.base_url",
                format!("'{base}' is not an http(s) URL"),
            ));
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::invalid("api.timeout_secs", "must be at least 1"));
        }
        if self.typeahead.max_rendered == 0 {
            return Err(ConfigError::invalid("typeahead.max_rendered", "must be at least 1"));
        }
        if !self.typeahead.gutter.is_finite() || self.typeahead.gutter < 0.0 {
            return Err(ConfigError::invalid("typeahead.gutter", "must be a non-negative number"));
        }
        if !self.typeahead.min_width.is_finite() || self.typeahead.min_width < 0.0 {
            return Err(ConfigError::invalid(
                "typeahead.min_width",
                "must be a non-negative number",
            ));
        }
        Ok(())
    }

    /// Build the REST client.
    ///
    /// Requests carry the bearer token held by `ctx`'s session at the time
    /// each request is sent.
    pub fn build_client(&self, ctx: &AppContext) -> Result<RestApiClient> {
        let http = HttpClient::builder().timeout(Duration::from_secs(self.api.timeout_secs));
        let client = RestApiClient::builder(self.api.base_url.trim())
            .http_client_builder(http)
            .json_api()
            .session_auth(ctx.session().clone())
            .retry(self.api.retry_config())
            .build()?;
        Ok(client)
    }

    /// Build the typed backend API bound to `ctx`.
    pub fn build_api(&self, ctx: &AppContext) -> Result<SitebookApi> {
        Ok(SitebookApi::new(self.build_client(ctx)?, ctx.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::from_toml_str("").unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.typeahead.min_chars, 1);
        assert_eq!(config.typeahead.max_rendered, 50);
        assert_eq!(config.typeahead.gutter, 6.0);
        assert_eq!(config.typeahead.min_width, 260.0);
    }

    #[test]
    fn test_partial_section() {
        let config = ClientConfig::from_toml_str(
            r#"
            [typeahead]
            min_chars = 2
            "#,
        )
        .unwrap();
        assert_eq!(config.typeahead.min_chars, 2);
        assert_eq!(config.typeahead.max_rendered, 50);
    }

    #[test]
    fn test_rejects_bad_url() {
        let err = ClientConfig::from_toml_str("[api]\nbase_url = \"ftp://x\"").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "api.base_url", .. }));
    }

    #[test]
    fn test_rejects_wrong_type() {
        let err = ClientConfig::from_toml_str("[api]\ntimeout_secs = \"soon\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_override_lookup() {
        let config = ClientConfig::default()
            .with_overrides_from(|name| {
                (name == API_URL_ENV).then(|| " https://api.example.com ".to_string())
            })
            .unwrap();
        assert_eq!(config.api.base_url, "https://api.example.com");

        let unchanged = ClientConfig::default()
            .with_overrides_from(|_| Some("   ".to_string()))
            .unwrap();
        assert_eq!(unchanged.api.base_url, ApiConfig::default().base_url);
    }

    #[test]
    fn test_typeahead_options() {
        let mut config = ClientConfig::default();
        config.typeahead.gutter = 10.0;
        let options = config.typeahead.options();
        assert_eq!(options.placement.gutter, 10.0);
        assert_eq!(options.min_chars, 1);
    }
}
