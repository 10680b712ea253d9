//! Pipeline configuration.

use marquee_error::ConfigError;
use marquee_models::OPENAI_CHAT_URL;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "MARQUEE";

/// Per-group completion token limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaxTokens {
    /// Headlines and event titles
    #[serde(default = "default_headline_tokens")]
    pub headlines: u32,
    /// Promotion and event descriptions
    #[serde(default = "default_description_tokens")]
    pub descriptions: u32,
    /// Promotion and event keywords
    #[serde(default = "default_keyword_tokens")]
    pub keywords: u32,
    /// Terms and event guidelines
    #[serde(default = "default_terms_tokens")]
    pub terms: u32,
    /// Image analysis
    #[serde(default = "default_analysis_tokens")]
    pub analysis: u32,
}

impl Default for MaxTokens {
    fn default() -> Self {
        Self {
            headlines: default_headline_tokens(),
            descriptions: default_description_tokens(),
            keywords: default_keyword_tokens(),
            terms: default_terms_tokens(),
            analysis: default_analysis_tokens(),
        }
    }
}

/// Settings for [`CopyService`](crate::CopyService).
///
/// Every field has a default, so an empty TOML file is a valid configuration.
///
/// # Examples
///
/// ```
/// use marquee_copy::CopyConfig;
///
/// let config = CopyConfig::default();
/// assert_eq!(config.model, "gpt-4o-mini");
/// assert_eq!(config.max_tokens.descriptions, 700);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct CopyConfig {
    /// Provider API key; without one the service only serves fallbacks
    #[serde(default)]
    pub api_key: Option<String>,
    /// Chat completions URL
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Model for text generation
    #[serde(default = "default_model")]
    pub model: String,
    /// Model for image analysis
    #[serde(default = "default_model")]
    pub vision_model: String,
    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Per-request HTTP timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// Lifetime of cached results in seconds
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,
    /// Upper bound on cached results
    #[serde(default = "default_cache_max_entries")]
    pub cache_max_entries: usize,
    /// Age after which an in-flight request is no longer shared
    #[serde(default = "default_pending_timeout")]
    pub pending_timeout_secs: u64,
    /// Period of the maintenance task
    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval_secs: u64,
    /// Token limits
    #[serde(default)]
    pub max_tokens: MaxTokens,
}

impl Default for CopyConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            model: default_model(),
            vision_model: default_model(),
            temperature: default_temperature(),
            request_timeout_secs: default_request_timeout(),
            cache_ttl_secs: default_cache_ttl(),
            cache_max_entries: default_cache_max_entries(),
            pending_timeout_secs: default_pending_timeout(),
            cleanup_interval_secs: default_cleanup_interval(),
            max_tokens: MaxTokens::default(),
        }
    }
}

impl std::fmt::Debug for CopyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CopyConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("vision_model", &self.vision_model)
            .field("temperature", &self.temperature)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("cache_ttl_secs", &self.cache_ttl_secs)
            .field("cache_max_entries", &self.cache_max_entries)
            .field("pending_timeout_secs", &self.pending_timeout_secs)
            .field("cleanup_interval_secs", &self.cleanup_interval_secs)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl CopyConfig {
    /// Load configuration from an optional TOML file and the environment.
    ///
    /// Sources, lowest precedence first: built-in defaults, the file at
    /// `path` (required when given), then `MARQUEE_*` variables with `__`
    /// separating nested keys (e.g. `MARQUEE_MAX_TOKENS__HEADLINES`). A
    /// missing `api_key` is taken from `OPENAI_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, a value has the wrong
    /// type, or [`validate`](Self::validate) rejects the result.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            debug!(path = %path.display(), "Loading configuration file");
            builder = builder.add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(true),
            );
        }
        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let mut loaded: Self = builder
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| ConfigError::new(format!("Failed to load configuration: {}", e)))?;

        if loaded.api_key.as_deref().is_none_or(|key| key.trim().is_empty()) {
            loaded.api_key = std::env::var("OPENAI_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty());
        }

        loaded.validate()?;
        Ok(loaded)
    }

    /// Parse configuration from TOML text without consulting the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML for this type or the
    /// values fail validation.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let parsed: Self = config::Config::builder()
            .add_source(config::File::from_str(text, config::FileFormat::Toml))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| ConfigError::new(format!("Invalid configuration: {}", e)))?;
        parsed.validate()?;
        Ok(parsed)
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first invalid field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::invalid_field(
                "temperature",
                format!("must be between 0 and 2, got {}", self.temperature),
            ));
        }
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::invalid_field("base_url", "must not be empty"));
        }
        for (name, value) in [
            ("request_timeout_secs", self.request_timeout_secs),
            ("pending_timeout_secs", self.pending_timeout_secs),
            ("cleanup_interval_secs", self.cleanup_interval_secs),
        ] {
            if value == 0 {
                return Err(ConfigError::invalid_field(name, "must be greater than 0"));
            }
        }
        Ok(())
    }

    /// Whether a non-empty API key is configured.
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }

    /// HTTP timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Cache entry lifetime.
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Coalescer staleness threshold.
    pub fn pending_timeout(&self) -> Duration {
        Duration::from_secs(self.pending_timeout_secs)
    }

    /// Maintenance task period.
    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_secs)
    }
}

fn default_base_url() -> String {
    OPENAI_CHAT_URL.to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_temperature() -> f32 {
    0.8
}

fn default_request_timeout() -> u64 {
    30
}

fn default_cache_ttl() -> u64 {
    300
}

fn default_cache_max_entries() -> usize {
    256
}

fn default_pending_timeout() -> u64 {
    30
}

fn default_cleanup_interval() -> u64 {
    300
}

fn default_headline_tokens() -> u32 {
    200
}

fn default_description_tokens() -> u32 {
    700
}

fn default_keyword_tokens() -> u32 {
    200
}

fn default_terms_tokens() -> u32 {
    500
}

fn default_analysis_tokens() -> u32 {
    500
}
