//! Configuration for the interpretation layer.

use std::path::PathBuf;

/// Default Gemini model.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Default Gemini REST endpoint (without the model path).
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Environment variables checked, in order, for the provider key.
pub const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Configuration for interpretation and casting.
#[derive(Debug, Clone)]
pub struct OracleConfig {
    /// Provider credential. Without one, interpretations use fallback content.
    pub api_key: Option<String>,
    /// Model name passed to the provider.
    pub model: String,
    /// Base URL of the provider's model API.
    pub endpoint: String,
    /// Cache file. `None` uses the user cache directory.
    pub cache_path: Option<PathBuf>,
    /// RNG seed for reproducible castings. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            cache_path: None,
            seed: None,
        }
    }
}

impl OracleConfig {
    /// Read configuration from the environment.
    ///
    /// The key comes from `GEMINI_API_KEY` or `API_KEY`; `YJ_MODEL` and
    /// `YJ_CACHE` override the model and cache file. Empty values are ignored.
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());

        let defaults = Self::default();
        Self {
            api_key: API_KEY_VARS.iter().find_map(|name| var(name)),
            model: var("YJ_MODEL").unwrap_or(defaults.model),
            cache_path: var("YJ_CACHE").map(PathBuf::from),
            ..defaults
        }
    }

    /// Set the provider key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Drop the provider key, forcing fallback interpretations.
    pub fn offline(mut self) -> Self {
        self.api_key = None;
        self
    }

    /// Set the model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the provider endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the cache file.
    pub fn with_cache_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.cache_path = Some(path.into());
        self
    }

    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The cache file to use: the configured one, or `yijing/cache.json`
    /// under the user cache directory.
    pub fn resolved_cache_path(&self) -> Option<PathBuf> {
        self.cache_path
            .clone()
            .or_else(|| dirs::cache_dir().map(|dir| dir.join("yijing").join("cache.json")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = OracleConfig::default();
        assert!(cfg.api_key.is_none());
        assert_eq!(cfg.model, DEFAULT_MODEL);
        assert_eq!(cfg.endpoint, DEFAULT_ENDPOINT);
        assert!(cfg.seed.is_none());
    }

    #[test]
    fn builder_methods() {
        let cfg = OracleConfig::default()
            .with_api_key("k")
            .with_model("m")
            .with_endpoint("http://localhost")
            .with_cache_path("/tmp/c.json")
            .with_seed(7);
        assert_eq!(cfg.api_key.as_deref(), Some("k"));
        assert_eq!(cfg.model, "m");
        assert_eq!(cfg.endpoint, "http://localhost");
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.resolved_cache_path(), Some(PathBuf::from("/tmp/c.json")));
    }

    #[test]
    fn offline_drops_key() {
        let cfg = OracleConfig::default().with_api_key("k").offline();
        assert!(cfg.api_key.is_none());
    }
}
