//! Client configuration.
//!
//! Build a `ClientConfig` in code, or load it from the environment with
//! `ClientConfig::from_env`, which also reads a `.env` file when present:
//!
//! | variable        | required | default                   |
//! |-----------------|----------|---------------------------|
//! | `VAIZ_API_KEY`  | yes      |                           |
//! | `VAIZ_SPACE_ID` | yes      |                           |
//! | `VAIZ_BASE_URL` | no       | `https://api.vaiz.com/v4` |
//! | `VAIZ_VERBOSE`  | no       | `false`                   |

use std::env;

use crate::error::{Result, VaizError};

pub const DEFAULT_BASE_URL: &str = "https://api.vaiz.com/v4";

/// Sent as the `app-version` header.
pub const DEFAULT_APP_VERSION: &str = "1.68.1";

pub const ENV_API_KEY: &str = "VAIZ_API_KEY";
pub const ENV_SPACE_ID: &str = "VAIZ_SPACE_ID";
pub const ENV_BASE_URL: &str = "VAIZ_BASE_URL";
pub const ENV_VERBOSE: &str = "VAIZ_VERBOSE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_key: String,
    pub space_id: String,
    pub base_url: String,
    /// Log request and response bodies at debug level.
    pub verbose: bool,
    pub app_version: String,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>, space_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            space_id: space_id.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            verbose: false,
            app_version: DEFAULT_APP_VERSION.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_app_version(mut self, app_version: impl Into<String>) -> Self {
        self.app_version = app_version.into();
        self
    }

    /// Load from the process environment after applying `.env`, if any.
    /// Variables already set in the environment win over the file.
    pub fn from_env() -> Result<Self> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!(error = %e, "ignoring unreadable .env file");
            }
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| VaizError::InvalidArgument(format!("{key} is not set")))
        };

        let mut config = Self::new(required(ENV_API_KEY)?, required(ENV_SPACE_ID)?);
        if let Some(base_url) = lookup(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            config.base_url = base_url;
        }
        config.verbose = lookup(ENV_VERBOSE).map(|v| parse_flag(&v)).unwrap_or(false);
        Ok(config)
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply() {
        let config = ClientConfig::from_lookup(lookup(&[(ENV_API_KEY, "k"), (ENV_SPACE_ID, "s")])).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.app_version, DEFAULT_APP_VERSION);
        assert!(!config.verbose);
    }

    #[test]
    fn overrides_apply() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_API_KEY, "k"),
            (ENV_SPACE_ID, "s"),
            (ENV_BASE_URL, "http://localhost:3000"),
            (ENV_VERBOSE, "TRUE"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "http://localhost:3000");
        assert!(config.verbose);
    }

    #[test]
    fn missing_or_blank_key_is_an_error() {
        let err = ClientConfig::from_lookup(lookup(&[(ENV_SPACE_ID, "s")])).unwrap_err();
        assert!(matches!(err, VaizError::InvalidArgument(ref m) if m == "VAIZ_API_KEY is not set"));

        let err = ClientConfig::from_lookup(lookup(&[(ENV_API_KEY, "k"), (ENV_SPACE_ID, "  ")])).unwrap_err();
        assert!(matches!(err, VaizError::InvalidArgument(_)));
    }

    #[test]
    fn flag_values() {
        assert!(parse_flag("1"));
        assert!(parse_flag(" yes "));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("nope"));
    }

    #[test]
    fn dotenv_file_is_readable_as_lookup() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{ENV_API_KEY}=from-file\n{ENV_SPACE_ID}=space-1\n{ENV_VERBOSE}=1").unwrap();
        let vars: HashMap<String, String> = dotenvy::from_path_iter(file.path())
            .unwrap()
            .map(|item| item.unwrap())
            .collect();
        let config = ClientConfig::from_lookup(move |key| vars.get(key).cloned()).unwrap();
        assert_eq!(config.api_key, "from-file");
        assert_eq!(config.space_id, "space-1");
        assert!(config.verbose);
    }
}
