// SPDX-License-Identifier: GPL-3.0-or-later
use std::path::Path;

use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::info;

pub const DEFAULT_SEARCH_URL: &str = "https://itunes.apple.com/search";
pub const DEFAULT_LOOKUP_URL: &str = "https://itunes.apple.com/lookup";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientConfig {
    pub search_url: String,
    pub lookup_url: String,
    pub timeout_secs: u64,
    /// Replaces the built-in `User-Agent` header when set.
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            search_url: DEFAULT_SEARCH_URL.to_string(),
            lookup_url: DEFAULT_LOOKUP_URL.to_string(),
            timeout_secs: 30,
            user_agent: None,
        }
    }
}

/// Filters applied to searches that leave them unset.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SearchDefaults {
    pub country: Option<String>,
    pub lang: Option<String>,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ItunesConfig {
    pub client: ClientConfig,
    pub defaults: SearchDefaults,
}

/// Load configuration from defaults, optional TOML file, and environment overrides (prefix: ITUNES_).
pub fn load(config_path: Option<&Path>) -> Result<ItunesConfig> {
    let mut figment = Figment::from(Serialized::defaults(ItunesConfig::default()));

    if let Some(path) = config_path {
        figment = figment.merge(Toml::file(path));
    }

    figment = figment.merge(Env::prefixed("ITUNES_").split("__"));

    let config: ItunesConfig = figment.extract()?;
    info!(target: "config", "configuration loaded");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults_without_file() {
        Jail::expect_with(|_jail| {
            let config = load(None).map_err(|e| e.to_string())?;
            assert_eq!(config, ItunesConfig::default());
            assert_eq!(config.client.search_url, DEFAULT_SEARCH_URL);
            assert_eq!(config.client.timeout_secs, 30);
            Ok(())
        });
    }

    #[test]
    fn test_toml_file_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "itunes.toml",
                r#"
                [client]
                timeout_secs = 5
                user_agent = "my-app/1.0"

                [defaults]
                country = "GB"
                limit = 25
                "#,
            )?;

            let config = load(Some(Path::new("itunes.toml"))).map_err(|e| e.to_string())?;
            assert_eq!(config.client.timeout_secs, 5);
            assert_eq!(config.client.user_agent.as_deref(), Some("my-app/1.0"));
            assert_eq!(config.client.lookup_url, DEFAULT_LOOKUP_URL);
            assert_eq!(config.defaults.country.as_deref(), Some("GB"));
            assert_eq!(config.defaults.limit, Some(25));
            assert_eq!(config.defaults.lang, None);
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("itunes.toml", "[client]\ntimeout_secs = 5\n")?;
            jail.set_env("ITUNES_CLIENT__TIMEOUT_SECS", "9");
            jail.set_env("ITUNES_CLIENT__SEARCH_URL", "http://127.0.0.1:9000/search");

            let config = load(Some(Path::new("itunes.toml"))).map_err(|e| e.to_string())?;
            assert_eq!(config.client.timeout_secs, 9);
            assert_eq!(config.client.search_url, "http://127.0.0.1:9000/search");
            Ok(())
        });
    }

    #[test]
    fn test_invalid_value_is_an_error() {
        Jail::expect_with(|jail| {
            jail.set_env("ITUNES_CLIENT__TIMEOUT_SECS", "soon");
            assert!(load(None).is_err());
            Ok(())
        });
    }
}
