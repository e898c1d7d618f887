use serde::{Deserialize, Serialize};
use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};
use thiserror::Error;
use url::Url;

pub const ENV_ENDPOINT: &str = "PERFUME_FORM_ENDPOINT";
pub const ENV_LIST_ENDPOINT: &str = "PERFUME_FORM_LIST_ENDPOINT";
pub const ENV_TOKEN: &str = "PERFUME_FORM_TOKEN";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0}")]
    IoError(#[from] io::Error),
    #[error("{0}")]
    SerdeJsonError(#[from] serde_json::Error),
    #[error("invalid URL in {var}: {source}")]
    InvalidUrl {
        var: &'static str,
        source: url::ParseError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where new records are posted.
    pub endpoint: Url,
    /// The list that gets refreshed after a successful add.
    pub list_endpoint: Url,
    /// Sent verbatim as the `Authorization` header.
    pub auth_token: Option<String>,
    pub notification_ms: u64,
    pub request_timeout_secs: u64,
}

#[allow(clippy::expect_used)]
impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: Url::parse("http://localhost:8080/api/v1/admin/add")
                .expect("default endpoint is a valid URL"),
            list_endpoint: Url::parse("http://localhost:8080/api/v1/perfumes")
                .expect("default list endpoint is a valid URL"),
            auth_token: None,
            notification_ms: 5000,
            request_timeout_secs: 30,
        }
    }
}

impl Config {
    /// `<config dir>/perfume-form/config.json`, if the platform has a config dir.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("perfume-form").join("config.json"))
    }

    /// Loads from [`Self::default_path`], then applies environment overrides.
    ///
    /// # Errors
    /// See [`Self::load_from`] and [`Self::apply_env`].
    pub fn load() -> Result<Self, ConfigError> {
        let config = match Self::default_path() {
            Some(path) => Self::load_from(&path)?,
            None => {
                log::warn!("no config directory on this platform, using defaults");
                Self::default()
            }
        };
        config.apply_env(|var| std::env::var(var).ok())
    }

    /// A missing file just gives the defaults.
    ///
    /// # Errors
    /// - If the file exists but can't be read
    /// - If it isn't valid JSON for a [`Config`]
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(text) => {
                log::debug!("loading config from {}", path.display());
                Ok(serde_json::from_str(&text)?)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::debug!("{} not found, using defaults", path.display());
                Ok(Self::default())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Overrides endpoints and token from the environment (or whatever `lookup` reads).
    ///
    /// # Errors
    /// If an endpoint override isn't a valid URL.
    pub fn apply_env(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let parse = |var: &'static str, raw: String| {
            Url::parse(&raw).map_err(|source| ConfigError::InvalidUrl { var, source })
        };

        if let Some(raw) = lookup(ENV_ENDPOINT) {
            self.endpoint = parse(ENV_ENDPOINT, raw)?;
        }
        if let Some(raw) = lookup(ENV_LIST_ENDPOINT) {
            self.list_endpoint = parse(ENV_LIST_ENDPOINT, raw)?;
        }
        if let Some(token) = lookup(ENV_TOKEN) {
            self.auth_token = Some(token);
        }

        Ok(self)
    }

    #[must_use]
    pub fn notification_duration(&self) -> Duration {
        Duration::from_millis(self.notification_ms)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempdir::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new("perfume-form").unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.notification_duration(), Duration::from_millis(5000));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = TempDir::new("perfume-form").unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"endpoint": "https://shop.example/api/v1/admin/add", "notification_ms": 1500}"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.endpoint.as_str(), "https://shop.example/api/v1/admin/add");
        assert_eq!(config.notification_ms, 1500);
        assert_eq!(config.list_endpoint, Config::default().list_endpoint);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new("perfume-form").unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::SerdeJsonError(_))
        ));
    }

    #[test]
    fn env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_ENDPOINT, "https://shop.example/add"),
            (ENV_TOKEN, "Bearer abc"),
        ]
        .into_iter()
        .collect();

        let config = Config::default()
            .apply_env(|var| env.get(var).map(|v| (*v).to_owned()))
            .unwrap();
        assert_eq!(config.endpoint.as_str(), "https://shop.example/add");
        assert_eq!(config.auth_token.as_deref(), Some("Bearer abc"));
        assert_eq!(config.list_endpoint, Config::default().list_endpoint);
    }

    #[test]
    fn env_bad_url() {
        let err = Config::default()
            .apply_env(|var| (var == ENV_LIST_ENDPOINT).then(|| String::from("not a url")))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidUrl {
                var: ENV_LIST_ENDPOINT,
                ..
            }
        ));
    }
}
