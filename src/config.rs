use reqwest::Url;
use thiserror::Error;

/// Environment variable holding the processing endpoint
pub const API_URL_VAR: &str = "PIXELMORPH_API_URL";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    Missing(&'static str),
    #[error("{var} is not a valid URL: {reason}")]
    InvalidUrl { var: &'static str, reason: String },
    #[error("{var} must start with http:// or https://")]
    UnsupportedScheme { var: &'static str },
}

/// Settings read once at startup
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Backend endpoint, used for both the probe and submissions
    pub api_url: Url,
}

impl AppConfig {
    /// Read configuration from the process environment
    ///
    /// Call `dotenvy::dotenv()` first to pick up a local `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw = lookup(API_URL_VAR)
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing(API_URL_VAR))?;

        Ok(Self {
            api_url: parse_api_url(raw.trim())?,
        })
    }
}

fn parse_api_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidUrl {
        var: API_URL_VAR,
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::UnsupportedScheme { var: API_URL_VAR });
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(value: Option<&str>) -> Result<AppConfig, ConfigError> {
        AppConfig::from_lookup(|key| {
            assert_eq!(key, API_URL_VAR);
            value.map(str::to_string)
        })
    }

    #[test]
    fn test_reads_endpoint() {
        let config = config_with(Some(" https://pixelmorph.example.com/process ")).unwrap();
        assert_eq!(config.api_url.as_str(), "https://pixelmorph.example.com/process");
    }

    #[test]
    fn test_missing_or_blank_endpoint() {
        assert_eq!(config_with(None).unwrap_err(), ConfigError::Missing(API_URL_VAR));
        assert_eq!(config_with(Some("  ")).unwrap_err(), ConfigError::Missing(API_URL_VAR));
    }

    #[test]
    fn test_rejects_relative_and_non_http_urls() {
        assert!(matches!(
            config_with(Some("/process")),
            Err(ConfigError::InvalidUrl { .. })
        ));
        assert_eq!(
            config_with(Some("ftp://example.com/")).unwrap_err(),
            ConfigError::UnsupportedScheme { var: API_URL_VAR }
        );
    }
}
