use std::time::Duration;

use thiserror::Error;

use crate::constants::BROWSER_USER_AGENT;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {message}")]
    InvalidValue { name: String, message: String },
    #[error("failed to parse {name} as integer: {source}")]
    ParseInt {
        name: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Gallery site
    pub gallery_origin: String,
    pub search_origin: String,
    pub user_agent: String,

    // Timeouts and pacing
    pub probe_timeout: Duration,
    pub fetch_timeout: Duration,
    pub board_search_timeout: Duration,
    pub page_delay: Duration,

    // Web Server
    pub web_host: String,
    pub web_port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric environment variable cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            // Gallery site
            gallery_origin: trim_origin(&env_or_default(
                "GALLERY_ORIGIN",
                "https://gall.dcinside.com",
            )),
            search_origin: trim_origin(&env_or_default(
                "SEARCH_ORIGIN",
                "https://search.dcinside.com",
            )),
            user_agent: env_or_default("USER_AGENT", BROWSER_USER_AGENT),

            // Timeouts and pacing
            probe_timeout: Duration::from_secs(parse_env_u64("PROBE_TIMEOUT_SECS", 3)?),
            fetch_timeout: Duration::from_secs(parse_env_u64("FETCH_TIMEOUT_SECS", 5)?),
            board_search_timeout: Duration::from_secs(parse_env_u64(
                "BOARD_SEARCH_TIMEOUT_SECS",
                10,
            )?),
            page_delay: Duration::from_millis(parse_env_u64("PAGE_DELAY_MS", 100)?),

            // Web Server
            web_host: env_or_default("WEB_HOST", "0.0.0.0"),
            web_port: parse_env_u16("WEB_PORT", 8000)?,
        })
    }

    /// Configuration pointing at the public site with short timeouts.
    ///
    /// Tests override the origins with a mock server URI.
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            gallery_origin: "https://gall.dcinside.com".to_string(),
            search_origin: "https://search.dcinside.com".to_string(),
            user_agent: BROWSER_USER_AGENT.to_string(),
            probe_timeout: Duration::from_millis(500),
            fetch_timeout: Duration::from_millis(500),
            board_search_timeout: Duration::from_millis(500),
            page_delay: Duration::ZERO,
            web_host: "127.0.0.1".to_string(),
            web_port: 8000,
        }
    }

    /// Validate that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_origin("GALLERY_ORIGIN", &self.gallery_origin)?;
        validate_origin("SEARCH_ORIGIN", &self.search_origin)?;
        if self.user_agent.is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "USER_AGENT".to_string(),
                message: "cannot be empty".to_string(),
            });
        }
        for (name, timeout) in [
            ("PROBE_TIMEOUT_SECS", self.probe_timeout),
            ("FETCH_TIMEOUT_SECS", self.fetch_timeout),
            ("BOARD_SEARCH_TIMEOUT_SECS", self.board_search_timeout),
        ] {
            if timeout.is_zero() {
                return Err(ConfigError::InvalidValue {
                    name: name.to_string(),
                    message: "must be at least 1".to_string(),
                });
            }
        }
        Ok(())
    }
}

fn validate_origin(name: &str, origin: &str) -> Result<(), ConfigError> {
    if origin.is_empty() {
        return Err(ConfigError::InvalidValue {
            name: name.to_string(),
            message: "cannot be empty".to_string(),
        });
    }
    if !origin.starts_with("http://") && !origin.starts_with("https://") {
        return Err(ConfigError::InvalidValue {
            name: name.to_string(),
            message: format!("must be an http(s) origin, got '{origin}'"),
        });
    }
    Ok(())
}

/// Origins are joined with absolute paths, so drop any trailing slash.
fn trim_origin(origin: &str) -> String {
    origin.trim_end_matches('/').to_string()
}

fn env_or_default(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_env_u64(name: &str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}

fn parse_env_u16(name: &str, default: u16) -> Result<u16, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_origin() {
        assert_eq!(trim_origin("https://gall.dcinside.com/"), "https://gall.dcinside.com");
        assert_eq!(trim_origin("http://127.0.0.1:9000"), "http://127.0.0.1:9000");
    }

    #[test]
    fn test_parse_defaults() {
        assert_eq!(parse_env_u64("NONEXISTENT_VAR", 3).unwrap(), 3);
        assert_eq!(parse_env_u16("NONEXISTENT_VAR", 8000).unwrap(), 8000);
        assert_eq!(env_or_default("NONEXISTENT_VAR", "x"), "x");
    }

    #[test]
    fn test_validate_testing_config() {
        assert!(Config::for_testing().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_origin() {
        let config = Config {
            gallery_origin: "gall.dcinside.com".to_string(),
            ..Config::for_testing()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { name, .. }) if name == "GALLERY_ORIGIN"
        ));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = Config {
            fetch_timeout: Duration::ZERO,
            ..Config::for_testing()
        };
        assert!(config.validate().is_err());
    }
}
