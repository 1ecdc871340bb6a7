use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got {value:?}")]
    InvalidValue {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Log output format selected by `LOG_FORMAT`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

/// Service settings read once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalConfig {
    pub bind_addr: IpAddr,
    pub port: u16,
    pub log_format: LogFormat,
    /// Replaces the bundled dataset when set
    pub claims_path: Option<PathBuf>,
    pub session_idle_timeout: Duration,
    pub session_sweep_interval: Duration,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            bind_addr: IpAddr::from([0, 0, 0, 0]),
            port: 3000,
            log_format: LogFormat::Json,
            claims_path: None,
            session_idle_timeout: Duration::from_secs(1800),
            session_sweep_interval: Duration::from_secs(60),
        }
    }
}

impl PortalConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the config from any variable source; unset variables keep defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let bind_addr = match var("BIND_ADDR") {
            Some(value) => parse(value, "BIND_ADDR", "an IP address")?,
            None => defaults.bind_addr,
        };
        let port = match var("PORT") {
            Some(value) => parse(value, "PORT", "a port number")?,
            None => defaults.port,
        };
        let log_format = match var("LOG_FORMAT").as_deref() {
            None | Some("json") => LogFormat::Json,
            Some("pretty") => LogFormat::Pretty,
            Some(other) => {
                return Err(ConfigError::InvalidValue {
                    name: "LOG_FORMAT",
                    expected: "\"json\" or \"pretty\"",
                    value: other.to_string(),
                });
            }
        };
        let session_idle_timeout = match var("SESSION_IDLE_TIMEOUT_SECS") {
            Some(value) => Duration::from_secs(positive_secs(value, "SESSION_IDLE_TIMEOUT_SECS")?),
            None => defaults.session_idle_timeout,
        };
        let session_sweep_interval = match var("SESSION_SWEEP_INTERVAL_SECS") {
            Some(value) => {
                Duration::from_secs(positive_secs(value, "SESSION_SWEEP_INTERVAL_SECS")?)
            }
            None => defaults.session_sweep_interval,
        };

        Ok(Self {
            bind_addr,
            port,
            log_format,
            claims_path: var("CLAIMS_DATA_PATH").map(PathBuf::from),
            session_idle_timeout,
            session_sweep_interval,
        })
    }
}

fn parse<T: std::str::FromStr>(
    value: String,
    name: &'static str,
    expected: &'static str,
) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue {
            name,
            expected,
            value,
        })
}

fn positive_secs(value: String, name: &'static str) -> Result<u64, ConfigError> {
    match parse::<u64>(value.clone(), name, "a positive number of seconds")? {
        0 => Err(ConfigError::InvalidValue {
            name,
            expected: "a positive number of seconds",
            value,
        }),
        secs => Ok(secs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = PortalConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, PortalConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = PortalConfig::from_lookup(lookup(&[
            ("BIND_ADDR", "127.0.0.1"),
            ("PORT", "8080"),
            ("LOG_FORMAT", "pretty"),
            ("CLAIMS_DATA_PATH", "/srv/claims.json"),
            ("SESSION_IDLE_TIMEOUT_SECS", "600"),
            ("SESSION_SWEEP_INTERVAL_SECS", "15"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr, IpAddr::from([127, 0, 0, 1]));
        assert_eq!(config.port, 8080);
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.claims_path, Some(PathBuf::from("/srv/claims.json")));
        assert_eq!(config.session_idle_timeout, Duration::from_secs(600));
        assert_eq!(config.session_sweep_interval, Duration::from_secs(15));
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = PortalConfig::from_lookup(lookup(&[("PORT", " "), ("CLAIMS_DATA_PATH", "")]))
            .unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.claims_path, None);
    }

    #[test]
    fn test_invalid_values_are_errors() {
        let err = PortalConfig::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert!(err.to_string().contains("PORT"));

        assert!(PortalConfig::from_lookup(lookup(&[("LOG_FORMAT", "xml")])).is_err());
        assert!(PortalConfig::from_lookup(lookup(&[("SESSION_IDLE_TIMEOUT_SECS", "0")])).is_err());
    }
}
