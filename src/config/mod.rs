use std::env;
use std::time::Duration;

use thiserror::Error;

use crate::fetch::{DEFAULT_FETCH_TIMEOUT, DEFAULT_USER_AGENT};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be a positive whole number of seconds, got {value:?}")]
    InvalidTimeout { name: &'static str, value: String },
}

#[derive(Clone, Debug)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub fetch_timeout: Duration,
    pub user_agent: String,
    /// Skip the private-address check on target hosts. Off unless set.
    pub allow_private_hosts: bool,
    pub is_dev: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let fetch_timeout = match env::var("FETCH_TIMEOUT_SECS") {
            Ok(value) => match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::InvalidTimeout {
                        name: "FETCH_TIMEOUT_SECS",
                        value,
                    })
                }
            },
            Err(_) => DEFAULT_FETCH_TIMEOUT,
        };

        Ok(Config {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            fetch_timeout,
            user_agent: env::var("USER_AGENT")
                .ok()
                .filter(|ua| !ua.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            allow_private_hosts: env::var("ALLOW_PRIVATE_HOSTS")
                .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            is_dev: env::var("APP_ENV").as_deref() != Ok("production"),
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 6] = [
        "SERVER_HOST",
        "SERVER_PORT",
        "FETCH_TIMEOUT_SECS",
        "USER_AGENT",
        "ALLOW_PRIVATE_HOSTS",
        "APP_ENV",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn defaults_when_unset() {
        clear_env();
        let config = Config::from_env().unwrap();
        assert_eq!(config.server_addr(), "127.0.0.1:8080");
        assert_eq!(config.fetch_timeout, Duration::from_secs(10));
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
        assert!(!config.allow_private_hosts);
        assert!(config.is_dev);
    }

    #[test]
    #[serial]
    fn reads_overrides() {
        clear_env();
        env::set_var("SERVER_PORT", "9000");
        env::set_var("FETCH_TIMEOUT_SECS", "3");
        env::set_var("ALLOW_PRIVATE_HOSTS", "true");
        env::set_var("APP_ENV", "production");
        let config = Config::from_env().unwrap();
        clear_env();

        assert_eq!(config.server_port, 9000);
        assert_eq!(config.fetch_timeout, Duration::from_secs(3));
        assert!(config.allow_private_hosts);
        assert!(!config.is_dev);
    }

    #[test]
    #[serial]
    fn bad_port_falls_back() {
        clear_env();
        env::set_var("SERVER_PORT", "not-a-port");
        let config = Config::from_env().unwrap();
        clear_env();
        assert_eq!(config.server_port, 8080);
    }

    #[test]
    #[serial]
    fn rejects_zero_timeout() {
        clear_env();
        env::set_var("FETCH_TIMEOUT_SECS", "0");
        let result = Config::from_env();
        clear_env();
        assert!(matches!(result, Err(ConfigError::InvalidTimeout { .. })));
    }
}
