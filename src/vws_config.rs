use std::env;

use reqwest::Url;
use secrecy::SecretString;

use crate::error::{Error, Result};
use crate::vws_constant::*;

/// Credentials and endpoint of one VWS target database.
#[derive(Debug, Clone)]
pub struct VwsConfig {
    pub base_url: Url,
    pub access_key: String,
    pub secret_key: SecretString,
}

impl VwsConfig {
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Result<Self> {
        let base_url = Url::parse(VWS_BASE_URL)?;
        let secret_key: String = secret_key.into();

        Ok(Self {
            base_url,
            access_key: access_key.into(),
            secret_key: SecretString::from(secret_key),
        })
    }

    /// Reads `VWS_ACCESS_KEY`, `VWS_SECRET_KEY` and the optional `VWS_BASE_URL`.
    pub fn from_env() -> Result<Self> {
        let access_key = required_env(VWS_ACCESS_KEY_ENV)?;
        let secret_key = required_env(VWS_SECRET_KEY_ENV)?;
        let config = Self::new(access_key, secret_key)?;

        match env::var(VWS_BASE_URL_ENV) {
            Ok(base_url) if !base_url.is_empty() => config.with_base_url(&base_url),
            _ => Ok(config),
        }
    }

    /// Requests go to `<base_url>/targets`; a path prefix on `base_url` is kept.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        self.base_url = Url::parse(base_url)?;
        Ok(self)
    }
}

fn required_env(key: &str) -> Result<String> {
    match env::var(key) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(Error::Config(format!("{} is not set", key))),
    }
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn defaults_to_vuforia_endpoint() {
        let config = VwsConfig::new("access", "secret").unwrap();
        assert_eq!(config.base_url.as_str(), "https://vws.vuforia.com/");
        assert_eq!(config.secret_key.expose_secret(), "secret");
    }

    #[test]
    fn secret_is_redacted_in_debug() {
        let config = VwsConfig::new("access", "top-secret").unwrap();
        assert!(!format!("{:?}", config).contains("top-secret"));
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = VwsConfig::new("a", "s")
            .unwrap()
            .with_base_url("not a url")
            .unwrap_err();
        assert!(matches!(err, Error::Url(_)));
    }

    // Single test touching the process environment so parallel tests never race on it.
    #[test]
    fn from_env_reads_credentials() {
        env::remove_var(VWS_ACCESS_KEY_ENV);
        env::remove_var(VWS_SECRET_KEY_ENV);
        assert!(matches!(VwsConfig::from_env(), Err(Error::Config(_))));

        env::set_var(VWS_ACCESS_KEY_ENV, "env_access");
        env::set_var(VWS_SECRET_KEY_ENV, "env_secret");
        env::set_var(VWS_BASE_URL_ENV, "http://127.0.0.1:8080");
        let config = VwsConfig::from_env().unwrap();

        assert_eq!(config.access_key, "env_access");
        assert_eq!(config.secret_key.expose_secret(), "env_secret");
        assert_eq!(config.base_url.as_str(), "http://127.0.0.1:8080/");

        env::remove_var(VWS_ACCESS_KEY_ENV);
        env::remove_var(VWS_SECRET_KEY_ENV);
        env::remove_var(VWS_BASE_URL_ENV);
    }
}
