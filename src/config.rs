//! Provider configuration: API host and access token.
//!
//! The token is process-wide configuration read once at startup and injected
//! into the quote provider at construction, never read from a hidden global.

use anyhow::{anyhow, Result};

/// Environment variable holding the IEX Cloud API token
pub const TOKEN_ENV_VAR: &str = "IEX_CLOUD_API_TOKEN";

#[derive(Clone, Debug)]
pub struct ProviderConfig {
    pub host: String,
    pub token: String,
}

impl ProviderConfig {
    pub fn new(host: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            token: token.into(),
        }
    }

    /// Build a config for the given host, reading the token from the environment
    pub fn from_env(host: &str) -> Result<Self> {
        let token = std::env::var(TOKEN_ENV_VAR).map_err(|_| {
            anyhow!(
                "{} is not set. Add it to your environment or a .env file",
                TOKEN_ENV_VAR
            )
        })?;

        if token.trim().is_empty() {
            return Err(anyhow!("{} is set but empty", TOKEN_ENV_VAR));
        }

        Ok(Self::new(host, token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_keeps_host_and_token() {
        let config = ProviderConfig::new("https://sandbox.iexapis.com", "Tpk_test");

        assert_eq!(config.host, "https://sandbox.iexapis.com");
        assert_eq!(config.token, "Tpk_test");
    }
}
