use std::{env, net::SocketAddr};

use thiserror::Error;

use crate::drive_client::OauthClientConfig;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub bind_port: u16,
    pub google_client_id: Option<String>,
    pub google_client_secret: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("BIND_PORT must be a valid u16")]
    InvalidPort,
    #[error("GOOGLE_CLIENT_ID and GOOGLE_CLIENT_SECRET must be set together")]
    PartialOauthConfig,
    #[error("invalid bind address or port")]
    InvalidSocket,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0".to_string());
        let bind_port = env::var("BIND_PORT")
            .ok()
            .map(|value| value.parse::<u16>().map_err(|_| ConfigError::InvalidPort))
            .transpose()?
            .unwrap_or(8080);

        let google_client_id = non_empty_env("GOOGLE_CLIENT_ID");
        let google_client_secret = non_empty_env("GOOGLE_CLIENT_SECRET");
        if google_client_id.is_some() != google_client_secret.is_some() {
            return Err(ConfigError::PartialOauthConfig);
        }

        let config = Self {
            bind_addr,
            bind_port,
            google_client_id,
            google_client_secret,
        };

        let _ = config.bind_socket()?;
        Ok(config)
    }

    pub fn bind_socket(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.bind_addr, self.bind_port)
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidSocket)
    }

    /// OAuth application credentials used only for refresh-token exchange.
    pub fn oauth_client(&self) -> Option<OauthClientConfig> {
        match (
            self.google_client_id.as_ref(),
            self.google_client_secret.as_ref(),
        ) {
            (Some(client_id), Some(client_secret)) => Some(OauthClientConfig {
                client_id: client_id.clone(),
                client_secret: client_secret.clone(),
            }),
            _ => None,
        }
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
