use std::env;
use std::net::{IpAddr, SocketAddr};

use crate::config::ConfigError;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);
        AppConfig { host, port }
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|_| ConfigError::ParseError(format!("Invalid APP_HOST value: {}", self.host)))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig { host: "127.0.0.1".to_string(), port: 3000 }
    }
}
