use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub web_port: u16,

    pub bind_address: String,

    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            web_port: 8080,
            bind_address: "0.0.0.0".to_string(),
            cors_allowed_origins: vec!["*".to_string()],
        }
    }
}

impl ServerConfig {
    /// Listen address for the web server. Accepts IPv4 and IPv6 bind
    /// addresses (`0.0.0.0`, `::`, `[::1]`).
    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        let raw = self.bind_address.trim();
        let unbracketed = raw
            .strip_prefix('[')
            .and_then(|r| r.strip_suffix(']'))
            .unwrap_or(raw);
        unbracketed
            .parse::<IpAddr>()
            .map(|ip| SocketAddr::new(ip, self.web_port))
            .map_err(|e| format!("invalid bind address '{}': {e}", self.bind_address))
    }
}
