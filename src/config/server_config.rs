use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Configuration for the facade server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind (Default: 127.0.0.1 — the facade serves one local
    /// desktop client and is never exposed beyond loopback)
    pub host: IpAddr,

    /// Port to bind (Default: 56789, the desktop client's default)
    pub port: u16,

    /// Maximum accepted request body size in bytes (Default: 5MB)
    pub max_payload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 56789,
            max_payload_bytes: 5_000_000, // 5MB
        }
    }
}

impl ServerConfig {
    /// Create a new configuration with all default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Socket address the server binds
    pub fn address(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Validate the configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.port == 0 {
            return Err("port must be greater than 0".to_string());
        }
        if self.max_payload_bytes == 0 {
            return Err("max_payload_bytes must be greater than 0".to_string());
        }
        Ok(())
    }
}
