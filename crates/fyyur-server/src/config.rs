use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Extra log destination, appended to without ANSI colors
    pub log_file: Option<PathBuf>,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self {
            host: env::var("FYYUR_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("FYYUR_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5000),
            log_file: env::var_os("FYYUR_LOG_FILE")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        }
    }

    /// Socket address to bind; an unparseable host falls back to all interfaces.
    pub fn addr(&self) -> SocketAddr {
        let ip = self.host.parse().unwrap_or_else(|_| {
            tracing::warn!(host = %self.host, "invalid FYYUR_HOST, binding 0.0.0.0");
            [0, 0, 0, 0].into()
        });
        SocketAddr::new(ip, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_addr() {
        let config = ServerConfig {
            host: "127.0.0.1".into(),
            port: 5000,
            log_file: None,
        };
        assert_eq!(config.addr().to_string(), "127.0.0.1:5000");
    }

    #[test]
    fn test_addr_invalid_host() {
        let config = ServerConfig {
            host: "not an ip".into(),
            port: 8080,
            log_file: None,
        };
        assert_eq!(config.addr().to_string(), "0.0.0.0:8080");
    }
}
