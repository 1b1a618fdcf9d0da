//! Transport configuration types.

use serde::{Deserialize, Serialize};

/// Transport configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransportConfig {
    /// Standard input/output transport (local MCP clients).
    #[cfg(feature = "stdio")]
    Stdio,

    /// HTTP server exposing the SSE and streamable-HTTP endpoints.
    #[cfg(feature = "http")]
    Http(HttpConfig),
}

/// HTTP transport configuration.
///
/// Endpoint paths are fixed: `/sse`, `/sse/message` and `/mcp`.
#[cfg(feature = "http")]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Port number to listen on.
    pub port: u16,

    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Enable CORS for browser clients.
    #[serde(default = "default_cors")]
    pub enable_cors: bool,

    /// Interval between keep-alive comments on open SSE streams, in seconds.
    #[serde(default = "default_keep_alive_secs")]
    pub sse_keep_alive_secs: u64,
}

#[cfg(feature = "http")]
fn default_host() -> String {
    "127.0.0.1".to_string()
}

#[cfg(feature = "http")]
fn default_port() -> u16 {
    8787
}

#[cfg(feature = "http")]
fn default_cors() -> bool {
    true
}

#[cfg(feature = "http")]
fn default_keep_alive_secs() -> u64 {
    15
}

impl Default for TransportConfig {
    fn default() -> Self {
        #[cfg(feature = "http")]
        {
            return Self::Http(HttpConfig::default());
        }

        #[cfg(all(not(feature = "http"), feature = "stdio"))]
        {
            return Self::Stdio;
        }

        #[cfg(not(any(feature = "stdio", feature = "http")))]
        {
            compile_error!("At least one transport feature must be enabled: stdio or http");
        }
    }
}

#[cfg(feature = "http")]
impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            enable_cors: default_cors(),
            sse_keep_alive_secs: default_keep_alive_secs(),
        }
    }
}

impl TransportConfig {
    /// Create a STDIO transport config.
    #[cfg(feature = "stdio")]
    pub fn stdio() -> Self {
        Self::Stdio
    }

    /// Create an HTTP transport config.
    #[cfg(feature = "http")]
    pub fn http(port: u16, host: impl Into<String>) -> Self {
        Self::Http(HttpConfig {
            port,
            host: host.into(),
            ..Default::default()
        })
    }

    /// Load transport config from environment variables.
    pub fn from_env() -> Self {
        let transport = std::env::var("MCP_TRANSPORT")
            .unwrap_or_default()
            .to_lowercase();

        match transport.as_str() {
            #[cfg(feature = "stdio")]
            "stdio" => Self::Stdio,
            #[cfg(feature = "http")]
            "http" => Self::Http(HttpConfig::from_env()),
            #[cfg(feature = "http")]
            _ => Self::Http(HttpConfig::from_env()),
            #[cfg(all(not(feature = "http"), feature = "stdio"))]
            _ => Self::Stdio,
        }
    }

    /// Check the transport settings, returning a description of the first problem.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            #[cfg(feature = "stdio")]
            Self::Stdio => Ok(()),
            #[cfg(feature = "http")]
            Self::Http(cfg) => {
                if cfg.sse_keep_alive_secs == 0 {
                    return Err("SSE keep-alive interval must be at least one second".to_string());
                }
                Ok(())
            }
        }
    }

    /// Get a description of this transport for logging.
    pub fn description(&self) -> String {
        match self {
            #[cfg(feature = "stdio")]
            Self::Stdio => "STDIO (standard MCP mode)".to_string(),
            #[cfg(feature = "http")]
            Self::Http(cfg) => format!("HTTP on {}:{} (/sse, /mcp)", cfg.host, cfg.port),
        }
    }
}

#[cfg(feature = "http")]
impl HttpConfig {
    /// Load HTTP settings from `MCP_HTTP_*` and `MCP_SSE_*` variables.
    pub fn from_env() -> Self {
        let port = std::env::var("MCP_HTTP_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or_else(default_port);
        let host = std::env::var("MCP_HTTP_HOST").unwrap_or_else(|_| default_host());
        let enable_cors = std::env::var("MCP_HTTP_CORS")
            .map(|v| v.to_lowercase() != "false" && v != "0")
            .unwrap_or_else(|_| default_cors());
        let sse_keep_alive_secs = std::env::var("MCP_SSE_KEEP_ALIVE_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_keep_alive_secs);

        Self {
            port,
            host,
            enable_cors,
            sse_keep_alive_secs,
        }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ENV_TEST_LOCK;

    #[cfg(feature = "http")]
    #[test]
    fn test_http_is_default() {
        let config = TransportConfig::default();
        assert!(matches!(config, TransportConfig::Http(_)));
        assert_eq!(config.description(), "HTTP on 127.0.0.1:8787 (/sse, /mcp)");
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_http_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_TRANSPORT", "HTTP");
            std::env::set_var("MCP_HTTP_PORT", "9000");
            std::env::set_var("MCP_HTTP_HOST", "0.0.0.0");
            std::env::set_var("MCP_HTTP_CORS", "false");
            std::env::set_var("MCP_SSE_KEEP_ALIVE_SECS", "30");
        }
        let config = TransportConfig::from_env();
        match config {
            TransportConfig::Http(cfg) => {
                assert_eq!(cfg.address(), "0.0.0.0:9000");
                assert!(!cfg.enable_cors);
                assert_eq!(cfg.sse_keep_alive_secs, 30);
            }
            #[allow(unreachable_patterns)]
            _ => panic!("Expected HTTP transport"),
        }
        unsafe {
            for var in [
                "MCP_TRANSPORT",
                "MCP_HTTP_PORT",
                "MCP_HTTP_HOST",
                "MCP_HTTP_CORS",
                "MCP_SSE_KEEP_ALIVE_SECS",
            ] {
                std::env::remove_var(var);
            }
        }
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_invalid_port_falls_back() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_HTTP_PORT", "not-a-port");
        }
        let cfg = HttpConfig::from_env();
        assert_eq!(cfg.port, 8787);
        unsafe {
            std::env::remove_var("MCP_HTTP_PORT");
        }
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_zero_keep_alive_rejected() {
        let config = TransportConfig::Http(HttpConfig {
            sse_keep_alive_secs: 0,
            ..Default::default()
        });
        assert!(config.validate().is_err());
        assert!(TransportConfig::http(8080, "localhost").validate().is_ok());
    }

    #[cfg(feature = "stdio")]
    #[test]
    fn test_stdio_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_TRANSPORT", "stdio");
        }
        assert!(matches!(TransportConfig::from_env(), TransportConfig::Stdio));
        assert!(TransportConfig::stdio().validate().is_ok());
        unsafe {
            std::env::remove_var("MCP_TRANSPORT");
        }
    }
}
