//! Transport configuration.

use serde::{Deserialize, Serialize};

/// Which transport to serve on.
///
/// Variants exist only for the transports compiled in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransportConfig {
    /// MCP over stdin/stdout.
    #[cfg(feature = "stdio")]
    Stdio,

    /// JSON-RPC over HTTP POST.
    #[cfg(feature = "http")]
    Http(HttpConfig),
}

#[cfg(feature = "stdio")]
impl Default for TransportConfig {
    fn default() -> Self {
        Self::Stdio
    }
}

#[cfg(all(feature = "http", not(feature = "stdio")))]
impl Default for TransportConfig {
    fn default() -> Self {
        Self::Http(HttpConfig::default())
    }
}

#[cfg(not(any(feature = "stdio", feature = "http")))]
compile_error!("enable at least one transport feature: `stdio` or `http`");

impl TransportConfig {
    #[cfg(feature = "http")]
    pub fn http(port: u16, host: impl Into<String>) -> Self {
        Self::Http(HttpConfig {
            port,
            host: host.into(),
            ..HttpConfig::default()
        })
    }

    /// Select the transport named by `MCP_TRANSPORT`.
    ///
    /// Unknown or missing values fall back to the default transport.
    pub fn from_env() -> Self {
        let selected = std::env::var("MCP_TRANSPORT")
            .map(|v| v.trim().to_lowercase())
            .unwrap_or_default();

        match selected.as_str() {
            #[cfg(feature = "http")]
            "http" => Self::Http(HttpConfig::from_env()),
            _ => Self::default(),
        }
    }

    /// One-line summary for the startup log.
    pub fn description(&self) -> String {
        match self {
            #[cfg(feature = "stdio")]
            Self::Stdio => "STDIO".to_string(),
            #[cfg(feature = "http")]
            Self::Http(cfg) => format!("HTTP on {}:{}{}", cfg.host, cfg.port, cfg.rpc_path),
        }
    }

    /// Whether clients reach the server over the network.
    pub fn is_networked(&self) -> bool {
        match self {
            #[cfg(feature = "stdio")]
            Self::Stdio => false,
            #[cfg(feature = "http")]
            Self::Http(_) => true,
        }
    }
}

/// HTTP listener settings.
#[cfg(feature = "http")]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub host: String,
    pub port: u16,

    /// Route receiving JSON-RPC POSTs.
    pub rpc_path: String,

    /// Allow any origin, for browser clients.
    pub enable_cors: bool,
}

#[cfg(feature = "http")]
impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            rpc_path: "/mcp".to_string(),
            enable_cors: true,
        }
    }
}

#[cfg(feature = "http")]
impl HttpConfig {
    /// Read `MCP_HTTP_HOST`, `MCP_HTTP_PORT`, `MCP_HTTP_PATH` and
    /// `MCP_HTTP_CORS` over the defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(host) = std::env::var("MCP_HTTP_HOST") {
            config.host = host;
        }
        if let Some(port) = std::env::var("MCP_HTTP_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
        {
            config.port = port;
        }
        if let Ok(path) = std::env::var("MCP_HTTP_PATH") {
            config.rpc_path = path;
        }
        if let Ok(cors) = std::env::var("MCP_HTTP_CORS") {
            config.enable_cors = !matches!(cors.trim().to_lowercase().as_str(), "false" | "0");
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ENV_TEST_LOCK;

    #[cfg(feature = "http")]
    const HTTP_VARS: &[&str] = &[
        "MCP_TRANSPORT",
        "MCP_HTTP_HOST",
        "MCP_HTTP_PORT",
        "MCP_HTTP_PATH",
        "MCP_HTTP_CORS",
    ];

    #[cfg(feature = "http")]
    fn clear_http_vars() {
        for var in HTTP_VARS {
            unsafe {
                std::env::remove_var(var);
            }
        }
    }

    #[cfg(feature = "stdio")]
    #[test]
    fn test_default_is_stdio() {
        let config = TransportConfig::default();
        assert!(!config.is_networked());
        assert_eq!(config.description(), "STDIO");
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_http_defaults_bind_all_interfaces() {
        let config = HttpConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert_eq!(config.rpc_path, "/mcp");
        assert!(config.enable_cors);

        let custom = TransportConfig::http(9000, "127.0.0.1");
        assert!(custom.is_networked());
        assert_eq!(custom.description(), "HTTP on 127.0.0.1:9000/mcp");
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_http_selected_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_http_vars();
        unsafe {
            std::env::set_var("MCP_TRANSPORT", " HTTP ");
            std::env::set_var("MCP_HTTP_HOST", "127.0.0.1");
            std::env::set_var("MCP_HTTP_PORT", "9123");
            std::env::set_var("MCP_HTTP_PATH", "/rpc");
            std::env::set_var("MCP_HTTP_CORS", "false");
        }

        let config = TransportConfig::from_env();
        clear_http_vars();

        let TransportConfig::Http(http) = config else {
            panic!("expected HTTP transport");
        };
        assert_eq!(http.host, "127.0.0.1");
        assert_eq!(http.port, 9123);
        assert_eq!(http.rpc_path, "/rpc");
        assert!(!http.enable_cors);
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_http_env_bad_port_keeps_default() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        clear_http_vars();
        unsafe {
            std::env::set_var("MCP_HTTP_PORT", "not-a-port");
            std::env::set_var("MCP_HTTP_CORS", "yes");
        }

        let config = HttpConfig::from_env();
        clear_http_vars();

        assert_eq!(config.port, 8000);
        assert_eq!(config.host, "0.0.0.0");
        assert!(config.enable_cors);
    }

    #[cfg(feature = "stdio")]
    #[test]
    fn test_unknown_transport_falls_back_to_stdio() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_TRANSPORT", "carrier-pigeon");
        }
        let config = TransportConfig::from_env();
        unsafe {
            std::env::remove_var("MCP_TRANSPORT");
        }
        assert!(!config.is_networked());
    }
}
