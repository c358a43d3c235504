// Configuration module
// Typed launcher configuration and shared runtime state

use serde::Deserialize;
use std::io;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub serve: ServeConfig,
    pub browser: BrowserConfig,
    pub logging: LoggingConfig,
}

/// Listen address configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Static file serving configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServeConfig {
    /// Directory to serve. Defaults to the directory containing the
    /// launcher executable when not set.
    pub root: Option<PathBuf>,
    pub index_files: Vec<String>,
    pub directory_listing: bool,
}

/// Browser auto-open configuration
#[derive(Debug, Deserialize, Clone)]
pub struct BrowserConfig {
    pub auto_open: bool,
    /// Page opened in the browser at startup, relative to the serve root
    pub landing_page: String,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub access_log: bool,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

impl Config {
    /// Load configuration from specified file path (without extension)
    /// Default config file is "demo.toml" when no path specified
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("DEMO").separator("__"))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default(
                "serve.index_files",
                vec!["index.html".to_string(), "index.htm".to_string()],
            )?
            .set_default("serve.directory_listing", true)?
            .set_default("browser.auto_open", true)?
            .set_default("browser.landing_page", "app.html")?
            .set_default("logging.access_log", true)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid listen address: {e}"))
    }
}

/// Immutable state shared by every connection
pub struct AppState {
    pub config: Config,
    /// Canonicalized serving root; every served path must stay inside it
    pub serve_root: PathBuf,
}

impl AppState {
    /// Resolve the serve root (explicit or executable directory) and
    /// canonicalize it so the containment check in the handler is exact.
    pub fn new(config: Config) -> io::Result<Self> {
        let root = match &config.serve.root {
            Some(path) => path.clone(),
            None => default_serve_root()?,
        };
        let serve_root = root.canonicalize()?;
        Ok(Self { config, serve_root })
    }
}

/// Directory containing the running executable.
///
/// The demo HTML files live next to the launcher, so serving resolves the
/// same way regardless of the caller's working directory at invocation time.
pub fn default_serve_root() -> io::Result<PathBuf> {
    let exe = std::env::current_exe()?;
    exe.parent().map(Path::to_path_buf).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "executable has no parent directory",
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> Config {
        // Name that matches no file on disk, so only defaults apply
        Config::load_from("demo-server-test-missing").expect("defaults should load")
    }

    #[test]
    fn test_default_values() {
        let cfg = defaults();
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.serve.index_files, vec!["index.html", "index.htm"]);
        assert!(cfg.serve.directory_listing);
        assert!(cfg.browser.auto_open);
        assert_eq!(cfg.browser.landing_page, "app.html");
        assert!(cfg.logging.access_log);
        assert!(cfg.serve.root.is_none());
    }

    #[test]
    fn test_socket_addr() {
        let mut cfg = defaults();
        cfg.server.host = "127.0.0.1".to_string();
        cfg.server.port = 9000;
        let addr = cfg.socket_addr().expect("valid address");
        assert_eq!(addr.to_string(), "127.0.0.1:9000");
    }

    #[test]
    fn test_socket_addr_invalid_host() {
        let mut cfg = defaults();
        cfg.server.host = "not a host".to_string();
        assert!(cfg.socket_addr().is_err());
    }

    #[test]
    fn test_app_state_uses_explicit_root() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut cfg = defaults();
        cfg.serve.root = Some(dir.path().to_path_buf());
        let state = AppState::new(cfg).expect("state");
        assert_eq!(
            state.serve_root,
            dir.path().canonicalize().expect("canonical")
        );
    }

    #[test]
    fn test_app_state_missing_root_fails() {
        let mut cfg = defaults();
        cfg.serve.root = Some(PathBuf::from("/definitely/not/a/real/dir"));
        assert!(AppState::new(cfg).is_err());
    }

    #[test]
    fn test_default_serve_root_is_directory() {
        let root = default_serve_root().expect("serve root");
        assert!(root.is_dir());
    }
}
