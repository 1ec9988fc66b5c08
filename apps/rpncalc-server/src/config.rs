//! Layered server configuration.
//!
//! Sources are merged in order: built-in defaults, the YAML file given with
//! `--config`, `APP__*` environment variables, then CLI overrides.

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use rpn_calculator::ServiceConfig;
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// Prefix of environment overrides, e.g. `APP__SERVER__BIND_ADDR`.
pub const ENV_PREFIX: &str = "APP__";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub calculator: ServiceConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ServerConfig {
    /// Socket address the HTTP listener binds to.
    pub bind_addr: String,
    /// Requests running longer than this are answered with 504.
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8000".to_owned(),
            request_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::Text,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl AppConfig {
    /// Loads the layered configuration.
    ///
    /// # Errors
    /// Returns an error if the YAML file cannot be parsed or a value has the
    /// wrong shape.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        Self::figment(path)
            .extract()
            .context("failed to load configuration")
    }

    fn figment(path: Option<&Path>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file_exact(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Applies `--port` and `-v` on top of the loaded values.
    ///
    /// # Errors
    /// Returns an error if `--port` is given and `server.bind_addr` is not a
    /// valid socket address.
    pub fn apply_cli_overrides(&mut self, port: Option<u16>, verbose: u8) -> Result<()> {
        if let Some(port) = port {
            let mut addr = self.server.socket_addr()?;
            addr.set_port(port);
            self.server.bind_addr = addr.to_string();
        }

        match verbose {
            0 => {}
            1 => "info".clone_into(&mut self.logging.level),
            2 => "debug".clone_into(&mut self.logging.level),
            _ => "trace".clone_into(&mut self.logging.level),
        }
        Ok(())
    }

    /// Rejects values that load fine but cannot run.
    ///
    /// # Errors
    /// Returns an error for an unparsable `server.bind_addr`, an invalid
    /// `logging.level` directive, or `calculator.max_tokens` of 0.
    pub fn validate(&self) -> Result<()> {
        self.server.socket_addr()?;
        self.logging.env_filter()?;
        if self.calculator.max_tokens == 0 {
            bail!("invalid calculator.max_tokens: must be at least 1");
        }
        Ok(())
    }

    /// Renders the effective configuration as YAML.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        serde_saphyr::to_string(self).context("failed to render configuration as YAML")
    }
}

impl LoggingConfig {
    /// Builds the filter for `level`.
    ///
    /// # Errors
    /// Returns an error if `level` is not a valid `EnvFilter` directive.
    pub fn env_filter(&self) -> Result<EnvFilter> {
        EnvFilter::try_new(&self.level)
            .with_context(|| format!("invalid logging.level: {:?}", self.level))
    }
}

impl ServerConfig {
    /// Parses `bind_addr`.
    ///
    /// # Errors
    /// Returns an error if `bind_addr` is not `host:port` with an IP host.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.bind_addr
            .parse()
            .with_context(|| format!("invalid server.bind_addr address: {}", self.bind_addr))
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
