//! Layered application configuration.
//!
//! Priority, lowest first: built-in defaults, YAML config file, `GTG_`-prefixed
//! environment variables, CLI flags (which also read their own env vars).

use std::path::Path;
use std::time::Duration;

use clap::Parser;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

/// Fallback backend used when nothing else is configured.
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8080";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Base URL of the assistant service (the `/chat` endpoint lives below it)
    #[arg(long, env = "BACKEND_URL")]
    pub backend_url: Option<String>,

    /// How results are laid out: `stacked` or `tabbed`
    #[arg(long, env = "DISPLAY_MODE")]
    pub display_mode: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub backend: BackendConfig,
    pub ui: UiConfig,
    pub sessions: SessionConfig,
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl BackendConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct UiConfig {
    pub display_mode: DisplayMode,
    pub htmx_url: String,
    /// Directory served under `/static`.
    pub static_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    pub idle_timeout_secs: u64,
    pub sweep_interval_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    pub format: LogFormat,
}

/// Result layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Every non-empty section, one after another.
    #[default]
    Stacked,
    /// One section at a time behind a tab selector.
    Tabbed,
}

impl DisplayMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stacked => "stacked",
            Self::Tabbed => "tabbed",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from_args(std::env::args())
    }

    pub fn load_from_args<I, T>(args: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli =
            Cli::try_parse_from(args).map_err(|e| config::ConfigError::Message(e.to_string()))?;

        let mut builder = Config::builder()
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("backend.base_url", DEFAULT_BACKEND_URL)?
            .set_default("backend.timeout_secs", 120)?
            .set_default("ui.display_mode", "stacked")?
            .set_default("ui.htmx_url", "https://unpkg.com/htmx.org@2.0.8/dist/htmx.min.js")?
            .set_default("ui.static_dir", "static")?
            .set_default("sessions.idle_timeout_secs", 30 * 60)?
            .set_default("sessions.sweep_interval_secs", 60)?
            .set_default("log.format", "compact")?;

        // Explicit file wins over ./config.yaml.
        match &cli.config {
            Some(path) => {
                builder = builder.add_source(File::new(path, FileFormat::Yaml).required(true));
            }
            None if Path::new("config.yaml").exists() => {
                builder = builder.add_source(File::new("config.yaml", FileFormat::Yaml));
            }
            None => {}
        }

        // E.g. GTG_SERVER__PORT=8000, GTG_BACKEND__BASE_URL=https://...
        builder = builder.add_source(
            Environment::with_prefix("GTG")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        if let Some(port) = cli.port {
            builder = builder.set_override("server.port", port)?;
        }
        if let Some(url) = cli.backend_url {
            builder = builder.set_override("backend.base_url", url)?;
        }
        if let Some(mode) = cli.display_mode {
            builder = builder.set_override("ui.display_mode", mode.to_lowercase())?;
        }

        let cfg: Self = builder.build()?.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), config::ConfigError> {
        let parsed = url::Url::parse(&self.backend.base_url).map_err(|e| {
            config::ConfigError::Message(format!(
                "backend.base_url `{}` is not a valid URL: {e}",
                self.backend.base_url
            ))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(config::ConfigError::Message(format!(
                "backend.base_url must be http or https, got `{}`",
                parsed.scheme()
            )));
        }
        if self.backend.timeout_secs == 0 {
            return Err(config::ConfigError::Message(
                "backend.timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
