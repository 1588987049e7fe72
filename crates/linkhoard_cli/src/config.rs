//! Configuration file support for linkhoard.
//!
//! Configuration is loaded with the following precedence (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (prefixed with `LINKHOARD_`, e.g., `LINKHOARD_DATABASE_URL`)
//! 3. Config file (./linkhoard.toml, then ~/.config/linkhoard/config.toml)
//! 4. Built-in defaults
//!
//! The database URL defaults to `sqlite://~/.local/state/linkhoard/linkhoard.db` on Linux
//! (using the XDG state directory) if not explicitly configured.
//!
//! Example config file:
//! ```toml
//! [database]
//! url = "sqlite://~/.local/state/linkhoard/linkhoard.db"  # optional, this is the default
//!
//! [user]
//! id = "6f1c..."  # the user CLI commands act as
//!
//! [github]
//! token = "ghp_..."  # or use LINKHOARD_GITHUB_TOKEN env var
//!
//! [enrich]
//! key = "sk-ant-..."  # enables tweet context generation
//! model = "claude-3-5-haiku-20241022"
//!
//! [http]
//! timeout = 15  # seconds
//! rate = 10     # requests per second
//!
//! [server]
//! bind = "127.0.0.1:8080"
//! ```

use std::path::PathBuf;

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::Deserialize;
use uuid::Uuid;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub user: UserConfig,
    pub github: GitHubConfig,
    pub enrich: EnrichConfig,
    pub http: HttpConfig,
    pub server: ServerConfig,
}

/// Database configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database connection URL.
    /// Supports sqlite:// and postgres:// schemes.
    /// Defaults to `sqlite://~/.local/state/linkhoard/linkhoard.db` if not specified.
    pub url: Option<String>,
}

/// The user local commands act on behalf of.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    pub id: Option<Uuid>,
}

/// GitHub configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// GitHub API token. Optional; raises the API rate limit.
    /// Can also be set via LINKHOARD_GITHUB_TOKEN environment variable.
    pub token: Option<String>,
}

/// Tweet enrichment configuration. Enrichment is off without a key.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct EnrichConfig {
    pub key: Option<String>,
    pub model: Option<String>,
}

/// Outbound HTTP configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Per-request timeout in seconds.
    pub timeout: u64,
    /// Requests per second across all outbound clients.
    pub rate: u32,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: 15,
            rate: linkhoard::http::DEFAULT_REQUESTS_PER_SECOND,
        }
    }
}

/// API server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_string(),
        }
    }
}

impl Config {
    /// Load configuration using the config crate's layered approach.
    ///
    /// Sources are loaded in order (later sources override earlier):
    /// 1. Built-in defaults
    /// 2. XDG config file (~/.config/linkhoard/config.toml)
    /// 3. Local config file (./linkhoard.toml)
    /// 4. Environment variables with LINKHOARD_ prefix
    pub fn load() -> Self {
        let mut builder = ConfigBuilder::builder();

        if let Some(config_path) = Self::default_config_path()
            && config_path.exists()
        {
            tracing::debug!("Loading config from {:?}", config_path);
            builder = builder.add_source(
                File::from(config_path)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        let local_config = PathBuf::from("linkhoard.toml");
        if local_config.exists() {
            tracing::debug!("Loading config from ./linkhoard.toml");
            builder = builder.add_source(
                File::from(local_config)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        // e.g., LINKHOARD_DATABASE_URL -> database.url
        builder = builder.add_source(
            Environment::with_prefix("LINKHOARD")
                .separator("_")
                .try_parsing(true),
        );

        match builder.build() {
            Ok(settings) => match settings.try_deserialize::<Config>() {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Failed to deserialize config: {}", e);
                    Config::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to build config: {}", e);
                Config::default()
            }
        }
    }

    /// Get the database URL, falling back to the default state directory path.
    ///
    /// The `mode=rwc` parameter enables read-write access and creates the file
    /// if it doesn't exist.
    pub fn database_url(&self) -> Option<String> {
        self.database.url.clone().or_else(|| {
            Self::default_state_dir().map(|state_dir| {
                let db_path = state_dir.join("linkhoard.db");
                format!("sqlite://{}?mode=rwc", db_path.display())
            })
        })
    }

    /// The user to act as: the CLI flag wins over configuration.
    pub fn user_id(&self, flag: Option<Uuid>) -> Result<Uuid, String> {
        flag.or(self.user.id).ok_or_else(|| {
            "No user configured. Pass --user or set LINKHOARD_USER_ID / [user] id.".to_string()
        })
    }

    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "linkhoard").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Get the default state directory path.
    ///
    /// On Linux, this is `$XDG_STATE_HOME/linkhoard` or `~/.local/state/linkhoard`.
    /// On macOS/Windows, falls back to the data directory.
    pub fn default_state_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "linkhoard").map(|dirs| {
            dirs.state_dir()
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| dirs.data_dir().to_path_buf())
        })
    }
}
