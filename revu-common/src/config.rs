//! Configuration loading and root folder resolution
//!
//! Root folder priority order:
//! 1. Command-line argument (highest priority)
//! 2. `REVU_ROOT_FOLDER` environment variable
//! 3. TOML config file (`root_folder` key)
//! 4. OS-dependent compiled default (fallback)
//!
//! A missing or unreadable TOML file never stops startup: it is logged and
//! compiled defaults are used instead.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variable overriding the root folder
pub const ROOT_FOLDER_ENV: &str = "REVU_ROOT_FOLDER";

/// Database file name inside the root folder
pub const DATABASE_FILE: &str = "revu.db";

/// Default listen port
pub const DEFAULT_PORT: u16 = 5780;

/// Default admin session lifetime
pub const DEFAULT_SESSION_TTL_HOURS: i64 = 12;

/// Compiled-in defaults for the current platform
#[derive(Debug, Clone)]
pub struct CompiledDefaults {
    pub root_folder: PathBuf,
    pub log_level: String,
    pub bind: String,
    pub port: u16,
}

impl CompiledDefaults {
    pub fn for_current_platform() -> Self {
        Self {
            root_folder: default_root_folder(),
            log_level: "info".to_string(),
            bind: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// Logging section of the TOML config
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// tracing filter directive, e.g. "info" or "revu_server=debug"
    pub level: Option<String>,
}

/// Contents of `config.toml`; every key is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    pub root_folder: Option<PathBuf>,
    pub bind: Option<String>,
    pub port: Option<u16>,
    pub session_ttl_hours: Option<i64>,
    /// Bootstrap admin account, created at startup when absent
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl TomlConfig {
    /// Parse a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))
    }

    /// Load the platform config file, falling back to defaults
    ///
    /// A read or parse failure is returned next to the defaults so callers
    /// that load config before logging is installed can report it later.
    pub fn load() -> (Self, Option<Error>) {
        Self::load_from(config_file_path().as_deref())
    }

    /// Load `path` if given; a missing path means defaults with no failure
    pub fn load_from(path: Option<&Path>) -> (Self, Option<Error>) {
        match path {
            Some(path) => match Self::from_file(path) {
                Ok(config) => (config, None),
                Err(e) => (Self::default(), Some(e)),
            },
            None => (Self::default(), None),
        }
    }

    /// Load the platform config file and log any fallback to defaults
    pub fn load_or_default() -> Self {
        let (config, failure) = Self::load();
        match failure {
            Some(e) => warn!("{} (using defaults)", e),
            None => debug!("Config loaded"),
        }
        config
    }

    /// Session lifetime in hours, never below one
    pub fn session_ttl_hours(&self) -> i64 {
        self.session_ttl_hours
            .unwrap_or(DEFAULT_SESSION_TTL_HOURS)
            .max(1)
    }
}

/// Resolves the root folder for one module using the priority order above
#[derive(Debug, Clone)]
pub struct RootFolderResolver {
    module_name: String,
    cli_arg: Option<PathBuf>,
    toml: Option<TomlConfig>,
}

impl RootFolderResolver {
    pub fn new(module_name: impl Into<String>) -> Self {
        Self {
            module_name: module_name.into(),
            cli_arg: None,
            toml: None,
        }
    }

    /// Set the command-line override
    pub fn with_cli_arg(mut self, path: Option<PathBuf>) -> Self {
        self.cli_arg = path;
        self
    }

    /// Use an already loaded TOML config instead of reading the platform file
    pub fn with_toml(mut self, config: TomlConfig) -> Self {
        self.toml = Some(config);
        self
    }

    pub fn resolve(&self) -> PathBuf {
        if let Some(path) = &self.cli_arg {
            debug!("{}: root folder from command line", self.module_name);
            return path.clone();
        }

        if let Ok(path) = std::env::var(ROOT_FOLDER_ENV) {
            if !path.trim().is_empty() {
                debug!("{}: root folder from {}", self.module_name, ROOT_FOLDER_ENV);
                return PathBuf::from(path);
            }
        }

        let toml = match &self.toml {
            Some(config) => config.clone(),
            None => TomlConfig::load_or_default(),
        };
        if let Some(path) = toml.root_folder {
            debug!("{}: root folder from config file", self.module_name);
            return path;
        }

        CompiledDefaults::for_current_platform().root_folder
    }
}

/// Creates the root folder and derives file locations inside it
#[derive(Debug, Clone)]
pub struct RootFolderInitializer {
    root_folder: PathBuf,
}

impl RootFolderInitializer {
    pub fn new(root_folder: PathBuf) -> Self {
        Self { root_folder }
    }

    pub fn ensure_directory_exists(&self) -> Result<()> {
        if !self.root_folder.exists() {
            std::fs::create_dir_all(&self.root_folder)?;
            tracing::info!("Created root folder: {}", self.root_folder.display());
        }
        Ok(())
    }

    pub fn database_path(&self) -> PathBuf {
        self.root_folder.join(DATABASE_FILE)
    }
}

/// Platform config file, if one exists
fn config_file_path() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("revu").join("config.toml"));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(unix) {
        let system_config = PathBuf::from("/etc/revu/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// OS-dependent default root folder path
fn default_root_folder() -> PathBuf {
    if cfg!(target_os = "windows") {
        // %LOCALAPPDATA%\revu
        dirs::data_local_dir()
            .map(|d| d.join("revu"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\revu"))
    } else if cfg!(target_os = "macos") {
        // ~/Library/Application Support/revu
        dirs::data_dir()
            .map(|d| d.join("revu"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/revu"))
    } else {
        // ~/.local/share/revu (or /var/lib/revu for system-wide)
        dirs::data_local_dir()
            .map(|d| d.join("revu"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/revu"))
    }
}
