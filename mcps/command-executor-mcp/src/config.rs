//! Configuration types and config file loading
//!
//! Startup options are merged from CLI flags, environment variables (both
//! handled in [`crate::cli`]), an optional TOML file, and defaults, in that
//! order of precedence.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::executors::DEFAULT_WSL_DISTRIBUTION;
use crate::types::{ConfigError, ExecutionLimits};

// ============================================================================
// Executor Selection
// ============================================================================

/// Where commands run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionEnvironment {
    #[default]
    Local,
    Docker,
    Wsl,
}

impl FromStr for ExecutionEnvironment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "docker" => Ok(Self::Docker),
            "wsl" => Ok(Self::Wsl),
            _ => Err(ConfigError::UnknownEnvironment(s.to_string())),
        }
    }
}

impl fmt::Display for ExecutionEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Local => "local",
            Self::Docker => "docker",
            Self::Wsl => "wsl",
        };
        f.write_str(name)
    }
}

/// Validated backend selection; fixed for the life of the server
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ExecutorConfig {
    #[default]
    Local,
    Docker { container_id: String },
    Wsl { distribution: String },
}

impl ExecutorConfig {
    /// Check the environment-specific parameters
    ///
    /// Docker requires a non-empty container id. WSL falls back to
    /// [`DEFAULT_WSL_DISTRIBUTION`]. Parameters for other environments are
    /// ignored.
    pub fn new(
        environment: ExecutionEnvironment,
        container_id: Option<String>,
        wsl_distribution: Option<String>,
    ) -> Result<Self, ConfigError> {
        match environment {
            ExecutionEnvironment::Local => Ok(Self::Local),
            ExecutionEnvironment::Docker => match container_id {
                Some(id) if !id.trim().is_empty() => Ok(Self::Docker { container_id: id }),
                _ => Err(ConfigError::MissingContainerId),
            },
            ExecutionEnvironment::Wsl => Ok(Self::Wsl {
                distribution: wsl_distribution
                    .filter(|d| !d.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_WSL_DISTRIBUTION.to_string()),
            }),
        }
    }

    pub fn environment(&self) -> ExecutionEnvironment {
        match self {
            Self::Local => ExecutionEnvironment::Local,
            Self::Docker { .. } => ExecutionEnvironment::Docker,
            Self::Wsl { .. } => ExecutionEnvironment::Wsl,
        }
    }
}

// ============================================================================
// Startup Options
// ============================================================================

/// Everything the gateway needs at construction
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerOptions {
    /// Added on top of the default allow-list
    pub allow_commands: Vec<String>,
    /// Initial default directory; `None` uses the process cwd
    pub working_directory: Option<String>,
    pub executor: ExecutorConfig,
    pub limits: ExecutionLimits,
}

/// Split a comma-separated command list, trimming entries and dropping blanks
pub fn parse_command_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(String::from)
        .collect()
}

// ============================================================================
// Config File
// ============================================================================

/// Shape of the optional TOML config file
///
/// ```toml
/// allow_commands = ["cargo", "docker"]
/// working_directory = "~/dev"
///
/// [executor]
/// environment = "docker"
/// container_id = "build-box"
///
/// [limits]
/// max_output_bytes = 524288
/// timeout_secs = 120
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub allow_commands: Vec<String>,
    #[serde(default)]
    pub working_directory: Option<String>,
    #[serde(default)]
    pub executor: ExecutorSection,
    #[serde(default)]
    pub limits: LimitsSection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutorSection {
    #[serde(default)]
    pub environment: Option<String>,
    #[serde(default)]
    pub container_id: Option<String>,
    #[serde(default)]
    pub wsl_distribution: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitsSection {
    #[serde(default)]
    pub max_output_bytes: Option<usize>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl FileConfig {
    /// Load config from the first readable location
    ///
    /// Searched in order:
    /// 1. `explicit` (from `--config` / `COMMAND_EXECUTOR_CONFIG`)
    /// 2. `./command-executor.toml`
    /// 3. `$XDG_CONFIG_HOME/command-executor/config.toml`
    /// 4. `~/.command-executor.toml`
    ///
    /// Unreadable or malformed files are logged and skipped; with no file the
    /// defaults apply.
    pub fn load(explicit: Option<&Path>) -> Self {
        if let Some(path) = explicit {
            if path.exists() {
                if let Some(config) = Self::read(path) {
                    return config;
                }
            } else {
                tracing::warn!("Config file {} does not exist", path.display());
            }
        }

        for path in Self::search_paths() {
            if path.exists() {
                if let Some(config) = Self::read(&path) {
                    return config;
                }
            }
        }

        tracing::debug!("No config file found, using defaults");
        Self::default()
    }

    fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("command-executor.toml")];

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("command-executor").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".command-executor.toml"));
        }

        paths
    }

    fn read(path: &Path) -> Option<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("Failed to read config {}: {}", path.display(), e);
                return None;
            }
        };

        match toml::from_str::<FileConfig>(&content) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                Some(config)
            }
            Err(e) => {
                tracing::warn!("Failed to parse config {}: {}", path.display(), e);
                None
            }
        }
    }
}
