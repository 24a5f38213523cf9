//! CLI argument definitions
//!
//! Each flag falls back to an environment variable, then to the config file.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{
    parse_command_list, ExecutionEnvironment, ExecutorConfig, FileConfig, ServerOptions,
};
use crate::types::{ConfigError, ExecutionLimits};

#[derive(Parser, Debug, Default)]
#[command(name = "command-executor-mcp")]
#[command(about = "MCP server that runs allow-listed shell commands locally, in Docker or in WSL")]
pub struct Cli {
    /// Extra allowed commands, comma-separated (added to the defaults)
    #[arg(long, alias = "allowCommands", env = "ALLOWED_COMMANDS")]
    pub allow_commands: Option<String>,

    /// Default working directory (default: current directory)
    #[arg(long, alias = "workingDirectory", env = "WORKING_DIRECTORY")]
    pub working_directory: Option<String>,

    /// Execution environment: local, docker or wsl
    #[arg(long, env = "EXECUTION_ENV")]
    pub execution_env: Option<String>,

    /// Container ID or name (required for docker)
    #[arg(long, env = "CONTAINER_ID")]
    pub container_id: Option<String>,

    /// WSL distribution (default: Ubuntu)
    #[arg(long, env = "WSL_DISTRIBUTION")]
    pub wsl_distribution: Option<String>,

    /// Maximum bytes kept per output stream
    #[arg(long, env = "MAX_OUTPUT_BYTES")]
    pub max_output_bytes: Option<usize>,

    /// Kill commands after this many seconds (default: no timeout)
    #[arg(long, env = "COMMAND_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Config file path
    #[arg(long, env = "COMMAND_EXECUTOR_CONFIG")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Load the config file and merge it under the CLI/env values
    pub fn into_options(self) -> Result<ServerOptions, ConfigError> {
        let file = FileConfig::load(self.config.as_deref());
        self.merge(file)
    }

    /// CLI/env values win; the file fills whatever is unset
    pub fn merge(self, file: FileConfig) -> Result<ServerOptions, ConfigError> {
        let allow_commands = match self.allow_commands {
            Some(raw) => parse_command_list(&raw),
            None => file.allow_commands,
        };

        let environment = self
            .execution_env
            .or(file.executor.environment)
            .map(|e| e.parse::<ExecutionEnvironment>())
            .transpose()?
            .unwrap_or_default();

        let executor = ExecutorConfig::new(
            environment,
            self.container_id.or(file.executor.container_id),
            self.wsl_distribution.or(file.executor.wsl_distribution),
        )?;

        let defaults = ExecutionLimits::default();
        let limits = ExecutionLimits {
            max_output_bytes: self
                .max_output_bytes
                .or(file.limits.max_output_bytes)
                .unwrap_or(defaults.max_output_bytes),
            timeout_secs: self.timeout_secs.or(file.limits.timeout_secs),
        };

        Ok(ServerOptions {
            allow_commands,
            working_directory: self.working_directory.or(file.working_directory),
            executor,
            limits,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ExecutorSection, LimitsSection};

    #[test]
    fn test_empty_cli_uses_defaults() {
        let options = Cli::default().merge(FileConfig::default()).unwrap();

        assert!(options.allow_commands.is_empty());
        assert_eq!(options.working_directory, None);
        assert_eq!(options.executor, ExecutorConfig::Local);
        assert_eq!(options.limits, ExecutionLimits::default());
    }

    #[test]
    fn test_cli_overrides_file() {
        let cli = Cli {
            allow_commands: Some("cargo, rustc".to_string()),
            execution_env: Some("WSL".to_string()),
            timeout_secs: Some(5),
            ..Default::default()
        };
        let file = FileConfig {
            allow_commands: vec!["echo".to_string()],
            working_directory: Some("/srv".to_string()),
            executor: ExecutorSection {
                environment: Some("local".to_string()),
                wsl_distribution: Some("Debian".to_string()),
                ..Default::default()
            },
            limits: LimitsSection {
                max_output_bytes: Some(64),
                timeout_secs: Some(60),
            },
        };

        let options = cli.merge(file).unwrap();

        assert_eq!(options.allow_commands, vec!["cargo", "rustc"]);
        assert_eq!(options.working_directory.as_deref(), Some("/srv"));
        assert_eq!(
            options.executor,
            ExecutorConfig::Wsl {
                distribution: "Debian".to_string()
            }
        );
        assert_eq!(options.limits.max_output_bytes, 64);
        assert_eq!(options.limits.timeout_secs, Some(5));
    }

    #[test]
    fn test_docker_without_container_fails() {
        let cli = Cli {
            execution_env: Some("docker".to_string()),
            ..Default::default()
        };
        let err = cli.merge(FileConfig::default()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingContainerId));
    }

    #[test]
    fn test_unknown_environment_fails() {
        let cli = Cli {
            execution_env: Some("podman".to_string()),
            ..Default::default()
        };
        let err = cli.merge(FileConfig::default()).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownEnvironment(_)));
    }

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from([
            "command-executor-mcp",
            "--execution-env",
            "docker",
            "--container-id",
            "abc123",
            "--allow-commands",
            "cargo",
        ])
        .unwrap();

        let options = cli.merge(FileConfig::default()).unwrap();
        assert_eq!(
            options.executor,
            ExecutorConfig::Docker {
                container_id: "abc123".to_string()
            }
        );
        assert_eq!(options.allow_commands, vec!["cargo"]);
    }

    #[test]
    fn test_parse_camel_case_flags() {
        let cli = Cli::try_parse_from([
            "command-executor-mcp",
            "--allowCommands=cargo,rustc",
            "--workingDirectory=/tmp",
        ])
        .unwrap();

        let options = cli.merge(FileConfig::default()).unwrap();
        assert_eq!(options.allow_commands, vec!["cargo", "rustc"]);
        assert_eq!(options.working_directory.as_deref(), Some("/tmp"));
    }
}
