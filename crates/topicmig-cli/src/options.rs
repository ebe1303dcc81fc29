//! # Global Options
//!
//! Options shared by every subcommand. Handling is two-phase: clap fills
//! [`EntryArgs`] with raw values, then [`EntryArgs::validate`] checks them
//! and produces [`EntryOptions`]. Validation failures are option errors and
//! map to exit code 2, the same code clap uses for usage errors.

use std::path::{Path, PathBuf};

use clap::Args;
use thiserror::Error;

use crate::properties::Properties;

/// Client property holding the broker list.
pub const BOOTSTRAP_SERVERS: &str = "bootstrap.servers";

/// Errors raised while validating or resolving global options.
#[derive(Debug, Error)]
pub enum OptionsError {
    /// The tool configuration file does not exist.
    #[error("{path} not found")]
    ConfigFileNotFound { path: PathBuf },

    /// The client properties file does not exist.
    #[error("{path} not found")]
    KafkaConfigFileNotFound { path: PathBuf },

    /// `--bootstrap-servers` was given but is blank.
    #[error("--bootstrap-servers must not be blank")]
    BlankBootstrapServers,

    /// A properties file exists but could not be read.
    #[error("{path} can't be read: {source}")]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Raw global options as parsed from the command line.
#[derive(Args, Debug, Clone)]
pub struct EntryArgs {
    /// Tool configuration file.
    #[arg(long, global = true, default_value = ".topicmig.yaml")]
    pub config_file: PathBuf,

    /// Properties file for the broker clients.
    #[arg(long, global = true, default_value = "kafka.properties")]
    pub kafka_config_file: PathBuf,

    /// Host/port pairs of the brokers; overrides `bootstrap.servers`.
    #[arg(long, global = true)]
    pub bootstrap_servers: Option<String>,
}

impl EntryArgs {
    /// Check the raw options.
    ///
    /// Both files must exist and an explicit `--bootstrap-servers` must not
    /// be blank. Error messages carry absolute paths.
    pub fn validate(&self) -> Result<EntryOptions, OptionsError> {
        if !self.config_file.exists() {
            return Err(OptionsError::ConfigFileNotFound {
                path: absolute(&self.config_file),
            });
        }
        if !self.kafka_config_file.exists() {
            return Err(OptionsError::KafkaConfigFileNotFound {
                path: absolute(&self.kafka_config_file),
            });
        }
        let bootstrap_servers = self
            .bootstrap_servers
            .as_deref()
            .map(require_non_blank)
            .transpose()?;

        Ok(EntryOptions {
            config_file: self.config_file.clone(),
            kafka_config_file: self.kafka_config_file.clone(),
            bootstrap_servers,
        })
    }
}

/// Global options that passed validation.
#[derive(Debug, Clone)]
pub struct EntryOptions {
    config_file: PathBuf,
    kafka_config_file: PathBuf,
    bootstrap_servers: Option<String>,
}

impl EntryOptions {
    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    pub fn kafka_config_file(&self) -> &Path {
        &self.kafka_config_file
    }

    pub fn bootstrap_servers(&self) -> Option<&str> {
        self.bootstrap_servers.as_deref()
    }

    /// Read the tool configuration file.
    pub fn configuration(&self) -> Result<Properties, OptionsError> {
        read_properties(&self.config_file)
    }

    /// Read the client properties, applying `--bootstrap-servers` when set.
    pub fn kafka_configuration(&self) -> Result<Properties, OptionsError> {
        let mut props = read_properties(&self.kafka_config_file)?;
        if let Some(servers) = &self.bootstrap_servers {
            let previous = props.insert(BOOTSTRAP_SERVERS, servers.clone());
            tracing::debug!(
                bootstrap_servers = %servers,
                previous = previous.as_deref().unwrap_or("<unset>"),
                "bootstrap.servers overridden from the command line"
            );
        }
        Ok(props)
    }
}

fn read_properties(path: &Path) -> Result<Properties, OptionsError> {
    Properties::load(path).map_err(|source| OptionsError::Unreadable {
        path: absolute(path),
        source,
    })
}

fn require_non_blank(s: &str) -> Result<String, OptionsError> {
    if s.trim().is_empty() {
        Err(OptionsError::BlankBootstrapServers)
    } else {
        Ok(s.to_string())
    }
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Files {
        _dir: tempfile::TempDir,
        config: PathBuf,
        kafka: PathBuf,
    }

    fn files() -> Files {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join(".topicmig.yaml");
        let kafka = dir.path().join("kafka.properties");
        std::fs::write(&config, "directory: ./topics\n").unwrap();
        std::fs::write(&kafka, "bootstrap.servers=broker:9092\nclient.id=topicmig\n").unwrap();
        Files {
            _dir: dir,
            config,
            kafka,
        }
    }

    fn args(files: &Files, bootstrap: Option<&str>) -> EntryArgs {
        EntryArgs {
            config_file: files.config.clone(),
            kafka_config_file: files.kafka.clone(),
            bootstrap_servers: bootstrap.map(str::to_string),
        }
    }

    #[test]
    fn missing_config_file_is_rejected_with_absolute_path() {
        let f = files();
        let mut a = args(&f, None);
        a.config_file = PathBuf::from("_not_found.yaml");
        let err = a.validate().unwrap_err();
        match err {
            OptionsError::ConfigFileNotFound { path } => {
                assert!(path.is_absolute());
                assert!(path.ends_with("_not_found.yaml"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_kafka_config_is_rejected() {
        let f = files();
        let mut a = args(&f, None);
        a.kafka_config_file = f.kafka.with_file_name("__not_found_kafka.properties");
        assert!(matches!(
            a.validate(),
            Err(OptionsError::KafkaConfigFileNotFound { .. })
        ));
    }

    #[test]
    fn blank_bootstrap_servers_is_rejected() {
        let f = files();
        assert!(matches!(
            args(&f, Some("   ")).validate(),
            Err(OptionsError::BlankBootstrapServers)
        ));
    }

    #[test]
    fn kafka_configuration_without_override() {
        let f = files();
        let opts = args(&f, None).validate().unwrap();
        let props = opts.kafka_configuration().unwrap();
        assert_eq!(props.get(BOOTSTRAP_SERVERS), Some("broker:9092"));
        assert_eq!(props.get("client.id"), Some("topicmig"));
    }

    #[test]
    fn bootstrap_servers_override_replaces_property() {
        let f = files();
        let opts = args(&f, Some("other:9093")).validate().unwrap();
        assert_eq!(opts.bootstrap_servers(), Some("other:9093"));
        let props = opts.kafka_configuration().unwrap();
        assert_eq!(props.get(BOOTSTRAP_SERVERS), Some("other:9093"));
    }

    #[test]
    fn configuration_reads_tool_config() {
        let f = files();
        let opts = args(&f, None).validate().unwrap();
        assert_eq!(opts.configuration().unwrap().get("directory"), Some("./topics"));
        assert_eq!(opts.config_file(), f.config.as_path());
    }

    #[test]
    fn unreadable_kafka_config_is_an_options_error() {
        let f = files();
        let mut a = args(&f, None);
        // A directory exists but cannot be read as a properties file.
        a.kafka_config_file = f.kafka.parent().unwrap().to_path_buf();
        let opts = a.validate().unwrap();
        assert!(matches!(
            opts.kafka_configuration(),
            Err(OptionsError::Unreadable { .. })
        ));
    }
}
