//! Integration test: exit codes of `topicmig` for option errors and for the
//! `topic` subcommand.

use std::path::{Path, PathBuf};

use clap::Parser;

use topicmig_cli::cli::{EXIT_FAILURE, EXIT_OK, EXIT_USAGE};
use topicmig_cli::{run, Cli};

struct Workspace {
    dir: tempfile::TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".topicmig.yaml"), "environment: test\n").unwrap();
        std::fs::write(
            dir.path().join("kafka.properties"),
            "bootstrap.servers=localhost:9092\n",
        )
        .unwrap();
        std::fs::create_dir(dir.path().join("topics")).unwrap();
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn migration(&self, name: &str, content: &str) {
        std::fs::write(self.path("topics").join(name), content).unwrap();
    }

    fn run(&self, config: &Path, kafka: &Path, extra: &[&str]) -> u8 {
        let mut args = vec![
            "topicmig".to_string(),
            format!("--config-file={}", config.display()),
            format!("--kafka-config-file={}", kafka.display()),
            "topic".to_string(),
            format!("--directory={}", self.path("topics").display()),
        ];
        args.extend(extra.iter().map(|s| s.to_string()));
        run(&Cli::try_parse_from(args).unwrap())
    }
}

#[test]
fn exit_code_2_when_config_file_does_not_exist() {
    let ws = Workspace::new();
    let code = ws.run(&ws.path("_not_found.yaml"), &ws.path("kafka.properties"), &[]);
    assert_eq!(code, EXIT_USAGE);
}

#[test]
fn exit_code_2_when_kafka_config_file_does_not_exist() {
    let ws = Workspace::new();
    let code = ws.run(
        &ws.path(".topicmig.yaml"),
        &ws.path("__not_found_kafka.properties"),
        &[],
    );
    assert_eq!(code, EXIT_USAGE);
}

#[test]
fn exit_code_2_when_bootstrap_servers_is_blank() {
    let ws = Workspace::new();
    let code = ws.run(
        &ws.path(".topicmig.yaml"),
        &ws.path("kafka.properties"),
        &["--bootstrap-servers= "],
    );
    assert_eq!(code, EXIT_USAGE);
}

#[test]
fn exit_code_0_for_loadable_migrations() {
    let ws = Workspace::new();
    ws.migration("v0001_create.yaml", "operation: create\npartitions: 1\n");
    ws.migration("v0002_tune.yml", "operation: alter\nconfig:\n  preallocate: true\n");
    let code = ws.run(&ws.path(".topicmig.yaml"), &ws.path("kafka.properties"), &[]);
    assert_eq!(code, EXIT_OK);
}

#[test]
fn exit_code_1_for_invalid_migration() {
    let ws = Workspace::new();
    ws.migration("v0001_create.yaml", "operation: create\n  partitions: 1\n bad\n");
    let code = ws.run(&ws.path(".topicmig.yaml"), &ws.path("kafka.properties"), &[]);
    assert_eq!(code, EXIT_FAILURE);
}

#[test]
fn exit_code_1_for_duplicate_versions() {
    let ws = Workspace::new();
    ws.migration("v0001_a.yaml", "operation: create\n");
    ws.migration("v0001_b.yaml", "operation: create\n");
    let code = ws.run(
        &ws.path(".topicmig.yaml"),
        &ws.path("kafka.properties"),
        &["--format=json"],
    );
    assert_eq!(code, EXIT_FAILURE);
}
