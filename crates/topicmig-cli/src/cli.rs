//! Command-line definition and dispatch.
//!
//! Kept in the library so the exit-code contract can be exercised without
//! spawning the binary.

use clap::{Parser, Subcommand};

use crate::options::EntryArgs;
use crate::topic::{run_topic, TopicArgs};

/// Exit code for a successful run.
pub const EXIT_OK: u8 = 0;
/// Exit code when a command fails, e.g. a migration does not load.
pub const EXIT_FAILURE: u8 = 1;
/// Exit code for invalid options, matching clap's usage-error code.
pub const EXIT_USAGE: u8 = 2;

/// topicmig — versioned migrations for broker topics.
///
/// Reads `v0001_<description>.yaml` migration files from a directory and
/// plans them in version order.
#[derive(Parser, Debug)]
#[command(name = "topicmig", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(flatten)]
    pub entry: EntryArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Discover, load and print the topic migrations of a directory.
    Topic(TopicArgs),
}

/// Validate the global options and run the selected subcommand.
///
/// Returns the process exit code.
pub fn run(cli: &Cli) -> u8 {
    let options = match cli.entry.validate() {
        Ok(options) => options,
        Err(e) => {
            tracing::error!("{e}");
            return EXIT_USAGE;
        }
    };

    let configuration = match options.configuration() {
        Ok(configuration) => configuration,
        Err(e) => {
            tracing::error!("{e}");
            return EXIT_USAGE;
        }
    };
    tracing::debug!(
        config_file = %options.config_file().display(),
        entries = configuration.len(),
        "loaded tool configuration"
    );

    let kafka = match options.kafka_configuration() {
        Ok(kafka) => kafka,
        Err(e) => {
            tracing::error!("{e}");
            return EXIT_USAGE;
        }
    };

    let result = match &cli.command {
        Commands::Topic(args) => run_topic(args, &kafka),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e:#}");
            EXIT_FAILURE
        }
    }
}
