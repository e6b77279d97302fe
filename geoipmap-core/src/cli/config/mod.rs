mod check;
mod dump;

pub use check::*;
use clap::Subcommand;
pub use dump::*;
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum ConfigCmd {
    /// Validate a configuration file and exit
    Check {
        /// Path to the config file
        #[arg(default_value = crate::conf::DEFAULT_CONFIG_FILE)]
        path: PathBuf,
    },

    /// Print the resolved configuration, defaults included
    Dump {
        #[arg(default_value = crate::conf::DEFAULT_CONFIG_FILE)]
        path: PathBuf,

        /// Output as JSON
        #[arg(long, conflicts_with = "yaml")]
        json: bool,

        /// Output as YAML
        #[arg(long)]
        yaml: bool,
    },
}

/// Dispatch a `config` subcommand.
pub fn run(cmd: ConfigCmd) -> anyhow::Result<()> {
    match cmd {
        ConfigCmd::Check { path } => check(path),
        ConfigCmd::Dump { path, json, yaml } => dump(path, json, yaml),
    }
}
