use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use geoipmap_core::cli::config::{self, ConfigCmd};
use geoipmap_core::conf::resolve_config;
use geoipmap_core::logging::{LogMode, default_log_mode, init_logging};
use geoipmap_core::server;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "geoipmap",
    version,
    about = "Reads access logs from stdin and serves a live map of where visitors come from",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    run: RunArgs,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Ingest stdin and serve the map (default)
    Run(RunArgs),

    /// Configuration tooling
    Config {
        #[command(subcommand)]
        cmd: ConfigCmd,
    },
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Path to an HCL config file; defaults to ./geoipmap.hcl when present
    #[arg(long)]
    config: Option<PathBuf>,

    /// Page title shown on the map
    #[arg(long)]
    title: Option<String>,

    /// Port to listen on, keeping the configured host
    #[arg(long, env = "PORT")]
    port: Option<u16>,

    /// Open the map in the default browser once the server is listening
    #[arg(long)]
    open: bool,

    /// Log output format; pretty on a terminal, json otherwise
    #[arg(long, value_enum)]
    log_format: Option<LogMode>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Config { cmd }) => {
            init_logging(default_log_mode());
            config::run(cmd)
        }
        Some(Command::Run(args)) => run(args),
        None => run(cli.run),
    }
}

fn run(args: RunArgs) -> anyhow::Result<()> {
    init_logging(args.log_format.unwrap_or_else(default_log_mode));

    let cwd = std::env::current_dir().context("failed to read working directory")?;
    let mut cfg = resolve_config(args.config.as_deref(), &cwd)?;
    cfg.server.apply_overrides(args.title, args.port)?;
    if args.open {
        cfg.server.open_browser = true;
    }

    tracing::info!(listen = %cfg.server.listen, "starting geoipmap");

    server::run(cfg)
}
