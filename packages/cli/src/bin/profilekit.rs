use clap::Parser;
use colored::*;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

use profilekit_cli::{handle_command, parse_machine_index, SettingsCommands};
use profilekit_config::{DEFAULT_LOG_FILTER, RUST_LOG};
use profilekit_core::ensure_base_dir;
use profilekit_settings::Registry;
use profilekit_storage::SettingsStore;

#[derive(Parser)]
#[command(name = "profilekit")]
#[command(about = "Profilekit CLI - inspect, edit and share scanner settings")]
#[command(version)]
struct Cli {
    /// Settings directory (defaults to $PROFILEKIT_HOME, then ~/.profilekit)
    #[arg(long, global = true)]
    home: Option<PathBuf>,

    /// Machine the command applies to
    #[arg(long, global = true, default_value = "0", value_parser = parse_machine_index)]
    machine: usize,

    #[command(subcommand)]
    command: SettingsCommands,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            process::exit(1);
        }
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(RUST_LOG).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn run(cli: Cli) -> Result<String, Box<dyn std::error::Error>> {
    let store = match cli.home {
        Some(dir) => SettingsStore::in_dir(dir),
        None => SettingsStore::in_dir(ensure_base_dir()?),
    };

    let mut registry = Registry::with_defaults()?;
    // Profile values load into the selected machine's slot
    registry.select_machine(cli.machine)?;
    store.load(&mut registry);

    handle_command(cli.command, &mut registry, &store)
}
