// ABOUTME: Entry point for the gosu CLI application.
// ABOUTME: Parses arguments and dispatches to appropriate command handlers.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use gosu_tasks::ci_env::CiEnvironment;
use gosu_tasks::config::{self, Config};
use gosu_tasks::error::{Error, Result};
use gosu_tasks::output::Output;
use gosu_tasks::process::SystemRunner;
use gosu_tasks::release::DeployRequest;
use std::env;
use std::path::Path;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let mode = cli.output_mode();

    if let Err(e) = run(cli, Output::new(mode)).await {
        match e {
            Error::MissingCredentials { service } => {
                println!("{}", commands::setup_instructions(service));
            }
            e => Output::new(mode).error(&e.to_string()),
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli, output: Output) -> Result<()> {
    let cwd = env::current_dir()?;
    let overrides = CiEnvironment::from_env();
    let runner = SystemRunner;

    match cli.command {
        Commands::Init { release, force } => {
            let path = config::init_config(&cwd, release.as_deref(), force)?;
            output.success(&format!("Created {}", path.display()));
            Ok(())
        }
        Commands::Digest { commit } => {
            let config = load_config(cli.config.as_deref(), &cwd)?;
            commands::digest(&config, &runner, &overrides, commit, &output).await
        }
        Commands::OpenCi { repo } => {
            let config = load_config(cli.config.as_deref(), &cwd)?;
            commands::open_ci(&config, &runner, &overrides, repo, &output).await
        }
        Commands::Deploy {
            namespace,
            digest,
            wait,
            no_wait,
            repo,
        } => {
            let config = load_config(cli.config.as_deref(), &cwd)?;
            let request = DeployRequest {
                namespace,
                digest,
                wait: wait && !no_wait,
                repo,
            };
            commands::deploy(&config, &runner, &overrides, request, output).await
        }
    }
}

fn load_config(explicit: Option<&Path>, cwd: &Path) -> Result<Config> {
    match explicit {
        Some(path) => Config::load(path),
        None => Config::discover_or_default(cwd),
    }
}
