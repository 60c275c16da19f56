// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands and their arguments.

use clap::{ArgAction, Parser, Subcommand};
use gosu_tasks::output::OutputMode;
use gosu_tasks::types::{CommitSha, RepoSlug};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gosu")]
#[command(about = "Look up CI build digests and deploy them with helm")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print results (for CI)
    #[arg(short, long, global = true, conflicts_with = "json")]
    pub quiet: bool,

    /// Print JSON lines instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file (default: gosu.yml in the current directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else if self.quiet {
            OutputMode::Quiet
        } else {
            OutputMode::Normal
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the artifact digest built for a commit (nothing if still building)
    Digest {
        /// Commit to look up (default: HEAD)
        #[arg(long)]
        commit: Option<CommitSha>,
    },

    /// Open the CI build page of the current commit in a browser
    #[command(alias = "open_ci")]
    OpenCi {
        /// Repository as owner/name (default: derived from the origin remote)
        #[arg(long)]
        repo: Option<RepoSlug>,
    },

    /// Deploy the current commit's artifact with helm upgrade --install
    Deploy {
        /// Target namespace (default: helm.namespace)
        #[arg(short, long)]
        namespace: Option<String>,

        /// Digest to deploy, skipping the CI lookup
        #[arg(long)]
        digest: Option<String>,

        /// Wait for the build to publish a digest
        #[arg(long, default_value_t = true, action = ArgAction::Set)]
        wait: bool,

        /// Fail immediately if the build has no digest yet
        #[arg(long, conflicts_with = "wait")]
        no_wait: bool,

        /// Repository as owner/name (default: derived from the origin remote)
        #[arg(long)]
        repo: Option<RepoSlug>,
    },

    /// Create a gosu.yml template in the current directory
    Init {
        /// Base helm release name
        #[arg(long)]
        release: Option<String>,

        /// Overwrite an existing gosu.yml
        #[arg(short, long)]
        force: bool,
    },
}
