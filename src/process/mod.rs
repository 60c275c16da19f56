// ABOUTME: External command execution behind a substitutable runner trait.
// ABOUTME: git, helm and the browser opener all go through CommandRunner.

mod error;

pub use error::{CommandError, FailedSnafu, SpawnSnafu};

use async_trait::async_trait;
use snafu::ResultExt;
use std::fmt;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;

/// A program invocation: program name, arguments and optional working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    program: String,
    args: Vec<String>,
    dir: Option<PathBuf>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            dir: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(ref dir) = self.dir {
            cmd.current_dir(dir);
        }
        cmd
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Runs external programs.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run to completion and return captured stdout.
    ///
    /// A non-zero exit is an error carrying the captured stderr.
    async fn output(&self, spec: &CommandSpec) -> Result<String, CommandError>;

    /// Run with inherited stdio, failing on non-zero exit.
    async fn status(&self, spec: &CommandSpec) -> Result<(), CommandError>;
}

/// Runs programs on the local system via `tokio::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn output(&self, spec: &CommandSpec) -> Result<String, CommandError> {
        tracing::debug!("Running {}", spec);

        let output = spec
            .to_command()
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .context(SpawnSnafu {
                program: spec.program(),
            })?;

        if !output.status.success() {
            return FailedSnafu {
                program: spec.program(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            }
            .fail();
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    async fn status(&self, spec: &CommandSpec) -> Result<(), CommandError> {
        tracing::info!("Executing {}", spec);

        let status = spec.to_command().status().await.context(SpawnSnafu {
            program: spec.program(),
        })?;

        if !status.success() {
            return FailedSnafu {
                program: spec.program(),
                code: status.code(),
                stderr: String::new(),
            }
            .fail();
        }

        Ok(())
    }
}
