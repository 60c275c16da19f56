// ABOUTME: Test support utilities.
// ABOUTME: Scripted command runner, fake CI lookups, scratch git repos and a one-shot HTTP server.

use async_trait::async_trait;
use gosu_tasks::error::{Error, Result};
use gosu_tasks::github::{CommitStatus, StatusLookup};
use gosu_tasks::jenkins::{BuildDigest, DigestLookup};
use gosu_tasks::process::{CommandError, CommandRunner, CommandSpec};
use gosu_tasks::types::{CommitSha, RepoSlug};
use std::collections::{HashMap, VecDeque};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, Once};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for tests. Safe to call multiple times.
#[allow(dead_code)]
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        let filter =
            EnvFilter::from_default_env().add_directive("gosu_tasks=debug".parse().unwrap());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

#[allow(dead_code)]
pub const COMMIT: &str = "6dcb09b5b57875f334f61aebed695e2e4193db5e";
#[allow(dead_code)]
pub const CI_URL: &str = "https://ci.example/job/widgets/job/main/12/display/redirect";

/// Answers git commands from a script and records everything it is asked to run.
#[allow(dead_code)]
pub struct ScriptedRunner {
    responses: HashMap<String, String>,
    calls: Mutex<Vec<CommandSpec>>,
    fail_status: Option<i32>,
}

#[allow(dead_code)]
impl ScriptedRunner {
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
            calls: Mutex::new(Vec::new()),
            fail_status: None,
        }
    }

    /// A working copy on `feature/login` with one commit.
    pub fn repository() -> Self {
        Self::new()
            .respond("git rev-parse HEAD", &format!("{COMMIT}\n"))
            .respond("git branch", "  main\n* feature/login\n")
            .respond("git log -1 --pretty=%B", "fix: a, b; c\n\n")
            .respond("git log -1 --pretty=format:%an", "Lee Author")
            .respond("git log -1 --pretty=format:%ae", "lee@example.com")
            .respond("git config --get user.name", "Dana Deployer\n")
            .respond("git remote get-url origin", "git@github.com:acme/widgets.git\n")
    }

    pub fn respond(mut self, command_line: &str, stdout: &str) -> Self {
        self.responses
            .insert(command_line.to_string(), stdout.to_string());
        self
    }

    /// Make every `status` call exit with `code`.
    pub fn failing_status(mut self, code: i32) -> Self {
        self.fail_status = Some(code);
        self
    }

    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.lock().unwrap().clone()
    }

    pub fn ran(&self, command_line: &str) -> bool {
        self.calls().iter().any(|c| c.to_string() == command_line)
    }

    fn record(&self, spec: &CommandSpec) {
        self.calls.lock().unwrap().push(spec.clone());
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn output(&self, spec: &CommandSpec) -> std::result::Result<String, CommandError> {
        self.record(spec);
        self.responses
            .get(&spec.to_string())
            .cloned()
            .ok_or_else(|| CommandError::Failed {
                program: spec.program().to_string(),
                code: Some(1),
                stderr: format!("unscripted command: {spec}"),
            })
    }

    async fn status(&self, spec: &CommandSpec) -> std::result::Result<(), CommandError> {
        self.record(spec);
        match self.fail_status {
            Some(code) => Err(CommandError::Failed {
                program: spec.program().to_string(),
                code: Some(code),
                stderr: String::new(),
            }),
            None => Ok(()),
        }
    }
}

#[allow(dead_code)]
pub fn ci_status() -> CommitStatus {
    CommitStatus {
        context: "continuous-integration/jenkins/branch".to_string(),
        state: "pending".to_string(),
        target_url: Some(CI_URL.to_string()),
        description: None,
    }
}

/// Status lookup that counts calls and remembers the repository it was asked about.
#[allow(dead_code)]
pub struct FakeStatuses {
    calls: AtomicUsize,
    repos: Mutex<Vec<String>>,
    found: bool,
}

#[allow(dead_code)]
impl FakeStatuses {
    pub fn found() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            repos: Mutex::new(Vec::new()),
            found: true,
        }
    }

    pub fn not_found() -> Self {
        Self {
            found: false,
            ..Self::found()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn repos(&self) -> Vec<String> {
        self.repos.lock().unwrap().clone()
    }
}

#[async_trait]
impl StatusLookup for FakeStatuses {
    async fn commit_status(&self, commit: &CommitSha, repo: &RepoSlug) -> Result<CommitStatus> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.repos.lock().unwrap().push(repo.to_string());
        if self.found {
            Ok(ci_status())
        } else {
            Err(Error::BuildNotFound {
                repo: repo.to_string(),
                commit: commit.to_string(),
                context: ci_status().context,
            })
        }
    }
}

/// Digest lookup that replays a sequence of answers; the last one repeats.
#[allow(dead_code)]
pub struct FakeDigests {
    answers: Mutex<VecDeque<Option<String>>>,
    calls: AtomicUsize,
}

#[allow(dead_code)]
impl FakeDigests {
    pub fn new(answers: &[Option<&str>]) -> Self {
        Self {
            answers: Mutex::new(answers.iter().map(|a| a.map(str::to_string)).collect()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn ready(digest: &str) -> Self {
        Self::new(&[Some(digest)])
    }

    pub fn building() -> Self {
        Self::new(&[None])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DigestLookup for FakeDigests {
    async fn build_digest(&self, status: &CommitStatus) -> Result<BuildDigest> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut answers = self.answers.lock().unwrap();
        let digest = if answers.len() > 1 {
            answers.pop_front().flatten()
        } else {
            answers.front().cloned().flatten()
        };
        Ok(BuildDigest {
            digest,
            url: status.target_url()?.to_string(),
        })
    }
}

/// Run git in `dir`, panicking on failure.
#[allow(dead_code)]
pub fn git(dir: &Path, args: &[&str]) -> String {
    let output = std::process::Command::new("git")
        .args(args)
        .current_dir(dir)
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .env("HOME", dir)
        .output()
        .expect("git should be installed");
    assert!(
        output.status.success(),
        "git {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// A scratch repository on branch `main` with one commit.
#[allow(dead_code)]
pub fn scratch_repo(message: &str) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path();
    git(path, &["init", "-q"]);
    git(path, &["symbolic-ref", "HEAD", "refs/heads/main"]);
    git(path, &["config", "user.name", "Lee Author"]);
    git(path, &["config", "user.email", "lee@example.com"]);
    git(path, &["commit", "-q", "--allow-empty", "-m", message]);
    git(
        path,
        &["remote", "add", "origin", "https://github.com/acme/widgets.git"],
    );
    dir
}

/// Serve one HTTP response on a local port; the handle yields the raw request.
#[allow(dead_code)]
pub async fn serve_once(status_line: &str, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let response = format!(
        "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        String::from_utf8_lossy(&request).into_owned()
    });

    (base_url, handle)
}
