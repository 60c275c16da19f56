// ABOUTME: Command module aggregator for the gosu CLI.
// ABOUTME: Re-exports digest, open-ci and deploy command handlers.

mod deploy;
mod digest;
mod open_ci;

pub use deploy::deploy;
pub use digest::digest;
pub use open_ci::open_ci;

/// Setup help shown when a service's credentials are missing.
pub fn setup_instructions(service: &str) -> String {
    match service {
        "github" => "\
Set github.username and github.password.
Obtain a token here https://help.github.com/en/articles/creating-a-personal-access-token-for-the-command-line
Full \"repo\" scope is required to access organization private repos."
            .to_string(),
        other => format!("Set {other}.username and {other}.password."),
    }
}
