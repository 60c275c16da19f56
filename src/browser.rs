// ABOUTME: Opens URLs in the user's browser.
// ABOUTME: Honours $BROWSER, otherwise uses the platform's default opener.

use crate::error::Result;
use crate::process::{CommandRunner, CommandSpec};

pub const BROWSER_VAR: &str = "BROWSER";

/// Command that opens `url`, using `browser` when given.
pub fn opener_command(url: &str, browser: Option<&str>) -> CommandSpec {
    if let Some(browser) = browser.filter(|b| !b.trim().is_empty()) {
        return CommandSpec::new(browser.trim()).arg(url);
    }

    if cfg!(target_os = "macos") {
        CommandSpec::new("open").arg(url)
    } else if cfg!(target_os = "windows") {
        CommandSpec::new("cmd").args(["/C", "start", ""]).arg(url)
    } else {
        CommandSpec::new("xdg-open").arg(url)
    }
}

/// Run the opener with the terminal's stdio; output is not captured.
pub async fn open_in_browser<R: CommandRunner + ?Sized>(runner: &R, url: &str) -> Result<()> {
    let browser = std::env::var(BROWSER_VAR).ok();
    let spec = opener_command(url, browser.as_deref());
    tracing::debug!("Opening {} with {}", url, spec.program());
    runner.status(&spec).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_browser_wins() {
        let spec = opener_command("https://ci.example/1", Some("firefox"));
        assert_eq!(spec.program(), "firefox");
        assert_eq!(spec.get_args(), ["https://ci.example/1"]);
    }

    #[test]
    fn blank_browser_uses_platform_opener() {
        let spec = opener_command("https://ci.example/1", Some("  "));
        assert_ne!(spec.program(), "  ");
        assert_eq!(spec.get_args().last().map(String::as_str), Some("https://ci.example/1"));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn linux_uses_xdg_open() {
        assert_eq!(opener_command("https://ci.example/1", None).program(), "xdg-open");
    }
}
