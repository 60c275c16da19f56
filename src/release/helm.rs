// ABOUTME: helm upgrade --install invocation.
// ABOUTME: Renders an argv for execution and a shell-quoted line for echoing.

use std::fmt;

use super::values::ReleaseValues;
use crate::process::CommandSpec;

pub const HELM: &str = "helm";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelmUpgrade {
    pub namespace: Option<String>,
    pub release: String,
    pub chart: String,
    pub values: ReleaseValues,
}

impl HelmUpgrade {
    pub fn to_spec(&self) -> CommandSpec {
        let mut spec = CommandSpec::new(HELM).args(["upgrade", "-i"]);
        if let Some(ref ns) = self.namespace {
            spec = spec.arg(format!("--namespace={ns}"));
        }
        for (key, value) in self.values.iter() {
            spec = spec.arg("--set").arg(format!("{key}={value}"));
        }
        spec.arg(self.release.as_str()).arg(self.chart.as_str())
    }
}

impl fmt::Display for HelmUpgrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{HELM} upgrade -i")?;
        if let Some(ref ns) = self.namespace {
            write!(f, " --namespace={ns}")?;
        }
        for (key, value) in self.values.iter() {
            write!(f, " --set '{}'", shell_escape(&format!("{key}={value}")))?;
        }
        write!(f, " {} {}", self.release, self.chart)
    }
}

/// Escape for use inside single quotes.
fn shell_escape(s: &str) -> String {
    s.replace('\'', "'\\''")
}
