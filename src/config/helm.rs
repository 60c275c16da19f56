// ABOUTME: Helm section of the configuration.
// ABOUTME: Default namespace, base release name and chart location.

use serde::Deserialize;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct HelmConfig {
    #[serde(default)]
    pub namespace: Option<String>,

    #[serde(default)]
    pub release: Option<String>,

    #[serde(default = "default_chart")]
    pub chart: String,
}

fn default_chart() -> String {
    "./chart".to_string()
}

impl Default for HelmConfig {
    fn default() -> Self {
        Self {
            namespace: None,
            release: None,
            chart: default_chart(),
        }
    }
}

impl HelmConfig {
    /// Explicit namespace, else the configured default.
    pub fn namespace<'a>(&'a self, explicit: Option<&'a str>) -> Option<&'a str> {
        explicit
            .or(self.namespace.as_deref())
            .filter(|ns| !ns.is_empty())
    }

    /// Base release name, suffixed with `-<namespace>` when a namespace is given.
    pub fn release_name(&self, namespace: Option<&str>) -> Result<String> {
        let base = self
            .release
            .as_deref()
            .filter(|r| !r.is_empty())
            .ok_or_else(|| Error::InvalidConfig("helm.release is not set".to_string()))?;

        Ok(match namespace {
            Some(ns) => format!("{base}-{ns}"),
            None => base.to_string(),
        })
    }
}
