//! Audit configuration and workspace layout.
//!
//! The config lives at `.sigcompat/config.json` under the workspace root.
//! It is optional: without it, [`AuditConfig::default`] applies.

mod layout;

pub use layout::AuditLayout;

use serde::{Deserialize, Serialize};

use crate::audit::AuditReport;
use crate::classify::ChangeKind;
use crate::error::ConfigError;

pub const CONFIG_VERSION: &str = "0.1.0";

fn default_true() -> bool {
    true
}

/// Which findings make an audit fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatePolicy {
    #[serde(default = "default_true")]
    pub fail_on_breaking: bool,
    #[serde(default = "default_true")]
    pub fail_on_removed: bool,
    #[serde(default)]
    pub fail_on_anomaly: bool,
}

impl Default for GatePolicy {
    fn default() -> Self {
        Self { fail_on_breaking: true, fail_on_removed: true, fail_on_anomaly: false }
    }
}

impl GatePolicy {
    /// Human-readable reasons the report fails this policy; empty if it passes.
    pub fn violations(&self, report: &AuditReport) -> Vec<String> {
        let mut out = Vec::new();
        for entry in &report.entries {
            let reason = match entry.kind {
                ChangeKind::Breaking if self.fail_on_breaking => Some("breaking change"),
                ChangeKind::Removed if self.fail_on_removed => Some("removed"),
                _ => None,
            };
            if let Some(reason) = reason {
                out.push(format!("{}: {}", entry.name, reason));
            }
            if self.fail_on_anomaly && entry.anomaly.is_some() {
                out.push(format!("{}: anomalous change record", entry.name));
            }
        }
        out
    }
}

/// Serializable configuration describing an audit workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Human-friendly workspace name.
    pub name: String,
    /// Optional description / notes.
    #[serde(default)]
    pub description: Option<String>,
    /// Schema/config version. This is about the config format, not the API version.
    pub config_version: String,
    #[serde(default)]
    pub gate: GatePolicy,
    /// Include unchanged functions in text output.
    #[serde(default)]
    pub show_unchanged: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self::new("unnamed-audit")
    }
}

impl AuditConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            config_version: CONFIG_VERSION.to_string(),
            gate: GatePolicy::default(),
            show_unchanged: false,
        }
    }
}

/// Load the config for `layout`, falling back to defaults when it does not exist.
pub fn load_audit_config(layout: &AuditLayout) -> Result<AuditConfig, ConfigError> {
    if !layout.config_path.exists() {
        return Ok(AuditConfig::default());
    }
    let body = std::fs::read_to_string(&layout.config_path)
        .map_err(|source| ConfigError::Io { path: layout.config_path.clone(), source })?;
    Ok(serde_json::from_str(&body)?)
}
