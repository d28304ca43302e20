use std::path::Path;

use anyhow::{Context, Result};
use sigcompat_core::config::{AuditConfig, AuditLayout};

/// Load the audit config (delegates to core helper), defaults when absent.
pub fn load_audit_config(layout: &AuditLayout) -> Result<AuditConfig> {
    sigcompat_core::config::load_audit_config(layout).with_context(|| {
        format!("Failed to load audit config at {}", layout.config_path.display())
    })
}

/// Helper to print whether a directory exists.
pub fn print_dir_status(label: &str, path: &Path) {
    let exists = path.is_dir();
    println!("- {label}: {} ({})", if exists { "OK" } else { "MISSING" }, path.display());
}

/// Print `text` with every line prefixed by `indent`.
pub fn print_indented(indent: &str, text: &str) {
    for line in text.lines() {
        println!("{indent}{line}");
    }
}

/// First 12 hex characters of a digest, or `-` when unknown.
pub fn short_digest(digest: Option<&str>) -> &str {
    match digest {
        Some(d) if d.len() > 12 => &d[..12],
        Some(d) => d,
        None => "-",
    }
}
