use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use sigcompat_core::audit::{audit_files, AuditReport};
use sigcompat_core::config::{AuditConfig, AuditLayout};
use sigcompat_core::ChangeKind;
use tracing::debug;

use crate::canonicalize_or_current;
use crate::commands::{load_audit_config, print_indented, short_digest};

/// Audit two snapshots, print the result, and enforce the configured gate.
///
/// Returns an error (non-zero exit) when the gate policy is violated; the
/// report is still printed and saved first.
pub fn check_command(root: &str, before: &str, after: &str, json: bool, save: bool) -> Result<()> {
    let root_path = canonicalize_or_current(root)?;
    let layout = AuditLayout::new(&root_path);
    let config = load_audit_config(&layout)?;

    let report = audit_files(Path::new(before), Path::new(after))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, &config);
    }

    if save {
        let path = save_report(&layout, &report)?;
        if !json {
            println!("Saved report: {}", path.display());
        }
    }

    let violations = config.gate.violations(&report);
    if violations.is_empty() {
        return Ok(());
    }
    debug!(count = violations.len(), "gate violations");
    Err(anyhow!("Compatibility gate failed:\n  - {}", violations.join("\n  - ")))
}

/// Write `report` under the reports dir and return its path.
pub fn save_report(layout: &AuditLayout, report: &AuditReport) -> Result<PathBuf> {
    fs::create_dir_all(&layout.reports_dir).with_context(|| {
        format!("Failed to create reports dir: {}", layout.reports_dir.display())
    })?;
    let stamp = Utc::now().format("%Y%m%dT%H%M%S%.3fZ").to_string();
    let path = layout.report_path(&report.after.package, &stamp);
    let json = serde_json::to_string_pretty(report)?;
    fs::write(&path, json)
        .with_context(|| format!("Failed to write report: {}", path.display()))?;
    Ok(path)
}

/// Human-readable rendering of an audit report.
pub fn print_report(report: &AuditReport, config: &AuditConfig) {
    println!("Compatibility audit: {}", report.after.package);
    println!(
        "  before: {} ({})",
        report.before.package,
        short_digest(report.before.digest.as_deref())
    );
    println!(
        "  after:  {} ({})",
        report.after.package,
        short_digest(report.after.digest.as_deref())
    );
    println!();

    let shown: Vec<_> = report
        .entries
        .iter()
        .filter(|e| config.show_unchanged || e.kind != ChangeKind::Unchanged)
        .collect();

    println!("Changes ({}):", shown.len());
    if shown.is_empty() {
        println!("  (none)");
    }
    for entry in shown {
        println!("  - {} [{}]", entry.name, entry.kind.as_str());
        if matches!(entry.kind, ChangeKind::Compatible | ChangeKind::Breaking) {
            if let Some(text) = &entry.before {
                println!("      before:");
                print_indented("        ", text);
            }
            if let Some(text) = &entry.after {
                println!("      after:");
                print_indented("        ", text);
            }
        }
    }
    println!();

    let counts: Vec<String> = ChangeKind::ALL
        .iter()
        .map(|k| format!("{} {}", report.summary.count(*k), k.as_str()))
        .collect();
    println!("Summary: {}", counts.join(", "));
    if report.summary.anomalies > 0 {
        println!("Anomalies: {}", report.summary.anomalies);
    }
    println!("Required version bump: {}", report.verdict.as_str());
}
