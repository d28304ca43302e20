use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use sigcompat_core::audit::AuditReport;
use sigcompat_core::config::AuditLayout;

use crate::canonicalize_or_current;

#[derive(Debug, Serialize, Clone)]
pub struct ReportInfo {
    pub file: String,
    pub package: String,
    pub generated_at: String,
    pub verdict: String,
    pub functions: usize,
}

/// Discover saved reports under reports/. Unparseable files are skipped.
pub fn collect_reports(dir: &Path) -> Result<Vec<ReportInfo>> {
    let mut reports = Vec::new();
    if !dir.is_dir() {
        return Ok(reports);
    }

    for entry in fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))? {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type()?.is_file() || path.extension().and_then(|e| e.to_str()) != Some("json")
        {
            continue;
        }
        let parsed = fs::read_to_string(&path)
            .ok()
            .and_then(|body| serde_json::from_str::<AuditReport>(&body).ok());
        if let Some(report) = parsed {
            reports.push(ReportInfo {
                file: path.display().to_string(),
                package: report.after.package,
                generated_at: report.generated_at,
                verdict: report.verdict.as_str().to_string(),
                functions: report.entries.len(),
            });
        }
    }

    reports.sort_by(|a, b| a.generated_at.cmp(&b.generated_at).then(a.file.cmp(&b.file)));
    Ok(reports)
}

/// List saved audit reports.
pub fn list_reports_command(root: &str, json: bool) -> Result<()> {
    let root_path = canonicalize_or_current(root)?;
    let layout = AuditLayout::new(&root_path);
    let reports = collect_reports(&layout.reports_dir)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    println!("Reports:");
    if reports.is_empty() {
        println!("(none)");
        return Ok(());
    }
    for r in reports {
        println!(
            "- {} [{}] {} functions, generated {} ({})",
            r.package, r.verdict, r.functions, r.generated_at, r.file
        );
    }

    Ok(())
}
