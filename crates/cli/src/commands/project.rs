use std::fs;

use crate::commands::{load_audit_config, print_dir_status};
use crate::{canonicalize_or_current, infer_workspace_name};
use anyhow::{Context, Result};
use serde::Serialize;
use sigcompat_core::config::{AuditConfig, AuditLayout, GatePolicy};

#[derive(Serialize)]
pub struct WorkspaceInfo {
    pub name: String,
    pub root: String,
    pub config_file: String,
    pub config_present: bool,
    pub config_version: String,
    pub gate: GatePolicy,
    pub show_unchanged: bool,
    pub reports_dir: String,
}

/// Initialize a new audit workspace at `root`.
pub fn init_command(root: &str, name: Option<String>) -> Result<()> {
    let root_path = canonicalize_or_current(root)?;
    let layout = AuditLayout::new(&root_path);

    // Derive workspace name if not provided.
    let workspace_name = match name {
        Some(n) => n,
        None => infer_workspace_name(&root_path),
    };

    fs::create_dir_all(&layout.meta_dir)
        .with_context(|| format!("Failed to create meta dir: {}", layout.meta_dir.display()))?;
    fs::create_dir_all(&layout.reports_dir).with_context(|| {
        format!("Failed to create reports dir: {}", layout.reports_dir.display())
    })?;

    let config = AuditConfig::new(&workspace_name);
    let json = serde_json::to_string_pretty(&config)?;
    fs::write(&layout.config_path, json).with_context(|| {
        format!("Failed to write audit config: {}", layout.config_path.display())
    })?;

    println!("Initialized sigcompat workspace:");
    println!("  Name: {}", workspace_name);
    println!("  Root: {}", layout.root.display());
    println!("  Config: {}", layout.config_path.display());
    println!("  Reports dir: {}", layout.reports_dir.display());

    Ok(())
}

/// Show basic information about an audit workspace.
pub fn info_command(root: &str, json: bool) -> Result<()> {
    let root_path = canonicalize_or_current(root)?;
    let layout = AuditLayout::new(&root_path);
    let config = load_audit_config(&layout)?;
    let config_present = layout.config_path.exists();

    if json {
        let info = WorkspaceInfo {
            name: config.name.clone(),
            root: layout.root.display().to_string(),
            config_file: layout.config_path.display().to_string(),
            config_present,
            config_version: config.config_version.clone(),
            gate: config.gate.clone(),
            show_unchanged: config.show_unchanged,
            reports_dir: layout.reports_dir.display().to_string(),
        };
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("sigcompat Workspace Info");
    println!("========================");
    println!("Name: {}", config.name);
    println!("Root: {}", layout.root.display());
    println!(
        "Config file: {}{}",
        layout.config_path.display(),
        if config_present { "" } else { " (missing, using defaults)" }
    );
    println!("Config version: {}", config.config_version);
    println!("Gate:");
    println!("  fail on breaking: {}", config.gate.fail_on_breaking);
    println!("  fail on removed: {}", config.gate.fail_on_removed);
    println!("  fail on anomaly: {}", config.gate.fail_on_anomaly);
    println!();

    println!("Directories:");
    print_dir_status("Meta dir (.sigcompat)", &layout.meta_dir);
    print_dir_status("Reports dir", &layout.reports_dir);

    Ok(())
}
