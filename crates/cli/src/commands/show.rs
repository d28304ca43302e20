use std::path::Path;

use anyhow::{anyhow, Context, Result};
use sigcompat_core::classify::Classifier;
use sigcompat_core::diff::pair_by_name;
use sigcompat_core::render::SourceRenderer;
use sigcompat_core::snapshot::load_snapshot;

use crate::commands::print_indented;

/// Print the classification and both declarations of a single function.
pub fn show_command(before: &str, after: &str, name: &str) -> Result<()> {
    let before_snap = load_snapshot(Path::new(before))
        .with_context(|| format!("Failed to load before snapshot {}", before))?;
    let after_snap = load_snapshot(Path::new(after))
        .with_context(|| format!("Failed to load after snapshot {}", after))?;

    let change = pair_by_name(&before_snap, &after_snap)
        .into_iter()
        .find(|c| c.name() == Some(name))
        .ok_or_else(|| anyhow!("Function '{}' not found in either snapshot", name))?;

    let classification = Classifier::default().classify(&change);

    println!("Function: {name}");
    println!("Kind: {}", classification.kind.as_str());
    println!("Rule: {:?}", classification.rule);
    println!();
    println!("Before:");
    match change.show_before(&SourceRenderer) {
        Some(text) => print_indented("  ", &text),
        None => println!("  (absent)"),
    }
    println!("After:");
    match change.show_after(&SourceRenderer) {
        Some(text) => print_indented("  ", &text),
        None => println!("  (absent)"),
    }

    Ok(())
}
