use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

pub mod commands;

/// Canonicalize the root path if possible, falling back to the given string
/// relative to the current working directory.
pub fn canonicalize_or_current(root: &str) -> Result<PathBuf> {
    let path = Path::new(root);
    if path == Path::new(".") {
        Ok(env::current_dir().context("Failed to get current directory")?)
    } else {
        // Try to canonicalize; if it fails (e.g., path does not yet exist),
        // join it with the current dir to get an absolute path.
        match path.canonicalize() {
            Ok(p) => Ok(p),
            Err(_) => {
                let cwd = env::current_dir().context("Failed to get current directory")?;
                Ok(cwd.join(path))
            }
        }
    }
}

/// Infer a workspace name from the root path.
///
/// If the root has no final component (e.g., `/`), fallback to `unnamed-audit`.
pub fn infer_workspace_name(root: &Path) -> String {
    root.file_name().and_then(|os_str| os_str.to_str()).unwrap_or("unnamed-audit").to_string()
}
