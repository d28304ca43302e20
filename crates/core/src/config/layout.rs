use std::path::{Path, PathBuf};

/// Logical layout of an audit workspace on disk.
///
/// This is derived from a chosen root path. It does *not* perform any IO itself.
/// The CLI is responsible for creating directories and files based on it.
#[derive(Debug, Clone)]
pub struct AuditLayout {
    /// Root directory of the workspace.
    pub root: PathBuf,
    /// Directory for internal metadata (.sigcompat).
    pub meta_dir: PathBuf,
    /// Path to the audit config file (JSON).
    pub config_path: PathBuf,
    /// Directory for saved audit reports (reports).
    pub reports_dir: PathBuf,
}

impl AuditLayout {
    /// Compute the default layout for a workspace rooted at `root`.
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref().to_path_buf();
        let meta_dir = root.join(".sigcompat");
        let config_path = meta_dir.join("config.json");
        let reports_dir = root.join("reports");

        Self { root, meta_dir, config_path, reports_dir }
    }

    /// Path for a saved report named after the package and a timestamp.
    ///
    /// Characters that are awkward in file names (`/`, `.`, `:`) become `_`.
    pub fn report_path(&self, package: &str, stamp: &str) -> PathBuf {
        let sanitize = |s: &str| -> String {
            s.chars()
                .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
                .collect()
        };
        self.reports_dir.join(format!("{}-{}.json", sanitize(package), sanitize(stamp)))
    }
}
