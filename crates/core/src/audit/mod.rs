//! Batch classification of two snapshots into an audit report.
//!
//! Changes are independent of one another, so they are classified in
//! parallel; the report keeps the name order produced by the diff pass.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug_span, info};

use crate::classify::{Anomaly, ChangeKind, Classifier, Rule};
use crate::diff::pair_by_name;
use crate::model::FuncChange;
use crate::render::{DeclRenderer, SourceRenderer};
use crate::snapshot::{load_snapshot, ApiSnapshot};

/// Version bump a release must carry given the observed changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SemverBump {
    Patch,
    Minor,
    Major,
}

impl SemverBump {
    pub fn for_kind(kind: ChangeKind) -> Self {
        match kind {
            ChangeKind::Breaking | ChangeKind::Removed => SemverBump::Major,
            ChangeKind::Added | ChangeKind::Compatible => SemverBump::Minor,
            ChangeKind::Unchanged => SemverBump::Patch,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SemverBump::Patch => "patch",
            SemverBump::Minor => "minor",
            SemverBump::Major => "major",
        }
    }
}

/// One classified function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub name: String,
    pub kind: ChangeKind,
    pub rule: Rule,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anomaly: Option<Anomaly>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
}

/// Counts per [`ChangeKind`], plus recorded anomalies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub counts: BTreeMap<ChangeKind, usize>,
    pub anomalies: usize,
}

impl Summary {
    pub fn count(&self, kind: ChangeKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    fn from_entries(entries: &[AuditEntry]) -> Self {
        let mut summary = Summary::default();
        for entry in entries {
            *summary.counts.entry(entry.kind).or_insert(0) += 1;
            if entry.anomaly.is_some() {
                summary.anomalies += 1;
            }
        }
        summary
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotInfo {
    pub package: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

impl From<&ApiSnapshot> for SnapshotInfo {
    fn from(snapshot: &ApiSnapshot) -> Self {
        Self { package: snapshot.package.clone(), digest: snapshot.digest.clone() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditReport {
    /// RFC 3339 UTC timestamp.
    pub generated_at: String,
    pub before: SnapshotInfo,
    pub after: SnapshotInfo,
    pub entries: Vec<AuditEntry>,
    pub summary: Summary,
    pub verdict: SemverBump,
}

impl AuditReport {
    pub fn entry(&self, name: &str) -> Option<&AuditEntry> {
        self.entries.iter().find(|e| e.name == name)
    }
}

/// Classify already-paired changes. Order of `changes` is preserved.
pub fn classify_changes(
    changes: &[FuncChange],
    classifier: &Classifier,
    renderer: &dyn DeclRenderer,
) -> Vec<AuditEntry> {
    let _span = debug_span!("classify_changes", count = changes.len()).entered();
    changes
        .par_iter()
        .map(|change| {
            let c = classifier.classify(change);
            AuditEntry {
                name: change.name().unwrap_or_default().to_string(),
                kind: c.kind,
                rule: c.rule,
                anomaly: c.anomaly,
                before: change.show_before(renderer),
                after: change.show_after(renderer),
            }
        })
        .collect()
}

/// Pair, classify, and summarize two snapshots.
pub fn audit(
    before: &ApiSnapshot,
    after: &ApiSnapshot,
    classifier: &Classifier,
    renderer: &dyn DeclRenderer,
) -> AuditReport {
    let changes = pair_by_name(before, after);
    let entries = classify_changes(&changes, classifier, renderer);
    let summary = Summary::from_entries(&entries);
    let verdict = entries
        .iter()
        .map(|e| SemverBump::for_kind(e.kind))
        .max()
        .unwrap_or(SemverBump::Patch);

    info!(
        package = %after.package,
        functions = entries.len(),
        breaking = summary.count(ChangeKind::Breaking),
        removed = summary.count(ChangeKind::Removed),
        verdict = verdict.as_str(),
        "audit complete"
    );

    AuditReport {
        generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        before: before.into(),
        after: after.into(),
        entries,
        summary,
        verdict,
    }
}

/// Load both snapshot files and audit them with the default classifier.
pub fn audit_files(before: &Path, after: &Path) -> Result<AuditReport> {
    let before_snap = load_snapshot(before)
        .with_context(|| format!("Failed to load before snapshot {}", before.display()))?;
    let after_snap = load_snapshot(after)
        .with_context(|| format!("Failed to load after snapshot {}", after.display()))?;
    Ok(audit(&before_snap, &after_snap, &Classifier::default(), &SourceRenderer))
}
