//! Pairs the functions of two snapshots by name.

use std::collections::BTreeMap;

use crate::model::{FuncChange, FunctionDecl};
use crate::snapshot::ApiSnapshot;

/// One [`FuncChange`] per function name present in either snapshot,
/// sorted by name. Never yields a change with both sides absent.
pub fn pair_by_name(before: &ApiSnapshot, after: &ApiSnapshot) -> Vec<FuncChange> {
    pair_decls(&before.functions, &after.functions)
}

pub fn pair_decls(before: &[FunctionDecl], after: &[FunctionDecl]) -> Vec<FuncChange> {
    let mut by_name: BTreeMap<&str, FuncChange> = BTreeMap::new();

    for decl in before {
        by_name.entry(decl.name.as_str()).or_default().before = Some(decl.clone());
    }
    for decl in after {
        by_name.entry(decl.name.as_str()).or_default().after = Some(decl.clone());
    }

    by_name.into_values().collect()
}
