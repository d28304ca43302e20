//! Prefix comparison of parameter and result tuples.
//!
//! A `candidate` tuple is a compatible extension of a `base` tuple when every
//! position of `base` matches the same position in `candidate`. Whatever
//! `candidate` carries beyond that is handed back so the caller can decide
//! whether the tail is acceptable (e.g. a trailing variadic parameter).

use crate::model::{Param, TypeDescriptor};

/// Equality relation used when comparing types positionally.
///
/// Types from two snapshots are resolved independently, so there is no
/// shared identity to compare. The default relation compares printed forms,
/// which misses types that are identical but print differently (e.g. the
/// same type reached through differently qualified names).
pub trait TypeEquality: Send + Sync {
    fn equals(&self, a: &TypeDescriptor, b: &TypeDescriptor) -> bool;
}

/// Two descriptors are equal iff their canonical strings are equal.
#[derive(Debug, Clone, Copy, Default)]
pub struct CanonicalStringEquality;

impl TypeEquality for CanonicalStringEquality {
    fn equals(&self, a: &TypeDescriptor, b: &TypeDescriptor) -> bool {
        a.canonical() == b.canonical()
    }
}

/// Returns the trailing types of `candidate` beyond `base`, or `None` when
/// `candidate` is shorter than `base` or any shared position mismatches.
///
/// `Some(vec![])` means the tuples match exactly; callers must keep that
/// distinct from `None`.
pub fn compatible_extra<'a>(
    base: &[Param],
    candidate: &'a [Param],
    eq: &dyn TypeEquality,
) -> Option<Vec<&'a TypeDescriptor>> {
    if base.len() > candidate.len() {
        return None;
    }

    let mut extra = Vec::with_capacity(candidate.len() - base.len());
    for (i, slot) in candidate.iter().enumerate() {
        match base.get(i) {
            Some(b) if !eq.equals(&b.ty, &slot.ty) => return None,
            Some(_) => {}
            None => extra.push(&slot.ty),
        }
    }

    Some(extra)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tuple(types: &[&str]) -> Vec<Param> {
        types.iter().map(|t| Param::new(*t)).collect()
    }

    #[test]
    fn equal_tuples_have_no_extra() {
        let a = tuple(&["int", "string"]);
        let extra = compatible_extra(&a, &a, &CanonicalStringEquality).expect("match");
        assert!(extra.is_empty());
    }

    #[test]
    fn prefix_returns_tail() {
        let base = tuple(&["int"]);
        let cand = tuple(&["int", "[]string", "bool"]);
        let extra = compatible_extra(&base, &cand, &CanonicalStringEquality).expect("match");
        let names: Vec<&str> = extra.iter().map(|t| t.canonical()).collect();
        assert_eq!(names, vec!["[]string", "bool"]);
    }

    #[test]
    fn longer_base_fails() {
        let base = tuple(&["int", "int"]);
        let cand = tuple(&["int"]);
        assert!(compatible_extra(&base, &cand, &CanonicalStringEquality).is_none());
    }

    #[test]
    fn mismatch_in_shared_prefix_fails() {
        let base = tuple(&["int", "string"]);
        let cand = tuple(&["int", "[]byte", "bool"]);
        assert!(compatible_extra(&base, &cand, &CanonicalStringEquality).is_none());
    }

    #[test]
    fn names_are_ignored() {
        let base = vec![Param::named("key", "string")];
        let cand = vec![Param::named("k", "string")];
        let extra = compatible_extra(&base, &cand, &CanonicalStringEquality).expect("match");
        assert!(extra.is_empty());
    }

    #[test]
    fn empty_base_returns_whole_candidate() {
        let cand = tuple(&["error"]);
        let extra = compatible_extra(&[], &cand, &CanonicalStringEquality).expect("match");
        assert_eq!(extra.len(), 1);
    }

    struct SuffixInsensitive;

    impl TypeEquality for SuffixInsensitive {
        fn equals(&self, a: &TypeDescriptor, b: &TypeDescriptor) -> bool {
            let short = |t: &TypeDescriptor| {
                t.canonical().rsplit('.').next().unwrap_or_default().to_string()
            };
            short(a) == short(b)
        }
    }

    #[test]
    fn custom_equality_is_used_for_shared_positions() {
        let base = tuple(&["example.com/a.Option"]);
        let cand = tuple(&["a.Option"]);
        assert!(compatible_extra(&base, &cand, &CanonicalStringEquality).is_none());
        assert!(compatible_extra(&base, &cand, &SuffixInsensitive).is_some());
    }
}
