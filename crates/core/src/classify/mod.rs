//! Classification of a function change as unchanged, added, removed,
//! compatible, or breaking.
//!
//! The rules are an ordered table; the first rule whose condition holds
//! decides the [`ChangeKind`]. Each rule can be evaluated on its own, which
//! keeps the ordering explicit and testable.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::model::{FuncChange, Signature};
use crate::render::identity_string;
use crate::tuple::{compatible_extra, CanonicalStringEquality, TypeEquality};

/// Outcome of classifying one [`FuncChange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Unchanged,
    Added,
    Removed,
    Compatible,
    Breaking,
}

impl ChangeKind {
    pub const ALL: [ChangeKind; 5] = [
        ChangeKind::Unchanged,
        ChangeKind::Added,
        ChangeKind::Removed,
        ChangeKind::Compatible,
        ChangeKind::Breaking,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::Unchanged => "unchanged",
            ChangeKind::Added => "added",
            ChangeKind::Removed => "removed",
            ChangeKind::Compatible => "compatible",
            ChangeKind::Breaking => "breaking",
        }
    }
}

/// One row of the decision table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    BothAbsent,
    Added,
    Removed,
    IdenticalText,
    Compatible,
    Breaking,
}

/// Table order. `Breaking` always matches, so evaluation is total.
pub const RULES: [Rule; 6] = [
    Rule::BothAbsent,
    Rule::Added,
    Rule::Removed,
    Rule::IdenticalText,
    Rule::Compatible,
    Rule::Breaking,
];

impl Rule {
    /// Kind produced when this rule matches.
    pub fn kind(self) -> ChangeKind {
        match self {
            Rule::BothAbsent | Rule::IdenticalText => ChangeKind::Unchanged,
            Rule::Added => ChangeKind::Added,
            Rule::Removed => ChangeKind::Removed,
            Rule::Compatible => ChangeKind::Compatible,
            Rule::Breaking => ChangeKind::Breaking,
        }
    }

    /// Whether this rule's condition holds, ignoring earlier rules.
    pub fn matches(self, change: &FuncChange, eq: &dyn TypeEquality) -> bool {
        match (self, &change.before, &change.after) {
            (Rule::BothAbsent, None, None) => true,
            (Rule::Added, None, Some(_)) => true,
            (Rule::Removed, Some(_), None) => true,
            (Rule::IdenticalText, Some(b), Some(a)) => identity_string(b) == identity_string(a),
            (Rule::Compatible, Some(b), Some(a)) => {
                is_compatible(b.signature.as_ref(), a.signature.as_ref(), eq)
            }
            (Rule::Breaking, _, _) => true,
            _ => false,
        }
    }
}

/// Input the classifier could handle but should never have received.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anomaly {
    /// Neither side present; upstream pairing produced an empty change.
    BothSidesAbsent,
}

/// A [`ChangeKind`] plus the rule that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub kind: ChangeKind,
    pub rule: Rule,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anomaly: Option<Anomaly>,
}

/// Classifies changes using a configurable type-equality relation.
pub struct Classifier {
    eq: Box<dyn TypeEquality>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(CanonicalStringEquality)
    }
}

impl std::fmt::Debug for Classifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Classifier").finish_non_exhaustive()
    }
}

impl Classifier {
    pub fn new(eq: impl TypeEquality + 'static) -> Self {
        Self { eq: Box::new(eq) }
    }

    pub fn type_equality(&self) -> &dyn TypeEquality {
        self.eq.as_ref()
    }

    pub fn kind(&self, change: &FuncChange) -> ChangeKind {
        self.classify(change).kind
    }

    /// Evaluates the rule table, first match wins.
    pub fn classify(&self, change: &FuncChange) -> Classification {
        let rule = RULES
            .into_iter()
            .find(|rule| rule.matches(change, self.type_equality()))
            .unwrap_or(Rule::Breaking);

        let anomaly = match rule {
            Rule::BothAbsent => {
                warn!("classified a change with neither side present as unchanged");
                Some(Anomaly::BothSidesAbsent)
            }
            _ => None,
        };

        let classification = Classification { kind: rule.kind(), rule, anomaly };
        debug!(
            name = change.name().unwrap_or("<none>"),
            kind = classification.kind.as_str(),
            rule = ?classification.rule,
            "classified function change"
        );
        classification
    }
}

/// Classifies with canonical-string type equality.
pub fn classify(change: &FuncChange) -> ChangeKind {
    Classifier::default().kind(change)
}

/// True when callers of `before` remain valid against `after`.
///
/// An absent (unresolved) signature on either side is never compatible.
pub fn is_compatible(
    before: Option<&Signature>,
    after: Option<&Signature>,
    eq: &dyn TypeEquality,
) -> bool {
    match (before, after) {
        (Some(b), Some(a)) => params_compatible(b, a, eq) && results_compatible(b, a, eq),
        _ => false,
    }
}

/// Parameters match exactly, or `s2` adds exactly one trailing variadic
/// parameter to a non-variadic `s1`.
pub fn params_compatible(s1: &Signature, s2: &Signature, eq: &dyn TypeEquality) -> bool {
    match compatible_extra(&s1.params, &s2.params, eq) {
        None => false,
        Some(extra) => match extra.len() {
            0 => true,
            1 => !s1.variadic && s2.variadic,
            _ => false,
        },
    }
}

/// Results match exactly, unless `s1` returns nothing, in which case
/// `s2` may return anything.
pub fn results_compatible(s1: &Signature, s2: &Signature, eq: &dyn TypeEquality) -> bool {
    if s1.results.is_empty() {
        return true;
    }
    matches!(compatible_extra(&s1.results, &s2.results, eq), Some(extra) if extra.is_empty())
}
