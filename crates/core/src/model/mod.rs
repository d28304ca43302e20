//! Core data model for function declarations and the changes between them.
//!
//! Everything here is immutable once built. Values are produced by the
//! snapshot loader (or any other resolver) and only read by the classifier.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque, comparable representation of a resolved type.
///
/// The classifier never looks inside a descriptor; it only compares them
/// through a [`crate::tuple::TypeEquality`] and renders them for identity
/// strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeDescriptor {
    repr: String,
}

impl TypeDescriptor {
    pub fn new(repr: impl Into<String>) -> Self {
        Self { repr: repr.into() }
    }

    /// Canonical printed form of the type (e.g. `[]byte`, `io.Reader`).
    pub fn canonical(&self) -> &str {
        &self.repr
    }

    /// Element type of a slice descriptor (`[]T` -> `T`), if this is one.
    pub fn slice_elem(&self) -> Option<&str> {
        self.repr.strip_prefix("[]")
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr)
    }
}

/// A parameter or result slot. Names are carried for rendering only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub ty: TypeDescriptor,
}

impl Param {
    pub fn new(ty: impl Into<String>) -> Self {
        Self { name: None, ty: TypeDescriptor::new(ty) }
    }

    pub fn named(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self { name: Some(name.into()), ty: TypeDescriptor::new(ty) }
    }
}

/// Ordered parameters, ordered results, and the variadic flag.
///
/// When `variadic` is set, only the last parameter is variadic and its type
/// is the slice `[]Elem`. The resolver enforces this; it is not re-checked
/// during classification.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Signature {
    pub params: Vec<Param>,
    pub results: Vec<Param>,
    pub variadic: bool,
}

impl Signature {
    pub fn new(params: Vec<Param>, results: Vec<Param>) -> Self {
        Self { params, results, variadic: false }
    }

    /// Builder-style helper to mark the last parameter as variadic.
    pub fn with_variadic(mut self, variadic: bool) -> Self {
        self.variadic = variadic;
        self
    }
}

/// A named function owning its (possibly unresolved) signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionDecl {
    pub name: String,
    /// Import path of the enclosing package, used in identity strings.
    pub package: String,
    /// `None` when the resolver could not type the declaration.
    pub signature: Option<Signature>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    /// Pretty-printed source form, for display only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl FunctionDecl {
    pub fn new(package: impl Into<String>, name: impl Into<String>, signature: Signature) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
            signature: Some(signature),
            doc: None,
            source: None,
        }
    }

    /// A declaration whose type information failed to resolve.
    pub fn unresolved(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self { name: name.into(), package: package.into(), signature: None, doc: None, source: None }
    }

    pub fn with_doc(mut self, doc: Option<String>) -> Self {
        self.doc = doc;
        self
    }

    pub fn with_source(mut self, source: Option<String>) -> Self {
        self.source = source;
        self
    }
}

/// The same logical function observed in a "before" and an "after" snapshot.
///
/// Either side may be absent; both absent is degenerate and classified as
/// `Unchanged` with a recorded anomaly.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FuncChange {
    pub before: Option<FunctionDecl>,
    pub after: Option<FunctionDecl>,
}

impl FuncChange {
    pub fn new(before: Option<FunctionDecl>, after: Option<FunctionDecl>) -> Self {
        Self { before, after }
    }

    /// Name of whichever side is present, preferring "after".
    pub fn name(&self) -> Option<&str> {
        self.after.as_ref().or(self.before.as_ref()).map(|f| f.name.as_str())
    }
}
