//! API snapshot files: the resolved public functions of one package version.
//!
//! A snapshot is written by whatever tool resolved the package (JSON or
//! YAML, chosen by file extension). Loading it validates the invariants the
//! classifier relies on, most importantly that only the last parameter of a
//! function is variadic.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{SnapshotError, SnapshotResult};
use crate::model::{FunctionDecl, Param, Signature, TypeDescriptor};

const VARIADIC_PREFIX: &str = "...";

/// On-disk form of a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotFile {
    pub package: String,
    #[serde(default)]
    pub functions: Vec<FunctionEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionEntry {
    pub name: String,
    #[serde(default)]
    pub doc: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub params: Vec<ParamEntry>,
    #[serde(default)]
    pub results: Vec<ParamEntry>,
    /// Set when the resolver could not type this function.
    #[serde(default)]
    pub unresolved: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamEntry {
    #[serde(default)]
    pub name: Option<String>,
    /// Printed type; a `...T` prefix marks the variadic parameter.
    #[serde(rename = "type")]
    pub ty: String,
}

/// Supported encodings of a snapshot file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    Yaml,
}

impl SnapshotFormat {
    pub fn from_path(path: &Path) -> SnapshotResult<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(SnapshotFormat::Json),
            Some("yaml") | Some("yml") => Ok(SnapshotFormat::Yaml),
            _ => Err(SnapshotError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Validated snapshot ready for diffing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiSnapshot {
    pub package: String,
    pub functions: Vec<FunctionDecl>,
    /// SHA-256 of the file contents, when loaded from disk.
    pub digest: Option<String>,
}

impl ApiSnapshot {
    pub fn new(package: impl Into<String>, functions: Vec<FunctionDecl>) -> Self {
        Self { package: package.into(), functions, digest: None }
    }

    pub fn get(&self, name: &str) -> Option<&FunctionDecl> {
        self.functions.iter().find(|f| f.name == name)
    }
}

/// Parse and validate a snapshot body.
pub fn parse_snapshot(body: &str, format: SnapshotFormat) -> SnapshotResult<ApiSnapshot> {
    let file: SnapshotFile = match format {
        SnapshotFormat::Json => serde_json::from_str(body)?,
        SnapshotFormat::Yaml => serde_yaml::from_str(body)?,
    };
    resolve(file)
}

/// Read, parse, and validate a snapshot file, recording its digest.
pub fn load_snapshot(path: &Path) -> SnapshotResult<ApiSnapshot> {
    let format = SnapshotFormat::from_path(path)?;
    let bytes = std::fs::read(path)
        .map_err(|source| SnapshotError::Io { path: path.to_path_buf(), source })?;
    let body = std::str::from_utf8(&bytes)
        .map_err(|source| SnapshotError::InvalidUtf8 { path: path.to_path_buf(), source })?;
    let mut snapshot = parse_snapshot(body, format)?;
    snapshot.digest = Some(sha256_hex(&bytes));
    Ok(snapshot)
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Convert the on-disk form into declarations, enforcing snapshot invariants.
pub fn resolve(file: SnapshotFile) -> SnapshotResult<ApiSnapshot> {
    let mut seen = HashSet::new();
    let mut functions = Vec::with_capacity(file.functions.len());

    for entry in file.functions {
        if entry.name.trim().is_empty() {
            return Err(SnapshotError::EmptyName { package: file.package.clone() });
        }
        if !seen.insert(entry.name.clone()) {
            return Err(SnapshotError::DuplicateFunction { function: entry.name });
        }
        functions.push(resolve_function(&file.package, entry)?);
    }

    Ok(ApiSnapshot::new(file.package, functions))
}

/// Go-style identifier: a letter or `_`, then letters, digits or `_`.
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// An empty name means unnamed; anything else must be an identifier.
fn check_name(function: &str, name: Option<String>) -> SnapshotResult<Option<String>> {
    match name {
        Some(n) if n.is_empty() => Ok(None),
        Some(n) if !is_identifier(&n) => {
            Err(SnapshotError::InvalidName { function: function.to_string(), name: n })
        }
        other => Ok(other),
    }
}

fn resolve_function(package: &str, entry: FunctionEntry) -> SnapshotResult<FunctionDecl> {
    if entry.unresolved {
        return Ok(FunctionDecl::unresolved(package, entry.name)
            .with_doc(entry.doc)
            .with_source(entry.source));
    }

    let last = entry.params.len().saturating_sub(1);
    let mut variadic = false;
    let mut params = Vec::with_capacity(entry.params.len());
    for (i, p) in entry.params.into_iter().enumerate() {
        let name = check_name(&entry.name, p.name)?;
        let elem = p.ty.strip_prefix(VARIADIC_PREFIX).map(|e| e.trim().to_string());
        let ty = match elem {
            Some(elem) => {
                if i != last {
                    return Err(SnapshotError::VariadicNotLast {
                        function: entry.name,
                        position: i,
                    });
                }
                if elem.is_empty() {
                    return Err(SnapshotError::EmptyVariadicElement { function: entry.name });
                }
                variadic = true;
                format!("[]{elem}")
            }
            None => p.ty,
        };
        params.push(Param { name, ty: TypeDescriptor::new(ty) });
    }

    let results = entry
        .results
        .into_iter()
        .map(|r| {
            let name = check_name(&entry.name, r.name)?;
            Ok(Param { name, ty: TypeDescriptor::new(r.ty) })
        })
        .collect::<SnapshotResult<Vec<_>>>()?;

    let signature = Signature::new(params, results).with_variadic(variadic);
    Ok(FunctionDecl::new(package, entry.name, signature)
        .with_doc(entry.doc)
        .with_source(entry.source))
}

#[cfg(test)]
mod tests {
    use super::*;

    const KV_YAML: &str = r#"
package: example.com/kv
functions:
  - name: Get
    doc: Get returns the value for key.
    params:
      - { name: key, type: string }
      - { name: opts, type: "...Option" }
    results:
      - { type: string }
      - { type: bool }
  - name: Broken
    unresolved: true
"#;

    #[test]
    fn yaml_snapshot_resolves_variadic_as_slice() {
        let snap = parse_snapshot(KV_YAML, SnapshotFormat::Yaml).expect("parse");
        let get = snap.get("Get").expect("Get");
        let sig = get.signature.as_ref().expect("signature");
        assert!(sig.variadic);
        assert_eq!(sig.params[1].ty.canonical(), "[]Option");
        assert_eq!(sig.results.len(), 2);
        assert!(snap.get("Broken").expect("Broken").signature.is_none());
    }

    #[test]
    fn variadic_must_be_last() {
        let body = r#"{"package":"p","functions":[{"name":"F","params":[{"type":"...int"},{"type":"string"}]}]}"#;
        match parse_snapshot(body, SnapshotFormat::Json) {
            Err(SnapshotError::VariadicNotLast { function, position }) => {
                assert_eq!(function, "F");
                assert_eq!(position, 0);
            }
            other => panic!("expected VariadicNotLast, got {other:?}"),
        }
    }

    #[test]
    fn empty_variadic_element_is_rejected() {
        let body = r#"{"package":"p","functions":[{"name":"F","params":[{"type":"..."}]}]}"#;
        assert!(matches!(
            parse_snapshot(body, SnapshotFormat::Json),
            Err(SnapshotError::EmptyVariadicElement { .. })
        ));
    }

    #[test]
    fn param_names_must_be_identifiers() {
        // "x chan" + "int" would render like "x" + "chan int".
        let body = r#"{"package":"p","functions":[{"name":"F","params":[{"name":"x chan","type":"int"}]}]}"#;
        match parse_snapshot(body, SnapshotFormat::Json) {
            Err(SnapshotError::InvalidName { function, name }) => {
                assert_eq!(function, "F");
                assert_eq!(name, "x chan");
            }
            other => panic!("expected InvalidName, got {other:?}"),
        }
    }

    #[test]
    fn result_names_must_be_identifiers() {
        let body = r#"{"package":"p","functions":[{"name":"F","results":[{"name":"1err","type":"error"}]}]}"#;
        assert!(matches!(
            parse_snapshot(body, SnapshotFormat::Json),
            Err(SnapshotError::InvalidName { .. })
        ));
    }

    #[test]
    fn identifier_and_empty_names_are_accepted() {
        let body = r#"{"package":"p","functions":[{"name":"F","params":[{"name":"_","type":"int"},{"name":"","type":"int"}],"results":[{"name":"n2","type":"int"}]}]}"#;
        let snap = parse_snapshot(body, SnapshotFormat::Json).expect("parse");
        let sig = snap.get("F").unwrap().signature.as_ref().unwrap();
        assert_eq!(sig.params[0].name.as_deref(), Some("_"));
        assert_eq!(sig.params[1].name, None);
        assert_eq!(sig.results[0].name.as_deref(), Some("n2"));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let body = r#"{"package":"p","functions":[{"name":"F"},{"name":"F"}]}"#;
        assert!(matches!(
            parse_snapshot(body, SnapshotFormat::Json),
            Err(SnapshotError::DuplicateFunction { .. })
        ));
    }

    #[test]
    fn format_is_chosen_by_extension() {
        assert_eq!(SnapshotFormat::from_path(Path::new("a.yml")).unwrap(), SnapshotFormat::Yaml);
        assert_eq!(SnapshotFormat::from_path(Path::new("a.json")).unwrap(), SnapshotFormat::Json);
        assert!(SnapshotFormat::from_path(Path::new("a.toml")).is_err());
    }

    #[test]
    fn sha256_hex_matches_known_hash() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
