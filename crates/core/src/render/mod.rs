//! Textual forms of declarations.
//!
//! Two renderings live here:
//! - the canonical identity string, compared verbatim by the classifier to
//!   short-circuit unchanged declarations;
//! - the display form returned by [`crate::model::FuncChange::show_before`]
//!   and friends, produced through a pluggable [`DeclRenderer`].

use crate::model::{FuncChange, FunctionDecl, Param, Signature};

/// Canonical identity string: `func <pkg>.<Name>(<params>) <results>`.
///
/// Parameter names are part of the identity, so a renamed parameter makes
/// the declaration "changed" (it is then judged structurally).
pub fn identity_string(decl: &FunctionDecl) -> String {
    let mut out = String::from("func ");
    if !decl.package.is_empty() {
        out.push_str(&decl.package);
        out.push('.');
    }
    out.push_str(&decl.name);
    if let Some(sig) = &decl.signature {
        out.push_str(&signature_string(sig));
    }
    out
}

/// `(<params>)` followed by the result list, if any.
pub fn signature_string(sig: &Signature) -> String {
    let last = sig.params.len().saturating_sub(1);
    let params: Vec<String> = sig
        .params
        .iter()
        .enumerate()
        .map(|(i, p)| param_string(p, sig.variadic && i == last))
        .collect();

    let mut out = format!("({})", params.join(", "));
    let results = results_string(&sig.results);
    if !results.is_empty() {
        out.push(' ');
        out.push_str(&results);
    }
    out
}

fn param_string(param: &Param, variadic: bool) -> String {
    let ty = if variadic {
        let elem = param.ty.slice_elem().unwrap_or(param.ty.canonical());
        format!("...{elem}")
    } else {
        param.ty.canonical().to_string()
    };
    match &param.name {
        Some(name) if !name.is_empty() => format!("{name} {ty}"),
        _ => ty,
    }
}

fn results_string(results: &[Param]) -> String {
    match results {
        [] => String::new(),
        [single] if single.name.as_deref().map_or(true, str::is_empty) => {
            single.ty.canonical().to_string()
        }
        many => {
            let parts: Vec<String> = many.iter().map(|r| param_string(r, false)).collect();
            format!("({})", parts.join(", "))
        }
    }
}

/// Produces the human-readable form of a declaration for reports.
///
/// Never consulted for classification.
pub trait DeclRenderer: Send + Sync {
    fn render(&self, decl: &FunctionDecl) -> String;
}

/// Uses the declaration's recorded source text when present, otherwise
/// synthesizes `// doc` lines followed by `func Name(...) ...`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceRenderer;

impl DeclRenderer for SourceRenderer {
    fn render(&self, decl: &FunctionDecl) -> String {
        if let Some(source) = &decl.source {
            return source.clone();
        }

        let mut out = String::new();
        if let Some(doc) = &decl.doc {
            for line in doc.lines() {
                out.push_str("// ");
                out.push_str(line);
                out.push('\n');
            }
        }
        out.push_str("func ");
        out.push_str(&decl.name);
        match &decl.signature {
            Some(sig) => out.push_str(&signature_string(sig)),
            None => out.push_str("(?)"),
        }
        out
    }
}

impl FuncChange {
    /// Display text of the "before" declaration, `None` if it is absent.
    pub fn show_before(&self, renderer: &dyn DeclRenderer) -> Option<String> {
        self.before.as_ref().map(|f| renderer.render(f))
    }

    /// Display text of the "after" declaration, `None` if it is absent.
    pub fn show_after(&self, renderer: &dyn DeclRenderer) -> Option<String> {
        self.after.as_ref().map(|f| renderer.render(f))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_variadic() -> FunctionDecl {
        let sig = Signature::new(
            vec![Param::named("key", "string"), Param::named("opts", "[]Option")],
            vec![Param::new("string"), Param::new("bool")],
        )
        .with_variadic(true);
        FunctionDecl::new("example.com/kv", "Get", sig)
    }

    #[test]
    fn identity_includes_package_names_and_variadic_marker() {
        assert_eq!(
            identity_string(&get_variadic()),
            "func example.com/kv.Get(key string, opts ...Option) (string, bool)"
        );
    }

    #[test]
    fn single_unnamed_result_has_no_parens() {
        let sig = Signature::new(vec![Param::new("int")], vec![Param::new("error")]);
        assert_eq!(signature_string(&sig), "(int) error");
    }

    #[test]
    fn single_named_result_keeps_parens() {
        let sig = Signature::new(vec![], vec![Param::named("err", "error")]);
        assert_eq!(signature_string(&sig), "() (err error)");
    }

    #[test]
    fn unresolved_declaration_renders_name_only() {
        assert_eq!(identity_string(&FunctionDecl::unresolved("p", "F")), "func p.F");
    }

    #[test]
    fn source_renderer_prefers_recorded_source() {
        let decl = get_variadic().with_source(Some("func Get(key string, opts ...Option)".into()));
        assert_eq!(SourceRenderer.render(&decl), "func Get(key string, opts ...Option)");
    }

    #[test]
    fn source_renderer_synthesizes_doc_and_signature() {
        let decl = get_variadic().with_doc(Some("Get looks up key.".into()));
        assert_eq!(
            SourceRenderer.render(&decl),
            "// Get looks up key.\nfunc Get(key string, opts ...Option) (string, bool)"
        );
    }

    #[test]
    fn show_accessors_return_none_for_absent_side() {
        let change = FuncChange::new(None, Some(get_variadic()));
        assert!(change.show_before(&SourceRenderer).is_none());
        assert!(change.show_after(&SourceRenderer).is_some());
    }
}
