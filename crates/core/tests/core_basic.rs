use sigcompat_core::model::{FuncChange, FunctionDecl, Param, Signature};
use sigcompat_core::{classify, version, ChangeKind};

fn get(params: Vec<Param>, results: Vec<Param>, variadic: bool) -> FunctionDecl {
    FunctionDecl::new("example.com/kv", "Get", Signature::new(params, results).with_variadic(variadic))
}

#[test]
fn version_is_non_empty() {
    assert!(!version().is_empty());
}

#[test]
fn adding_variadic_options_is_compatible() {
    // func Get(key string) (string, bool)
    let before = get(
        vec![Param::named("key", "string")],
        vec![Param::new("string"), Param::new("bool")],
        false,
    );
    // func Get(key string, opts ...Option) (string, bool)
    let after = get(
        vec![Param::named("key", "string"), Param::named("opts", "[]Option")],
        vec![Param::new("string"), Param::new("bool")],
        true,
    );

    assert_eq!(classify(&FuncChange::new(Some(before), Some(after))), ChangeKind::Compatible);
}

#[test]
fn adding_error_result_is_breaking() {
    // func Get(key string) string
    let before = get(vec![Param::named("key", "string")], vec![Param::new("string")], false);
    // func Get(key string) (string, error)
    let after = get(
        vec![Param::named("key", "string")],
        vec![Param::new("string"), Param::new("error")],
        false,
    );

    assert_eq!(classify(&FuncChange::new(Some(before), Some(after))), ChangeKind::Breaking);
}

#[test]
fn renamed_parameter_is_compatible_not_unchanged() {
    let before = get(vec![Param::named("key", "string")], vec![], false);
    let after = get(vec![Param::named("k", "string")], vec![], false);

    assert_eq!(classify(&FuncChange::new(Some(before), Some(after))), ChangeKind::Compatible);
}

#[test]
fn doc_and_source_do_not_affect_classification() {
    let base = get(vec![Param::named("key", "string")], vec![Param::new("string")], false);
    let documented = base
        .clone()
        .with_doc(Some("Get returns a value.".into()))
        .with_source(Some("func Get(key string) string".into()));

    assert_eq!(classify(&FuncChange::new(Some(base), Some(documented))), ChangeKind::Unchanged);
}
