use std::fs;
use std::path::Path;

use sigcompat::commands::short_digest;
use sigcompat::{canonicalize_or_current, infer_workspace_name};
use tempfile::tempdir;

#[test]
fn canonicalize_or_current_returns_cwd_for_dot() {
    let original = std::env::current_dir().expect("cwd");
    let tmp = tempdir().expect("tempdir");
    std::env::set_current_dir(tmp.path()).expect("chdir tmp");

    let result = canonicalize_or_current(".").expect("canonicalize").canonicalize().expect("canon");
    let expected = tmp.path().canonicalize().expect("canon tmp");
    assert_eq!(result, expected);

    std::env::set_current_dir(original).expect("restore cwd");
}

#[test]
fn canonicalize_or_current_resolves_existing_path() {
    let tmp = tempdir().expect("tempdir");
    let subdir = tmp.path().join("nested");
    fs::create_dir_all(&subdir).expect("create nested");

    let result = canonicalize_or_current(subdir.to_str().unwrap()).expect("canonicalize nested");
    assert_eq!(result, subdir.canonicalize().expect("canonicalize subdir"));
}

#[test]
fn infer_workspace_name_uses_last_path_component() {
    assert_eq!(infer_workspace_name(Path::new("/tmp/kv-audit")), "kv-audit");
}

#[test]
fn infer_workspace_name_falls_back_when_missing() {
    assert_eq!(infer_workspace_name(Path::new("/")), "unnamed-audit");
}

#[test]
fn short_digest_truncates_and_handles_missing() {
    assert_eq!(short_digest(Some("0123456789abcdef")), "0123456789ab");
    assert_eq!(short_digest(Some("abc")), "abc");
    assert_eq!(short_digest(None), "-");
}
