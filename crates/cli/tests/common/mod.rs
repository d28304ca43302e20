#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

pub const BEFORE_YAML: &str = r#"
package: example.com/kv
functions:
  - name: Get
    params:
      - { name: key, type: string }
    results:
      - { type: string }
      - { type: bool }
  - name: Len
    results:
      - { type: int }
"#;

pub const COMPATIBLE_AFTER_YAML: &str = r#"
package: example.com/kv
functions:
  - name: Get
    doc: Get returns the value stored under key.
    params:
      - { name: key, type: string }
      - { name: opts, type: "...Option" }
    results:
      - { type: string }
      - { type: bool }
  - name: Len
    results:
      - { type: int }
  - name: Keys
    results:
      - { type: "[]string" }
"#;

pub const BREAKING_AFTER_YAML: &str = r#"
package: example.com/kv
functions:
  - name: Get
    params:
      - { name: key, type: string }
    results:
      - { type: string }
      - { type: error }
"#;

pub fn write(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, body).expect("write fixture");
    path
}
