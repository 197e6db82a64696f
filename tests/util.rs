//! Shared test utilities for integration tests
//!
//! Provides common fixture creation and helper functions
//! used across multiple test files.

use assert_fs::prelude::*;

/// Canonical import header in the fixed lowercase schema.
pub const HEADER: &str =
    "codigo,clave,desc_prod,inv,clasificacion,promedio vta mes,cobertura (mes),cobertura dias (30)";

/// The two-row scenario used across parser and filter tests.
pub fn two_row_csv() -> String {
    format!("{HEADER}\nA1,K1,Widget,100,A,50,2,60\nA2,K2,Gadget,0,B,0,0,10")
}

/// Write `contents` into `name` under a fresh temp dir and return both.
pub fn csv_fixture(name: &str, contents: &str) -> (assert_fs::TempDir, std::path::PathBuf) {
    let tmp = assert_fs::TempDir::new().expect("tempdir");
    let file = tmp.child(name);
    file.write_str(contents).expect("write fixture");
    let path = file.path().to_path_buf();
    (tmp, path)
}
