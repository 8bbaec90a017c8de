use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;

#[cfg(not(feature = "storage-rocksdb"))]
#[test]
fn test_rocksdb_fallback_warning() {
    let mut csv = tempfile::NamedTempFile::new().unwrap();
    writeln!(csv, "type, order, product, quantity, price, currency").unwrap();
    writeln!(csv, "add, A, prod_1, 1, 100.0, USD").unwrap();
    writeln!(csv, "pay, A, , , , ").unwrap();

    let mut cmd = Command::new(cargo_bin!("orderpay"));
    cmd.arg(csv.path()).arg("--db-path").arg("some_db");

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Falling back to In-Memory storage."))
        .stdout(predicate::str::contains("A,true,100,USD"));
}

#[cfg(feature = "storage-rocksdb")]
#[test]
fn test_rocksdb_no_fallback_warning() {
    let mut csv = tempfile::NamedTempFile::new().unwrap();
    writeln!(csv, "type, order, product, quantity, price, currency").unwrap();
    writeln!(csv, "add, A, prod_1, 1, 100.0, USD").unwrap();

    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("test_db");

    let mut cmd = Command::new(cargo_bin!("orderpay"));
    cmd.arg(csv.path()).arg("--db-path").arg(&db_path);

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("WARN").not());
}
