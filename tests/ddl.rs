// Copyright 2026 HeapLight Project Authors. Licensed under Apache-2.0.

use heaplight::catalog::Catalog;
use heaplight::types::{DataType, Row, Value};
use heaplight::Database;
use tempfile::tempdir;

#[test]
fn show_tables_on_a_fresh_database_is_empty() {
    let dir = tempdir().unwrap();
    let mut db = Database::open(dir.path()).unwrap();
    let result = db.run("SHOW TABLES").unwrap();
    assert_eq!(result.rows().unwrap().len(), 0);
    assert_eq!(result.message(), "successfully returned 0 rows");
}

#[test]
fn create_show_drop_table() {
    let dir = tempdir().unwrap();
    let mut db = Database::open(dir.path()).unwrap();

    let result = db.run("CREATE TABLE t (a INT, b TEXT)").unwrap();
    assert_eq!(result.message(), "created t");

    let result = db.run("SHOW TABLES").unwrap();
    let rows = result.rows().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["table_name"], Value::from("t"));

    let result = db.run("SHOW COLUMNS FROM t").unwrap();
    let rows = result.rows().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["column_name"], Value::from("a"));
    assert_eq!(rows[0]["data_type"], Value::from("INT"));
    assert_eq!(rows[1]["column_name"], Value::from("b"));
    assert_eq!(rows[1]["data_type"], Value::from("TEXT"));

    let result = db.run("DROP TABLE t").unwrap();
    assert_eq!(result.message(), "dropped table: t");
    assert_eq!(db.run("SHOW TABLES").unwrap().rows().unwrap().len(), 0);
    assert_eq!(
        db.run("SHOW COLUMNS FROM t").unwrap().rows().unwrap().len(),
        0
    );
}

#[test]
fn index_lifecycle() {
    let dir = tempdir().unwrap();
    let mut db = Database::open(dir.path()).unwrap();
    db.run("CREATE TABLE t (a INT)").unwrap();

    let result = db.run("CREATE INDEX ix ON t USING BTREE (a)").unwrap();
    assert_eq!(result.message(), "created ix");

    let result = db.run("SHOW INDEX FROM t").unwrap();
    assert_eq!(
        result.column_attributes().unwrap().last(),
        Some(&DataType::Boolean)
    );
    let rows = result.rows().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["table_name"], Value::from("t"));
    assert_eq!(rows[0]["index_name"], Value::from("ix"));
    assert_eq!(rows[0]["seq_in_index"], Value::Int(1));
    assert_eq!(rows[0]["column_name"], Value::from("a"));
    assert_eq!(rows[0]["index_type"], Value::from("BTREE"));
    assert_eq!(rows[0]["is_unique"], Value::Int(1));
    let rendered = result.to_string();
    assert!(rendered.contains("\"t\" \"ix\" 1 \"a\" \"BTREE\" true"));

    let result = db.run("DROP INDEX ix FROM t").unwrap();
    assert_eq!(result.message(), "dropped index: ix");
    assert_eq!(db.run("SHOW INDEX FROM t").unwrap().rows().unwrap().len(), 0);
}

#[test]
fn hash_indexes_are_not_unique() {
    let dir = tempdir().unwrap();
    let mut db = Database::open(dir.path()).unwrap();
    db.run("CREATE TABLE t (a INT, b INT)").unwrap();
    db.run("CREATE INDEX h ON t USING HASH (a, b)").unwrap();

    let result = db.run("SHOW INDEX FROM t").unwrap();
    let rows = result.rows().unwrap();
    assert_eq!(rows.len(), 2);
    for (k, row) in rows.iter().enumerate() {
        assert_eq!(row["seq_in_index"], Value::Int(k as i32 + 1));
        assert_eq!(row["index_type"], Value::from("HASH"));
        assert_eq!(row["is_unique"], Value::Int(0));
    }
}

#[test]
fn dropping_a_schema_table_is_rejected() {
    let dir = tempdir().unwrap();
    let mut db = Database::open(dir.path()).unwrap();
    for name in ["_tables", "_columns", "_indices"] {
        let err = db.run(&format!("DROP TABLE {name}")).unwrap_err();
        assert!(err.to_string().contains("cannot drop a schema table"));
    }
    drop(db);

    // the catalog still holds its own descriptions
    let mut catalog = Catalog::open(dir.path()).unwrap();
    let filter = Row::from([("table_name".to_string(), Value::from("_tables"))]);
    let tables = catalog.get_table("_tables").unwrap();
    assert_eq!(tables.select_where(&filter).unwrap().len(), 1);
}

#[test]
fn failed_duplicate_create_is_compensated() {
    let dir = tempdir().unwrap();
    let mut db = Database::open(dir.path()).unwrap();
    db.run("CREATE TABLE t (a INT)").unwrap();
    db.run("CREATE TABLE t (a INT)").unwrap_err();
    drop(db);

    // exactly one _tables row and one _columns row remain for t
    let mut catalog = Catalog::open(dir.path()).unwrap();
    let filter = Row::from([("table_name".to_string(), Value::from("t"))]);
    let tables = catalog.get_table("_tables").unwrap();
    assert_eq!(tables.select_where(&filter).unwrap().len(), 1);
    let columns = catalog.get_table("_columns").unwrap();
    assert_eq!(columns.select_where(&filter).unwrap().len(), 1);
}

#[test]
fn unstorable_column_types_are_not_implemented() {
    let dir = tempdir().unwrap();
    let mut db = Database::open(dir.path()).unwrap();
    let err = db.run("CREATE TABLE t (a DOUBLE)").unwrap_err();
    assert!(err.to_string().contains("not implemented"));
    assert_eq!(db.run("SHOW TABLES").unwrap().rows().unwrap().len(), 0);
}

#[test]
fn tables_survive_a_restart_in_creation_order() {
    let dir = tempdir().unwrap();
    let mut db = Database::open(dir.path()).unwrap();
    db.run("CREATE TABLE aaa (a INT)").unwrap();
    db.run("CREATE TABLE bbb (b TEXT)").unwrap();
    db.run("CREATE TABLE ccc (c INT, d TEXT)").unwrap();
    drop(db);

    let mut db = Database::open(dir.path()).unwrap();
    let result = db.run("SHOW TABLES").unwrap();
    let names: Vec<&str> = result
        .rows()
        .unwrap()
        .iter()
        .map(|row| row["table_name"].as_text().unwrap())
        .collect();
    assert_eq!(names, ["aaa", "bbb", "ccc"]);
}

#[test]
fn unhandled_statements_report_not_implemented() {
    let dir = tempdir().unwrap();
    let mut db = Database::open(dir.path()).unwrap();
    for sql in ["SELECT * FROM t", "INSERT INTO t VALUES (1)"] {
        let result = db.run(sql).unwrap();
        assert_eq!(result.message(), "not implemented");
        assert!(result.rows().is_none());
    }
}

#[test]
fn creating_an_index_on_a_missing_table_fails() {
    let dir = tempdir().unwrap();
    let mut db = Database::open(dir.path()).unwrap();
    assert!(db.run("CREATE INDEX ix ON ghost USING BTREE (a)").is_err());
    db.run("CREATE TABLE t (a INT)").unwrap();
    assert_eq!(db.run("SHOW INDEX FROM t").unwrap().rows().unwrap().len(), 0);
}

#[test]
fn dropping_an_unrecorded_index_fails() {
    let dir = tempdir().unwrap();
    let mut db = Database::open(dir.path()).unwrap();
    db.run("CREATE TABLE t (a INT)").unwrap();
    assert!(db.run("DROP INDEX ix FROM t").is_err());
}

#[test]
fn dropping_a_table_clears_its_indexes() {
    let dir = tempdir().unwrap();
    let mut db = Database::open(dir.path()).unwrap();
    db.run("CREATE TABLE t (a INT)").unwrap();
    db.run("CREATE INDEX ix ON t USING BTREE (a)").unwrap();
    db.run("DROP TABLE t").unwrap();
    drop(db);

    let mut catalog = Catalog::open(dir.path()).unwrap();
    let filter = Row::from([("table_name".to_string(), Value::from("t"))]);
    let indices = catalog.get_table("_indices").unwrap();
    assert_eq!(indices.select_where(&filter).unwrap().len(), 0);
}
