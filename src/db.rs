// Copyright 2026 HeapLight Project Authors. Licensed under Apache-2.0.

//! The database facade: an environment directory, its schema catalog,
//! and statement execution.

use std::path::Path;

use tracing::debug;

use crate::catalog::{Catalog, CatalogError};
use crate::executor::{self, ExecuteError, QueryResult};
use crate::parser::{self, ParserError};
use crate::storage::{HeapTable, StorageError};
use crate::types::{DataType, Row, Value};

pub struct Database {
    catalog: Catalog,
}

impl Database {
    /// Open a database environment directory, bootstrapping the catalog
    /// on first use.
    pub fn open(dir: impl AsRef<Path>) -> Result<Database, Error> {
        let catalog = Catalog::open(dir.as_ref())?;
        Ok(Database { catalog })
    }

    /// Parse and execute one SQL statement.
    pub fn run(&mut self, sql: &str) -> Result<QueryResult, Error> {
        let statement = parser::parse(sql)?;
        debug!(?statement, "executing");
        Ok(executor::execute(&mut self.catalog, statement)?)
    }

    /// The storage smoke test behind the shell's `test` command:
    /// create/drop a table, re-create one, insert a row, read it back.
    pub fn run_self_test(&mut self) -> Result<(), Error> {
        let dir = self.catalog.dir().to_path_buf();
        let column_names: Vec<String> = vec!["a".into(), "b".into()];
        let column_attributes = vec![DataType::Int, DataType::Text];

        let mut table = HeapTable::new(
            &dir,
            "_test_create_drop",
            column_names.clone(),
            column_attributes.clone(),
        );
        table.create()?;
        table.drop_table()?;

        let mut table = HeapTable::new(&dir, "_test_data", column_names, column_attributes);
        table.create_if_not_exists()?;
        let row = Row::from([
            ("a".to_string(), Value::Int(12)),
            ("b".to_string(), Value::from("Hello!")),
        ]);
        table.insert(&row)?;
        let handles = table.select()?;
        if handles.len() != 1 {
            return Err(Error::SelfTest(format!(
                "expected 1 handle, got {}",
                handles.len()
            )));
        }
        let read_back = table.project(handles[0])?;
        if read_back != row {
            return Err(Error::SelfTest(format!("row mismatch: {read_back:?}")));
        }
        table.drop_table()?;
        Ok(())
    }
}

/// The top-level error type, aggregating every layer below.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("parse error: {0}")]
    Parse(#[from] ParserError),
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("execute error: {0}")]
    Execute(#[from] ExecuteError),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("self test failed: {0}")]
    SelfTest(String),
}
