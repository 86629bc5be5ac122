// Copyright 2026 HeapLight Project Authors. Licensed under Apache-2.0.

//! CREATE TABLE: catalog writes composed with physical file creation
//! under compensating rollback.

use tracing::info;

use super::{unwind, ExecuteError, QueryResult, Undo};
use crate::catalog::{Catalog, COLUMNS_TABLE_NAME, TABLES_TABLE_NAME};
use crate::parser::CreateTable;
use crate::types::{DataType, Row, Value};

pub(super) fn execute(
    catalog: &mut Catalog,
    statement: CreateTable,
) -> Result<QueryResult, ExecuteError> {
    let table_name = statement.table_name.clone();
    let mut undo = Vec::new();
    match run(catalog, &mut undo, statement) {
        Ok(()) => Ok(QueryResult::with_message(format!("created {table_name}"))),
        Err(error) => {
            unwind(catalog, &undo);
            catalog.evict_table(&table_name);
            Err(error)
        }
    }
}

fn run(
    catalog: &mut Catalog,
    undo: &mut Vec<Undo>,
    statement: CreateTable,
) -> Result<(), ExecuteError> {
    let CreateTable {
        table_name,
        columns,
        if_not_exists,
    } = statement;

    // declared types must be storable before anything is written
    for column in &columns {
        column_attribute(&column.data_type)?;
    }

    let row = Row::from([("table_name".to_string(), Value::from(table_name.as_str()))]);
    let handle = catalog.get_table(TABLES_TABLE_NAME)?.insert(&row)?;
    undo.push(Undo {
        table: TABLES_TABLE_NAME,
        handle,
    });

    for column in &columns {
        let row = Row::from([
            ("table_name".to_string(), Value::from(table_name.as_str())),
            ("column_name".to_string(), Value::from(column.name.as_str())),
            ("data_type".to_string(), Value::from(column.data_type.as_str())),
        ]);
        let handle = catalog.get_table(COLUMNS_TABLE_NAME)?.insert(&row)?;
        undo.push(Undo {
            table: COLUMNS_TABLE_NAME,
            handle,
        });
    }

    let table = catalog.get_table(&table_name)?;
    if if_not_exists {
        table.create_if_not_exists()?;
    } else {
        table.create()?;
    }
    info!(table = %table_name, "created table");
    Ok(())
}

/// Map a declared type keyword onto a storable attribute.
fn column_attribute(keyword: &str) -> Result<DataType, ExecuteError> {
    match keyword {
        "INT" => Ok(DataType::Int),
        "TEXT" => Ok(DataType::Text),
        other => Err(ExecuteError::NotImplemented(format!("column type {other}"))),
    }
}
