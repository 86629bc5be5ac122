// Copyright 2026 HeapLight Project Authors. Licensed under Apache-2.0.

//! CREATE INDEX: one `_indices` row per indexed column, then the index
//! create hook, with the same compensating rollback as CREATE TABLE.

use tracing::info;

use super::{unwind, ExecuteError, QueryResult, Undo};
use crate::catalog::{Catalog, INDICES_TABLE_NAME};
use crate::parser::CreateIndex;
use crate::types::{Row, Value};

pub(super) fn execute(
    catalog: &mut Catalog,
    statement: CreateIndex,
) -> Result<QueryResult, ExecuteError> {
    let table_name = statement.table_name.clone();
    let index_name = statement.index_name.clone();
    let mut undo = Vec::new();
    match run(catalog, &mut undo, statement) {
        Ok(()) => Ok(QueryResult::with_message(format!("created {index_name}"))),
        Err(error) => {
            unwind(catalog, &undo);
            catalog.evict_index(&table_name, &index_name);
            Err(error)
        }
    }
}

fn run(
    catalog: &mut Catalog,
    undo: &mut Vec<Undo>,
    statement: CreateIndex,
) -> Result<(), ExecuteError> {
    let CreateIndex {
        table_name,
        index_name,
        index_type,
        columns,
    } = statement;

    // indexing a table the catalog does not know is an error up front
    catalog.get_table(&table_name)?;

    let index_type = index_type.unwrap_or_else(|| "BTREE".to_string());
    let is_unique = !index_type.eq_ignore_ascii_case("HASH");

    for (position, column_name) in columns.iter().enumerate() {
        let row = Row::from([
            ("table_name".to_string(), Value::from(table_name.as_str())),
            ("index_name".to_string(), Value::from(index_name.as_str())),
            ("seq_in_index".to_string(), Value::Int(position as i32 + 1)),
            ("column_name".to_string(), Value::from(column_name.as_str())),
            ("index_type".to_string(), Value::from(index_type.as_str())),
            ("is_unique".to_string(), Value::Int(is_unique as i32)),
        ]);
        let handle = catalog.get_table(INDICES_TABLE_NAME)?.insert(&row)?;
        undo.push(Undo {
            table: INDICES_TABLE_NAME,
            handle,
        });
    }

    catalog.get_index(&table_name, &index_name)?.create()?;
    info!(table = %table_name, index = %index_name, "created index");
    Ok(())
}
