// Copyright 2026 HeapLight Project Authors. Licensed under Apache-2.0.

//! DROP TABLE and DROP INDEX.

use tracing::info;

use super::{ExecuteError, QueryResult};
use crate::catalog::{
    self, Catalog, CatalogError, COLUMNS_TABLE_NAME, INDICES_TABLE_NAME, TABLES_TABLE_NAME,
};
use crate::types::{Row, Value};

pub(super) fn drop_table(
    catalog: &mut Catalog,
    table_name: &str,
) -> Result<QueryResult, ExecuteError> {
    if catalog::is_schema_table(table_name) {
        return Err(ExecuteError::CannotDropSchemaTable);
    }
    // resolve before touching catalog rows so a missing table fails early
    catalog.get_table(table_name)?;

    let filter = Row::from([("table_name".to_string(), Value::from(table_name))]);

    // indices first: run each drop hook, then clear the rows
    let handles = catalog
        .get_table(INDICES_TABLE_NAME)?
        .select_where(&filter)?;
    for handle in handles {
        let row = catalog.get_table(INDICES_TABLE_NAME)?.project(handle)?;
        let index_name = row
            .get("index_name")
            .and_then(Value::as_text)
            .ok_or_else(|| CatalogError::Corrupt(format!("index row of {table_name} has no name")))?
            .to_string();
        catalog.get_index(table_name, &index_name)?.drop_index()?;
        catalog.get_table(INDICES_TABLE_NAME)?.del(handle)?;
    }

    // then the column rows
    let columns = catalog.get_table(COLUMNS_TABLE_NAME)?;
    for handle in columns.select_where(&filter)? {
        columns.del(handle)?;
    }

    // the heap file itself
    catalog.get_table(table_name)?.drop_table()?;

    // and finally the _tables row
    let tables = catalog.get_table(TABLES_TABLE_NAME)?;
    for handle in tables.select_where(&filter)? {
        tables.del(handle)?;
    }

    catalog.evict_table(table_name);
    info!(table = table_name, "dropped table");
    Ok(QueryResult::with_message(format!(
        "dropped table: {table_name}"
    )))
}

pub(super) fn drop_index(
    catalog: &mut Catalog,
    table_name: &str,
    index_name: &str,
) -> Result<QueryResult, ExecuteError> {
    // resolve first: dropping an unrecorded index is an error
    catalog.get_index(table_name, index_name)?;

    let filter = Row::from([
        ("table_name".to_string(), Value::from(table_name)),
        ("index_name".to_string(), Value::from(index_name)),
    ]);
    let indices = catalog.get_table(INDICES_TABLE_NAME)?;
    for handle in indices.select_where(&filter)? {
        indices.del(handle)?;
    }

    catalog.get_index(table_name, index_name)?.drop_index()?;
    catalog.evict_index(table_name, index_name);
    info!(table = table_name, index = index_name, "dropped index");
    Ok(QueryResult::with_message(format!(
        "dropped index: {index_name}"
    )))
}
