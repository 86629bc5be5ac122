// Copyright 2026 HeapLight Project Authors. Licensed under Apache-2.0.

//! SHOW TABLES / SHOW COLUMNS / SHOW INDEX.

use super::{ExecuteError, QueryResult};
use crate::catalog::{self, Catalog, COLUMNS_TABLE_NAME, INDICES_TABLE_NAME, TABLES_TABLE_NAME};
use crate::types::{DataType, Row, Value};

/// Every user relation, with the schema tables filtered out.
pub(super) fn show_tables(catalog: &mut Catalog) -> Result<QueryResult, ExecuteError> {
    let column_names = vec!["table_name".to_string()];
    let tables = catalog.get_table(TABLES_TABLE_NAME)?;
    let mut rows = Vec::new();
    for handle in tables.select()? {
        let row = tables.project_columns(handle, &column_names)?;
        let name = row
            .get("table_name")
            .and_then(Value::as_text)
            .unwrap_or_default();
        if !catalog::is_schema_table(name) {
            rows.push(row);
        }
    }
    Ok(QueryResult::with_rows(
        column_names,
        vec![DataType::Text],
        rows,
    ))
}

pub(super) fn show_columns(
    catalog: &mut Catalog,
    table_name: &str,
) -> Result<QueryResult, ExecuteError> {
    let column_names = vec![
        "table_name".to_string(),
        "column_name".to_string(),
        "data_type".to_string(),
    ];
    let filter = Row::from([("table_name".to_string(), Value::from(table_name))]);
    let columns = catalog.get_table(COLUMNS_TABLE_NAME)?;
    let mut rows = Vec::new();
    for handle in columns.select_where(&filter)? {
        rows.push(columns.project_columns(handle, &column_names)?);
    }
    Ok(QueryResult::with_rows(
        column_names,
        vec![DataType::Text; 3],
        rows,
    ))
}

pub(super) fn show_index(
    catalog: &mut Catalog,
    table_name: &str,
) -> Result<QueryResult, ExecuteError> {
    let column_names = vec![
        "table_name".to_string(),
        "index_name".to_string(),
        "seq_in_index".to_string(),
        "column_name".to_string(),
        "index_type".to_string(),
        "is_unique".to_string(),
    ];
    let column_attributes = vec![
        DataType::Text,
        DataType::Text,
        DataType::Int,
        DataType::Text,
        DataType::Text,
        DataType::Boolean,
    ];
    let filter = Row::from([("table_name".to_string(), Value::from(table_name))]);
    let indices = catalog.get_table(INDICES_TABLE_NAME)?;
    let mut rows = Vec::new();
    for handle in indices.select_where(&filter)? {
        rows.push(indices.project_columns(handle, &column_names)?);
    }
    Ok(QueryResult::with_rows(column_names, column_attributes, rows))
}
