// Copyright 2026 HeapLight Project Authors. Licensed under Apache-2.0.

//! Statement execution against the schema catalog.
//!
//! One module per statement family, dispatched from [`execute`]. Every
//! lower-layer error is wrapped into [`ExecuteError`] on its way to the
//! user; multi-step statements push an [`Undo`] entry per catalog write
//! and unwind the stack if a later step fails.

mod create_index;
mod create_table;
mod drop;
mod show;

use std::fmt;

use itertools::Itertools;
use tracing::warn;

use crate::catalog::{Catalog, CatalogError};
use crate::parser::Statement;
use crate::storage::StorageError;
use crate::types::{DataType, Handle, Row, Value};

/// The result of executing one statement: either a bare message or a
/// tabular result with its schema.
#[derive(Debug)]
pub struct QueryResult {
    column_names: Option<Vec<String>>,
    column_attributes: Option<Vec<DataType>>,
    rows: Option<Vec<Row>>,
    message: String,
}

impl QueryResult {
    fn with_message(message: impl Into<String>) -> QueryResult {
        QueryResult {
            column_names: None,
            column_attributes: None,
            rows: None,
            message: message.into(),
        }
    }

    fn with_rows(
        column_names: Vec<String>,
        column_attributes: Vec<DataType>,
        rows: Vec<Row>,
    ) -> QueryResult {
        let message = format!("successfully returned {} rows", rows.len());
        QueryResult {
            column_names: Some(column_names),
            column_attributes: Some(column_attributes),
            rows: Some(rows),
            message,
        }
    }

    pub fn column_names(&self) -> Option<&[String]> {
        self.column_names.as_deref()
    }

    pub fn column_attributes(&self) -> Option<&[DataType]> {
        self.column_attributes.as_deref()
    }

    pub fn rows(&self) -> Option<&[Row]> {
        self.rows.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for QueryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let (Some(names), Some(attrs), Some(rows)) =
            (&self.column_names, &self.column_attributes, &self.rows)
        {
            writeln!(f, "{}", names.iter().join(" "))?;
            writeln!(f, "+{}", "----------+".repeat(names.len()))?;
            for row in rows {
                let cells = names
                    .iter()
                    .zip(attrs)
                    .map(|(name, attr)| render_cell(row.get(name), *attr))
                    .join(" ");
                writeln!(f, "{cells}")?;
            }
        }
        write!(f, "{}", self.message)
    }
}

fn render_cell(value: Option<&Value>, attribute: DataType) -> String {
    match (attribute, value) {
        (DataType::Boolean, Some(Value::Int(n))) => (*n != 0).to_string(),
        (_, Some(value)) => value.to_string(),
        (_, None) => "???".to_string(),
    }
}

/// The error type of statement execution.
#[derive(thiserror::Error, Debug)]
pub enum ExecuteError {
    #[error("cannot drop a schema table")]
    CannotDropSchemaTable,
    #[error("not implemented: {0}")]
    NotImplemented(String),
    #[error("{0}")]
    Relation(#[from] CatalogError),
    #[error("{0}")]
    Storage(#[from] StorageError),
}

/// Execute one parsed statement against the catalog.
pub fn execute(catalog: &mut Catalog, statement: Statement) -> Result<QueryResult, ExecuteError> {
    match statement {
        Statement::CreateTable(create) => create_table::execute(catalog, create),
        Statement::CreateIndex(create) => create_index::execute(catalog, create),
        Statement::DropTable { table_name } => drop::drop_table(catalog, &table_name),
        Statement::DropIndex {
            table_name,
            index_name,
        } => drop::drop_index(catalog, &table_name, &index_name),
        Statement::ShowTables => show::show_tables(catalog),
        Statement::ShowColumns { table_name } => show::show_columns(catalog, &table_name),
        Statement::ShowIndex { table_name } => show::show_index(catalog, &table_name),
        Statement::Unsupported(_) => Ok(QueryResult::with_message("not implemented")),
    }
}

/// One catalog write to undo if a later step of a statement fails.
struct Undo {
    table: &'static str,
    handle: Handle,
}

/// Unwind catalog writes in reverse order. Compensation is best-effort:
/// a secondary failure is logged and skipped.
fn unwind(catalog: &mut Catalog, undo: &[Undo]) {
    for entry in undo.iter().rev() {
        let outcome = catalog
            .get_table(entry.table)
            .map_err(ExecuteError::from)
            .and_then(|table| Ok(table.del(entry.handle)?));
        if let Err(error) = outcome {
            warn!(table = entry.table, ?error, "compensation failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rendering_matches_the_wire_format() {
        let rows = vec![
            Row::from([
                ("name".to_string(), Value::from("t")),
                ("n".to_string(), Value::Int(3)),
                ("flag".to_string(), Value::Int(1)),
            ]),
            Row::from([
                ("name".to_string(), Value::from("u")),
                ("n".to_string(), Value::Int(-1)),
                ("flag".to_string(), Value::Int(0)),
            ]),
        ];
        let result = QueryResult::with_rows(
            vec!["name".into(), "n".into(), "flag".into()],
            vec![DataType::Text, DataType::Int, DataType::Boolean],
            rows,
        );
        assert_eq!(
            result.to_string(),
            "name n flag\n\
             +----------+----------+----------+\n\
             \"t\" 3 true\n\
             \"u\" -1 false\n\
             successfully returned 2 rows"
        );
    }

    #[test]
    fn message_results_render_bare() {
        let result = QueryResult::with_message("created t");
        assert_eq!(result.to_string(), "created t");
    }
}
