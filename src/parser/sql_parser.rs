// Copyright 2026 HeapLight Project Authors. Licensed under Apache-2.0.

//! Lowering from the `sqlparser` AST to the engine's statement tree.

use sqlparser::ast;

use super::{ColumnDef, CreateIndex, CreateTable, ParserError, Statement};

pub(super) fn translate(statement: ast::Statement) -> Result<Statement, ParserError> {
    match statement {
        ast::Statement::CreateTable {
            name,
            columns,
            if_not_exists,
            ..
        } => Ok(Statement::CreateTable(CreateTable {
            table_name: object_name(&name),
            columns: columns.iter().map(column_def).collect(),
            if_not_exists,
        })),
        ast::Statement::CreateIndex {
            name,
            table_name,
            using,
            columns,
            ..
        } => Ok(Statement::CreateIndex(CreateIndex {
            table_name: object_name(&table_name),
            index_name: object_name(&name),
            index_type: using.map(|method| method.value),
            columns: columns
                .iter()
                .map(index_column)
                .collect::<Result<_, _>>()?,
        })),
        ast::Statement::Drop {
            object_type: ast::ObjectType::Table,
            names,
            ..
        } => match names.first() {
            Some(name) => Ok(Statement::DropTable {
                table_name: object_name(name),
            }),
            None => Err(ParserError::Invalid("DROP TABLE names no table".into())),
        },
        ast::Statement::Drop {
            object_type: ast::ObjectType::Index,
            ..
        } => Err(ParserError::Invalid(
            "DROP INDEX takes the form DROP INDEX <index> FROM <table>".into(),
        )),
        other => Ok(Statement::Unsupported(other.to_string())),
    }
}

/// Names are unqualified throughout; the last part is the object itself.
fn object_name(name: &ast::ObjectName) -> String {
    name.0
        .last()
        .map(|ident| ident.value.clone())
        .unwrap_or_default()
}

fn column_def(column: &ast::ColumnDef) -> ColumnDef {
    ColumnDef {
        name: column.name.value.clone(),
        data_type: data_type_keyword(&column.data_type),
    }
}

/// The declared type as a bare uppercase keyword. INT and TEXT are the
/// types the engine stores; everything else is surfaced as written for
/// the executor to reject.
fn data_type_keyword(data_type: &ast::DataType) -> String {
    let keyword = data_type.to_string().to_ascii_uppercase();
    match keyword.as_str() {
        "INT" | "INTEGER" => "INT".to_string(),
        _ => keyword,
    }
}

fn index_column(column: &ast::OrderByExpr) -> Result<String, ParserError> {
    match &column.expr {
        ast::Expr::Identifier(ident) => Ok(ident.value.clone()),
        other => Err(ParserError::Invalid(format!(
            "index columns must be plain column names, got {other}"
        ))),
    }
}
