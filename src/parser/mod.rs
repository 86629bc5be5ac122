// Copyright 2026 HeapLight Project Authors. Licensed under Apache-2.0.

//! The SQL front door.
//!
//! `sqlparser` handles the core grammar (CREATE TABLE, CREATE INDEX,
//! DROP TABLE); a small keyword scanner recognises the MySQL-flavoured
//! forms the generic dialect does not (SHOW TABLES / COLUMNS / INDEX and
//! DROP INDEX … FROM). Both feed the abstract [`Statement`] tree, which
//! is all the executor ever sees.

mod scan;
mod sql_parser;

use sqlparser::dialect::GenericDialect;
use sqlparser::parser::Parser;

/// A parsed statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    CreateTable(CreateTable),
    CreateIndex(CreateIndex),
    DropTable { table_name: String },
    DropIndex { table_name: String, index_name: String },
    ShowTables,
    ShowColumns { table_name: String },
    ShowIndex { table_name: String },
    /// Recognised by the grammar but not handled by this engine.
    Unsupported(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTable {
    pub table_name: String,
    pub columns: Vec<ColumnDef>,
    pub if_not_exists: bool,
}

/// A column declaration: the name and the declared type keyword,
/// uppercased (`INT`, `TEXT`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: String,
    pub data_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateIndex {
    pub table_name: String,
    pub index_name: String,
    /// The USING clause, as written; absent means the default method.
    pub index_type: Option<String>,
    pub columns: Vec<String>,
}

/// The error type of statement parsing.
#[derive(thiserror::Error, Debug)]
pub enum ParserError {
    #[error("{0}")]
    Sql(#[from] sqlparser::parser::ParserError),
    #[error("invalid statement: {0}")]
    Invalid(String),
}

/// Parse one SQL statement.
pub fn parse(sql: &str) -> Result<Statement, ParserError> {
    let sql = sql.trim().trim_end_matches(';').trim_end();
    if sql.is_empty() {
        return Err(ParserError::Invalid("empty statement".into()));
    }
    if let Some(statement) = scan::try_parse(sql)? {
        return Ok(statement);
    }
    let statements = Parser::parse_sql(&GenericDialect {}, sql)?;
    match statements.into_iter().next() {
        Some(ast) => sql_parser::translate(ast),
        None => Err(ParserError::Invalid("empty statement".into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_create_table() {
        let stmt = parse("CREATE TABLE t (a INT, b TEXT)").unwrap();
        assert_eq!(
            stmt,
            Statement::CreateTable(CreateTable {
                table_name: "t".into(),
                columns: vec![
                    ColumnDef { name: "a".into(), data_type: "INT".into() },
                    ColumnDef { name: "b".into(), data_type: "TEXT".into() },
                ],
                if_not_exists: false,
            })
        );
    }

    #[test]
    fn parse_create_table_if_not_exists() {
        let stmt = parse("create table if not exists t (a integer);").unwrap();
        match stmt {
            Statement::CreateTable(create) => {
                assert!(create.if_not_exists);
                assert_eq!(create.columns[0].data_type, "INT");
            }
            other => panic!("unexpected statement: {other:?}"),
        }
    }

    #[test]
    fn parse_create_index() {
        let stmt = parse("CREATE INDEX ix ON t USING BTREE (a)").unwrap();
        assert_eq!(
            stmt,
            Statement::CreateIndex(CreateIndex {
                table_name: "t".into(),
                index_name: "ix".into(),
                index_type: Some("BTREE".into()),
                columns: vec!["a".into()],
            })
        );
    }

    #[test]
    fn parse_create_index_defaults_the_method() {
        let stmt = parse("CREATE INDEX ix ON t (a, b)").unwrap();
        match stmt {
            Statement::CreateIndex(create) => {
                assert_eq!(create.index_type, None);
                assert_eq!(create.columns, ["a", "b"]);
            }
            other => panic!("unexpected statement: {other:?}"),
        }
    }

    #[test]
    fn parse_drop_table() {
        let stmt = parse("DROP TABLE t").unwrap();
        assert_eq!(stmt, Statement::DropTable { table_name: "t".into() });
    }

    #[test]
    fn parse_drop_index() {
        let stmt = parse("DROP INDEX ix FROM t").unwrap();
        assert_eq!(
            stmt,
            Statement::DropIndex { table_name: "t".into(), index_name: "ix".into() }
        );
    }

    #[test]
    fn parse_show_statements() {
        assert_eq!(parse("SHOW TABLES").unwrap(), Statement::ShowTables);
        assert_eq!(parse("show tables;").unwrap(), Statement::ShowTables);
        assert_eq!(
            parse("SHOW COLUMNS FROM _tables").unwrap(),
            Statement::ShowColumns { table_name: "_tables".into() }
        );
        assert_eq!(
            parse("SHOW INDEX FROM t").unwrap(),
            Statement::ShowIndex { table_name: "t".into() }
        );
    }

    #[test]
    fn unhandled_statements_are_reported_not_rejected() {
        let stmt = parse("SELECT * FROM t").unwrap();
        assert!(matches!(stmt, Statement::Unsupported(_)));
    }

    #[test]
    fn garbage_is_a_parse_error() {
        assert!(parse("CREATE ELEPHANT t").is_err());
        assert!(parse("SHOW NONSENSE").is_err());
        assert!(parse("").is_err());
        assert!(parse("DROP INDEX ix").is_err());
    }
}
