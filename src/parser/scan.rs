// Copyright 2026 HeapLight Project Authors. Licensed under Apache-2.0.

//! Keyword scanner for the MySQL-flavoured statements the generic
//! dialect does not parse: SHOW TABLES, SHOW COLUMNS FROM t,
//! SHOW INDEX FROM t, and DROP INDEX ix FROM t.

use super::{ParserError, Statement};

/// Recognise one of the scanned forms, or hand back `None` for the real
/// parser. A malformed SHOW / DROP INDEX is claimed here and rejected.
pub(super) fn try_parse(sql: &str) -> Result<Option<Statement>, ParserError> {
    let words: Vec<&str> = sql.split_whitespace().collect();
    let keyword = |i: usize| words.get(i).map(|w| w.to_ascii_uppercase());

    match keyword(0).as_deref() {
        Some("SHOW") => {
            let statement = match keyword(1).as_deref() {
                Some("TABLES") if words.len() == 2 => Statement::ShowTables,
                Some("COLUMNS") if words.len() == 4 && keyword(2).as_deref() == Some("FROM") => {
                    Statement::ShowColumns {
                        table_name: ident(words[3])?,
                    }
                }
                Some("INDEX") if words.len() == 4 && keyword(2).as_deref() == Some("FROM") => {
                    Statement::ShowIndex {
                        table_name: ident(words[3])?,
                    }
                }
                _ => {
                    return Err(ParserError::Invalid(format!(
                        "unrecognized SHOW statement: {sql}"
                    )))
                }
            };
            Ok(Some(statement))
        }
        Some("DROP") if keyword(1).as_deref() == Some("INDEX") => {
            if words.len() == 5 && keyword(3).as_deref() == Some("FROM") {
                Ok(Some(Statement::DropIndex {
                    index_name: ident(words[2])?,
                    table_name: ident(words[4])?,
                }))
            } else {
                Err(ParserError::Invalid(
                    "DROP INDEX takes the form DROP INDEX <index> FROM <table>".into(),
                ))
            }
        }
        _ => Ok(None),
    }
}

/// A bare ASCII identifier, case kept as given.
fn ident(word: &str) -> Result<String, ParserError> {
    let well_formed = word
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !word.is_empty()
        && !word.chars().next().map_or(false, |c| c.is_ascii_digit());
    if well_formed {
        Ok(word.to_string())
    } else {
        Err(ParserError::Invalid(format!("invalid identifier: {word}")))
    }
}
