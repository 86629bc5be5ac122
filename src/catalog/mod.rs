// Copyright 2026 HeapLight Project Authors. Licensed under Apache-2.0.

//! The schema catalog: three self-describing meta-relations plus a cache
//! of open relations and index objects.
//!
//! `_tables` holds one row per relation, `_columns` one row per column in
//! declared order, `_indices` one row per `(index, column)` pair. On
//! first use the catalog creates the three files and inserts their own
//! descriptions into themselves; afterwards every process run finds the
//! catalog on disk and reuses it.

mod index;
mod root;

pub use self::index::{Index, MetadataIndex};
pub use self::root::Catalog;

use crate::storage::StorageError;

pub static TABLES_TABLE_NAME: &str = "_tables";
pub static COLUMNS_TABLE_NAME: &str = "_columns";
pub static INDICES_TABLE_NAME: &str = "_indices";

/// Whether `name` is one of the three schema tables.
pub fn is_schema_table(name: &str) -> bool {
    name == TABLES_TABLE_NAME || name == COLUMNS_TABLE_NAME || name == INDICES_TABLE_NAME
}

/// The error type of catalog operations.
#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("{0} not found: {1}")]
    NotFound(&'static str, String),
    #[error("bad catalog entry: {0}")]
    Corrupt(String),
    #[error("relation {table}: {source}")]
    Storage {
        table: String,
        #[source]
        source: StorageError,
    },
}

impl CatalogError {
    pub(crate) fn storage(table: impl Into<String>, source: StorageError) -> CatalogError {
        CatalogError::Storage {
            table: table.into(),
            source,
        }
    }
}

pub type CatalogResult<T> = std::result::Result<T, CatalogError>;
