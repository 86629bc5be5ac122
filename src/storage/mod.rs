// Copyright 2026 HeapLight Project Authors. Licensed under Apache-2.0.

//! Heap storage: slotted pages persisted in record-numbered files.
//!
//! The layering, leaves first: [`RecordFile`] is a file of fixed-length
//! 4 KiB records keyed by a 1-origin block number; [`SlottedPage`] is the
//! byte-level record layout inside one such block; [`HeapFile`] allocates
//! and enumerates pages; [`HeapTable`] marshals rows into them.

mod heap_file;
mod heap_table;
mod page;
mod record_file;

pub use self::heap_file::HeapFile;
pub use self::heap_table::HeapTable;
pub use self::page::SlottedPage;
pub use self::record_file::{OpenMode, RecordFile};

use crate::types::RecordId;

/// The fixed page size, which is also the unit of persistence.
pub const BLOCK_SIZE: usize = 4096;

/// The error type of storage operations.
#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("no room in page for {0} more bytes")]
    NoRoom(usize),
    #[error("record {0} not found")]
    NotFound(RecordId),
    #[error("missing column: {0}")]
    MissingColumn(String),
    #[error("unknown column: {0}")]
    UnknownColumn(String),
    #[error("invalid value for column {0}")]
    InvalidValue(String),
    #[error("row of {0} bytes does not fit in one page")]
    RowTooBig(usize),
    #[error("text value of {0} bytes exceeds the 65535-byte limit")]
    TextTooLong(usize),
    #[error("decode error: {0}")]
    Decode(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;
