// Copyright 2026 HeapLight Project Authors. Licensed under Apache-2.0.

//! A heap relation: a named schema whose rows are marshalled into the
//! slotted pages of one heap file.
//!
//! Row encoding is the concatenation of the columns in schema declaration
//! order: INT is 4 bytes LE i32, TEXT is a 2-byte LE length followed by
//! that many ASCII bytes. No padding, no alignment, no nullability.

use std::path::Path;

use bytes::{Buf, BufMut};
use tracing::debug;

use super::{HeapFile, StorageError, StorageResult, BLOCK_SIZE};
use crate::types::{DataType, Handle, Row, Value};

pub struct HeapTable {
    file: HeapFile,
    column_names: Vec<String>,
    column_attributes: Vec<DataType>,
}

impl HeapTable {
    pub fn new(
        dir: &Path,
        name: &str,
        column_names: Vec<String>,
        column_attributes: Vec<DataType>,
    ) -> HeapTable {
        debug_assert_eq!(column_names.len(), column_attributes.len());
        HeapTable {
            file: HeapFile::new(dir, name),
            column_names,
            column_attributes,
        }
    }

    pub fn name(&self) -> &str {
        self.file.name()
    }

    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    pub fn column_attributes(&self) -> &[DataType] {
        &self.column_attributes
    }

    pub fn create(&mut self) -> StorageResult<()> {
        self.file.create()
    }

    /// Open the relation, creating it if opening fails.
    pub fn create_if_not_exists(&mut self) -> StorageResult<()> {
        match self.file.open() {
            Ok(()) => Ok(()),
            Err(_) => self.file.create(),
        }
    }

    pub fn drop_table(&mut self) -> StorageResult<()> {
        self.file.drop_file()
    }

    pub fn open(&mut self) -> StorageResult<()> {
        self.file.open()
    }

    pub fn close(&mut self) {
        self.file.close()
    }

    /// Insert a row; returns the handle naming it.
    ///
    /// The row is appended to the last page; if that page has no room, a
    /// single new page is allocated and the append retried. A row that
    /// cannot fit even in a fresh page is too big for any page.
    pub fn insert(&mut self, row: &Row) -> StorageResult<Handle> {
        self.file.open()?;
        let validated = self.validate(row)?;
        let data = self.marshal(&validated)?;

        let mut page = self.file.get(self.file.last())?;
        let record_id = match page.add(&data) {
            Ok(id) => id,
            Err(StorageError::NoRoom(_)) => {
                page = self.file.get_new()?;
                match page.add(&data) {
                    Ok(id) => id,
                    Err(StorageError::NoRoom(_)) => {
                        return Err(StorageError::RowTooBig(data.len()))
                    }
                    Err(e) => return Err(e),
                }
            }
            Err(e) => return Err(e),
        };
        self.file.put(&page)?;
        debug!(table = %self.name(), block = page.block_id(), record = record_id, "inserted row");
        Ok((page.block_id(), record_id))
    }

    pub fn del(&mut self, handle: Handle) -> StorageResult<()> {
        self.file.open()?;
        let (block_id, record_id) = handle;
        let mut page = self.file.get(block_id)?;
        page.del(record_id)?;
        self.file.put(&page)
    }

    /// Handles of every live row, in `(block, record)` order.
    pub fn select(&mut self) -> StorageResult<Vec<Handle>> {
        self.file.open()?;
        let mut handles = Vec::new();
        for block_id in self.file.block_ids() {
            let page = self.file.get(block_id)?;
            for record_id in page.ids() {
                handles.push((block_id, record_id));
            }
        }
        Ok(handles)
    }

    /// Handles of the rows equal to `filter` on the overlap of their
    /// column names.
    pub fn select_where(&mut self, filter: &Row) -> StorageResult<Vec<Handle>> {
        let mut handles = Vec::new();
        for handle in self.select()? {
            let row = self.project(handle)?;
            let matches = filter
                .iter()
                .all(|(name, value)| row.get(name).map_or(true, |v| v == value));
            if matches {
                handles.push(handle);
            }
        }
        Ok(handles)
    }

    /// Fetch and unmarshal the full row behind `handle`.
    pub fn project(&mut self, handle: Handle) -> StorageResult<Row> {
        self.file.open()?;
        let (block_id, record_id) = handle;
        let page = self.file.get(block_id)?;
        let data = page
            .get(record_id)?
            .ok_or(StorageError::NotFound(record_id))?;
        self.unmarshal(data)
    }

    /// Like [`project`](HeapTable::project), but keep only the named
    /// columns.
    pub fn project_columns(&mut self, handle: Handle, column_names: &[String]) -> StorageResult<Row> {
        let row = self.project(handle)?;
        let mut result = Row::new();
        for name in column_names {
            match row.get(name) {
                Some(value) => {
                    result.insert(name.clone(), value.clone());
                }
                None => return Err(StorageError::UnknownColumn(name.clone())),
            }
        }
        Ok(result)
    }

    /// Rebuild a row containing exactly the declared columns, in any
    /// input order. Extra keys are ignored; absent ones are an error.
    pub fn validate(&self, row: &Row) -> StorageResult<Row> {
        let mut validated = Row::new();
        for name in &self.column_names {
            let value = row
                .get(name)
                .ok_or_else(|| StorageError::MissingColumn(name.clone()))?;
            validated.insert(name.clone(), value.clone());
        }
        Ok(validated)
    }

    fn marshal(&self, row: &Row) -> StorageResult<Vec<u8>> {
        let mut buf = Vec::new();
        for (name, attr) in self.column_names.iter().zip(&self.column_attributes) {
            let value = row
                .get(name)
                .ok_or_else(|| StorageError::MissingColumn(name.clone()))?;
            match (attr, value) {
                (DataType::Int, Value::Int(n)) => buf.put_i32_le(*n),
                (DataType::Text, Value::Text(s)) => {
                    if s.len() > u16::MAX as usize {
                        return Err(StorageError::TextTooLong(s.len()));
                    }
                    buf.put_u16_le(s.len() as u16);
                    buf.put_slice(s.as_bytes());
                }
                _ => return Err(StorageError::InvalidValue(name.clone())),
            }
            if buf.len() > BLOCK_SIZE {
                return Err(StorageError::RowTooBig(buf.len()));
            }
        }
        Ok(buf)
    }

    fn unmarshal(&self, mut data: &[u8]) -> StorageResult<Row> {
        let mut row = Row::new();
        for (name, attr) in self.column_names.iter().zip(&self.column_attributes) {
            match attr {
                DataType::Int => {
                    if data.remaining() < 4 {
                        return Err(StorageError::Decode(format!(
                            "row data truncated at column {name}"
                        )));
                    }
                    row.insert(name.clone(), Value::Int(data.get_i32_le()));
                }
                DataType::Text => {
                    if data.remaining() < 2 {
                        return Err(StorageError::Decode(format!(
                            "row data truncated at column {name}"
                        )));
                    }
                    let len = data.get_u16_le() as usize;
                    if data.remaining() < len {
                        return Err(StorageError::Decode(format!(
                            "row data truncated at column {name}"
                        )));
                    }
                    let text = String::from_utf8(data[..len].to_vec())
                        .map_err(|e| StorageError::Decode(e.to_string()))?;
                    data.advance(len);
                    row.insert(name.clone(), Value::Text(text));
                }
                DataType::Boolean => {
                    return Err(StorageError::Decode(format!(
                        "column {name}: BOOLEAN is not a storable type"
                    )))
                }
            }
        }
        Ok(row)
    }
}
