// Copyright 2026 HeapLight Project Authors. Licensed under Apache-2.0.

//! A heap file: an ordered sequence of slotted pages, one record per
//! page in a [`RecordFile`]. The file only allocates, fetches, and
//! enumerates page identities; raw I/O stays in the store below.

use std::io;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::record_file::{OpenMode, RecordFile};
use super::{SlottedPage, StorageError, StorageResult, BLOCK_SIZE};
use crate::types::BlockId;

pub struct HeapFile {
    name: String,
    path: PathBuf,
    store: Option<RecordFile>,
    /// Highest allocated block id; 0 on an empty file.
    last: BlockId,
}

impl HeapFile {
    /// A handle on the file `<name>.db` inside the environment directory.
    /// Nothing is opened until [`open`](HeapFile::open) or
    /// [`create`](HeapFile::create).
    pub fn new(dir: &Path, name: &str) -> HeapFile {
        HeapFile {
            name: name.to_string(),
            path: dir.join(format!("{name}.db")),
            store: None,
            last: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Highest allocated block id. Only meaningful while open.
    pub fn last(&self) -> BlockId {
        self.last
    }

    pub fn is_open(&self) -> bool {
        self.store.is_some()
    }

    /// Create the underlying store and its first page. Fails if the file
    /// already exists.
    pub fn create(&mut self) -> StorageResult<()> {
        self.store = Some(RecordFile::open(&self.path, OpenMode::CreateNew)?);
        self.last = 0;
        let _first = self.get_new()?;
        debug!(file = %self.name, "created heap file");
        Ok(())
    }

    /// Remove the file from the store. Outstanding handles into it go
    /// stale; the caller is expected to drop them.
    pub fn drop_file(&mut self) -> StorageResult<()> {
        self.close();
        RecordFile::remove(&self.path)?;
        self.last = 0;
        debug!(file = %self.name, "dropped heap file");
        Ok(())
    }

    /// Idempotent open; populates `last` from the store's record count.
    pub fn open(&mut self) -> StorageResult<()> {
        if self.store.is_none() {
            let store = RecordFile::open(&self.path, OpenMode::Open)?;
            self.last = store.record_count()?;
            self.store = Some(store);
            debug!(file = %self.name, last = self.last, "opened heap file");
        }
        Ok(())
    }

    /// Idempotent close.
    pub fn close(&mut self) {
        self.store = None;
    }

    /// Allocate, persist, and return the next page of the file.
    pub fn get_new(&mut self) -> StorageResult<SlottedPage> {
        self.open()?;
        let block_id = self.last + 1;
        let page = SlottedPage::new(Box::new([0u8; BLOCK_SIZE]), block_id, true);
        self.store()?.put(block_id, page.block())?;
        self.last = block_id;
        Ok(page)
    }

    /// Fetch one page as an owned buffer. The caller must [`put`] it back
    /// before fetching the same page again.
    ///
    /// [`put`]: HeapFile::put
    pub fn get(&mut self, block_id: BlockId) -> StorageResult<SlottedPage> {
        let block = self.store()?.get(block_id)?;
        Ok(SlottedPage::new(block, block_id, false))
    }

    /// Write a modified page back to its key.
    pub fn put(&mut self, page: &SlottedPage) -> StorageResult<()> {
        self.store()?.put(page.block_id(), page.block())
    }

    /// Every block id of the file, in order.
    pub fn block_ids(&self) -> RangeInclusive<BlockId> {
        1..=self.last
    }

    fn store(&mut self) -> StorageResult<&mut RecordFile> {
        self.open()?;
        self.store
            .as_mut()
            .ok_or_else(|| StorageError::Io(io::Error::new(io::ErrorKind::NotConnected, "heap file closed")))
    }
}
