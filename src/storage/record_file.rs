use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use super::{StorageResult, BLOCK_SIZE};
use crate::types::BlockId;

/// How to open the underlying file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    /// Open an existing file; fail if it does not exist.
    Open,
    /// Create the file; fail if it already exists.
    CreateNew,
}

/// A file of fixed-length `BLOCK_SIZE` records keyed by a 1-origin block
/// number. Raw I/O lives here so the heap file above deals only in page
/// identity.
pub struct RecordFile {
    file: File,
    path: PathBuf,
}

impl RecordFile {
    pub fn open(path: impl AsRef<Path>, mode: OpenMode) -> StorageResult<RecordFile> {
        let path = path.as_ref().to_path_buf();
        let file = match mode {
            OpenMode::Open => OpenOptions::new().read(true).write(true).open(&path)?,
            OpenMode::CreateNew => OpenOptions::new()
                .read(true)
                .write(true)
                .create_new(true)
                .open(&path)?,
        };
        Ok(RecordFile { file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of records currently in the file.
    pub fn record_count(&self) -> StorageResult<u32> {
        let len = self.file.metadata()?.len();
        Ok((len / BLOCK_SIZE as u64) as u32)
    }

    pub fn get(&mut self, key: BlockId) -> StorageResult<Box<[u8; BLOCK_SIZE]>> {
        let mut block = Box::new([0u8; BLOCK_SIZE]);
        self.file.seek(SeekFrom::Start(Self::offset(key)))?;
        self.file.read_exact(&mut block[..])?;
        Ok(block)
    }

    pub fn put(&mut self, key: BlockId, block: &[u8; BLOCK_SIZE]) -> StorageResult<()> {
        self.file.seek(SeekFrom::Start(Self::offset(key)))?;
        self.file.write_all(&block[..])?;
        Ok(())
    }

    pub fn remove(path: impl AsRef<Path>) -> StorageResult<()> {
        std::fs::remove_file(path)?;
        Ok(())
    }

    fn offset(key: BlockId) -> u64 {
        debug_assert!(key >= 1, "record keys are 1-origin");
        (key as u64 - 1) * BLOCK_SIZE as u64
    }
}
