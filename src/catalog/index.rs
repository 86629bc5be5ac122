// Copyright 2026 HeapLight Project Authors. Licensed under Apache-2.0.

use tracing::debug;

use super::CatalogResult;

/// The hooks an index implementation exposes to the executor. The
/// catalog records index metadata in `_indices`; building and tearing
/// down the physical structure is behind this seam.
pub trait Index {
    /// Build the physical index structure.
    fn create(&mut self) -> CatalogResult<()>;

    /// Tear the physical index structure down.
    fn drop_index(&mut self) -> CatalogResult<()>;
}

/// The shipped implementation: metadata only. The catalog rows fully
/// describe the index; the hooks just log.
pub struct MetadataIndex {
    table_name: String,
    index_name: String,
}

impl MetadataIndex {
    pub fn new(table_name: &str, index_name: &str) -> MetadataIndex {
        MetadataIndex {
            table_name: table_name.to_string(),
            index_name: index_name.to_string(),
        }
    }
}

impl Index for MetadataIndex {
    fn create(&mut self) -> CatalogResult<()> {
        debug!(table = %self.table_name, index = %self.index_name, "index created");
        Ok(())
    }

    fn drop_index(&mut self) -> CatalogResult<()> {
        debug!(table = %self.table_name, index = %self.index_name, "index dropped");
        Ok(())
    }
}
