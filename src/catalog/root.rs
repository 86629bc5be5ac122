// Copyright 2026 HeapLight Project Authors. Licensed under Apache-2.0.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::index::{Index, MetadataIndex};
use super::{
    CatalogError, CatalogResult, COLUMNS_TABLE_NAME, INDICES_TABLE_NAME, TABLES_TABLE_NAME,
};
use crate::storage::HeapTable;
use crate::types::{DataType, Row, Value};

/// Column descriptions of the three schema tables, in declared order.
/// These rows are what the catalog inserts into `_columns` about itself.
const SELF_DESCRIPTION: &[(&str, &str, &str)] = &[
    ("_tables", "table_name", "TEXT"),
    ("_columns", "table_name", "TEXT"),
    ("_columns", "column_name", "TEXT"),
    ("_columns", "data_type", "TEXT"),
    ("_indices", "table_name", "TEXT"),
    ("_indices", "index_name", "TEXT"),
    ("_indices", "seq_in_index", "INT"),
    ("_indices", "column_name", "TEXT"),
    ("_indices", "index_type", "TEXT"),
    ("_indices", "is_unique", "INT"),
];

fn meta_schema(name: &str) -> (Vec<String>, Vec<DataType>) {
    let mut column_names = Vec::new();
    let mut column_attributes = Vec::new();
    for &(table, column, data_type) in SELF_DESCRIPTION {
        if table == name {
            column_names.push(column.to_string());
            column_attributes.push(match data_type {
                "INT" => DataType::Int,
                _ => DataType::Text,
            });
        }
    }
    (column_names, column_attributes)
}

/// The catalog: an explicit value owned by the database and threaded
/// through the executor. It resolves relations by name, caching each one
/// on first use, and hands out the index objects behind `_indices` rows.
pub struct Catalog {
    dir: PathBuf,
    relations: HashMap<String, HeapTable>,
    indices: HashMap<(String, String), Box<dyn Index>>,
}

impl Catalog {
    /// Open the catalog in `dir`, creating and self-describing the
    /// schema tables on first use.
    pub fn open(dir: &Path) -> CatalogResult<Catalog> {
        let mut catalog = Catalog {
            dir: dir.to_path_buf(),
            relations: HashMap::new(),
            indices: HashMap::new(),
        };
        for name in [TABLES_TABLE_NAME, COLUMNS_TABLE_NAME, INDICES_TABLE_NAME] {
            let (column_names, column_attributes) = meta_schema(name);
            catalog
                .relations
                .insert(name.to_string(), HeapTable::new(dir, name, column_names, column_attributes));
        }
        catalog.bootstrap()?;
        Ok(catalog)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The open relation named `name`, resolving and caching it on first
    /// use by reading its `_columns` rows in ascending row order.
    pub fn get_table(&mut self, name: &str) -> CatalogResult<&mut HeapTable> {
        if !self.relations.contains_key(name) {
            let (column_names, column_attributes) = self.read_schema(name)?;
            let table = HeapTable::new(&self.dir, name, column_names, column_attributes);
            self.relations.insert(name.to_string(), table);
            debug!(table = name, "cached relation");
        }
        self.relations
            .get_mut(name)
            .ok_or_else(|| CatalogError::NotFound("table", name.to_string()))
    }

    /// The index object behind the `_indices` rows for
    /// `(table_name, index_name)`, cached on first use.
    pub fn get_index(&mut self, table_name: &str, index_name: &str) -> CatalogResult<&mut dyn Index> {
        let key = (table_name.to_string(), index_name.to_string());
        if !self.indices.contains_key(&key) {
            let filter = Row::from([
                ("table_name".to_string(), Value::from(table_name)),
                ("index_name".to_string(), Value::from(index_name)),
            ]);
            let rows = self
                .meta_mut(INDICES_TABLE_NAME)?
                .select_where(&filter)
                .map_err(|e| CatalogError::storage(INDICES_TABLE_NAME, e))?;
            if rows.is_empty() {
                return Err(CatalogError::NotFound(
                    "index",
                    format!("{table_name}.{index_name}"),
                ));
            }
            self.indices
                .insert(key.clone(), Box::new(MetadataIndex::new(table_name, index_name)));
            debug!(table = table_name, index = index_name, "cached index");
        }
        match self.indices.get_mut(&key) {
            Some(index) => Ok(index.as_mut()),
            None => Err(CatalogError::NotFound(
                "index",
                format!("{table_name}.{index_name}"),
            )),
        }
    }

    /// Forget the cached relation and any index objects of `name`. Used
    /// by DROP TABLE so a later re-create observes fresh state.
    pub fn evict_table(&mut self, name: &str) {
        self.relations.remove(name);
        self.indices.retain(|(table, _), _| table != name);
        debug!(table = name, "evicted relation");
    }

    /// Forget one cached index object.
    pub fn evict_index(&mut self, table_name: &str, index_name: &str) {
        self.indices
            .remove(&(table_name.to_string(), index_name.to_string()));
    }

    /// Create the schema tables on first use and insert their
    /// self-descriptions. A catalog created before `_indices` existed is
    /// upgraded in place.
    fn bootstrap(&mut self) -> CatalogResult<()> {
        let tables_fresh = !self.dir.join(format!("{TABLES_TABLE_NAME}.db")).exists();
        let indices_fresh = !self.dir.join(format!("{INDICES_TABLE_NAME}.db")).exists();

        for name in [TABLES_TABLE_NAME, COLUMNS_TABLE_NAME, INDICES_TABLE_NAME] {
            self.meta_mut(name)?
                .create_if_not_exists()
                .map_err(|e| CatalogError::storage(name, e))?;
        }

        if tables_fresh {
            info!(dir = %self.dir.display(), "bootstrapping schema catalog");
            for name in [TABLES_TABLE_NAME, COLUMNS_TABLE_NAME, INDICES_TABLE_NAME] {
                self.describe_meta(name)?;
            }
        } else if indices_fresh {
            info!("describing _indices in an existing catalog");
            self.describe_meta(INDICES_TABLE_NAME)?;
        }
        Ok(())
    }

    /// Insert the `_tables` row and `_columns` rows describing one
    /// schema table.
    fn describe_meta(&mut self, name: &str) -> CatalogResult<()> {
        let row = Row::from([("table_name".to_string(), Value::from(name))]);
        self.meta_mut(TABLES_TABLE_NAME)?
            .insert(&row)
            .map_err(|e| CatalogError::storage(TABLES_TABLE_NAME, e))?;

        for &(table, column, data_type) in SELF_DESCRIPTION {
            if table != name {
                continue;
            }
            let row = Row::from([
                ("table_name".to_string(), Value::from(table)),
                ("column_name".to_string(), Value::from(column)),
                ("data_type".to_string(), Value::from(data_type)),
            ]);
            self.meta_mut(COLUMNS_TABLE_NAME)?
                .insert(&row)
                .map_err(|e| CatalogError::storage(COLUMNS_TABLE_NAME, e))?;
        }
        Ok(())
    }

    /// Reconstruct a relation's schema from its `_columns` rows.
    fn read_schema(&mut self, name: &str) -> CatalogResult<(Vec<String>, Vec<DataType>)> {
        let filter = Row::from([("table_name".to_string(), Value::from(name))]);
        let columns = self.meta_mut(COLUMNS_TABLE_NAME)?;
        let handles = columns
            .select_where(&filter)
            .map_err(|e| CatalogError::storage(COLUMNS_TABLE_NAME, e))?;
        if handles.is_empty() {
            return Err(CatalogError::NotFound("table", name.to_string()));
        }

        let mut column_names = Vec::new();
        let mut column_attributes = Vec::new();
        for handle in handles {
            let row = columns
                .project(handle)
                .map_err(|e| CatalogError::storage(COLUMNS_TABLE_NAME, e))?;
            let column_name = row
                .get("column_name")
                .and_then(Value::as_text)
                .ok_or_else(|| CatalogError::Corrupt(format!("no column name for {name}")))?;
            let data_type = row
                .get("data_type")
                .and_then(Value::as_text)
                .ok_or_else(|| CatalogError::Corrupt(format!("no data type for {name}.{column_name}")))?;
            column_attributes.push(match data_type {
                "INT" => DataType::Int,
                "TEXT" => DataType::Text,
                other => {
                    return Err(CatalogError::Corrupt(format!(
                        "unknown data type {other} for {name}.{column_name}"
                    )))
                }
            });
            column_names.push(column_name.to_string());
        }
        Ok((column_names, column_attributes))
    }

    fn meta_mut(&mut self, name: &str) -> CatalogResult<&mut HeapTable> {
        self.relations
            .get_mut(name)
            .ok_or_else(|| CatalogError::Corrupt(format!("schema table {name} missing")))
    }
}
