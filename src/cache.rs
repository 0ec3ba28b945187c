// src/cache.rs
use crate::error::CatalogError;
use crate::product::Product;
use dirs::data_dir;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

const CATALOG_FILE: &str = "catalog.cache";
const TIMESTAMP_FILE: &str = "last_updated.txt";

/// Snapshot store for the last catalog that loaded successfully.
#[derive(Debug, Clone)]
pub struct SnapshotCache {
    dir: PathBuf,
}

impl SnapshotCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        SnapshotCache { dir: dir.into() }
    }

    /// Cache under the user data directory, if there is one.
    pub fn in_data_dir() -> Option<Self> {
        Some(Self::new(data_dir()?.join("storefrontSearch")))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn ensure_dir(&self) -> Result<(), CatalogError> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
        }
        Ok(())
    }

    /// Save the catalog and record when it was saved
    pub fn save(&self, products: &[Product]) -> Result<(), CatalogError> {
        self.ensure_dir()?;
        let encoded = bincode::serialize(products)?;
        let mut file = File::create(self.dir.join(CATALOG_FILE))?;
        file.write_all(&encoded)?;
        self.update_timestamp()
    }

    /// Load the cached catalog. `None` when nothing was cached yet.
    pub fn load(&self) -> Result<Option<Vec<Product>>, CatalogError> {
        let path = self.dir.join(CATALOG_FILE);
        if !path.exists() {
            return Ok(None);
        }
        let mut file = File::open(path)?;
        let mut buffer = Vec::new();
        file.read_to_end(&mut buffer)?;
        let products: Vec<Product> = bincode::deserialize(&buffer)?;
        Ok(Some(products))
    }

    fn update_timestamp(&self) -> Result<(), CatalogError> {
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let mut file = File::create(self.dir.join(TIMESTAMP_FILE))?;
        file.write_all(timestamp.as_bytes())?;
        Ok(())
    }

    /// Unix seconds of the last save
    pub fn timestamp(&self) -> Option<i64> {
        let mut file = File::open(self.dir.join(TIMESTAMP_FILE)).ok()?;
        let mut timestamp = String::new();
        file.read_to_string(&mut timestamp).ok()?;
        timestamp.trim().parse().ok()
    }
}
