//! Catalog loading and process-lifetime caching.
//!
//! Loading a catalog from disk is the only I/O the recommendation core
//! does, so it happens once per source file. Every later `Catalog::load`
//! for the same file hands back the same `Arc<Catalog>`.

use crate::error::{CatalogError, Result};
use crate::parser;
use crate::types::Catalog;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};
use std::time::Instant;
use tracing::{debug, info};

/// Loaded catalogs keyed by canonical source path
fn cache() -> &'static Mutex<HashMap<PathBuf, Arc<Catalog>>> {
    static CACHE: OnceLock<Mutex<HashMap<PathBuf, Arc<Catalog>>>> = OnceLock::new();
    CACHE.get_or_init(|| Mutex::new(HashMap::new()))
}

impl Catalog {
    /// Load the course catalog from a CSV file, memoized by source path.
    ///
    /// This is the main entry point for loading data.
    ///
    /// Steps:
    /// 1. Canonicalize the path so "./a.csv" and "a.csv" share one entry
    /// 2. Return the cached catalog if this source was loaded before
    /// 3. Otherwise parse the file, drop rows with no description, cache it
    ///
    /// The cache lock is held across the parse, so concurrent first calls
    /// for the same file read it once.
    pub fn load(path: impl AsRef<Path>) -> Result<Arc<Catalog>> {
        let path = path.as_ref();
        let key = path.canonicalize().map_err(|_| CatalogError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let mut cached = cache()
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(catalog) = cached.get(&key) {
            debug!(path = %key.display(), "catalog cache hit");
            return Ok(Arc::clone(catalog));
        }

        let catalog = Arc::new(Self::load_uncached(&key)?);
        cached.insert(key, Arc::clone(&catalog));
        Ok(catalog)
    }

    /// Parse a catalog file without consulting or filling the cache
    pub fn load_uncached(path: &Path) -> Result<Catalog> {
        info!("Loading course catalog from {:?}", path);
        let start = Instant::now();

        let file = File::open(path).map_err(|_| CatalogError::FileNotFound {
            path: path.display().to_string(),
        })?;
        let mut catalog = Self::from_reader(BufReader::new(file), &path.display().to_string())?;
        catalog.source = Some(path.to_path_buf());

        info!(
            "Loaded {} courses in {:.2?}",
            catalog.len(),
            start.elapsed()
        );
        Ok(catalog)
    }

    /// Parse a catalog from any CSV reader (not cached)
    pub fn from_reader<R: Read>(reader: R, source_label: &str) -> Result<Catalog> {
        let courses = parser::parse_courses(reader, source_label)?;
        Ok(Catalog {
            courses,
            source: None,
        })
    }
}
