//! Process-lifetime memo of per-region data.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chargescout_core::GeodeticPoint;

use crate::boundaries::RegionBoundary;
use crate::DataError;

/// Everything a request needs for one region, computed once and shared.
#[derive(Debug)]
pub struct RegionEntry {
    pub boundary: RegionBoundary,
    /// Facilities contained in the region boundary.
    pub existing: Vec<GeodeticPoint>,
    /// Eligible new-site locations, all inside the boundary, no duplicates.
    pub candidates: Vec<GeodeticPoint>,
}

/// Lazy per-region cache. Entries are created on first access and live for
/// the process lifetime; the region count is fixed by the boundary dataset,
/// so there is no eviction.
#[derive(Debug, Default)]
pub struct RegionCache {
    entries: RwLock<HashMap<String, Arc<RegionEntry>>>,
}

impl RegionCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached entry for `region_id`, running `loader` to build it
    /// on first access.
    ///
    /// Concurrent first accesses may run the loader redundantly; the loader
    /// is a pure recomputation over immutable datasets, and the first writer
    /// wins, so every caller observes the same entry afterwards. Loader
    /// failures are not cached.
    ///
    /// # Errors
    ///
    /// Propagates the loader's [`DataError`].
    pub fn get_or_load<F>(&self, region_id: &str, loader: F) -> Result<Arc<RegionEntry>, DataError>
    where
        F: FnOnce() -> Result<RegionEntry, DataError>,
    {
        if let Some(entry) = self
            .entries
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(region_id)
        {
            return Ok(Arc::clone(entry));
        }

        let entry = Arc::new(loader()?);

        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        // Another caller may have loaded the region while we computed.
        Ok(Arc::clone(
            entries
                .entry(region_id.to_string())
                .or_insert_with(|| entry),
        ))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
