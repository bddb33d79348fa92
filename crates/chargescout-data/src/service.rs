//! The service object owning every dataset a request needs.

use std::collections::BTreeMap;
use std::sync::Arc;

use chargescout_core::candidates::{self, BoundingBox};
use chargescout_core::{kcenter, validate_k, AppConfig, CandidateStrategy, GeodeticPoint};
use geo::Contains;
use serde::Serialize;

use crate::boundaries::{load_boundaries, RegionBoundary};
use crate::cache::{RegionCache, RegionEntry};
use crate::facilities::load_facilities;
use crate::DataError;

/// One recommended site, rank 1 having the greatest marginal coverage gain.
#[derive(Debug, Clone, Serialize)]
pub struct SelectedSite {
    pub rank: u32,
    pub latitude: f64,
    pub longitude: f64,
}

/// The outcome of one optimization request. Not persisted.
#[derive(Debug, Serialize)]
pub struct Selection {
    pub region_id: String,
    pub sites: Vec<SelectedSite>,
    pub existing_count: usize,
    pub candidate_count: usize,
}

/// Owns the boundary dataset, the facility table, the deployment's candidate
/// strategy, and the per-region cache. Constructed once at startup and
/// passed explicitly to request handlers; there is no global state.
#[derive(Debug)]
pub struct SiteService {
    boundaries: BTreeMap<String, RegionBoundary>,
    facilities: Vec<GeodeticPoint>,
    strategy: CandidateStrategy,
    cache: RegionCache,
}

impl SiteService {
    #[must_use]
    pub fn new(
        boundaries: BTreeMap<String, RegionBoundary>,
        facilities: Vec<GeodeticPoint>,
        strategy: CandidateStrategy,
    ) -> Self {
        Self {
            boundaries,
            facilities,
            strategy,
            cache: RegionCache::new(),
        }
    }

    /// Load both datasets named by `config` and build the service.
    ///
    /// # Errors
    ///
    /// Returns [`DataError`] when either dataset is unreadable or invalid.
    pub fn from_config(config: &AppConfig) -> Result<Self, DataError> {
        let boundaries = load_boundaries(&config.boundaries_path, &config.region_id_property)?;
        let facilities = load_facilities(&config.stations_path)?;
        Ok(Self::new(boundaries, facilities, config.strategy))
    }

    /// Known region identifiers, sorted and stable.
    #[must_use]
    pub fn region_ids(&self) -> Vec<String> {
        self.boundaries.keys().cloned().collect()
    }

    /// Known region boundaries in identifier order.
    pub fn regions(&self) -> impl Iterator<Item = &RegionBoundary> {
        self.boundaries.values()
    }

    #[must_use]
    pub fn facility_count(&self) -> usize {
        self.facilities.len()
    }

    /// Resolve the cached [`RegionEntry`] for `region_id`, generating the
    /// candidate set on first access.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::RegionNotFound`] for an unknown identifier, or
    /// a generation error from the candidate strategy.
    pub fn entry(&self, region_id: &str) -> Result<Arc<RegionEntry>, DataError> {
        let boundary = self
            .boundaries
            .get(region_id)
            .ok_or_else(|| DataError::RegionNotFound(region_id.to_string()))?;

        self.cache
            .get_or_load(region_id, || self.build_entry(boundary))
    }

    /// Recommend up to `k` new sites inside `region_id`.
    ///
    /// # Errors
    ///
    /// Returns a validation error for `k` outside `[1, MAX_K]`,
    /// [`DataError::RegionNotFound`] for an unknown region, and
    /// [`DataError::NoCandidates`] when the region admits no candidate site.
    pub fn optimize(&self, region_id: &str, k: u32) -> Result<Selection, DataError> {
        let k = validate_k(k)?;
        let entry = self.entry(region_id)?;
        if entry.candidates.is_empty() {
            return Err(DataError::NoCandidates(region_id.to_string()));
        }

        let picked = kcenter::select(&entry.existing, &entry.candidates, k);
        tracing::info!(
            region_id,
            k,
            selected = picked.len(),
            existing = entry.existing.len(),
            candidates = entry.candidates.len(),
            "optimization complete"
        );

        let sites = picked
            .into_iter()
            .enumerate()
            .map(|(i, p)| SelectedSite {
                rank: u32::try_from(i).unwrap_or(u32::MAX).saturating_add(1),
                latitude: p.latitude,
                longitude: p.longitude,
            })
            .collect();

        Ok(Selection {
            region_id: region_id.to_string(),
            sites,
            existing_count: entry.existing.len(),
            candidate_count: entry.candidates.len(),
        })
    }

    fn build_entry(&self, boundary: &RegionBoundary) -> Result<RegionEntry, DataError> {
        let existing: Vec<GeodeticPoint> = self
            .facilities
            .iter()
            .copied()
            .filter(|p| {
                boundary
                    .geometry
                    .contains(&geo::Point::new(p.longitude, p.latitude))
            })
            .collect();

        let candidates = match self.strategy {
            CandidateStrategy::Grid { resolution } => {
                let bbox = BoundingBox::of(&boundary.geometry).ok_or_else(|| {
                    DataError::EmptyBoundary {
                        region_id: boundary.region_id.clone(),
                    }
                })?;
                candidates::generate_grid(&boundary.geometry, bbox, resolution as usize)
            }
            CandidateStrategy::Hex { resolution } => {
                candidates::generate_hex(&boundary.geometry, resolution)?
            }
        };

        tracing::info!(
            region_id = boundary.region_id,
            strategy = %self.strategy,
            existing = existing.len(),
            candidates = candidates.len(),
            "generated region entry"
        );

        Ok(RegionEntry {
            boundary: boundary.clone(),
            existing,
            candidates,
        })
    }
}
