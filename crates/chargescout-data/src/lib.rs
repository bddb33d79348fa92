mod boundaries;
mod cache;
mod facilities;
mod service;

use thiserror::Error;

pub use boundaries::{load_boundaries, load_boundaries_from_reader, RegionBoundary};
pub use cache::{RegionCache, RegionEntry};
pub use facilities::{load_facilities, load_facilities_from_reader};
pub use service::{SelectedSite, Selection, SiteService};

#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse facility table {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
    #[error("failed to parse boundary dataset {path}: {reason}")]
    Geojson { path: String, reason: String },
    #[error("facility row {row} in {path} has out-of-range coordinates ({latitude}, {longitude})")]
    CoordinateOutOfRange {
        path: String,
        row: usize,
        latitude: f64,
        longitude: f64,
    },
    #[error("boundary feature '{region_id}' has an empty or degenerate polygon")]
    EmptyBoundary { region_id: String },
    #[error("boundary feature is missing the '{property}' id property")]
    MissingRegionId { property: String },
    #[error("boundary dataset defines region '{region_id}' more than once")]
    DuplicateRegionId { region_id: String },
    #[error("region not found: {0}")]
    RegionNotFound(String),
    #[error("no feasible candidates inside region '{0}'")]
    NoCandidates(String),
    #[error(transparent)]
    Core(#[from] chargescout_core::CoreError),
}
