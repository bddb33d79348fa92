//! Facility table loading from CSV.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chargescout_core::GeodeticPoint;
use serde::Deserialize;

use crate::DataError;

/// One row of the facility table. Extra columns are ignored by serde.
#[derive(Debug, Deserialize)]
struct FacilityRecord {
    latitude: f64,
    longitude: f64,
}

/// Load the facility table from a CSV file with `latitude`/`longitude`
/// headers.
///
/// # Errors
///
/// Returns [`DataError`] when the file is unreadable, a row fails to parse,
/// or a coordinate falls outside valid geodetic ranges. Bad rows are never
/// silently dropped.
pub fn load_facilities(path: &Path) -> Result<Vec<GeodeticPoint>, DataError> {
    let display = path.display().to_string();
    let file = File::open(path).map_err(|source| DataError::Io {
        path: display.clone(),
        source,
    })?;
    load_facilities_from_reader(file, &display)
}

/// Reader-based form of [`load_facilities`], used directly by tests.
///
/// # Errors
///
/// Same conditions as [`load_facilities`].
pub fn load_facilities_from_reader<R: Read>(
    reader: R,
    path: &str,
) -> Result<Vec<GeodeticPoint>, DataError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut facilities = Vec::new();

    for (row, record) in csv_reader.deserialize::<FacilityRecord>().enumerate() {
        let record = record.map_err(|source| DataError::Csv {
            path: path.to_string(),
            source,
        })?;
        if record.latitude.abs() > 90.0 || record.longitude.abs() > 180.0 {
            return Err(DataError::CoordinateOutOfRange {
                path: path.to_string(),
                // Header is line 1.
                row: row + 2,
                latitude: record.latitude,
                longitude: record.longitude,
            });
        }
        facilities.push(GeodeticPoint::new(record.latitude, record.longitude));
    }

    tracing::info!(path, count = facilities.len(), "loaded facility table");
    Ok(facilities)
}
