//! Boundary dataset loading from GeoJSON.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use geo::{Area, MultiPolygon};
use geojson::{FeatureCollection, GeoJson};

use crate::DataError;

/// A named region boundary: a multi-polygon plus optional display metadata.
#[derive(Debug, Clone)]
pub struct RegionBoundary {
    pub region_id: String,
    /// Human-readable name from the optional `display_name` feature
    /// property. `None` is an explicit absent value, logged at load time,
    /// never a silently swallowed failure.
    pub display_name: Option<String>,
    pub geometry: MultiPolygon<f64>,
}

/// Load the boundary dataset from a GeoJSON FeatureCollection file.
///
/// `id_property` names the feature property used as the region identifier.
/// The result is a sorted map, so region enumeration is stable.
///
/// # Errors
///
/// Returns [`DataError`] when the file is unreadable or not valid GeoJSON,
/// a feature lacks the id property, or a boundary polygon is degenerate.
pub fn load_boundaries(
    path: &Path,
    id_property: &str,
) -> Result<BTreeMap<String, RegionBoundary>, DataError> {
    let display = path.display().to_string();
    let raw = fs::read_to_string(path).map_err(|source| DataError::Io {
        path: display.clone(),
        source,
    })?;
    load_boundaries_from_reader(&raw, &display, id_property)
}

/// String-based form of [`load_boundaries`], used directly by tests.
///
/// # Errors
///
/// Same conditions as [`load_boundaries`].
pub fn load_boundaries_from_reader(
    raw: &str,
    path: &str,
    id_property: &str,
) -> Result<BTreeMap<String, RegionBoundary>, DataError> {
    let geojson: GeoJson = raw.parse().map_err(|e: geojson::Error| DataError::Geojson {
        path: path.to_string(),
        reason: e.to_string(),
    })?;
    let collection =
        FeatureCollection::try_from(geojson).map_err(|e| DataError::Geojson {
            path: path.to_string(),
            reason: e.to_string(),
        })?;

    let mut boundaries = BTreeMap::new();
    for feature in collection.features {
        let region_id = feature
            .property(id_property)
            .and_then(|v| v.as_str())
            .map(ToOwned::to_owned)
            .ok_or_else(|| DataError::MissingRegionId {
                property: id_property.to_string(),
            })?;

        let display_name = feature
            .property("display_name")
            .and_then(|v| v.as_str())
            .map(ToOwned::to_owned);
        if display_name.is_none() {
            tracing::warn!(region_id, "boundary feature has no display_name property");
        }

        let geometry = feature.geometry.ok_or_else(|| DataError::Geojson {
            path: path.to_string(),
            reason: format!("feature '{region_id}' has no geometry"),
        })?;
        let geometry = multi_polygon_of(&region_id, geometry)?;
        if geometry.unsigned_area() == 0.0 {
            return Err(DataError::EmptyBoundary { region_id });
        }

        // Two features claiming the same id would silently last-write-win.
        if boundaries
            .insert(
                region_id.clone(),
                RegionBoundary {
                    region_id: region_id.clone(),
                    display_name,
                    geometry,
                },
            )
            .is_some()
        {
            return Err(DataError::DuplicateRegionId { region_id });
        }
    }

    tracing::info!(path, regions = boundaries.len(), "loaded boundary dataset");
    Ok(boundaries)
}

/// Accept Polygon or MultiPolygon geometry for a region feature.
fn multi_polygon_of(
    region_id: &str,
    geometry: geojson::Geometry,
) -> Result<MultiPolygon<f64>, DataError> {
    let geometry =
        geo::Geometry::<f64>::try_from(geometry).map_err(|e| DataError::Geojson {
            path: region_id.to_string(),
            reason: e.to_string(),
        })?;
    match geometry {
        geo::Geometry::Polygon(polygon) => Ok(MultiPolygon(vec![polygon])),
        geo::Geometry::MultiPolygon(multi) => Ok(multi),
        other => Err(DataError::Geojson {
            path: region_id.to_string(),
            reason: format!("expected Polygon or MultiPolygon, got {other:?}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_feature(id: &str, with_display_name: bool) -> String {
        let display = if with_display_name {
            format!(r#""display_name": "{id} district","#)
        } else {
            String::new()
        };
        format!(
            r#"{{
              "type": "Feature",
              "properties": {{ {display} "name": "{id}" }},
              "geometry": {{
                "type": "Polygon",
                "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]]]
              }}
            }}"#
        )
    }

    fn collection(features: &[String]) -> String {
        format!(
            r#"{{ "type": "FeatureCollection", "features": [{}] }}"#,
            features.join(",")
        )
    }

    #[test]
    fn loads_sorted_regions() {
        let raw = collection(&[square_feature("salem", true), square_feature("erode", true)]);
        let boundaries =
            load_boundaries_from_reader(&raw, "regions.geojson", "name").expect("load");
        let ids: Vec<&String> = boundaries.keys().collect();
        assert_eq!(ids, ["erode", "salem"]);
        assert_eq!(
            boundaries["erode"].display_name.as_deref(),
            Some("erode district")
        );
    }

    #[test]
    fn missing_display_name_is_explicit_none() {
        let raw = collection(&[square_feature("salem", false)]);
        let boundaries =
            load_boundaries_from_reader(&raw, "regions.geojson", "name").expect("load");
        assert!(boundaries["salem"].display_name.is_none());
    }

    #[test]
    fn missing_id_property_is_an_error() {
        let raw = collection(&[square_feature("salem", false)]);
        let result = load_boundaries_from_reader(&raw, "regions.geojson", "district_code");
        assert!(matches!(result, Err(DataError::MissingRegionId { .. })));
    }

    #[test]
    fn duplicate_region_id_is_an_error() {
        let raw = collection(&[square_feature("salem", true), square_feature("salem", false)]);
        let result = load_boundaries_from_reader(&raw, "regions.geojson", "name");
        match result {
            Err(DataError::DuplicateRegionId { region_id }) => assert_eq!(region_id, "salem"),
            other => panic!("expected DuplicateRegionId, got {other:?}"),
        }
    }

    #[test]
    fn degenerate_polygon_is_an_error() {
        let raw = r#"{
          "type": "FeatureCollection",
          "features": [{
            "type": "Feature",
            "properties": { "name": "degenerate" },
            "geometry": {
              "type": "Polygon",
              "coordinates": [[[0.0, 0.0], [0.0, 0.0], [0.0, 0.0], [0.0, 0.0]]]
            }
          }]
        }"#;
        let result = load_boundaries_from_reader(raw, "regions.geojson", "name");
        assert!(matches!(result, Err(DataError::EmptyBoundary { .. })));
    }

    #[test]
    fn non_polygon_geometry_is_an_error() {
        let raw = r#"{
          "type": "FeatureCollection",
          "features": [{
            "type": "Feature",
            "properties": { "name": "point-only" },
            "geometry": { "type": "Point", "coordinates": [80.0, 13.0] }
          }]
        }"#;
        let result = load_boundaries_from_reader(raw, "regions.geojson", "name");
        assert!(matches!(result, Err(DataError::Geojson { .. })));
    }

    #[test]
    fn invalid_json_is_an_error() {
        let result = load_boundaries_from_reader("not json", "regions.geojson", "name");
        assert!(matches!(result, Err(DataError::Geojson { .. })));
    }
}
