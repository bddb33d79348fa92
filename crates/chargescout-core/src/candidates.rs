//! Candidate-site generation inside a region boundary.
//!
//! Two strategies produce the finite set of eligible new-site locations:
//! a regular lat/lon lattice filtered by containment, and an H3 hexagonal
//! tessellation of the boundary polygon. Both guarantee that every emitted
//! point lies inside the boundary and that no coordinate appears twice.

use std::collections::HashSet;

use geo::{BoundingRect, Contains, MultiPolygon};
use h3o::geom::{PolyfillConfig, ToCells};
use h3o::{CellIndex, LatLng, Resolution};

use crate::point::GeodeticPoint;
use crate::CoreError;

/// A lat/lon bounding box spanned by the grid strategy's lattice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl BoundingBox {
    /// The tight bounding box of a boundary geometry, or `None` for an
    /// empty geometry.
    #[must_use]
    pub fn of(boundary: &MultiPolygon<f64>) -> Option<Self> {
        let rect = boundary.bounding_rect()?;
        Some(Self {
            lat_min: rect.min().y,
            lat_max: rect.max().y,
            lon_min: rect.min().x,
            lon_max: rect.max().x,
        })
    }
}

/// Generate candidates on a `resolution × resolution` lattice over `bbox`,
/// keeping only points contained in `boundary`, in lattice-scan order.
///
/// An empty result is a valid value; callers surface it as "no feasible
/// candidates" rather than an error.
#[must_use]
pub fn generate_grid(
    boundary: &MultiPolygon<f64>,
    bbox: BoundingBox,
    resolution: usize,
) -> Vec<GeodeticPoint> {
    let steps = resolution.max(2);
    let lat_step = (bbox.lat_max - bbox.lat_min) / (steps - 1) as f64;
    let lon_step = (bbox.lon_max - bbox.lon_min) / (steps - 1) as f64;

    let mut contained = Vec::new();
    for i in 0..steps {
        let lat = bbox.lat_min + lat_step * i as f64;
        for j in 0..steps {
            let lon = bbox.lon_min + lon_step * j as f64;
            if boundary.contains(&geo::Point::new(lon, lat)) {
                contained.push(GeodeticPoint::new(lat, lon));
            }
        }
    }
    // Containment first, then exact-coordinate dedup.
    let points = dedup_exact(contained);
    tracing::debug!(
        resolution = steps,
        contained = points.len(),
        "generated grid candidates"
    );
    points
}

/// Generate candidates as the centroids of the H3 cells tessellating
/// `boundary` at `resolution`, sorted by cell index for determinism.
///
/// # Errors
///
/// Returns [`CoreError::InvalidBoundary`] when the geometry is rejected by
/// the tessellation (degenerate rings, out-of-range coordinates).
pub fn generate_hex(
    boundary: &MultiPolygon<f64>,
    resolution: Resolution,
) -> Result<Vec<GeodeticPoint>, CoreError> {
    let geom = h3o::geom::MultiPolygon::from_degrees(boundary.clone())
        .map_err(|e| CoreError::InvalidBoundary(e.to_string()))?;

    let mut cells: Vec<CellIndex> = geom.to_cells(PolyfillConfig::new(resolution)).collect();
    cells.sort_unstable();

    let centroids = cells
        .into_iter()
        .map(|cell| {
            let ll = LatLng::from(cell);
            GeodeticPoint::new(ll.lat(), ll.lng())
        })
        // Polyfill covers cells whose centroid is inside the polygon, but
        // the shared postcondition is enforced here regardless.
        .filter(|p| boundary.contains(&geo::Point::new(p.longitude, p.latitude)))
        .collect();

    let points = dedup_exact(centroids);
    tracing::debug!(
        resolution = u8::from(resolution),
        contained = points.len(),
        "generated hex candidates"
    );
    Ok(points)
}

/// Drop later exact-coordinate collisions, preserving first-seen order.
fn dedup_exact(points: Vec<GeodeticPoint>) -> Vec<GeodeticPoint> {
    let mut seen = HashSet::with_capacity(points.len());
    points
        .into_iter()
        .filter(|p| seen.insert((p.latitude.to_bits(), p.longitude.to_bits())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::polygon;

    fn unit_square() -> MultiPolygon<f64> {
        MultiPolygon(vec![polygon![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 0.0),
            (x: 1.0, y: 1.0),
            (x: 0.0, y: 1.0),
            (x: 0.0, y: 0.0),
        ]])
    }

    #[test]
    fn bounding_box_of_unit_square() {
        let bbox = BoundingBox::of(&unit_square()).expect("bbox");
        assert_eq!(
            bbox,
            BoundingBox {
                lat_min: 0.0,
                lat_max: 1.0,
                lon_min: 0.0,
                lon_max: 1.0,
            }
        );
    }

    #[test]
    fn grid_keeps_only_contained_points() {
        let boundary = unit_square();
        let bbox = BoundingBox {
            lat_min: -1.0,
            lat_max: 2.0,
            lon_min: -1.0,
            lon_max: 2.0,
        };
        let points = generate_grid(&boundary, bbox, 31);
        assert!(!points.is_empty());
        for p in &points {
            assert!(
                boundary.contains(&geo::Point::new(p.longitude, p.latitude)),
                "escaped the boundary: {p:?}"
            );
        }
    }

    #[test]
    fn grid_over_disjoint_bbox_is_empty() {
        let bbox = BoundingBox {
            lat_min: 10.0,
            lat_max: 11.0,
            lon_min: 10.0,
            lon_max: 11.0,
        };
        assert!(generate_grid(&unit_square(), bbox, 20).is_empty());
    }

    #[test]
    fn grid_scan_order_is_lat_major() {
        let boundary = unit_square();
        let bbox = BoundingBox::of(&boundary).expect("bbox");
        let points = generate_grid(&boundary, bbox, 11);
        for pair in points.windows(2) {
            let before = (pair[0].latitude, pair[0].longitude);
            let after = (pair[1].latitude, pair[1].longitude);
            assert!(before < after, "scan order violated: {before:?} !< {after:?}");
        }
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        let a = GeodeticPoint::new(0.5, 0.5);
        let b = GeodeticPoint::new(0.25, 0.75);
        let out = dedup_exact(vec![a, b, a]);
        assert_eq!(out, vec![a, b]);
    }

    #[test]
    fn hex_candidates_are_contained_and_unique() {
        let boundary = unit_square();
        let points = generate_hex(&boundary, Resolution::Five).expect("tessellation");
        assert!(!points.is_empty());
        let mut seen = std::collections::HashSet::new();
        for p in &points {
            assert!(boundary.contains(&geo::Point::new(p.longitude, p.latitude)));
            assert!(seen.insert((p.latitude.to_bits(), p.longitude.to_bits())));
        }
    }

    #[test]
    fn hex_generation_is_deterministic() {
        let boundary = unit_square();
        let first = generate_hex(&boundary, Resolution::Five).expect("tessellation");
        let second = generate_hex(&boundary, Resolution::Five).expect("tessellation");
        assert_eq!(first, second);
    }
}
