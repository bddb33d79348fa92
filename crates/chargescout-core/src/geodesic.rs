//! Nearest-neighbour great-circle distance queries over a fixed point set.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use crate::point::{chord_length, chord_to_great_circle_km, GeodeticPoint};

/// A reference point embedded on the unit sphere, indexed by an R-tree.
#[derive(Debug, Clone, Copy)]
struct SpherePoint {
    pos: [f64; 3],
}

impl RTreeObject for SpherePoint {
    type Envelope = AABB<[f64; 3]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.pos)
    }
}

impl PointDistance for SpherePoint {
    fn distance_2(&self, point: &[f64; 3]) -> f64 {
        let dx = self.pos[0] - point[0];
        let dy = self.pos[1] - point[1];
        let dz = self.pos[2] - point[2];
        dx * dx + dy * dy + dz * dz
    }
}

/// Spatial index answering "distance to the nearest reference point" in
/// true great-circle kilometers.
///
/// Built over the unit-sphere embedding so any chord-metric index is exact
/// for sphere geometry; see [`GeodeticPoint::to_unit_sphere`].
#[derive(Debug)]
pub struct GeodesicIndex {
    // None when built from an empty point set; queries then have no
    // reference point and report infinity.
    tree: Option<RTree<SpherePoint>>,
}

impl GeodesicIndex {
    /// Build an index over `points`. An empty slice yields the empty index
    /// rather than an error.
    #[must_use]
    pub fn build(points: &[GeodeticPoint]) -> Self {
        if points.is_empty() {
            return Self { tree: None };
        }
        let embedded = points
            .iter()
            .map(|p| SpherePoint {
                pos: p.to_unit_sphere(),
            })
            .collect();
        Self {
            tree: Some(RTree::bulk_load(embedded)),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tree.is_none()
    }

    /// Great-circle kilometers from `query` to its nearest indexed point,
    /// or `f64::INFINITY` when the index is empty.
    #[must_use]
    pub fn nearest_distance_km(&self, query: GeodeticPoint) -> f64 {
        let Some(tree) = &self.tree else {
            return f64::INFINITY;
        };
        let embedded = query.to_unit_sphere();
        // The tree is never constructed empty, so a nearest neighbour exists.
        match tree.nearest_neighbor(&embedded) {
            Some(nearest) => chord_to_great_circle_km(chord_length(nearest.pos, embedded)),
            None => f64::INFINITY,
        }
    }

    /// Batch form of [`Self::nearest_distance_km`], one distance per query
    /// point, in order.
    #[must_use]
    pub fn nearest_distances_km(&self, queries: &[GeodeticPoint]) -> Vec<f64> {
        queries
            .iter()
            .map(|&q| self.nearest_distance_km(q))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::EARTH_RADIUS_KM;

    #[test]
    fn empty_index_reports_infinity() {
        let index = GeodesicIndex::build(&[]);
        assert!(index.is_empty());
        let d = index.nearest_distance_km(GeodeticPoint::new(10.0, 78.0));
        assert!(d.is_infinite());
    }

    #[test]
    fn self_query_is_exactly_zero() {
        let p = GeodeticPoint::new(13.0827, 80.2707);
        let index = GeodesicIndex::build(&[p]);
        assert_eq!(index.nearest_distance_km(p), 0.0);
    }

    #[test]
    fn quarter_circumference_is_metrically_correct() {
        let index = GeodesicIndex::build(&[GeodeticPoint::new(0.0, 0.0)]);
        let d = index.nearest_distance_km(GeodeticPoint::new(0.0, 90.0));
        let expected = EARTH_RADIUS_KM * std::f64::consts::FRAC_PI_2;
        assert!((d - expected).abs() < 0.01, "got {d}, expected {expected}");
    }

    #[test]
    fn picks_nearest_across_the_antimeridian() {
        // (0, 179) is ~222 km from (0, -179) but ~1111 km from (0, 169).
        // A raw lat/lon metric would pick the wrong neighbour here.
        let index = GeodesicIndex::build(&[
            GeodeticPoint::new(0.0, -179.0),
            GeodeticPoint::new(0.0, 169.0),
        ]);
        let d = index.nearest_distance_km(GeodeticPoint::new(0.0, 179.0));
        assert!(d < 300.0, "expected the antimeridian neighbour, got {d} km");
    }

    #[test]
    fn batch_query_preserves_order() {
        let index = GeodesicIndex::build(&[GeodeticPoint::new(0.0, 0.0)]);
        let queries = [GeodeticPoint::new(0.0, 0.0), GeodeticPoint::new(0.0, 90.0)];
        let out = index.nearest_distances_km(&queries);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0], 0.0);
        assert!(out[1] > 10_000.0);
    }
}
