//! Greedy farthest-point selection for the k-center facility objective.
//!
//! Repeatedly picks the candidate currently farthest from every existing
//! facility and every already-selected candidate. This is the classic
//! 2-approximation to the optimal k-center objective of minimising the
//! maximum distance from any point to its nearest facility.

use crate::geodesic::GeodesicIndex;
use crate::point::GeodeticPoint;

/// Sentinel marking a candidate as consumed; smaller than any valid
/// distance, so a selected index can never win the argmax again nor raise
/// another candidate's min-distance.
const CONSUMED: f64 = -1.0;

/// Select up to `k` candidates, farthest-first, against `existing`
/// facilities. Result order is selection order: rank 1 first.
///
/// `k == 0` or an empty candidate set yields an empty result; otherwise the
/// result holds exactly `min(k, candidates.len())` points.
#[must_use]
pub fn select(
    existing: &[GeodeticPoint],
    candidates: &[GeodeticPoint],
    k: usize,
) -> Vec<GeodeticPoint> {
    if k == 0 || candidates.is_empty() {
        return Vec::new();
    }

    // min_dist[i]: distance from candidate i to its nearest facility, over
    // existing facilities plus selections so far. All infinite when no
    // existing facility is present.
    let index = GeodesicIndex::build(existing);
    let mut min_dist = index.nearest_distances_km(candidates);

    let rounds = k.min(candidates.len());
    let mut selected = Vec::with_capacity(rounds);

    for _ in 0..rounds {
        let Some(winner) = argmax(&min_dist) else {
            break;
        };
        let pick = candidates[winner];
        selected.push(pick);
        min_dist[winner] = CONSUMED;

        for (j, dist) in min_dist.iter_mut().enumerate() {
            if *dist == CONSUMED {
                continue;
            }
            let to_pick = candidates[j].great_circle_km(pick);
            if to_pick < *dist {
                *dist = to_pick;
            }
        }
    }

    selected
}

/// Index of the maximum live entry, first occurrence winning ties.
/// `None` once every entry is consumed.
fn argmax(min_dist: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &d) in min_dist.iter().enumerate() {
        if d == CONSUMED {
            continue;
        }
        match best {
            Some((_, b)) if d <= b => {}
            _ => best = Some((i, d)),
        }
    }
    best.map(|(i, _)| i)
}
