//! `NodeSnapshot` — frozen drone positions for one tick.
//!
//! # Layout
//!
//! Positions are stored densely in insertion order.  Two indexes sit on top:
//!
//! - an id → slot hash map for `position(id)` in O(1);
//! - an R-tree (via `rstar`) over `[x, y]` for radius queries, so a scout
//!   only measures the drones that can actually be in range.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use relay_core::{DroneId, Point};

use crate::{SpatialError, SpatialResult};

#[cfg(feature = "fx-hash")]
type IdIndex = rustc_hash::FxHashMap<DroneId, usize>;
#[cfg(not(feature = "fx-hash"))]
type IdIndex = std::collections::HashMap<DroneId, usize>;

/// Slack added to the squared query radius so that floating-point rounding in
/// the R-tree's squared metric never drops a node that the exact distance
/// check would accept.
const QUERY_SLACK: f64 = 1e-9;

// ── R-tree entry ──────────────────────────────────────────────────────────────

#[derive(Clone)]
struct NodeEntry {
    point: [f64; 2],
    id: DroneId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── NodeSnapshot ──────────────────────────────────────────────────────────────

/// Immutable map from drone identity to position, rebuilt once per tick.
pub struct NodeSnapshot {
    nodes: Vec<(DroneId, Point)>,
    by_id: IdIndex,
    spatial_idx: RTree<NodeEntry>,
}

impl NodeSnapshot {
    /// Freeze `nodes` into a snapshot.  A repeated id keeps its last position.
    pub fn new(nodes: impl IntoIterator<Item = (DroneId, Point)>) -> Self {
        let mut dense: Vec<(DroneId, Point)> = Vec::new();
        let mut by_id = IdIndex::default();
        for (id, pos) in nodes {
            match by_id.get(&id) {
                Some(&slot) => dense[slot].1 = pos,
                None => {
                    by_id.insert(id, dense.len());
                    dense.push((id, pos));
                }
            }
        }

        let entries = dense
            .iter()
            .map(|&(id, pos)| NodeEntry { point: pos.to_array(), id })
            .collect();

        Self {
            nodes: dense,
            by_id,
            spatial_idx: RTree::bulk_load(entries),
        }
    }

    /// A snapshot with no drones.
    pub fn empty() -> Self {
        Self::new(std::iter::empty())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: DroneId) -> bool {
        self.by_id.contains_key(&id)
    }

    /// Position of drone `id`.
    ///
    /// A miss is never papered over with a default: the caller assumed the
    /// drone exists for this tick, so it gets [`SpatialError::NodeNotFound`].
    pub fn position(&self, id: DroneId) -> SpatialResult<Point> {
        self.by_id
            .get(&id)
            .map(|&slot| self.nodes[slot].1)
            .ok_or(SpatialError::NodeNotFound(id))
    }

    /// Distance between two drones.
    pub fn distance(&self, a: DroneId, b: DroneId) -> SpatialResult<f64> {
        Ok(self.position(a)?.distance(self.position(b)?))
    }

    /// Every drone within `radius` of `center` (inclusive), with its exact
    /// distance, sorted by ascending `DroneId`.
    ///
    /// The sort makes any random choice over the result independent of the
    /// R-tree's internal layout.
    pub fn within(&self, center: Point, radius: f64) -> Vec<(DroneId, f64)> {
        let query = center.to_array();
        let max_d2 = radius * radius + QUERY_SLACK;
        let mut found: Vec<(DroneId, f64)> = self
            .spatial_idx
            .locate_within_distance(query, max_d2)
            .map(|e| (e.id, center.distance(Point::new(e.point[0], e.point[1]))))
            .filter(|&(_, d)| d <= radius)
            .collect();
        found.sort_unstable_by_key(|&(id, _)| id);
        found
    }

    /// All `(id, position)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (DroneId, Point)> + '_ {
        self.nodes.iter().copied()
    }
}
