//! `Route` — one discovered end-to-end relay path.

use std::collections::HashSet;

use relay_core::{DroneId, LinkThresholds, RouteId};

use crate::{RoutingError, RoutingResult};

/// An ordered chain of drones from the start node to the end node.
///
/// Hop `i` is the directed link `hops[i] → hops[i + 1]`; `distances[i]` and
/// `occupied[i]` describe that link.  So for `n` drones there are exactly
/// `n - 1` distances and `n - 1` occupancy flags.
///
/// `hops` must not repeat a drone.  Scouts never revisit a drone, so this is
/// a precondition of construction rather than something checked here.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    id:        RouteId,
    hops:      Vec<DroneId>,
    distances: Vec<f64>,
    quality:   f64,
    occupied:  Vec<bool>,
    usable:    bool,
}

impl Route {
    /// Build a usable route with every hop free.
    ///
    /// Fails if there are fewer than two hops or the distance count does not
    /// match the hop count.
    pub fn new(
        id:         RouteId,
        hops:       Vec<DroneId>,
        distances:  Vec<f64>,
        thresholds: &LinkThresholds,
    ) -> RoutingResult<Self> {
        if hops.len() < 2 {
            return Err(RoutingError::TooFewHops(hops.len()));
        }
        if distances.len() != hops.len() - 1 {
            return Err(RoutingError::LengthMismatch {
                hops:      hops.len(),
                distances: distances.len(),
            });
        }

        let quality = quality(&distances, thresholds);
        let links = distances.len();
        Ok(Self {
            id,
            hops,
            distances,
            quality,
            occupied: vec![false; links],
            usable: true,
        })
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> RouteId {
        self.id
    }

    #[inline]
    pub fn hops(&self) -> &[DroneId] {
        &self.hops
    }

    /// Per-hop distances observed when the route was last confirmed.
    #[inline]
    pub fn distances(&self) -> &[f64] {
        &self.distances
    }

    /// Mean per-hop quality in `(0, 1]`; higher is faster and stabler.
    #[inline]
    pub fn quality(&self) -> f64 {
        self.quality
    }

    #[inline]
    pub fn is_usable(&self) -> bool {
        self.usable
    }

    #[inline]
    pub fn set_usable(&mut self, usable: bool) {
        self.usable = usable;
    }

    /// Number of links (`hops().len() - 1`).
    #[inline]
    pub fn link_count(&self) -> usize {
        self.distances.len()
    }

    #[inline]
    pub fn first_hop(&self) -> DroneId {
        self.hops[0]
    }

    #[inline]
    pub fn last_hop(&self) -> DroneId {
        self.hops[self.hops.len() - 1]
    }

    // ── Navigation ────────────────────────────────────────────────────────

    /// Position of `node` in the hop sequence.
    pub fn hop_index(&self, node: DroneId) -> Option<usize> {
        self.hops.iter().position(|&h| h == node)
    }

    /// The drone after `node`, or `None` if `node` is the last hop or absent.
    pub fn next_hop(&self, node: DroneId) -> Option<DroneId> {
        let i = self.hop_index(node)?;
        self.hops.get(i + 1).copied()
    }

    /// The drone before `node`, or `None` if `node` is the first hop or absent.
    pub fn prev_hop(&self, node: DroneId) -> Option<DroneId> {
        let i = self.hop_index(node)?;
        i.checked_sub(1).map(|p| self.hops[p])
    }

    /// Directed links `(from, to)` in travel order.
    pub fn links(&self) -> impl Iterator<Item = (DroneId, DroneId)> + '_ {
        self.hops.windows(2).map(|w| (w[0], w[1]))
    }

    /// `true` if the two routes share at least one directed link.
    ///
    /// `a → b` and `b → a` are different links and do not intersect.
    pub fn intersects(&self, other: &Route) -> bool {
        let mine: HashSet<(DroneId, DroneId)> = self.links().collect();
        other.links().any(|link| mine.contains(&link))
    }

    /// `true` if any hop is at or past the disconnect radius.
    pub fn is_close_to_disconnect(&self, thresholds: &LinkThresholds) -> bool {
        self.distances.iter().any(|&d| thresholds.is_near_disconnect(d))
    }

    // ── Link occupancy ────────────────────────────────────────────────────
    //
    // Link `i` is `hops[i] → hops[i + 1]`.  At most one worker holds a link
    // at a time; the worker claims it on departure and releases it when it
    // leaves the far end.

    #[inline]
    pub fn is_occupied(&self, link: usize) -> bool {
        self.occupied[link]
    }

    #[inline]
    pub fn occupy(&mut self, link: usize) {
        self.occupied[link] = true;
    }

    #[inline]
    pub fn release(&mut self, link: usize) {
        self.occupied[link] = false;
    }

    /// Occupancy flag per link, in travel order.
    #[inline]
    pub fn occupancy(&self) -> &[bool] {
        &self.occupied
    }
}

/// Mean of the per-hop quality contributions `1 / hop_cost(d)`.
pub fn quality(distances: &[f64], thresholds: &LinkThresholds) -> f64 {
    let total: f64 = distances.iter().map(|&d| thresholds.hop_quality(d)).sum();
    total / distances.len() as f64
}
