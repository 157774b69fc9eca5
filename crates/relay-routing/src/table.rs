//! `RouteTable` — the single owner of every discovered route.

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use relay_core::{DroneId, LinkThresholds, RouteId};

use crate::{Route, RoutingError, RoutingResult};

/// Result of offering a newly discovered path to the table.
///
/// Rejections are ordinary outcomes of the conflict policy, not errors.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Admission {
    /// No usable route shares a link with the candidate.
    Admitted(RouteId),
    /// The candidate beat the single conflicting route, which is now unusable.
    Replaced { id: RouteId, evicted: RouteId },
    /// Some hop of the candidate is at or past the disconnect radius.
    NearDisconnect,
    /// The single conflicting route has strictly better quality.
    Outranked { incumbent: RouteId },
    /// Two or more usable routes conflict; no partial merge is attempted.
    Ambiguous { conflicts: usize },
}

impl Admission {
    /// `true` if the candidate was stored.
    pub fn is_admitted(&self) -> bool {
        matches!(self, Admission::Admitted(_) | Admission::Replaced { .. })
    }

    /// Identity assigned to the stored candidate, if any.
    pub fn route_id(&self) -> Option<RouteId> {
        match *self {
            Admission::Admitted(id) | Admission::Replaced { id, .. } => Some(id),
            _ => None,
        }
    }
}

/// All discovered routes, keyed by a monotonic `RouteId`.
///
/// Mutation goes only through [`try_add_route`](Self::try_add_route),
/// [`refresh_distances`](Self::refresh_distances) and
/// [`mark_unusable`](Self::mark_unusable); each runs to completion, so no
/// half-admitted state is ever observable.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteTable {
    routes:     BTreeMap<RouteId, Route>,
    next_id:    RouteId,
    thresholds: LinkThresholds,
}

impl RouteTable {
    pub fn new(thresholds: LinkThresholds) -> Self {
        Self {
            routes: BTreeMap::new(),
            next_id: RouteId(0),
            thresholds,
        }
    }

    #[inline]
    pub fn thresholds(&self) -> &LinkThresholds {
        &self.thresholds
    }

    /// Total number of stored routes, usable or not.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn get(&self, id: RouteId) -> Option<&Route> {
        self.routes.get(&id)
    }

    pub fn get_mut(&mut self, id: RouteId) -> Option<&mut Route> {
        self.routes.get_mut(&id)
    }

    /// Like [`get`](Self::get) but a miss is an error.
    pub fn route(&self, id: RouteId) -> RoutingResult<&Route> {
        self.routes.get(&id).ok_or(RoutingError::UnknownRoute(id))
    }

    /// Like [`get_mut`](Self::get_mut) but a miss is an error.
    pub fn route_mut(&mut self, id: RouteId) -> RoutingResult<&mut Route> {
        self.routes.get_mut(&id).ok_or(RoutingError::UnknownRoute(id))
    }

    /// Usable routes in ascending `RouteId` (admission) order.
    pub fn usable_routes(&self) -> impl Iterator<Item = &Route> + '_ {
        self.routes.values().filter(|r| r.is_usable())
    }

    pub fn usable_count(&self) -> usize {
        self.usable_routes().count()
    }

    // ── Admission ─────────────────────────────────────────────────────────

    /// Offer a discovered path to the table.
    ///
    /// Malformed input (fewer than two hops, wrong distance count) is an
    /// `Err`; every policy outcome, including rejection, is `Ok`.
    pub fn try_add_route(
        &mut self,
        hops:      Vec<DroneId>,
        distances: Vec<f64>,
    ) -> RoutingResult<Admission> {
        let candidate = Route::new(self.next_id, hops, distances, &self.thresholds)?;
        if candidate.is_close_to_disconnect(&self.thresholds) {
            debug!(hops = ?candidate.hops(), "route rejected: close to disconnect");
            return Ok(Admission::NearDisconnect);
        }

        let conflicts: Vec<RouteId> = self
            .usable_routes()
            .filter(|r| r.intersects(&candidate))
            .map(Route::id)
            .collect();

        let admission = match conflicts.as_slice() {
            [] => Admission::Admitted(self.store(candidate)),
            [incumbent_id] => {
                let incumbent_id = *incumbent_id;
                let incumbent = &self.routes[&incumbent_id];
                if candidate.quality() < incumbent.quality() {
                    debug!(
                        incumbent = %incumbent_id,
                        candidate_quality = candidate.quality(),
                        incumbent_quality = incumbent.quality(),
                        "route rejected: outranked",
                    );
                    return Ok(Admission::Outranked { incumbent: incumbent_id });
                }
                if let Some(evicted) = self.routes.get_mut(&incumbent_id) {
                    evicted.set_usable(false);
                }
                Admission::Replaced { id: self.store(candidate), evicted: incumbent_id }
            }
            many => {
                debug!(conflicts = many.len(), "route rejected: ambiguous conflict");
                return Ok(Admission::Ambiguous { conflicts: many.len() });
            }
        };

        info!(?admission, usable = self.usable_count(), "route admitted");
        Ok(admission)
    }

    fn store(&mut self, route: Route) -> RouteId {
        let id = route.id();
        self.routes.insert(id, route);
        self.next_id = self.next_id.next();
        id
    }

    // ── Updates ───────────────────────────────────────────────────────────

    /// Rebuild route `id` from freshly observed distances.
    ///
    /// The hop sequence, identity and link occupancy are kept, so workers
    /// still in flight on the route keep their claims.  Quality is
    /// recomputed.  The route is usable afterwards unless a hop is now close
    /// to disconnect.  Returns the new usability.
    pub fn refresh_distances(&mut self, id: RouteId, distances: Vec<f64>) -> RoutingResult<bool> {
        let old = self.route(id)?;
        let mut rebuilt = Route::new(id, old.hops().to_vec(), distances, &self.thresholds)?;
        for (link, &held) in old.occupancy().iter().enumerate() {
            if held {
                rebuilt.occupy(link);
            }
        }
        let usable = !rebuilt.is_close_to_disconnect(&self.thresholds);
        rebuilt.set_usable(usable);

        if usable {
            debug!(route = %id, quality = rebuilt.quality(), "route refreshed");
        } else {
            warn!(route = %id, "route refreshed close to disconnect; marked unusable");
        }
        self.routes.insert(id, rebuilt);
        Ok(usable)
    }

    /// Retire route `id` after a link broke under a worker.
    pub fn mark_unusable(&mut self, id: RouteId) -> RoutingResult<()> {
        self.route_mut(id)?.set_usable(false);
        warn!(route = %id, usable = self.usable_count(), "route marked unusable");
        Ok(())
    }
}
