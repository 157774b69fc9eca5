//! `Worker` — carries one package along a route, hop by hop, then walks the
//! route back to re-measure it.

use std::collections::VecDeque;
use std::fmt;

use relay_core::{DataId, DroneId, LinkThresholds, PackageId, RouteId, Tick, WorkerId};
use relay_routing::Route;
use relay_spatial::NodeSnapshot;
use tracing::trace;

use crate::{AgentError, AgentResult};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SendPhase {
    /// Moving the package toward the end drone.
    #[default]
    SendingForward,
    /// Package handed over; walking back to the start re-measuring links.
    GoingBack,
    /// Back at the start.
    SendingEnded,
    /// A link broke under the worker.
    Stuck,
}

impl SendPhase {
    /// Numeric code used in tabular logs.
    pub fn code(self) -> u8 {
        match self {
            SendPhase::SendingForward => 0,
            SendPhase::GoingBack      => 1,
            SendPhase::SendingEnded   => 2,
            SendPhase::Stuck          => 3,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, SendPhase::SendingEnded | SendPhase::Stuck)
    }
}

impl fmt::Display for SendPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SendPhase::SendingForward => "sending_forward",
            SendPhase::GoingBack      => "going_back",
            SendPhase::SendingEnded   => "sending_ended",
            SendPhase::Stuck          => "stuck",
        })
    }
}

/// What one worker step means for the driver.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum WorkerOutcome {
    /// Step done; reschedule at the worker's next eligible tick.
    Continue,
    /// The next link is held by another worker; nothing moved, retry next tick.
    Contention,
    /// The next link is out of range; the package is lost.
    ForwardBreak,
    /// A link broke on the way back; the package already arrived.
    ReturnBreak,
    /// Back at the start; `confirmed_distances` holds a full re-measurement.
    Delivered,
}

/// A package carrier bound to one route.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Worker {
    pub id:                   WorkerId,
    pub(crate) route:         RouteId,
    pub(crate) current:       DroneId,
    pub(crate) data:          DataId,
    pub(crate) package:       PackageId,
    pub(crate) next_eligible: Tick,
    pub(crate) confirmed:     VecDeque<f64>,
    pub(crate) phase:         SendPhase,
    /// Link this worker last crossed and still holds.
    pub(crate) holding:       Option<usize>,
}

impl Worker {
    /// Place a new worker on the first hop of `route`, eligible at `now`.
    pub fn new(id: WorkerId, route: &Route, data: DataId, package: PackageId, now: Tick) -> Self {
        Self {
            id,
            route:         route.id(),
            current:       route.first_hop(),
            data,
            package,
            next_eligible: now,
            confirmed:     VecDeque::new(),
            phase:         SendPhase::SendingForward,
            holding:       None,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn route_id(&self) -> RouteId {
        self.route
    }

    pub fn current_node(&self) -> DroneId {
        self.current
    }

    pub fn data_id(&self) -> DataId {
        self.data
    }

    pub fn package_id(&self) -> PackageId {
        self.package
    }

    pub fn next_eligible_tick(&self) -> Tick {
        self.next_eligible
    }

    pub fn phase(&self) -> SendPhase {
        self.phase
    }

    /// Link distances re-measured on the way back, in route order.
    pub fn confirmed_distances(&self) -> Vec<f64> {
        self.confirmed.iter().copied().collect()
    }

    // ── Behaviour ─────────────────────────────────────────────────────────

    /// Advance one step at tick `now`.
    ///
    /// `route` must be the route this worker was created on.  Occupancy of
    /// its links is updated in place.
    pub fn step(
        &mut self,
        snapshot:   &NodeSnapshot,
        now:        Tick,
        route:      &mut Route,
        thresholds: &LinkThresholds,
    ) -> AgentResult<WorkerOutcome> {
        if self.phase.is_terminal() {
            return Err(AgentError::Finished(self.id));
        }
        if route.id() != self.route {
            return Err(AgentError::WrongRoute {
                worker:   self.id,
                expected: self.route,
                got:      route.id(),
            });
        }
        let index = route.hop_index(self.current).ok_or(AgentError::NotOnRoute {
            worker: self.id,
            node:   self.current,
            route:  self.route,
        })?;

        if self.phase == SendPhase::SendingForward {
            self.step_forward(snapshot, now, route, thresholds, index)
        } else {
            self.step_back(snapshot, now, route, thresholds, index)
        }
    }

    fn step_forward(
        &mut self,
        snapshot:   &NodeSnapshot,
        now:        Tick,
        route:      &mut Route,
        thresholds: &LinkThresholds,
        index:      usize,
    ) -> AgentResult<WorkerOutcome> {
        // Released once, on the first step after arrival.  A retry after
        // contention must not clear a claim another worker has since made.
        if let Some(link) = self.holding.take() {
            route.release(link);
        }

        if index == route.link_count() {
            trace!(worker = %self.id, route = %self.route, "package handed to end drone");
            self.phase = SendPhase::GoingBack;
            self.next_eligible = now + 1;
            return Ok(WorkerOutcome::Continue);
        }

        let next = route.hops()[index + 1];
        let d = snapshot.distance(self.current, next)?;
        if !thresholds.is_reachable(d) {
            trace!(worker = %self.id, from = %self.current, to = %next, distance = d, "forward link broke");
            self.phase = SendPhase::Stuck;
            return Ok(WorkerOutcome::ForwardBreak);
        }
        if route.is_occupied(index) {
            return Ok(WorkerOutcome::Contention);
        }

        route.occupy(index);
        self.holding = Some(index);
        self.current = next;
        self.next_eligible = now + thresholds.hop_delay_ticks(d);
        Ok(WorkerOutcome::Continue)
    }

    fn step_back(
        &mut self,
        snapshot:   &NodeSnapshot,
        now:        Tick,
        route:      &Route,
        thresholds: &LinkThresholds,
        index:      usize,
    ) -> AgentResult<WorkerOutcome> {
        if index == 0 {
            self.phase = SendPhase::SendingEnded;
            return Ok(WorkerOutcome::Delivered);
        }

        let prev = route.hops()[index - 1];
        let d = snapshot.distance(self.current, prev)?;
        if !thresholds.is_reachable(d) {
            trace!(worker = %self.id, from = %self.current, to = %prev, distance = d, "return link broke");
            self.phase = SendPhase::Stuck;
            return Ok(WorkerOutcome::ReturnBreak);
        }

        self.confirmed.push_front(d);
        self.current = prev;
        self.next_eligible = now + 1;
        Ok(WorkerOutcome::Continue)
    }
}
