//! `Scout` — explores the drone graph for a start→end path, then walks it
//! back to confirm every link.

use std::collections::VecDeque;
use std::fmt;

use relay_core::{AgentRng, DroneId, LinkThresholds, RiskBand, ScoutId};
use relay_spatial::NodeSnapshot;
use tracing::trace;

use crate::AgentResult;

/// Where a scout is in its round.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExplorePhase {
    /// Random-walking forward until the end drone is reached.
    #[default]
    SearchingEnd,
    /// Walking the discovered path back toward the start, re-measuring links.
    GoingBack,
    /// Back at the start with a fully confirmed path.
    Ended,
    /// Out of energy, out of candidates, or a link broke on the way back.
    Stuck,
}

impl ExplorePhase {
    /// Numeric code used in tabular logs.
    pub fn code(self) -> u8 {
        match self {
            ExplorePhase::SearchingEnd => 0,
            ExplorePhase::GoingBack    => 1,
            ExplorePhase::Ended        => 2,
            ExplorePhase::Stuck        => 3,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, ExplorePhase::Ended | ExplorePhase::Stuck)
    }
}

impl fmt::Display for ExplorePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExplorePhase::SearchingEnd => "searching_end",
            ExplorePhase::GoingBack    => "going_back",
            ExplorePhase::Ended        => "ended",
            ExplorePhase::Stuck        => "stuck",
        })
    }
}

/// A route-discovery agent.
///
/// `visited[..=cursor]` is the walk so far; `visited[cursor]` is the drone the
/// scout currently sits on.  On the way back `cursor` moves toward zero and
/// each re-measured link distance is pushed to the front of `confirmed`, so
/// at `Ended` `confirmed[i]` is the distance of link `visited[i] → visited[i+1]`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scout {
    pub id:               ScoutId,
    pub(crate) start:     DroneId,
    pub(crate) end:       DroneId,
    pub(crate) visited:   Vec<DroneId>,
    pub(crate) cursor:    usize,
    pub(crate) confirmed: VecDeque<f64>,
    pub(crate) energy:    f64,
    pub(crate) phase:     ExplorePhase,
}

impl Scout {
    pub fn new(id: ScoutId, start: DroneId, end: DroneId, energy_limit: f64) -> Self {
        Self {
            id,
            start,
            end,
            visited:   vec![start],
            cursor:    0,
            confirmed: VecDeque::new(),
            energy:    energy_limit,
            phase:     ExplorePhase::SearchingEnd,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn phase(&self) -> ExplorePhase {
        self.phase
    }

    pub fn start(&self) -> DroneId {
        self.start
    }

    pub fn end(&self) -> DroneId {
        self.end
    }

    pub fn energy(&self) -> f64 {
        self.energy
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Drones walked so far, start first.
    pub fn visited_path(&self) -> &[DroneId] {
        &self.visited
    }

    /// The drone the scout is currently on.
    pub fn current_node(&self) -> DroneId {
        self.visited[self.cursor]
    }

    /// Link distances confirmed on the way back, in path order.
    pub fn confirmed_distances(&self) -> Vec<f64> {
        self.confirmed.iter().copied().collect()
    }

    /// The confirmed path and its distances, only once the scout has `Ended`.
    pub fn discovered_route(&self) -> Option<(Vec<DroneId>, Vec<f64>)> {
        (self.phase == ExplorePhase::Ended)
            .then(|| (self.visited.clone(), self.confirmed_distances()))
    }

    // ── Behaviour ─────────────────────────────────────────────────────────

    /// Advance one step.
    ///
    /// Returns `Ok(true)` when the scout moved and has more to do, `Ok(false)`
    /// once it is terminal: stuck on this step, back at the start with a
    /// confirmed path, or already finished.  Errors only if the current or previous drone is missing
    /// from `snapshot`.
    pub fn explore(
        &mut self,
        snapshot:   &NodeSnapshot,
        thresholds: &LinkThresholds,
        rng:        &mut AgentRng,
    ) -> AgentResult<bool> {
        match self.phase {
            ExplorePhase::SearchingEnd => self.move_forward(snapshot, thresholds, rng),
            ExplorePhase::GoingBack    => self.move_back(snapshot, thresholds),
            ExplorePhase::Ended | ExplorePhase::Stuck => Ok(false),
        }
    }

    /// Start a fresh round from the start drone with full energy.
    pub fn reset(&mut self, energy_limit: f64) {
        self.visited.clear();
        self.visited.push(self.start);
        self.cursor = 0;
        self.confirmed.clear();
        self.energy = energy_limit;
        self.phase = ExplorePhase::SearchingEnd;
    }

    fn move_forward(
        &mut self,
        snapshot:   &NodeSnapshot,
        thresholds: &LinkThresholds,
        rng:        &mut AgentRng,
    ) -> AgentResult<bool> {
        let here = snapshot.position(self.current_node())?;

        let mut safe = Vec::new();
        let mut close = Vec::new();
        let mut danger = Vec::new();
        for (id, d) in snapshot.within(here, thresholds.max_radius) {
            if self.visited.contains(&id) {
                continue;
            }
            match thresholds.classify(d) {
                Some(RiskBand::Safe)   => safe.push((id, d)),
                Some(RiskBand::Close)  => close.push((id, d)),
                Some(RiskBand::Danger) => danger.push((id, d)),
                None => {}
            }
        }

        // Prefer the safest non-empty band.
        let pool = if !safe.is_empty() {
            &safe
        } else if !close.is_empty() {
            &close
        } else {
            &danger
        };

        let Some(&(next, d)) = rng.choose(pool) else {
            trace!(scout = %self.id, node = %self.current_node(), "no unvisited neighbour");
            self.phase = ExplorePhase::Stuck;
            return Ok(false);
        };

        self.energy -= thresholds.hop_cost(d);
        if self.energy <= 0.0 {
            trace!(scout = %self.id, "energy exhausted");
            self.phase = ExplorePhase::Stuck;
            return Ok(false);
        }

        self.visited.push(next);
        self.cursor += 1;
        if next == self.end {
            trace!(scout = %self.id, hops = self.visited.len(), "end reached, going back");
            self.phase = ExplorePhase::GoingBack;
        }
        Ok(true)
    }

    fn move_back(&mut self, snapshot: &NodeSnapshot, thresholds: &LinkThresholds) -> AgentResult<bool> {
        let Some(prev_index) = self.cursor.checked_sub(1) else {
            self.phase = ExplorePhase::Stuck;
            return Ok(false);
        };
        let current = self.visited[self.cursor];
        let prev = self.visited[prev_index];

        let d = snapshot.distance(current, prev)?;
        if !thresholds.is_reachable(d) {
            trace!(scout = %self.id, from = %current, to = %prev, distance = d, "link broke on the way back");
            self.phase = ExplorePhase::Stuck;
            return Ok(false);
        }

        self.confirmed.push_front(d);
        self.cursor = prev_index;
        if prev == self.start {
            self.phase = ExplorePhase::Ended;
            return Ok(false);
        }
        Ok(true)
    }
}
