//! Link thresholds and the hop cost model shared by scouts, routes and workers.
//!
//! A hop between two drones is classified by its length against three
//! increasing radii:
//!
//! ```text
//!   0 ──── stable_max ──── disconnect_radius ──── max_radius ────▶ d
//!     Safe              Close                 Danger          unreachable
//! ```
//!
//! The same "cost" of a hop drives three things: scout energy drain, route
//! quality (`1 / cost`) and worker transit delay (`ceil(cost)` ticks).  A hop
//! shorter than `stable_max` always costs exactly one unit; beyond it the cost
//! grows linearly with the excess distance.

/// Risk classification of a candidate hop.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RiskBand {
    /// `d <= stable_max`.
    Safe,
    /// `stable_max < d <= disconnect_radius`.
    Close,
    /// `disconnect_radius < d <= max_radius`.
    Danger,
}

impl RiskBand {
    /// Human-readable label for logs.
    pub fn as_str(self) -> &'static str {
        match self {
            RiskBand::Safe   => "safe",
            RiskBand::Close  => "close",
            RiskBand::Danger => "danger",
        }
    }
}

impl std::fmt::Display for RiskBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The three link radii `[stable_max, disconnect_radius, max_radius]`.
///
/// Ordering (`stable_max < disconnect_radius < max_radius`) is checked by
/// [`RelayParams::validate`][crate::RelayParams::validate], not here.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinkThresholds {
    /// Longest hop that still transmits at full speed.
    pub stable_max: f64,
    /// Hops at or beyond this length make a route "close to disconnect".
    pub disconnect_radius: f64,
    /// Radio range.  Longer hops are broken.
    pub max_radius: f64,
}

impl LinkThresholds {
    pub const fn new(stable_max: f64, disconnect_radius: f64, max_radius: f64) -> Self {
        Self { stable_max, disconnect_radius, max_radius }
    }

    /// Risk band of a hop of length `d`, or `None` if `d > max_radius`.
    #[inline]
    pub fn classify(&self, d: f64) -> Option<RiskBand> {
        if d <= self.stable_max {
            Some(RiskBand::Safe)
        } else if d <= self.disconnect_radius {
            Some(RiskBand::Close)
        } else if d <= self.max_radius {
            Some(RiskBand::Danger)
        } else {
            None
        }
    }

    /// `true` while a hop of length `d` is within radio range.
    #[inline]
    pub fn is_reachable(&self, d: f64) -> bool {
        d <= self.max_radius
    }

    /// `true` if a hop of length `d` is at or past the disconnect radius.
    #[inline]
    pub fn is_near_disconnect(&self, d: f64) -> bool {
        d >= self.disconnect_radius
    }

    /// Cost of traversing a hop of length `d`: `1` below `stable_max`,
    /// `d - stable_max + 1` otherwise.
    #[inline]
    pub fn hop_cost(&self, d: f64) -> f64 {
        if d < self.stable_max {
            1.0
        } else {
            d - self.stable_max + 1.0
        }
    }

    /// Per-hop quality contribution in `(0, 1]`: the reciprocal of
    /// [`hop_cost`](Self::hop_cost).
    #[inline]
    pub fn hop_quality(&self, d: f64) -> f64 {
        1.0 / self.hop_cost(d)
    }

    /// Ticks a worker spends crossing a hop of length `d`.
    ///
    /// Ticks are integral, so the cost is rounded up.  A worker never
    /// arrives before the continuous model says it would.
    #[inline]
    pub fn hop_delay_ticks(&self, d: f64) -> u64 {
        self.hop_cost(d).ceil() as u64
    }
}
