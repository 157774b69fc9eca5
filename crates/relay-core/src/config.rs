//! Run parameters.
//!
//! `RelayParams` is typically loaded from a JSON file by the application
//! crate (with the `serde` feature) and validated once before the simulation
//! is built.  Fields missing from the file take their `Default` values.
//! Dotted keys such as `drone.count` or `stop.at` are accepted as aliases.

use crate::{CoreError, CoreResult, LinkThresholds, Tick};

/// Top-level simulation parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RelayParams {
    /// Number of relay drones.  The first is the route start, the last is
    /// the route end.
    #[cfg_attr(feature = "serde", serde(alias = "drone.count"))]
    pub drone_count: usize,

    /// Drones move once every this many ticks.
    #[cfg_attr(feature = "serde", serde(alias = "drone.move_period"))]
    pub drone_move_period: u64,

    /// Hops shorter than this transmit at full speed.
    #[cfg_attr(feature = "serde", serde(alias = "drone.stable_sending_speed_max_distance"))]
    pub stable_max: f64,

    /// Hops at or beyond this length make a route close to disconnect.
    #[cfg_attr(feature = "serde", serde(alias = "drone.close_to_disconnect_radius_distance"))]
    pub disconnect_radius: f64,

    /// Radio range of a drone.
    #[cfg_attr(feature = "serde", serde(alias = "drone.drone_radius_distance"))]
    pub max_radius: f64,

    /// Number of reusable scouts exploring from start to end.
    #[cfg_attr(feature = "serde", serde(alias = "scout.count"))]
    pub scout_count: usize,

    /// Energy budget each scout receives per exploration cycle.
    #[cfg_attr(feature = "serde", serde(alias = "scout.energy_limit"))]
    pub scout_energy_limit: f64,

    /// Total number of data units generated over the run.
    #[cfg_attr(feature = "serde", serde(alias = "data.count"))]
    pub data_count: usize,

    /// Packages per data unit.
    #[cfg_attr(feature = "serde", serde(alias = "data.size"))]
    pub data_size: usize,

    /// A new data unit is generated every this many ticks.
    #[cfg_attr(feature = "serde", serde(alias = "data.generate_period"))]
    pub data_generate_period: u64,

    /// Grid width; x positions lie in `0..world_width`.
    #[cfg_attr(feature = "serde", serde(alias = "world.width"))]
    pub world_width: u32,

    /// Grid height; y positions lie in `0..world_height`.
    #[cfg_attr(feature = "serde", serde(alias = "world.height"))]
    pub world_height: u32,

    /// Master RNG seed.  The same seed always produces identical results.
    #[cfg_attr(feature = "serde", serde(alias = "random.seed"))]
    pub seed: u64,

    /// Hard stop; the run also ends early once every package is resolved.
    #[cfg_attr(feature = "serde", serde(alias = "stop.at"))]
    pub total_ticks: u64,

    /// Report a drone/scout/worker snapshot every N ticks.  0 disables it.
    pub snapshot_interval_ticks: u64,
}

impl Default for RelayParams {
    fn default() -> Self {
        Self {
            drone_count:             30,
            drone_move_period:       5,
            stable_max:              5.0,
            disconnect_radius:       10.0,
            max_radius:              15.0,
            scout_count:             10,
            scout_energy_limit:      100.0,
            data_count:              10,
            data_size:               10,
            data_generate_period:    20,
            world_width:             60,
            world_height:            60,
            seed:                    42,
            total_ticks:             10_000,
            snapshot_interval_ticks: 1,
        }
    }
}

impl RelayParams {
    /// Reject parameter sets the model cannot run with.
    pub fn validate(&self) -> CoreResult<()> {
        fn fail(msg: &str) -> CoreResult<()> {
            Err(CoreError::Config(msg.to_owned()))
        }

        if self.drone_move_period == 0 {
            return fail("drone_move_period cannot be less than one");
        }
        if self.drone_count < 2 {
            return fail("drone_count cannot be less than two");
        }
        if self.max_radius <= 0.0 {
            return fail("max_radius must be positive");
        }
        if self.disconnect_radius >= self.max_radius {
            return fail("disconnect_radius must be less than max_radius");
        }
        if self.stable_max >= self.disconnect_radius {
            return fail("stable_max must be less than disconnect_radius");
        }
        if self.scout_count == 0 {
            return fail("scout_count cannot be less than one");
        }
        if self.scout_energy_limit <= 0.0 {
            return fail("scout_energy_limit must be positive");
        }
        if self.data_count == 0 {
            return fail("data_count cannot be less than one");
        }
        if self.data_size == 0 {
            return fail("data_size cannot be less than one");
        }
        if self.data_generate_period == 0 {
            return fail("data_generate_period cannot be less than one");
        }
        if self.world_width == 0 {
            return fail("world_width cannot be less than one");
        }
        if self.world_height == 0 {
            return fail("world_height cannot be less than one");
        }
        Ok(())
    }

    /// The three link radii as a [`LinkThresholds`].
    #[inline]
    pub fn thresholds(&self) -> LinkThresholds {
        LinkThresholds::new(self.stable_max, self.disconnect_radius, self.max_radius)
    }

    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }
}
