//! Plain data row types written by output backends.

/// One drone's position at a snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DroneRow {
    pub tick:     u64,
    pub drone_id: u32,
    pub pos_x:    f64,
    pub pos_y:    f64,
    pub is_start: bool,
    pub is_end:   bool,
}

/// One scout's location and phase at a snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoutRow {
    pub tick:          u64,
    pub scout_id:      u32,
    /// The drone the scout is sitting on.
    pub drone_id:      u32,
    pub pos_x:         f64,
    pub pos_y:         f64,
    pub explore_phase: u8,
}

/// One live worker's location and phase at a snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkerRow {
    pub tick:          u64,
    pub worker_id:     u32,
    pub drone_id:      u32,
    pub pos_x:         f64,
    pub pos_y:         f64,
    pub sending_phase: u8,
}

/// A package state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataStateRow {
    pub tick:       u64,
    pub data_id:    u32,
    pub package_id: u32,
    /// `0` unsent, `1` in flight, `2` delivered, `-1` lost.
    pub state:      i8,
    /// `-1` while no worker carries the package.
    pub worker_id:  i64,
}

/// Usable route count after it may have changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathsCountRow {
    pub tick:        u64,
    pub paths_count: u64,
}

/// Paths found by one scouting round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoutingRow {
    pub tick:        u64,
    pub paths_count: u64,
}
