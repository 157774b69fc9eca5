//! `relay-core` — foundational types for the drone relay simulator.
//!
//! This crate is a dependency of every other `relay-*` crate.  It has no
//! `relay-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                |
//! |-----------------|---------------------------------------------------------|
//! | [`ids`]         | `DroneId`, `RouteId`, `ScoutId`, `WorkerId`, `DataId`, `PackageId` |
//! | [`geo`]         | `Point`, Euclidean distance                             |
//! | [`link`]        | `LinkThresholds`, `RiskBand`, hop cost / delay model    |
//! | [`time`]        | `Tick`                                                  |
//! | [`rng`]         | `AgentRng` (per-agent), `SimRng` (global)               |
//! | [`config`]      | `RelayParams` and its validation                        |
//! | [`error`]       | `CoreError`, `CoreResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |
//!           | Required for JSON parameter files and agent persistence.   |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod link;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::RelayParams;
pub use error::{CoreError, CoreResult};
pub use geo::Point;
pub use ids::{DataId, DroneId, PackageId, RouteId, ScoutId, WorkerId};
pub use link::{LinkThresholds, RiskBand};
pub use rng::{AgentRng, SimRng};
pub use time::Tick;
