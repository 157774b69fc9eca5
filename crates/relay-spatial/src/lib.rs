//! `relay-spatial` — point-in-time views of the relay field.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                 |
//! |--------------|----------------------------------------------------------|
//! | [`snapshot`] | `NodeSnapshot` (id index + R-tree over drone positions)  |
//! | [`error`]    | `SpatialError`, `SpatialResult<T>`                       |
//!
//! Agents never hold references to live drones.  Once per tick the driver
//! freezes every drone position into a `NodeSnapshot`; all scout and worker
//! steps in that tick read from it, so a drone cannot move under an agent
//! halfway through a step.
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                   |
//! |-----------|----------------------------------------------------------|
//! | `fx-hash` | FxHash instead of SipHash for the id lookup table.       |

pub mod error;
pub mod snapshot;

#[cfg(test)]
mod tests;

pub use error::{SpatialError, SpatialResult};
pub use snapshot::NodeSnapshot;
