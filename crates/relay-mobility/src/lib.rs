//! `relay-mobility` — where the drones are, and how they drift.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`field`]  | `DroneField`, `Cell` — drone positions on a bounded grid   |
//! | [`model`]  | `MotionModel` trait, `RandomWalk`, `Stationary`            |
//! | [`engine`] | `DroneMotion<M>` — field + model + motion RNG              |
//! | [`error`]  | `MobilityError`, `MobilityResult<T>`                       |
//!
//! # Grid model
//!
//! Drones sit on integer cells of a `width × height` grid.  Moves that would
//! leave the grid are clamped to the border (sticky borders).  The first
//! drone is the route start and the last drone is the route end; both move
//! like every other drone.
//!
//! Every drone move period the driver calls [`DroneMotion::step`] and then
//! takes one [`DroneField::snapshot`] that all agents read for the tick.

pub mod engine;
pub mod error;
pub mod field;
pub mod model;


pub use engine::DroneMotion;
pub use error::{MobilityError, MobilityResult};
pub use field::{Cell, DroneField};
pub use model::{MotionModel, RandomWalk, Stationary};
