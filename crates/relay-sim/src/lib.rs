//! `relay-sim` — tick loop driver for the drone relay simulator.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..params.total_ticks:
//!   ① Drones    — every drone_move_period ticks (never tick 0) the field
//!                 moves and the NodeSnapshot is rebuilt once.
//!   ② Data      — every data_generate_period ticks, while fewer than
//!                 data_count units exist, a new DataUnit is generated and
//!                 workers are created for its packages.
//!   ③ Scouts    — every non-terminal scout explores one step (parallel with
//!                 the `parallel` feature).  Once all scouts are terminal the
//!                 round is harvested into the RouteTable, scouts reset, and
//!                 workers are created for any waiting packages.
//!   ④ Workers   — workers due this tick step in ascending WorkerId order.
//! ```
//!
//! The run stops early once every data unit exists and every package is
//! delivered or lost.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                  |
//! |------------|---------------------------------------------------------|
//! | `parallel` | Runs the scout exploration phase on Rayon's thread pool.|
//! | `serde`    | Enables `Serialize`/`Deserialize` on all agent state.   |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use relay_core::RelayParams;
//! use relay_mobility::RandomWalk;
//! use relay_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(RelayParams::default(), RandomWalk).build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;
pub mod wake_queue;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, PackageEvent, ScoutingRound, SimObserver, SimView, TickStats};
pub use sim::Sim;
pub use wake_queue::WakeQueue;
