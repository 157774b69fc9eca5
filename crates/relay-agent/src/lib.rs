//! `relay-agent` — the two mobile agents of the relay protocol.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                    |
//! |------------|-------------------------------------------------------------|
//! | [`scout`]  | `Scout`, `ExplorePhase` — biased random walk + confirmation |
//! | [`worker`] | `Worker`, `SendPhase`, `WorkerOutcome` — hop-by-hop relay   |
//! | [`store`]  | `ScoutRngs` — per-scout RNG streams                         |
//! | [`error`]  | `AgentError`, `AgentResult<T>`                              |
//!
//! # Failure model
//!
//! Getting stuck, running out of energy or losing a link are ordinary
//! outcomes and end in a terminal phase.  `Err` is reserved for broken
//! contracts: a drone missing from the tick's snapshot, a worker whose node
//! is not on its route, or stepping a finished worker.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `Scout` and `Worker`. |

pub mod error;
pub mod scout;
pub mod store;
pub mod worker;

#[cfg(test)]
mod tests;

pub use error::{AgentError, AgentResult};
pub use scout::{ExplorePhase, Scout};
pub use store::ScoutRngs;
pub use worker::{SendPhase, Worker, WorkerOutcome};
