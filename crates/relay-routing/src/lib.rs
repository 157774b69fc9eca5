//! `relay-routing` — discovered routes and the shared route table.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                      |
//! |-----------|---------------------------------------------------------------|
//! | [`route`] | `Route` — hops, per-hop distances, quality, occupancy, usable |
//! | [`table`] | `RouteTable`, `Admission` — admission, refresh, usable query  |
//! | [`error`] | `RoutingError`, `RoutingResult<T>`                            |
//!
//! # Admission policy (summary)
//!
//! ```text
//! candidate has a hop ≥ disconnect_radius   → reject
//! conflicts with 0 usable routes            → admit
//! conflicts with exactly 1 usable route     → admit iff quality ≥ incumbent's,
//!                                             incumbent marked unusable
//! conflicts with 2+ usable routes           → reject
//! ```
//!
//! "Conflict" means sharing a *directed* hop `(a → b)`; `a → b` and `b → a`
//! do not conflict.  Routes are never deleted, only marked unusable, so a
//! worker holding a `RouteId` can always resolve it.

pub mod error;
pub mod route;
pub mod table;


pub use error::{RoutingError, RoutingResult};
pub use route::Route;
pub use table::{Admission, RouteTable};
