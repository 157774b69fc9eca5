//! `relay-data` — what the relay network is carrying.
//!
//! # Crate layout
//!
//! | Module      | Contents                                              |
//! |-------------|-------------------------------------------------------|
//! | [`package`] | `PackageState`, `Package`, `DataUnit`                 |
//! | [`ledger`]  | `DataLedger` — every generated unit, lifecycle queries |
//! | [`error`]   | `DataError`, `DataResult<T>`                          |
//!
//! # Package lifecycle
//!
//! ```text
//! Unsent ──dispatch──▶ InFlight ──deliver──▶ Delivered
//!                               └──lose─────▶ Lost
//! ```
//!
//! Terminal states are sticky: any other transition is a
//! [`DataError::InvalidTransition`].

pub mod error;
pub mod ledger;
pub mod package;


pub use error::{DataError, DataResult};
pub use ledger::{DataLedger, PackageCounts};
pub use package::{DataUnit, Package, PackageState};
