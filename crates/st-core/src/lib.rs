//! st-core: shared foundation for steamtab.
//!
//! Contains:
//! - numeric (Real + tolerances + float helpers)
//! - units (uom types in table units + unit-aware text parsing)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use units::{Quantity, UnitError, parse_quantity};
