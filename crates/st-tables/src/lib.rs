//! st-tables: in-memory steam reference tables.
//!
//! Provides:
//! - Saturation tables (temperature-driven and pressure-driven projections)
//! - Piecewise region tables (superheated vapor, compressed liquid) with an
//!   independent temperature grid per pressure block
//! - Row assembly with skipped-row accounting
//! - Display precision metadata
//! - JSON loading and the built-in reference dataset
//!
//! Tables carry data only; interpolation lives in `st-props`.

pub mod assembly;
pub mod dataset;
pub mod error;
pub mod precision;
pub mod property;
pub mod region;
pub mod saturation;

pub use assembly::{AssemblyReport, RawRow, assemble_region, assemble_saturation};
pub use dataset::{BuildReport, TableSet};
pub use error::{TableError, TableResult};
pub use precision::Precision;
pub use property::{Property, SatColumn};
pub use region::{PressureBlock, RegionKind, RegionRow, RegionTable};
pub use saturation::{SatAxis, SaturationRow, SaturationTable};
