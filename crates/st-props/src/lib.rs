//! st-props: table-driven steam properties.
//!
//! Provides:
//! - 1D bracket-and-interpolate primitives
//! - Two-axis interpolation over irregular piecewise region tables
//! - Saturation lookups by temperature and by pressure
//! - Region classification and region-aware property lookup
//! - Two-phase mixture blending and its inverse
//! - A state solver that resolves as much of a state as the inputs allow
//!
//! # Example
//!
//! ```no_run
//! use st_props::{KnownInputs, Steam};
//!
//! let steam = Steam::from_builtin()?;
//! let record = steam.state(&KnownInputs::new().p_kpa(1000.0).t_c(400.0));
//! println!("{} h={:?}", record.region(), record.computed.h);
//! # Ok::<(), st_props::SteamError>(())
//! ```
//!
//! Every value comes from linear interpolation of the tables; queries
//! outside the tabulated range extend the outermost interval linearly.

pub mod api;
pub mod engine;
pub mod error;
pub mod interp;
pub mod piecewise;
pub mod property;
pub mod quality;
pub mod region;
pub mod saturation;
pub mod state;

pub use api::builtin;
pub use engine::{EngineOptions, Steam};
pub use error::{SteamError, SteamResult};
pub use quality::Mixture;
pub use region::{Region, SAT_BAND_C};
pub use saturation::SaturationProps;
pub use state::{IgnoredInput, KnownInputs, StateKey, StateOutcome, StateRecord, StateValues};
pub use st_tables::Property;
