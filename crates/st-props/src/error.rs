//! Property lookup errors.

use st_core::{CoreError, Real};
use st_tables::{RegionKind, TableError};
use thiserror::Error;

/// Result type for property lookups.
pub type SteamResult<T> = Result<T, SteamError>;

/// Errors raised by interpolation, saturation and mixture lookups.
#[derive(Error, Debug)]
pub enum SteamError {
    /// Axis and value sequences differ in length.
    #[error("Length mismatch: axis has {axis} points, values has {values}")]
    LengthMismatch { axis: usize, values: usize },

    /// Interpolation over a grid with no points.
    #[error("Empty grid: interpolation requires at least one grid point")]
    EmptyGrid,

    /// Bracketing over an axis shorter than two points.
    #[error("Bracketing requires at least two grid points (got {len})")]
    TooFewPoints { len: usize },

    /// Piecewise table without any pressure block.
    #[error("Empty {region} region table")]
    EmptyRegion { region: RegionKind },

    /// Quality outside the closed unit interval.
    #[error("Quality x={x} must be within [0, 1]")]
    QualityOutOfRange { x: Real },

    /// Saturated liquid and vapor values coincide, so quality is undefined.
    #[error("Cannot compute quality: saturated liquid and vapor values are both {value}")]
    DegenerateSaturation { value: Real },

    /// Rejected numeric argument or option.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The compiled-in dataset failed to load.
    #[error("Built-in steam tables unavailable: {message}")]
    BuiltinUnavailable { message: String },

    #[error(transparent)]
    Table(#[from] TableError),
}
