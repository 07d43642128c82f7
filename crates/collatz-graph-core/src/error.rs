//! Error types for the layout core.

use thiserror::Error;

/// Result type alias for layout-core operations.
pub type GraphResult<T> = Result<T, GraphError>;

/// Errors that can occur while building, laying out or styling a graph.
#[derive(Debug, Error)]
pub enum GraphError {
    /// The input contained no sequences at all.
    #[error("no sequences provided: nothing to lay out")]
    NoSequences,

    /// A sequence in the input was empty.
    #[error("sequence #{index} is empty")]
    EmptySequence { index: usize },

    /// A sequence violated the input contract (positive values ending at 1).
    #[error("sequence #{index} is invalid: {message}")]
    InvalidSequence { index: usize, message: String },

    /// The layout selector did not name a known strategy.
    #[error("unknown layout strategy: {name:?} (expected standard, radial_layers, spiral, galaxy or pseudo3d)")]
    UnknownLayout { name: String },

    /// The shape selector did not name a known shape type.
    #[error("unknown shape type: {name:?}")]
    UnknownShape { name: String },

    /// The light position selector did not name a known position.
    #[error("unknown light position: {name:?}")]
    UnknownLightPosition { name: String },

    /// Viewer distance for the perspective projector must be positive.
    #[error("invalid viewer distance: {value} (must be > 0)")]
    InvalidViewerDistance { value: f64 },

    /// Spatial grid cell size must be positive.
    #[error("invalid grid cell size: {value} (must be > 0)")]
    InvalidCellSize { value: f64 },

    /// Weighted selector received no usable weights.
    #[error("invalid weights: {message}")]
    InvalidWeights { message: String },

    /// A color string could not be parsed.
    #[error("invalid color: {input:?} (expected #rrggbb or #rrggbbaa)")]
    InvalidColor { input: String },

    /// A layout parameter is out of range.
    #[error("invalid configuration for `{field}`: {message}")]
    InvalidConfig { field: &'static str, message: String },

    /// The 3x+1 iteration overflowed u64.
    #[error("sequence starting at {start} overflowed after reaching {at}")]
    SequenceOverflow { start: u64, at: u64 },

    /// The 3x+1 iteration did not reach 1 within the step budget.
    #[error("sequence starting at {start} did not reach 1 within {limit} steps")]
    StepLimitExceeded { start: u64, limit: usize },

    /// Internal consistency check failed. Indicates a bug, not bad input.
    #[error("graph invariant violated: {message}")]
    InvariantViolation { message: String },

    /// JSON serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl GraphError {
    /// Whether this error stems from caller-supplied input or settings.
    pub fn is_configuration(&self) -> bool {
        !matches!(
            self,
            GraphError::InvariantViolation { .. } | GraphError::Serialization(_)
        )
    }
}
