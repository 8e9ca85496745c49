//! Error types for scan configuration.

/// Errors reported for an unusable scan configuration.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum FovError {
    /// The scan radius must be finite and non-negative. Negative radii
    /// would silently produce meaningless slope arithmetic, so they are
    /// rejected up front.
    #[error("radius must be finite and non-negative, got {0}")]
    InvalidRadius(f64),
}
