use thiserror::Error;

/// Errors raised while configuring trajectories or talking to the window.
///
/// Everything except `SurfaceUnavailable` is a setup-time error: once a
/// trajectory is built, advancing and drawing it cannot fail.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AttractorError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("degenerate domain: x [{x_min}, {x_max}], y [{y_min}, {y_max}]")]
    InvalidDomain {
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
    },

    #[error("surface unavailable: {0}")]
    SurfaceUnavailable(String),
}

pub type AttractorResult<T> = Result<T, AttractorError>;

impl AttractorError {
    pub(crate) fn parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }
}
