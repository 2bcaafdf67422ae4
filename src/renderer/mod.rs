mod color;

// Re-export public API
pub use color::Rgb;

use crate::error::{AttractorError, AttractorResult};
use crate::playback::Trajectory;
use crate::state::State;
use crate::surface::{Rect, Surface};

/// Line width of every trajectory segment, in pixels.
pub const STROKE_WIDTH: usize = 2;

/// Rectangle of the XY phase plane stretched over the whole canvas.
///
/// Bounds are fixed at construction; `x_min == x_max` or `y_min == y_max`
/// is rejected there so `project` never divides by zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Domain {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

impl Domain {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> AttractorResult<Self> {
        if ![x_min, x_max, y_min, y_max].iter().all(|v| v.is_finite()) {
            return Err(AttractorError::parameter(format!(
                "domain bounds must be finite, got x [{x_min}, {x_max}], y [{y_min}, {y_max}]"
            )));
        }
        if x_min == x_max || y_min == y_max {
            return Err(AttractorError::InvalidDomain { x_min, x_max, y_min, y_max });
        }
        Ok(Self { x_min, x_max, y_min, y_max })
    }

    /// [-30, 30] × [-30, 30]: frames the classic butterfly.
    #[cfg(test)]
    pub const fn reference() -> Self {
        Self { x_min: -30.0, x_max: 30.0, y_min: -30.0, y_max: 30.0 }
    }
}

/// Map a state onto a `width × height` canvas, dropping Z.
///
/// Rounds half away from zero (`f64::round`). Nothing is clamped: states
/// outside the domain land outside the canvas.
pub fn project(state: &State, domain: &Domain, width: usize, height: usize) -> (isize, isize) {
    let px = width as f64 * ((state.x - domain.x_min) / (domain.x_max - domain.x_min));
    let py = height as f64 * ((state.y - domain.y_min) / (domain.y_max - domain.y_min));
    (px.round() as isize, py.round() as isize)
}

/// Draw the newest segment (previous -> current) of a trajectory.
/// Returns the dirty region for a partial present.
///
/// A diverged direct-integration trajectory has non-finite states; its
/// segments are skipped and the returned region is empty.
pub fn draw<S: Surface + ?Sized>(trajectory: &Trajectory, surface: &mut S) -> Rect {
    let (previous, current) = (trajectory.previous(), trajectory.current());
    if !(previous.is_finite() && current.is_finite()) {
        return Rect::default();
    }
    let (w, h) = surface.size();
    let domain = trajectory.domain();
    let a = project(&previous, domain, w, h);
    let b = project(&current, domain, w, h);
    surface.draw_line(trajectory.color(), a, b, STROKE_WIDTH)
}
