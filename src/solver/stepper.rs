use super::params::SystemParameters;
use crate::state::State;

/// Lorenz vector field: (a(y-x), x(b-z) - y, xy - cz).
#[inline]
pub fn derivative(s: State, p: &SystemParameters) -> State {
    State {
        x: p.a * (s.y - s.x),
        y: s.x * (p.b - s.z) - s.y,
        z: s.x * s.y - p.c * s.z,
    }
}

/// One classic fourth-order Runge-Kutta step.
#[inline]
pub fn rk4_step(s: State, p: &SystemParameters, dt: f64) -> State {
    let k1 = derivative(s, p);
    let k2 = derivative(s.offset(k1, 0.5 * dt), p);
    let k3 = derivative(s.offset(k2, 0.5 * dt), p);
    let k4 = derivative(s.offset(k3, dt), p);
    let w = dt / 6.0;
    State {
        x: s.x + w * (k1.x + 2.0 * k2.x + 2.0 * k3.x + k4.x),
        y: s.y + w * (k1.y + 2.0 * k2.y + 2.0 * k3.y + k4.y),
        z: s.z + w * (k1.z + 2.0 * k2.z + 2.0 * k3.z + k4.z),
    }
}

/// Direct first-order update, applied component by component.
/// The new x feeds the y update; the new x and y feed the z update.
#[inline]
pub fn step_discrete(s: State, p: &SystemParameters, dt: f64) -> State {
    let x = s.x + dt * p.a * (s.y - s.x);
    let y = s.y + dt * (x * (p.b - s.z) - s.y);
    let z = s.z + dt * (x * y - p.c * s.z);
    State { x, y, z }
}
