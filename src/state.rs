use serde::Deserialize;

/// A point in Lorenz phase space.
///
/// Deserializes from a plain `[x, y, z]` sequence so configuration files can
/// write `initial_state: [0.1, 0.0, 0.0]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(from = "[f64; 3]")]
pub struct State {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl State {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// `self + h * k`, the building block of the Runge-Kutta stages.
    #[inline]
    pub fn offset(self, k: State, h: f64) -> State {
        State {
            x: self.x + h * k.x,
            y: self.y + h * k.y,
            z: self.z + h * k.z,
        }
    }

    /// Euclidean distance between two states.
    #[cfg(test)]
    pub fn distance(&self, other: &State) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

impl From<[f64; 3]> for State {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self { x, y, z }
    }
}
