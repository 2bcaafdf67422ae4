use serde::Deserialize;

/// 8-bit RGB display color. Deserializes from `[r, g, b]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "[u8; 3]")]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const RED: Rgb = Rgb(255, 0, 0);

    /// Palette the default scene cycles through.
    pub const NAVY: Rgb = Rgb(19, 49, 111);
    pub const CRIMSON: Rgb = Rgb(201, 0, 64);

    /// Pack as 0RGB, the pixel layout minifb expects.
    #[inline]
    pub fn to_0rgb(self) -> u32 {
        (self.0 as u32) << 16 | (self.1 as u32) << 8 | self.2 as u32
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Rgb(r, g, b)
    }
}
