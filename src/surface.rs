use crate::renderer::Rgb;

/// Axis-aligned pixel rectangle, already clipped to a surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl Rect {
    /// Clip the inclusive signed span `[x0, x1] × [y0, y1]` to a `width × height` surface.
    fn clipped(x0: isize, y0: isize, x1: isize, y1: isize, width: usize, height: usize) -> Self {
        let cx0 = x0.max(0);
        let cy0 = y0.max(0);
        let cx1 = x1.min((width as isize).saturating_sub(1));
        let cy1 = y1.min((height as isize).saturating_sub(1));
        if cx0 > cx1 || cy0 > cy1 {
            return Self::default();
        }
        Self {
            x: cx0 as usize,
            y: cy0 as usize,
            width: (cx1 - cx0 + 1) as usize,
            height: (cy1 - cy0 + 1) as usize,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Smallest rectangle covering both.
    pub fn union(self, other: Rect) -> Rect {
        if self.is_empty() {
            return other;
        }
        if other.is_empty() {
            return self;
        }
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = (self.x + self.width).max(other.x + other.width);
        let bottom = (self.y + self.height).max(other.y + other.height);
        Rect { x, y, width: right - x, height: bottom - y }
    }
}

/// Liang-Barsky: the part of segment `a -> b` inside the inclusive box
/// `[x_lo, x_hi] × [y_lo, y_hi]`, or `None` if the segment misses it.
/// Endpoints already inside the box are kept exactly.
fn clip_segment(
    a: (isize, isize),
    b: (isize, isize),
    (x_lo, x_hi): (isize, isize),
    (y_lo, y_hi): (isize, isize),
) -> Option<((isize, isize), (isize, isize))> {
    let (ax, ay) = (a.0 as f64, a.1 as f64);
    let dx = b.0 as f64 - ax;
    let dy = b.1 as f64 - ay;
    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;
    for (p, q) in [
        (-dx, ax - x_lo as f64),
        (dx, x_hi as f64 - ax),
        (-dy, ay - y_lo as f64),
        (dy, y_hi as f64 - ay),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    let at = |t: f64| {
        (
            (ax + t * dx).round().clamp(x_lo as f64, x_hi as f64) as isize,
            (ay + t * dy).round().clamp(y_lo as f64, y_hi as f64) as isize,
        )
    };
    let start = if t0 > 0.0 { at(t0) } else { a };
    let end = if t1 < 1.0 { at(t1) } else { b };
    Some((start, end))
}

/// Drawing target for trajectory segments.
pub trait Surface {
    /// (width, height) in pixels.
    fn size(&self) -> (usize, usize);

    fn fill(&mut self, color: Rgb);

    /// Draw a `stroke`-pixel-wide line from `a` to `b` and return the touched
    /// region clipped to the surface. Off-surface pixels are dropped.
    fn draw_line(&mut self, color: Rgb, a: (isize, isize), b: (isize, isize), stroke: usize) -> Rect;
}

/// In-memory 0RGB pixel buffer, the layout minifb uploads.
pub struct FrameBuffer {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    #[cfg(test)]
    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    /// Stamp a `stroke × stroke` square centred (rounding up-left) on (cx, cy).
    #[inline]
    fn stamp(&mut self, cx: isize, cy: isize, lo: isize, hi: isize, value: u32) {
        for dy in lo..hi {
            let py = cy + dy;
            if py < 0 || py as usize >= self.height {
                continue;
            }
            for dx in lo..hi {
                let px = cx + dx;
                if px >= 0 && (px as usize) < self.width {
                    self.pixels[py as usize * self.width + px as usize] = value;
                }
            }
        }
    }
}

impl Surface for FrameBuffer {
    fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn fill(&mut self, color: Rgb) {
        self.pixels.fill(color.to_0rgb());
    }

    fn draw_line(&mut self, color: Rgb, a: (isize, isize), b: (isize, isize), stroke: usize) -> Rect {
        let stroke = stroke.max(1) as isize;
        let lo = -(stroke / 2);
        let hi = lo + stroke;
        let value = color.to_0rgb();
        if self.width == 0 || self.height == 0 {
            return Rect::default();
        }

        // Only brush centres in this box can touch a pixel. Clipping first keeps
        // the walk short and the arithmetic small for far-off endpoints.
        let x_box = (1 - hi, self.width as isize - 1 - lo);
        let y_box = (1 - hi, self.height as isize - 1 - lo);
        let Some(((x0, y0), (x1, y1))) = clip_segment(a, b, x_box, y_box) else {
            return Rect::default();
        };

        // Bresenham over the centre line, stamping the brush at each step.
        let mut cx = x0;
        let mut cy = y0;
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx: isize = if x0 < x1 { 1 } else { -1 };
        let sy: isize = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.stamp(cx, cy, lo, hi, value);
            if cx == x1 && cy == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                cx += sx;
            }
            if e2 <= dx {
                err += dx;
                cy += sy;
            }
        }

        Rect::clipped(
            x0.min(x1).saturating_add(lo),
            y0.min(y1).saturating_add(lo),
            x0.max(x1).saturating_add(hi - 1),
            y0.max(y1).saturating_add(hi - 1),
            self.width,
            self.height,
        )
    }
}
