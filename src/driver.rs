use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use minifb::{Key, Window, WindowOptions};

use crate::config::DisplayConfig;
use crate::error::{AttractorError, AttractorResult};
use crate::surface::{FrameBuffer, Rect, Surface};

/// Platform events the scene reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    QuitRequested,
}

/// Owner of the drawing surface, the event pump and presentation.
pub trait FrameDriver {
    type Surface: Surface;

    fn surface_mut(&mut self) -> &mut Self::Surface;

    fn poll_events(&mut self) -> Vec<Event>;

    /// Push `region` of the surface to the screen.
    fn present_region(&mut self, region: Rect) -> AttractorResult<()>;

    fn present_all(&mut self) -> AttractorResult<()>;
}

/// minifb window backed by a `FrameBuffer`.
pub struct WindowDriver {
    window: Window,
    framebuf: FrameBuffer,
    title: String,
    /// Set by the Ctrl+C handler.
    interrupted: Arc<AtomicBool>,
    frame_count: u32,
    last_fps_time: Instant,
}

impl WindowDriver {
    pub fn open(display: &DisplayConfig, interrupted: Arc<AtomicBool>) -> AttractorResult<Self> {
        display.validate()?;
        let mut window = Window::new(&display.title, display.width, display.height, WindowOptions::default())
            .map_err(|e| AttractorError::SurfaceUnavailable(e.to_string()))?;
        window.set_target_fps(display.target_fps);

        Ok(Self {
            window,
            framebuf: FrameBuffer::new(display.width, display.height),
            title: display.title.clone(),
            interrupted,
            frame_count: 0,
            last_fps_time: Instant::now(),
        })
    }

    fn tick_fps(&mut self) {
        self.frame_count += 1;
        let now = Instant::now();
        if now.duration_since(self.last_fps_time) >= Duration::from_secs(1) {
            let fps = self.frame_count;
            self.frame_count = 0;
            self.last_fps_time = now;
            self.window.set_title(&format!("{} — {fps} fps", self.title));
        }
    }
}

impl FrameDriver for WindowDriver {
    type Surface = FrameBuffer;

    fn surface_mut(&mut self) -> &mut FrameBuffer {
        &mut self.framebuf
    }

    fn poll_events(&mut self) -> Vec<Event> {
        let quit = !self.window.is_open()
            || self.window.is_key_down(Key::Escape)
            || self.interrupted.load(Ordering::SeqCst);
        if quit {
            vec![Event::QuitRequested]
        } else {
            Vec::new()
        }
    }

    // minifb only uploads whole buffers.
    fn present_region(&mut self, _region: Rect) -> AttractorResult<()> {
        self.present_all()
    }

    fn present_all(&mut self) -> AttractorResult<()> {
        let (w, h) = self.framebuf.size();
        self.window
            .update_with_buffer(self.framebuf.pixels(), w, h)
            .map_err(|e| AttractorError::SurfaceUnavailable(e.to_string()))?;
        self.tick_fps();
        Ok(())
    }
}
