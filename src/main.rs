mod config;
mod driver;
mod error;
mod playback;
mod renderer;
mod scene;
mod solver;
mod state;
mod surface;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Context;

use driver::WindowDriver;
use scene::Scene;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cfg = config::load();
    let trajectories = cfg
        .trajectory_configs(&mut rand::thread_rng())
        .context("invalid trajectory configuration")?;

    // Solve everything before the window exists so it never sits unresponsive.
    let mut scene = Scene::init(trajectories, cfg.display.background).context("failed to solve trajectories")?;

    // Ctrl+C handler
    let interrupted = Arc::new(AtomicBool::new(false));
    let flag = interrupted.clone();
    ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst)).context("error setting Ctrl+C handler")?;

    let mut driver = WindowDriver::open(&cfg.display, interrupted).context("failed to open window")?;
    scene.run(&mut driver)?;
    scene.shutdown();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{Event, FrameDriver};
    use crate::error::AttractorResult;
    use crate::surface::{FrameBuffer, Rect};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    struct Headless {
        surface: FrameBuffer,
        frames_left: usize,
    }

    impl FrameDriver for Headless {
        type Surface = FrameBuffer;

        fn surface_mut(&mut self) -> &mut FrameBuffer {
            &mut self.surface
        }

        fn poll_events(&mut self) -> Vec<Event> {
            if self.frames_left == 0 {
                return vec![Event::QuitRequested];
            }
            self.frames_left -= 1;
            Vec::new()
        }

        fn present_region(&mut self, _region: Rect) -> AttractorResult<()> {
            Ok(())
        }

        fn present_all(&mut self) -> AttractorResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_default_pipeline_no_panic() {
        // Shorten the default run so the test stays fast.
        let mut cfg = config::Config::default();
        for t in &mut cfg.trajectories {
            t.duration = 1.0;
        }
        let mut rng = StdRng::seed_from_u64(42);
        let trajectories = cfg.trajectory_configs(&mut rng).unwrap();
        let mut scene = Scene::init(trajectories, cfg.display.background).unwrap();

        let mut driver = Headless { surface: FrameBuffer::new(192, 108), frames_left: 2_000 };
        scene.run(&mut driver).unwrap();

        assert_eq!(scene.frame(), 2_000);
        let lit = driver.surface.pixels().iter().filter(|&&p| p != 0).count();
        assert!(lit > 0, "trajectories should leave a visible trace");
        scene.shutdown();
    }

    #[test]
    fn test_default_trajectories_start_apart() {
        let cfg = config::Config::default();
        let mut rng = StdRng::seed_from_u64(3);
        let configs = cfg.trajectory_configs(&mut rng).unwrap();
        assert_ne!(configs[0].initial_state.x, configs[1].initial_state.x);
    }
}
