use std::time::Instant;

use rayon::prelude::*;

use crate::driver::{Event, FrameDriver};
use crate::error::AttractorResult;
use crate::playback::{Trajectory, TrajectoryConfig};
use crate::renderer::{self, Rgb};
use crate::surface::{Rect, Surface};

/// All trajectories of one run, in draw order.
///
/// One tick polls events, advances every trajectory by one sample, draws the
/// newest segment of each and presents the dirty region. Later trajectories
/// paint over earlier ones.
pub struct Scene {
    trajectories: Vec<Trajectory>,
    background: Rgb,
    running: bool,
    frame: u64,
}

impl Scene {
    /// Build and solve every trajectory. Tables are solved on the rayon pool;
    /// all of them are complete before this returns.
    pub fn init(configs: Vec<TrajectoryConfig>, background: Rgb) -> AttractorResult<Self> {
        let started = Instant::now();
        let trajectories = configs
            .into_par_iter()
            .enumerate()
            .map(|(i, cfg)| -> AttractorResult<Trajectory> {
                let t0 = Instant::now();
                let traj = Trajectory::new(cfg)?;
                log::info!(
                    "trajectory {i}: {} samples via {:?} in {:.2?}",
                    traj.len(),
                    traj.strategy(),
                    t0.elapsed()
                );
                Ok(traj)
            })
            .collect::<AttractorResult<Vec<_>>>()?;
        log::info!("scene ready: {} trajectories in {:.2?}", trajectories.len(), started.elapsed());

        Ok(Self { trajectories, background, running: true, frame: 0 })
    }

    /// Clear the surface and tick until a quit event arrives.
    pub fn run<D: FrameDriver>(&mut self, driver: &mut D) -> AttractorResult<()> {
        driver.surface_mut().fill(self.background);
        driver.present_all()?;
        while self.tick(driver)? {}
        Ok(())
    }

    /// Run one frame. Returns false once the scene has stopped.
    pub fn tick<D: FrameDriver>(&mut self, driver: &mut D) -> AttractorResult<bool> {
        if !self.running {
            return Ok(false);
        }
        for event in driver.poll_events() {
            match event {
                Event::QuitRequested => self.running = false,
            }
        }
        if !self.running {
            log::info!("quit requested at frame {}", self.frame);
            return Ok(false);
        }

        for (i, traj) in self.trajectories.iter_mut().enumerate() {
            if traj.advance() && traj.is_exhausted() {
                log::debug!("trajectory {i} exhausted after {} samples", traj.len());
            }
        }

        let surface = driver.surface_mut();
        let mut dirty = Rect::default();
        for traj in &self.trajectories {
            dirty = dirty.union(renderer::draw(traj, &mut *surface));
        }
        driver.present_region(dirty)?;

        self.frame += 1;
        Ok(true)
    }

    pub fn shutdown(self) {
        for (i, traj) in self.trajectories.iter().enumerate() {
            log::info!(
                "trajectory {i}: played {}/{} samples ({:.1}%)",
                traj.cursor(),
                traj.len(),
                traj.progress() * 100.0
            );
        }
        log::info!("shut down after {} frames", self.frame());
    }

    /// Ticks completed so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    #[cfg(test)]
    pub fn trajectories(&self) -> &[Trajectory] {
        &self.trajectories
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.running
    }
}
