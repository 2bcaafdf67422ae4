// Frame-by-frame playback of a Lorenz trajectory.

use std::sync::Arc;

use serde::Deserialize;

use crate::error::{AttractorError, AttractorResult};
use crate::renderer::{Domain, Rgb};
use crate::solver::{self, SystemParameters};
use crate::state::State;

/// How a trajectory produces its next sample.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvanceStrategy {
    /// Read from a table solved ahead of time with RK4.
    #[default]
    TableLookup,
    /// Apply the first-order discrete update to the live state each frame.
    /// Cheaper, less accurate; no table is allocated.
    DirectIntegration,
}

/// Everything needed to build one trajectory.
#[derive(Clone, Debug, PartialEq)]
pub struct TrajectoryConfig {
    pub initial_state: State,
    pub parameters: SystemParameters,
    pub dt: f64,
    pub duration: f64,
    pub domain: Domain,
    pub color: Rgb,
    pub strategy: AdvanceStrategy,
}

enum SampleSource {
    Table(Arc<[State]>),
    Direct,
}

/// One solved Lorenz trajectory and its playback cursor.
///
/// Both strategies hold `floor(duration / dt)` samples. Sample 0 is the state
/// one step after `initial_state`; `current` starts at `initial_state`, so the
/// first segment joins the initial condition to sample 0.
pub struct Trajectory {
    parameters: SystemParameters,
    dt: f64,
    source: SampleSource,
    len: usize,
    cursor: usize,
    previous: State,
    current: State,
    domain: Domain,
    color: Rgb,
}

impl Trajectory {
    /// Validate the configuration and, for `TableLookup`, solve the whole table.
    pub fn new(config: TrajectoryConfig) -> AttractorResult<Self> {
        let TrajectoryConfig { initial_state, parameters, dt, duration, domain, color, strategy } = config;

        let (source, len) = match strategy {
            AdvanceStrategy::TableLookup => {
                let samples = solver::solve(initial_state, &parameters, dt, duration)?;
                let len = samples.len();
                (SampleSource::Table(samples.into()), len)
            }
            AdvanceStrategy::DirectIntegration => {
                parameters.validate()?;
                if !initial_state.is_finite() {
                    return Err(AttractorError::parameter(format!(
                        "initial state must be finite, got {initial_state:?}"
                    )));
                }
                (SampleSource::Direct, solver::sample_count(dt, duration)?)
            }
        };

        Ok(Self {
            parameters,
            dt,
            source,
            len,
            cursor: 0,
            previous: initial_state,
            current: initial_state,
            domain,
            color,
        })
    }

    /// Consume the next sample. Returns false, changing nothing, once exhausted.
    pub fn advance(&mut self) -> bool {
        if self.cursor >= self.len {
            return false;
        }
        let next = match &self.source {
            SampleSource::Table(samples) => samples[self.cursor],
            SampleSource::Direct => solver::step_discrete(self.current, &self.parameters, self.dt),
        };
        self.previous = self.current;
        self.current = next;
        self.cursor += 1;
        true
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.len
    }

    /// Index of the next unconsumed sample.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Total number of samples.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Fraction of samples consumed, in `[0, 1]`. An empty trajectory is done.
    pub fn progress(&self) -> f64 {
        if self.len == 0 {
            1.0
        } else {
            self.cursor as f64 / self.len as f64
        }
    }

    pub fn previous(&self) -> State {
        self.previous
    }

    pub fn current(&self) -> State {
        self.current
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn strategy(&self) -> AdvanceStrategy {
        match self.source {
            SampleSource::Table(_) => AdvanceStrategy::TableLookup,
            SampleSource::Direct => AdvanceStrategy::DirectIntegration,
        }
    }

    /// Read-only view of the solved table (`None` for direct integration).
    #[cfg(test)]
    pub fn samples(&self) -> Option<&[State]> {
        match &self.source {
            SampleSource::Table(samples) => Some(samples.as_ref()),
            SampleSource::Direct => None,
        }
    }
}
