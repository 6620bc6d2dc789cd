use std::io;
use std::time::Duration;

use tracing::debug;
use tracing::info;

use crate::Age;
use crate::engine;
use crate::events::ControlEvent;
use crate::grid::Grid;
use crate::stability;

/// How often the driver re-polls while blocked on a manual advance.
const STEP_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Where the driver sends each generation, cell by cell in row-major order.
pub trait RenderSink {
    fn draw_cell_at(&mut self, row: usize, col: usize, age: Age) -> io::Result<()>;
}

/// Source of cancellation and manual-advance stimuli.
///
/// Polled with a zero timeout at the top of every generation, so
/// implementations must return promptly when nothing is pending.
pub trait EventSource {
    fn poll(&mut self, timeout: Duration) -> io::Result<Option<ControlEvent>>;
}

/// Injectable timer, so the loop is testable without real delays.
pub trait Clock {
    fn pause(&mut self, duration: Duration);
}

/// Pacing between generations, fixed for the duration of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    /// Sleep this long after rendering each generation.
    Delay(Duration),

    /// Block until an explicit advance signal.
    Manual,
}

impl Pacing {
    /// Map a speed level to a pacing mode. Levels 1-3 delay `25 * level`
    /// milliseconds; level 4 is manual stepping.
    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            1..=3 => Some(Self::Delay(Duration::from_millis(25 * level as u64))),
            4 => Some(Self::Manual),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimConfig {
    pub max_age: Age,
    pub pacing: Pacing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimState {
    Running,
    WaitingForManualAdvance,
    Stopped,
}

/// How a run ended, and after how many generations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Stable { generations: u64 },
    Cancelled { generations: u64 },
}

pub struct Simulation {
    grid: Grid,
    config: SimConfig,
    state: SimState,
    generations: u64,
}

impl Simulation {
    pub fn new(grid: Grid, config: SimConfig) -> Self {
        Self {
            grid,
            config,
            state: SimState::Running,
            generations: 0,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn state(&self) -> SimState {
        self.state
    }

    /// Drive the colony until it stabilizes or the user cancels.
    ///
    /// Each iteration polls for cancellation, advances one generation,
    /// renders it, paces, then checks stability. Cancellation is cooperative:
    /// it is only observed between generations, never mid-advance.
    pub fn run<S, E, C>(&mut self, sink: &mut S, events: &mut E, clock: &mut C) -> io::Result<Outcome>
    where
        S: RenderSink,
        E: EventSource,
        C: Clock,
    {
        info!(
            rows = self.grid.rows(),
            cols = self.grid.cols(),
            pacing = ?self.config.pacing,
            "starting simulation"
        );

        self.state = SimState::Running;

        // The initial configuration is rendered like any other generation.
        render(&self.grid, sink)?;

        loop {
            if let Some(ControlEvent::Cancel) = events.poll(Duration::ZERO)? {
                return Ok(self.stop(false));
            }

            self.grid = engine::advance(&self.grid);
            self.generations += 1;
            debug!(generation = self.generations, "advanced");

            render(&self.grid, sink)?;

            match self.config.pacing {
                Pacing::Delay(delay) => clock.pause(delay),
                Pacing::Manual => {
                    self.state = SimState::WaitingForManualAdvance;

                    loop {
                        match events.poll(STEP_POLL_INTERVAL)? {
                            Some(ControlEvent::Cancel) => return Ok(self.stop(false)),
                            Some(ControlEvent::Step) => break,
                            None => {}
                        }
                    }

                    self.state = SimState::Running;
                }
            }

            if stability::is_stable(&self.grid, self.config.max_age) {
                return Ok(self.stop(true));
            }
        }
    }

    fn stop(&mut self, stable: bool) -> Outcome {
        self.state = SimState::Stopped;

        let generations = self.generations;

        if stable {
            info!(generations, "colony stabilized");
            Outcome::Stable { generations }
        } else {
            info!(generations, "simulation cancelled");
            Outcome::Cancelled { generations }
        }
    }
}

fn render<S: RenderSink>(grid: &Grid, sink: &mut S) -> io::Result<()> {
    for ((row, col), age) in grid.iter() {
        sink.draw_cell_at(row, col, age)?;
    }

    Ok(())
}
