//! Staged Progress Animator
//!
//! State machine driving the pipeline views:
//!
//! ```text
//! Idle --start--> Running(0, 0)
//! Running(i, p < 100) --tick--> Running(i, p + step)
//! Running(i < last, 100) --tick--> Running(i + 1, 0)
//! Running(last, 100) --tick--> Complete
//! Running --pause--> Paused --resume--> Running
//! any --stop/reset--> Idle
//! ```
//!
//! Time comes from an injected [`Clock`] through an owned [`Ticker`], so the
//! animator can be driven by wall time or stepped deterministically.

use amao_core::{Clock, DemoConfig, DetailLevel, StepFunction, Ticker};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;
use std::time::Duration;

use crate::stage::{Stage, StageSequence};

/// Full progress value
pub const PROGRESS_MAX: f32 = 100.0;

/// Animator states
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AnimatorState {
    Idle,
    Running { stage: usize, progress: f32 },
    Paused { stage: usize, progress: f32 },
    Complete,
}

/// Notifications emitted by state changes
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AnimatorEvent {
    Started,
    Progress { stage: usize, progress: f32 },
    StageEntered { stage: usize, detail: DetailLevel },
    Completed,
    Paused { stage: usize, progress: f32 },
    Resumed,
    Stopped,
    Reset,
}

/// Clock-driven pipeline animator
#[derive(Debug, Clone)]
pub struct Animator {
    sequence: StageSequence,
    state: AnimatorState,
    ticker: Ticker,
    step: StepFunction,
    seed: u64,
    rng: Pcg32,
    max_ticks_per_update: u32,
    events: Vec<AnimatorEvent>,
}

impl Animator {
    /// Create an idle animator
    pub fn new(sequence: StageSequence, interval: Duration, step: StepFunction, seed: u64) -> Self {
        let step = if step.max_step().is_finite() && step.max_step() > 0.0 {
            step
        } else {
            log::warn!("Rejected step function {:?}; using default", step);
            StepFunction::default()
        };

        Self {
            sequence,
            state: AnimatorState::Idle,
            ticker: Ticker::new(interval),
            step,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            max_ticks_per_update: 8,
            events: Vec::new(),
        }
    }

    /// Create an idle animator from the demo configuration
    pub fn from_config(sequence: StageSequence, config: &DemoConfig) -> Self {
        let mut animator = Self::new(sequence, config.tick_interval(), config.step, config.seed);
        animator.max_ticks_per_update = config.max_ticks_per_update.max(1);
        animator
    }

    /// Limit how many ticks a single update may process
    pub fn with_max_ticks_per_update(mut self, max: u32) -> Self {
        self.max_ticks_per_update = max.max(1);
        self
    }

    /// Begin from the first stage; ignored while running or paused
    pub fn start<C: Clock + ?Sized>(&mut self, clock: &C) -> bool {
        match self.state {
            AnimatorState::Idle | AnimatorState::Complete => {
                self.rng = Pcg32::seed_from_u64(self.seed);
                self.state = AnimatorState::Running {
                    stage: 0,
                    progress: 0.0,
                };
                self.ticker.start(clock.now());
                self.events.push(AnimatorEvent::Started);
                self.events.push(AnimatorEvent::StageEntered {
                    stage: 0,
                    detail: self.sequence.detail_for(0),
                });
                log::debug!("Pipeline started ({} stages)", self.sequence.len());
                true
            }
            AnimatorState::Running { .. } | AnimatorState::Paused { .. } => false,
        }
    }

    /// Freeze in place
    pub fn pause(&mut self) -> bool {
        let AnimatorState::Running { stage, progress } = self.state else {
            return false;
        };
        self.state = AnimatorState::Paused { stage, progress };
        self.ticker.stop();
        self.events.push(AnimatorEvent::Paused { stage, progress });
        true
    }

    /// Continue from where `pause` left off
    pub fn resume<C: Clock + ?Sized>(&mut self, clock: &C) -> bool {
        let AnimatorState::Paused { stage, progress } = self.state else {
            return false;
        };
        self.state = AnimatorState::Running { stage, progress };
        self.ticker.start(clock.now());
        self.events.push(AnimatorEvent::Resumed);
        true
    }

    /// Abort and lose all progress
    pub fn stop(&mut self) -> bool {
        if self.state == AnimatorState::Idle {
            return false;
        }
        self.state = AnimatorState::Idle;
        self.ticker.stop();
        self.events.push(AnimatorEvent::Stopped);
        log::debug!("Pipeline stopped");
        true
    }

    /// Return to idle from any state
    pub fn reset(&mut self) {
        self.state = AnimatorState::Idle;
        self.ticker.stop();
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.events.push(AnimatorEvent::Reset);
    }

    /// Swap in another stage sequence and reset
    pub fn replace_sequence(&mut self, sequence: StageSequence) {
        self.sequence = sequence;
        self.reset();
    }

    /// Process every tick that is due and drain pending events
    pub fn update<C: Clock + ?Sized>(&mut self, clock: &C) -> Vec<AnimatorEvent> {
        let due = self.ticker.poll(clock.now());
        let ticks = due.min(self.max_ticks_per_update);
        if due > ticks {
            log::trace!("Dropping {} late pipeline ticks", due - ticks);
        }

        for _ in 0..ticks {
            if !self.tick() {
                break;
            }
        }
        self.take_events()
    }

    /// Apply one transition. Returns false when not running.
    pub fn tick(&mut self) -> bool {
        let AnimatorState::Running { stage, progress } = self.state else {
            return false;
        };

        if progress < PROGRESS_MAX {
            let progress = (progress + self.next_step()).min(PROGRESS_MAX);
            self.state = AnimatorState::Running { stage, progress };
            self.events.push(AnimatorEvent::Progress { stage, progress });
            tracing::debug!(target: "pipeline", stage, progress, "tick");
        } else if stage < self.sequence.last_index() {
            let stage = stage + 1;
            let detail = self.sequence.detail_for(stage);
            self.state = AnimatorState::Running {
                stage,
                progress: 0.0,
            };
            self.events.push(AnimatorEvent::StageEntered { stage, detail });
            log::debug!("Entered stage {} ({}) at {}", stage, self.sequence.get(stage).name, detail);
        } else {
            self.state = AnimatorState::Complete;
            self.ticker.stop();
            self.events.push(AnimatorEvent::Completed);
            log::debug!("Pipeline complete");
        }
        true
    }

    fn next_step(&mut self) -> f32 {
        match self.step {
            StepFunction::Fixed { increment } => increment,
            // Maps [0, max) onto (0, max]
            StepFunction::Jitter { max } => max - self.rng.gen_range(0.0..max),
        }
    }

    /// Drain pending events
    pub fn take_events(&mut self) -> Vec<AnimatorEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn state(&self) -> AnimatorState {
        self.state
    }

    pub fn sequence(&self) -> &StageSequence {
        &self.sequence
    }

    /// Current stage index (0 while idle, last once complete)
    pub fn stage_index(&self) -> usize {
        match self.state {
            AnimatorState::Idle => 0,
            AnimatorState::Running { stage, .. } | AnimatorState::Paused { stage, .. } => stage,
            AnimatorState::Complete => self.sequence.last_index(),
        }
    }

    /// Progress within the current stage, 0 to 100
    pub fn progress(&self) -> f32 {
        match self.state {
            AnimatorState::Idle => 0.0,
            AnimatorState::Running { progress, .. } | AnimatorState::Paused { progress, .. } => {
                progress
            }
            AnimatorState::Complete => PROGRESS_MAX,
        }
    }

    /// Progress across the whole sequence, 0 to 100
    pub fn overall_progress(&self) -> f32 {
        let stages = self.sequence.len() as f32;
        let done = self.stage_index() as f32 * PROGRESS_MAX + self.progress();
        (done / stages).clamp(0.0, PROGRESS_MAX)
    }

    /// Stage currently shown
    pub fn current_stage(&self) -> &Stage {
        self.sequence.get(self.stage_index())
    }

    /// Detail level for the current stage
    pub fn detail(&self) -> DetailLevel {
        self.sequence.detail_for(self.stage_index())
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, AnimatorState::Running { .. })
    }

    pub fn is_complete(&self) -> bool {
        self.state == AnimatorState::Complete
    }
}
