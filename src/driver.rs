//! Frame driver
//!
//! Owns the session and the best-score store and advances the simulation
//! once per host callback. Steps never overlap: the host calls `frame` (or
//! `advance`) from its animation callback and reads a snapshot afterwards.

use rand_pcg::Pcg32;

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::persistence::ScoreStore;
use crate::sim::{GamePhase, GameState, RandomSource, Snapshot, TickInput, tick};
use crate::tuning::Tuning;

/// Longest wall-clock gap honoured by `advance` (tab switches, debugger pauses)
const MAX_FRAME_SECS: f32 = 0.1;

pub struct FrameDriver<S: ScoreStore, R: RandomSource = Pcg32> {
    state: GameState<R>,
    store: S,
    accumulator: f32,
    /// Start edge seen by `advance` but not yet delivered to a step
    pending_start: bool,
    callbacks: u64,
}

impl<S: ScoreStore> FrameDriver<S, Pcg32> {
    /// Build a driver with a seeded session; the best score comes from `store`
    pub fn new(tuning: Tuning, seed: u64, store: S) -> Self {
        let best = store.load();
        log::info!("Session created (seed {}, best {})", seed, best);
        Self::with_state(GameState::new(tuning, seed, best), store)
    }
}

impl<S: ScoreStore, R: RandomSource> FrameDriver<S, R> {
    /// Wrap an existing session
    pub fn with_state(state: GameState<R>, store: S) -> Self {
        Self {
            state,
            store,
            accumulator: 0.0,
            pending_start: false,
            callbacks: 0,
        }
    }

    pub fn state(&self) -> &GameState<R> {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Host callbacks seen so far (never reset)
    pub fn callbacks(&self) -> u64 {
        self.callbacks
    }

    /// Whether the simulation is still being stepped
    pub fn is_running(&self) -> bool {
        self.state.phase != GamePhase::GameOver
    }

    /// Read-only view for the renderer
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }

    /// Run exactly one step. Returns whether the simulation is still running.
    pub fn frame(&mut self, input: &TickInput) -> bool {
        self.callbacks += 1;
        let input = TickInput {
            start: input.start || self.pending_start,
            ..*input
        };
        self.pending_start = false;
        self.step(&input);
        self.is_running()
    }

    /// Fixed-timestep mode: run as many 60 Hz steps as `elapsed` covers
    ///
    /// The start edge is delivered to the first substep only. A callback that
    /// runs no substep keeps the edge for the next one that does. Returns the
    /// number of steps taken.
    pub fn advance(&mut self, elapsed: f32, input: &TickInput) -> u32 {
        self.callbacks += 1;
        self.accumulator += elapsed.clamp(0.0, MAX_FRAME_SECS);
        self.pending_start |= input.start;

        let mut input = *input;
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            input.start = self.pending_start;
            self.step(&input);
            self.pending_start = false;
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS {
            // Drop the backlog rather than spiralling
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        substeps
    }

    fn step(&mut self, input: &TickInput) {
        tick(&mut self.state, input);
        if self.state.new_best_this_tick() {
            self.store.save(self.state.best_score);
        }
    }
}
