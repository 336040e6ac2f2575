//! Session evaluation: running a policy through a full game to a fitness
//! score.
//!
//! A session is one simulation run: the evaluator calls the policy once
//! per frame until the agent crashes or the frame budget runs out. The
//! resulting [`SessionOutcome`] carries the fitness the external optimizer
//! ranks candidate policies by.
//!
//! Frame-budget exhaustion is a normal termination path, never an error;
//! the only error a session can produce is malformed policy output.

use arcadium_engine::{FlightGame, RunnerGame, SensorVector as _, SimSeed, Simulation};
use serde::{Deserialize, Serialize};

use crate::policy::{Policy, PolicyOutputError, decide};

/// Default hard bound on frames per session.
pub const DEFAULT_FRAME_LIMIT: u32 = 1000;

/// How a session ended.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant,
)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// The agent died mid-run.
    Crashed,
    /// The frame budget was exhausted with the agent still alive.
    FrameBudget,
}

/// Result of one evaluated session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionOutcome {
    /// Obstacles or gaps fully passed; the scalar the optimizer consumes.
    pub fitness: u32,
    /// Frames executed before termination.
    pub frames: u32,
    pub termination: Termination,
}

/// Runs policies through game sessions under a fixed frame budget.
#[derive(Debug, Clone, Copy)]
pub struct SessionEvaluator {
    frame_limit: u32,
}

impl Default for SessionEvaluator {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_LIMIT)
    }
}

impl SessionEvaluator {
    #[must_use]
    pub const fn new(frame_limit: u32) -> Self {
        Self { frame_limit }
    }

    #[must_use]
    pub const fn frame_limit(&self) -> u32 {
        self.frame_limit
    }

    /// Runs a policy through any [`Simulation`] until death or the frame
    /// budget.
    pub fn run<G, P>(&self, mut game: G, policy: &P) -> Result<SessionOutcome, PolicyOutputError>
    where
        G: Simulation,
        P: Policy + ?Sized,
    {
        for _ in 0..self.frame_limit {
            let sensors = game.begin_frame();
            let act = decide(policy, &sensors.normalized())?;
            if game.finish_frame(act).is_crashed() {
                return Ok(SessionOutcome {
                    fitness: game.score(),
                    frames: game.frames(),
                    termination: Termination::Crashed,
                });
            }
        }
        Ok(SessionOutcome {
            fitness: game.score(),
            frames: game.frames(),
            termination: Termination::FrameBudget,
        })
    }

    /// Evaluates a policy on the runner game.
    pub fn run_runner<P>(
        &self,
        policy: &P,
        seed: SimSeed,
    ) -> Result<SessionOutcome, PolicyOutputError>
    where
        P: Policy + ?Sized,
    {
        self.run(RunnerGame::new(seed), policy)
    }

    /// Evaluates a policy on the flight game.
    pub fn run_flight<P>(
        &self,
        policy: &P,
        seed: SimSeed,
    ) -> Result<SessionOutcome, PolicyOutputError>
    where
        P: Policy + ?Sized,
    {
        self.run(FlightGame::new(seed), policy)
    }
}
