//! Deterministic, frame-stepped simulations of two side-scrolling arcade
//! games, used to score candidate control policies.
//!
//! Both games follow the same frame contract (see [`Simulation`]):
//!
//! 1. [`begin_frame`](Simulation::begin_frame) advances the parts of the
//!    frame that precede the agent's decision and returns the sensor
//!    readings for that decision
//! 2. The caller converts the sensors into a binary action (the policy
//!    lives outside this crate)
//! 3. [`finish_frame`](Simulation::finish_frame) applies the action and
//!    completes the frame, reporting whether the agent survived
//!
//! All randomness (obstacle placement) comes from a Pcg32 generator
//! initialized from a [`SimSeed`], so identical seed plus identical action
//! sequence always reproduces the same run.

pub use self::{
    flight::{FlightGame, FlightSensors},
    runner::{RunnerGame, RunnerSensors},
    seed::*,
    simulation::*,
};

pub mod flight;
pub mod runner;
mod seed;
mod simulation;
