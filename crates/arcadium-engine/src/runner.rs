//! Obstacle-jumping runner game.
//!
//! A fixed-x agent runs along the ground while obstacles scroll in from the
//! right edge of the field. The agent's only action is a jump; touching any
//! obstacle ends the run. Score counts obstacles that scrolled fully off
//! the left edge.

use std::collections::VecDeque;

use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;

use crate::{
    seed::SimSeed,
    simulation::{FrameOutcome, SensorVector, Simulation},
};

pub const FIELD_WIDTH: f64 = 800.0;
pub const FIELD_HEIGHT: f64 = 400.0;
pub const GROUND_BAND: f64 = 50.0;
pub const AGENT_X: f64 = 100.0;
pub const AGENT_WIDTH: f64 = 50.0;
pub const AGENT_HEIGHT: f64 = 70.0;
pub const OBSTACLE_WIDTH: f64 = 40.0;

const GRAVITY: f64 = 0.8;
const JUMP_IMPULSE: f64 = -16.0;
const INITIAL_SPEED: f64 = 10.0;
const SPEED_INCREMENT: f64 = 0.4;
const SPEED_SCORE_INTERVAL: u32 = 10;
const OBSTACLE_MIN_HEIGHT: u32 = 40;
const OBSTACLE_MAX_HEIGHT: u32 = 80;
const SPAWN_BASE_GAP: f64 = 400.0;
const SPAWN_EXTRA_GAP: u32 = 350;

/// Ground-resting y coordinate of the agent's top edge.
const GROUND_Y: f64 = FIELD_HEIGHT - GROUND_BAND - AGENT_HEIGHT;

/// Sensor readings presented to the decision function each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunnerSensors {
    /// Horizontal distance from the agent to the next obstacle ahead, or
    /// [`FIELD_WIDTH`] when no obstacle is ahead.
    pub distance_to_obstacle: f64,
    /// Height of the next obstacle ahead, or 0 when no obstacle is ahead.
    pub obstacle_height: f64,
    /// Current scroll speed.
    pub speed: f64,
}

impl SensorVector for RunnerSensors {
    fn normalized(&self) -> [f64; 3] {
        [
            self.distance_to_obstacle / 800.0,
            self.obstacle_height / 80.0,
            self.speed / 20.0,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Obstacle {
    x: f64,
    height: f64,
}

impl Obstacle {
    fn top(self) -> f64 {
        FIELD_HEIGHT - GROUND_BAND - self.height
    }
}

/// The runner game state, stepped one frame at a time.
///
/// Frame order: gravity integration with ground clamp, obstacle spawn,
/// scroll with off-screen removal (scoring), sensor read
/// ([`begin_frame`](Simulation::begin_frame)); then jump trigger,
/// collision test, and speed ramp
/// ([`finish_frame`](Simulation::finish_frame)).
#[derive(Debug, Clone)]
pub struct RunnerGame {
    rng: Pcg32,
    agent_y: f64,
    velocity: f64,
    airborne: bool,
    obstacles: VecDeque<Obstacle>,
    speed: f64,
    spawn_threshold: f64,
    pending_speed_bumps: u32,
    score: u32,
    frames: u32,
}

impl RunnerGame {
    #[must_use]
    pub fn new(seed: SimSeed) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.to_bytes()),
            agent_y: GROUND_Y,
            velocity: 0.0,
            airborne: false,
            obstacles: VecDeque::new(),
            speed: INITIAL_SPEED,
            spawn_threshold: 0.0,
            pending_speed_bumps: 0,
            score: 0,
            frames: 0,
        }
    }

    fn integrate_gravity(&mut self) {
        self.velocity += GRAVITY;
        self.agent_y += self.velocity;
        if self.agent_y > GROUND_Y {
            self.agent_y = GROUND_Y;
            self.velocity = 0.0;
            self.airborne = false;
        }
    }

    /// Spawns at most one obstacle at the right edge when the trailing
    /// obstacle has scrolled past the spawn threshold. The threshold (base
    /// gap plus a random extra) is drawn once per spawn.
    fn spawn_obstacle(&mut self) {
        let eligible = self
            .obstacles
            .back()
            .is_none_or(|last| last.x < self.spawn_threshold);
        if !eligible {
            return;
        }
        let height = f64::from(
            self.rng
                .random_range(OBSTACLE_MIN_HEIGHT..=OBSTACLE_MAX_HEIGHT),
        );
        self.obstacles.push_back(Obstacle {
            x: FIELD_WIDTH,
            height,
        });
        let extra = f64::from(self.rng.random_range(0..SPAWN_EXTRA_GAP));
        self.spawn_threshold = FIELD_WIDTH - (SPAWN_BASE_GAP + extra);
    }

    fn scroll_obstacles(&mut self) {
        for obstacle in &mut self.obstacles {
            obstacle.x -= self.speed;
        }
        while let Some(front) = self.obstacles.front() {
            if front.x + OBSTACLE_WIDTH >= 0.0 {
                break;
            }
            self.obstacles.pop_front();
            self.score += 1;
            if self.score % SPEED_SCORE_INTERVAL == 0 {
                // The ramp takes effect after this frame's sensor read
                self.pending_speed_bumps += 1;
            }
        }
    }

    fn read_sensors(&self) -> RunnerSensors {
        let next = self
            .obstacles
            .iter()
            .find(|obstacle| obstacle.x + OBSTACLE_WIDTH > AGENT_X);
        let (distance_to_obstacle, obstacle_height) =
            next.map_or((FIELD_WIDTH, 0.0), |obstacle| {
                (obstacle.x - AGENT_X, obstacle.height)
            });
        RunnerSensors {
            distance_to_obstacle,
            obstacle_height,
            speed: self.speed,
        }
    }

    fn is_colliding(&self) -> bool {
        self.obstacles.iter().any(|obstacle| {
            AGENT_X < obstacle.x + OBSTACLE_WIDTH
                && AGENT_X + AGENT_WIDTH > obstacle.x
                && self.agent_y < obstacle.top() + obstacle.height
                && self.agent_y + AGENT_HEIGHT > obstacle.top()
        })
    }
}

impl Simulation for RunnerGame {
    type Sensors = RunnerSensors;

    fn begin_frame(&mut self) -> RunnerSensors {
        self.integrate_gravity();
        self.spawn_obstacle();
        self.scroll_obstacles();
        self.read_sensors()
    }

    fn finish_frame(&mut self, act: bool) -> FrameOutcome {
        if act && !self.airborne {
            self.velocity = JUMP_IMPULSE;
            self.airborne = true;
        }
        self.frames += 1;
        if self.is_colliding() {
            return FrameOutcome::Crashed;
        }
        self.speed += SPEED_INCREMENT * f64::from(self.pending_speed_bumps);
        self.pending_speed_bumps = 0;
        FrameOutcome::Running
    }

    fn score(&self) -> u32 {
        self.score
    }

    fn frames(&self) -> u32 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed(byte: u8) -> SimSeed {
        SimSeed::from_bytes([byte; 16])
    }

    fn run_without_jumping(game: &mut RunnerGame, max_frames: u32) -> FrameOutcome {
        for _ in 0..max_frames {
            let _ = game.begin_frame();
            if game.finish_frame(false).is_crashed() {
                return FrameOutcome::Crashed;
            }
        }
        FrameOutcome::Running
    }

    #[test]
    fn test_never_jumping_crashes_into_first_obstacle() {
        let mut game = RunnerGame::new(seed(7));
        let outcome = run_without_jumping(&mut game, 1000);
        assert_eq!(outcome, FrameOutcome::Crashed);
        // Every obstacle is at least 40 tall, so a grounded agent can
        // never pass one
        assert_eq!(game.score(), 0);
        assert!(game.frames() < 1000);
    }

    #[test]
    fn test_deterministic_given_seed_and_actions() {
        let mut a = RunnerGame::new(seed(42));
        let mut b = RunnerGame::new(seed(42));
        run_without_jumping(&mut a, 1000);
        run_without_jumping(&mut b, 1000);
        assert_eq!(a.score(), b.score());
        assert_eq!(a.frames(), b.frames());
    }

    #[test]
    fn test_jump_then_landing_resets_airborne_flag() {
        let mut game = RunnerGame::new(seed(3));
        let _ = game.begin_frame();
        let _ = game.finish_frame(true);
        assert!(game.airborne);
        assert!(game.velocity < 0.0);

        // -16 initial velocity under 0.8 gravity returns to ground well
        // within 50 frames
        for _ in 0..50 {
            let _ = game.begin_frame();
            if game.finish_frame(false).is_crashed() {
                break;
            }
            if !game.airborne {
                break;
            }
        }
        assert!(!game.airborne);
        assert_eq!(game.agent_y, GROUND_Y);
        assert_eq!(game.velocity, 0.0);
    }

    #[test]
    fn test_spawned_obstacles_keep_minimum_gap() {
        let mut game = RunnerGame::new(seed(11));
        let mut max_seen = 0;
        // Collision only happens in finish_frame, so driving begin_frame
        // alone observes the spawn stream indefinitely
        for _ in 0..500 {
            let _ = game.begin_frame();
            max_seen = max_seen.max(game.obstacles.len());
            let gaps_ok = game
                .obstacles
                .iter()
                .zip(game.obstacles.iter().skip(1))
                .all(|(a, b)| b.x - a.x >= SPAWN_BASE_GAP);
            assert!(gaps_ok, "obstacles closer than the base gap");
        }
        assert!(max_seen >= 2);
    }

    #[test]
    fn test_speed_ramps_once_per_score_decade() {
        let mut game = RunnerGame::new(seed(5));
        game.score = 9;
        game.obstacles.clear();
        // Force a removal on the next frame
        game.obstacles.push_back(Obstacle {
            x: -50.0,
            height: 40.0,
        });
        game.spawn_threshold = f64::MIN; // suppress respawns

        let sensors = game.begin_frame();
        assert_eq!(game.score(), 10);
        // The crossing frame still reports the pre-ramp speed
        assert_eq!(sensors.speed, INITIAL_SPEED);
        let _ = game.finish_frame(false);
        assert_eq!(game.speed, INITIAL_SPEED + SPEED_INCREMENT);

        // No further ramp while the score stays at 10
        let _ = game.begin_frame();
        let _ = game.finish_frame(false);
        assert_eq!(game.speed, INITIAL_SPEED + SPEED_INCREMENT);
    }

    #[test]
    fn test_sentinel_sensors_without_obstacle_ahead() {
        let mut game = RunnerGame::new(seed(2));
        let _ = game.begin_frame();
        game.obstacles.clear();
        let sensors = game.read_sensors();
        assert_eq!(sensors.distance_to_obstacle, FIELD_WIDTH);
        assert_eq!(sensors.obstacle_height, 0.0);
    }

    #[test]
    fn test_normalized_sensor_divisors() {
        let sensors = RunnerSensors {
            distance_to_obstacle: 400.0,
            obstacle_height: 40.0,
            speed: 10.0,
        };
        assert_eq!(sensors.normalized(), [0.5, 0.5, 0.5]);
    }
}
