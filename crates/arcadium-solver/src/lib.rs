//! Perfect-play decision engine for the 3x3 two-symbol board game.
//!
//! [`best_move`] exhaustively searches every continuation of a position
//! and returns the game-theoretically optimal cell for the symbol to move.
//! It is fully deterministic: identical board and symbol always produce
//! the identical move.

pub use self::{board::*, minimax::*};

pub mod board;
pub mod minimax;
