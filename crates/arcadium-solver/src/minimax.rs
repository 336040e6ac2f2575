//! Exhaustive minimax search.
//!
//! The search evaluates every terminal continuation from the root symbol's
//! fixed perspective: +1 for a root-symbol win, -1 for a loss, 0 for a
//! draw. No alpha-beta pruning is used, so tie-breaking is stable: among
//! equally scored moves the lowest cell index wins.

use arrayvec::ArrayVec;

use crate::board::{Board, CELL_COUNT, Symbol};

/// Error returned when [`best_move`] is called on a board with no legal
/// move.
///
/// Callers must supply a non-terminal position: a board that is full or
/// already holds a completed line violates the contract.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("board has no legal move")]
pub struct NoLegalMoveError;

/// Computes the optimal cell for `symbol` to play on `board`.
///
/// Deterministic: identical board and symbol always return the identical
/// index. Ties between equally scored moves resolve to the lowest cell
/// index.
pub fn best_move(board: &Board, symbol: Symbol) -> Result<usize, NoLegalMoveError> {
    if board.is_terminal() {
        return Err(NoLegalMoveError);
    }

    let mut moves = ArrayVec::<(i8, usize), CELL_COUNT>::new();
    for index in board.empty_cells() {
        let score = search(board.with(index, symbol), symbol.opponent(), symbol);
        moves.push((score, index));
    }

    // Strict comparison keeps the first (lowest-index) occurrence on ties
    let mut best = moves[0];
    for candidate in moves.iter().skip(1) {
        if candidate.0 > best.0 {
            best = *candidate;
        }
    }
    Ok(best.1)
}

/// Scores a position with `mover` to play, from `root`'s perspective.
///
/// The root symbol threads unchanged through the recursion: the
/// maximizing role always belongs to it, not to whichever symbol is to
/// move. Each recursive call operates on its own board copy, so sibling
/// branches never observe each other's placements.
fn search(board: Board, mover: Symbol, root: Symbol) -> i8 {
    if let Some(winner) = board.winner() {
        return if winner == root { 1 } else { -1 };
    }
    if board.is_full() {
        return 0;
    }

    let mut best: Option<i8> = None;
    for index in board.empty_cells() {
        let score = search(board.with(index, mover), mover.opponent(), root);
        best = Some(match best {
            None => score,
            Some(current) if mover == root => current.max(score),
            Some(current) => current.min(score),
        });
    }
    best.expect("non-terminal board has at least one continuation")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_winning_move_is_taken() {
        // X completes the top row at index 2
        let board: Board = "XX.......".parse().unwrap();
        assert_eq!(best_move(&board, Symbol::X).unwrap(), 2);
    }

    #[test]
    fn test_losing_threat_is_blocked() {
        // O must block X's top row at index 2
        let board: Board = "XX....O..".parse().unwrap();
        assert_eq!(best_move(&board, Symbol::O).unwrap(), 2);
    }

    #[test]
    fn test_win_preferred_over_block() {
        // O can win the middle row outright instead of blocking
        let board: Board = "XX.OO.X..".parse().unwrap();
        assert_eq!(best_move(&board, Symbol::O).unwrap(), 5);
    }

    #[test]
    fn test_returns_empty_cell_and_is_deterministic() {
        let board: Board = "X...O...X".parse().unwrap();
        let first = best_move(&board, Symbol::O).unwrap();
        assert!(board.cell(first).is_none());
        for _ in 0..5 {
            assert_eq!(best_move(&board, Symbol::O).unwrap(), first);
        }
    }

    #[test]
    fn test_no_legal_move_on_full_board() {
        let board: Board = "XOXXOOOXX".parse().unwrap();
        assert!(best_move(&board, Symbol::X).is_err());
    }

    #[test]
    fn test_no_legal_move_on_decided_board() {
        let board: Board = "XXX.OO...".parse().unwrap();
        assert!(best_move(&board, Symbol::O).is_err());
    }

    #[test]
    fn test_self_play_from_empty_board_draws() {
        let mut board = Board::EMPTY;
        let mut mover = Symbol::X;
        while !board.is_terminal() {
            let index = best_move(&board, mover).unwrap();
            board = board.with(index, mover);
            mover = mover.opponent();
        }
        assert_eq!(board.winner(), None, "optimal self-play must draw");
        assert!(board.is_full());
    }

    #[test]
    fn test_tie_break_picks_lowest_index() {
        // Every first move from the empty board scores a draw for the
        // mover, so the first enumerated cell wins the tie
        assert_eq!(best_move(&Board::EMPTY, Symbol::X).unwrap(), 0);
    }
}
