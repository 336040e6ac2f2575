use std::path::PathBuf;

use anyhow::Context as _;
use arcadium_solver::{Board, Symbol, best_move};
use serde::Serialize;

use crate::util::Output;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct BestMoveArg {
    /// Board as 9 characters in row-major order: X, O, or . for empty
    #[arg(long)]
    board: String,
    /// Symbol to move
    #[arg(long, value_enum)]
    symbol: SymbolArg,
    /// Output file path (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
enum SymbolArg {
    X,
    O,
}

impl From<SymbolArg> for Symbol {
    fn from(arg: SymbolArg) -> Self {
        match arg {
            SymbolArg::X => Symbol::X,
            SymbolArg::O => Symbol::O,
        }
    }
}

#[derive(Debug, Serialize)]
struct BestMoveReport {
    board: String,
    symbol: SymbolArg,
    best_move: usize,
}

pub(crate) fn run(arg: &BestMoveArg) -> anyhow::Result<()> {
    let board: Board = arg
        .board
        .parse()
        .with_context(|| format!("failed to parse board {:?}", arg.board))?;
    let index = best_move(&board, arg.symbol.into())
        .with_context(|| format!("no legal move on board {board}"))?;

    let report = BestMoveReport {
        board: board.to_string(),
        symbol: arg.symbol,
        best_move: index,
    };
    Output::save_json(&report, arg.output.clone())
}
