use clap::{Parser, Subcommand};

use self::{best_move::BestMoveArg, simulate::SimulateArg};

mod best_move;
mod simulate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Run a stub policy through a game simulation
    Simulate(#[clap(flatten)] SimulateArg),
    /// Compute the optimal move for a board position
    BestMove(#[clap(flatten)] BestMoveArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Simulate(arg) => simulate::run(&arg),
        Mode::BestMove(arg) => best_move::run(&arg),
    }
}
