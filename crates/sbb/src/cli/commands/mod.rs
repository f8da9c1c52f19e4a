//! Command implementations and dispatch.

pub mod check;
pub mod config;
pub mod import;
pub mod init;
pub mod search;
pub mod upsert;

use std::process::ExitCode;

use super::{args::Commands, context::CommandContext};

/// Dispatches to the selected subcommand.
pub fn run(command: Commands, ctx: &CommandContext) -> ExitCode {
    match command {
        Commands::Search(cmd) => search::run(ctx, &cmd),
        Commands::UpsertPuzzle(cmd) => upsert::run_puzzle(ctx, &cmd),
        Commands::UpsertClue(cmd) => upsert::run_clue(ctx, &cmd),
        Commands::Import(cmd) => import::run(ctx, &cmd),
        Commands::Init(cmd) => init::run(ctx, &cmd),
        Commands::Check => check::run(ctx),
        Commands::Config => config::run(ctx),
    }
}
