//! Implementation of `sbb upsert-puzzle` and `sbb upsert-clue`.

use std::process::ExitCode;

use sbb_index::{IndexError, Indexer, clue_url};

use crate::cli::{
    args::{UpsertClueCommand, UpsertPuzzleCommand},
    context::CommandContext,
};

/// Upserts one puzzle document and prints its id.
pub fn run_puzzle(ctx: &CommandContext, cmd: &UpsertPuzzleCommand) -> ExitCode {
    let client = match ctx.client() {
        Ok(client) => client,
        Err(code) => return code,
    };
    let indexer = Indexer::new(&client, ctx.retry_policy());
    report(indexer.upsert_puzzle(&cmd.date, &cmd.center, &cmd.outer))
}

/// Upserts one clue document and prints its id.
///
/// Without `--url`, the clue's page path is derived from its text.
pub fn run_clue(ctx: &CommandContext, cmd: &UpsertClueCommand) -> ExitCode {
    let url = cmd.url.clone().unwrap_or_else(|| clue_url(&cmd.text));
    let client = match ctx.client() {
        Ok(client) => client,
        Err(code) => return code,
    };
    let indexer = Indexer::new(&client, ctx.retry_policy());
    report(indexer.upsert_clue(&url, &cmd.word, &cmd.text, &cmd.date))
}

/// Prints the upserted id or the error.
fn report(result: Result<String, IndexError>) -> ExitCode {
    match result {
        Ok(id) => {
            println!("Upserted {id}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: upsert failed: {e}");
            ExitCode::FAILURE
        }
    }
}
