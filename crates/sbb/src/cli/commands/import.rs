//! Implementation of `sbb import`.

use std::process::ExitCode;

use sbb_index::{Importer, Indexer};

use crate::cli::{
    args::ImportCommand,
    context::CommandContext,
    output::{subheader, warning},
};

/// Imports scraped puzzle files and prints a summary.
///
/// Exits with failure if any file or document could not be imported.
pub fn run(ctx: &CommandContext, cmd: &ImportCommand) -> ExitCode {
    let client = match ctx.client() {
        Ok(client) => client,
        Err(code) => return code,
    };
    let importer = Importer::new(Indexer::new(&client, ctx.retry_policy()));

    let stats = match importer.import_files(&cmd.files) {
        Ok(stats) => stats,
        Err(e) => {
            eprintln!("error: import aborted: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!("{}", subheader("Imported:"));
    println!("   files:   {}", stats.files);
    println!("   puzzles: {}", stats.puzzles);
    println!("   clues:   {}", stats.clues);

    if stats.skipped_files == 0 && stats.failed == 0 {
        return ExitCode::SUCCESS;
    }

    println!();
    if stats.skipped_files > 0 {
        println!(
            "   {}",
            warning(&format!("{} file(s) could not be read", stats.skipped_files))
        );
    }
    if stats.failed > 0 {
        println!(
            "   {}",
            warning(&format!("{} document(s) failed", stats.failed))
        );
    }
    ExitCode::FAILURE
}
