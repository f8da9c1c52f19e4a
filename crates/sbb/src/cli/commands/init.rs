//! Implementation of `sbb init`.

use std::{
    fs,
    io::{self, Write},
    path::Path,
    process::ExitCode,
};

use sbb_config::{CONFIG_FILENAME, local_template};

use crate::cli::{args::InitCommand, context::CommandContext, output::subheader};

/// Directory holding the API key named by the template.
const SECRETS_PATTERN: &str = "secrets/";

/// Initializes a `.sbb.toml` configuration file in the current directory.
pub fn run(ctx: &CommandContext, cmd: &InitCommand) -> ExitCode {
    let config_path = ctx.cwd.join(CONFIG_FILENAME);

    if config_path.exists() && !cmd.force {
        eprintln!(
            "error: configuration file already exists: {}",
            config_path.display()
        );
        eprintln!("use --force to overwrite");
        return ExitCode::FAILURE;
    }

    let template = local_template();
    if let Err(e) = fs::write(&config_path, &template) {
        eprintln!("error: failed to write {}: {e}", config_path.display());
        return ExitCode::FAILURE;
    }

    println!("Created {}", config_path.display());
    println!();
    println!("{}", subheader("Configuration written:"));
    for line in template.lines() {
        println!("   {line}");
    }

    if let Err(e) = update_gitignore(&config_path) {
        eprintln!("warning: could not update .gitignore: {e}");
    }

    ExitCode::SUCCESS
}

/// Adds `secrets/` to `.gitignore` if it exists and doesn't already contain it.
fn update_gitignore(config_path: &Path) -> io::Result<()> {
    let Some(parent) = config_path.parent() else {
        return Ok(());
    };

    let gitignore_path = parent.join(".gitignore");

    if !gitignore_path.exists() {
        return Ok(());
    }

    let contents = fs::read_to_string(&gitignore_path)?;

    for line in contents.lines() {
        let trimmed = line.trim();
        if trimmed == SECRETS_PATTERN || trimmed == "secrets" {
            return Ok(());
        }
    }

    let mut file = fs::OpenOptions::new().append(true).open(&gitignore_path)?;

    if !contents.is_empty() && !contents.ends_with('\n') {
        writeln!(file)?;
    }

    writeln!(file, "{SECRETS_PATTERN}")?;
    println!("Added {SECRETS_PATTERN} to .gitignore");

    Ok(())
}
