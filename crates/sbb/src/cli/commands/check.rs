//! Implementation of `sbb check`.

use std::process::ExitCode;

use sbb_config::{ConfigWarning, discover_config_files};

use crate::cli::{
    context::CommandContext,
    output::{dim, subheader, warning},
};

/// Shows configuration files, the effective index target, and validation warnings.
///
/// Exits with failure when there are warnings. Never contacts the index service.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config_files = discover_config_files(&ctx.cwd);
    if config_files.is_empty() {
        println!("{}", dim("No configuration files found."));
        println!();
        println!(
            "Run {} to create a configuration file.",
            subheader("sbb init")
        );
        return ExitCode::SUCCESS;
    }

    println!("{}", subheader("Config files:"));
    for path in &config_files {
        println!("   {}", path.display());
    }
    println!();

    let config = &ctx.config;

    println!("{}", subheader("Index:"));
    println!("   {} {}", config.index.host, dim(&format!("({})", config.index.name)));
    match &config.index.api_key_file {
        Some(path) => println!("   key file: {}", path.display()),
        None => println!("   key file: {}", dim("(none)")),
    }
    println!();

    let warnings = config.validate();
    if warnings.is_empty() {
        println!("No issues found.");
        return ExitCode::SUCCESS;
    }

    println!("{}", subheader(&format!("Warnings ({}):", warnings.len())));
    for w in &warnings {
        println!("   {}", warning(&w.to_string()));
    }
    println!();

    print_hints(&warnings);

    ExitCode::FAILURE
}

/// Prints hints for resolving common warnings.
fn print_hints(warnings: &[ConfigWarning]) {
    for w in warnings {
        match w {
            ConfigWarning::NoApiKey => {
                println!("{}", dim("Hint: set api_key_file under [index] in .sbb.toml"));
            }
            ConfigWarning::ApiKeyFileMissing { .. } => {
                println!(
                    "{}",
                    dim("Hint: api_key_file is relative to the .sbb.toml that sets it")
                );
            }
            ConfigWarning::HostNotHttp { .. } => {
                println!("{}", dim("Hint: host needs a scheme, e.g. http://127.0.0.1:9200"));
            }
            _ => {}
        }
    }
}
