//! Rendering and JSON serialization for CLI output.

use std::process::ExitCode;

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use sbb_index::{SearchItem, SearchPage};
use serde::Serialize;

/// ANSI escape codes for terminal styling.
mod colors {
    /// Bold text.
    pub const BOLD: &str = "\x1b[1m";
    /// Dimmed text.
    pub const DIM: &str = "\x1b[2m";
    /// Yellow text.
    pub const YELLOW: &str = "\x1b[33m";
    /// Reset all styles.
    pub const RESET: &str = "\x1b[0m";
}

/// Formats text as a subheader (bold).
pub fn subheader(text: &str) -> String {
    format!("{}{}{}", colors::BOLD, text, colors::RESET)
}

/// Formats text as dimmed/less important.
pub fn dim(text: &str) -> String {
    format!("{}{}{}", colors::DIM, text, colors::RESET)
}

/// Formats text as a warning (yellow).
pub fn warning(text: &str) -> String {
    format!("{}{}{}", colors::YELLOW, text, colors::RESET)
}

/// Prints `value` as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json_str) => {
            println!("{json_str}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Outputs one page of search results as JSON or as a table with page links.
pub fn output_page(page: &SearchPage, json: bool) -> ExitCode {
    if json {
        return print_json(page);
    }

    if page.is_empty() {
        println!("{}", dim("No results found."));
        return ExitCode::SUCCESS;
    }

    println!("{}", results_table(&page.items));
    println!();

    let pagination = &page.pagination;
    println!("{}", subheader(&format!("Page {}", pagination.page)));
    if let Some(prev) = pagination.previous_page() {
        println!("   previous: {}", dim(&pagination.page_link(&page.term, prev)));
    }
    if let Some(next) = pagination.next_page() {
        println!("   next:     {}", dim(&pagination.page_link(&page.term, next)));
    }

    ExitCode::SUCCESS
}

/// Builds the results table, best match first.
fn results_table(items: &[SearchItem]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Score", "Type", "Date", "Match", "URL"]);

    for item in items {
        let (kind, matched) = match item {
            SearchItem::Clue(clue) => ("clue", format!("{}: {}", clue.word, clue.text)),
            SearchItem::Puzzle(puzzle) => (
                "puzzle",
                format!("{} + {}", puzzle.center_letter, puzzle.outer_letters),
            ),
        };
        table.add_row(vec![
            Cell::new(format!("{:.1}", item.score())),
            Cell::new(kind),
            Cell::new(item.date().to_string()),
            Cell::new(matched),
            Cell::new(item.url()),
        ]);
    }

    table
}
