//! Implementation of `sbb search`.

use std::process::ExitCode;

use sbb_index::{Searcher, SimpleAnalyzer, search_body};
use sbb_query::{
    QueryBuilder, normalize_date_query, normalize_letters_query, sanitize_term, split_quoted,
};
use serde_json::json;

use crate::cli::{
    args::SearchCommand,
    context::CommandContext,
    output::{dim, output_page, print_json, subheader},
};

/// Searches the index and prints one page of results.
pub fn run(ctx: &CommandContext, cmd: &SearchCommand) -> ExitCode {
    let term = cmd.term();
    if cmd.explain {
        return explain(ctx, &term, cmd.page, cmd.output.json);
    }

    let client = match ctx.client() {
        Ok(client) => client,
        Err(code) => return code,
    };
    let searcher = Searcher::new(&client, ctx.query_params(), ctx.search_options());

    match searcher.search(&term, cmd.page) {
        Ok(page) => output_page(&page, cmd.output.json),
        Err(e) => {
            eprintln!("error: search failed: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Prints how `term` is split and the request body a search would send.
///
/// Tokens come from the local analyzer, which approximates the service's; nothing is sent.
fn explain(ctx: &CommandContext, raw: &str, page: u32, json: bool) -> ExitCode {
    let term = sanitize_term(raw);
    let page = page.max(1);
    let split = split_quoted(&term);
    let date = normalize_date_query(&term);
    let letters = normalize_letters_query(&term);

    let builder = QueryBuilder::new(ctx.query_params());
    let body = match search_body(
        &builder,
        &SimpleAnalyzer,
        &term,
        page,
        ctx.config.search.page_size,
    ) {
        Ok(body) => body,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if json {
        return print_json(&json!({
            "term": term,
            "page": page,
            "unquoted": split.unquoted,
            "quoted": split.quoted,
            "date": date,
            "letters": letters,
            "body": body,
        }));
    }

    println!("{}", subheader("Term:"));
    println!("   {term}");
    println!();

    println!("{}", subheader("Unquoted:"));
    if split.unquoted.is_empty() {
        println!("   {}", dim("(none)"));
    } else {
        println!("   {}", split.unquoted);
    }
    println!("{}", subheader("Quoted:"));
    if split.quoted.is_empty() {
        println!("   {}", dim("(none)"));
    }
    for phrase in &split.quoted {
        println!("   \"{phrase}\"");
    }
    println!();

    println!("{}", subheader("Puzzle match:"));
    println!("   date:    {}", if date.is_empty() { "(none)" } else { date.as_str() });
    println!("   letters: {}", letters.as_deref().unwrap_or("(none)"));
    println!();

    let Some(body) = body else {
        println!("{}", dim("(nothing searchable, no request would be sent)"));
        return ExitCode::SUCCESS;
    };

    let body_str = match serde_json::to_string_pretty(&body) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            return ExitCode::FAILURE;
        }
    };
    println!("{}", subheader(&format!("Request body (page {page}):")));
    for line in body_str.lines() {
        println!("   {line}");
    }

    ExitCode::SUCCESS
}
