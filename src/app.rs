use std::env;

use crate::msgview::{cmd_history, cmd_new, cmd_tail, cmd_undelivered, cmd_where};

const APP_NAME: &str = "msgrs";
const APP_DESC: &str = "Read-only inspector for the discord_bot message log";
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Canonical view defaults.
pub const DEFAULT_TAIL_LIMIT: usize = 5;
pub const DEFAULT_HISTORY_LIMIT: usize = 20;

fn print_help() {
    println!("{APP_NAME} - {APP_DESC}");
    println!();
    println!("Usage:");
    println!("  {APP_NAME} [N]");
    println!("  {APP_NAME} <command> [args]");
    println!();
    println!("Commands:");
    println!("  [N]                Pretty-print last N log entries (default 5; 0 prints [])");
    println!("  tail [N]           Explicit form of the default command");
    println!("  history [N]        Last N user messages in timestamp order (default 20; 0 = all)");
    println!("  new [SINCE_TS]     User messages newer than SINCE_TS epoch seconds (default 0)");
    println!("  undelivered        Bot messages logged but never delivered, oldest first");
    println!("  where              Show resolved messages-file path");
    println!("  version            Print tool version");
    println!("  help               Print this help");
    println!();
    println!("Reads <cwd>/discord_bot/messages.json; never writes it.");
    println!("An unparsable N falls back to the default rather than erroring.");
}

fn parse_n(args: &[String], idx: usize, default: usize) -> usize {
    args.get(idx)
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(default)
}

fn parse_since(args: &[String], idx: usize) -> f64 {
    args.get(idx)
        .and_then(|v| v.parse::<f64>().ok())
        .unwrap_or(0.0)
}

pub fn run() -> i32 {
    let args: Vec<String> = env::args().collect();
    dispatch(&args)
}

fn dispatch(args: &[String]) -> i32 {
    match args.get(1).map(String::as_str).unwrap_or("") {
        "help" | "--help" | "-h" => {
            print_help();
            0
        }
        "version" | "--version" => {
            println!("{APP_NAME} {APP_VERSION}");
            0
        }
        "tail" => cmd_tail(parse_n(args, 2, DEFAULT_TAIL_LIMIT)),
        "history" => cmd_history(parse_n(args, 2, DEFAULT_HISTORY_LIMIT)),
        "new" => cmd_new(parse_since(args, 2)),
        "undelivered" => cmd_undelivered(),
        "where" => cmd_where(),
        // Anything else is the bare [N] form; a non-numeric argument keeps
        // the default limit rather than erroring.
        _ => cmd_tail(parse_n(args, 1, DEFAULT_TAIL_LIMIT)),
    }
}
