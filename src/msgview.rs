use serde_json::Value;
use std::path::PathBuf;

use crate::logread::{load_entries, load_values, load_values_tolerant, tail_slice};
use crate::paths::resolve_messages_file;
use crate::types::MessageEntry;

fn resolved_log_file() -> Option<PathBuf> {
    match resolve_messages_file() {
        Ok(p) => Some(p),
        Err(e) => {
            eprintln!("msgrs: {e}");
            None
        }
    }
}

fn print_pretty(values: &[Value]) {
    match serde_json::to_string_pretty(values) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Error reading messages file: {e}"),
    }
}

/// `msgrs [N]` / `msgrs tail [N]`: last N raw entries, pretty-printed.
///
/// Exit code is 0 on every path, including read and parse failures; callers
/// treat a non-empty stderr, not the status, as the failure signal.
pub fn cmd_tail(limit: usize) -> i32 {
    let Some(log_file) = resolved_log_file() else {
        return 0;
    };
    if !log_file.exists() {
        println!("No messages file found.");
        return 0;
    }
    match load_values(&log_file) {
        Ok(values) => print_pretty(tail_slice(&values, limit)),
        Err(e) => eprintln!("Error reading messages file: {e}"),
    }
    0
}

/// Entries paired with their typed view, for filters that must preserve the
/// raw object (unknown fields included) in the output.
fn typed_pairs(values: Vec<Value>) -> Vec<(MessageEntry, Value)> {
    values
        .into_iter()
        .filter_map(|v| {
            let entry: MessageEntry = serde_json::from_value(v.clone()).ok()?;
            Some((entry, v))
        })
        .collect()
}

/// User messages in timestamp order; the trailing `limit` of them, or all
/// when `limit` is 0.
pub fn user_history(values: Vec<Value>, limit: usize) -> Vec<Value> {
    let mut pairs: Vec<(MessageEntry, Value)> = typed_pairs(values)
        .into_iter()
        .filter(|(e, _)| e.is_user())
        .collect();
    pairs.sort_by(|a, b| a.0.timestamp_or_zero().total_cmp(&b.0.timestamp_or_zero()));
    let start = if limit > 0 {
        pairs.len().saturating_sub(limit)
    } else {
        0
    };
    pairs.drain(..start);
    pairs.into_iter().map(|(_, v)| v).collect()
}

/// Bot messages that were logged but never delivered, oldest first.
pub fn undelivered_bot(values: Vec<Value>) -> Vec<Value> {
    let mut pairs: Vec<(MessageEntry, Value)> = typed_pairs(values)
        .into_iter()
        .filter(|(e, _)| e.is_undelivered_bot())
        .collect();
    pairs.sort_by(|a, b| a.0.timestamp_or_zero().total_cmp(&b.0.timestamp_or_zero()));
    pairs.into_iter().map(|(_, v)| v).collect()
}

/// User messages strictly newer than `since` (seconds since the epoch),
/// in log order.
pub fn new_user_messages(entries: Vec<MessageEntry>, since: f64) -> Vec<MessageEntry> {
    entries
        .into_iter()
        .filter(|e| e.is_user() && e.timestamp_or_zero() > since)
        .collect()
}

pub fn cmd_history(limit: usize) -> i32 {
    let Some(log_file) = resolved_log_file() else {
        return 0;
    };
    match load_values_tolerant(&log_file) {
        Ok(values) => print_pretty(&user_history(values, limit)),
        Err(e) => eprintln!("Error reading messages file: {e}"),
    }
    0
}

pub fn cmd_undelivered() -> i32 {
    let Some(log_file) = resolved_log_file() else {
        return 0;
    };
    match load_values_tolerant(&log_file) {
        Ok(values) => print_pretty(&undelivered_bot(values)),
        Err(e) => eprintln!("Error reading messages file: {e}"),
    }
    0
}

fn format_ts(ts: f64) -> String {
    match chrono::DateTime::from_timestamp(ts.trunc() as i64, 0) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        None => format!("ts={ts}"),
    }
}

pub fn cmd_new(since: f64) -> i32 {
    let Some(log_file) = resolved_log_file() else {
        return 0;
    };
    let entries = match load_entries(&log_file) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Error reading messages file: {e}");
            return 0;
        }
    };
    let fresh = new_user_messages(entries, since);
    if fresh.is_empty() {
        println!("(no new messages since {since})");
        return 0;
    }
    println!("--- {} NEW MESSAGE(S) FROM USER ---", fresh.len());
    for m in &fresh {
        println!(
            "[{}] User: {}",
            format_ts(m.timestamp_or_zero()),
            m.content_trimmed()
        );
    }
    println!("--- end of new messages ---");
    0
}

pub fn cmd_where() -> i32 {
    let Some(log_file) = resolved_log_file() else {
        return 0;
    };
    println!("messages_file: {}", log_file.display());
    println!(
        "exists: {}",
        if log_file.exists() { "true" } else { "false" }
    );
    0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn msg(source: &str, ts: f64, content: &str) -> Value {
        json!({"source": source, "timestamp": ts, "content": content})
    }

    #[test]
    fn history_filters_sorts_and_limits() {
        let values = vec![
            msg("user", 3.0, "c"),
            msg("bot", 2.5, "ignored"),
            msg("user", 1.0, "a"),
            msg("user", 2.0, "b"),
        ];
        let out = user_history(values.clone(), 2);
        assert_eq!(out, vec![msg("user", 2.0, "b"), msg("user", 3.0, "c")]);
        let all = user_history(values, 0);
        assert_eq!(all.len(), 3);
        assert_eq!(all[0], msg("user", 1.0, "a"));
    }

    #[test]
    fn history_preserves_unknown_fields() {
        let raw = json!({"source": "user", "timestamp": 1.0, "content": "a", "extra": {"k": 1}});
        let out = user_history(vec![raw.clone()], 5);
        assert_eq!(out, vec![raw]);
    }

    #[test]
    fn undelivered_keeps_only_failed_bot_messages() {
        let values = vec![
            json!({"source": "bot", "timestamp": 2.0, "content": "late", "delivered": false}),
            json!({"source": "bot", "timestamp": 1.0, "content": "early", "delivered": false}),
            json!({"source": "bot", "timestamp": 3.0, "content": "sent", "delivered": true}),
            json!({"source": "bot", "timestamp": 4.0, "content": "  ", "delivered": false}),
            json!({"source": "user", "timestamp": 5.0, "content": "hi", "delivered": false}),
        ];
        let out = undelivered_bot(values);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].get("content"), Some(&json!("early")));
        assert_eq!(out[1].get("content"), Some(&json!("late")));
    }

    #[test]
    fn new_messages_use_strict_comparison() {
        let entries: Vec<MessageEntry> = vec![
            serde_json::from_value(msg("user", 10.0, "at boundary")).expect("entry"),
            serde_json::from_value(msg("user", 10.5, "after")).expect("entry"),
            serde_json::from_value(msg("bot", 11.0, "bot noise")).expect("entry"),
        ];
        let fresh = new_user_messages(entries, 10.0);
        assert_eq!(fresh.len(), 1);
        assert_eq!(fresh[0].content_trimmed(), "after");
    }

    #[test]
    fn format_ts_renders_utc() {
        assert_eq!(format_ts(0.0), "1970-01-01 00:00:00 UTC");
        assert_eq!(format_ts(1_700_000_000.0), "2023-11-14 22:13:20 UTC");
    }
}
