use crate::error::{MsgError, MsgResult};
use crate::types::MessageEntry;
use fs2::FileExt;
use serde_json::Value;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Read the whole log under a shared advisory lock.
///
/// The bot process takes an exclusive lock while rewriting the file; holding
/// the shared lock here means we never observe a half-written array.
pub fn read_log(path: &Path) -> MsgResult<String> {
    let mut f = File::open(path)
        .map_err(|e| MsgError::io(format!("cannot open {}", path.display()), e))?;
    f.lock_shared()
        .map_err(|e| MsgError::io(format!("failed locking {}", path.display()), e))?;
    let mut raw = String::new();
    let read_res = f
        .read_to_string(&mut raw)
        .map_err(|e| MsgError::io(format!("failed reading {}", path.display()), e));
    let _ = f.unlock();
    read_res?;
    Ok(raw)
}

fn json_type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Parse the raw log text as a JSON array of opaque values.
///
/// A non-array root is a typed error rather than undefined slice behavior.
pub fn parse_values(raw: &str, path: &Path) -> MsgResult<Vec<Value>> {
    let parsed: Value = serde_json::from_str(raw)
        .map_err(|e| MsgError::json(format!("failed parsing {}", path.display()), e))?;
    match parsed {
        Value::Array(values) => Ok(values),
        other => Err(MsgError::not_an_array(path, json_type_name(&other))),
    }
}

pub fn load_values(path: &Path) -> MsgResult<Vec<Value>> {
    let raw = read_log(path)?;
    parse_values(&raw, path)
}

/// Trailing `limit` elements in original order; `limit = 0` selects nothing.
pub fn tail_slice(values: &[Value], limit: usize) -> &[Value] {
    &values[values.len().saturating_sub(limit)..]
}

/// Tolerant load for the filtered views.
///
/// Follows the log's writer-side read semantics: a missing or blank file is
/// an empty log. Parse failures and non-array roots still propagate.
pub fn load_values_tolerant(path: &Path) -> MsgResult<Vec<Value>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let raw = read_log(path)?;
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    parse_values(&raw, path)
}

/// Typed variant of [`load_values_tolerant`]; elements that are not message
/// objects are skipped, with a one-line warning so silent corruption still
/// surfaces somewhere.
pub fn load_entries(path: &Path) -> MsgResult<Vec<MessageEntry>> {
    let values = load_values_tolerant(path)?;
    let total = values.len();
    let entries: Vec<MessageEntry> = values
        .into_iter()
        .filter_map(|v| serde_json::from_value(v).ok())
        .collect();
    let skipped = total - entries.len();
    if skipped > 0 {
        eprintln!(
            "msgrs: warning: skipped {skipped} non-message entries in {}",
            path.display()
        );
    }
    Ok(entries)
}
