use std::env;
use std::path::PathBuf;

/// Directory the bot process writes its log under, relative to the cwd.
pub const MESSAGES_DIR: &str = "discord_bot";
pub const MESSAGES_FILE_NAME: &str = "messages.json";

/// Resolve the message log as `<cwd>/discord_bot/messages.json`.
///
/// The working directory is the only implicit input; the path is not
/// configurable via flags or environment. Library code takes the resolved
/// path as a parameter so tests can point at a fixture instead.
pub fn resolve_messages_file() -> Result<PathBuf, String> {
    match env::current_dir() {
        Ok(cwd) => Ok(cwd.join(MESSAGES_DIR).join(MESSAGES_FILE_NAME)),
        Err(e) => Err(format!("cannot determine working directory: {e}")),
    }
}
