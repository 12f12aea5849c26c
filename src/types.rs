use serde::Deserialize;

pub const SOURCE_USER: &str = "user";
pub const SOURCE_BOT: &str = "bot";

/// One entry of the bot's message log.
///
/// Every field is optional on the wire: the log is appended to by an external
/// process and older entries may predate any given field. Unknown fields are
/// ignored here and preserved by the opaque (`serde_json::Value`) views.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct MessageEntry {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub timestamp: Option<f64>,
    #[serde(default)]
    pub channel_id: Option<u64>,
    #[serde(default)]
    pub thread_id: Option<u64>,
    #[serde(default)]
    pub delivered: Option<bool>,
    #[serde(default)]
    pub delivered_at: Option<f64>,
}

impl MessageEntry {
    pub fn is_user(&self) -> bool {
        self.source.as_deref() == Some(SOURCE_USER)
    }

    pub fn is_bot(&self) -> bool {
        self.source.as_deref() == Some(SOURCE_BOT)
    }

    /// Seconds since the epoch; entries without a timestamp sort first.
    pub fn timestamp_or_zero(&self) -> f64 {
        self.timestamp.unwrap_or(0.0)
    }

    pub fn content_trimmed(&self) -> &str {
        self.content.as_deref().unwrap_or("").trim()
    }

    /// A bot message that was logged but never made it to the channel.
    pub fn is_undelivered_bot(&self) -> bool {
        self.is_bot() && self.delivered == Some(false) && !self.content_trimmed().is_empty()
    }
}
