//! Pushover message types.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Message priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Priority {
    /// No notification at all.
    Lowest,
    /// Pop-up without sound.
    Low,
    /// Sound, vibration and pop-up.
    #[default]
    Normal,
    /// Like normal, but bypasses quiet hours.
    High,
    /// Repeated until acknowledged. Requires retry and expire.
    Emergency,
}

impl Priority {
    /// Wire value of this priority.
    pub fn value(&self) -> i32 {
        match self {
            Self::Lowest => -2,
            Self::Low => -1,
            Self::Normal => 0,
            Self::High => 1,
            Self::Emergency => 2,
        }
    }

    /// Parse a wire value.
    pub fn from_value(value: i32) -> Option<Self> {
        match value {
            -2 => Some(Self::Lowest),
            -1 => Some(Self::Low),
            0 => Some(Self::Normal),
            1 => Some(Self::High),
            2 => Some(Self::Emergency),
            _ => None,
        }
    }
}

impl From<Priority> for i32 {
    fn from(priority: Priority) -> Self {
        priority.value()
    }
}

/// A notification to push.
///
/// Setters never fail: lengths, ranges and cross-field requirements are all
/// checked by [`validate`](crate::validate) right before sending.
///
/// ```
/// use breeze::{Message, Priority};
///
/// let message = Message::new("Backup finished")
///     .title("nightly")
///     .priority(Priority::High)
///     .sound("magic");
///
/// assert_eq!(message.title.as_deref(), Some("nightly"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Message body.
    pub message: String,
    /// Title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Supplementary URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Title shown for the supplementary URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_title: Option<String>,
    /// Raw priority value, see [`Priority`].
    #[serde(default)]
    pub priority: i32,
    /// Seconds between emergency re-deliveries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry: Option<u32>,
    /// Seconds during which emergency re-deliveries continue.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expire: Option<u32>,
    /// Unix timestamp shown instead of the receive time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    /// Sound name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sound: Option<String>,
    /// Restrict delivery to this device.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
}

impl Message {
    /// Create a new message with the given body.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Default::default()
        }
    }

    /// Set the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the supplementary URL.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the supplementary URL title.
    pub fn url_title(mut self, title: impl Into<String>) -> Self {
        self.url_title = Some(title.into());
        self
    }

    /// Set the priority. Accepts a [`Priority`] or a raw wire value.
    pub fn priority(mut self, priority: impl Into<i32>) -> Self {
        self.priority = priority.into();
        self
    }

    /// Set the emergency retry interval in seconds.
    pub fn retry(mut self, seconds: u32) -> Self {
        self.retry = Some(seconds);
        self
    }

    /// Set the emergency expire window in seconds.
    pub fn expire(mut self, seconds: u32) -> Self {
        self.expire = Some(seconds);
        self
    }

    /// Set the timestamp (Unix seconds).
    pub fn timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Stamp the message with the current time.
    pub fn timestamp_now(self) -> Self {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or_default();
        self.timestamp(now)
    }

    /// Set the sound.
    pub fn sound(mut self, sound: impl Into<String>) -> Self {
        self.sound = Some(sound.into());
        self
    }

    /// Restrict delivery to one device.
    pub fn device(mut self, device: impl Into<String>) -> Self {
        self.device = Some(device.into());
        self
    }

    /// Typed priority, if the raw value is in range.
    pub fn typed_priority(&self) -> Option<Priority> {
        Priority::from_value(self.priority)
    }

    /// Check if this is an emergency message.
    pub fn is_emergency(&self) -> bool {
        self.priority == Priority::Emergency.value()
    }

    /// Form parameters for the send endpoint, without credentials.
    ///
    /// Empty optional fields are left out. `priority` is always present;
    /// `retry` and `expire` only for emergency messages.
    pub(crate) fn form_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("message", self.message.clone())];

        push_non_empty(&mut params, "title", &self.title);
        push_non_empty(&mut params, "url", &self.url);
        push_non_empty(&mut params, "url_title", &self.url_title);

        params.push(("priority", self.priority.to_string()));

        if self.is_emergency() {
            params.push(("retry", self.retry.unwrap_or_default().to_string()));
            params.push(("expire", self.expire.unwrap_or_default().to_string()));
        }

        if let Some(timestamp) = self.timestamp.filter(|t| *t != 0) {
            params.push(("timestamp", timestamp.to_string()));
        }

        push_non_empty(&mut params, "sound", &self.sound);
        push_non_empty(&mut params, "device", &self.device);

        params
    }
}

fn push_non_empty(params: &mut Vec<(&'static str, String)>, key: &'static str, value: &Option<String>) {
    if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
        params.push((key, value.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param<'a>(params: &'a [(&'static str, String)], key: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_message_creation() {
        let message = Message::new("This is a message").title("This is a title");

        assert_eq!(message.message, "This is a message");
        assert_eq!(message.title.as_deref(), Some("This is a title"));
        assert_eq!(message.priority, 0);
        assert_eq!(message.typed_priority(), Some(Priority::Normal));
    }

    #[test]
    fn test_setters_store_values_verbatim() {
        let message = Message::new("body")
            .url("https://example.com")
            .url_title("example")
            .priority(Priority::Emergency)
            .retry(60)
            .expire(3600)
            .timestamp(1_700_000_000)
            .sound("siren")
            .device("phone");

        assert_eq!(message.url.as_deref(), Some("https://example.com"));
        assert_eq!(message.url_title.as_deref(), Some("example"));
        assert!(message.is_emergency());
        assert_eq!(message.retry, Some(60));
        assert_eq!(message.expire, Some(3600));
        assert_eq!(message.timestamp, Some(1_700_000_000));
        assert_eq!(message.sound.as_deref(), Some("siren"));
        assert_eq!(message.device.as_deref(), Some("phone"));
    }

    #[test]
    fn test_raw_priority_is_not_normalised() {
        let message = Message::new("a").priority(5);
        assert_eq!(message.priority, 5);
        assert_eq!(message.typed_priority(), None);
    }

    #[test]
    fn test_priority_values() {
        for priority in [
            Priority::Lowest,
            Priority::Low,
            Priority::Normal,
            Priority::High,
            Priority::Emergency,
        ] {
            assert_eq!(Priority::from_value(priority.value()), Some(priority));
        }
        assert_eq!(Priority::from_value(3), None);
        assert_eq!(Priority::from_value(-3), None);
    }

    #[test]
    fn test_form_params_minimal() {
        let params = Message::new("This is a message")
            .title("This is a title")
            .form_params();

        assert_eq!(param(&params, "message"), Some("This is a message"));
        assert_eq!(param(&params, "title"), Some("This is a title"));
        assert_eq!(param(&params, "priority"), Some("0"));
        assert_eq!(param(&params, "url"), None);
        assert_eq!(param(&params, "retry"), None);
        assert_eq!(param(&params, "timestamp"), None);
    }

    #[test]
    fn test_form_params_skip_empty_strings() {
        let params = Message::new("a").title("").sound("").form_params();
        assert_eq!(param(&params, "title"), None);
        assert_eq!(param(&params, "sound"), None);
    }

    #[test]
    fn test_form_params_emergency_only_fields() {
        let params = Message::new("a")
            .priority(Priority::High)
            .retry(60)
            .expire(600)
            .form_params();
        assert_eq!(param(&params, "retry"), None);
        assert_eq!(param(&params, "expire"), None);

        let params = Message::new("a")
            .priority(Priority::Emergency)
            .retry(60)
            .expire(600)
            .timestamp(0)
            .form_params();
        assert_eq!(param(&params, "priority"), Some("2"));
        assert_eq!(param(&params, "retry"), Some("60"));
        assert_eq!(param(&params, "expire"), Some("600"));
        assert_eq!(param(&params, "timestamp"), None);
    }

    #[test]
    fn test_timestamp_now() {
        let message = Message::new("a").timestamp_now();
        assert!(message.timestamp.unwrap_or_default() > 1_600_000_000);
    }

    #[test]
    fn test_message_from_json() {
        let message: Message =
            serde_json::from_str(r#"{"message":"disk full","priority":1,"sound":"siren"}"#)
                .unwrap();
        assert_eq!(message, Message::new("disk full").priority(Priority::High).sound("siren"));
    }
}
