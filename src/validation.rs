//! Pre-flight message validation.
//!
//! Checks run in a fixed order and the first failure wins. Validation is a
//! pure function of the message, the context and the options; it never
//! touches the network and never modifies the message.

use crate::{DeliveryContext, Message, Priority, ValidationError};

/// Maximum message body length, in characters.
pub const MAX_MESSAGE_LEN: usize = 1024;

/// Maximum title length, in characters.
pub const MAX_TITLE_LEN: usize = 250;

/// Maximum supplementary URL length, in characters.
pub const MAX_URL_LEN: usize = 512;

/// Maximum supplementary URL title length, in characters.
pub const MAX_URL_TITLE_LEN: usize = 100;

/// Minimum emergency retry interval, in seconds.
pub const MIN_RETRY_SECS: u32 = 30;

/// Maximum emergency expire window, in seconds.
pub const MAX_EXPIRE_SECS: u32 = 86_400;

/// Validation switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Reject sounds missing from the context's sound catalogue.
    pub strict_sounds: bool,
}

impl ValidationOptions {
    /// Enable or disable strict sound checking.
    pub fn strict_sounds(mut self, strict: bool) -> Self {
        self.strict_sounds = strict;
        self
    }
}

/// Validate a message against the service's constraints.
pub fn validate(
    message: &Message,
    context: &DeliveryContext,
    options: &ValidationOptions,
) -> Result<(), ValidationError> {
    if message.message.is_empty() {
        return Err(ValidationError::MessageBlank(
            "message body must not be empty".to_string(),
        ));
    }

    check_len("message", &message.message, MAX_MESSAGE_LEN)
        .map_err(ValidationError::MessageTooLong)?;

    if let Some(title) = &message.title {
        check_len("title", title, MAX_TITLE_LEN).map_err(ValidationError::TitleTooLong)?;
    }

    if let Some(url) = &message.url {
        check_len("url", url, MAX_URL_LEN).map_err(ValidationError::SuppUrlTooLong)?;
    }

    if let Some(url_title) = &message.url_title {
        check_len("url title", url_title, MAX_URL_TITLE_LEN)
            .map_err(ValidationError::SuppUrlTitleTooLong)?;
    }

    let has_url_title = message.url_title.as_deref().is_some_and(|t| !t.is_empty());
    let has_url = message.url.as_deref().is_some_and(|u| !u.is_empty());
    if has_url_title && !has_url {
        return Err(ValidationError::MissingParameter(
            "url title given without a url".to_string(),
        ));
    }

    let Some(priority) = message.typed_priority() else {
        return Err(ValidationError::InvalidPriority(format!(
            "priority {} is outside {}..={}",
            message.priority,
            Priority::Lowest.value(),
            Priority::Emergency.value()
        )));
    };

    if priority == Priority::Emergency {
        check_emergency(message)?;
    }

    if let Some(device) = message.device.as_deref().filter(|d| !d.is_empty())
        && !context.is_valid_device(device)
    {
        return Err(ValidationError::NoDevice(format!(
            "device '{}' is not registered for this user",
            device
        )));
    }

    if options.strict_sounds
        && let Some(sound) = message.sound.as_deref().filter(|s| !s.is_empty())
        && !context.is_valid_sound(sound)
    {
        return Err(ValidationError::UnknownSound(format!(
            "sound '{}' is not in the sound catalogue",
            sound
        )));
    }

    Ok(())
}

fn check_emergency(message: &Message) -> Result<(), ValidationError> {
    let retry = message.retry.filter(|r| *r != 0);
    let expire = message.expire.filter(|e| *e != 0);

    let (Some(retry), Some(expire)) = (retry, expire) else {
        return Err(ValidationError::MissingParameter(
            "emergency priority requires both retry and expire".to_string(),
        ));
    };

    if retry < MIN_RETRY_SECS {
        return Err(ValidationError::RetryTimeTooShort(format!(
            "retry is {}s, minimum is {}s",
            retry, MIN_RETRY_SECS
        )));
    }

    if expire > MAX_EXPIRE_SECS {
        return Err(ValidationError::ExpireTimeTooLong(format!(
            "expire is {}s, maximum is {}s",
            expire, MAX_EXPIRE_SECS
        )));
    }

    Ok(())
}

fn check_len(field: &str, value: &str, max: usize) -> Result<(), String> {
    let len = value.chars().count();
    if len > max {
        Err(format!("{} is {} characters, maximum is {}", field, len, max))
    } else {
        Ok(())
    }
}
