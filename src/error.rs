//! Pushover client error types.

use thiserror::Error;

/// Result type for push operations.
pub type Result<T> = std::result::Result<T, PushError>;

/// Discriminant of a [`ValidationError`].
///
/// Callers should branch on this rather than on the error text. The numeric
/// [`code`](ValidationKind::code) values are stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationKind {
    /// Message body is empty.
    MessageBlank,
    /// Message body exceeds [`MAX_MESSAGE_LEN`](crate::MAX_MESSAGE_LEN).
    MessageTooLong,
    /// Title exceeds [`MAX_TITLE_LEN`](crate::MAX_TITLE_LEN).
    TitleTooLong,
    /// Supplementary URL title exceeds [`MAX_URL_TITLE_LEN`](crate::MAX_URL_TITLE_LEN).
    SuppUrlTitleTooLong,
    /// Supplementary URL exceeds [`MAX_URL_LEN`](crate::MAX_URL_LEN).
    SuppUrlTooLong,
    /// Priority outside the range the service accepts.
    InvalidPriority,
    /// A parameter required by another one is missing.
    MissingParameter,
    /// Emergency retry interval below [`MIN_RETRY_SECS`](crate::MIN_RETRY_SECS).
    RetryTimeTooShort,
    /// Emergency expire window above [`MAX_EXPIRE_SECS`](crate::MAX_EXPIRE_SECS).
    ExpireTimeTooLong,
    /// Target device is not registered for the user.
    NoDevice,
    /// Sound is not in the service's sound catalogue.
    UnknownSound,
}

impl ValidationKind {
    /// Stable numeric code for this discriminant.
    pub fn code(&self) -> i32 {
        match self {
            Self::MessageBlank => -1,
            Self::MessageTooLong => -2,
            Self::TitleTooLong => -3,
            Self::SuppUrlTitleTooLong => -4,
            Self::SuppUrlTooLong => -5,
            Self::InvalidPriority => -6,
            Self::MissingParameter => -7,
            Self::RetryTimeTooShort => -8,
            Self::ExpireTimeTooLong => -9,
            Self::NoDevice => -10,
            Self::UnknownSound => -11,
        }
    }
}

/// A message failed local validation. Always raised before any network access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Message body is empty.
    #[error("Message blank: {0}")]
    MessageBlank(String),

    /// Message body too long.
    #[error("Message too long: {0}")]
    MessageTooLong(String),

    /// Title too long.
    #[error("Title too long: {0}")]
    TitleTooLong(String),

    /// Supplementary URL title too long.
    #[error("Supplementary URL title too long: {0}")]
    SuppUrlTitleTooLong(String),

    /// Supplementary URL too long.
    #[error("Supplementary URL too long: {0}")]
    SuppUrlTooLong(String),

    /// Priority out of range.
    #[error("Invalid priority: {0}")]
    InvalidPriority(String),

    /// Required parameter missing.
    #[error("Missing parameter: {0}")]
    MissingParameter(String),

    /// Emergency retry interval too short.
    #[error("Retry time too short: {0}")]
    RetryTimeTooShort(String),

    /// Emergency expire window too long.
    #[error("Expire time too long: {0}")]
    ExpireTimeTooLong(String),

    /// Unknown device.
    #[error("No such device: {0}")]
    NoDevice(String),

    /// Unknown sound.
    #[error("Unknown sound: {0}")]
    UnknownSound(String),
}

impl ValidationError {
    /// The discriminant of this error.
    pub fn kind(&self) -> ValidationKind {
        match self {
            Self::MessageBlank(_) => ValidationKind::MessageBlank,
            Self::MessageTooLong(_) => ValidationKind::MessageTooLong,
            Self::TitleTooLong(_) => ValidationKind::TitleTooLong,
            Self::SuppUrlTitleTooLong(_) => ValidationKind::SuppUrlTitleTooLong,
            Self::SuppUrlTooLong(_) => ValidationKind::SuppUrlTooLong,
            Self::InvalidPriority(_) => ValidationKind::InvalidPriority,
            Self::MissingParameter(_) => ValidationKind::MissingParameter,
            Self::RetryTimeTooShort(_) => ValidationKind::RetryTimeTooShort,
            Self::ExpireTimeTooLong(_) => ValidationKind::ExpireTimeTooLong,
            Self::NoDevice(_) => ValidationKind::NoDevice,
            Self::UnknownSound(_) => ValidationKind::UnknownSound,
        }
    }

    /// Human-readable explanation.
    pub fn reason(&self) -> &str {
        match self {
            Self::MessageBlank(why)
            | Self::MessageTooLong(why)
            | Self::TitleTooLong(why)
            | Self::SuppUrlTitleTooLong(why)
            | Self::SuppUrlTooLong(why)
            | Self::InvalidPriority(why)
            | Self::MissingParameter(why)
            | Self::RetryTimeTooShort(why)
            | Self::ExpireTimeTooLong(why)
            | Self::NoDevice(why)
            | Self::UnknownSound(why) => why,
        }
    }
}

/// A request could not be delivered, either because the transport failed or
/// because the service rejected it.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// Connection-level failure.
    #[error("Network error: {0}")]
    Network(String),

    /// The transport gave up waiting.
    #[error("Request timed out")]
    Timeout,

    /// The service answered with a server error and no usable body.
    #[error("Unexpected HTTP status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// Response body was not the expected JSON.
    #[error("Decode error: {0}")]
    Decode(String),

    /// The service answered with a status other than 1.
    #[error("Request {request} failed with errors: {}", .errors.join(","))]
    Api {
        /// Request id echoed by the service.
        request: String,
        /// Errors reported by the service.
        errors: Vec<String>,
    },

    /// Endpoint URL could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl DeliveryError {
    /// Check if this error is transient. The client never retries by itself.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) | Self::Timeout => true,
            Self::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Check if the service itself rejected the request.
    pub fn is_api(&self) -> bool {
        matches!(self, Self::Api { .. })
    }
}

impl From<reqwest::Error> for DeliveryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for DeliveryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<url::ParseError> for DeliveryError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}

/// Any failure returned by the client.
#[derive(Debug, Error)]
pub enum PushError {
    /// The message was rejected locally.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The request was not delivered.
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

impl PushError {
    /// The validation discriminant, if this is a validation failure.
    pub fn validation_kind(&self) -> Option<ValidationKind> {
        match self {
            Self::Validation(err) => Some(err.kind()),
            Self::Delivery(_) => None,
        }
    }

    /// Check if this error was raised before any network access.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required variable missing.
    #[error("Missing configuration value: {0}")]
    Missing(String),

    /// Variable present but unusable.
    #[error("Invalid value for {key}: {value}")]
    Invalid {
        /// Variable name.
        key: String,
        /// Offending value.
        value: String,
    },

    /// A `.env` file could not be read.
    #[error("Failed to load {path}: {message}")]
    Load {
        /// File path.
        path: String,
        /// Underlying error.
        message: String,
    },

    /// HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Client(String),
}
