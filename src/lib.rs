//! # Breeze
//!
//! Client for the [Pushover](https://pushover.net) notification API.
//!
//! ## Features
//!
//! - **Fluent messages**: build a [`Message`] with chained setters
//! - **Pre-flight validation**: every documented API constraint is checked
//!   locally before a request leaves the process
//! - **Discovery**: credentials are validated and the device and sound
//!   catalogue fetched once, into a read-only [`DeliveryContext`]
//! - **Pluggable transport**: reqwest by default, any [`Transport`] for tests
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use breeze::{Message, Priority, PushClient, PushoverConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = PushClient::from_config(PushoverConfig::new("app-token", "user-key"))?;
//!     let context = client.connect(None).await?;
//!
//!     let message = Message::new("Disk usage above 90%")
//!         .title("storage-01")
//!         .priority(Priority::Emergency)
//!         .retry(60)
//!         .expire(3600);
//!
//!     let response = client.push(&context, &message).await?;
//!     println!("receipt: {:?}", response.receipt);
//!     Ok(())
//! }
//! ```
//!
//! ## Handling validation failures
//!
//! ```
//! use breeze::{Credentials, DeliveryContext, Message, ValidationKind, ValidationOptions, validate};
//! use std::collections::HashMap;
//!
//! let context = DeliveryContext::from_catalog(
//!     Credentials::new("app-token", "user-key"),
//!     ["phone"],
//!     HashMap::new(),
//! );
//!
//! let err = validate(&Message::new(""), &context, &ValidationOptions::default()).unwrap_err();
//! assert_eq!(err.kind(), ValidationKind::MessageBlank);
//! ```

mod client;
mod config;
mod context;
mod error;
mod message;
mod response;
mod transport;
mod validation;

pub use client::PushClient;
pub use config::{Credentials, DEFAULT_BASE_URL, ENV_PREFIX, EnvSource, PushoverConfig};
pub use context::DeliveryContext;
pub use error::{ConfigError, DeliveryError, PushError, Result, ValidationError, ValidationKind};
pub use message::{Message, Priority};
pub use response::{Response, STATUS_OK, decode_response};
pub use transport::{FormParams, HttpTransport, Transport};
pub use validation::{
    MAX_EXPIRE_SECS, MAX_MESSAGE_LEN, MAX_TITLE_LEN, MAX_URL_LEN, MAX_URL_TITLE_LEN,
    MIN_RETRY_SECS, ValidationOptions, validate,
};

/// Prelude for common imports.
///
/// ```
/// use breeze::prelude::*;
/// ```
pub mod prelude {
    pub use crate::client::PushClient;
    pub use crate::config::{Credentials, PushoverConfig};
    pub use crate::context::DeliveryContext;
    pub use crate::error::{DeliveryError, PushError, Result, ValidationError, ValidationKind};
    pub use crate::message::{Message, Priority};
    pub use crate::response::Response;
    pub use crate::transport::{HttpTransport, Transport};
}
