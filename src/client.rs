//! Push client: discovery and message dispatch.

use std::sync::Arc;
use tracing::{debug, info};
use url::Url;

use crate::{
    ConfigError, Credentials, DeliveryContext, DeliveryError, HttpTransport, Message,
    PushoverConfig, Response, Result, Transport, ValidationOptions, decode_response, validate,
};

const MESSAGES_PATH: &str = "messages.json";
const VALIDATE_PATH: &str = "users/validate.json";
const SOUNDS_PATH: &str = "sounds.json";

/// Pushover API client.
///
/// ```rust,ignore
/// use breeze::{Message, PushClient, PushoverConfig};
///
/// let client = PushClient::from_config(PushoverConfig::from_env()?)?;
/// let context = client.connect(None).await?;
///
/// let response = client.push(&context, &Message::new("Deploy finished")).await?;
/// println!("request {}", response.request);
/// ```
#[derive(Clone)]
pub struct PushClient {
    transport: Arc<dyn Transport>,
    credentials: Credentials,
    base_url: Url,
    options: ValidationOptions,
}

impl PushClient {
    /// Create a client using the reqwest transport.
    pub fn from_config(config: PushoverConfig) -> std::result::Result<Self, ConfigError> {
        let transport = HttpTransport::new(&config)?;
        Self::with_transport(config, transport)
    }

    /// Create a client with a custom transport.
    pub fn with_transport(
        config: PushoverConfig,
        transport: impl Transport + 'static,
    ) -> std::result::Result<Self, ConfigError> {
        let base_url = Url::parse(&config.base_url).map_err(|_| ConfigError::Invalid {
            key: "base_url".to_string(),
            value: config.base_url.clone(),
        })?;

        Ok(Self {
            transport: Arc::new(transport),
            credentials: config.credentials,
            base_url,
            options: ValidationOptions::default().strict_sounds(config.strict_sounds),
        })
    }

    /// Validation options applied by [`push`](Self::push).
    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    /// Validate the credentials and fetch the device and sound catalogue.
    ///
    /// With `device` set, validation is scoped to that device. Any failure
    /// aborts construction; no partial context is returned.
    pub async fn connect(&self, device: Option<&str>) -> Result<DeliveryContext> {
        let validated = self.validate_user(device).await?;
        let sounds = self.sounds().await?;

        info!(
            devices = validated.devices.len(),
            sounds = sounds.sounds.len(),
            "Pushover credentials validated"
        );

        Ok(DeliveryContext::from_catalog(
            self.credentials.clone(),
            validated.devices,
            sounds.sounds,
        ))
    }

    /// Validate the credentials, optionally for one device.
    pub async fn validate_user(&self, device: Option<&str>) -> Result<Response> {
        let mut params = self.credentials.form_params();
        if let Some(device) = device.filter(|d| !d.is_empty()) {
            params.push(("device", device.to_string()));
        }

        let url = self.endpoint(VALIDATE_PATH)?;
        debug!(endpoint = %url, "Validating Pushover user");

        let body = self.transport.post_form(&url, &params).await?;
        Ok(decode_response(&body)?.into_result()?)
    }

    /// Fetch the sound catalogue.
    pub async fn sounds(&self) -> Result<Response> {
        let mut url = self.endpoint(SOUNDS_PATH)?;
        url.query_pairs_mut()
            .append_pair("token", &self.credentials.app_token);

        debug!(endpoint = SOUNDS_PATH, "Fetching Pushover sounds");

        let body = self.transport.get(&url).await?;
        Ok(decode_response(&body)?.into_result()?)
    }

    /// Validate and send a message.
    ///
    /// Validation failures are returned before any network access.
    pub async fn push(&self, context: &DeliveryContext, message: &Message) -> Result<Response> {
        if let Err(err) = validate(message, context, &self.options) {
            debug!(kind = ?err.kind(), reason = err.reason(), "Message rejected before sending");
            return Err(err.into());
        }

        let mut params = context.credentials().form_params();
        params.extend(message.form_params());

        let url = self.endpoint(MESSAGES_PATH)?;
        debug!(
            endpoint = MESSAGES_PATH,
            priority = message.priority,
            device = ?message.device,
            "Sending Pushover message"
        );

        let body = self.transport.post_form(&url, &params).await?;
        let response = decode_response(&body)?.into_result()?;

        info!(
            request = %response.request,
            receipt = response.receipt.is_some(),
            "Pushover message sent"
        );

        Ok(response)
    }

    fn endpoint(&self, path: &str) -> std::result::Result<Url, DeliveryError> {
        Ok(self.base_url.join(path)?)
    }
}

impl std::fmt::Debug for PushClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PushClient")
            .field("base_url", &self.base_url.as_str())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
