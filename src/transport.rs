//! HTTP transport used to reach the Pushover API.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::{ConfigError, DeliveryError, PushoverConfig};

/// Form parameters sent with a POST.
pub type FormParams = [(&'static str, String)];

/// Raw request transport. Implementations return the response body as text
/// and leave JSON decoding to the caller.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST url-encoded form parameters.
    async fn post_form(&self, url: &Url, params: &FormParams) -> Result<String, DeliveryError>;

    /// GET a URL whose query string is already set.
    async fn get(&self, url: &Url) -> Result<String, DeliveryError>;
}

/// reqwest-backed transport.
///
/// The service reports rejected requests as 4xx responses with a JSON body,
/// so 2xx and 4xx bodies are both returned. Server errors become
/// [`DeliveryError::Status`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Build a transport from the client configuration.
    pub fn new(config: &PushoverConfig) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| ConfigError::Client(e.to_string()))?;

        Ok(Self { client })
    }

    /// Wrap an existing reqwest client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    async fn read_body(response: reqwest::Response) -> Result<String, DeliveryError> {
        let status = response.status();
        let body = response.text().await?;

        if status.is_server_error() {
            return Err(DeliveryError::Status {
                status: status.as_u16(),
                body,
            });
        }

        debug!(status = status.as_u16(), "Pushover responded");
        Ok(body)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_form(&self, url: &Url, params: &FormParams) -> Result<String, DeliveryError> {
        let response = self.client.post(url.clone()).form(params).send().await?;
        Self::read_body(response).await
    }

    async fn get(&self, url: &Url) -> Result<String, DeliveryError> {
        let response = self.client.get(url.clone()).send().await?;
        Self::read_body(response).await
    }
}
