//! Client layer: configuration, the HTTP seam, and mapping transport ↔ domain.

mod context;
mod error;

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use tracing::{debug, warn};
use url::Url;

use crate::domain::{
    BaseUrl, Message, Password, SendMessages, ServiceId, SmsGatewayResponse, Username,
    ValidationError,
};

pub use context::CallContext;
pub use error::{ApiError, CallAborted, SmsGatewayError};

/// Request timeout applied when [`ClientConfig::timeout`] is left untouched.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const APPLICATION_JSON: &str = "application/json";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    status_text: String,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn post_json<'a>(
        &'a self,
        url: &'a Url,
        body: Vec<u8>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post_json<'a>(
        &'a self,
        url: &'a Url,
        body: Vec<u8>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let response = self
                .client
                .post(url.clone())
                .header(CONTENT_TYPE, APPLICATION_JSON)
                .header(ACCEPT, APPLICATION_JSON)
                .body(body)
                .send()
                .await?;
            let status = response.status();
            let body = response.text().await?;
            Ok(HttpResponse {
                status: status.as_u16(),
                status_text: status.to_string(),
                body,
            })
        })
    }
}

#[derive(Debug, Clone)]
/// Connection settings for [`SmsGatewayClient`].
///
/// Build one with [`ClientConfig::new`] and override the remaining fields with struct update
/// syntax:
///
/// ```rust,no_run
/// use std::time::Duration;
/// use smsgw::ClientConfig;
///
/// # fn main() -> Result<(), smsgw::ValidationError> {
/// let config = ClientConfig {
///     timeout: Duration::from_secs(30),
///     batch_reference: Some("nightly".to_owned()),
///     ..ClientConfig::new("https://api.puzzel.com", 1000, "user", "secret")?
/// };
/// # let _ = config;
/// # Ok(())
/// # }
/// ```
pub struct ClientConfig {
    pub base_url: BaseUrl,
    pub service_id: ServiceId,
    pub username: Username,
    pub password: Password,
    /// Whole-request timeout for the built-in HTTP client. Ignored when `http_client` is set.
    pub timeout: Duration,
    /// Batch reference used by [`SmsGatewayClient::send`].
    pub batch_reference: Option<String>,
    /// `User-Agent` for the built-in HTTP client. Ignored when `http_client` is set.
    pub user_agent: Option<String>,
    /// Pre-configured HTTP client (connection pooling, proxies, TLS settings).
    pub http_client: Option<reqwest::Client>,
}

impl ClientConfig {
    /// Validate the required settings and fill the rest with defaults.
    pub fn new(
        base_url: impl Into<String>,
        service_id: u32,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            base_url: BaseUrl::new(base_url)?,
            service_id: ServiceId::new(service_id),
            username: Username::new(username)?,
            password: Password::new(password)?,
            timeout: DEFAULT_TIMEOUT,
            batch_reference: None,
            user_agent: None,
            http_client: None,
        })
    }
}

#[derive(Clone)]
/// Puzzel SMS Gateway client.
///
/// Posts JSON to `{base_url}/gw/rs/sendMessages`. The client holds no mutable state and can
/// be cloned and shared between concurrent calls; clones share one connection pool.
pub struct SmsGatewayClient {
    base_url: BaseUrl,
    service_id: ServiceId,
    username: Username,
    password: Password,
    batch_reference: Option<String>,
    http: Arc<dyn HttpTransport>,
}

impl SmsGatewayClient {
    /// Create a client from `config`.
    ///
    /// Fails with [`SmsGatewayError::Transport`] if the built-in HTTP client cannot be
    /// initialized (e.g. TLS backend setup).
    pub fn new(config: ClientConfig) -> Result<Self, SmsGatewayError> {
        let client = match config.http_client {
            Some(client) => client,
            None => {
                let mut builder = reqwest::Client::builder().timeout(config.timeout);
                if let Some(user_agent) = config.user_agent {
                    builder = builder.user_agent(user_agent);
                }
                builder
                    .build()
                    .map_err(|err| SmsGatewayError::Transport(Box::new(err)))?
            }
        };

        Ok(Self {
            base_url: config.base_url,
            service_id: config.service_id,
            username: config.username,
            password: config.password,
            batch_reference: config.batch_reference,
            http: Arc::new(ReqwestTransport { client }),
        })
    }

    /// Default batch reference used by [`SmsGatewayClient::send`], if configured.
    pub fn batch_reference(&self) -> Option<&str> {
        self.batch_reference.as_deref()
    }

    /// Send messages under the configured default batch reference.
    ///
    /// Fails with [`SmsGatewayError::MissingBatchReference`] when the client was built
    /// without one.
    pub async fn send(
        &self,
        messages: Vec<Message>,
    ) -> Result<SmsGatewayResponse, SmsGatewayError> {
        self.send_with_context(&CallContext::default(), messages)
            .await
    }

    /// [`SmsGatewayClient::send`] bounded by `ctx`.
    pub async fn send_with_context(
        &self,
        ctx: &CallContext,
        messages: Vec<Message>,
    ) -> Result<SmsGatewayResponse, SmsGatewayError> {
        let batch_reference = self
            .batch_reference
            .clone()
            .ok_or(SmsGatewayError::MissingBatchReference)?;
        self.send_messages_with_context(ctx, messages, batch_reference)
            .await
    }

    /// Send one or more messages under an explicit batch reference.
    ///
    /// Errors:
    /// - [`SmsGatewayError::Validation`] when `messages` is empty,
    /// - [`SmsGatewayError::Transport`] when the request does not complete,
    /// - [`SmsGatewayError::Api`] for any HTTP status other than 200,
    /// - [`SmsGatewayError::Decode`] when a 200 body is not a gateway response.
    pub async fn send_messages(
        &self,
        messages: Vec<Message>,
        batch_reference: impl Into<String>,
    ) -> Result<SmsGatewayResponse, SmsGatewayError> {
        self.send_messages_with_context(&CallContext::default(), messages, batch_reference)
            .await
    }

    /// [`SmsGatewayClient::send_messages`] bounded by `ctx`.
    ///
    /// Cancellation or an elapsed deadline surfaces as [`SmsGatewayError::Transport`]; use
    /// [`SmsGatewayError::call_aborted`] to tell it apart from network failures.
    pub async fn send_messages_with_context(
        &self,
        ctx: &CallContext,
        messages: Vec<Message>,
        batch_reference: impl Into<String>,
    ) -> Result<SmsGatewayResponse, SmsGatewayError> {
        let request = SendMessages::new(messages, batch_reference)?;
        self.execute(ctx, &request).await
    }

    #[tracing::instrument(
        name = "send_messages",
        skip_all,
        fields(
            base_url = %self.base_url,
            batch_reference = %request.batch_reference(),
            messages = request.messages().len(),
        )
    )]
    async fn execute(
        &self,
        ctx: &CallContext,
        request: &SendMessages,
    ) -> Result<SmsGatewayResponse, SmsGatewayError> {
        let body = crate::transport::encode_send_messages_json(
            self.service_id,
            &self.username,
            &self.password,
            request,
        )
        .map_err(|err| {
            warn!(error = %err, "failed to encode request body");
            SmsGatewayError::Serialize(err)
        })?;

        let endpoint = self
            .base_url
            .endpoint(crate::transport::SEND_MESSAGES_PATH)
            .map_err(|err| {
                warn!(error = %err, "failed to build request URL");
                SmsGatewayError::InvalidRequest(err)
            })?;

        ctx.check()
            .map_err(|aborted| SmsGatewayError::Transport(Box::new(aborted)))?;

        debug!(url = %endpoint, "sending request");

        let result = tokio::select! {
            biased;
            aborted = ctx.aborted() => Err(Box::new(aborted) as Box<dyn StdError + Send + Sync>),
            result = self.http.post_json(&endpoint, body) => result,
        };
        let response = result.map_err(|err| {
            warn!(error = %err, "HTTP request failed");
            SmsGatewayError::Transport(err)
        })?;

        if response.status != 200 {
            warn!(status = %response.status_text, "received non-OK HTTP status");
            return Err(SmsGatewayError::Api(ApiError {
                status_code: response.status,
                message: response.status_text,
            }));
        }

        let parsed = crate::transport::decode_send_messages_json_response(&response.body)
            .map_err(|err| {
                warn!(error = %err, "failed to decode response body");
                SmsGatewayError::Decode(Box::new(err))
            })?;

        debug!(response = ?parsed, "received response");
        Ok(parsed)
    }
}
