use std::error::Error as StdError;

use crate::domain::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
/// The gateway answered, but with a non-200 HTTP status.
///
/// `message` is the HTTP status line, e.g. `"500 Internal Server Error"`. The reason phrase is
/// the canonical one for `status_code`, not whatever text the server put on its status line
/// (`"<unknown status code>"` for codes without one). The response body is not inspected.
#[error("API error: {status_code} - {message}")]
pub struct ApiError {
    pub status_code: u16,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
/// Why a call was abandoned by its [`CallContext`](crate::CallContext).
pub enum CallAborted {
    #[error("call cancelled")]
    Cancelled,
    #[error("call deadline exceeded")]
    DeadlineExceeded,
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`SmsGatewayClient`](crate::SmsGatewayClient).
///
/// [`SmsGatewayError::Api`] means the gateway rejected the call; [`SmsGatewayError::Transport`]
/// means the call never completed (network, timeout, cancellation). The remaining variants are
/// local failures.
pub enum SmsGatewayError {
    /// The request body could not be encoded as JSON.
    #[error("serialization error: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The endpoint URL could not be built from the configured base URL.
    #[error("invalid request URL: {0}")]
    InvalidRequest(#[source] url::ParseError),

    /// HTTP client / transport failure (DNS, TLS, timeouts, cancellation).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// Non-200 HTTP status returned by the gateway.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A 200 response whose body does not match the response schema.
    #[error("decode error: {0}")]
    Decode(#[source] Box<dyn StdError + Send + Sync>),

    /// `send` was called but the client has no default batch reference.
    #[error("no default batch reference configured; use send_messages with an explicit one")]
    MissingBatchReference,

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl SmsGatewayError {
    /// The gateway's rejection, if this is an [`SmsGatewayError::Api`].
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Self::Api(err) => Some(err),
            _ => None,
        }
    }

    /// Whether the call failed before a response was received.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// The cancellation/deadline cause, if the call was abandoned by its context.
    pub fn call_aborted(&self) -> Option<CallAborted> {
        match self {
            Self::Transport(err) => err.downcast_ref::<CallAborted>().copied(),
            _ => None,
        }
    }
}
