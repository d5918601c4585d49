//! Typed Rust client for the Puzzel SMS Gateway REST API.
//!
//! The crate follows the usual three layers: a domain layer of plain and validated types,
//! a transport layer for the JSON wire format, and a small client layer that performs the
//! `POST /gw/rs/sendMessages` exchange and classifies failures.
//!
//! ```rust,no_run
//! use smsgw::{ClientConfig, Message, OriginatorSettings, Settings, SmsGatewayClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), smsgw::SmsGatewayError> {
//!     let config = ClientConfig::new("https://api.puzzel.com", 1000, "user", "secret")?;
//!     let client = SmsGatewayClient::new(config)?;
//!     let message = Message::new("+4712345678", "Hello").with_settings(Settings {
//!         originator_settings: Some(OriginatorSettings::alphanumeric("Puzzel")),
//!         ..Default::default()
//!     });
//!     let response = client.send_messages(vec![message], "batch-123").await?;
//!     for status in &response.message_status {
//!         println!("{}: {} {}", status.recipient, status.status_code, status.status_message);
//!     }
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{
    ApiError, CallAborted, CallContext, ClientConfig, DEFAULT_TIMEOUT, SmsGatewayClient,
    SmsGatewayError,
};
pub use domain::{
    BaseUrl, GasSettings, Message, MessageStatus, OriginatorSettings, OriginatorType, Parameter,
    Password, PhoneNumber, SendMessages, SendWindow, ServiceId, Settings, SmsGatewayResponse,
    Username, ValidationError,
};
pub use tokio_util::sync::CancellationToken;
