use serde::{Deserialize, Serialize};

use crate::domain::validation::ValidationError;
use crate::domain::value::PhoneNumber;

/// One outbound SMS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Destination address, typically E.164 (`+4712345678`).
    pub recipient: String,
    pub content: String,
    /// Premium price in the smallest currency unit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<u32>,
    /// Caller-supplied correlation id, echoed back in [`MessageStatus`](crate::domain::MessageStatus).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Settings>,
}

impl Message {
    /// Plain message with no optional fields set.
    pub fn new(recipient: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
            content: content.into(),
            price: None,
            client_reference: None,
            settings: None,
        }
    }

    /// Message to a parsed phone number; the recipient is sent in E.164 form.
    pub fn to_phone(recipient: PhoneNumber, content: impl Into<String>) -> Self {
        Self::new(recipient, content)
    }

    pub fn with_price(mut self, price: u32) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_client_reference(mut self, client_reference: impl Into<String>) -> Self {
        self.client_reference = Some(client_reference.into());
        self
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = Some(settings);
        self
    }
}

/// Per-message delivery tuning. Every field is optional and omitted from the JSON when unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    /// Message lifetime in minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub differentiator: Option<String>,
    /// Minimum recipient age required by the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_session: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invoice_node: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_detect_encoding: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safe_remove_non_gsm_characters: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub originator_settings: Option<OriginatorSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_settings: Option<GasSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub send_window: Option<SendWindow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter: Option<Parameter>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OriginatorType {
    /// Numeric sender in international format.
    International,
    /// Up to 11 alphanumeric characters.
    Alphanumeric,
    /// Short number assigned by the network.
    Network,
}

/// Sender identity shown to the recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OriginatorSettings {
    pub originator_type: OriginatorType,
    pub originator: String,
}

impl OriginatorSettings {
    pub fn new(originator_type: OriginatorType, originator: impl Into<String>) -> Self {
        Self {
            originator_type,
            originator: originator.into(),
        }
    }

    pub fn alphanumeric(originator: impl Into<String>) -> Self {
        Self::new(OriginatorType::Alphanumeric, originator)
    }
}

/// Premium (GAS) billing attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GasSettings {
    pub service_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Delivery window. Dates are `yyyy-MM-dd`, times `HH:mm:ss`, both passed through verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendWindow {
    pub start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_time: Option<String>,
}

impl SendWindow {
    pub fn starting(start_date: impl Into<String>) -> Self {
        Self {
            start_date: start_date.into(),
            stop_date: None,
            start_time: None,
            stop_time: None,
        }
    }
}

/// Advanced message flags (data coding, flash, Strex billing).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_model: Option<String>,
    /// Data coding scheme.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dcs: Option<String>,
    /// User data header, hex encoded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub udh: Option<String>,
    /// Protocol identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pid: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flash: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parsing_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_customer_report_delivery: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strex_verification_timeout: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strex_merchant_sell_option: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strex_confirm_channel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strex_authorization_token: Option<String>,
}

/// A validated `sendMessages` call: at least one message plus the batch reference.
#[derive(Debug, Clone)]
pub struct SendMessages {
    messages: Vec<Message>,
    batch_reference: String,
}

impl SendMessages {
    /// JSON field name of the message array (`message`).
    pub const MESSAGES_FIELD: &'static str = "message";

    pub fn new(
        messages: Vec<Message>,
        batch_reference: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        if messages.is_empty() {
            return Err(ValidationError::Empty {
                field: Self::MESSAGES_FIELD,
            });
        }
        Ok(Self {
            messages,
            batch_reference: batch_reference.into(),
        })
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn batch_reference(&self) -> &str {
        &self.batch_reference
    }
}
