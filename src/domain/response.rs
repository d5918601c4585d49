/// Result of a `sendMessages` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsGatewayResponse {
    pub batch_reference: String,
    /// One entry per submitted message part, in gateway order.
    pub message_status: Vec<MessageStatus>,
}

/// Delivery status of a single message (or message part).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageStatus {
    pub status_code: i32,
    pub status_message: String,
    pub client_reference: Option<String>,
    pub recipient: String,
    /// Gateway-assigned id.
    pub message_id: Option<String>,
    pub session_id: Option<String>,
    /// Position within a multi-part session.
    pub sequence_index: i32,
}
