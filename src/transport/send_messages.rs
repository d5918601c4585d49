use serde::{Deserialize, Serialize};

use crate::domain::{
    Message, MessageStatus, Password, SendMessages, ServiceId, SmsGatewayResponse, Username,
};

pub const SEND_MESSAGES_PATH: &str = "/gw/rs/sendMessages";

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendMessagesEnvelope<'a> {
    service_id: u32,
    username: &'a str,
    password: &'a str,
    batch_reference: &'a str,
    message: &'a [Message],
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SendMessagesJsonResponse {
    #[serde(default)]
    batch_reference: Option<String>,
    #[serde(default)]
    message_status: Option<Vec<MessageStatusJson>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MessageStatusJson {
    #[serde(default)]
    status_code: Option<i32>,
    #[serde(default)]
    status_message: Option<String>,
    #[serde(default)]
    client_reference: Option<String>,
    #[serde(default)]
    recipient: Option<String>,
    #[serde(default)]
    message_id: Option<String>,
    #[serde(default)]
    session_id: Option<String>,
    #[serde(default)]
    sequence_index: Option<i32>,
}

impl From<MessageStatusJson> for MessageStatus {
    fn from(value: MessageStatusJson) -> Self {
        Self {
            status_code: value.status_code.unwrap_or_default(),
            status_message: value.status_message.unwrap_or_default(),
            client_reference: non_empty(value.client_reference),
            recipient: value.recipient.unwrap_or_default(),
            message_id: non_empty(value.message_id),
            session_id: non_empty(value.session_id),
            sequence_index: value.sequence_index.unwrap_or_default(),
        }
    }
}

// The gateway echoes unset references as "" rather than omitting them.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|it| !it.is_empty())
}

pub fn encode_send_messages_json(
    service_id: ServiceId,
    username: &Username,
    password: &Password,
    request: &SendMessages,
) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(&SendMessagesEnvelope {
        service_id: service_id.value(),
        username: username.as_str(),
        password: password.as_str(),
        batch_reference: request.batch_reference(),
        message: request.messages(),
    })
}

pub fn decode_send_messages_json_response(
    json: &str,
) -> Result<SmsGatewayResponse, TransportError> {
    let parsed: SendMessagesJsonResponse = serde_json::from_str(json)?;

    Ok(SmsGatewayResponse {
        batch_reference: parsed.batch_reference.unwrap_or_default(),
        message_status: parsed
            .message_status
            .unwrap_or_default()
            .into_iter()
            .map(MessageStatus::from)
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use crate::domain::{
        GasSettings, OriginatorSettings, OriginatorType, Parameter, SendWindow, Settings,
    };

    use super::*;

    fn credentials() -> (ServiceId, Username, Password) {
        (
            ServiceId::new(1000),
            Username::new("user").unwrap(),
            Password::new("pass").unwrap(),
        )
    }

    fn encode(request: &SendMessages) -> Value {
        let (service_id, username, password) = credentials();
        let body = encode_send_messages_json(service_id, &username, &password, request).unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[test]
    fn encode_minimal_message_omits_optional_keys() {
        let message = Message::new("+4712345678", "Hello").with_settings(Settings {
            originator_settings: Some(OriginatorSettings::alphanumeric("Test")),
            ..Default::default()
        });
        let request = SendMessages::new(vec![message], "batch-123").unwrap();

        let body = encode(&request);
        assert_eq!(body[ServiceId::FIELD], 1000);
        assert_eq!(
            body,
            json!({
                "serviceId": 1000,
                "username": "user",
                "password": "pass",
                "batchReference": "batch-123",
                "message": [{
                    "recipient": "+4712345678",
                    "content": "Hello",
                    "settings": {
                        "originatorSettings": {
                            "originatorType": "ALPHANUMERIC",
                            "originator": "Test"
                        }
                    }
                }]
            })
        );
    }

    #[test]
    fn encode_full_settings_uses_camel_case_keys() {
        let settings = Settings {
            priority: Some(1),
            validity: Some(173),
            differentiator: Some("diff".to_owned()),
            age: Some(18),
            new_session: Some(true),
            session_id: Some("s-1".to_owned()),
            invoice_node: Some("node".to_owned()),
            auto_detect_encoding: Some(true),
            safe_remove_non_gsm_characters: Some(false),
            originator_settings: Some(OriginatorSettings::new(
                OriginatorType::Network,
                "1960",
            )),
            gas_settings: Some(GasSettings {
                service_code: "02001".to_owned(),
                description: Some("SMS".to_owned()),
            }),
            send_window: Some(SendWindow {
                start_time: Some("09:00:00".to_owned()),
                ..SendWindow::starting("2026-10-20")
            }),
            parameter: Some(Parameter {
                business_model: Some("contact center".to_owned()),
                pid: Some(65),
                flash: Some(true),
                strex_confirm_channel: Some("sms".to_owned()),
                ..Default::default()
            }),
        };
        let message = Message::new("+4712345678", "Hello")
            .with_price(100)
            .with_client_reference("ref-1")
            .with_settings(settings);
        let request = SendMessages::new(vec![message], "b").unwrap();

        let body = encode(&request);
        let message = &body["message"][0];
        assert_eq!(message["price"], 100);
        assert_eq!(message["clientReference"], "ref-1");

        let settings = &message["settings"];
        assert_eq!(settings["priority"], 1);
        assert_eq!(settings["validity"], 173);
        assert_eq!(settings["newSession"], true);
        assert_eq!(settings["sessionId"], "s-1");
        assert_eq!(settings["invoiceNode"], "node");
        assert_eq!(settings["autoDetectEncoding"], true);
        assert_eq!(settings["safeRemoveNonGsmCharacters"], false);
        assert_eq!(settings["originatorSettings"]["originatorType"], "NETWORK");
        assert_eq!(settings["gasSettings"]["serviceCode"], "02001");
        assert_eq!(
            settings["sendWindow"],
            json!({"startDate": "2026-10-20", "startTime": "09:00:00"})
        );
        assert_eq!(
            settings["parameter"],
            json!({
                "businessModel": "contact center",
                "pid": 65,
                "flash": true,
                "strexConfirmChannel": "sms"
            })
        );
    }

    fn round_trip(messages: Vec<Message>) -> Vec<Message> {
        let request = SendMessages::new(messages, "batch").unwrap();
        let body = encode(&request);
        serde_json::from_value(body["message"].clone()).unwrap()
    }

    fn fully_populated(originator_type: OriginatorType) -> Message {
        Message::new("+4712345678", "every field")
            .with_price(250)
            .with_client_reference("ref-full")
            .with_settings(Settings {
                priority: Some(2),
                validity: Some(173),
                differentiator: Some("campaign-7".to_owned()),
                age: Some(18),
                new_session: Some(true),
                session_id: Some("session-1".to_owned()),
                invoice_node: Some("marketing".to_owned()),
                auto_detect_encoding: Some(true),
                safe_remove_non_gsm_characters: Some(true),
                originator_settings: Some(OriginatorSettings::new(originator_type, "Sender")),
                gas_settings: Some(GasSettings {
                    service_code: "02001".to_owned(),
                    description: Some("Premium".to_owned()),
                }),
                send_window: Some(SendWindow {
                    start_date: "2026-10-20".to_owned(),
                    stop_date: Some("2026-10-21".to_owned()),
                    start_time: Some("09:00:00".to_owned()),
                    stop_time: Some("17:00:00".to_owned()),
                }),
                parameter: Some(Parameter {
                    business_model: Some("contact center".to_owned()),
                    dcs: Some("F5".to_owned()),
                    udh: Some("0B05040B8423F0000003A30201".to_owned()),
                    pid: Some(65),
                    flash: Some(true),
                    parsing_type: Some("SAFE_ALPHA".to_owned()),
                    skip_customer_report_delivery: Some(true),
                    strex_verification_timeout: Some("10".to_owned()),
                    strex_merchant_sell_option: Some("pin".to_owned()),
                    strex_confirm_channel: Some("sms".to_owned()),
                    strex_authorization_token: Some("token-1".to_owned()),
                }),
            })
    }

    #[test]
    fn encoded_messages_deserialize_back_to_the_same_values() {
        let messages = vec![
            Message::new("+4712345678", "first").with_client_reference("a"),
            Message::new("+4787654321", "second").with_settings(Settings {
                validity: Some(10),
                gas_settings: Some(GasSettings {
                    service_code: "02001".to_owned(),
                    description: None,
                }),
                ..Default::default()
            }),
        ];

        assert_eq!(round_trip(messages.clone()), messages);
    }

    #[test]
    fn fully_populated_messages_round_trip_for_every_originator_type() {
        let messages = vec![
            fully_populated(OriginatorType::International),
            fully_populated(OriginatorType::Alphanumeric),
            fully_populated(OriginatorType::Network),
        ];

        let decoded = round_trip(messages.clone());
        assert_eq!(decoded, messages);

        let request = SendMessages::new(messages, "batch").unwrap();
        let body = encode(&request);
        let types: Vec<_> = body["message"]
            .as_array()
            .unwrap()
            .iter()
            .map(|it| it["settings"]["originatorSettings"]["originatorType"].clone())
            .collect();
        assert_eq!(
            types,
            vec![json!("INTERNATIONAL"), json!("ALPHANUMERIC"), json!("NETWORK")]
        );
    }

    #[test]
    fn explicit_false_and_zero_values_are_emitted_and_preserved() {
        let message = Message::new("+4712345678", "zeros")
            .with_price(0)
            .with_settings(Settings {
                priority: Some(0),
                validity: Some(0),
                age: Some(0),
                new_session: Some(false),
                auto_detect_encoding: Some(false),
                safe_remove_non_gsm_characters: Some(false),
                parameter: Some(Parameter {
                    pid: Some(0),
                    flash: Some(false),
                    skip_customer_report_delivery: Some(false),
                    ..Default::default()
                }),
                ..Default::default()
            });

        let request = SendMessages::new(vec![message.clone()], "batch").unwrap();
        let body = encode(&request);
        let encoded = &body["message"][0];
        assert_eq!(encoded["price"], 0);
        assert_eq!(
            encoded["settings"],
            json!({
                "priority": 0,
                "validity": 0,
                "age": 0,
                "newSession": false,
                "autoDetectEncoding": false,
                "safeRemoveNonGsmCharacters": false,
                "parameter": {
                    "pid": 0,
                    "flash": false,
                    "skipCustomerReportDelivery": false
                }
            })
        );

        assert_eq!(round_trip(vec![message.clone()]), vec![message]);
    }

    #[test]
    fn decode_preserves_status_order() {
        let json = r#"
        {
          "batchReference": "batch-123",
          "messageStatus": [
            {
              "statusCode": 1,
              "statusMessage": "Message enqueued for sending",
              "clientReference": "ref-1",
              "recipient": "+4712345678",
              "messageId": "id-1",
              "sessionId": "",
              "sequenceIndex": 1
            },
            {
              "statusCode": 1,
              "statusMessage": "Message enqueued for sending",
              "clientReference": "",
              "recipient": "+4787654321",
              "messageId": "id-2",
              "sequenceIndex": 2
            }
          ]
        }
        "#;

        let resp = decode_send_messages_json_response(json).unwrap();
        assert_eq!(resp.batch_reference, "batch-123");
        assert_eq!(resp.message_status.len(), 2);

        let first = &resp.message_status[0];
        assert_eq!(first.status_code, 1);
        assert_eq!(first.client_reference.as_deref(), Some("ref-1"));
        assert_eq!(first.message_id.as_deref(), Some("id-1"));
        assert_eq!(first.session_id, None);
        assert_eq!(first.sequence_index, 1);

        let second = &resp.message_status[1];
        assert_eq!(second.recipient, "+4787654321");
        assert_eq!(second.client_reference, None);
        assert_eq!(second.sequence_index, 2);
    }

    #[test]
    fn decode_tolerates_missing_status_list() {
        let resp = decode_send_messages_json_response(r#"{"batchReference":"b"}"#).unwrap();
        assert!(resp.message_status.is_empty());
    }

    #[test]
    fn decode_tolerates_null_status_list() {
        let resp =
            decode_send_messages_json_response(r#"{"batchReference":"b","messageStatus":null}"#)
                .unwrap();
        assert_eq!(resp.batch_reference, "b");
        assert!(resp.message_status.is_empty());
    }

    #[test]
    fn decode_defaults_missing_and_null_numbers() {
        let json = r#"
        {
          "batchReference": "b",
          "messageStatus": [
            { "recipient": "+4712345678", "messageId": "id-1" },
            { "statusCode": null, "recipient": "+4787654321", "sequenceIndex": null }
          ]
        }
        "#;

        let resp = decode_send_messages_json_response(json).unwrap();
        assert_eq!(resp.message_status.len(), 2);

        let first = &resp.message_status[0];
        assert_eq!(first.status_code, 0);
        assert_eq!(first.sequence_index, 0);
        assert_eq!(first.recipient, "+4712345678");
        assert_eq!(first.message_id.as_deref(), Some("id-1"));
        assert_eq!(first.status_message, "");

        let second = &resp.message_status[1];
        assert_eq!(second.status_code, 0);
        assert_eq!(second.recipient, "+4787654321");
    }

    #[test]
    fn decode_rejects_non_object_body() {
        let err = decode_send_messages_json_response("\"not json\"").unwrap_err();
        assert!(err.to_string().starts_with("invalid JSON response"));
        assert!(decode_send_messages_json_response("not json").is_err());
    }
}
