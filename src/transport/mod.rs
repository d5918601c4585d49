//! Transport layer: HTTP and wire-format details (serialization/deserialization).

mod send_messages;

pub use send_messages::{
    SEND_MESSAGES_PATH, decode_send_messages_json_response, encode_send_messages_json,
};
