//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub use request::{
    GasSettings, Message, OriginatorSettings, OriginatorType, Parameter, SendMessages,
    SendWindow, Settings,
};
pub use response::{MessageStatus, SmsGatewayResponse};
pub use validation::ValidationError;
pub use value::{BaseUrl, Password, PhoneNumber, ServiceId, Username};
