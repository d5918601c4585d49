use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    InvalidBaseUrl { input: String, reason: String },
    InvalidPhoneNumber { input: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::InvalidBaseUrl { input, reason } => {
                write!(f, "invalid base URL {input:?}: {reason}")
            }
            Self::InvalidPhoneNumber { input } => write!(f, "invalid phone number: {input}"),
        }
    }
}

impl std::error::Error for ValidationError {}
