use std::fmt;

use phonenumber::country;
use url::Url;

use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Origin of the SMS Gateway REST API, e.g. `https://api.puzzel.com`.
///
/// Invariant: parses as an absolute `http`/`https` URL with a host and no query or fragment.
pub struct BaseUrl(Url);

impl BaseUrl {
    /// Configuration field name (`baseUrl`).
    pub const FIELD: &'static str = "baseUrl";

    /// Parse and validate a base URL.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }

        let invalid = |reason: &str| ValidationError::InvalidBaseUrl {
            input: trimmed.to_owned(),
            reason: reason.to_owned(),
        };

        let url = Url::parse(trimmed).map_err(|err| invalid(&err.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid("scheme must be http or https"));
        }
        if url.host_str().is_none() {
            return Err(invalid("missing host"));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(invalid("query and fragment are not allowed"));
        }
        Ok(Self(url))
    }

    /// Borrow the parsed URL.
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Append an absolute API path (starting with `/`) to this base URL.
    pub fn endpoint(&self, path: &str) -> Result<Url, url::ParseError> {
        let base = self.0.as_str().trim_end_matches('/');
        Url::parse(&format!("{base}{path}"))
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Numeric gateway service identifier (`serviceId`).
pub struct ServiceId(u32);

impl ServiceId {
    /// JSON field name used by the gateway (`serviceId`).
    pub const FIELD: &'static str = "serviceId";

    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Gateway account username.
///
/// Invariant: non-empty after trimming.
pub struct Username(String);

impl Username {
    /// JSON field name used by the gateway (`username`).
    pub const FIELD: &'static str = "username";

    /// Create a validated [`Username`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated username.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// Gateway account password.
///
/// Invariant: must not be empty (whitespace is preserved and allowed). `Debug` output is
/// redacted so the value never reaches logs.
pub struct Password(String);

impl Password {
    /// JSON field name used by the gateway (`password`).
    pub const FIELD: &'static str = "password";

    /// Create a validated [`Password`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the password as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

#[derive(Debug, Clone)]
/// Parsed phone number with an E.164 representation.
///
/// Recipients are plain strings on the wire; use this type when you want to normalize
/// user input (`+47 123 45 678`, `12345678` with a default region) before building a
/// [`Message`](crate::domain::Message).
///
/// Equality and hashing are based on the E.164 form.
pub struct PhoneNumber {
    raw: String,
    e164: String,
}

impl PhoneNumber {
    /// JSON field name used by the gateway (`recipient`).
    pub const FIELD: &'static str = "recipient";

    /// Parse and normalize a phone number into E.164.
    ///
    /// `default_region` is used when the input does not contain an explicit country prefix.
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let input = input.into();
        let raw = input.trim().to_owned();
        if raw.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }

        let parsed = phonenumber::parse(default_region, &raw)
            .map_err(|_| ValidationError::InvalidPhoneNumber { input: raw.clone() })?;

        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();

        Ok(Self { raw, e164 })
    }

    /// Raw input after trimming.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Normalized E.164 representation.
    pub fn e164(&self) -> &str {
        &self.e164
    }
}

impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.e164 == other.e164
    }
}

impl Eq for PhoneNumber {}

impl std::hash::Hash for PhoneNumber {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.e164.hash(state);
    }
}

impl From<PhoneNumber> for String {
    fn from(value: PhoneNumber) -> Self {
        value.e164
    }
}
