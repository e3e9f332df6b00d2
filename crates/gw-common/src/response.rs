//! Uniform JSON response envelope.
//!
//! Every handler answers with the same shape:
//!
//! ```json
//! {"code": 4041, "message": "Data was not found", "payload": {}}
//! ```
//!
//! `code` is a four-digit application code. Its leading three digits are the
//! HTTP status of the transport response.

use crate::error::{Error, Result};
use gw_redact::{Map, Value};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default application code for a successful response.
pub const DEFAULT_CODE: u32 = 2000;

pub const CONTENT_TYPE: &str = "Content-Type";
pub const APPLICATION_JSON: &str = "application/json";

/// Default message for a status when the caller gives none.
pub fn default_message(status: u16) -> Option<&'static str> {
    match status {
        400 => Some("Bad request"),
        401 => Some("Unauthorized"),
        403 => Some("Forbidden"),
        404 => Some("Data was not found"),
        409 => Some("Conflict"),
        500 => Some("Internal server error"),
        _ => None,
    }
}

/// HTTP status encoded in the leading three digits of `code`.
///
/// Codes below 100 do not carry a status and are rejected.
pub fn status_for_code(code: u32) -> Result<u16> {
    if code < 100 {
        return Err(Error::InvalidCode(code));
    }
    let digits = code.to_string();
    digits[..3]
        .parse()
        .map_err(|_| Error::InvalidCode(code))
}

/// What the transport sends back to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

#[derive(Serialize)]
struct Body<'a> {
    code: u32,
    message: &'a str,
    payload: &'a Map,
}

/// Builder for a [`ProxyResponse`].
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub code: u32,
    pub message: String,
    pub payload: Map,
    pub headers: BTreeMap<String, String>,
}

impl Default for ApiResponse {
    fn default() -> Self {
        Self {
            code: DEFAULT_CODE,
            message: String::new(),
            payload: Map::new(),
            headers: BTreeMap::new(),
        }
    }
}

impl ApiResponse {
    pub fn new(code: u32) -> Self {
        Self {
            code,
            ..Self::default()
        }
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn payload(mut self, payload: Map) -> Self {
        self.payload = payload;
        self
    }

    /// Serialize `payload` into the envelope. It must serialize to a JSON
    /// object.
    pub fn payload_from<T: Serialize>(self, payload: &T) -> Result<Self> {
        match Value::from(serde_json::to_value(payload)?) {
            Value::Map(map) => Ok(self.payload(map)),
            _ => Err(Error::InvalidArgument(
                "response payload must be a mapping".to_string(),
            )),
        }
    }

    /// Add a response header. Caller headers override the defaults.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Assemble the transport response.
    pub fn build(self) -> Result<ProxyResponse> {
        let status_code = status_for_code(self.code)?;

        let message = if self.message.is_empty() {
            default_message(status_code).unwrap_or_default()
        } else {
            self.message.as_str()
        };

        let body = serde_json::to_string(&Body {
            code: self.code,
            message,
            payload: &self.payload,
        })?;

        let mut headers = BTreeMap::new();
        headers.insert(CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string());
        headers.extend(self.headers);

        Ok(ProxyResponse {
            status_code,
            headers,
            body,
        })
    }
}

impl From<crate::error::CommonError> for ApiResponse {
    fn from(err: crate::error::CommonError) -> Self {
        err.into_response()
    }
}

impl From<Error> for ApiResponse {
    fn from(err: Error) -> Self {
        err.into_response()
    }
}
