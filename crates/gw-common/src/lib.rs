//! Shared building blocks for API-gateway request handlers.
//!
//! - [`response`]: the `{code, message, payload}` envelope and transport response
//! - [`error`]: coded handler errors
//! - [`request`]: inbound event context, parameter loading, method ARNs
//! - [`timestamp`]: approximate calendar offsets on Unix timestamps
//! - [`logging`]: subscriber setup with sensitive-field masking
//! - [`config`]: deployment settings from the environment
//!
//! ```
//! use gw_common::ApiResponse;
//!
//! let resp = ApiResponse::new(4041).build().unwrap();
//! assert_eq!(resp.status_code, 404);
//! assert_eq!(resp.body, r#"{"code":4041,"message":"Data was not found","payload":{}}"#);
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod request;
pub mod response;
pub mod text;
pub mod timestamp;

pub use config::Settings;
pub use error::{CommonError, Error, Result};
pub use logging::{
    init_logging, log_request, LogConfig, LogFormat, LogLevel, MaskingFields, MaskingLayer,
};
pub use request::{MethodArn, ProxyRequest, UnknownFields};
pub use response::{ApiResponse, ProxyResponse};
pub use text::{snake_to_pascal, TrimmedString};
pub use timestamp::{current_timestamp, extend_timestamp, is_almost_timeout, TimeOffset, Unit};

pub use gw_redact;
