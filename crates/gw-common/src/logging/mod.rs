//! Logging setup for request handlers.
//!
//! Two output modes, both on stderr:
//! - Human: `LEVEL file:line message field=value`, no timestamp or target
//!   (the runtime adds its own).
//! - JSONL: one masked JSON object per event via [`MaskingLayer`].
//!
//! In both modes a field whose name is sensitive is written as `****`, and
//! JSON objects or arrays in the message or in field values are masked
//! structurally.
//!
//! # Usage
//!
//! ```ignore
//! use gw_common::logging::{init_logging, log_request, LogConfig};
//!
//! init_logging(&LogConfig::from_env())?;
//! log_request(&request, gw_redact::Masker::global())?;
//! ```

pub mod config;
pub mod fields;
pub mod layer;

pub use config::{LogConfig, LogFormat, LogLevel};
pub use fields::MaskingFields;
pub use layer::MaskingLayer;

use crate::error::Result;
use crate::request::ProxyRequest;
use gw_redact::Masker;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber.
///
/// `RUST_LOG` overrides the configured level when set. Fails if a global
/// subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> std::result::Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.to_string()));

    match config.format {
        LogFormat::Human => {
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_level(true)
                .with_file(true)
                .with_line_number(true)
                .with_target(false)
                .with_thread_ids(false)
                .with_thread_names(false)
                .with_ansi(false)
                .without_time()
                .fmt_fields(MaskingFields::new(Masker::global().clone()));

            tracing_subscriber::registry()
                .with(filter)
                .with(fmt_layer)
                .try_init()
        }
        LogFormat::Jsonl => tracing_subscriber::registry()
            .with(filter)
            .with(MaskingLayer::stderr())
            .try_init(),
    }
}

/// A masked JSON rendering of `request`.
///
/// Headers, identity keys, path parameters and authorizer claims are masked
/// by key. A JSON body is parsed, masked and re-serialized; a body that is
/// not JSON is kept as text. `request` itself is not modified.
pub fn masked_request(request: &ProxyRequest, masker: &Masker) -> Result<serde_json::Value> {
    let mut event = serde_json::to_value(request)?;
    masker.mask_json_in_place(&mut event, &[]);

    if let Some(body) = request.body.as_deref() {
        if let Ok(mut parsed) = serde_json::from_str::<serde_json::Value>(body) {
            masker.mask_json_in_place(&mut parsed, &[]);
            if let Some(obj) = event.as_object_mut() {
                obj.insert(
                    "body".to_string(),
                    serde_json::Value::String(serde_json::to_string(&parsed)?),
                );
            }
        }
    }

    Ok(event)
}

/// Log the inbound event at info level with sensitive values masked.
pub fn log_request(request: &ProxyRequest, masker: &Masker) -> Result<()> {
    let event = masked_request(request, masker)?;
    tracing::info!(
        request_id = request.request_id().unwrap_or_default(),
        event = %event,
        "inbound request"
    );
    Ok(())
}
