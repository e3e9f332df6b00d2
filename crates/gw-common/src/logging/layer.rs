//! Tracing layer that writes masked JSONL records.
//!
//! Each event becomes one JSON object. Event fields named in the sensitive
//! set are replaced by `****`, and string fields that hold a JSON object or
//! array are parsed and masked structurally before being written. JSON
//! embedded in the message or in other text fields is masked in place.

use std::io::{self, Write};
use std::sync::Mutex;

use chrono::Utc;
use gw_redact::Masker;
use tracing::span::{Attributes, Id};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

/// Correlation data captured from enclosing spans.
#[derive(Debug, Clone, Default)]
struct SpanContext {
    request_id: Option<String>,
}

/// Collects event fields as JSON.
struct JsonFieldVisitor {
    fields: serde_json::Map<String, serde_json::Value>,
    message: Option<String>,
}

impl JsonFieldVisitor {
    fn new() -> Self {
        JsonFieldVisitor {
            fields: serde_json::Map::new(),
            message: None,
        }
    }

    fn insert_text(&mut self, name: &str, text: String) {
        if name == "message" {
            self.message = Some(text);
        } else {
            self.fields.insert(name.to_string(), parse_structured(text));
        }
    }
}

/// Keep JSON object/array text as structure so nested keys can be masked.
fn parse_structured(text: String) -> serde_json::Value {
    let trimmed = text.trim_start();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        if let Ok(value) = serde_json::from_str(&text) {
            return value;
        }
    }
    serde_json::Value::String(text)
}

impl tracing::field::Visit for JsonFieldVisitor {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.insert_text(field.name(), value.to_string());
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.insert_text(field.name(), format!("{:?}", value));
    }

    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        self.fields.insert(
            field.name().to_string(),
            serde_json::Value::Number(value.into()),
        );
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.fields.insert(
            field.name().to_string(),
            serde_json::Value::Number(value.into()),
        );
    }

    fn record_f64(&mut self, field: &tracing::field::Field, value: f64) {
        if let Some(n) = serde_json::Number::from_f64(value) {
            self.fields
                .insert(field.name().to_string(), serde_json::Value::Number(n));
        }
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.fields
            .insert(field.name().to_string(), serde_json::Value::Bool(value));
    }
}

struct SpanContextVisitor {
    context: SpanContext,
}

impl tracing::field::Visit for SpanContextVisitor {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "request_id" {
            self.context.request_id = Some(value.to_string());
        }
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "request_id" {
            self.context.request_id = Some(format!("{:?}", value));
        }
    }
}

/// JSONL layer that masks sensitive fields.
pub struct MaskingLayer<W = io::Stderr> {
    writer: Mutex<W>,
    masker: Masker,
}

impl MaskingLayer<io::Stderr> {
    /// Write to stderr using the default sensitive names.
    pub fn stderr() -> Self {
        MaskingLayer::new(io::stderr())
    }
}

impl<W: Write> MaskingLayer<W> {
    pub fn new(writer: W) -> Self {
        MaskingLayer {
            writer: Mutex::new(writer),
            masker: Masker::global().clone(),
        }
    }

    /// Use a deployment-specific masker.
    pub fn with_masker(mut self, masker: Masker) -> Self {
        self.masker = masker;
        self
    }
}

impl<S, W> Layer<S> for MaskingLayer<W>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: Write + 'static,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        let mut visitor = SpanContextVisitor {
            context: SpanContext::default(),
        };
        attrs.record(&mut visitor);

        if let Some(span) = ctx.span(id) {
            span.extensions_mut().insert(visitor.context);
        }
    }

    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        let ts = Utc::now();

        let mut request_id = None;
        if let Some(scope) = ctx.event_scope(event) {
            for span in scope {
                if let Some(span_ctx) = span.extensions().get::<SpanContext>() {
                    if request_id.is_none() {
                        request_id.clone_from(&span_ctx.request_id);
                    }
                }
            }
        }

        let mut visitor = JsonFieldVisitor::new();
        event.record(&mut visitor);

        let meta = event.metadata();
        let mut obj = serde_json::Map::new();
        obj.insert("ts".to_string(), serde_json::json!(ts.to_rfc3339()));
        obj.insert(
            "level".to_string(),
            serde_json::json!(meta.level().as_str().to_lowercase()),
        );
        obj.insert("target".to_string(), serde_json::json!(meta.target()));
        if let (Some(file), Some(line)) = (meta.file(), meta.line()) {
            obj.insert("source".to_string(), serde_json::json!(format!("{}:{}", file, line)));
        }
        if let Some(id) = request_id {
            obj.insert("request_id".to_string(), serde_json::json!(id));
        }
        if let Some(msg) = visitor.message {
            obj.insert(
                "message".to_string(),
                serde_json::json!(self.masker.mask_text(&msg, &[])),
            );
        }

        if !visitor.fields.is_empty() {
            let mut fields = serde_json::Value::Object(visitor.fields);
            self.masker.mask_json_in_place(&mut fields, &[]);
            if let Some(fields) = fields.as_object_mut() {
                // Text that only embeds JSON was not parsed as a document.
                for value in fields.values_mut() {
                    if let serde_json::Value::String(text) = value {
                        *text = self.masker.mask_text(text, &[]);
                    }
                }
            }
            obj.insert("fields".to_string(), fields);
        }

        let json = serde_json::to_string(&serde_json::Value::Object(obj)).unwrap_or_default();
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", json);
        }
    }
}
