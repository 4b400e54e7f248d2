//! Push-channel frame model and codecs for the processing and logs namespaces.
//!
//! This crate owns the wire representation shared by the browser client and
//! the operator console. Payloads stay flexible (`serde_json::Value`); frames
//! travel either as protobuf binary messages or as JSON text messages.

use prost::Message;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Event sent by the server right after a socket opens.
pub const SESSION_CONNECTED: &str = "session:connected";

/// Error returned by the decoders.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The raw bytes could not be decoded as a protobuf `WireFrame`.
    #[error("failed to decode protobuf frame: {0}")]
    Decode(#[from] prost::DecodeError),
    /// A text message was not a valid JSON frame.
    #[error("failed to decode json frame: {0}")]
    Json(#[from] serde_json::Error),
    /// The `status` integer on the wire does not map to a known [`Status`] variant.
    #[error("invalid frame status: {0}")]
    InvalidStatus(i32),
}

/// Lifecycle status of a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Frame sent by the client.
    Request,
    /// Successful server push or response.
    Done,
    /// Error response.
    Error,
}

impl Status {
    /// Convert status into wire enum integer value.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        match self {
            Self::Request => WireFrameStatus::Request as i32,
            Self::Done => WireFrameStatus::Done as i32,
            Self::Error => WireFrameStatus::Error as i32,
        }
    }

    fn from_i32(value: i32) -> Result<Self, CodecError> {
        match WireFrameStatus::try_from(value) {
            Ok(WireFrameStatus::Request) => Ok(Self::Request),
            Ok(WireFrameStatus::Done) => Ok(Self::Done),
            Ok(WireFrameStatus::Error) => Ok(Self::Error),
            Err(_) => Err(CodecError::InvalidStatus(value)),
        }
    }
}

/// Push-notification namespace. Each namespace is its own websocket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// Remote-processing results, correlated by session id.
    Processing,
    /// Log record create/update/delete notifications.
    Logs,
}

impl Namespace {
    /// Path of the websocket endpoint, relative to the server origin.
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Processing => "/ws/processing",
            Self::Logs => "/ws/logs",
        }
    }

    /// Short name used in logs and CLI output.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Processing => "processing",
            Self::Logs => "logs",
        }
    }
}

/// A single message on the push channel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Unique identifier for this frame.
    pub id: String,
    /// ID of the request frame this is responding to, if any.
    #[serde(default)]
    pub parent_id: Option<String>,
    /// Milliseconds since the Unix epoch when the frame was created.
    #[serde(default)]
    pub ts: i64,
    /// Socket session this frame is addressed to, if it is request-scoped.
    #[serde(default)]
    pub session_id: Option<String>,
    /// Sender identifier (user or system label).
    #[serde(default)]
    pub from: Option<String>,
    /// Namespaced event name, e.g. `"transaction_log:created"`.
    pub event: String,
    /// Lifecycle position of the frame.
    pub status: Status,
    /// Arbitrary JSON payload.
    #[serde(default = "empty_object")]
    pub data: Value,
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

impl Frame {
    /// Build a server-push frame carrying `data`.
    #[must_use]
    pub fn push(id: impl Into<String>, event: impl Into<String>, data: Value) -> Self {
        Self {
            id: id.into(),
            parent_id: None,
            ts: 0,
            session_id: None,
            from: None,
            event: event.into(),
            status: Status::Done,
            data,
        }
    }

    /// Address the frame to a socket session.
    #[must_use]
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    /// Topic half of the event name (`"transaction_log"` in `"transaction_log:created"`).
    #[must_use]
    pub fn topic(&self) -> &str {
        event_parts(&self.event).0
    }

    /// Verb half of the event name (`"created"` in `"transaction_log:created"`).
    #[must_use]
    pub fn verb(&self) -> &str {
        event_parts(&self.event).1
    }

    /// Session id announced by a `session:connected` frame.
    #[must_use]
    pub fn connected_session_id(&self) -> Option<&str> {
        if self.event != SESSION_CONNECTED {
            return None;
        }
        self.data
            .get("session_id")
            .and_then(Value::as_str)
            .or(self.session_id.as_deref())
    }

    /// Server-supplied error message for error frames.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        if self.status != Status::Error {
            return None;
        }
        Some(
            self.data
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown push-channel error"),
        )
    }
}

/// Split an event name into `(topic, verb)` at the last `:`.
///
/// Events without a separator have an empty verb.
#[must_use]
pub fn event_parts(event: &str) -> (&str, &str) {
    match event.rsplit_once(':') {
        Some((topic, verb)) => (topic, verb),
        None => (event, ""),
    }
}

/// Encode a frame into protobuf bytes.
#[must_use]
pub fn encode_frame(frame: &Frame) -> Vec<u8> {
    let wire = frame_to_wire(frame);

    let mut out = Vec::with_capacity(wire.encoded_len());
    // Encoding into a growable Vec cannot run out of buffer space.
    wire.encode(&mut out).unwrap_or_default();
    out
}

/// Decode protobuf bytes into a frame.
///
/// # Errors
///
/// Returns [`CodecError::Decode`] for malformed bytes and
/// [`CodecError::InvalidStatus`] for out-of-range status values.
pub fn decode_frame(bytes: &[u8]) -> Result<Frame, CodecError> {
    let wire = WireFrame::decode(bytes)?;
    wire_to_frame(wire)
}

/// Encode a frame as a JSON text message.
///
/// # Errors
///
/// Returns [`CodecError::Json`] if the payload cannot be serialized.
pub fn encode_text_frame(frame: &Frame) -> Result<String, CodecError> {
    Ok(serde_json::to_string(frame)?)
}

/// Decode a JSON text message into a frame.
///
/// # Errors
///
/// Returns [`CodecError::Json`] for malformed JSON or missing required fields.
pub fn decode_text_frame(text: &str) -> Result<Frame, CodecError> {
    Ok(serde_json::from_str(text)?)
}

fn frame_to_wire(frame: &Frame) -> WireFrame {
    WireFrame {
        id: frame.id.clone(),
        parent_id: frame.parent_id.clone(),
        ts: frame.ts,
        session_id: frame.session_id.clone(),
        from: frame.from.clone(),
        event: frame.event.clone(),
        status: frame.status.as_i32(),
        data: Some(json_to_proto_value(&frame.data)),
    }
}

fn wire_to_frame(wire: WireFrame) -> Result<Frame, CodecError> {
    Ok(Frame {
        id: wire.id,
        parent_id: wire.parent_id,
        ts: wire.ts,
        session_id: wire.session_id,
        from: wire.from,
        event: wire.event,
        status: Status::from_i32(wire.status)?,
        data: wire.data.map_or_else(empty_object, |v| proto_to_json_value(&v)),
    })
}

fn json_to_proto_value(value: &Value) -> prost_types::Value {
    let kind = match value {
        Value::Null => prost_types::value::Kind::NullValue(prost_types::NullValue::NullValue as i32),
        Value::Bool(v) => prost_types::value::Kind::BoolValue(*v),
        Value::Number(v) => prost_types::value::Kind::NumberValue(v.as_f64().unwrap_or(0.0)),
        Value::String(v) => prost_types::value::Kind::StringValue(v.clone()),
        Value::Array(v) => prost_types::value::Kind::ListValue(prost_types::ListValue {
            values: v.iter().map(json_to_proto_value).collect(),
        }),
        Value::Object(v) => prost_types::value::Kind::StructValue(prost_types::Struct {
            fields: v.iter().map(|(k, v)| (k.clone(), json_to_proto_value(v))).collect(),
        }),
    };

    prost_types::Value { kind: Some(kind) }
}

/// Largest magnitude at which every integer is exactly representable in f64.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

#[allow(clippy::cast_possible_truncation)]
fn number_to_json(v: f64) -> Value {
    // Protobuf only carries doubles; record ids must come back as integers.
    if v.fract() == 0.0 && v.abs() <= MAX_EXACT_INTEGER {
        return Value::Number(serde_json::Number::from(v as i64));
    }
    serde_json::Number::from_f64(v).map_or(Value::Null, Value::Number)
}

fn proto_to_json_value(value: &prost_types::Value) -> Value {
    let Some(kind) = &value.kind else {
        return Value::Null;
    };

    match kind {
        prost_types::value::Kind::NullValue(_) => Value::Null,
        prost_types::value::Kind::NumberValue(v) => number_to_json(*v),
        prost_types::value::Kind::StringValue(v) => Value::String(v.clone()),
        prost_types::value::Kind::BoolValue(v) => Value::Bool(*v),
        prost_types::value::Kind::StructValue(v) => Value::Object(
            v.fields
                .iter()
                .map(|(k, v)| (k.clone(), proto_to_json_value(v)))
                .collect(),
        ),
        prost_types::value::Kind::ListValue(v) => Value::Array(v.values.iter().map(proto_to_json_value).collect()),
    }
}

#[derive(Clone, PartialEq, Message)]
struct WireFrame {
    #[prost(string, tag = "1")]
    id: String,
    #[prost(string, optional, tag = "2")]
    parent_id: Option<String>,
    #[prost(int64, tag = "3")]
    ts: i64,
    #[prost(string, optional, tag = "4")]
    session_id: Option<String>,
    #[prost(string, optional, tag = "5")]
    from: Option<String>,
    #[prost(string, tag = "6")]
    event: String,
    #[prost(enumeration = "WireFrameStatus", tag = "7")]
    status: i32,
    #[prost(message, optional, tag = "8")]
    data: Option<prost_types::Value>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, prost::Enumeration)]
#[repr(i32)]
enum WireFrameStatus {
    Request = 0,
    Done = 1,
    Error = 2,
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
