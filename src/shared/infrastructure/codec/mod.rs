// Event codec port.
//
// Purpose
// - Turn a typed event into a (type tag, bytes) pair and back, so stores never depend on event shapes.
//
// Boundaries
// - A codec failure concerns one record only. Stores surface it to the caller and never skip the record.

use thiserror::Error;

pub mod json;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("unknown event type: {0}")]
    UnknownEventType(String),

    #[error("failed to decode {event_type}: {source}")]
    Decode {
        event_type: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("stored as {expected} but body decodes to {actual}")]
    TypeMismatch { expected: String, actual: String },

    #[error("failed to encode {event_type}: {source}")]
    Encode {
        event_type: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedEvent {
    pub event_type: String,
    pub body: Vec<u8>,
}

pub trait EventCodec<Event>: Send + Sync {
    fn encode(&self, event: &Event) -> Result<EncodedEvent, CodecError>;
    fn decode(&self, event_type: &str, body: &[u8]) -> Result<Event, CodecError>;

    /// Every type tag this codec can decode.
    fn event_types(&self) -> &[&'static str];
}
