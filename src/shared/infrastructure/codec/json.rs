// JSON implementation of the EventCodec port.

use crate::shared::core::primitives::DomainEvent;
use crate::shared::infrastructure::codec::{CodecError, EncodedEvent, EventCodec};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;

pub struct JsonCodec<Event> {
    _event: PhantomData<fn() -> Event>,
}

impl<Event> JsonCodec<Event> {
    pub const fn new() -> Self {
        Self {
            _event: PhantomData,
        }
    }
}

impl<Event> Default for JsonCodec<Event> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Event> EventCodec<Event> for JsonCodec<Event>
where
    Event: DomainEvent + Serialize + DeserializeOwned,
{
    fn encode(&self, event: &Event) -> Result<EncodedEvent, CodecError> {
        let event_type = event.event_type();
        let body = serde_json::to_vec(event).map_err(|source| CodecError::Encode {
            event_type: event_type.to_string(),
            source,
        })?;
        Ok(EncodedEvent {
            event_type: event_type.to_string(),
            body,
        })
    }

    fn decode(&self, event_type: &str, body: &[u8]) -> Result<Event, CodecError> {
        if !Event::EVENT_TYPES.contains(&event_type) {
            return Err(CodecError::UnknownEventType(event_type.to_string()));
        }
        let event: Event = serde_json::from_slice(body).map_err(|source| CodecError::Decode {
            event_type: event_type.to_string(),
            source,
        })?;
        if event.event_type() != event_type {
            return Err(CodecError::TypeMismatch {
                expected: event_type.to_string(),
                actual: event.event_type().to_string(),
            });
        }
        Ok(event)
    }

    fn event_types(&self) -> &[&'static str] {
        Event::EVENT_TYPES
    }
}
