//! Event emission abstraction.
//!
//! The gallery core reports additions, removals and failures through an
//! [`EventSink`] so any front end can react without the core knowing about it.

use std::sync::Arc;

use serde::Serialize;

use crate::models::photo::{FailureKind, PhotoId};

/// Event emitted after a photo is inserted.
pub const PHOTO_ADDED: &str = "photo-added";
/// Event emitted after a photo is removed.
pub const PHOTO_REMOVED: &str = "photo-removed";
/// Event emitted when a file could not be ingested.
pub const INGEST_FAILED: &str = "ingest-failed";
/// Event emitted when every file of a batch has settled.
pub const BATCH_FINISHED: &str = "batch-finished";

/// Trait for emitting events to the frontend.
pub trait EventSink: Send + Sync {
    /// Emit an event with the given name and JSON payload.
    ///
    /// # Arguments
    /// * `event_name` - The name of the event (e.g., "photo-added")
    /// * `payload_json` - JSON-serialized payload string
    fn emit(&self, event_name: &str, payload_json: &str);
}

/// Extension trait for EventSink that provides typed emit functionality.
pub trait EventSinkExt {
    /// Emit an event with a typed payload that will be serialized to JSON.
    fn emit_typed<T: Serialize>(&self, event_name: &str, payload: &T);
}

impl<S: EventSink + ?Sized> EventSinkExt for S {
    fn emit_typed<T: Serialize>(&self, event_name: &str, payload: &T) {
        match serde_json::to_string(payload) {
            Ok(json) => self.emit(event_name, &json),
            Err(e) => {
                tracing::error!("Failed to serialize event payload: {}", e);
            }
        }
    }
}

/// Shared reference to an EventSink implementation.
pub type SharedEventSink = Arc<dyn EventSink>;

/// Payload of [`PHOTO_ADDED`] and [`PHOTO_REMOVED`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoEventPayload {
    pub id: PhotoId,
    pub file_name: String,
}

/// Payload of [`INGEST_FAILED`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureEventPayload {
    pub id: PhotoId,
    pub file_name: String,
    pub kind: FailureKind,
    pub message: String,
}

/// No-op event sink for testing or when events are not needed.
#[derive(Debug, Clone, Default)]
pub struct NoOpEventSink;

impl EventSink for NoOpEventSink {
    fn emit(&self, _event_name: &str, _payload_json: &str) {}
}

/// Logging event sink for debugging purposes.
#[derive(Debug, Clone, Default)]
pub struct LoggingEventSink;

impl EventSink for LoggingEventSink {
    fn emit(&self, event_name: &str, payload_json: &str) {
        tracing::debug!(event = event_name, payload = payload_json, "Event emitted");
    }
}


#[cfg(test)]
mod tests {
    use super::testing::RecordingEventSink;
    use super::*;

    #[test]
    fn test_emit_typed_serializes_camel_case() {
        let sink = RecordingEventSink::default();
        sink.emit_typed(
            PHOTO_ADDED,
            &PhotoEventPayload {
                id: PhotoId::new(7),
                file_name: "a.jpg".into(),
            },
        );

        assert_eq!(sink.names(), [PHOTO_ADDED]);
        assert_eq!(
            sink.payloads(PHOTO_ADDED)[0],
            serde_json::json!({ "id": 7, "fileName": "a.jpg" })
        );
    }

    #[test]
    fn test_shared_sink_is_object_safe() {
        let sink: SharedEventSink = Arc::new(NoOpEventSink);
        sink.emit_typed(BATCH_FINISHED, &serde_json::json!({ "added": 0 }));
    }
}
