//! Outbound notifications for the host UI.
//!
//! The controller never talks to a UI toolkit directly; hosts plug their own
//! emitter in through [`EventSink`].

use serde::Serialize;
use serde_json::Value;
use tokio::sync::mpsc;

pub const HOVER_EVENT: &str = "drop-zone-hover";
pub const FIELD_ASSIGNED_EVENT: &str = "field-assigned";
pub const PHONE_SLOT_ADDED_EVENT: &str = "phone-slot-added";
pub const TOKENS_LOADED_EVENT: &str = "tokens-loaded";

const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_error};

pub trait EventSink: Send + Sync {
    fn emit(&self, event: &str, payload: Value);
}

/// Discards everything.
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: &str, _payload: Value) {}
}

pub struct LogSink;

impl EventSink for LogSink {
    fn emit(&self, event: &str, payload: Value) {
        log_debug!("{event}: {payload}");
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmittedEvent {
    pub name: String,
    pub payload: Value,
}

/// Forwards events to an async receiver.
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<EmittedEvent>,
}

impl ChannelSink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<EmittedEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl EventSink for ChannelSink {
    fn emit(&self, event: &str, payload: Value) {
        // a closed receiver means the host stopped listening
        let _ = self.tx.send(EmittedEvent {
            name: event.to_string(),
            payload,
        });
    }
}

pub(crate) fn emit_event<T: Serialize>(sink: &dyn EventSink, event: &str, payload: &T) {
    match serde_json::to_value(payload) {
        Ok(value) => sink.emit(event, value),
        Err(err) => log_error!("failed to serialize {event} payload: {err}"),
    }
}

#[derive(Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FieldAssignedEvent {
    pub field_id: String,
    pub value: String,
    pub source: super::AssignSource,
}

#[derive(Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PhoneSlotAddedEvent {
    pub index: usize,
}

#[derive(Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TokensLoadedEvent {
    pub count: usize,
}
