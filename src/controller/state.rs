use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{
    drag::{DragEngine, DropOutcome, HoverNotification},
    geometry::{Offset, Point, Rect},
    record::ContactRecord,
    settings::FillSettings,
    tokens::{Token, TokenKey, TokenSource},
    zones::{DropTarget, DropZoneRegistry},
};

use super::events::{
    emit_event, EventSink, FieldAssignedEvent, PhoneSlotAddedEvent, TokensLoadedEvent,
    FIELD_ASSIGNED_EVENT, HOVER_EVENT, PHONE_SLOT_ADDED_EVENT, TOKENS_LOADED_EVENT,
};

const ENABLE_LOGS: bool = true;

use crate::{log_info, log_warn};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum AssignSource {
    Drop,
    Edit,
}

/// Pointer events from the gesture layer, in absolute screen coordinates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum GestureEvent {
    Start {
        token: TokenKey,
        pointer: Point,
    },
    Update {
        token: TokenKey,
        pointer: Point,
        translation: Offset,
    },
    End {
        token: TokenKey,
        pointer: Point,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropReport {
    pub outcome: DropOutcome,
    /// False for a miss, and for a hit on a phone slot that no longer exists.
    pub applied: bool,
}

/// Everything the manual-fill screen mutates. Lives on the update thread.
pub struct ManualFillState {
    record: ContactRecord,
    registry: DropZoneRegistry,
    source: TokenSource,
    tokens: Vec<Token>,
    engine: DragEngine,
    sink: Arc<dyn EventSink>,
}

impl ManualFillState {
    pub fn new(record: ContactRecord, settings: &FillSettings, sink: Arc<dyn EventSink>) -> Self {
        Self {
            record,
            registry: DropZoneRegistry::new(settings.zones.tie_break),
            source: TokenSource::new(&settings.token),
            tokens: Vec::new(),
            engine: DragEngine::new(),
            sink,
        }
    }

    pub fn record(&self) -> &ContactRecord {
        &self.record
    }

    pub fn registry(&self) -> &DropZoneRegistry {
        &self.registry
    }

    pub fn engine(&self) -> &DragEngine {
        &self.engine
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Replaces the token list. In-flight drags belong to the old list and are dropped.
    pub fn load_tokens(&mut self, raw_text: &str) -> &[Token] {
        let tokens = self.source.normalize(raw_text);
        self.replace_tokens(tokens)
    }

    pub fn load_payload(&mut self, payload: &str) -> &[Token] {
        let tokens = self.source.from_payload(payload);
        self.replace_tokens(tokens)
    }

    fn replace_tokens(&mut self, tokens: Vec<Token>) -> &[Token] {
        for hover in self.engine.clear() {
            emit_event(self.sink.as_ref(), HOVER_EVENT, &hover);
        }
        self.tokens = tokens;
        log_info!("Loaded {} OCR tokens", self.tokens.len());
        emit_event(
            self.sink.as_ref(),
            TOKENS_LOADED_EVENT,
            &TokensLoadedEvent {
                count: self.tokens.len(),
            },
        );
        &self.tokens
    }

    /// Layout callback: a field reports where it currently sits on screen.
    pub fn report_bounds(&mut self, field_id: &str, rect: Rect) -> Result<DropTarget> {
        let target: DropTarget = field_id.parse()?;
        self.registry.register(target, rect);
        Ok(target)
    }

    pub fn gesture_start(&mut self, token: TokenKey, _pointer: Point) -> bool {
        let Some(text) = self.tokens.get(token).map(|t| t.text().to_string()) else {
            log_warn!("gesture start for unknown token {token}");
            return false;
        };
        self.engine.start(token, &text, Utc::now());
        true
    }

    pub fn gesture_update(
        &mut self,
        token: TokenKey,
        pointer: Point,
        translation: Offset,
    ) -> Option<HoverNotification> {
        let hover = self
            .engine
            .update(token, pointer, translation, &self.registry)?;
        emit_event(self.sink.as_ref(), HOVER_EVENT, &hover);
        Some(hover)
    }

    pub fn gesture_end(&mut self, token: TokenKey, pointer: Point) -> Option<DropReport> {
        let end = self.engine.end(token, pointer, &self.registry)?;

        let applied = match &end.outcome {
            DropOutcome::Dropped { target, text } => {
                let applied = self.assign(*target, text.clone(), AssignSource::Drop);
                if !applied {
                    log_warn!("dropped on {target} but that slot does not exist");
                }
                applied
            }
            DropOutcome::Cancelled => false,
        };

        emit_event(self.sink.as_ref(), HOVER_EVENT, &end.hover);

        Some(DropReport {
            outcome: end.outcome,
            applied,
        })
    }

    /// Routes a gesture event, discarding the result.
    pub fn handle_gesture(&mut self, event: GestureEvent) {
        match event {
            GestureEvent::Start { token, pointer } => {
                self.gesture_start(token, pointer);
            }
            GestureEvent::Update {
                token,
                pointer,
                translation,
            } => {
                self.gesture_update(token, pointer, translation);
            }
            GestureEvent::End { token, pointer } => {
                self.gesture_end(token, pointer);
            }
        }
    }

    /// Direct text input into a field.
    pub fn edit_field(&mut self, field_id: &str, value: String) -> Result<bool> {
        let target: DropTarget = field_id.parse()?;
        Ok(self.assign(target, value, AssignSource::Edit))
    }

    pub fn clear_field(&mut self, field_id: &str) -> Result<bool> {
        self.edit_field(field_id, String::new())
    }

    pub fn add_phone_slot(&mut self) -> usize {
        let index = self.record.add_phone_slot();
        emit_event(
            self.sink.as_ref(),
            PHONE_SLOT_ADDED_EVENT,
            &PhoneSlotAddedEvent { index },
        );
        index
    }

    fn assign(&mut self, target: DropTarget, value: String, source: AssignSource) -> bool {
        if !self.record.assign(target, value.clone()) {
            return false;
        }

        if source == AssignSource::Drop {
            log_info!("Assigned token to {target}");
        }
        emit_event(
            self.sink.as_ref(),
            FIELD_ASSIGNED_EVENT,
            &FieldAssignedEvent {
                field_id: target.to_string(),
                value,
                source,
            },
        );
        true
    }
}
