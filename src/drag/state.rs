use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::Offset;
use crate::zones::DropTarget;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum DragPhase {
    Idle,
    Dragging,
    Dropped,
    Cancelled,
}

impl Default for DragPhase {
    fn default() -> Self {
        DragPhase::Idle
    }
}

/// Live state of one token's drag gesture.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DragSession {
    pub id: Option<Uuid>,
    pub token_text: String,
    pub current_offset: Offset,
    pub active: bool,
    pub hovered: Option<DropTarget>,
    pub started_at: Option<DateTime<Utc>>,
}

impl Default for DragSession {
    fn default() -> Self {
        Self {
            id: None,
            token_text: String::new(),
            current_offset: Offset::ZERO,
            active: false,
            hovered: None,
            started_at: None,
        }
    }
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> DragPhase {
        if self.active {
            DragPhase::Dragging
        } else {
            DragPhase::Idle
        }
    }

    pub fn begin(&mut self, token_text: &str, started_at: DateTime<Utc>) {
        *self = Self {
            id: Some(Uuid::new_v4()),
            token_text: token_text.to_string(),
            current_offset: Offset::ZERO,
            active: true,
            hovered: None,
            started_at: Some(started_at),
        };
    }

    /// Last update wins; there is no smoothing or coalescing.
    pub fn track(&mut self, offset: Offset, hovered: Option<DropTarget>) {
        self.current_offset = offset;
        self.hovered = hovered;
    }

    /// Back to rest: offset zero, hover cleared.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
