use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::geometry::{Offset, Point};
use crate::tokens::TokenKey;
use crate::zones::{DropTarget, DropZoneRegistry};

use super::{DragPhase, DragSession};

const ENABLE_LOGS: bool = false;

use crate::log_debug;

/// Which zone, if any, is under the pointer of a dragged token.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HoverNotification {
    pub token_index: TokenKey,
    pub field_id: Option<DropTarget>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    Dropped { target: DropTarget, text: String },
    Cancelled,
}

impl DropOutcome {
    pub fn phase(&self) -> DragPhase {
        match self {
            DropOutcome::Dropped { .. } => DragPhase::Dropped,
            DropOutcome::Cancelled => DragPhase::Cancelled,
        }
    }
}

/// Result of a gesture end: the drop decision plus the hover clear that always follows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragEnd {
    pub outcome: DropOutcome,
    pub hover: HoverNotification,
}

/// Per-token drag sessions. Tokens drag independently; the only shared input
/// is the registry, which is read but never written here.
#[derive(Debug, Default)]
pub struct DragEngine {
    sessions: HashMap<TokenKey, DragSession>,
}

impl DragEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self, token: TokenKey) -> DragPhase {
        self.sessions
            .get(&token)
            .map(DragSession::phase)
            .unwrap_or_default()
    }

    pub fn session(&self, token: TokenKey) -> Option<&DragSession> {
        self.sessions.get(&token).filter(|session| session.active)
    }

    pub fn active_count(&self) -> usize {
        self.sessions.values().filter(|session| session.active).count()
    }

    /// A second start on an already dragging token restarts its session.
    pub fn start(&mut self, token: TokenKey, text: &str, now: DateTime<Utc>) -> &DragSession {
        let session = self.sessions.entry(token).or_default();
        session.begin(text, now);
        log_debug!("drag start token={token} text={text:?}");
        session
    }

    /// Returns `None` when `token` has no active session.
    pub fn update(
        &mut self,
        token: TokenKey,
        pointer: Point,
        translation: Offset,
        registry: &DropZoneRegistry,
    ) -> Option<HoverNotification> {
        let session = self.sessions.get_mut(&token).filter(|s| s.active)?;
        let hovered = registry.hit_test(pointer);
        session.track(translation, hovered);

        Some(HoverNotification {
            token_index: token,
            field_id: hovered,
        })
    }

    /// Decides the drop and resets the session to rest. `None` when not dragging.
    pub fn end(
        &mut self,
        token: TokenKey,
        pointer: Point,
        registry: &DropZoneRegistry,
    ) -> Option<DragEnd> {
        let session = self.sessions.get_mut(&token).filter(|s| s.active)?;

        let outcome = match registry.hit_test(pointer) {
            Some(target) => DropOutcome::Dropped {
                target,
                text: session.token_text.clone(),
            },
            None => DropOutcome::Cancelled,
        };
        session.reset();
        log_debug!("drag end token={token} outcome={outcome:?}");

        Some(DragEnd {
            outcome,
            hover: HoverNotification {
                token_index: token,
                field_id: None,
            },
        })
    }

    /// Forgets every session, e.g. when the token list is replaced.
    ///
    /// Returns a hover clear for each session that was over a zone, so the
    /// host can drop its highlight.
    pub fn clear(&mut self) -> Vec<HoverNotification> {
        let mut owed: Vec<HoverNotification> = self
            .sessions
            .iter()
            .filter(|(_, session)| session.active && session.hovered.is_some())
            .map(|(token, _)| HoverNotification {
                token_index: *token,
                field_id: None,
            })
            .collect();
        owed.sort_by_key(|hover| hover.token_index);
        self.sessions.clear();
        owed
    }
}
