//! Drag-and-drop filling of contact fields from business card OCR output.
//!
//! Raw OCR text becomes a list of [`Token`]s, the host UI reports where each
//! contact field sits on screen, and pointer gestures on a token assign its
//! text to whichever field it is released over. All state lives on the
//! [`FillController`] update thread.

pub mod controller;
pub mod drag;
pub mod geometry;
pub mod record;
pub mod settings;
pub mod tokens;
pub mod utils;
pub mod zones;

pub use controller::{
    AssignSource, ChannelSink, DropReport, EmittedEvent, EventSink, FillController,
    GestureEvent, LogSink, ManualFillState, NullSink,
};
pub use drag::{DragEngine, DragPhase, DragSession, DropOutcome, HoverNotification};
pub use geometry::{Offset, Point, Rect};
pub use record::ContactRecord;
pub use settings::{FillSettings, SettingsStore, TokenSettings, ZoneSettings};
pub use tokens::{Token, TokenKey, TokenSource};
pub use utils::init_logging;
pub use zones::{ContactField, DropTarget, DropZone, DropZoneRegistry, TieBreak};
