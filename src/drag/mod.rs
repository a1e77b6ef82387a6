pub mod engine;
pub mod state;

pub use engine::{DragEnd, DragEngine, DropOutcome, HoverNotification};
pub use state::{DragPhase, DragSession};
