pub mod events;
pub mod fill;
pub mod state;

pub use events::{ChannelSink, EmittedEvent, EventSink, LogSink, NullSink};
pub use fill::FillController;
pub use state::{AssignSource, DropReport, GestureEvent, ManualFillState};
