pub mod registry;
pub mod target;

pub use registry::{DropZone, DropZoneRegistry, TieBreak};
pub use target::{ContactField, DropTarget};
