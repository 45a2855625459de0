//! Terminal presentation: widget renderers, the warehouse detail state
//! machine, viewport tracking and assistant HTML conversion.

pub mod html;
pub mod render;
pub mod state;
pub mod viewport;

pub use state::{DetailState, RequestToken, Resolution, WarehouseView};
pub use viewport::{Layout, ResizeAction, ResizeTracker, Viewport};
