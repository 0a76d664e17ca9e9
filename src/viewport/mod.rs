//! Zoom, pan and rotation of the infrastructure map image.

pub(crate) mod ease;
pub(crate) mod map;

pub use ease::Ease;
pub use map::{MapViewport, ViewState, ViewportOpts};
