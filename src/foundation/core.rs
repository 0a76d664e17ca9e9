use crate::foundation::error::{OverlayError, OverlayResult};

pub use kurbo::{Point, Vec2};

/// Absolute millisecond timestamp on the overlay's own timeline.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct Millis(pub u64);

impl Millis {
    /// Timeline origin.
    pub const ZERO: Self = Self(0);

    /// Shift forward by `ms` milliseconds using saturating arithmetic.
    pub fn after(self, ms: u64) -> Self {
        Self(self.0.saturating_add(ms))
    }

    /// Milliseconds elapsed since `earlier`, or zero when `earlier` is in the future.
    pub fn since(self, earlier: Millis) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

/// Native pixel dimensions of the reference image.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ImageDims {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl ImageDims {
    /// Create validated dimensions; both sides must be finite and positive.
    pub fn new(width: f64, height: f64) -> OverlayResult<Self> {
        if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
            return Err(OverlayError::validation(
                "image dimensions must be finite and > 0",
            ));
        }
        Ok(Self { width, height })
    }

    /// Image centre in pixel space.
    pub fn center(self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Return `true` when `p` lies inside `[0, width] x [0, height]`.
    pub fn contains(self, p: Point) -> bool {
        (0.0..=self.width).contains(&p.x) && (0.0..=self.height).contains(&p.y)
    }
}

/// Position expressed as a percentage of the image size (`0..=100` inside the image).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PercentPos {
    /// Percent from the left edge.
    pub left: f64,
    /// Percent from the top edge.
    pub top: f64,
}

impl PercentPos {
    /// CSS-style `left`/`top` strings, e.g. `("50%", "25%")`.
    pub fn css(self) -> (String, String) {
        (format!("{}%", self.left), format!("{}%", self.top))
    }
}

/// Convert a pixel-space position into a percentage-of-image position.
pub fn to_percent(pixel: Point, dims: ImageDims) -> PercentPos {
    PercentPos {
        left: pixel.x / dims.width * 100.0,
        top: pixel.y / dims.height * 100.0,
    }
}
