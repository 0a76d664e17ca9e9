//! Interactive overlay engine for the Huế data-centre infrastructure map.
//!
//! The crate models everything the map page does apart from drawing pixels:
//!
//! - Load and validate hotspot, image and detail fixtures ([`SiteFixtures`])
//! - Track tooltip and detail-panel disclosure across hotspots ([`DisclosureState`])
//! - Drive the timed 2N+1 redundancy reveal ([`RevealSequencer`], [`RevealDriver`])
//! - Contain render failures inside the overlay ([`ErrorBoundary`], [`RedundancyOverlay`])
//! - Zoom and pan the map with eased transitions ([`MapViewport`])
//!
//! Time is always passed in explicitly as [`Millis`], so every state machine is deterministic
//! under test.
#![forbid(unsafe_code)]

mod foundation;

/// Overlay configuration.
pub mod config;
/// Fixture bundle loading.
pub mod fixtures;
/// Hotspot model, loading, placement and disclosure.
pub mod hotspot;
/// Redundancy overlay and error boundary.
pub mod overlay;
/// Timed reveal sequencing.
pub mod reveal;
/// Map zoom and pan.
pub mod viewport;

pub use crate::foundation::core::{ImageDims, Millis, PercentPos, Point, Vec2, to_percent};
pub use crate::foundation::error::{OverlayError, OverlayResult};

pub use crate::config::{BoundaryOpts, OverlayConfig, RevealOpts};
pub use crate::fixtures::SiteFixtures;
pub use crate::hotspot::{
    DetailError, DetailFixture, DetailView, DisclosureCommand, DisclosureEffect, DisclosureState,
    FocusTarget, Hotspot, HotspotCatalog, HotspotKind, HotspotMetadata, HotspotStatus,
    ImageConfig, Key, RecordError, TooltipView,
};
pub use crate::overlay::{
    BoundaryOutcome, ErrorBoundary, ErrorContext, Fallback, OverlayFrame, RedundancyOverlay,
    RedundancyStats, RetryOutcome,
};
pub use crate::reveal::{
    PhaseEvent, RevealDriver, RevealPhase, RevealSchedule, RevealSequencer, TimerArena,
};
pub use crate::viewport::{Ease, MapViewport, ViewState, ViewportOpts};
