//! The full-page 2N+1 redundancy overlay and the error boundary around its content.

pub(crate) mod boundary;
pub(crate) mod redundancy;

pub use boundary::{
    BoundaryOutcome, ErrorBoundary, ErrorContext, ErrorHook, Fallback, RetryOutcome,
};
pub use redundancy::{
    BACK_LABEL, CLOSE_LABEL, LineRole, OverlayFrame, RedundancyOverlay, RedundancyStats,
    SourceGroup, TransmissionLine,
};
