use crate::foundation::error::{OverlayError, OverlayResult};
use std::panic::{AssertUnwindSafe, catch_unwind};

/// Where a render failure happened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorContext {
    /// Component being rendered.
    pub component: String,
    /// 1-based attempt number since the last reload.
    pub attempt: u32,
}

/// Callback receiving every caught render failure.
pub type ErrorHook = Box<dyn FnMut(&OverlayError, &ErrorContext) + Send>;

/// Static fallback shown in place of failed content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fallback {
    pub message: String,
    /// Local retries left before only a reload helps.
    pub retries_left: u32,
    /// A full reload is always offered.
    pub can_reload: bool,
}

impl Fallback {
    pub fn can_retry(&self) -> bool {
        self.retries_left > 0
    }
}

/// Result of rendering through an [`ErrorBoundary`].
#[derive(Debug)]
pub enum BoundaryOutcome<T> {
    Rendered(T),
    Fallback(Fallback),
}

impl<T> BoundaryOutcome<T> {
    pub fn rendered(self) -> Option<T> {
        match self {
            Self::Rendered(v) => Some(v),
            Self::Fallback(_) => None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

/// Outcome of [`ErrorBoundary::retry`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RetryOutcome {
    /// Content will be rendered again; `remaining` retries are left afterwards.
    Retrying { remaining: u32 },
    /// The retry budget is spent; only [`ErrorBoundary::reload`] recovers.
    ReloadRequired,
    /// Nothing had failed.
    NotTripped,
}

/// Contains render failures so they never propagate past the overlay.
///
/// Once tripped, the boundary keeps returning its fallback without re-running the content until
/// [`ErrorBoundary::retry`] or [`ErrorBoundary::reload`] is called.
pub struct ErrorBoundary {
    max_retries: u32,
    retries_used: u32,
    attempts: u32,
    failure: Option<String>,
    on_error: Option<ErrorHook>,
}

impl std::fmt::Debug for ErrorBoundary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErrorBoundary")
            .field("max_retries", &self.max_retries)
            .field("retries_used", &self.retries_used)
            .field("failure", &self.failure)
            .finish_non_exhaustive()
    }
}

impl ErrorBoundary {
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            retries_used: 0,
            attempts: 0,
            failure: None,
            on_error: None,
        }
    }

    /// Install the failure callback.
    pub fn set_on_error(&mut self, hook: ErrorHook) {
        self.on_error = Some(hook);
    }

    pub fn is_tripped(&self) -> bool {
        self.failure.is_some()
    }

    pub fn retries_left(&self) -> u32 {
        self.max_retries.saturating_sub(self.retries_used)
    }

    /// Message of the failure currently shown, if any.
    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// Run `f`, turning errors and panics into a fallback.
    pub fn render<T>(
        &mut self,
        component: &str,
        f: impl FnOnce() -> OverlayResult<T>,
    ) -> BoundaryOutcome<T> {
        if self.failure.is_some() {
            return BoundaryOutcome::Fallback(self.fallback());
        }
        self.attempts += 1;

        let err = match catch_unwind(AssertUnwindSafe(f)) {
            Ok(Ok(v)) => return BoundaryOutcome::Rendered(v),
            Ok(Err(e)) => e,
            Err(payload) => OverlayError::render(panic_message(payload.as_ref())),
        };

        let ctx = ErrorContext {
            component: component.to_owned(),
            attempt: self.attempts,
        };
        tracing::error!(component, attempt = ctx.attempt, error = %err, "render failed");
        if let Some(hook) = self.on_error.as_mut() {
            hook(&err, &ctx);
        }
        self.failure = Some(err.to_string());
        BoundaryOutcome::Fallback(self.fallback())
    }

    /// Clear the failure and spend one retry.
    pub fn retry(&mut self) -> RetryOutcome {
        if self.failure.is_none() {
            return RetryOutcome::NotTripped;
        }
        if self.retries_used >= self.max_retries {
            return RetryOutcome::ReloadRequired;
        }
        self.retries_used += 1;
        self.failure = None;
        RetryOutcome::Retrying {
            remaining: self.retries_left(),
        }
    }

    /// Full reload: clear the failure and restore the retry budget.
    pub fn reload(&mut self) {
        tracing::info!("error boundary reloaded");
        self.failure = None;
        self.retries_used = 0;
        self.attempts = 0;
    }

    fn fallback(&self) -> Fallback {
        Fallback {
            message: self
                .failure
                .clone()
                .unwrap_or_else(|| "something went wrong".to_owned()),
            retries_left: self.retries_left(),
            can_reload: true,
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        return format!("panic: {s}");
    }
    if let Some(s) = payload.downcast_ref::<String>() {
        return format!("panic: {s}");
    }
    "panic: <non-string payload>".to_owned()
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/boundary.rs"]
mod tests;
