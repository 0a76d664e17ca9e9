use crate::foundation::core::{ImageDims, Millis, Vec2};
use crate::foundation::error::{OverlayError, OverlayResult};
use crate::hotspot::model::Hotspot;
use crate::viewport::ease::{Ease, lerp};

/// Pan travel allowed per unit of zoom above 1x, in pixels.
const PAN_PER_ZOOM: f64 = 200.0;

/// Options for [`MapViewport`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ViewportOpts {
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub enable_rotation: bool,
    /// Clamp pan to `±(zoom - 1) * 200` pixels.
    pub enable_bounds: bool,
    /// Transition length; zero applies changes instantly.
    pub transition_ms: u64,
    /// Zoom level used by [`MapViewport::zoom_to_hotspot`].
    pub focus_zoom: f64,
    pub ease: Ease,
}

impl Default for ViewportOpts {
    fn default() -> Self {
        Self {
            min_zoom: 0.5,
            max_zoom: 3.0,
            enable_rotation: false,
            enable_bounds: true,
            transition_ms: 300,
            focus_zoom: 2.0,
            ease: Ease::InOutCubic,
        }
    }
}

impl ViewportOpts {
    pub fn validate(&self) -> OverlayResult<()> {
        let finite_pos = |v: f64| v.is_finite() && v > 0.0;
        if !finite_pos(self.min_zoom) || !finite_pos(self.max_zoom) {
            return Err(OverlayError::configuration(
                "viewport zoom limits must be finite and > 0",
            ));
        }
        if self.min_zoom > self.max_zoom {
            return Err(OverlayError::configuration(
                "viewport min_zoom must be <= max_zoom",
            ));
        }
        if !finite_pos(self.focus_zoom) {
            return Err(OverlayError::configuration(
                "viewport focus_zoom must be finite and > 0",
            ));
        }
        Ok(())
    }
}

/// Zoom, pan and rotation of the map image.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ViewState {
    pub zoom: f64,
    pub pan: Vec2,
    /// Degrees.
    pub rotation: f64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan: Vec2::ZERO,
            rotation: 0.0,
        }
    }
}

impl ViewState {
    fn lerp(self, to: ViewState, t: f64) -> ViewState {
        ViewState {
            zoom: lerp(self.zoom, to.zoom, t),
            pan: self.pan.lerp(to.pan, t),
            rotation: lerp(self.rotation, to.rotation, t),
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Transition {
    from: ViewState,
    to: ViewState,
    started: Millis,
}

/// Interactive map view with eased transitions.
///
/// Every change starts a new transition from the state sampled at `now`, replacing any
/// transition in flight.
#[derive(Clone, Debug)]
pub struct MapViewport {
    opts: ViewportOpts,
    transition: Transition,
}

impl MapViewport {
    pub fn new(opts: ViewportOpts) -> OverlayResult<Self> {
        opts.validate()?;
        let rest = ViewState::default();
        Ok(Self {
            opts,
            transition: Transition {
                from: rest,
                to: rest,
                started: Millis::ZERO,
            },
        })
    }

    pub fn opts(&self) -> &ViewportOpts {
        &self.opts
    }

    /// View state at `now`.
    pub fn sample(&self, now: Millis) -> ViewState {
        let tr = &self.transition;
        let t = self
            .opts
            .ease
            .progress(now.since(tr.started), self.opts.transition_ms);
        if t >= 1.0 {
            return tr.to;
        }
        tr.from.lerp(tr.to, t)
    }

    /// State the current transition is heading to.
    pub fn target(&self) -> ViewState {
        self.transition.to
    }

    pub fn is_animating(&self, now: Millis) -> bool {
        self.transition.from != self.transition.to
            && now.since(self.transition.started) < self.opts.transition_ms
    }

    /// Zoom by `delta` around `center` (an offset from the view centre, in pixels).
    pub fn zoom(&mut self, delta: f64, center: Vec2, now: Millis) {
        let cur = self.sample(now);
        let base = self.target();
        let zoom = self.clamp_zoom(base.zoom + delta);
        if zoom == base.zoom {
            return;
        }
        let ratio = zoom / base.zoom;
        let pan = self.clamp_pan(base.pan + center * (1.0 - ratio), zoom);
        tracing::debug!(from = base.zoom, to = zoom, "viewport zoom");
        self.begin(cur, ViewState { zoom, pan, ..base }, now);
    }

    /// Pan to `offset`.
    pub fn pan(&mut self, offset: Vec2, now: Millis) {
        let cur = self.sample(now);
        let base = self.target();
        let pan = self.clamp_pan(offset, base.zoom);
        self.begin(cur, ViewState { pan, ..base }, now);
    }

    /// Rotate to `degrees`. No-op unless rotation is enabled.
    pub fn rotate(&mut self, degrees: f64, now: Millis) {
        if !self.opts.enable_rotation {
            return;
        }
        let cur = self.sample(now);
        let base = self.target();
        self.begin(
            cur,
            ViewState {
                rotation: degrees,
                ..base
            },
            now,
        );
    }

    /// Return to 1x, centred, unrotated.
    pub fn reset_view(&mut self, now: Millis) {
        let cur = self.sample(now);
        self.begin(cur, ViewState::default(), now);
    }

    /// Zoom to `focus_zoom` centred on `hotspot`.
    pub fn zoom_to_hotspot(&mut self, hotspot: &Hotspot, dims: ImageDims, now: Millis) {
        let cur = self.sample(now);
        let base = self.target();
        let zoom = self.clamp_zoom(self.opts.focus_zoom);
        let c = dims.center();
        let offset = Vec2::new(c.x - hotspot.position.x, c.y - hotspot.position.y);
        let pan = self.clamp_pan(offset, zoom);
        tracing::debug!(id = %hotspot.id, zoom, "viewport focus hotspot");
        self.begin(
            cur,
            ViewState {
                zoom,
                pan,
                rotation: base.rotation,
            },
            now,
        );
    }

    /// CSS transform string for the state at `now`.
    pub fn css_transform(&self, now: Millis) -> String {
        let s = self.sample(now);
        format!(
            "scale({}) translate({}px, {}px) rotate({}deg)",
            s.zoom, s.pan.x, s.pan.y, s.rotation
        )
    }

    pub fn is_zoomed_in(&self, now: Millis) -> bool {
        self.sample(now).zoom > 1.0
    }

    pub fn is_at_min_zoom(&self, now: Millis) -> bool {
        self.sample(now).zoom <= self.opts.min_zoom
    }

    pub fn is_at_max_zoom(&self, now: Millis) -> bool {
        self.sample(now).zoom >= self.opts.max_zoom
    }

    /// Panning is only meaningful while zoomed in.
    pub fn can_pan(&self, now: Millis) -> bool {
        self.is_zoomed_in(now)
    }

    fn begin(&mut self, from: ViewState, to: ViewState, now: Millis) {
        self.transition = Transition {
            from,
            to,
            started: now,
        };
    }

    fn clamp_zoom(&self, zoom: f64) -> f64 {
        zoom.clamp(self.opts.min_zoom, self.opts.max_zoom)
    }

    fn clamp_pan(&self, offset: Vec2, zoom: f64) -> Vec2 {
        if !self.opts.enable_bounds {
            return offset;
        }
        let max = ((zoom - 1.0) * PAN_PER_ZOOM).max(0.0);
        Vec2::new(offset.x.clamp(-max, max), offset.y.clamp(-max, max))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/viewport/map.rs"]
mod tests;
