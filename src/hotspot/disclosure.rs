//! Page-wide tooltip and detail-panel disclosure.
//!
//! One [`DisclosureState`] is owned per page. At most one hotspot is hovered and at most one
//! detail panel is open at any time; every mutation goes through `&mut self`, so a state is
//! never observed half-updated.

use crate::foundation::error::{OverlayError, OverlayResult};
use crate::hotspot::load::HotspotCatalog;
use std::collections::HashSet;

/// Control that should receive input focus.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FocusTarget {
    /// A hotspot marker, by id.
    Hotspot(String),
    /// Any other page control, by a caller-chosen name.
    Control(String),
}

/// Keyboard keys the disclosure logic reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Enter,
    Space,
    Escape,
    Tab,
    Other,
}

/// Mutation applied to a [`DisclosureState`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DisclosureCommand {
    Hover(String),
    Unhover(String),
    /// Open the detail panel for `id`; focus returns to `opener` on dismissal.
    Activate {
        id: String,
        opener: Option<FocusTarget>,
    },
    Dismiss,
    /// Key pressed while hotspot `id` has focus.
    Key {
        id: String,
        key: Key,
    },
}

/// Observable outcome of a command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DisclosureEffect {
    Unchanged,
    HoverChanged {
        from: Option<String>,
        to: Option<String>,
    },
    DetailOpened {
        id: String,
        /// Panel closed in the same step, if another one was open.
        replaced: Option<String>,
    },
    DetailClosed {
        id: String,
        restore_focus: FocusTarget,
    },
}

#[derive(Clone, Debug)]
struct OpenDetail {
    id: String,
    opener: FocusTarget,
}

/// Hover and detail-panel ownership across all hotspots of a page.
#[derive(Clone, Debug)]
pub struct DisclosureState {
    order: Vec<String>,
    known: HashSet<String>,
    disabled: HashSet<String>,
    tooltips_enabled: bool,
    hovered: Option<String>,
    open: Option<OpenDetail>,
}

impl DisclosureState {
    /// Disclosure state over every hotspot in `catalog`, tooltips enabled.
    pub fn new(catalog: &HotspotCatalog) -> Self {
        let order: Vec<String> = catalog.iter().map(|h| h.id.clone()).collect();
        let known = order.iter().cloned().collect();
        Self {
            order,
            known,
            disabled: HashSet::new(),
            tooltips_enabled: true,
            hovered: None,
            open: None,
        }
    }

    /// Enable or disable tooltip display for this page.
    pub fn set_tooltips_enabled(&mut self, enabled: bool) {
        self.tooltips_enabled = enabled;
    }

    /// Mark a hotspot disabled or enabled.
    ///
    /// Disabling a hovered hotspot clears the hover.
    pub fn set_disabled(&mut self, id: &str, disabled: bool) -> OverlayResult<()> {
        self.check_known(id)?;
        if disabled {
            self.disabled.insert(id.to_owned());
            if self.hovered.as_deref() == Some(id) {
                self.hovered = None;
            }
        } else {
            self.disabled.remove(id);
        }
        Ok(())
    }

    /// Return `true` when `id` is disabled.
    pub fn is_disabled(&self, id: &str) -> bool {
        self.disabled.contains(id)
    }

    /// Currently hovered hotspot.
    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    /// Hotspot whose detail panel is open.
    pub fn open_detail(&self) -> Option<&str> {
        self.open.as_ref().map(|o| o.id.as_str())
    }

    /// Tooltip visibility for `id`.
    pub fn is_tooltip_visible(&self, id: &str) -> bool {
        self.tooltips_enabled && !self.is_disabled(id) && self.hovered.as_deref() == Some(id)
    }

    /// Detail panel visibility for `id`.
    pub fn is_detail_open(&self, id: &str) -> bool {
        self.open_detail() == Some(id)
    }

    /// Apply one command.
    ///
    /// Commands naming an unknown hotspot are rejected; commands on disabled hotspots are
    /// accepted and change nothing.
    #[tracing::instrument(skip(self))]
    pub fn apply(&mut self, cmd: DisclosureCommand) -> OverlayResult<DisclosureEffect> {
        let effect = match cmd {
            DisclosureCommand::Hover(id) => self.hover(&id)?,
            DisclosureCommand::Unhover(id) => self.unhover(&id)?,
            DisclosureCommand::Activate { id, opener } => {
                let opener = opener.unwrap_or_else(|| FocusTarget::Hotspot(id.clone()));
                self.activate_from(&id, opener)?
            }
            DisclosureCommand::Dismiss => self.dismiss(),
            DisclosureCommand::Key { id, key } => self.key(&id, key)?,
        };
        if effect != DisclosureEffect::Unchanged {
            tracing::debug!(?effect, "disclosure changed");
        }
        Ok(effect)
    }

    /// Pointer entered (or focus moved onto) `id`.
    pub fn hover(&mut self, id: &str) -> OverlayResult<DisclosureEffect> {
        self.check_known(id)?;
        if self.is_disabled(id) || self.hovered.as_deref() == Some(id) {
            return Ok(DisclosureEffect::Unchanged);
        }
        let from = self.hovered.replace(id.to_owned());
        Ok(DisclosureEffect::HoverChanged {
            from,
            to: Some(id.to_owned()),
        })
    }

    /// Pointer left `id`. Only clears the hover when `id` is the hovered hotspot.
    pub fn unhover(&mut self, id: &str) -> OverlayResult<DisclosureEffect> {
        self.check_known(id)?;
        if self.is_disabled(id) || self.hovered.as_deref() != Some(id) {
            return Ok(DisclosureEffect::Unchanged);
        }
        let from = self.hovered.take();
        Ok(DisclosureEffect::HoverChanged { from, to: None })
    }

    /// Click on `id`; focus returns to the hotspot itself on dismissal.
    pub fn activate(&mut self, id: &str) -> OverlayResult<DisclosureEffect> {
        self.activate_from(id, FocusTarget::Hotspot(id.to_owned()))
    }

    /// Open the detail panel for `id`, closing any other panel in the same step.
    pub fn activate_from(
        &mut self,
        id: &str,
        opener: FocusTarget,
    ) -> OverlayResult<DisclosureEffect> {
        self.check_known(id)?;
        if self.is_disabled(id) || self.is_detail_open(id) {
            return Ok(DisclosureEffect::Unchanged);
        }
        let replaced = self
            .open
            .replace(OpenDetail {
                id: id.to_owned(),
                opener,
            })
            .map(|o| o.id);
        Ok(DisclosureEffect::DetailOpened {
            id: id.to_owned(),
            replaced,
        })
    }

    /// Close the open detail panel and report where focus goes back to.
    pub fn dismiss(&mut self) -> DisclosureEffect {
        match self.open.take() {
            Some(o) => DisclosureEffect::DetailClosed {
                id: o.id,
                restore_focus: o.opener,
            },
            None => DisclosureEffect::Unchanged,
        }
    }

    /// Keyboard equivalent of pointer activation for the focused hotspot `id`.
    pub fn key(&mut self, id: &str, key: Key) -> OverlayResult<DisclosureEffect> {
        match key {
            Key::Enter | Key::Space => self.activate(id),
            Key::Escape => {
                self.check_known(id)?;
                Ok(self.dismiss())
            }
            Key::Tab | Key::Other => {
                self.check_known(id)?;
                Ok(DisclosureEffect::Unchanged)
            }
        }
    }

    /// Hotspots reachable by sequential keyboard navigation, in page order.
    pub fn tab_order(&self) -> Vec<&str> {
        self.order
            .iter()
            .filter(|id| !self.disabled.contains(id.as_str()))
            .map(String::as_str)
            .collect()
    }

    /// Next hotspot in tab order after `current`, wrapping around.
    ///
    /// With no current focus, forward navigation starts at the first hotspot and backward at the
    /// last one.
    pub fn focus_next(&self, current: Option<&str>, backwards: bool) -> Option<&str> {
        let order = self.tab_order();
        if order.is_empty() {
            return None;
        }
        let n = order.len();
        let next = match current.and_then(|c| order.iter().position(|id| *id == c)) {
            Some(i) if backwards => (i + n - 1) % n,
            Some(i) => (i + 1) % n,
            None if backwards => n - 1,
            None => 0,
        };
        Some(order[next])
    }

    fn check_known(&self, id: &str) -> OverlayResult<()> {
        if self.known.contains(id) {
            Ok(())
        } else {
            Err(OverlayError::validation(format!("unknown hotspot id '{id}'")))
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/hotspot/disclosure.rs"]
mod tests;
