use crate::hotspot::details::{DetailFixture, InfrastructureDetail};
use crate::hotspot::model::{Hotspot, HotspotKind};

/// Content of the hover tooltip.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TooltipView {
    pub title: String,
    pub kind: HotspotKind,
    pub kind_label: &'static str,
    /// Short facts (voltage, capacity) that are present on the hotspot.
    pub facts: Vec<(&'static str, String)>,
}

impl TooltipView {
    pub fn new(h: &Hotspot) -> Self {
        let mut facts = Vec::new();
        if let Some(v) = &h.metadata.voltage {
            facts.push(("Voltage", v.clone()));
        }
        if let Some(c) = &h.metadata.capacity {
            facts.push(("Capacity", c.clone()));
        }
        Self {
            title: h.name.clone(),
            kind: h.kind,
            kind_label: h.kind.label(),
            facts,
        }
    }
}

/// Content of the detail panel.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct DetailView {
    pub id: String,
    pub title: String,
    pub kind_label: &'static str,
    pub description: Option<String>,
    pub metadata: Vec<(&'static str, String)>,
    /// Extended fields, when the detail fixture has an entry for this hotspot.
    pub extended: Option<InfrastructureDetail>,
}

impl DetailView {
    /// Compose base hotspot fields with the optional detail entry.
    pub fn new(h: &Hotspot, details: Option<&DetailFixture>) -> Self {
        let description = h
            .description
            .as_ref()
            .filter(|d| !d.trim().is_empty())
            .cloned();
        Self {
            id: h.id.clone(),
            title: h.name.clone(),
            kind_label: h.kind.label(),
            description,
            metadata: h.metadata.rows(),
            extended: details.and_then(|d| d.get(&h.id)).cloned(),
        }
    }

    /// Plain-text rendering, one field per line.
    pub fn to_text(&self) -> String {
        let mut out = format!("{} ({})\n", self.title, self.kind_label);
        if let Some(d) = &self.description {
            out.push_str(d);
            out.push('\n');
        }
        for (label, value) in &self.metadata {
            out.push_str(&format!("  {label}: {value}\n"));
        }
        let Some(ext) = &self.extended else {
            return out;
        };
        if !ext.overview.is_empty() {
            out.push_str(&format!("Overview: {}\n", ext.overview));
        }
        if !ext.specifications.is_empty() {
            out.push_str("Specifications:\n");
            for (k, v) in &ext.specifications {
                out.push_str(&format!("  {k}: {v}\n"));
            }
        }
        for (heading, items) in [
            ("Equipment", &ext.equipment),
            ("Features", &ext.features),
            ("Connectivity", &ext.connectivity),
            ("Environmental", &ext.environmental),
        ] {
            if items.is_empty() {
                continue;
            }
            out.push_str(heading);
            out.push_str(":\n");
            for item in items {
                out.push_str(&format!("  - {item}\n"));
            }
        }
        out
    }
}
