use crate::foundation::core::Point;
use std::fmt;

/// Kind of infrastructure a hotspot marks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HotspotKind {
    Datacenter,
    Substation,
    Powerplant,
    Other,
}

impl HotspotKind {
    /// Parse the fixture tag. Unrecognised tags yield `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "datacenter" => Some(Self::Datacenter),
            "substation" => Some(Self::Substation),
            "powerplant" => Some(Self::Powerplant),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Datacenter => "Data Center",
            Self::Substation => "Substation",
            Self::Powerplant => "Power Plant",
            Self::Other => "Infrastructure",
        }
    }
}

impl fmt::Display for HotspotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Operational status carried in hotspot metadata.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HotspotStatus {
    Operational,
    Planned,
    Maintenance,
    Offline,
}

impl HotspotStatus {
    /// Parse the fixture tag. Unrecognised tags yield `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "operational" => Some(Self::Operational),
            "planned" => Some(Self::Planned),
            "maintenance" => Some(Self::Maintenance),
            "offline" => Some(Self::Offline),
            _ => None,
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Operational => "Operational",
            Self::Planned => "Planned",
            Self::Maintenance => "Maintenance",
            Self::Offline => "Offline",
        }
    }
}

/// Optional descriptive fields. Absent metadata is the same as `HotspotMetadata::default()`.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HotspotMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voltage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technology: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<HotspotStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<String>,
}

impl HotspotMetadata {
    /// Return `true` when no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Present fields as `(label, value)` rows, in display order. Absent fields are omitted.
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        let mut rows = Vec::new();
        if let Some(v) = &self.voltage {
            rows.push(("Voltage", v.clone()));
        }
        if let Some(v) = &self.capacity {
            rows.push(("Capacity", v.clone()));
        }
        if let Some(v) = &self.technology {
            rows.push(("Technology", v.clone()));
        }
        if let Some(s) = self.status {
            rows.push(("Status", s.label().to_owned()));
        }
        if let Some(v) = &self.coordinates {
            rows.push(("Coordinates", v.clone()));
        }
        rows
    }
}

/// A point of interest on the infrastructure map.
///
/// `position` is in the reference image's native pixel space.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Hotspot {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: HotspotKind,
    pub position: Point,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "HotspotMetadata::is_empty")]
    pub metadata: HotspotMetadata,
}
