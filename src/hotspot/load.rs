//! Hotspot fixture loading.
//!
//! Records are validated one by one. A malformed record is dropped and reported as a
//! [`RecordError`]; the rest of the document still loads.

use crate::foundation::core::Point;
use crate::foundation::error::{OverlayError, OverlayResult};
use crate::hotspot::model::{Hotspot, HotspotKind, HotspotMetadata, HotspotStatus};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// A hotspot record rejected at load time.
///
/// This is the per-record form of [`OverlayError::Validation`]; `?` converts it into one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordError {
    /// Index of the record in the `hotspots` array.
    pub index: usize,
    /// Record id, when the record had a usable one.
    pub record_id: Option<String>,
    /// Offending field, dotted (`position.x`). Empty for whole-record problems.
    pub field: String,
    pub message: String,
}

impl RecordError {
    fn at(index: usize, record_id: Option<&str>, field: &str, message: impl Into<String>) -> Self {
        Self {
            index,
            record_id: record_id.map(str::to_owned),
            field: field.to_owned(),
            message: message.into(),
        }
    }

    /// JSON path of the offending value, e.g. `$.hotspots[1].position`.
    pub fn path(&self) -> String {
        let mut s = format!("$.hotspots[{}]", self.index);
        if !self.field.is_empty() {
            s.push('.');
            s.push_str(&self.field);
        }
        s
    }
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.record_id {
            Some(id) => write!(f, "{} (hotspot '{id}'): {}", self.path(), self.message),
            None => write!(f, "{}: {}", self.path(), self.message),
        }
    }
}

impl std::error::Error for RecordError {}

/// Immutable, id-keyed hotspot collection in fixture order.
#[derive(Clone, Debug, Default)]
pub struct HotspotCatalog {
    items: Vec<Hotspot>,
    by_id: HashMap<String, usize>,
}

impl HotspotCatalog {
    fn push(&mut self, h: Hotspot) {
        self.by_id.insert(h.id.clone(), self.items.len());
        self.items.push(h);
    }

    /// Look up a hotspot by id.
    pub fn get(&self, id: &str) -> Option<&Hotspot> {
        self.by_id.get(id).map(|&i| &self.items[i])
    }

    /// Return `true` when `id` is present.
    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Hotspots in fixture order.
    pub fn iter(&self) -> impl Iterator<Item = &Hotspot> {
        self.items.iter()
    }

    /// Number of hotspots.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Return `true` when the catalog has no hotspots.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<Hotspot> for HotspotCatalog {
    /// Build a catalog from already validated hotspots. Later duplicates are skipped.
    fn from_iter<I: IntoIterator<Item = Hotspot>>(iter: I) -> Self {
        let mut c = Self::default();
        for h in iter {
            if !c.contains(&h.id) {
                c.push(h);
            }
        }
        c
    }
}

/// Result of loading a hotspot document.
#[derive(Clone, Debug, Default)]
pub struct HotspotLoad {
    /// Well-formed records.
    pub catalog: HotspotCatalog,
    /// Records dropped during validation.
    pub rejected: Vec<RecordError>,
}

/// Load hotspots from a JSON file.
pub fn load_hotspots_path(path: &Path) -> OverlayResult<HotspotLoad> {
    let s = std::fs::read_to_string(path).map_err(|e| {
        OverlayError::Other(
            anyhow::Error::new(e).context(format!("read hotspots '{}'", path.display())),
        )
    })?;
    load_hotspots_str(&s)
}

/// Load hotspots from JSON text.
pub fn load_hotspots_str(s: &str) -> OverlayResult<HotspotLoad> {
    let v: Value = serde_json::from_str(s)?;
    load_hotspots(&v)
}

/// Load hotspots from a parsed document.
///
/// Accepts either `{ "hotspots": [...] }` or a bare array. Any other top-level shape is a
/// [`OverlayError::Validation`] for the whole document.
#[tracing::instrument(skip(doc))]
pub fn load_hotspots(doc: &Value) -> OverlayResult<HotspotLoad> {
    let records = match doc {
        Value::Array(items) => items,
        Value::Object(obj) => match obj.get("hotspots") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(OverlayError::validation(
                    "hotspots document must contain a \"hotspots\" array",
                ));
            }
        },
        _ => {
            return Err(OverlayError::validation(
                "hotspots document must be an object or an array",
            ));
        }
    };

    let mut out = HotspotLoad::default();
    for (index, record) in records.iter().enumerate() {
        match parse_record(index, record) {
            Ok(h) if out.catalog.contains(&h.id) => {
                let err = RecordError::at(index, Some(&h.id), "id", "duplicate hotspot id");
                tracing::warn!(%err, "hotspot record rejected");
                out.rejected.push(err);
            }
            Ok(h) => out.catalog.push(h),
            Err(err) => {
                tracing::warn!(%err, "hotspot record rejected");
                out.rejected.push(err);
            }
        }
    }

    tracing::debug!(
        accepted = out.catalog.len(),
        rejected = out.rejected.len(),
        "hotspots loaded"
    );
    Ok(out)
}

fn parse_record(index: usize, record: &Value) -> Result<Hotspot, RecordError> {
    let Value::Object(obj) = record else {
        return Err(RecordError::at(index, None, "", "record must be an object"));
    };

    let id = match obj.get("id") {
        Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
        Some(Value::String(_)) => {
            return Err(RecordError::at(index, None, "id", "id must be non-empty"));
        }
        Some(_) => return Err(RecordError::at(index, None, "id", "id must be a string")),
        None => return Err(RecordError::at(index, None, "id", "missing required field")),
    };
    let rid = Some(id.as_str());

    let name = required_str(obj, "name").map_err(|m| RecordError::at(index, rid, "name", m))?;

    let kind_tag = required_str(obj, "type").map_err(|m| RecordError::at(index, rid, "type", m))?;
    let kind = HotspotKind::from_tag(&kind_tag).unwrap_or_else(|| {
        tracing::warn!(id = %id, tag = %kind_tag, "unknown hotspot type, treating as other");
        HotspotKind::Other
    });

    let position = parse_position(index, rid, obj.get("position"))?;

    let description = match obj.get("description") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            return Err(RecordError::at(
                index,
                rid,
                "description",
                "description must be a string",
            ));
        }
    };

    let metadata = parse_metadata(index, rid, obj.get("metadata"))?;

    Ok(Hotspot {
        id,
        name,
        kind,
        position,
        description,
        metadata,
    })
}

fn required_str(obj: &Map<String, Value>, key: &str) -> Result<String, &'static str> {
    match obj.get(key) {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.clone()),
        Some(Value::String(_)) => Err("must be non-empty"),
        Some(_) => Err("must be a string"),
        None => Err("missing required field"),
    }
}

fn parse_position(index: usize, rid: Option<&str>, v: Option<&Value>) -> Result<Point, RecordError> {
    let obj = match v {
        Some(Value::Object(o)) => o,
        Some(_) => return Err(RecordError::at(index, rid, "position", "must be an object")),
        None => {
            return Err(RecordError::at(
                index,
                rid,
                "position",
                "missing required field",
            ));
        }
    };

    let coord = |axis: &'static str| -> Result<f64, RecordError> {
        let field = if axis == "x" { "position.x" } else { "position.y" };
        let n = obj
            .get(axis)
            .and_then(Value::as_f64)
            .ok_or_else(|| RecordError::at(index, rid, field, "must be a number"))?;
        if !n.is_finite() || n < 0.0 {
            return Err(RecordError::at(index, rid, field, "must be finite and >= 0"));
        }
        Ok(n)
    };

    let x = coord("x")?;
    let y = coord("y")?;
    Ok(Point::new(x, y))
}

fn parse_metadata(
    index: usize,
    rid: Option<&str>,
    v: Option<&Value>,
) -> Result<HotspotMetadata, RecordError> {
    let obj = match v {
        None | Some(Value::Null) => return Ok(HotspotMetadata::default()),
        Some(Value::Object(o)) => o,
        Some(_) => {
            return Err(RecordError::at(
                index,
                rid,
                "metadata",
                "metadata must be an object",
            ));
        }
    };

    // Metadata is descriptive only; wrongly typed optional fields are dropped, not fatal.
    let text = |key: &str| -> Option<String> {
        match obj.get(key) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            Some(Value::Null) | None => None,
            Some(_) => {
                tracing::warn!(id = ?rid, key, "ignoring non-text metadata field");
                None
            }
        }
    };

    let status = match obj.get("status") {
        Some(Value::String(s)) => {
            let st = HotspotStatus::from_tag(s);
            if st.is_none() {
                tracing::warn!(id = ?rid, status = %s, "ignoring unknown hotspot status");
            }
            st
        }
        _ => None,
    };

    Ok(HotspotMetadata {
        voltage: text("voltage"),
        capacity: text("capacity"),
        technology: text("technology"),
        status,
        coordinates: text("coordinates"),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/hotspot/load.rs"]
mod tests;
