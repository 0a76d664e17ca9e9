use crate::foundation::error::{OverlayError, OverlayResult};
use serde::Deserialize as _;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// Scalar specification value.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum SpecValue {
    Flag(bool),
    Number(f64),
    Text(String),
}

impl fmt::Display for SpecValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(true) => f.write_str("Yes"),
            Self::Flag(false) => f.write_str("No"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Extended descriptive fields for one hotspot.
///
/// Every field is optional; `null` reads as empty.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct InfrastructureDetail {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub overview: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub specifications: BTreeMap<String, SpecValue>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub equipment: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub features: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub connectivity: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub environmental: Vec<String>,
}

fn null_as_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + serde::Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

/// A detail entry dropped at load time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailError {
    /// Key of the entry in the `infrastructure` map.
    pub id: String,
    pub message: String,
}

impl DetailError {
    /// JSON path of the entry, e.g. `$.infrastructure.sub-01`.
    pub fn path(&self) -> String {
        format!("$.infrastructure.{}", self.id)
    }
}

impl fmt::Display for DetailError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path(), self.message)
    }
}

impl std::error::Error for DetailError {}

/// Detail fixture: extended fields keyed by hotspot id.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct DetailFixture {
    pub infrastructure: BTreeMap<String, InfrastructureDetail>,
    /// Entries dropped during validation.
    #[serde(skip)]
    pub rejected: Vec<DetailError>,
}

impl DetailFixture {
    /// Parse from JSON text. The `infrastructure` map is required.
    pub fn from_json_str(s: &str) -> OverlayResult<Self> {
        let v: Value = serde_json::from_str(s)?;
        Self::from_value(&v)
    }

    /// Build from a parsed document, entry by entry.
    ///
    /// A malformed entry is dropped and reported in `rejected`; the other entries still load.
    /// Specification values that are not scalars are skipped with a warning.
    pub fn from_value(doc: &Value) -> OverlayResult<Self> {
        let Some(entries) = doc.get("infrastructure").and_then(Value::as_object) else {
            return Err(OverlayError::validation(
                "details document must contain an \"infrastructure\" object",
            ));
        };

        let mut out = Self::default();
        for (id, entry) in entries {
            match parse_entry(id, entry) {
                Ok(detail) => {
                    out.infrastructure.insert(id.clone(), detail);
                }
                Err(message) => {
                    let err = DetailError {
                        id: id.clone(),
                        message,
                    };
                    tracing::warn!(%err, "detail entry rejected");
                    out.rejected.push(err);
                }
            }
        }
        tracing::debug!(
            accepted = out.infrastructure.len(),
            rejected = out.rejected.len(),
            "details loaded"
        );
        Ok(out)
    }

    /// Load from a JSON file.
    pub fn from_path(path: &Path) -> OverlayResult<Self> {
        let s = std::fs::read_to_string(path).map_err(|e| {
            OverlayError::Other(
                anyhow::Error::new(e).context(format!("read details '{}'", path.display())),
            )
        })?;
        Self::from_json_str(&s)
    }

    /// Extended fields for `id`. Absence is not an error.
    pub fn get(&self, id: &str) -> Option<&InfrastructureDetail> {
        self.infrastructure.get(id)
    }
}

fn parse_entry(id: &str, entry: &Value) -> Result<InfrastructureDetail, String> {
    let Value::Object(obj) = entry else {
        return Err("entry must be an object".to_owned());
    };
    let mut obj = obj.clone();
    if let Some(Value::Object(specs)) = obj.get_mut("specifications") {
        specs.retain(|key, v| {
            let scalar = matches!(v, Value::Bool(_) | Value::Number(_) | Value::String(_));
            if !scalar {
                tracing::warn!(id, key = %key, "ignoring non-scalar specification value");
            }
            scalar
        });
    }
    serde_json::from_value(Value::Object(obj)).map_err(|e| e.to_string())
}
