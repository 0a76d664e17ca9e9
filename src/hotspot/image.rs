use crate::foundation::core::{ImageDims, PercentPos, Point, to_percent};
use crate::foundation::error::{OverlayError, OverlayResult};
use crate::hotspot::model::Hotspot;
use std::path::Path;

/// Legend box placement on the reference image, in pixel space.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Legend {
    pub position: Point,
    pub width: f64,
    pub height: f64,
}

impl Default for Legend {
    fn default() -> Self {
        Self {
            position: Point::new(50.0, 650.0),
            width: 300.0,
            height: 120.0,
        }
    }
}

/// Reference image description used to place hotspots over the map.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageConfig {
    pub original_width: f64,
    pub original_height: f64,
    /// Width / height. Zero or absent means "derive from the dimensions".
    #[serde(default)]
    pub aspect_ratio: f64,
    #[serde(default)]
    pub legend: Legend,
}

impl ImageConfig {
    /// Parse and validate from JSON text.
    pub fn from_json_str(s: &str) -> OverlayResult<Self> {
        let mut cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        if cfg.aspect_ratio == 0.0 {
            cfg.aspect_ratio = cfg.original_width / cfg.original_height;
        }
        Ok(cfg)
    }

    /// Load from a JSON file.
    pub fn from_path(path: &Path) -> OverlayResult<Self> {
        let s = std::fs::read_to_string(path).map_err(|e| {
            OverlayError::Other(
                anyhow::Error::new(e).context(format!("read image config '{}'", path.display())),
            )
        })?;
        Self::from_json_str(&s)
    }

    /// Check dimensions and aspect ratio.
    pub fn validate(&self) -> OverlayResult<()> {
        ImageDims::new(self.original_width, self.original_height)?;
        if !self.aspect_ratio.is_finite() || self.aspect_ratio < 0.0 {
            return Err(OverlayError::validation(
                "aspectRatio must be finite and >= 0",
            ));
        }
        if !(self.legend.width >= 0.0 && self.legend.height >= 0.0) {
            return Err(OverlayError::validation("legend size must be >= 0"));
        }
        Ok(())
    }

    /// Native image dimensions.
    pub fn dims(&self) -> OverlayResult<ImageDims> {
        ImageDims::new(self.original_width, self.original_height)
    }

    /// Percentage position of a hotspot over this image.
    pub fn place(&self, hotspot: &Hotspot) -> OverlayResult<PercentPos> {
        let dims = self.dims()?;
        if !dims.contains(hotspot.position) {
            tracing::warn!(id = %hotspot.id, "hotspot lies outside the reference image");
        }
        Ok(to_percent(hotspot.position, dims))
    }
}
