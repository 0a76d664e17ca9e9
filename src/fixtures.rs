//! Site fixture bundle: hotspots, reference image and extended details from one directory.

use crate::foundation::core::PercentPos;
use crate::foundation::error::OverlayResult;
use crate::hotspot::{DetailFixture, HotspotCatalog, ImageConfig, RecordError, load_hotspots_path};
use std::path::Path;

pub const HOTSPOTS_FILE: &str = "hotspots.json";
pub const IMAGE_CONFIG_FILE: &str = "image-config.json";
pub const DETAILS_FILE: &str = "infrastructure-details.json";

/// Everything the overlay page needs to place and describe hotspots.
#[derive(Clone, Debug)]
pub struct SiteFixtures {
    pub catalog: HotspotCatalog,
    pub image: ImageConfig,
    /// `None` when the directory has no details file.
    pub details: Option<DetailFixture>,
    /// Hotspot records dropped during validation.
    pub rejected: Vec<RecordError>,
}

impl SiteFixtures {
    /// Load the bundle from `dir`.
    ///
    /// The hotspot and image files are required; the details file is optional. Malformed
    /// hotspot records end up in `rejected` and malformed detail entries in
    /// `details.rejected`, instead of failing the load.
    #[tracing::instrument]
    pub fn load_dir(dir: &Path) -> OverlayResult<Self> {
        let load = load_hotspots_path(&dir.join(HOTSPOTS_FILE))?;
        let image = ImageConfig::from_path(&dir.join(IMAGE_CONFIG_FILE))?;

        let details_path = dir.join(DETAILS_FILE);
        let details = if details_path.is_file() {
            Some(DetailFixture::from_path(&details_path)?)
        } else {
            tracing::debug!(path = %details_path.display(), "no details fixture");
            None
        };

        tracing::info!(
            hotspots = load.catalog.len(),
            rejected = load.rejected.len(),
            details = details.as_ref().map_or(0, |d| d.infrastructure.len()),
            rejected_details = details.as_ref().map_or(0, |d| d.rejected.len()),
            "site fixtures loaded"
        );
        Ok(Self {
            catalog: load.catalog,
            image,
            details,
            rejected: load.rejected,
        })
    }

    /// Percentage positions of every hotspot, in catalog order.
    pub fn placements(&self) -> OverlayResult<Vec<(&str, PercentPos)>> {
        self.catalog
            .iter()
            .map(|h| Ok((h.id.as_str(), self.image.place(h)?)))
            .collect()
    }
}
