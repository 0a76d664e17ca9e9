//! Infrastructure hotspots: fixture loading, placement over the reference image, and
//! tooltip/detail disclosure.

pub(crate) mod details;
pub(crate) mod disclosure;
pub(crate) mod image;
pub(crate) mod load;
pub(crate) mod model;
pub(crate) mod view;

pub use details::{DetailError, DetailFixture, InfrastructureDetail, SpecValue};
pub use disclosure::{DisclosureCommand, DisclosureEffect, DisclosureState, FocusTarget, Key};
pub use image::{ImageConfig, Legend};
pub use load::{
    HotspotCatalog, HotspotLoad, RecordError, load_hotspots, load_hotspots_path,
    load_hotspots_str,
};
pub use model::{Hotspot, HotspotKind, HotspotMetadata, HotspotStatus};
pub use view::{DetailView, TooltipView};
