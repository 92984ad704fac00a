pub mod catalogue;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod geometry;
pub mod placement;
pub mod surface;
pub mod viewport;

pub use catalogue::{
    CatalogueEntry, CatalogueGroup, CataloguePanel, ComponentKind, ComponentSpec, Inserted,
    catalogue_menu,
};
#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, PlacementConfig, ViewportConfig, load_config};
pub use error::{InsertError, SurfaceError, ViewError};
pub use geometry::{Bbox, Point, bounding_box_of};
pub use placement::{
    MarginEstimator, Placement, Strategy, Zone, choose_placement, placement_for_surface,
};
pub use surface::{ComponentRecord, RenderSurface, SheetSnapshot, extract_components};
pub use viewport::{ScrollArea, ScrollPos, ZoomBounds, view_to_box};
