pub mod catalog;
pub mod geojson;
pub mod region;
pub mod spatial;

pub use catalog::RegionCatalog;
pub use geojson::{BoundaryCollection, BoundaryFeature, BoundaryParseError};
pub use region::{Region, RegionKind};
pub use spatial::{DEFAULT_TOLERANCE_DEG, ResolveHit, ResolveOptions, resolve_click};
