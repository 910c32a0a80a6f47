pub mod bounds;
pub mod geo;
pub mod geodesy;
pub mod precision;

// Foundation crate: small, well-tested primitives only.
pub use bounds::*;
pub use geo::*;
pub use geodesy::*;
pub use precision::*;
