pub mod layer;
pub mod name_set;
pub mod store;
pub mod style;

pub use layer::{ATTRIBUTION, BaseLayer, LayerError};
pub use name_set::NameSet;
pub use store::{SelectionState, SelectionStore};
pub use style::{DEFAULT_ACTIVE_COLOR, RegionStyle, TRANSPARENT, project};
