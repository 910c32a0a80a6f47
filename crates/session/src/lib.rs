pub mod session;
pub mod sidebar;
pub mod viewport;

pub use session::{MapSession, load_catalog};
pub use sidebar::{SidebarEvent, SidebarView};
pub use viewport::{INITIAL_CENTER, INITIAL_ZOOM, ViewportConfig, pan_bounds};
