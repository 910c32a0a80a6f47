pub mod codec;
pub mod http;
pub mod key;
pub mod payload;
pub mod store;

pub use codec::SnapshotCodec;
pub use http::HttpStore;
pub use payload::{SnapshotPayload, SnapshotRecord};
pub use store::{DirStore, MemoryStore, SnapshotError, SnapshotStore};
