pub mod codec;
pub mod index;
pub mod network;
pub mod snapshot;

pub use index::{Graph, GraphError};
pub use network::{NetworkError, Relation, SocialNetwork};
pub use snapshot::{SnapshotError, SnapshotStore};
