pub mod engine;
pub mod rank;
pub mod separation;
pub mod stats;

pub use engine::{QueryEngine, QueryError};
pub use rank::{RankEngine, RankedAccount};
pub use separation::{distances_from, Distance};
pub use stats::NetworkStats;
