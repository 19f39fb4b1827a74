use crate::rank::{RankEngine, RankedAccount};
use crate::separation::{distances_from, Distance};
use crate::stats::NetworkStats;
use socnet_core::config::AppConfig;
use socnet_core::error::{ErrorCode, SocnetError};
use std::collections::BTreeMap;
use storage::{GraphError, SocialNetwork};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("invalid query: {0}")]
    InvalidQuery(String),
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),
}

impl SocnetError for QueryError {
    fn error_code(&self) -> ErrorCode {
        match self {
            QueryError::InvalidQuery(_) => ErrorCode::InvalidArgument,
            QueryError::Graph(e) => e.error_code(),
        }
    }
}

/// Read-only analytics over a [`SocialNetwork`].
#[derive(Debug, Clone, Default)]
pub struct QueryEngine {
    rank: RankEngine,
}

impl QueryEngine {
    pub fn new(rank: RankEngine) -> Self {
        Self { rank }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, QueryError> {
        Ok(Self::new(RankEngine::from_config(&config.rank)?))
    }

    pub fn ranking<'a>(&self, network: &'a SocialNetwork) -> Vec<RankedAccount<'a>> {
        self.rank.ranking(network)
    }

    /// Hops from `name` to every account of the network.
    pub fn degree_of_separation(
        &self,
        network: &SocialNetwork,
        name: &str,
    ) -> Result<BTreeMap<String, Distance>, QueryError> {
        Ok(distances_from(network.graph(), name)?)
    }

    pub fn stats(&self, network: &SocialNetwork) -> NetworkStats {
        NetworkStats::collect(network)
    }
}
