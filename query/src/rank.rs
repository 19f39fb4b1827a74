//! Influence ranking by damped random walk.
//!
//! Every vertex starts at 1.0. One sweep recomputes every vertex from the
//! previous sweep's ranks:
//!
//! `rank'(v) = (1 - d) / N + d * sum(rank(u) / out_degree(u))` over in-neighbours `u`.
//!
//! The walk runs a fixed number of full sweeps. Dangling vertices (no
//! out-arcs) contribute nothing and their mass is not redistributed.

use socnet_core::config::RankConfig;
use socnet_core::model::{Account, Vertex};
use std::cmp::Ordering;
use std::collections::HashMap;
use storage::{Graph, SocialNetwork};
use tracing::debug;

use crate::engine::QueryError;

pub const DEFAULT_DAMPING: f64 = 0.85;
pub const DEFAULT_SWEEPS: usize = 100;
const INITIAL_RANK: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankEngine {
    damping: f64,
    sweeps: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedAccount<'a> {
    pub account: &'a Account,
    pub score: f64,
}

impl RankEngine {
    pub fn new(damping: f64, sweeps: usize) -> Result<Self, QueryError> {
        if !(0.0..=1.0).contains(&damping) {
            return Err(QueryError::InvalidQuery(format!(
                "damping factor {} outside [0, 1]",
                damping
            )));
        }
        Ok(Self { damping, sweeps })
    }

    pub fn from_config(config: &RankConfig) -> Result<Self, QueryError> {
        Self::new(config.damping, config.sweeps)
    }

    pub fn damping(&self) -> f64 {
        self.damping
    }

    pub fn sweeps(&self) -> usize {
        self.sweeps
    }

    /// Final rank of every vertex, keyed by name.
    pub fn compute<V: Vertex>(&self, graph: &Graph<V>) -> HashMap<String, f64> {
        let ordered = graph.vertex_set_by_name();
        let n = ordered.len();
        if n == 0 {
            return HashMap::new();
        }

        let position: HashMap<&str, usize> = ordered
            .iter()
            .enumerate()
            .map(|(i, v)| (v.name(), i))
            .collect();
        let out_degree: Vec<usize> = ordered.iter().map(|v| graph.out_degree(v.name())).collect();
        let predecessors: Vec<Vec<usize>> = ordered
            .iter()
            .map(|v| {
                graph
                    .vertex_to(v.name())
                    .iter()
                    .filter_map(|u| position.get(u.name()).copied())
                    .collect()
            })
            .collect();

        let base = (1.0 - self.damping) / n as f64;
        let mut rank = vec![INITIAL_RANK; n];

        for _ in 0..self.sweeps {
            let next: Vec<f64> = predecessors
                .iter()
                .map(|preds| {
                    let incoming: f64 = preds
                        .iter()
                        .filter(|&&u| out_degree[u] > 0)
                        .map(|&u| rank[u] / out_degree[u] as f64)
                        .sum();
                    base + self.damping * incoming
                })
                .collect();
            rank = next;
        }

        debug!("Ranked {} vertices over {} sweeps", n, self.sweeps);
        ordered
            .into_iter()
            .zip(rank)
            .map(|(v, r)| (v.name().to_string(), r))
            .collect()
    }

    /// Every account, highest rank first; ties by name ascending.
    pub fn ranking<'a>(&self, network: &'a SocialNetwork) -> Vec<RankedAccount<'a>> {
        let graph = network.graph();
        let scores = self.compute(graph);

        let mut ranked: Vec<RankedAccount<'a>> = graph
            .vertex_set()
            .into_iter()
            .map(|account| RankedAccount {
                account,
                score: scores.get(account.name()).copied().unwrap_or(0.0),
            })
            .collect();
        ranked.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.account.name().cmp(b.account.name()))
        });
        ranked
    }
}

impl Default for RankEngine {
    fn default() -> Self {
        Self {
            damping: DEFAULT_DAMPING,
            sweeps: DEFAULT_SWEEPS,
        }
    }
}
