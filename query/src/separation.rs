//! Degree of separation: fewest directed hops from one vertex to every other.

use serde::{Serialize, Serializer};
use socnet_core::model::Vertex;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::fmt;
use storage::{Graph, GraphError};

/// Hop count, or the unreachable sentinel. `Unreachable` orders after every
/// finite distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Distance {
    Hops(usize),
    Unreachable,
}

impl Distance {
    pub fn hops(self) -> Option<usize> {
        match self {
            Distance::Hops(h) => Some(h),
            Distance::Unreachable => None,
        }
    }

    pub fn is_reachable(self) -> bool {
        matches!(self, Distance::Hops(_))
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distance::Hops(h) => write!(f, "{}", h),
            Distance::Unreachable => f.write_str("unreachable"),
        }
    }
}

impl Serialize for Distance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Distance::Hops(h) => serializer.serialize_u64(*h as u64),
            Distance::Unreachable => serializer.serialize_none(),
        }
    }
}

/// Breadth-first search along out-arcs from `source`. Covers every vertex of
/// the graph; those without a directed path from `source` are `Unreachable`.
pub fn distances_from<V: Vertex>(
    graph: &Graph<V>,
    source: &str,
) -> Result<BTreeMap<String, Distance>, GraphError> {
    graph.get_vertex(source)?;

    let mut reached: HashMap<&str, usize> = HashMap::new();
    let mut queue = VecDeque::new();
    reached.insert(source, 0);
    queue.push_back(source);

    while let Some(current) = queue.pop_front() {
        let hops = reached[current] + 1;
        for next in graph.vertex_from(current) {
            let name = next.name();
            if !reached.contains_key(name) {
                reached.insert(name, hops);
                queue.push_back(name);
            }
        }
    }

    Ok(graph
        .vertex_set()
        .into_iter()
        .map(|v| {
            let distance = reached
                .get(v.name())
                .map_or(Distance::Unreachable, |&h| Distance::Hops(h));
            (v.name().to_string(), distance)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Named(&'static str);

    impl Vertex for Named {
        fn name(&self) -> &str {
            self.0
        }
    }

    fn chain() -> Graph<Named> {
        let mut graph = Graph::new();
        for n in ["A", "B", "C", "D", "island"] {
            graph.add_vertex(Named(n)).unwrap();
        }
        graph.create_arc("A", "B").unwrap();
        graph.create_arc("B", "C").unwrap();
        graph.create_arc("C", "D").unwrap();
        graph.create_arc("D", "A").unwrap();
        graph
    }

    #[test]
    fn test_chain_distances() {
        let distances = distances_from(&chain(), "A").unwrap();
        assert_eq!(distances["A"], Distance::Hops(0));
        assert_eq!(distances["B"], Distance::Hops(1));
        assert_eq!(distances["C"], Distance::Hops(2));
        assert_eq!(distances["D"], Distance::Hops(3));
        assert_eq!(distances["island"], Distance::Unreachable);
        assert_eq!(distances.len(), 5);
    }

    #[test]
    fn test_follows_out_arcs_only() {
        let distances = distances_from(&chain(), "island").unwrap();
        assert_eq!(distances["island"], Distance::Hops(0));
        assert!(distances
            .iter()
            .filter(|(name, _)| name.as_str() != "island")
            .all(|(_, d)| !d.is_reachable()));
    }

    #[test]
    fn test_unknown_source() {
        assert_eq!(
            distances_from(&chain(), "Z").unwrap_err(),
            GraphError::VertexNotFound("Z".into())
        );
    }

    #[test]
    fn test_unreachable_sorts_last() {
        assert!(Distance::Hops(usize::MAX) < Distance::Unreachable);
        assert_eq!(Distance::Unreachable.hops(), None);
        assert_eq!(Distance::Unreachable.to_string(), "unreachable");
        assert_eq!(serde_json::to_string(&Distance::Hops(2)).unwrap(), "2");
        assert_eq!(serde_json::to_string(&Distance::Unreachable).unwrap(), "null");
    }
}
