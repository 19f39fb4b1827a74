use socnet_core::error::{ErrorCode, SocnetError};
use socnet_core::model::{Arc, Vertex};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("vertex already exists: {0}")]
    DuplicateVertex(String),
    #[error("vertex not found: {0}")]
    VertexNotFound(String),
    #[error("arc already exists: {0}")]
    DuplicateArc(Arc),
    #[error("arc not found: {0}")]
    ArcNotFound(Arc),
}

impl SocnetError for GraphError {
    fn error_code(&self) -> ErrorCode {
        match self {
            GraphError::DuplicateVertex(_) | GraphError::DuplicateArc(_) => ErrorCode::AlreadyExists,
            GraphError::VertexNotFound(_) | GraphError::ArcNotFound(_) => ErrorCode::NotFound,
        }
    }
}

/// Directed graph keyed by vertex name, with at most one arc per ordered pair.
///
/// Every stored vertex owns an (possibly empty) entry in both adjacency maps,
/// and every arc in `arcs` is mirrored in `outgoing` and `incoming`.
pub struct Graph<V> {
    vertices: HashMap<String, V>,
    arcs: HashSet<Arc>,
    outgoing: HashMap<String, HashSet<String>>,
    incoming: HashMap<String, HashSet<String>>,
}

impl<V: Vertex> Graph<V> {
    pub fn new() -> Self {
        Self {
            vertices: HashMap::new(),
            arcs: HashSet::new(),
            outgoing: HashMap::new(),
            incoming: HashMap::new(),
        }
    }

    pub fn add_vertex(&mut self, vertex: V) -> Result<(), GraphError> {
        let name = vertex.name().to_string();
        if self.vertices.contains_key(&name) {
            return Err(GraphError::DuplicateVertex(name));
        }
        self.outgoing.insert(name.clone(), HashSet::new());
        self.incoming.insert(name.clone(), HashSet::new());
        self.vertices.insert(name, vertex);
        Ok(())
    }

    /// Removes the vertex and every arc touching it.
    /// Returns the vertex together with the removed arcs, sorted.
    pub fn remove_vertex(&mut self, name: &str) -> Result<(V, Vec<Arc>), GraphError> {
        let vertex = self
            .vertices
            .remove(name)
            .ok_or_else(|| GraphError::VertexNotFound(name.to_string()))?;

        let successors = self.outgoing.remove(name).unwrap_or_default();
        let predecessors = self.incoming.remove(name).unwrap_or_default();
        let mut removed = Vec::with_capacity(successors.len() + predecessors.len());

        for to in successors {
            if let Some(preds) = self.incoming.get_mut(&to) {
                preds.remove(name);
            }
            removed.push(Arc::new(name, to));
        }
        for from in predecessors {
            // Self-loop, already collected above.
            if from == name {
                continue;
            }
            if let Some(succs) = self.outgoing.get_mut(&from) {
                succs.remove(name);
            }
            removed.push(Arc::new(from, name));
        }

        for arc in &removed {
            self.arcs.remove(arc);
        }
        removed.sort();
        Ok((vertex, removed))
    }

    pub fn contains_vertex(&self, name: &str) -> bool {
        self.vertices.contains_key(name)
    }

    pub fn get_vertex(&self, name: &str) -> Result<&V, GraphError> {
        self.vertices
            .get(name)
            .ok_or_else(|| GraphError::VertexNotFound(name.to_string()))
    }

    /// Non-failing lookup, for interactive search.
    pub fn find_vertex_by_name(&self, name: &str) -> Option<&V> {
        self.vertices.get(name)
    }

    pub fn create_arc(&mut self, from: &str, to: &str) -> Result<(), GraphError> {
        self.require_endpoints(from, to)?;
        let arc = Arc::new(from, to);
        if self.arcs.contains(&arc) {
            return Err(GraphError::DuplicateArc(arc));
        }
        if let Some(succs) = self.outgoing.get_mut(from) {
            succs.insert(to.to_string());
        }
        if let Some(preds) = self.incoming.get_mut(to) {
            preds.insert(from.to_string());
        }
        self.arcs.insert(arc);
        Ok(())
    }

    pub fn delete_arc(&mut self, from: &str, to: &str) -> Result<Arc, GraphError> {
        self.require_endpoints(from, to)?;
        let arc = self
            .arcs
            .take(&Arc::new(from, to))
            .ok_or_else(|| GraphError::ArcNotFound(Arc::new(from, to)))?;
        if let Some(succs) = self.outgoing.get_mut(from) {
            succs.remove(to);
        }
        if let Some(preds) = self.incoming.get_mut(to) {
            preds.remove(from);
        }
        Ok(arc)
    }

    pub fn delete_arc_entry(&mut self, arc: &Arc) -> Result<Arc, GraphError> {
        self.delete_arc(&arc.from, &arc.to)
    }

    pub fn contains_arc(&self, from: &str, to: &str) -> Result<bool, GraphError> {
        self.require_endpoints(from, to)?;
        Ok(self.arcs.contains(&Arc::new(from, to)))
    }

    pub fn get_arc(&self, from: &str, to: &str) -> Result<&Arc, GraphError> {
        self.require_endpoints(from, to)?;
        let probe = Arc::new(from, to);
        match self.arcs.get(&probe) {
            Some(arc) => Ok(arc),
            None => Err(GraphError::ArcNotFound(probe)),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn arc_count(&self) -> usize {
        self.arcs.len()
    }

    /// All vertices, in no particular order.
    pub fn vertex_set(&self) -> Vec<&V> {
        self.vertices.values().collect()
    }

    pub fn vertex_set_by_name(&self) -> Vec<&V> {
        let mut out = self.vertex_set();
        out.sort_by(|a, b| a.name().cmp(b.name()));
        out
    }

    /// Out-degree descending, then name ascending.
    pub fn vertex_set_by_degree(&self) -> Vec<&V> {
        let mut out = self.vertex_set();
        out.sort_by(|a, b| {
            self.out_degree(b.name())
                .cmp(&self.out_degree(a.name()))
                .then_with(|| a.name().cmp(b.name()))
        });
        out
    }

    /// All arcs, in no particular order.
    pub fn arc_set(&self) -> Vec<&Arc> {
        self.arcs.iter().collect()
    }

    /// Out-neighbours of `name`, sorted by name. Empty when `name` is absent.
    pub fn vertex_from(&self, name: &str) -> Vec<&V> {
        self.resolve(self.outgoing.get(name))
    }

    /// In-neighbours of `name`, sorted by name. Empty when `name` is absent.
    pub fn vertex_to(&self, name: &str) -> Vec<&V> {
        self.resolve(self.incoming.get(name))
    }

    pub fn out_degree(&self, name: &str) -> usize {
        self.outgoing.get(name).map_or(0, HashSet::len)
    }

    pub fn in_degree(&self, name: &str) -> usize {
        self.incoming.get(name).map_or(0, HashSet::len)
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.arcs.clear();
        self.outgoing.clear();
        self.incoming.clear();
    }

    fn require_endpoints(&self, from: &str, to: &str) -> Result<(), GraphError> {
        for name in [from, to] {
            if !self.vertices.contains_key(name) {
                return Err(GraphError::VertexNotFound(name.to_string()));
            }
        }
        Ok(())
    }

    fn resolve(&self, names: Option<&HashSet<String>>) -> Vec<&V> {
        let mut out: Vec<&V> = names
            .into_iter()
            .flatten()
            .filter_map(|n| self.vertices.get(n))
            .collect();
        out.sort_by(|a, b| a.name().cmp(b.name()));
        out
    }
}

impl<V: Vertex> Default for Graph<V> {
    fn default() -> Self {
        Self::new()
    }
}
