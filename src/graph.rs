use serde::{Deserialize, Serialize};

use crate::errors::PhylogenyError;

pub type VertexId = usize;

/// Undirected simple graph over a fixed vertex universe. Vertex ids are
/// stable external identifiers: they are never renumbered or removed.
pub trait GraphPrimitives {
    fn vertex_count(&self) -> usize;
    fn add_edge(&mut self, u: VertexId, v: VertexId) -> Result<(), PhylogenyError>;
    fn delete_incident_edges(&mut self, v: VertexId) -> Result<(), PhylogenyError>;
    fn neighbors(&self, v: VertexId) -> Result<Vec<VertexId>, PhylogenyError>;
    fn degree(&self, v: VertexId) -> Result<usize, PhylogenyError>;
    fn has_edge(&self, u: VertexId, v: VertexId) -> Result<bool, PhylogenyError>;
    /// Canonical `(u, v)` pairs with `u < v`, sorted.
    fn edges(&self) -> Vec<(VertexId, VertexId)>;

    fn edge_count(&self) -> usize {
        self.edges().len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphDocument {
    pub vertex_count: usize,
    pub edges: Vec<(VertexId, VertexId)>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "GraphDocument", try_from = "GraphDocument")]
pub struct AdjacencyGraph {
    adjacency: Vec<Vec<VertexId>>,
}

impl AdjacencyGraph {
    pub fn new(vertex_count: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); vertex_count],
        }
    }

    pub fn from_edges(
        vertex_count: usize,
        edges: &[(VertexId, VertexId)],
    ) -> Result<Self, PhylogenyError> {
        let mut graph = Self::new(vertex_count);
        for &(u, v) in edges {
            graph.add_edge(u, v)?;
        }
        Ok(graph)
    }

    pub fn to_document(&self) -> GraphDocument {
        GraphDocument {
            vertex_count: self.vertex_count(),
            edges: self.edges(),
        }
    }

    fn check_vertex(&self, v: VertexId) -> Result<(), PhylogenyError> {
        if v >= self.adjacency.len() {
            return Err(PhylogenyError::out_of_range(format!(
                "vertex {v} (universe has {} vertices)",
                self.adjacency.len()
            )));
        }
        Ok(())
    }
}

impl GraphPrimitives for AdjacencyGraph {
    fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    fn add_edge(&mut self, u: VertexId, v: VertexId) -> Result<(), PhylogenyError> {
        self.check_vertex(u)?;
        self.check_vertex(v)?;
        if u == v {
            return Err(PhylogenyError::invalid_input(
                "self loops are not supported",
            ));
        }
        if let Err(pos) = self.adjacency[u].binary_search(&v) {
            self.adjacency[u].insert(pos, v);
        }
        if let Err(pos) = self.adjacency[v].binary_search(&u) {
            self.adjacency[v].insert(pos, u);
        }
        Ok(())
    }

    fn delete_incident_edges(&mut self, v: VertexId) -> Result<(), PhylogenyError> {
        self.check_vertex(v)?;
        let neighbors = std::mem::take(&mut self.adjacency[v]);
        for other in neighbors {
            if let Ok(pos) = self.adjacency[other].binary_search(&v) {
                self.adjacency[other].remove(pos);
            }
        }
        Ok(())
    }

    fn neighbors(&self, v: VertexId) -> Result<Vec<VertexId>, PhylogenyError> {
        self.check_vertex(v)?;
        Ok(self.adjacency[v].clone())
    }

    fn degree(&self, v: VertexId) -> Result<usize, PhylogenyError> {
        self.check_vertex(v)?;
        Ok(self.adjacency[v].len())
    }

    fn has_edge(&self, u: VertexId, v: VertexId) -> Result<bool, PhylogenyError> {
        self.check_vertex(u)?;
        self.check_vertex(v)?;
        Ok(self.adjacency[u].binary_search(&v).is_ok())
    }

    fn edges(&self) -> Vec<(VertexId, VertexId)> {
        let mut edges = Vec::new();
        for (u, neighbors) in self.adjacency.iter().enumerate() {
            for &v in neighbors {
                if u < v {
                    edges.push((u, v));
                }
            }
        }
        edges
    }
}

impl From<AdjacencyGraph> for GraphDocument {
    fn from(graph: AdjacencyGraph) -> Self {
        graph.to_document()
    }
}

impl TryFrom<GraphDocument> for AdjacencyGraph {
    type Error = PhylogenyError;

    fn try_from(document: GraphDocument) -> Result<Self, Self::Error> {
        AdjacencyGraph::from_edges(document.vertex_count, &document.edges)
    }
}
