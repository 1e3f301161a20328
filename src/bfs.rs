use std::collections::VecDeque;

use ahash::AHashSet;

use crate::{
    errors::PhylogenyError,
    graph::{GraphPrimitives, VertexId},
};

/// Vertices reachable from `start`, `start` included, in ascending order.
pub fn connected_component<G: GraphPrimitives>(
    graph: &G,
    start: VertexId,
) -> Result<Vec<VertexId>, PhylogenyError> {
    let mut seen = AHashSet::new();
    let mut queue = VecDeque::new();
    let mut component = Vec::new();
    graph.degree(start)?;
    queue.push_back(start);
    seen.insert(start);
    while let Some(node) = queue.pop_front() {
        component.push(node);
        for next in graph.neighbors(node)? {
            if seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    component.sort_unstable();
    Ok(component)
}

pub fn connected_components<G: GraphPrimitives>(
    graph: &G,
) -> Result<Vec<Vec<VertexId>>, PhylogenyError> {
    let mut components = Vec::new();
    let mut visited = AHashSet::new();
    for id in 0..graph.vertex_count() {
        if visited.contains(&id) {
            continue;
        }
        let component = connected_component(graph, id)?;
        visited.extend(component.iter().copied());
        components.push(component);
    }
    components.sort_by(|a, b| a[0].cmp(&b[0]));
    Ok(components)
}
