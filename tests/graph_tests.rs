use cppp::{
    AdjacencyGraph, GraphPrimitives, PhylogenyError,
    bfs::{connected_component, connected_components},
};

fn build_graph(vertex_count: usize, edges: &[(usize, usize)]) -> AdjacencyGraph {
    AdjacencyGraph::from_edges(vertex_count, edges).expect("graph")
}

#[test]
fn test_add_edge_is_undirected_and_deduplicated() {
    let mut graph = AdjacencyGraph::new(4);
    graph.add_edge(0, 2).expect("edge");
    graph.add_edge(2, 0).expect("edge");
    assert_eq!(graph.edge_count(), 1);
    assert!(graph.has_edge(2, 0).expect("has_edge"));
    assert_eq!(graph.neighbors(0).expect("neighbors"), vec![2]);
    assert_eq!(graph.neighbors(2).expect("neighbors"), vec![0]);
}

#[test]
fn test_self_loop_rejected() {
    let mut graph = AdjacencyGraph::new(2);
    let err = graph.add_edge(1, 1).unwrap_err();
    assert!(matches!(err, PhylogenyError::InvalidInput(_)));
}

#[test]
fn test_out_of_range_vertex_rejected() {
    let mut graph = AdjacencyGraph::new(2);
    assert!(matches!(
        graph.add_edge(0, 2),
        Err(PhylogenyError::OutOfRange(_))
    ));
    assert!(matches!(graph.neighbors(5), Err(PhylogenyError::OutOfRange(_))));
    assert!(matches!(
        connected_component(&graph, 9),
        Err(PhylogenyError::OutOfRange(_))
    ));
}

#[test]
fn test_neighbors_are_sorted() {
    let graph = build_graph(5, &[(0, 4), (0, 1), (0, 3)]);
    assert_eq!(graph.neighbors(0).expect("neighbors"), vec![1, 3, 4]);
    assert_eq!(graph.degree(0).expect("degree"), 3);
}

#[test]
fn test_delete_incident_edges_keeps_vertex_ids() {
    let mut graph = build_graph(5, &[(0, 1), (1, 2), (2, 3), (1, 4)]);
    graph.delete_incident_edges(1).expect("delete");
    assert_eq!(graph.vertex_count(), 5);
    assert_eq!(graph.degree(1).expect("degree"), 0);
    assert_eq!(graph.edges(), vec![(2, 3)]);
}

#[test]
fn test_connected_component_contains_start() {
    let graph = build_graph(6, &[(0, 1), (1, 2), (4, 5)]);
    assert_eq!(connected_component(&graph, 2).expect("cc"), vec![0, 1, 2]);
    assert_eq!(connected_component(&graph, 3).expect("cc"), vec![3]);
}

#[test]
fn test_connected_components_partition_vertices() {
    let graph = build_graph(6, &[(5, 1), (1, 2), (0, 4)]);
    let components = connected_components(&graph).expect("components");
    assert_eq!(components, vec![vec![0, 4], vec![1, 2, 5], vec![3]]);
}

#[test]
fn test_graph_serializes_as_edge_list() {
    let graph = build_graph(3, &[(2, 0), (1, 2)]);
    let json = serde_json::to_value(&graph).expect("serialize");
    assert_eq!(json["vertex_count"], 3);
    assert_eq!(json["edges"], serde_json::json!([[0, 2], [1, 2]]));
    let back: AdjacencyGraph = serde_json::from_value(json).expect("deserialize");
    assert_eq!(back, graph);
}

#[test]
fn test_graph_document_with_bad_edge_fails_to_load() {
    let json = serde_json::json!({ "vertex_count": 2, "edges": [[0, 3]] });
    assert!(serde_json::from_value::<AdjacencyGraph>(json).is_err());
}
