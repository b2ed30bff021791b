use std::collections::BinaryHeap;

use fixedbitset::FixedBitSet;
use hashbrown::HashMap;
use log::{trace, warn};
use petgraph::{graph::NodeIndex, visit::EdgeRef};

use super::state::State;
use crate::RoadNetwork;
use crate::routing::Route;

/// Dijkstra's algorithm between two nodes of the road network.
///
/// Edge cost is the edge's `weight` attribute when it holds a finite number
/// and its `length` otherwise, decided edge by edge. Returns `None` when
/// either id is not in the adjacency table or the goal is unreachable.
///
/// Weights are not validated. Negative weights are accepted, but the result
/// is only guaranteed to be optimal when every cost is non-negative.
pub fn shortest_path(network: &RoadNetwork, start: &str, goal: &str, weight: &str) -> Option<Route> {
    let start_idx = network.routable_index(start)?;
    let goal_idx = network.routable_index(goal)?;

    let node_count = network.graph.node_count();
    let mut distances: HashMap<NodeIndex, f64> = HashMap::new();
    let mut predecessors: HashMap<NodeIndex, NodeIndex> = HashMap::new();
    let mut visited = FixedBitSet::with_capacity(node_count);
    let mut heap = BinaryHeap::new();

    // Start node has distance 0
    distances.insert(start_idx, 0.0);
    heap.push(State {
        cost: 0.0,
        node: start_idx,
    });

    while let Some(State { cost, node }) = heap.pop() {
        if visited.put(node.index()) {
            continue;
        }
        if node == goal_idx {
            break;
        }

        let base = distances.get(&node).copied().unwrap_or(cost);
        for edge in network.graph.edges(node) {
            let next = edge.target();
            let next_cost = base + network.segments[edge.weight().segment].cost(weight);

            let improves = distances
                .get(&next)
                .is_none_or(|&known| next_cost < known);
            if improves {
                distances.insert(next, next_cost);
                predecessors.insert(next, node);
                heap.push(State {
                    cost: next_cost,
                    node: next,
                });
            }
        }
    }

    if goal_idx != start_idx && !predecessors.contains_key(&goal_idx) {
        trace!("No path from {start} to {goal}");
        return None;
    }

    // Follow predecessors backward from goal to start
    let mut node_path = vec![goal_idx];
    let mut current = goal_idx;
    while current != start_idx {
        current = *predecessors.get(&current)?;
        node_path.push(current);
        if node_path.len() > node_count {
            warn!("Predecessor cycle while tracing path from {start} to {goal}, negative edge weights?");
            return None;
        }
    }
    node_path.reverse();

    let distance = distances.get(&goal_idx).copied().unwrap_or_default();
    trace!(
        "Path from {start} to {goal}: {} nodes, {distance} by {weight}",
        node_path.len()
    );

    Some(Route {
        nodes: node_path
            .into_iter()
            .map(|idx| network.node_id(idx).to_string())
            .collect(),
        distance,
        weight: weight.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EdgeRecord, NodeRecord, build_network};

    fn line(a: [f64; 2], b: [f64; 2]) -> Vec<[f64; 2]> {
        vec![a, b]
    }

    fn triangle() -> RoadNetwork {
        build_network(
            vec![
                NodeRecord::new("100", 114.1589, 22.2822),
                NodeRecord::new("200", 114.1629, 22.2799),
                NodeRecord::new("300", 114.1655, 22.2850),
            ],
            vec![
                EdgeRecord::new("100", "200", line([114.1589, 22.2822], [114.1629, 22.2799]))
                    .with_attribute("length", 400.0)
                    .with_attribute("bc", 0.12),
                EdgeRecord::new("200", "300", line([114.1629, 22.2799], [114.1655, 22.2850]))
                    .with_attribute("length", 520.0)
                    .with_attribute("bc", 0.30),
                EdgeRecord::new("100", "300", line([114.1589, 22.2822], [114.1655, 22.2850]))
                    .with_attribute("length", 700.0)
                    .with_attribute("bc", 0.05),
            ],
        )
    }

    #[test]
    fn test_triangle_prefers_two_short_edges() {
        let route = shortest_path(&triangle(), "100", "300", "length").unwrap();
        assert_eq!(route.nodes, vec!["100", "200", "300"]);
        assert!((route.distance - 920.0).abs() < 1e-9);
    }

    #[test]
    fn test_triangle_by_betweenness() {
        let route = shortest_path(&triangle(), "100", "300", "bc").unwrap();
        assert_eq!(route.nodes, vec!["100", "300"]);
        assert!((route.distance - 0.05).abs() < 1e-12);
        assert_eq!(route.weight, "bc");
    }

    #[test]
    fn test_same_start_and_goal() {
        let network = triangle();
        for id in ["100", "200", "300"] {
            let route = shortest_path(&network, id, id, "length").unwrap();
            assert_eq!(route.nodes, vec![id]);
            assert_eq!(route.distance, 0.0);
        }
    }

    #[test]
    fn test_unknown_ids() {
        let network = triangle();
        assert!(shortest_path(&network, "999", "300", "length").is_none());
        assert!(shortest_path(&network, "100", "999", "length").is_none());
    }

    #[test]
    fn test_disconnected_component() {
        let network = build_network(
            vec![],
            vec![
                EdgeRecord::new("a", "b", line([0.0, 0.0], [0.0, 0.001])),
                EdgeRecord::new("c", "d", line([1.0, 1.0], [1.0, 1.001])),
            ],
        );
        assert!(shortest_path(&network, "a", "d", "length").is_none());
        assert!(shortest_path(&network, "a", "b", "length").is_some());
    }

    #[test]
    fn test_oneway_is_respected() {
        let network = build_network(
            vec![],
            vec![
                EdgeRecord::new("a", "b", line([0.0, 0.0], [0.0, 0.001]))
                    .with_attribute("length", 10.0)
                    .oneway(true),
            ],
        );
        let route = shortest_path(&network, "a", "b", "length").unwrap();
        assert_eq!(route.nodes, vec!["a", "b"]);
        assert!(shortest_path(&network, "b", "a", "length").is_none());
    }

    #[test]
    fn test_weight_fallback_is_per_edge() {
        // a-b carries `time`, b-c only has `length`
        let network = build_network(
            vec![],
            vec![
                EdgeRecord::new("a", "b", line([0.0, 0.0], [0.0, 0.001]))
                    .with_attribute("length", 100.0)
                    .with_attribute("time", 7.0),
                EdgeRecord::new("b", "c", line([0.0, 0.001], [0.0, 0.002]))
                    .with_attribute("length", 50.0),
            ],
        );
        let route = shortest_path(&network, "a", "c", "time").unwrap();
        assert_eq!(route.nodes, vec!["a", "b", "c"]);
        assert!((route.distance - 57.0).abs() < 1e-9);
    }

    #[test]
    fn test_parallel_edges_pick_cheaper() {
        let network = build_network(
            vec![],
            vec![
                EdgeRecord::new("a", "b", line([0.0, 0.0], [0.0, 0.001]))
                    .with_attribute("length", 30.0),
                EdgeRecord::new("a", "b", line([0.0, 0.0], [0.0, 0.001]))
                    .with_attribute("length", 10.0),
                EdgeRecord::new("b", "b", line([0.0, 0.001], [0.0, 0.001]))
                    .with_attribute("length", 1.0),
            ],
        );
        let route = shortest_path(&network, "a", "b", "length").unwrap();
        assert_eq!(route.nodes, vec!["a", "b"]);
        assert!((route.distance - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_negative_cycle_in_predecessors_yields_none() {
        // a-b costs -1 both ways, so relaxing b rewrites a's predecessor
        let network = build_network(
            vec![],
            vec![
                EdgeRecord::new("s", "a", line([0.0, 0.0], [0.0, 0.001]))
                    .with_attribute("length", 1.0)
                    .oneway(true),
                EdgeRecord::new("a", "b", line([0.0, 0.001], [0.0, 0.002]))
                    .with_attribute("length", -1.0),
                EdgeRecord::new("b", "g", line([0.0, 0.002], [0.0, 0.003]))
                    .with_attribute("length", 10.0)
                    .oneway(true),
            ],
        );
        assert!(shortest_path(&network, "s", "g", "length").is_none());
        assert!(shortest_path(&network, "s", "a", "length").is_some());
    }

    #[test]
    fn test_empty_network() {
        let network = build_network(vec![], vec![]);
        assert!(shortest_path(&network, "a", "a", "length").is_none());
    }
}
