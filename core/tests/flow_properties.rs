//! Properties of the min-cost max-flow solver checked against exhaustive search
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use flow_core::algorithm::graph::min_cost_flow::FlowPath;
use flow_core::{
    min_cost_max_flow, verify_flow, FlowAssignment, FlowError, Graph, MinCostFlowSolver, Network,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const TOLERANCE: f64 = 1e-9;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Random graph on `n` vertices with integral weights and capacities
fn random_network(rng: &mut StdRng, n: usize, edges: usize) -> Network<usize> {
    let mut graph = Graph::new();
    let ids: Vec<_> = (0..n).map(|i| graph.add_vertex(i)).collect();

    let mut attempts = 0;
    while graph.edge_count() < edges && attempts < 100 {
        attempts += 1;
        let from = rng.random_range(0..n);
        let to = rng.random_range(0..n);
        if from == to || to == 0 || from == n - 1 {
            continue;
        }
        let weight = rng.random_range(0..=4) as f64;
        let capacity = rng.random_range(0..=2) as f64;
        // Duplicate pairs are rejected; just draw again
        let _ = graph.add_edge(ids[from], ids[to], weight, capacity);
    }

    Network::new(graph, ids[0], ids[n - 1]).unwrap()
}

/// Best (value, cost) over every integral feasible flow
fn brute_force(network: &Network<usize>) -> (f64, f64) {
    let capacities: Vec<usize> = network
        .graph()
        .edges()
        .iter()
        .map(|e| e.capacity as usize)
        .collect();
    let mut current = vec![0usize; capacities.len()];
    let mut best = (0.0, 0.0);

    'enumerate: loop {
        let mut flow = FlowAssignment::for_graph(network.graph());
        for (i, &units) in current.iter().enumerate() {
            flow.set(flow_core::EdgeId(i), units as f64);
        }

        if let Ok(certificate) = verify_flow(network, &flow, TOLERANCE) {
            let better_value = certificate.value > best.0;
            let cheaper = certificate.value == best.0 && certificate.cost < best.1;
            if better_value || cheaper {
                best = (certificate.value, certificate.cost);
            }
        }

        for i in 0..capacities.len() {
            if current[i] < capacities[i] {
                current[i] += 1;
                continue 'enumerate;
            }
            current[i] = 0;
        }
        break;
    }

    best
}

fn diamond() -> Network<&'static str> {
    let mut graph = Graph::new();
    let s = graph.add_vertex("S");
    let a = graph.add_vertex("A");
    let b = graph.add_vertex("B");
    let t = graph.add_vertex("T");
    graph.add_edge(s, a, 1.0, 5.0).unwrap();
    graph.add_edge(s, b, 1.0, 3.0).unwrap();
    graph.add_edge(b, a, 1.0, 1.0).unwrap();
    graph.add_edge(a, t, 1.0, 4.0).unwrap();
    graph.add_edge(b, t, 1.0, 4.0).unwrap();
    Network::new(graph, s, t).unwrap()
}

#[test]
fn test_optimal_against_exhaustive_search() {
    init_logging();
    let mut rng = StdRng::seed_from_u64(2025);
    let solver = MinCostFlowSolver::default();

    for _ in 0..25 {
        let network = random_network(&mut rng, 5, 7);
        let result = solver.solve(&network).unwrap();
        let (value, cost) = brute_force(&network);

        assert_eq!(result.value, value, "value differs on\n{}", network);
        assert_eq!(result.cost, cost, "cost differs on\n{}", network);
    }
}

#[test]
fn test_result_is_a_valid_flow() {
    init_logging();
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..25 {
        let network = random_network(&mut rng, 6, 9);
        let flow = min_cost_max_flow(&network).unwrap();

        let certificate = verify_flow(&network, &flow, TOLERANCE).unwrap();
        assert_eq!(certificate.value, network.flow_value(&flow));
        assert!(flow.iter().all(|(_, f)| f >= 0.0));
    }
}

#[test]
fn test_edge_order_does_not_change_value_or_cost() {
    let mut rng = StdRng::seed_from_u64(99);
    let solver = MinCostFlowSolver::default();

    let mut network = diamond();
    let expected = solver.solve(&network).unwrap();
    assert_eq!((expected.value, expected.cost), (7.0, 14.0));

    for _ in 0..10 {
        network.graph_mut().shuffle_edges(&mut rng);
        let result = solver.solve(&network).unwrap();
        assert_eq!(result.value, expected.value);
        assert_eq!(result.cost, expected.cost);
    }
}

#[test]
fn test_augmenting_paths_are_simple_and_cheapest_first() {
    let mut rng = StdRng::seed_from_u64(11);
    let solver = MinCostFlowSolver::default();

    for _ in 0..25 {
        let network = random_network(&mut rng, 6, 10);
        let result = solver.solve(&network).unwrap();

        let paths: &[FlowPath] = &result.flow_paths;
        for path in paths {
            let mut seen = std::collections::HashSet::new();
            assert!(path.path.iter().all(|v| seen.insert(*v)));
            assert_eq!(path.path.first(), Some(&network.source()));
            assert_eq!(path.path.last(), Some(&network.sink()));
            assert!(path.flow > 0.0);
        }

        // Successive shortest path costs never decrease
        for pair in paths.windows(2) {
            assert!(pair[0].unit_cost <= pair[1].unit_cost + TOLERANCE);
        }

        let pushed: f64 = paths.iter().map(|p| p.flow).sum();
        assert_eq!(pushed, result.value);
    }
}

#[test]
fn test_negative_cycle_is_reported() {
    let mut graph = Graph::new();
    let a = graph.add_vertex("A");
    let b = graph.add_vertex("B");
    let c = graph.add_vertex("C");
    let d = graph.add_vertex("D");
    graph.add_edge(a, b, 2.0, 1.0).unwrap();
    graph.add_edge(b, c, -1.0, 1.0).unwrap();
    graph.add_edge(c, b, -10.0, 1.0).unwrap();
    graph.add_edge(c, d, 5.0, 1.0).unwrap();
    let network = Network::new(graph, a, d).unwrap();

    match min_cost_max_flow(&network) {
        Err(FlowError::NegativeCycle { vertex }) => assert!(vertex == b || vertex == c),
        other => panic!("expected a negative cycle, got {:?}", other),
    }
}
