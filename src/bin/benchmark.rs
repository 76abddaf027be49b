use std::time::{Duration, Instant};
use rand::Rng;
use path_solver::algorithm::path::path_to;
use path_solver::algorithm::{ShortestPathAlgorithm, ShortestPathResult};
use path_solver::graph::{GraphModel, Weight};
use path_solver::Dijkstra;

// Random directed graph with node ids "n0".."n{n-1}" and about edge_factor * n edges
fn generate_random_graph(num_vertices: usize, edge_factor: f64) -> GraphModel {
    let mut rng = rand::thread_rng();
    let ids: Vec<String> = (0..num_vertices).map(|i| format!("n{}", i)).collect();

    let num_edges = (edge_factor * num_vertices as f64) as usize;
    let mut edges = Vec::with_capacity(num_edges);
    for _ in 0..num_edges {
        let u = rng.gen_range(0..num_vertices);
        let v = rng.gen_range(0..num_vertices);
        if u != v {
            edges.push((ids[u].clone(), ids[v].clone(), rng.gen_range(1.0..100.0)));
        }
    }

    GraphModel::build(ids, edges).expect("generated graph is well formed")
}

fn benchmark_query(graph: &GraphModel, source: &str, target: &str) -> Duration {
    println!("Solving from {} on graph with {} vertices...", source, graph.node_count());

    let start = Instant::now();
    let result: ShortestPathResult<Weight> = Dijkstra::new().solve(graph, source).unwrap();
    let path = path_to(graph, &result, target).unwrap();
    let duration = start.elapsed();

    println!(
        "  - {} reachable, {} relaxations, {} stale pops in {:?}",
        result.reachable_count(),
        result.stats.relaxations,
        result.stats.stale_pops,
        duration
    );
    match path {
        Some(path) => println!("  - {} -> {}: {} hops, distance {:.2}", source, target, path.nodes.len() - 1, path.total_distance),
        None => println!("  - {} -> {}: unreachable", source, target),
    }

    duration
}

fn main() {
    let graph_sizes = vec![1_000, 10_000, 100_000, 500_000];
    let edge_factor = 4.0;

    println!("=====================================================");
    println!("Benchmark: Dijkstra with lazy-deletion binary heap");
    println!("Edge factor: {} edges per vertex (on average)", edge_factor);
    println!("=====================================================");

    let mut results = Vec::new();

    for &size in &graph_sizes {
        println!("\nGenerating random graph with {} vertices...", size);
        let graph = generate_random_graph(size, edge_factor);
        let target = format!("n{}", size - 1);

        let duration = benchmark_query(&graph, "n0", &target);
        results.push((size, graph.node_count(), duration));
    }

    println!("\n=====================================================");
    println!("Summary of Results");
    println!("=====================================================");
    println!("{:<10} | {:<15} | {:<15}", "Vertices", "Query (ms)", "ns / vertex");
    println!("-----------------------------------------------------");

    for (size, vertices, duration) in &results {
        println!(
            "{:<10} | {:<15.2} | {:<15.2}",
            size,
            duration.as_secs_f64() * 1000.0,
            duration.as_nanos() as f64 / *vertices as f64
        );
    }
}
