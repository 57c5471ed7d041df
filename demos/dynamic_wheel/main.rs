/// Example of growing a wheel from its rim with a dynamic SPQR tree.
/// Usage: `RUST_LOG=debug cargo run --example dynamic_wheel | dot -Tsvg > wheel.svg`
use petgraph::graph::{EdgeIndex, NodeIndex};
use spqr_trees::{DynamicSpqrTree, EdgeLabel, SpqrError, UnGraph};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), SpqrError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // rim 0..5 with the chord (0, 2)
    let mut graph = UnGraph::new_undirected();
    for i in 0..5 {
        graph.add_node(i);
    }
    for i in 0..5 {
        graph.add_edge(NodeIndex::new(i), NodeIndex::new((i + 1) % 5), EdgeLabel::Real);
    }
    graph.add_edge(NodeIndex::new(0), NodeIndex::new(2), EdgeLabel::Real);

    let mut tree = DynamicSpqrTree::new(&mut graph)?;
    let (hub, _) = tree.insert_node(EdgeIndex::new(5))?;
    for x in [1, 3, 4] {
        tree.insert_edge(hub, NodeIndex::new(x))?;
        eprintln!(
            "after spoke to {x}: S: {}, P: {}, R: {}",
            tree.number_of_s_nodes(),
            tree.number_of_p_nodes(),
            tree.number_of_r_nodes()
        );
    }

    print!("{}", tree.draw_tree());
    Ok(())
}
