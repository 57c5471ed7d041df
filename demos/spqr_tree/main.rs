/// Example of drawing the SPQR tree of a graph read from a file (`assets/spqr.in` by default).
/// I use it with `cargo run --example spqr_tree -- graph.in | fdp -Tsvg > spqr.svg`
/// Set `RUST_LOG=debug` to see how the tree was built.
use spqr_trees::{SpqrError, input::from_file, spqr_tree::StaticSpqrTree};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), SpqrError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "assets/spqr.in".to_string());
    let graph = from_file(&path)?;
    let tree = StaticSpqrTree::new(&graph)?;

    eprintln!(
        "S: {}, P: {}, R: {}",
        tree.number_of_s_nodes(),
        tree.number_of_p_nodes(),
        tree.number_of_r_nodes()
    );
    print!("{}", tree.to_dot());
    Ok(())
}
