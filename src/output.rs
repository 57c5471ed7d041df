use std::fmt::Write;

use crate::{EdgeLabel, UnGraph, spqr_blocks::skeleton::Skeleton};
use petgraph::visit::EdgeRef;

/// Returns a graph in DOT format.
///
/// It shows your nodes labels, not petgraph's internal indices.
///
/// Real edges are solid and virtual edges are dashed.
///
/// Intended to be used with `neato`.
pub fn draw_graph(graph: &UnGraph) -> String {
    let mut output = String::from("graph {\n");
    output.push_str("  mode=sgd;\n");
    output.push_str("  maxiter=1000;\n");
    output.push_str("  node [shape=circle, style=filled, fillcolor=lightblue];\n");

    for node_idx in graph.node_indices() {
        writeln!(output, "  {} [label=\"{}\"];", node_idx.index(), graph[node_idx]).unwrap();
    }

    for edge in graph.edge_references() {
        let (a, b) = (edge.source().index(), edge.target().index());
        let style = match edge.weight() {
            EdgeLabel::Virtual => "dashed",
            EdgeLabel::Real => "solid",
        };
        writeln!(output, "  {} -- {} [style={}];", a, b, style).unwrap();
    }
    output.push_str("}\n");
    output
}

/// Returns a skeleton in DOT format.
///
/// Nodes show the original node they stand for, real edges the original edge id and virtual
/// edges the tree edge id. The reference edge is drawn bold.
pub fn draw_skeleton(skeleton: &Skeleton) -> String {
    let graph = skeleton.get_graph();
    let mut output = String::from("graph {\n");
    writeln!(
        output,
        "  label=\"{}-node {}\";",
        skeleton.node_type(),
        skeleton.tree_node().index()
    )
    .unwrap();
    output.push_str("  node [shape=circle, style=filled, fillcolor=lightblue];\n");

    for v in graph.node_indices() {
        writeln!(
            output,
            "  {} [label=\"{}\"];",
            v.index(),
            skeleton.original(v).index()
        )
        .unwrap();
    }

    for edge in graph.edge_references() {
        let (a, b) = (edge.source().index(), edge.target().index());
        let mut attributes = match skeleton.real_edge(edge.id()) {
            Some(real) => format!("label=\"{}\", style=solid", real.index()),
            None => format!(
                "label=\"t{}\", style=dashed",
                skeleton
                    .twin_tree_edge(edge.id())
                    .map_or(0, |te| te.index())
            ),
        };
        if skeleton.reference_edge() == Some(edge.id()) {
            attributes.push_str(", penwidth=3");
        }
        writeln!(output, "  {} -- {} [{}];", a, b, attributes).unwrap();
    }
    output.push_str("}\n");
    output
}

/// Writes the graph to a file in DOT format.
pub fn to_dot_file(graph: &UnGraph, path: &str) -> std::io::Result<()> {
    to_file(&draw_graph(graph), path)
}

/// Writes a string to a file.
pub fn to_file(content: &str, path: &str) -> std::io::Result<()> {
    std::fs::write(path, content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::from_str;

    #[test]
    fn test_draw_graph_styles() {
        let mut graph = from_str("0,1\n1,2\n2,0\n").unwrap();
        graph.add_edge(0.into(), 2.into(), EdgeLabel::Virtual);

        let dot = draw_graph(&graph);
        assert!(dot.starts_with("graph {"));
        assert_eq!(dot.matches("style=solid").count(), 3);
        assert_eq!(dot.matches("style=dashed").count(), 1);
        assert!(dot.contains("1 [label=\"1\"]"));
    }
}
