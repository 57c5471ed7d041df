use crate::{SpqrNodeType, triconnected_blocks::outside_structures::TriconnectedComponents};
use std::fmt::Write;

fn style_of(comp_type: SpqrNodeType) -> (&'static str, &'static str) {
    match comp_type {
        SpqrNodeType::R => ("#e6e6ff", "#ccccff"),
        SpqrNodeType::P => ("#e6ffe6", "#ccffcc"),
        SpqrNodeType::S => ("#ffe6e6", "#ffcccc"),
    }
}

fn distinct_nodes(edges: impl Iterator<Item = (usize, usize)>) -> Vec<usize> {
    let mut nodes: Vec<usize> = edges.flat_map(|(s, t)| [s, t]).collect();
    nodes.sort_unstable();
    nodes.dedup();
    nodes
}

/// Renders the input graph and every triconnected component as a DOT cluster.
///
/// Real edges are black and labeled by their id, virtual edges are dashed. A virtual edge id shows
/// up in exactly the two components it glues.
pub fn visualize_triconnected(tricon: &TriconnectedComponents) -> String {
    let mut output = String::new();

    writeln!(output, "graph components {{").unwrap();
    writeln!(output, "  graph [splines=true, rankdir=LR];").unwrap();
    writeln!(output, "  node [fontname=\"Helvetica\"];").unwrap();
    writeln!(output).unwrap();

    writeln!(output, "  subgraph cluster_graph {{").unwrap();
    writeln!(output, "    label=\"Graph\";").unwrap();
    writeln!(output, "    style=filled; fillcolor=\"#f0f0f0\";").unwrap();
    let real_edges = || {
        tricon
            .edges
            .iter()
            .enumerate()
            .filter(|(eid, _)| tricon.is_real[*eid])
    };
    for v in distinct_nodes(real_edges().map(|(_, &e)| e)) {
        writeln!(
            output,
            "    {v} [label=\"{v}\", shape=circle, fillcolor=\"#ffffff\", style=filled];"
        )
        .unwrap();
    }
    for (eid, (from, to)) in real_edges() {
        writeln!(output, "    {from} -- {to} [label=\"{eid}\", color=black];").unwrap();
    }
    writeln!(output, "  }}").unwrap();
    writeln!(output).unwrap();

    for (i, comp) in tricon.components.iter().enumerate() {
        let (fillcolor, nodecolor) = style_of(comp.comp_type);
        let prefix = format!("{}{}", comp.comp_type, i);

        writeln!(output, "  subgraph cluster_{prefix} {{").unwrap();
        writeln!(output, "    label=\"{}-component ({})\";", comp.comp_type, i).unwrap();
        writeln!(output, "    style=filled; fillcolor=\"{fillcolor}\";").unwrap();

        for v in distinct_nodes(comp.edges.iter().map(|&eid| tricon.edges[eid])) {
            writeln!(
                output,
                "    {prefix}_{v} [label=\"{v}\", shape=circle, fillcolor=\"{nodecolor}\", style=filled];"
            )
            .unwrap();
        }

        for &eid in &comp.edges {
            let (from, to) = tricon.edges[eid];
            let style = if tricon.is_real[eid] {
                "color=black"
            } else {
                "style=dashed, color=gray"
            };
            writeln!(
                output,
                "    {prefix}_{from} -- {prefix}_{to} [label=\"{eid}\", {style}];"
            )
            .unwrap();
        }

        writeln!(output, "  }}").unwrap();
        writeln!(output).unwrap();
    }

    writeln!(output, "}}").unwrap();
    output
}
