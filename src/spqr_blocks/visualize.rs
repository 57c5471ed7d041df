use std::fmt::Write;

use dot::{Edges, GraphWalk, Labeller, Nodes};

use crate::{SpqrNodeType, spqr_blocks::forest::SpqrForest};

fn colors(node_type: SpqrNodeType) -> (&'static str, &'static str) {
    match node_type {
        SpqrNodeType::R => ("#e6e6ff", "#ccccff"),
        SpqrNodeType::P => ("#e6ffe6", "#ccffcc"),
        SpqrNodeType::S => ("#ffe6e6", "#ffcccc"),
    }
}

/// Renders every skeleton as a DOT cluster and connects the clusters along the tree edges.
///
/// Real edges are labeled with the original edge id, virtual edges with the tree edge id and
/// drawn dashed. The root cluster has a bold border.
pub(crate) fn visualize_spqr(forest: &SpqrForest) -> String {
    let mut output = String::new();

    writeln!(output, "graph spqr {{").unwrap();
    writeln!(output, "  graph [splines=true, compound=true];").unwrap();
    writeln!(output, "  node [fontname=\"Helvetica\"];").unwrap();
    writeln!(output).unwrap();

    for c in forest.canonical_nodes() {
        let node_type = forest.node_type(c);
        let (fillcolor, nodecolor) = colors(node_type);
        let prefix = format!("{node_type}{c}");

        writeln!(output, "  subgraph cluster_{prefix} {{").unwrap();
        writeln!(output, "    label=\"{node_type}-node {c}\";").unwrap();
        writeln!(output, "    style=filled; fillcolor=\"{fillcolor}\";").unwrap();
        if c == forest.root {
            writeln!(output, "    penwidth=3;").unwrap();
        }

        let mut nodes: Vec<usize> = forest
            .hedges_of(c)
            .flat_map(|h| {
                let (s, t) = forest.hedges[h].ends;
                [s, t]
            })
            .collect();
        nodes.sort_unstable();
        nodes.dedup();
        for v in nodes {
            writeln!(
                output,
                "    {prefix}_{v} [label=\"{v}\", shape=circle, fillcolor=\"{nodecolor}\", style=filled];"
            )
            .unwrap();
        }

        for h in forest.hedges_of(c) {
            let hedge = &forest.hedges[h];
            let (s, t) = hedge.ends;
            let attributes = match hedge.real {
                Some(e) => format!("label=\"{e}\", color=black"),
                None => format!(
                    "label=\"t{}\", style=dashed, color=gray",
                    forest.tree_edge_of(h).index()
                ),
            };
            writeln!(output, "    {prefix}_{s} -- {prefix}_{t} [{attributes}];").unwrap();
        }

        writeln!(
            output,
            "    {prefix}_connector [shape=point, width=0.1, label=\"\", color=black];"
        )
        .unwrap();
        writeln!(output, "  }}").unwrap();
        writeln!(output).unwrap();
    }

    for c in forest.canonical_nodes() {
        for h in forest.child_hedges(c) {
            let d = forest.node_of(forest.twin_of(h));
            let (from, to) = (
                format!("{}{c}", forest.node_type(c)),
                format!("{}{d}", forest.node_type(d)),
            );
            writeln!(
                output,
                "  {from}_connector -- {to}_connector [ltail=cluster_{from}, lhead=cluster_{to}, color=black, penwidth=0.2];"
            )
            .unwrap();
        }
    }

    writeln!(output, "}}").unwrap();
    output
}

type Node = usize;

#[derive(Debug, Clone)]
struct Edge {
    id: usize,
    source: Node,
    target: Node,
}

struct Tree<'a> {
    forest: &'a SpqrForest,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl<'a> Labeller<'a, Node, Edge> for Tree<'a> {
    fn graph_id(&self) -> dot::Id<'_> {
        dot::Id::new("T").unwrap()
    }

    fn node_id(&self, n: &Node) -> dot::Id<'_> {
        dot::Id::new(format!("N{}", n)).unwrap()
    }

    fn node_label(&self, n: &Node) -> dot::LabelText<'a> {
        let forest = self.forest;
        let real = forest
            .hedges_of(*n)
            .filter(|&h| forest.hedges[h].real.is_some())
            .count();
        let total = forest.hedges_of(*n).count();
        dot::LabelText::label(format!(
            "{}{}\nreal:{} virtual:{}{}",
            forest.node_type(*n),
            n,
            real,
            total - real,
            if *n == forest.root { "\nroot" } else { "" }
        ))
    }

    fn edge_label(&self, e: &Edge) -> dot::LabelText<'a> {
        dot::LabelText::label(format!("t{}", e.id))
    }
}

impl<'a> GraphWalk<'a, Node, Edge> for Tree<'a> {
    fn nodes(&self) -> Nodes<'_, Node> {
        self.nodes.iter().cloned().collect()
    }

    fn edges(&self) -> Edges<'_, Edge> {
        self.edges.as_slice().into()
    }

    fn source(&self, e: &Edge) -> Node {
        e.source
    }

    fn target(&self, e: &Edge) -> Node {
        e.target
    }
}

/// Renders the tree alone with the `dot` crate, edges point from parents to children.
pub(crate) fn draw_tree(forest: &SpqrForest) -> String {
    let mut tree = Tree {
        forest,
        nodes: forest.canonical_nodes().collect(),
        edges: Vec::new(),
    };

    for &c in &tree.nodes {
        for h in forest.child_hedges(c) {
            tree.edges.push(Edge {
                id: forest.tree_edge_of(h).index(),
                source: c,
                target: forest.node_of(forest.twin_of(h)),
            });
        }
    }

    let mut buffer = std::io::Cursor::new(Vec::new());
    dot::render(&tree, &mut buffer).expect("writing to memory does not fail");
    String::from_utf8(buffer.into_inner()).expect("dot renders utf-8")
}
