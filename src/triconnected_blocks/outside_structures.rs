use crate::{SpqrNodeType, triconnected_blocks::graph_internal::GraphInternal};

/// Classification of the edges of the palm tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeType {
    Tree,
    Frond,
    Removed, // multi-edge replaced by a bond representative
}

/// Represents a component in the triconnected decomposition.
///
/// Contains a list of edges that belong to the component and its type. Edge ids index
/// [`TriconnectedComponents::edges`].
#[derive(Debug, Clone)]
pub struct Component {
    pub edges: Vec<usize>,
    pub comp_type: SpqrNodeType,
}

/// A split component under construction, its type is decided on commit unless it is forced.
#[derive(Debug, Clone)]
pub(crate) struct PendingComponent {
    edges: Vec<usize>,
    comp_type: Option<SpqrNodeType>,
}

impl PendingComponent {
    pub fn new(comp_type: Option<SpqrNodeType>) -> Self {
        Self {
            edges: Vec::new(),
            comp_type,
        }
    }

    pub fn push_edge(&mut self, eid: usize) -> &mut Self {
        self.edges.push(eid);
        self
    }

    /// Classifies the component by its shape (two poles: bond, simple cycle: polygon, else
    /// rigid) when the type was not forced, and stores it.
    pub fn commit(self, graph: &GraphInternal, split_components: &mut Vec<Component>) {
        let comp_type = match self.comp_type {
            Some(t) => t,
            None => classify(&self.edges, &graph.edges),
        };

        split_components.push(Component {
            edges: self.edges,
            comp_type,
        });
    }
}

pub(crate) fn classify(eids: &[usize], edges: &[(usize, usize)]) -> SpqrNodeType {
    let mut nodes: Vec<usize> = eids
        .iter()
        .flat_map(|&eid| [edges[eid].0, edges[eid].1])
        .collect();
    nodes.sort_unstable();

    let mut distinct = 0;
    let mut all_degree_two = true;
    let mut i = 0;
    while i < nodes.len() {
        let mut j = i;
        while j < nodes.len() && nodes[j] == nodes[i] {
            j += 1;
        }
        distinct += 1;
        all_degree_two &= j - i == 2;
        i = j;
    }

    if distinct == 2 {
        SpqrNodeType::P
    } else if all_degree_two && distinct == eids.len() {
        SpqrNodeType::S
    } else {
        SpqrNodeType::R
    }
}

/// Holds the triconnected components of a graph.
///
/// - `components`: list of components in the triconnected decomposition, bonds and polygons are
///   already merged, so no two components of the same type `S` or `P` share a virtual edge.
/// - `edges`: list of edges. Ids `0..m` are the edges of the input graph (same as their
///   `EdgeIndex`), higher ids are virtual edges created during the splitting process.
/// - `is_real`: indicates if an edge is a real edge in the original graph.
/// - `to_split`: maps real edges to the component holding them. Virtual edges are mapped to `None`.
#[derive(Debug, Clone)]
pub struct TriconnectedComponents {
    pub components: Vec<Component>,
    pub edges: Vec<(usize, usize)>,
    pub is_real: Vec<bool>,
    pub to_split: Vec<Option<usize>>,
}

impl TriconnectedComponents {
    /// Number of edges of the input graph.
    pub fn real_edge_count(&self) -> usize {
        self.is_real.iter().take_while(|&&r| r).count()
    }

    pub fn number_of_type(&self, comp_type: SpqrNodeType) -> usize {
        self.components
            .iter()
            .filter(|c| c.comp_type == comp_type)
            .count()
    }
}
