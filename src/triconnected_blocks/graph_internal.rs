use std::collections::VecDeque;

use petgraph::visit::EdgeRef;

use crate::{UnGraph, triconnected_blocks::outside_structures::EdgeType};

/// Highpoint lists of the path search.
///
/// `lists[v]` holds entries of fronds ending in `v`, the first alive entry is `high(v)`. Entries are
/// deleted lazily: an edge owns at most one entry and dropping it only flips `alive`.
#[derive(Debug, Clone, Default)]
pub(crate) struct HighPoints {
    lists: Vec<VecDeque<usize>>,
    value: Vec<usize>,
    alive: Vec<bool>,
    pub in_high: Vec<Option<usize>>, // entry owned by an edge
}

impl HighPoints {
    fn new_entry(&mut self, value: usize) -> usize {
        self.value.push(value);
        self.alive.push(true);
        self.value.len() - 1
    }

    pub fn push_back(&mut self, v: usize, eid: usize, value: usize) {
        let entry = self.new_entry(value);
        self.lists[v].push_back(entry);
        self.in_high[eid] = Some(entry);
    }

    pub fn push_front(&mut self, v: usize, eid: usize, value: usize) {
        let entry = self.new_entry(value);
        self.lists[v].push_front(entry);
        self.in_high[eid] = Some(entry);
    }

    pub fn delete(&mut self, eid: usize) {
        if let Some(entry) = self.in_high[eid].take() {
            self.alive[entry] = false;
        }
    }

    /// Returns `high(v)`, or 0 if no frond ends in `v`.
    pub fn high(&mut self, v: usize) -> usize {
        while let Some(&entry) = self.lists[v].front() {
            if self.alive[entry] {
                return self.value[entry];
            }
            self.lists[v].pop_front();
        }
        0
    }
}

#[derive(Debug, Clone)]
pub(crate) struct GraphInternal {
    pub n: usize,                         // number of vertices
    pub m: usize,                         // number of real edges
    pub edges: Vec<(usize, usize)>,       // edges in the form (source, target)
    pub edge_type: Vec<Option<EdgeType>>, // edge type, None means not visited yet
    pub incident: Vec<Vec<usize>>,        // undirected incidence lists for the palm dfs

    pub adj: Vec<Vec<Option<usize>>>,      // acceptable adjacency structure, None is a deleted slot
    pub in_adj: Vec<Option<(usize, usize)>>, // slot of an edge in `adj`

    pub num: Vec<usize>, // dfs number, after the pathfinder it is the path search number
    pub low1: Vec<usize>,
    pub low2: Vec<usize>,
    pub nd: Vec<usize>, // number of descendants
    pub deg: Vec<usize>,
    pub father: Vec<Option<usize>>,
    pub tree_arc: Vec<Option<usize>>, // edge id of the parent edge in DFS tree
    pub node_at: Vec<usize>,          // reverse mapping from num to original vertex

    pub starts_path: Vec<bool>,
    pub high: HighPoints,
}

impl GraphInternal {
    pub fn from_petgraph(graph: &UnGraph) -> Self {
        let n = graph.node_count();
        let mut ret = Self::new(n);

        for e in graph.edge_references() {
            ret.new_edge(e.source().index(), e.target().index());
        }
        ret.m = ret.edges.len();

        ret
    }

    pub fn new(n: usize) -> Self {
        Self {
            n,
            m: 0,
            edges: Vec::new(),
            edge_type: Vec::new(),
            incident: vec![Vec::new(); n],

            adj: vec![Vec::new(); n],
            in_adj: Vec::new(),

            num: vec![0; n],
            low1: vec![0; n],
            low2: vec![0; n],
            nd: vec![0; n],
            deg: vec![0; n],
            father: vec![None; n],
            tree_arc: vec![None; n],
            node_at: vec![0; n + 1],

            starts_path: Vec::new(),
            high: HighPoints {
                lists: vec![VecDeque::new(); n],
                ..Default::default()
            },
        }
    }

    /// Adds an edge `s -> t` without touching the adjacency structures.
    pub fn new_edge(&mut self, s: usize, t: usize) -> usize {
        let eid = self.edges.len();

        self.edges.push((s, t));
        self.edge_type.push(None);
        self.in_adj.push(None);
        self.starts_path.push(false);
        self.high.in_high.push(None);

        eid
    }

    pub fn is_virtual(&self, eid: usize) -> bool {
        eid >= self.m
    }

    pub fn get_other_vertex(&self, eid: usize, u: usize) -> usize {
        let (s, t) = self.edges[eid];
        if s == u { t } else { s }
    }

    /// Removes an edge from the acceptable adjacency structure.
    pub fn delete_from_adj(&mut self, eid: usize) {
        if let Some((v, i)) = self.in_adj[eid].take() {
            self.adj[v][i] = None;
        }
    }

    /// Puts `eid` into the adjacency slot `(v, i)`.
    pub fn set_adj(&mut self, v: usize, i: usize, eid: usize) {
        self.adj[v][i] = Some(eid);
        self.in_adj[eid] = Some((v, i));
    }

    /// Target of the first alive arc leaving `u`.
    pub fn first_child(&self, u: usize) -> Option<usize> {
        self.adj[u]
            .iter()
            .flatten()
            .next()
            .map(|&eid| self.edges[eid].1)
    }
}
