use crate::{EdgeLabel, UnGraph};
use petgraph::Undirected;
use petgraph::graph::{EdgeIndex, Edges, NodeIndex};
use petgraph::visit::EdgeRef;

/// Represents the block-cut decomposition of a graph: its blocks (biconnected components) and
/// cut vertices.
#[derive(Debug, Clone)]
pub struct BlockCutTree {
    /// Number of blocks in the graph.
    pub block_count: usize,
    /// Number of cut vertices in the graph.
    pub cut_count: usize,
    /// Blocks of the graph, node weights and edge labels are copied from the input.
    pub blocks: Vec<UnGraph>,
    /// For each block, the ids of its edges in the input graph.
    pub block_edges: Vec<Vec<EdgeIndex>>,
    /// Marks cut vertices of the input graph.
    pub is_cut: Vec<bool>,
}

struct DfsState {
    time: usize,
    preorder: Vec<usize>,
    edge_stack: Vec<EdgeIndex>,
    // block is defined by set of edges, this way we avoid problem with cut vertices multi membership
    blocks: Vec<Vec<EdgeIndex>>,
    is_cut: Vec<bool>,
}

/// A vertex on the dfs stack with its lowpoint and dfs child count so far.
struct Frame<'a> {
    u: usize,
    parent_edge: Option<EdgeIndex>,
    edges: Edges<'a, EdgeLabel, Undirected>,
    low: usize,
    children: usize,
}

fn enter<'a>(
    graph: &'a UnGraph,
    u: usize,
    parent_edge: Option<EdgeIndex>,
    state: &mut DfsState,
) -> Frame<'a> {
    state.preorder[u] = state.time;
    state.time += 1;
    Frame {
        u,
        parent_edge,
        edges: graph.edges(NodeIndex::new(u)),
        low: state.preorder[u],
        children: 0,
    }
}

/// Lowpoint dfs from `root`, collecting blocks and cut vertices into `state`.
fn dfs(graph: &UnGraph, root: usize, state: &mut DfsState) {
    let mut stack = vec![enter(graph, root, None, state)];

    while let Some(frame) = stack.last_mut() {
        let u = frame.u;
        let Some(edge) = frame.edges.next() else {
            let Some(done) = stack.pop() else { break };
            let Some(parent) = stack.last_mut() else {
                continue;
            };
            let eid = done.parent_edge.expect("dfs child has a tree edge");
            // maybe some descendant of the child has lower lowpoint
            parent.low = parent.low.min(done.low);

            if done.low >= state.preorder[parent.u] {
                // root is a cut vertex only with more than one dfs child
                if parent.parent_edge.is_some() || parent.children > 1 {
                    state.is_cut[parent.u] = true;
                }
                let mut block = Vec::new();
                while let Some(e) = state.edge_stack.pop() {
                    block.push(e);
                    if e == eid {
                        break;
                    }
                }
                state.blocks.push(block);
            }
            continue;
        };

        let eid = edge.id();
        if Some(eid) == frame.parent_edge {
            continue;
        }
        let v = if edge.source().index() == u {
            edge.target().index()
        } else {
            edge.source().index()
        };
        if v == u {
            continue; // self-loops belong to no block
        }

        if state.preorder[v] == usize::MAX {
            frame.children += 1;
            state.edge_stack.push(eid);
            let child = enter(graph, v, Some(eid), state);
            stack.push(child);
        } else if state.preorder[v] < state.preorder[u] {
            // back edge, parallel edges to the parent land here as well
            state.edge_stack.push(eid);
            frame.low = frame.low.min(state.preorder[v]);
        }
    }
}

/// Returns the biconnected components (blocks) of the graph.
///
/// Every edge except self-loops belongs to exactly one block. Isolated nodes belong to none.
pub fn get_block_cut_tree(graph: &UnGraph) -> BlockCutTree {
    let n = graph.node_count();
    let mut state = DfsState {
        time: 0,
        preorder: vec![usize::MAX; n],
        edge_stack: Vec::new(),
        blocks: Vec::new(),
        is_cut: vec![false; n],
    };

    for u in 0..n {
        if state.preorder[u] == usize::MAX {
            dfs(graph, u, &mut state);
        }
    }

    let mut blocks = Vec::with_capacity(state.blocks.len());
    let mut local = vec![usize::MAX; n];
    for block in state.blocks.iter_mut() {
        block.sort();

        let mut block_graph = UnGraph::new_undirected();
        let mut touched = Vec::new();
        for &eid in block.iter() {
            let (s, t) = graph.edge_endpoints(eid).expect("block edge exists");
            for x in [s.index(), t.index()] {
                if local[x] == usize::MAX {
                    touched.push(x);
                }
                local[x] = 0;
            }
        }
        touched.sort();
        for &x in &touched {
            local[x] = block_graph.add_node(graph[NodeIndex::new(x)]).index();
        }
        for &eid in block.iter() {
            let (s, t) = graph.edge_endpoints(eid).expect("block edge exists");
            block_graph.add_edge(
                NodeIndex::new(local[s.index()]),
                NodeIndex::new(local[t.index()]),
                graph[eid],
            );
        }
        for x in touched {
            local[x] = usize::MAX;
        }
        blocks.push(block_graph);
    }

    BlockCutTree {
        block_count: blocks.len(),
        cut_count: state.is_cut.iter().filter(|&&c| c).count(),
        blocks,
        block_edges: state.blocks,
        is_cut: state.is_cut,
    }
}

/// Returns true iff the graph is connected, has at least two nodes and has no cut vertex.
///
/// Self-loops are ignored.
pub fn is_biconnected(graph: &UnGraph) -> bool {
    let n = graph.node_count();
    if n < 2 {
        return false;
    }

    let mut state = DfsState {
        time: 0,
        preorder: vec![usize::MAX; n],
        edge_stack: Vec::new(),
        blocks: Vec::new(),
        is_cut: vec![false; n],
    };
    dfs(graph, 0, &mut state);

    state.time == n && state.blocks.len() == 1
}
