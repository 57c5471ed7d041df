use crate::triconnected_blocks::{graph_internal::GraphInternal, outside_structures::EdgeType};

/// Orders the arcs leaving each vertex by
///
/// - `3 * low1(w)` for a tree arc `v -> w` with `low2(w) < num(v)`,
/// - `3 * num(w) + 1` for a frond `v -> w`,
/// - `3 * low1(w) + 2` for the remaining tree arcs,
///
/// using a bucket sort, and records the slot of each arc.
pub(crate) fn make_adjacency_lists_acceptable(graph: &mut GraphInternal) {
    let phi = |eid: usize| -> usize {
        let (u, to) = graph.edges[eid];
        if graph.edge_type[eid] == Some(EdgeType::Frond) {
            3 * graph.num[to] + 1
        } else if graph.low2[to] < graph.num[u] {
            3 * graph.low1[to]
        } else {
            3 * graph.low1[to] + 2
        }
    };

    let n = graph.n;
    let mut buckets: Vec<Vec<usize>> = vec![Vec::new(); 3 * n + 3];

    for eid in 0..graph.edges.len() {
        if graph.edge_type[eid] == Some(EdgeType::Removed) {
            continue; // skip removed multi-edges
        }
        buckets[phi(eid)].push(eid);
    }

    graph.adj = vec![Vec::new(); n];
    for bucket in buckets {
        for eid in bucket {
            let s = graph.edges[eid].0;
            let slot = graph.adj[s].len();
            graph.adj[s].push(None);
            graph.set_adj(s, slot, eid);
        }
    }
}
