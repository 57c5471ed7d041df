use crate::triconnected_blocks::{graph_internal::GraphInternal, outside_structures::EdgeType};

struct PathFinder {
    newnum: Vec<usize>,
    time: usize,
    new_path: bool,
}

fn dfs(root: usize, graph: &mut GraphInternal, state: &mut PathFinder) {
    state.newnum[root] = state.time + 1 - graph.nd[root];
    let mut stack = vec![(root, 0)];

    while let Some(top) = stack.last_mut() {
        let (u, i) = *top;
        if i == graph.adj[u].len() {
            stack.pop();
            if !stack.is_empty() {
                state.time -= 1;
            }
            continue;
        }
        top.1 += 1;

        let Some(eid) = graph.adj[u][i] else {
            continue;
        };
        let to = graph.edges[eid].1;

        if state.new_path {
            state.new_path = false;
            graph.starts_path[eid] = true;
        }

        if graph.edge_type[eid] == Some(EdgeType::Tree) {
            state.newnum[to] = state.time + 1 - graph.nd[to];
            stack.push((to, 0));
        } else {
            // always a frond, the first one to reach `to` is its highpoint
            let value = state.newnum[u];
            graph.high.push_back(to, eid, value);
            state.new_path = true;
        }
    }
}

/// Pathfinder part: calculates `newnum(v)`, `starts_path(e)` and the highpoint lists.
///
/// Vertices get renumbered so that the first child in the acceptable adjacency order owns the
/// highest numbers. Afterwards `num`, `low1` and `low2` use the new numbering and `node_at`
/// inverts `num`.
pub(crate) fn run_pathfinder(root: usize, graph: &mut GraphInternal) {
    let mut state = PathFinder {
        newnum: vec![0; graph.n],
        time: graph.n,
        new_path: true,
    };
    dfs(root, graph, &mut state);

    // now we need to renumber the vertices from num(v) to newnum(v)
    let mut old_to_new = vec![0; graph.n + 1];
    for u in 0..graph.n {
        old_to_new[graph.num[u]] = state.newnum[u];
    }

    for u in 0..graph.n {
        graph.low1[u] = old_to_new[graph.low1[u]];
        graph.low2[u] = old_to_new[graph.low2[u]];
        graph.num[u] = state.newnum[u];
        graph.node_at[graph.num[u]] = u;
    }
}
