use std::mem;

use crate::triconnected_blocks::{graph_internal::GraphInternal, outside_structures::EdgeType};

fn enter(u: usize, time: &mut usize, graph: &mut GraphInternal) {
    *time += 1;
    graph.num[u] = *time;
    graph.low1[u] = *time;
    graph.low2[u] = *time;
    graph.nd[u] = 1;
    graph.deg[u] = graph.incident[u].len();
}

/// Folds the finished child `to` into the values of its father `u`.
fn leave(u: usize, to: usize, graph: &mut GraphInternal) {
    graph.nd[u] += graph.nd[to];

    if graph.low1[to] < graph.low1[u] {
        graph.low2[u] = graph.low1[u].min(graph.low2[to]);
        graph.low1[u] = graph.low1[to];
    } else if graph.low1[to] == graph.low1[u] {
        graph.low2[u] = graph.low2[u].min(graph.low2[to]);
    } else {
        graph.low2[u] = graph.low2[u].min(graph.low1[to]);
    }
}

fn dfs(root: usize, graph: &mut GraphInternal) {
    let mut time = 0;
    enter(root, &mut time, graph);
    // (vertex, next position in its incidence list)
    let mut stack = vec![(root, 0)];

    while let Some(top) = stack.last_mut() {
        let (u, pos) = *top;
        let Some(&eid) = graph.incident[u].get(pos) else {
            stack.pop();
            if let Some(&(father, _)) = stack.last() {
                leave(father, u, graph);
            }
            continue;
        };
        top.1 += 1;

        if graph.edge_type[eid].is_some() {
            continue; // already visited
        }

        let to = graph.get_other_vertex(eid, u);

        if graph.num[to] == 0 {
            // tree edge
            graph.edge_type[eid] = Some(EdgeType::Tree);
            graph.tree_arc[to] = Some(eid);
            graph.father[to] = Some(u);

            enter(to, &mut time, graph);
            stack.push((to, 0));
        } else {
            // frond (upwards)
            graph.edge_type[eid] = Some(EdgeType::Frond);

            if graph.num[to] < graph.low1[u] {
                graph.low2[u] = graph.low1[u];
                graph.low1[u] = graph.num[to];
            } else if graph.num[to] > graph.low1[u] {
                graph.low2[u] = graph.low2[u].min(graph.num[to]);
            }
        }
    }
}

/// Given a simple graph, this function calculates the `palm tree` of the graph using a DFS algorithm.
///
/// In particular, it calculates the values needed further in the algorithm:
/// - `num[u]` - the order of the vertex in the DFS traversal (preorder number, starting at 1)
/// - `low1[u]` - the lowest `num` value reachable from `u` via tree edges and one frond
/// - `low2[u]` - the second lowest `num` value reachable
/// - `nd[u]` - the size of the subtree rooted at `u`
/// - `deg[u]` - the degree of `u` without removed multi-edges
///
/// It also determines the type of each edge in the graph, which can be either `Tree` or `Frond`.
///
/// The function modifies the `graph` in place, ensuring that tree edges point from parent to child
/// and fronds from descendant to ancestor.
pub(crate) fn run_palm_dfs(graph: &mut GraphInternal, root: usize) {
    dfs(root, graph);

    for (eid, edge) in graph.edges.iter_mut().enumerate() {
        let (s, t) = *edge;
        let descends = graph.num[t] > graph.num[s];
        match graph.edge_type[eid] {
            Some(EdgeType::Frond) if descends => mem::swap(&mut edge.0, &mut edge.1),
            Some(EdgeType::Tree) if !descends => mem::swap(&mut edge.0, &mut edge.1),
            _ => {}
        }
    }
}
