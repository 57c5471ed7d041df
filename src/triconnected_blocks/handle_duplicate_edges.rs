use crate::{
    SpqrNodeType,
    triconnected_blocks::{
        graph_internal::GraphInternal,
        outside_structures::{Component, EdgeType, PendingComponent},
    },
};

/// Splits off every bundle of parallel edges as a bond.
///
/// Each bundle `{e_1, ..., e_k}` becomes a P component `{e_1, ..., e_k, e'}` and is replaced in the
/// graph by one new virtual edge `e'`. Bundle members are marked `Removed` so the remaining
/// graph is simple. Fills the undirected incidence lists used by the palm dfs.
pub(crate) fn handle_duplicate_edges(
    graph: &mut GraphInternal,
    split_components: &mut Vec<Component>,
) {
    let key = |&(s, t): &(usize, usize)| -> u64 {
        let (lo, hi) = if s < t { (s, t) } else { (t, s) };
        ((lo as u64) << 32) | hi as u64
    };

    // radix sort is stable, so bundles keep the input order
    let mut order: Vec<usize> = (0..graph.m).collect();
    radsort::sort_by_key(&mut order, |&eid| key(&graph.edges[eid]));

    let mut i = 0;
    while i < order.len() {
        let bundle_key = key(&graph.edges[order[i]]);
        let mut j = i + 1;
        while j < order.len() && key(&graph.edges[order[j]]) == bundle_key {
            j += 1;
        }

        if j - i >= 2 {
            let (s, t) = graph.edges[order[i]];
            let evirt = graph.new_edge(s, t);

            let mut component = PendingComponent::new(Some(SpqrNodeType::P));
            component.push_edge(evirt);
            for &eid in &order[i..j] {
                component.push_edge(eid);
                graph.edge_type[eid] = Some(EdgeType::Removed);
            }
            component.commit(graph, split_components);
        }

        i = j;
    }

    for eid in 0..graph.edges.len() {
        if graph.edge_type[eid] == Some(EdgeType::Removed) {
            continue;
        }
        let (s, t) = graph.edges[eid];
        graph.incident[s].push(eid);
        graph.incident[t].push(eid); // add both directions, since we are not rooted yet
    }
}
