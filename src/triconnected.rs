use petgraph::visit::EdgeRef;
use tracing::{debug, trace};

use crate::{
    SpqrNodeType, UnGraph,
    block_cut::is_biconnected,
    error::SpqrError,
    triconnected_blocks::{
        acceptable_adj::make_adjacency_lists_acceptable,
        graph_internal::GraphInternal,
        handle_duplicate_edges::handle_duplicate_edges,
        merge_components::merge_components,
        outside_structures::{Component, EdgeType, PendingComponent, TriconnectedComponents},
        palm_dfs::run_palm_dfs,
        pathfinder::run_pathfinder,
    },
};

/// Bottom marker of a path segment on the `TSTACK`, path search numbers start at 1.
const EOS: (usize, usize, usize) = (0, 0, 0);

/// State of the second search: the edge stack, the stack of candidate separation pairs
/// `(h, a, b)` and the split components found so far.
struct PathSearch {
    root: usize,
    graph: GraphInternal,
    estack: Vec<usize>,
    tstack: Vec<(usize, usize, usize)>,
    split_components: Vec<Component>,
}

impl PathSearch {
    fn top(&self) -> (usize, usize, usize) {
        *self.tstack.last().expect("tstack lost its bottom marker")
    }

    fn pop_estack(&mut self) -> usize {
        self.estack.pop().expect("estack ran empty inside a split")
    }

    fn commit(&mut self, component: PendingComponent) {
        component.commit(&self.graph, &mut self.split_components);
    }

    fn bond(&mut self, eids: [usize; 3]) {
        let mut component = PendingComponent::new(Some(SpqrNodeType::P));
        for eid in eids {
            component.push_edge(eid);
        }
        self.commit(component);
    }

    /// Pushes the triple of a new path segment starting with an arc into a vertex numbered `a`.
    ///
    /// Triples with a larger `a` get merged into the new one, its `h` is then at least `h_floor`.
    fn update_tstack(&mut self, a: usize, h_floor: usize, fresh: (usize, usize)) {
        if self.top().1 > a {
            let mut max_h = h_floor;
            let mut last_b = 0;
            while self.top().1 > a {
                let (h, _, b) = self.top();
                self.tstack.pop();
                max_h = max_h.max(h);
                last_b = b;
            }
            self.tstack.push((max_h, a, last_b));
        } else {
            self.tstack.push((fresh.0, a, fresh.1));
        }
    }

    fn check_highpoint(&mut self, v: usize) {
        let vnum = self.graph.num[v];
        loop {
            let (h, a, b) = self.top();
            if a != 0 && b != vnum && a != vnum && self.graph.high.high(v) > h {
                self.tstack.pop();
            } else {
                break;
            }
        }
    }

    /// Looks for type-2 separation pairs `{v, b}` after returning from the tree arc `v -> w`
    /// sitting in the slot `i` of `adj[v]`. Returns the current child, it changes whenever a
    /// split replaces the tree arc by a virtual one.
    fn check_type_2(&mut self, v: usize, i: usize, mut w: usize) -> usize {
        let vnum = self.graph.num[v];
        if vnum == 1 {
            return w;
        }

        loop {
            let (h, a, b) = self.top();
            let wnum = self.graph.num[w];
            let degree_two = self.graph.deg[w] == 2
                && self
                    .graph
                    .first_child(w)
                    .is_some_and(|c| self.graph.num[c] > wnum);

            if !(a == vnum || degree_two) {
                break;
            }
            if a == vnum && self.graph.father[self.graph.node_at[b]] == Some(self.graph.node_at[a])
            {
                self.tstack.pop();
                continue;
            }

            let mut e_ab = None;
            let mut evirt;
            let x;
            if degree_two {
                // w has a single child, the polygon v -> w -> x is split off
                let e1 = self.pop_estack();
                let e2 = self.pop_estack();
                self.graph.delete_from_adj(e2);

                x = self.graph.edges[e2].1;
                evirt = self.graph.new_edge(v, x);
                self.graph.deg[x] -= 1;
                self.graph.deg[v] -= 1;

                let mut component = PendingComponent::new(Some(SpqrNodeType::S));
                component.push_edge(e1).push_edge(e2).push_edge(evirt);
                self.commit(component);
                trace!(v, x, "split off a polygon at a degree two vertex");

                if let Some(&eid) = self.estack.last() {
                    if self.graph.edges[eid] == (x, v) {
                        self.estack.pop();
                        self.graph.delete_from_adj(eid);
                        self.graph.high.delete(eid);
                        e_ab = Some(eid);
                    }
                }
            } else {
                self.tstack.pop();
                let (na, nb) = (self.graph.node_at[a], self.graph.node_at[b]);

                let mut component = PendingComponent::new(None);
                while let Some(&eid) = self.estack.last() {
                    let (s, t) = self.graph.edges[eid];
                    let (snum, tnum) = (self.graph.num[s], self.graph.num[t]);
                    if !(vnum <= snum && snum <= h && vnum <= tnum && tnum <= h) {
                        break;
                    }
                    self.estack.pop();

                    if (s == na && t == nb) || (s == nb && t == na) {
                        self.graph.delete_from_adj(eid);
                        self.graph.high.delete(eid);
                        e_ab = Some(eid);
                    } else {
                        if self.graph.in_adj[eid] != Some((v, i)) {
                            self.graph.delete_from_adj(eid);
                            self.graph.high.delete(eid);
                        }
                        component.push_edge(eid);
                        self.graph.deg[s] -= 1;
                        self.graph.deg[t] -= 1;
                    }
                }

                evirt = self.graph.new_edge(na, nb);
                component.push_edge(evirt);
                self.commit(component);
                trace!(a = na, b = nb, "type-2 split");

                x = nb;
            }

            if let Some(e_ab) = e_ab {
                let evirt2 = self.graph.new_edge(v, x);
                self.bond([e_ab, evirt, evirt2]);
                evirt = evirt2;
                self.graph.deg[x] -= 1;
                self.graph.deg[v] -= 1;
            }

            self.estack.push(evirt);
            self.graph.set_adj(v, i, evirt);
            self.graph.deg[x] += 1;
            self.graph.deg[v] += 1;
            self.graph.father[x] = Some(v);
            self.graph.tree_arc[x] = Some(evirt);
            self.graph.edge_type[evirt] = Some(EdgeType::Tree);

            w = x;
        }

        w
    }

    /// Looks for a type-1 separation pair `{low1(w), v}` after returning from the tree arc
    /// `v -> w`. `outv` counts the arcs of `v` not processed yet, including this one.
    fn check_type_1(&mut self, v: usize, i: usize, w: usize, outv: usize) {
        let vnum = self.graph.num[v];
        let wnum = self.graph.num[w];
        let nd = self.graph.nd[w];

        if !(self.graph.low2[w] >= vnum
            && self.graph.low1[w] < vnum
            && (self.graph.father[v] != Some(self.root) || outv >= 2))
        {
            return;
        }

        let mut component = PendingComponent::new(None);
        while let Some(&eid) = self.estack.last() {
            let (s, t) = self.graph.edges[eid];
            let (snum, tnum) = (self.graph.num[s], self.graph.num[t]);
            let s_in_subtree = wnum <= snum && snum < wnum + nd;
            let t_in_subtree = wnum <= tnum && tnum < wnum + nd;
            if !(s_in_subtree || t_in_subtree) {
                break;
            }
            self.estack.pop();

            component.push_edge(eid);
            self.graph.high.delete(eid);
            self.graph.deg[s] -= 1;
            self.graph.deg[t] -= 1;
        }

        let lw = self.graph.node_at[self.graph.low1[w]];
        let mut evirt = self.graph.new_edge(v, lw);
        component.push_edge(evirt);
        self.commit(component);
        trace!(v, low = lw, "type-1 split");

        if let Some(&eid) = self.estack.last() {
            let (s, t) = self.graph.edges[eid];
            if (s == v && t == lw) || (s == lw && t == v) {
                self.estack.pop();
                if self.graph.in_adj[eid] != Some((v, i)) {
                    self.graph.delete_from_adj(eid);
                }

                let evirt2 = self.graph.new_edge(v, lw);
                self.bond([eid, evirt, evirt2]);
                self.graph.high.in_high[evirt2] = self.graph.high.in_high[eid];
                evirt = evirt2;
                self.graph.deg[v] -= 1;
                self.graph.deg[lw] -= 1;
            }
        }

        if Some(lw) != self.graph.father[v] {
            self.estack.push(evirt);
            self.graph.set_adj(v, i, evirt);
            if self.graph.high.in_high[evirt].is_none() && self.graph.high.high(lw) < vnum {
                self.graph.high.push_front(lw, evirt, vnum);
            }
            self.graph.deg[v] += 1;
            self.graph.deg[lw] += 1;
        } else {
            // the virtual edge is parallel to the tree arc into v
            self.graph.adj[v][i] = None;

            let eh = self.graph.tree_arc[v].expect("non-root vertex has a tree arc");
            let evirt2 = self.graph.new_edge(lw, v);
            self.bond([evirt, eh, evirt2]);

            self.graph.edge_type[evirt2] = Some(EdgeType::Tree);
            self.graph.high.in_high[evirt2] = self.graph.high.in_high[eh];
            if let Some((p, j)) = self.graph.in_adj[eh] {
                self.graph.set_adj(p, j, evirt2);
            }
            self.graph.tree_arc[v] = Some(evirt2);
        }
    }

    fn enter(&self, v: usize) -> SearchFrame {
        SearchFrame {
            v,
            i: 0,
            outv: self.graph.adj[v].iter().flatten().count(),
            descent: None,
        }
    }

    /// The path search, a dfs over the palm tree kept on an explicit stack of frames.
    fn find_components(&mut self, root: usize) {
        let mut stack = vec![self.enter(root)];
        while let Some(frame) = stack.last_mut() {
            let (v, i) = (frame.v, frame.i);
            let vnum = self.graph.num[v];

            if let Some((w, starts_path)) = frame.descent.take() {
                // the arc itself may have been replaced by a split below w
                let arc = self.graph.tree_arc[w].expect("child has a tree arc");
                self.estack.push(arc);

                let w = self.check_type_2(v, i, w);
                self.check_type_1(v, i, w, frame.outv);

                if starts_path {
                    while self.top() != EOS {
                        self.tstack.pop();
                    }
                    self.tstack.pop();
                }

                self.check_highpoint(v);
                frame.outv -= 1;
                frame.i += 1;
                continue;
            }

            if i >= self.graph.adj[v].len() {
                stack.pop();
                continue;
            }
            frame.i += 1;
            let Some(eid) = self.graph.adj[v][i] else {
                continue;
            };
            let w = self.graph.edges[eid].1;
            let wnum = self.graph.num[w];
            let starts_path = self.graph.starts_path[eid];

            if self.graph.edge_type[eid] == Some(EdgeType::Tree) {
                if starts_path {
                    let h = wnum + self.graph.nd[w] - 1;
                    self.update_tstack(self.graph.low1[w], h, (h, vnum));
                    self.tstack.push(EOS);
                }
                // the frame resumes at this arc once w is done
                frame.i = i;
                frame.descent = Some((w, starts_path));
                let child = self.enter(w);
                stack.push(child);
            } else {
                if starts_path {
                    self.update_tstack(wnum, 0, (vnum, vnum));
                }
                self.estack.push(eid);
            }
        }
    }
}

/// A vertex on the path search stack: the next adjacency position `i`, the arc counter `outv` of
/// the type-1 check and the child being searched, if any.
struct SearchFrame {
    v: usize,
    i: usize,
    outv: usize,
    descent: Option<(usize, bool)>,
}

/// Checks that an SPQR tree can be built for the graph.
pub(crate) fn validate_input(graph: &UnGraph) -> Result<(), SpqrError> {
    if let Some(e) = graph.edge_references().find(|e| e.source() == e.target()) {
        return Err(SpqrError::SelfLoop(e.source().index()));
    }

    let (n, m) = (graph.node_count(), graph.edge_count());
    if n < 2 || m < 3 {
        return Err(SpqrError::TooSmall { nodes: n, edges: m });
    }
    if !is_biconnected(graph) {
        return Err(SpqrError::NotBiconnected);
    }

    Ok(())
}

/// Computes the triconnected components of a biconnected, loopless undirected multigraph.
///
/// # Overview
///
/// A pair of vertices `{s, t}` is a *separation pair* if removing both disconnects the graph, or
/// if there are multiple edges directly connecting `s` and `t`. Splitting the graph at a
/// separation pair yields two smaller graphs, each gets a new *virtual* edge `(s, t)` so that
/// both stay biconnected and the graph can be recovered by gluing them along the virtual edge.
///
/// Splitting until no separation pair is left yields the split components:
/// - **bonds** (`P`): two vertices joined by three edges,
/// - **triangles** (`S`),
/// - **triconnected simple graphs** (`R`).
///
/// Merging bonds with bonds and polygons with polygons along shared virtual edges gives the
/// triconnected components, which are unique.
///
/// The computation follows Hopcroft and Tarjan, with the corrections of Gutwenger and Mutzel,
/// and runs in linear time (up to the radix sort of multi-edges):
/// 1. bundles of parallel edges are split off as bonds,
/// 2. a dfs builds the palm tree and computes `low1`, `low2` and the number of descendants,
/// 3. the adjacency lists are reordered into an acceptable adjacency structure,
/// 4. the pathfinder renumbers the vertices and computes highpoint lists,
/// 5. the path search finds type-1 and type-2 separation pairs with two stacks,
/// 6. bonds and polygons sharing virtual edges get merged.
///
/// # Errors
///
/// [`SpqrError::SelfLoop`], [`SpqrError::TooSmall`] (fewer than two nodes or three edges) and
/// [`SpqrError::NotBiconnected`] when the graph violates the preconditions.
///
/// ## Reference
/// - [Hopcroft, J., & Tarjan, R. (1973). Dividing a Graph into Triconnected Components. SIAM Journal on Computing, 2(3), 135–158.](https://epubs.siam.org/doi/10.1137/0202012)
/// - [Gutwenger, C., & Mutzel, P. (2001). A Linear Time Implementation of SPQR-Trees. Graph Drawing 2000, LNCS 1984, 77–90.](https://doi.org/10.1007/3-540-44541-2_8)
/// - Explaining Hopcroft, Tarjan, Gutwenger, and Mutzel’s SPQR Decomposition Algorithm (https://shoyamanishi.github.io/wailea/docs/spqr_explained/HTGMExplained.pdf)
pub fn get_triconnected_components(
    in_graph: &UnGraph,
) -> Result<TriconnectedComponents, SpqrError> {
    validate_input(in_graph)?;

    let n = in_graph.node_count();
    let m = in_graph.edge_count();
    let root = 0;

    let mut graph = GraphInternal::from_petgraph(in_graph);

    let components = if n == 2 {
        vec![Component {
            edges: (0..m).collect(),
            comp_type: SpqrNodeType::P,
        }]
    } else {
        let mut split_components = Vec::new();
        handle_duplicate_edges(&mut graph, &mut split_components);

        // first dfs, computes num, low1, low2, nd, father, deg, edge_type and fixes the edges' direction
        run_palm_dfs(&mut graph, root);

        // compute acceptable adjacency list structure
        make_adjacency_lists_acceptable(&mut graph);

        // pathfinder part: calculate high(v), newnum(v) and starts_path(e)
        run_pathfinder(root, &mut graph);

        let mut search = PathSearch {
            root,
            graph,
            estack: Vec::new(),
            tstack: vec![EOS],
            split_components,
        };
        search.find_components(root);

        let mut last = PendingComponent::new(None);
        while let Some(eid) = search.estack.pop() {
            last.push_edge(eid);
        }
        search.commit(last);

        graph = search.graph;
        debug!(
            split_components = search.split_components.len(),
            virtual_edges = graph.edges.len() - m,
            "path search finished"
        );

        merge_components(m, graph.edges.len(), search.split_components)
    };

    let edge_count = graph.edges.len();
    let is_real: Vec<bool> = (0..edge_count).map(|eid| eid < m).collect();

    let mut to_split = vec![None; edge_count];
    for (i, c) in components.iter().enumerate() {
        for &eid in c.edges.iter().filter(|&&eid| eid < m) {
            assert!(to_split[eid].is_none(), "real edge {eid} lies in two components");
            to_split[eid] = Some(i);
        }
    }
    assert!(
        to_split[..m].iter().all(Option::is_some),
        "a real edge lies in no component"
    );

    let ret = TriconnectedComponents {
        components,
        edges: graph.edges,
        is_real,
        to_split,
    };
    debug!(
        nodes = n,
        edges = m,
        s = ret.number_of_type(SpqrNodeType::S),
        p = ret.number_of_type(SpqrNodeType::P),
        r = ret.number_of_type(SpqrNodeType::R),
        "triconnected components computed"
    );

    Ok(ret)
}

impl TriconnectedComponents {
    /// Same as [`get_triconnected_components`].
    pub fn new(graph: &UnGraph) -> Result<Self, SpqrError> {
        get_triconnected_components(graph)
    }
}

#[cfg(test)]
mod tests {
    use petgraph::visit::NodeIndexable;

    use crate::{
        EdgeLabel,
        testing::{
            graph_enumerator::GraphEnumeratorState,
            oracles::{are_triconnected_brute, is_splitpair},
            random_graphs::random_biconnected_graph,
        },
    };

    use super::*;

    fn graph_from_edges(n: usize, edges: &[(usize, usize)]) -> UnGraph {
        let mut graph = UnGraph::new_undirected();
        for i in 0..n {
            graph.add_node(i as u32);
        }
        for &(s, t) in edges {
            graph.add_edge(graph.from_index(s), graph.from_index(t), EdgeLabel::Real);
        }
        graph
    }

    fn component_nodes(c: &Component, edges: &[(usize, usize)]) -> Vec<usize> {
        let mut nodes: Vec<usize> = c
            .edges
            .iter()
            .flat_map(|&eid| [edges[eid].0, edges[eid].1])
            .collect();
        nodes.sort();
        nodes.dedup();
        nodes
    }

    fn answer_fast(n: usize, tricon: &TriconnectedComponents) -> Vec<Vec<bool>> {
        let mut res = vec![vec![false; n]; n];

        for c in &tricon.components {
            if c.comp_type == SpqrNodeType::S {
                // not triconnected
                continue;
            }

            let vertex_set = component_nodes(c, &tricon.edges);
            for &x in &vertex_set {
                for &y in &vertex_set {
                    if x != y {
                        res[x][y] = true;
                    }
                }
            }
        }

        res
    }

    fn verify_components(in_graph: &UnGraph, tricon: &TriconnectedComponents) {
        let n = in_graph.node_count();
        let edges = &tricon.edges;

        let mut edges_occs = vec![0; edges.len()];
        for c in &tricon.components {
            for &eid in &c.edges {
                edges_occs[eid] += 1;
            }

            let nodes = component_nodes(c, edges);
            match c.comp_type {
                SpqrNodeType::P => {
                    assert_eq!(nodes.len(), 2);
                    assert!(c.edges.len() >= 3);
                }
                SpqrNodeType::S => {
                    assert!(nodes.len() >= 3);
                    assert_eq!(c.edges.len(), nodes.len());

                    let mut deg = vec![0; n];
                    for &eid in &c.edges {
                        let (s, t) = edges[eid];
                        deg[s] += 1;
                        deg[t] += 1;
                    }
                    assert!(deg.iter().all(|&d| d == 0 || d == 2));
                }
                SpqrNodeType::R => assert!(nodes.len() >= 4),
            }
        }

        for (eid, &cnt) in edges_occs.iter().enumerate() {
            if tricon.is_real[eid] {
                assert_eq!(cnt, 1, "real edge {eid}");
            } else if cnt != 0 {
                // a virtual edge glues two components at a split pair, unless merging used it up
                assert_eq!(cnt, 2, "virtual edge {eid}");
                let (s, t) = edges[eid];
                assert!(is_splitpair(in_graph, s, t));
            }
        }

        // no two bonds or two polygons share a virtual edge
        let mut owner_types: Vec<Vec<SpqrNodeType>> = vec![Vec::new(); edges.len()];
        for c in &tricon.components {
            for &eid in &c.edges {
                owner_types[eid].push(c.comp_type);
            }
        }
        for types in owner_types.iter().filter(|t| t.len() == 2) {
            assert!(types[0] != types[1] || types[0] == SpqrNodeType::R);
        }
    }

    fn check_against_brute(in_graph: &UnGraph) {
        let tricon = match get_triconnected_components(in_graph) {
            Ok(tricon) => tricon,
            Err(SpqrError::TooSmall { .. }) => return,
            Err(e) => panic!("unexpected error {e}"),
        };
        verify_components(in_graph, &tricon);

        let brute_mat = are_triconnected_brute(in_graph);
        let fast_mat = answer_fast(in_graph.node_count(), &tricon);
        assert_eq!(brute_mat, fast_mat);
    }

    #[test]
    fn test_triangle_is_one_polygon() {
        let graph = graph_from_edges(3, &[(0, 1), (1, 2), (2, 0)]);
        let tricon = get_triconnected_components(&graph).unwrap();

        assert_eq!(tricon.components.len(), 1);
        assert_eq!(tricon.components[0].comp_type, SpqrNodeType::S);
        assert_eq!(tricon.real_edge_count(), 3);
        assert!(tricon.to_split[..3].iter().all(|&c| c == Some(0)));
    }

    #[test]
    fn test_two_nodes_bond() {
        let graph = graph_from_edges(2, &[(0, 1), (1, 0), (0, 1), (0, 1)]);
        let tricon = get_triconnected_components(&graph).unwrap();

        assert_eq!(tricon.components.len(), 1);
        assert_eq!(tricon.components[0].comp_type, SpqrNodeType::P);
        assert_eq!(tricon.components[0].edges.len(), 4);
    }

    #[test]
    fn test_k4_is_rigid() {
        let graph = graph_from_edges(4, &[(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
        let tricon = get_triconnected_components(&graph).unwrap();

        assert_eq!(tricon.components.len(), 1);
        assert_eq!(tricon.components[0].comp_type, SpqrNodeType::R);
        assert_eq!(tricon.components[0].edges.len(), 6);
    }

    #[test]
    fn test_square_with_doubled_edge() {
        // cycle 0-1-2-3 with edge (1, 2) doubled: a polygon glued to a bond
        let graph = graph_from_edges(4, &[(0, 1), (1, 2), (2, 3), (3, 0), (2, 1)]);
        let tricon = get_triconnected_components(&graph).unwrap();
        verify_components(&graph, &tricon);

        assert_eq!(tricon.components.len(), 2);
        assert_eq!(tricon.number_of_type(SpqrNodeType::S), 1);
        assert_eq!(tricon.number_of_type(SpqrNodeType::P), 1);
        assert_eq!(tricon.to_split[1], tricon.to_split[4]);

        // the polygon was merged from split pieces, the edges glueing them are gone
        let mut used = vec![false; tricon.edges.len()];
        for c in &tricon.components {
            for &eid in &c.edges {
                used[eid] = true;
            }
        }
        assert!((0..used.len()).any(|eid| !tricon.is_real[eid] && !used[eid]));
    }

    #[test]
    fn test_square_with_diagonal() {
        // the diagonal (0, 2) splits the square into two triangles joined by a bond
        let graph = graph_from_edges(4, &[(0, 1), (1, 2), (2, 3), (3, 0), (0, 2)]);
        let tricon = get_triconnected_components(&graph).unwrap();
        verify_components(&graph, &tricon);

        assert_eq!(tricon.number_of_type(SpqrNodeType::S), 2);
        assert_eq!(tricon.number_of_type(SpqrNodeType::P), 1);
        assert_eq!(tricon.number_of_type(SpqrNodeType::R), 0);
    }

    #[test]
    fn test_large_wheel_on_small_stack() {
        // the dfs trees are paths through the whole rim
        let n = 20_000;
        let mut edges = Vec::with_capacity(2 * n);
        for i in 1..=n {
            edges.push((0, i));
            edges.push((i, i % n + 1));
        }

        let search = std::thread::Builder::new()
            .stack_size(1 << 18)
            .spawn(move || {
                let graph = graph_from_edges(n + 1, &edges);
                let tricon = get_triconnected_components(&graph).unwrap();
                assert_eq!(tricon.components.len(), 1);
                assert_eq!(tricon.number_of_type(SpqrNodeType::R), 1);
                assert_eq!(tricon.components[0].edges.len(), 2 * n);
            })
            .unwrap();
        search.join().unwrap();
    }

    #[test]
    fn test_invalid_inputs() {
        let single_edge = graph_from_edges(2, &[(0, 1)]);
        assert_eq!(
            get_triconnected_components(&single_edge).unwrap_err(),
            SpqrError::TooSmall { nodes: 2, edges: 1 }
        );

        let self_loop = graph_from_edges(3, &[(0, 1), (1, 2), (2, 0), (1, 1)]);
        assert_eq!(
            get_triconnected_components(&self_loop).unwrap_err(),
            SpqrError::SelfLoop(1)
        );

        // two triangles sharing node 2
        let bowtie = graph_from_edges(5, &[(0, 1), (1, 2), (2, 0), (2, 3), (3, 4), (4, 2)]);
        assert_eq!(
            get_triconnected_components(&bowtie).unwrap_err(),
            SpqrError::NotBiconnected
        );
    }

    #[test]
    fn test_small_graphs_exhaustive() {
        for n in 3..=5 {
            let enumerator = GraphEnumeratorState {
                n,
                mask: 0,
                last_mask: 1 << (n * (n - 1) / 2),
            };
            for graph in enumerator.filter(is_biconnected) {
                check_against_brute(&graph);
            }
        }
    }

    #[cfg(all(test, not(debug_assertions)))]
    #[test]
    fn test_triconnected_components() {
        for i in 0..1000 {
            let n = 2 + i / 10;
            let m: usize = 1 + i;

            let in_graph = random_biconnected_graph(n, m, i);
            check_against_brute(&in_graph);
        }
    }

    #[test]
    fn test_triconnected_components_light() {
        for i in 0..100 {
            let n = 2 + i / 10;
            let m: usize = 1 + i;

            let in_graph = random_biconnected_graph(n, m, i);
            check_against_brute(&in_graph);
        }
    }
}
