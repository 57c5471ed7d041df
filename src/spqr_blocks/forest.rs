use std::mem;

use hashbrown::{HashMap, HashSet};

use crate::{
    SpqrNodeType, TreeEdge, TreeGraph, TreeNode,
    triconnected_blocks::outside_structures::TriconnectedComponents,
};

/// One half of a skeleton edge pair, or a real skeleton edge.
///
/// `ends` are nodes of the original graph. A virtual hedge has a `twin` in the skeleton of the
/// neighbouring tree node, a real hedge stands for the original edge `real`.
#[derive(Debug, Clone)]
pub(crate) struct Hedge {
    pub ends: (usize, usize),
    pub real: Option<usize>,
    pub twin: Option<usize>,
    pub node: usize, // raw tree node, resolve with `find_spqr`
    pub alive: bool,
}

impl Hedge {
    pub fn touches(&self, x: usize) -> bool {
        self.ends.0 == x || self.ends.1 == x
    }

    pub fn joins(&self, x: usize, y: usize) -> bool {
        self.ends == (x, y) || self.ends == (y, x)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct NodeData {
    owner: usize,
    rank: usize,
    node_type: SpqrNodeType,
    hedges: Vec<usize>, // may hold dead hedges, see `prune`
    pub reference: Option<usize>,
}

/// Where a region of the tree hangs from, recorded before the region gets rebuilt.
#[derive(Debug, Clone, Copy)]
pub(crate) enum RegionTop {
    /// The region hangs below the tree edge whose half outside the region is given.
    Up(usize),
    /// The region contains the root.
    Root,
}

/// Arena holding the tree nodes and all skeleton edges of an SPQR tree.
///
/// Tree nodes are merged with a union-find structure (union by rank, so `find_spqr` walks a
/// logarithmic number of links), a merged node keeps its id but stops being canonical. Only
/// canonical nodes are nodes of the tree.
#[derive(Debug, Clone)]
pub(crate) struct SpqrForest {
    pub nodes: Vec<NodeData>,
    pub hedges: Vec<Hedge>,
    pub real_hedge: Vec<usize>,         // original edge -> hedge
    pub vertex_hedges: Vec<Vec<usize>>, // original node -> incident hedges, dead ones included
    pub root: usize,
    pub root_edge: Option<usize>,
    counts: [usize; 3],
}

impl SpqrForest {
    fn empty(node_count: usize, edge_count: usize) -> Self {
        Self {
            nodes: Vec::new(),
            hedges: Vec::new(),
            real_hedge: vec![usize::MAX; edge_count],
            vertex_hedges: vec![Vec::new(); node_count],
            root: 0,
            root_edge: None,
            counts: [0; 3],
        }
    }

    /// One tree node per triconnected component, the twin halves of every virtual edge get
    /// paired. The forest is not rooted yet.
    pub fn from_triconnected(node_count: usize, tricon: &TriconnectedComponents) -> Self {
        let mut forest = Self::empty(node_count, tricon.real_edge_count());

        let mut first_half = vec![None; tricon.edges.len()];
        for component in &tricon.components {
            let c = forest.new_node(component.comp_type);
            for &eid in &component.edges {
                let (s, t) = tricon.edges[eid];
                let real = tricon.is_real[eid].then_some(eid);
                let h = forest.new_hedge(s, t, c, real);

                if real.is_none() {
                    match first_half[eid].take() {
                        Some(other) => forest.pair(other, h),
                        None => first_half[eid] = Some(h),
                    }
                }
            }
        }
        assert!(
            first_half.iter().all(Option::is_none),
            "virtual edge without a twin"
        );

        forest
    }

    pub fn find_spqr(&self, mut x: usize) -> usize {
        while self.nodes[x].owner != x {
            x = self.nodes[x].owner;
        }
        x
    }

    pub fn is_canonical(&self, x: usize) -> bool {
        self.nodes[x].owner == x
    }

    pub fn canonical_nodes(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.nodes.len()).filter(|&x| self.is_canonical(x))
    }

    /// Merges the tree nodes of `a` and `b`, returns the canonical node of the union. The type
    /// of the union is the type of the surviving node.
    pub fn union(&mut self, a: usize, b: usize) -> usize {
        let (mut a, mut b) = (self.find_spqr(a), self.find_spqr(b));
        if a == b {
            return a;
        }
        if self.nodes[a].rank < self.nodes[b].rank {
            mem::swap(&mut a, &mut b);
        }

        self.nodes[b].owner = a;
        if self.nodes[a].rank == self.nodes[b].rank {
            self.nodes[a].rank += 1;
        }

        // the longer list absorbs the shorter one
        let mut moved = mem::take(&mut self.nodes[b].hedges);
        if moved.len() > self.nodes[a].hedges.len() {
            mem::swap(&mut moved, &mut self.nodes[a].hedges);
        }
        self.nodes[a].hedges.extend(moved);
        self.counts[self.nodes[b].node_type.slot()] -= 1;

        a
    }

    pub fn new_node(&mut self, node_type: SpqrNodeType) -> usize {
        let id = self.nodes.len();
        self.nodes.push(NodeData {
            owner: id,
            rank: 0,
            node_type,
            hedges: Vec::new(),
            reference: None,
        });
        self.counts[node_type.slot()] += 1;
        id
    }

    pub fn node_type(&self, c: usize) -> SpqrNodeType {
        self.nodes[c].node_type
    }

    pub fn set_type(&mut self, c: usize, node_type: SpqrNodeType) {
        self.counts[self.nodes[c].node_type.slot()] -= 1;
        self.counts[node_type.slot()] += 1;
        self.nodes[c].node_type = node_type;
    }

    pub fn number_of_type(&self, node_type: SpqrNodeType) -> usize {
        self.counts[node_type.slot()]
    }

    pub fn number_of_nodes(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Makes room for hedges at the original node `x`.
    pub fn ensure_vertex(&mut self, x: usize) {
        if x >= self.vertex_hedges.len() {
            self.vertex_hedges.resize(x + 1, Vec::new());
        }
    }

    pub fn new_hedge(&mut self, s: usize, t: usize, node: usize, real: Option<usize>) -> usize {
        let h = self.hedges.len();
        self.hedges.push(Hedge {
            ends: (s, t),
            real,
            twin: None,
            node,
            alive: true,
        });
        self.nodes[node].hedges.push(h);

        self.ensure_vertex(s.max(t));
        self.vertex_hedges[s].push(h);
        self.vertex_hedges[t].push(h);

        if let Some(e) = real {
            if e >= self.real_hedge.len() {
                self.real_hedge.resize(e + 1, usize::MAX);
            }
            self.real_hedge[e] = h;
        }

        h
    }

    fn pair(&mut self, a: usize, b: usize) {
        self.hedges[a].twin = Some(b);
        self.hedges[b].twin = Some(a);
    }

    /// Adds a virtual edge `(s, t)` to both `n1` and `n2`.
    pub fn new_virtual_pair(&mut self, s: usize, t: usize, n1: usize, n2: usize) -> (usize, usize) {
        let a = self.new_hedge(s, t, n1, None);
        let b = self.new_hedge(s, t, n2, None);
        self.pair(a, b);
        (a, b)
    }

    pub fn kill(&mut self, h: usize) {
        self.hedges[h].alive = false;
    }

    pub fn twin_of(&self, h: usize) -> usize {
        self.hedges[h]
            .twin
            .expect("virtual hedge lost its twin")
    }

    pub fn node_of(&self, h: usize) -> usize {
        self.find_spqr(self.hedges[h].node)
    }

    /// Alive hedges of the canonical node `c`.
    pub fn hedges_of(&self, c: usize) -> impl Iterator<Item = usize> + '_ {
        self.nodes[c]
            .hedges
            .iter()
            .copied()
            .filter(|&h| self.hedges[h].alive)
    }

    /// Drops dead hedges from the list of `c` and returns the alive ones.
    pub fn alive_hedges(&mut self, c: usize) -> Vec<usize> {
        let hedges = &self.hedges;
        self.nodes[c].hedges.retain(|&h| hedges[h].alive);
        self.nodes[c].hedges.clone()
    }

    pub fn prune_vertex(&mut self, x: usize) {
        let hedges = &self.hedges;
        self.vertex_hedges[x].retain(|&h| hedges[h].alive);
    }

    /// Replaces the hedge list of `c`, the hedges must already point at `c`.
    pub fn set_hedges(&mut self, c: usize, hedges: Vec<usize>) {
        self.nodes[c].hedges = hedges;
    }

    /// Appends hedges to `c`, they stop belonging to their former node.
    pub fn move_hedges(&mut self, hedges: Vec<usize>, c: usize) {
        for &h in &hedges {
            self.hedges[h].node = c;
        }
        self.nodes[c].hedges.extend(hedges);
    }

    pub fn parent(&self, c: usize) -> Option<usize> {
        let reference = self.nodes[c].reference?;
        let twin = self.hedges[reference].twin?;
        Some(self.node_of(twin))
    }

    /// Virtual hedges of `c` other than its reference edge.
    pub fn child_hedges(&self, c: usize) -> impl Iterator<Item = usize> + '_ {
        let reference = self.nodes[c].reference;
        self.hedges_of(c)
            .filter(move |&h| Some(h) != reference && self.hedges[h].twin.is_some())
    }

    pub fn children(&self, c: usize) -> Vec<usize> {
        self.child_hedges(c)
            .map(|h| self.node_of(self.twin_of(h)))
            .collect()
    }

    pub fn neighbors(&self, c: usize) -> Vec<usize> {
        self.hedges_of(c)
            .filter_map(|h| self.hedges[h].twin)
            .map(|twin| self.node_of(twin))
            .collect()
    }

    /// Identifies a tree edge by the smaller hedge of its pair.
    pub fn tree_edge_of(&self, h: usize) -> TreeEdge {
        TreeEdge(h.min(self.twin_of(h)))
    }

    /// Returns the pair `(half in the parent, half in the child)` of a tree edge, or `None` if
    /// the handle does not name a live tree edge.
    pub fn tree_edge_halves(&self, te: TreeEdge) -> Option<(usize, usize)> {
        let h = self.hedges.get(te.0)?;
        let twin = h.twin?;
        if !h.alive || twin < te.0 {
            return None;
        }

        if self.nodes[self.node_of(te.0)].reference == Some(te.0) {
            Some((twin, te.0))
        } else {
            Some((te.0, twin))
        }
    }

    /// Sets the reference edges of all nodes reachable from `start` without crossing the
    /// reference edge, staying inside `region` if given.
    pub fn orient(
        &mut self,
        start: usize,
        reference: Option<usize>,
        region: Option<&HashSet<usize>>,
    ) {
        let mut stack = vec![(start, reference)];
        while let Some((c, r)) = stack.pop() {
            self.nodes[c].reference = r;
            for h in self.hedges_of(c) {
                if Some(h) == r {
                    continue;
                }
                let Some(twin) = self.hedges[h].twin else {
                    continue;
                };
                let d = self.node_of(twin);
                if region.is_some_and(|region| !region.contains(&d)) {
                    continue;
                }
                stack.push((d, Some(twin)));
            }
        }
    }

    pub fn root_at_edge(&mut self, e: usize) {
        let h = self.real_hedge[e];
        self.root = self.node_of(h);
        self.root_edge = Some(e);
        self.orient(self.root, Some(h), None);
    }

    /// Roots at `c` with its first real edge as the root edge, or without a root edge if the
    /// skeleton of `c` has none.
    pub fn root_at_node(&mut self, c: usize) {
        let c = self.find_spqr(c);
        let real = self.hedges_of(c).find_map(|h| self.hedges[h].real);
        match real {
            Some(e) => self.root_at_edge(e),
            None => {
                self.root = c;
                self.root_edge = None;
                self.orient(c, None, None);
            }
        }
    }

    /// Finds how the connected `region` of canonical nodes is attached to the rest of the tree.
    pub fn region_top(&self, region: &[usize]) -> RegionTop {
        for &c in region {
            let hangs_outside = self.parent(c).is_none_or(|p| !region.contains(&p));
            if hangs_outside {
                return match self.nodes[c].reference.and_then(|r| self.hedges[r].twin) {
                    Some(up) => RegionTop::Up(up),
                    None => RegionTop::Root,
                };
            }
        }
        panic!("tree region without a top node");
    }

    /// Recomputes the reference edges inside a rebuilt region.
    ///
    /// `links` are the virtual edge pairs joining the nodes of the region after the rebuild, the
    /// rest of the tree keeps its orientation. Only the links are walked, so the cost does not
    /// depend on the skeleton sizes.
    pub fn reorient(&mut self, top: RegionTop, links: &[(usize, usize)]) {
        let (start, reference) = match top {
            RegionTop::Up(up) => {
                let inner = self.twin_of(up);
                (self.node_of(inner), Some(inner))
            }
            RegionTop::Root => {
                let (start, reference) = match self.root_edge {
                    Some(e) => {
                        let h = self.real_hedge[e];
                        (self.node_of(h), Some(h))
                    }
                    None => (self.find_spqr(self.root), None),
                };
                self.root = start;
                (start, reference)
            }
        };
        self.nodes[start].reference = reference;

        let mut around: HashMap<usize, Vec<usize>> = HashMap::new();
        for &(a, b) in links {
            around.entry(self.node_of(a)).or_default().push(b);
            around.entry(self.node_of(b)).or_default().push(a);
        }

        let mut seen = HashSet::new();
        seen.insert(start);
        let mut stack = vec![start];
        while let Some(c) = stack.pop() {
            for &far in around.get(&c).into_iter().flatten() {
                let d = self.node_of(far);
                if seen.insert(d) {
                    self.nodes[d].reference = Some(far);
                    stack.push(d);
                }
            }
        }
    }

    /// Some node whose skeleton contains the original node `x`. Dead hedges met at the front of
    /// the list of `x` are dropped.
    pub fn node_holding(&mut self, x: usize) -> usize {
        let list = &mut self.vertex_hedges[x];
        let h = loop {
            let &h = list
                .first()
                .expect("every node of the graph lies in some skeleton");
            if self.hedges[h].alive {
                break h;
            }
            list.swap_remove(0);
        };
        self.node_of(h)
    }

    /// The hedge of `x` glued to the neighbouring node `y`.
    pub fn connector(&self, x: usize, y: usize) -> usize {
        if self.parent(x) == Some(y) {
            self.nodes[x].reference.expect("child has a reference edge")
        } else {
            self.twin_of(self.nodes[y].reference.expect("child has a reference edge"))
        }
    }

    /// Finds the shortest tree path whose end skeletons contain `u` and `v` respectively.
    ///
    /// The path found through the lowest common ancestor is trimmed at both ends as long as the
    /// next node on the path still contains the end vertex, so interior nodes of the result do
    /// not lie between skeletons both containing `u` (or `v`).
    pub fn find_path(&mut self, u: usize, v: usize) -> Vec<usize> {
        let a = self.node_holding(u);
        let b = self.node_holding(v);

        // climb from both ends in turns, so the work stays within the path
        let (mut up_a, mut up_b) = (vec![a], vec![b]);
        let (mut at_a, mut at_b) = (HashMap::new(), HashMap::new());
        at_a.insert(a, 0);
        at_b.insert(b, 0);
        let (i, j) = loop {
            let (top_a, top_b) = (up_a[up_a.len() - 1], up_b[up_b.len() - 1]);
            if let Some(&j) = at_b.get(&top_a) {
                break (up_a.len() - 1, j);
            }
            if let Some(&i) = at_a.get(&top_b) {
                break (i, up_b.len() - 1);
            }

            let (next_a, next_b) = (self.parent(top_a), self.parent(top_b));
            assert!(
                next_a.is_some() || next_b.is_some(),
                "both nodes lie in one tree"
            );
            if let Some(x) = next_a {
                at_a.insert(x, up_a.len());
                up_a.push(x);
            }
            if let Some(x) = next_b {
                at_b.insert(x, up_b.len());
                up_b.push(x);
            }
        };

        let mut path = up_a[..=i].to_vec();
        path.extend(up_b[..j].iter().rev());

        let mut i = 0;
        while i + 1 < path.len() && self.hedges[self.connector(path[i], path[i + 1])].touches(u) {
            i += 1;
        }
        let mut j = path.len() - 1;
        while j > i && self.hedges[self.connector(path[j], path[j - 1])].touches(v) {
            j -= 1;
        }

        path[i..=j].to_vec()
    }

    /// Cuts the cycle formed by `cycle` at the vertices `cuts` (`cuts[0]` first) and returns the
    /// arcs between consecutive cut vertices in walking order.
    pub fn split_cycle(&self, cycle: &[usize], cuts: &[usize]) -> Vec<Vec<usize>> {
        let mut incident: HashMap<usize, Vec<usize>> = HashMap::new();
        for &h in cycle {
            let (s, t) = self.hedges[h].ends;
            incident.entry(s).or_default().push(h);
            incident.entry(t).or_default().push(h);
        }

        let start = cuts[0];
        let mut arcs = Vec::new();
        let mut current = Vec::new();
        let mut x = start;
        let mut prev = None;
        for _ in 0..cycle.len() {
            let around = &incident[&x];
            let h = if Some(around[0]) != prev {
                around[0]
            } else {
                around[1]
            };
            current.push(h);

            let (s, t) = self.hedges[h].ends;
            x = if s == x { t } else { s };
            prev = Some(h);

            if cuts.contains(&x) {
                arcs.push(mem::take(&mut current));
            }
        }
        assert_eq!(x, start, "skeleton of an S-node is not a cycle");

        arcs
    }

    /// End vertices of a path of hedges.
    pub fn arc_ends(&self, arc: &[usize]) -> (usize, usize) {
        let mut degree: HashMap<usize, usize> = HashMap::new();
        for &h in arc {
            let (s, t) = self.hedges[h].ends;
            *degree.entry(s).or_default() += 1;
            *degree.entry(t).or_default() += 1;
        }

        let mut ends: Vec<usize> = degree
            .into_iter()
            .filter(|&(_, d)| d == 1)
            .map(|(x, _)| x)
            .collect();
        ends.sort_unstable();
        assert_eq!(ends.len(), 2, "arc of a cycle is not a path");

        (ends[0], ends[1])
    }

    /// Snapshot of the tree, each tree edge is directed from the parent to the child.
    pub fn tree_graph(&self) -> TreeGraph {
        let mut tree = TreeGraph::with_capacity(self.number_of_nodes(), self.number_of_nodes());
        let mut index = HashMap::new();
        for c in self.canonical_nodes() {
            index.insert(c, tree.add_node(TreeNode(c)));
        }

        for c in self.canonical_nodes() {
            for h in self.child_hedges(c) {
                let child = self.node_of(self.twin_of(h));
                tree.add_edge(index[&c], index[&child], self.tree_edge_of(h));
            }
        }

        tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{input::from_str, triconnected::get_triconnected_components};

    fn forest_of(input: &str) -> SpqrForest {
        let graph = from_str(input).unwrap();
        let tricon = get_triconnected_components(&graph).unwrap();
        let mut forest = SpqrForest::from_triconnected(graph.node_count(), &tricon);
        forest.root_at_edge(0);
        forest
    }

    #[test]
    fn test_union_keeps_counts() {
        let mut forest = SpqrForest::empty(0, 0);
        let a = forest.new_node(SpqrNodeType::S);
        let b = forest.new_node(SpqrNodeType::P);
        let c = forest.new_node(SpqrNodeType::S);

        let ab = forest.union(a, b);
        let abc = forest.union(c, ab);
        assert_eq!(forest.find_spqr(a), abc);
        assert_eq!(forest.find_spqr(b), abc);
        assert_eq!(forest.find_spqr(c), abc);
        assert_eq!(forest.number_of_nodes(), 1);

        forest.set_type(abc, SpqrNodeType::R);
        assert_eq!(forest.number_of_type(SpqrNodeType::R), 1);
        assert_eq!(forest.number_of_type(SpqrNodeType::S), 0);
        assert_eq!(forest.number_of_type(SpqrNodeType::P), 0);
    }

    #[test]
    fn test_orientation_and_path() {
        // a chain of triangles 0-1-2, 1-2-3, 2-3-4 glued along (1, 2) and (2, 3)
        let mut forest = forest_of("0,1\n0,2\n1,2\n1,3\n2,3\n2,4\n3,4\n");
        assert_eq!(forest.number_of_type(SpqrNodeType::S), 3);
        assert_eq!(forest.number_of_type(SpqrNodeType::P), 2);

        let root = forest.root;
        assert_eq!(forest.node_of(forest.real_hedge[0]), root);
        assert_eq!(forest.parent(root), None);
        for c in forest.canonical_nodes().filter(|&c| c != root) {
            assert!(forest.parent(c).is_some());
        }

        // from the triangle of 0 to the triangle of 4 through all five nodes
        let path = forest.find_path(0, 4);
        assert_eq!(path.len(), 5);
        assert_eq!(path[0], root);
        assert_eq!(forest.find_path(0, 1), vec![root]);
    }

    #[test]
    fn test_root_at_node_without_real_edge() {
        // three paths of length two between 0 and 1, the bond holds virtual edges only
        let mut forest = forest_of("0,2\n2,1\n0,3\n3,1\n0,4\n4,1\n");
        let bond = forest
            .canonical_nodes()
            .find(|&c| forest.node_type(c) == SpqrNodeType::P)
            .unwrap();

        forest.root_at_node(bond);
        assert_eq!(forest.root, bond);
        assert_eq!(forest.root_edge, None);
        assert_eq!(forest.nodes[bond].reference, None);
        assert_eq!(forest.children(bond).len(), 3);

        let polygon = forest.children(bond)[0];
        forest.root_at_node(polygon);
        assert_eq!(forest.root, polygon);
        let e = forest.root_edge.unwrap();
        assert_eq!(forest.nodes[polygon].reference, Some(forest.real_hedge[e]));
        assert_eq!(forest.parent(bond), Some(polygon));
    }

    #[test]
    fn test_split_cycle_arcs() {
        let forest = forest_of("0,1\n1,2\n2,3\n3,4\n4,0\n");
        let cycle: Vec<usize> = forest.hedges_of(forest.root).collect();

        let arcs = forest.split_cycle(&cycle, &[0, 2]);
        assert_eq!(arcs.len(), 2);
        assert_eq!(arcs[0].len() + arcs[1].len(), 5);
        assert_eq!(forest.arc_ends(&arcs[0]), (0, 2));
        assert_eq!(forest.arc_ends(&arcs[1]), (0, 2));
    }
}
