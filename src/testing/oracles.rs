use petgraph::{graph::NodeIndex, visit::EdgeRef};

use crate::UnGraph;

/// Unit-capacity network where every node is split into an `in` half (`x`) and an `out` half
/// (`x + n`), so that paths found by augmentation are internally node-disjoint.
struct SplitNetwork {
    n: usize,
    cap: Vec<Vec<usize>>,
}

impl SplitNetwork {
    fn new(graph: &UnGraph) -> Self {
        let n = graph.node_count();
        let mut cap = vec![vec![0; 2 * n]; 2 * n];
        for e in graph.edge_references() {
            let (u, v) = (e.source().index(), e.target().index());
            cap[u + n][v] += 1;
            cap[v + n][u] += 1;
        }
        for x in 0..n {
            cap[x][x + n] += 1;
        }
        Self { n, cap }
    }

    fn augment(&mut self, x: usize, t: usize, seen: &mut Vec<bool>) -> bool {
        seen[x] = true;
        if x == t {
            return true;
        }
        for y in 0..self.cap.len() {
            if !seen[y] && self.cap[x][y] > 0 && self.augment(y, t, seen) {
                self.cap[x][y] -= 1;
                self.cap[y][x] += 1;
                return true;
            }
        }
        false
    }

    /// Whether three internally disjoint paths join `s` and `t`.
    fn three_paths(&self, s: usize, t: usize) -> bool {
        let mut network = Self {
            n: self.n,
            cap: self.cap.clone(),
        };
        let mut seen = vec![false; 2 * self.n];
        for _ in 0..3 {
            if !network.augment(s + self.n, t, &mut seen) {
                return false;
            }
            seen.fill(false);
        }
        true
    }
}

/// `res[u][v]` tells whether `u` and `v` are joined by three internally disjoint paths.
pub(crate) fn are_triconnected_brute(graph: &UnGraph) -> Vec<Vec<bool>> {
    let n = graph.node_count();
    let network = SplitNetwork::new(graph);

    let mut res = vec![vec![false; n]; n];
    for u in 0..n {
        for v in 0..n {
            if u != v {
                res[u][v] = network.three_paths(u, v);
            }
        }
    }
    res
}

/// Whether removing `s` and `t` disconnects the graph, or `s` and `t` are joined by several
/// edges.
pub(crate) fn is_splitpair(graph: &UnGraph, s: usize, t: usize) -> bool {
    let n = graph.node_count();
    let mut seen = vec![false; n];
    seen[s] = true;
    seen[t] = true;

    if let Some(start) = (0..n).find(|&x| x != s && x != t) {
        let mut stack = vec![start];
        seen[start] = true;
        while let Some(x) = stack.pop() {
            for y in graph.neighbors(NodeIndex::new(x)) {
                if !seen[y.index()] {
                    seen[y.index()] = true;
                    stack.push(y.index());
                }
            }
        }
    }

    let direct = graph
        .edges(NodeIndex::new(s))
        .filter(|e| e.source().index() == t || e.target().index() == t)
        .count();

    seen.iter().any(|&x| !x) || direct > 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::from_str;

    #[test]
    fn test_oracles_on_square_with_diagonal() {
        let graph = from_str("0,1\n1,2\n2,3\n3,0\n0,2\n").unwrap();

        let brute = are_triconnected_brute(&graph);
        assert!(brute[0][2]);
        assert!(!brute[1][3]);
        assert!(!brute[0][1]);

        assert!(is_splitpair(&graph, 0, 2));
        assert!(!is_splitpair(&graph, 0, 1));
    }
}
