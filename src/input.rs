use crate::{EdgeLabel, UnGraph, error::SpqrError};
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};

/// Reads a graph from a file.
///
/// Undirected multigraph input:
/// - one line, one edge in format "u,v",
/// - by convention start numbering from 0 and go up to |V|-1,
/// - empty lines and lines starting with `#` are skipped,
/// - every node has to be an end of some edge, so indices above `2 * |E| - 1` are rejected.
///
/// <div class="warning">
///
/// > Node `i` of the returned graph has index `i` and label `i`.
/// > Edge `j` is the `j`-th edge line of the input, so parallel edges keep their own ids.
///
/// </div>
///
/// Example input:
/// ```text
/// # K4 with a doubled edge
/// 0,1
/// 0,2
/// 0,3
/// 1,2
/// 1,3
/// 2,3
/// 2,3
/// ```
pub fn from_file(path: &str) -> Result<UnGraph, SpqrError> {
    let file = File::open(path).map_err(|err| SpqrError::Parse {
        line: 0,
        message: format!("cannot open {path}: {err}"),
    })?;
    parse_graph_from_custom_format(BufReader::new(file))
}

/// This is equivalent to [`from_file`], but takes string as an input.
pub fn from_str(input: &str) -> Result<UnGraph, SpqrError> {
    parse_graph_from_custom_format(BufReader::new(Cursor::new(input)))
}

fn parse_graph_from_custom_format<R: BufRead>(reader: R) -> Result<UnGraph, SpqrError> {
    let mut edges = Vec::new();
    let mut node_count = 0;
    let mut widest_line = 0;

    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(|err| SpqrError::Parse {
            line: i + 1,
            message: err.to_string(),
        })?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let parse_node = |part: &str| -> Result<usize, SpqrError> {
            part.trim().parse().map_err(|_| SpqrError::Parse {
                line: i + 1,
                message: format!("node index should be a non-negative number, got `{part}`"),
            })
        };

        let parts: Vec<_> = line.split(',').collect();
        if parts.len() != 2 {
            return Err(SpqrError::Parse {
                line: i + 1,
                message: "wrong format, expected 'u,v' for an edge".to_string(),
            });
        }
        let u = parse_node(parts[0])?;
        let v = parse_node(parts[1])?;
        let needed = u.max(v).checked_add(1).ok_or_else(|| SpqrError::Parse {
            line: i + 1,
            message: format!("node index {} is too large", u.max(v)),
        })?;
        if needed > node_count {
            node_count = needed;
            widest_line = i + 1;
        }
        edges.push((u, v));
    }

    // every node is an end of some edge, so at most two nodes per edge
    if node_count > 2 * edges.len() {
        return Err(SpqrError::Parse {
            line: widest_line,
            message: format!(
                "node index {} leaves nodes without edges, {} edges cover at most {} nodes",
                node_count - 1,
                edges.len(),
                2 * edges.len()
            ),
        });
    }

    let mut graph = UnGraph::with_capacity(node_count, edges.len());
    let nodes: Vec<_> = (0..node_count).map(|i| graph.add_node(i as u32)).collect();
    for (u, v) in edges {
        graph.add_edge(nodes[u], nodes[v], EdgeLabel::Real);
    }

    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        let input = "0,1\n1,2\n";
        let graph = from_str(input).unwrap();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_from_str_keeps_parallel_edges_and_skips_comments() {
        let input = "# bond\n0,1\n\n1,0\n 0 , 1 \n";
        let graph = from_str(input).unwrap();
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn test_from_str_reports_line() {
        let err = from_str("0,1\n1;2\n").unwrap_err();
        assert!(matches!(err, SpqrError::Parse { line: 2, .. }));

        let err = from_str("0,x\n").unwrap_err();
        assert!(matches!(err, SpqrError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_from_str_rejects_huge_indices() {
        let err = from_str(&format!("0,1\n1,{}\n", usize::MAX)).unwrap_err();
        assert!(matches!(err, SpqrError::Parse { line: 2, .. }));

        let err = from_str("0,1\n1,2\n0,4000000000\n").unwrap_err();
        assert!(matches!(err, SpqrError::Parse { line: 3, .. }));

        // a gap is fine while the edges could still cover it
        let graph = from_str("0,1\n1,3\n").unwrap();
        assert_eq!(graph.node_count(), 4);
    }
}
