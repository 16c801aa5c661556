//! Reader for the undirected weighted graph (`.uwg`) text format.
//!
//! ```text
//! <node count>
//! <edge count>
//! <u> <v> <weight>     (one line per edge)
//! ```
//!
//! Node labels are opaque whitespace-free tokens. Blank lines are ignored.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{GraphError, GraphResult};
use crate::graph::Graph;

/// Parsed edge line before mirror pairing.
#[derive(Debug, Clone, PartialEq, Eq)]
struct EdgeLine {
    line: usize,
    u: String,
    v: String,
    weight: u64,
}

/// Load a graph from a `.uwg` file.
pub fn load_uwg<P: AsRef<Path>>(path: P) -> GraphResult<Graph> {
    let file = File::open(path.as_ref())?;
    parse_uwg(BufReader::new(file))
}

/// Parse a graph from `.uwg` text.
pub fn parse_uwg<R: BufRead>(reader: R) -> GraphResult<Graph> {
    let mut lines = reader
        .lines()
        .enumerate()
        .map(|(i, line)| line.map(|text| (i + 1, text)));

    let node_count = read_header(&mut lines, "node count")?;
    let edge_count = read_header(&mut lines, "edge count")?;

    let mut edges = Vec::with_capacity(edge_count);
    for item in lines {
        let (line, text) = item?;
        if text.trim().is_empty() {
            continue;
        }
        edges.push(parse_edge_line(line, &text)?);
    }

    if edges.len() != edge_count {
        return Err(GraphError::EdgeCountMismatch {
            declared: edge_count,
            found: edges.len(),
        });
    }

    let numbered: Vec<(usize, &str, &str, u64)> = edges
        .iter()
        .map(|e| (e.line, e.u.as_str(), e.v.as_str(), e.weight))
        .collect();
    let graph = Graph::from_numbered_edges(node_count, &numbered)?;

    log::debug!(
        "Loaded graph: {} nodes, {} edges",
        graph.num_nodes(),
        graph.num_edges()
    );

    Ok(graph)
}

fn read_header<I>(lines: &mut I, what: &'static str) -> GraphResult<usize>
where
    I: Iterator<Item = std::io::Result<(usize, String)>>,
{
    for item in lines.by_ref() {
        let (line, text) = item?;
        let value = text.trim();
        if value.is_empty() {
            continue;
        }
        return value.parse::<usize>().map_err(|_| GraphError::InvalidHeader {
            line,
            value: value.to_string(),
        });
    }
    Err(GraphError::MissingHeader(what))
}

fn parse_edge_line(line: usize, text: &str) -> GraphResult<EdgeLine> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() != 3 {
        return Err(GraphError::InvalidEdgeLine {
            line,
            reason: format!("expected 3 fields, found {}", tokens.len()),
        });
    }

    let weight: i64 = tokens[2].parse().map_err(|_| GraphError::InvalidEdgeLine {
        line,
        reason: format!("weight {:?} is not an integer", tokens[2]),
    })?;
    if weight < 0 {
        return Err(GraphError::NegativeWeight { line });
    }

    Ok(EdgeLine {
        line,
        u: tokens[0].to_string(),
        v: tokens[1].to_string(),
        weight: weight as u64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> GraphResult<Graph> {
        parse_uwg(text.as_bytes())
    }

    #[test]
    fn test_parse_square() {
        let g = parse("4\n4\n1 2 1\n2 3 2\n3 4 3\n4 1 4\n").unwrap();
        assert_eq!(g.num_nodes(), 4);
        assert_eq!(g.num_edges(), 4);

        let e = g.edge_between("1", "2").unwrap();
        assert_eq!((e.weight, e.mirror_weight, e.id), (1, 4, 0));
        let e = g.edge_between("4", "1").unwrap();
        assert_eq!((e.weight, e.mirror_weight, e.id), (4, 1, 3));
    }

    #[test]
    fn test_trailing_blank_lines_ignored() {
        let g = parse("2\n1\n\na b 5\n\n\n").unwrap();
        assert_eq!(g.num_edges(), 1);
        assert_eq!(g.edges()[0].mirror_weight, 5);
    }

    #[test]
    fn test_edge_count_mismatch() {
        let err = parse("3\n3\n1 2 1\n2 3 1\n").unwrap_err();
        assert!(matches!(err, GraphError::EdgeCountMismatch { declared: 3, found: 2 }));
    }

    #[test]
    fn test_node_count_mismatch() {
        let err = parse("4\n2\n1 2 1\n2 3 1\n").unwrap_err();
        assert!(matches!(err, GraphError::NodeCountMismatch { declared: 4, found: 3 }));
    }

    #[test]
    fn test_single_node_instance() {
        let g = parse("1\n0\n").unwrap();
        assert_eq!((g.num_nodes(), g.num_edges()), (1, 0));
    }

    #[test]
    fn test_weight_overflow_reports_line() {
        let text = format!("4\n3\na b {0}\nb c {0}\nc d {0}\n", i64::MAX);
        assert!(matches!(parse(&text), Err(GraphError::WeightOverflow { line: 5 })));
    }

    #[test]
    fn test_bad_lines() {
        assert!(matches!(parse(""), Err(GraphError::MissingHeader(_))));
        assert!(matches!(parse("x\n"), Err(GraphError::InvalidHeader { line: 1, .. })));
        assert!(matches!(
            parse("2\n1\n1 2\n"),
            Err(GraphError::InvalidEdgeLine { line: 3, .. })
        ));
        assert!(matches!(
            parse("2\n1\n1 2 abc\n"),
            Err(GraphError::InvalidEdgeLine { line: 3, .. })
        ));
        assert!(matches!(parse("2\n1\n1 2 -4\n"), Err(GraphError::NegativeWeight { line: 3 })));
        assert!(matches!(parse("1\n1\n1 1 4\n"), Err(GraphError::SelfLoop { line: 3 })));
        assert!(matches!(
            parse("2\n2\n1 2 4\n2 1 5\n"),
            Err(GraphError::DuplicateEdge { line: 4 })
        ));
    }
}
