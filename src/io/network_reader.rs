use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::SplitWhitespace;

use log::{debug, warn};

use crate::error::CompetitionError;
use crate::problem::{Arc, Distance, Vertex};

// upper bound for preallocating arcs, the header count is not trusted
const MAX_ARC_CAPACITY_HINT: usize = 1 << 16;

/**
Plain text description of a city road network.

```text
V E
from to distance
from to distance
...
```

`V` is the number of intersections, `E` the number of one-way streets. Both
header values are whitespace separated and may be spread over several lines;
anything following `E` on its line is ignored. Every further non-blank line
holds one street, the intersections are numbered from `0` to `V - 1`.
`E` is informational only, the streets actually listed are what counts.
 */
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkDescription {
    pub num_nodes: usize,
    pub num_edges: usize,
    pub arcs: Vec<Arc>,
}

pub fn read_network(path: impl AsRef<Path>) -> Result<NetworkDescription, CompetitionError> {
    let path = path.as_ref();
    let f = File::open(path).map_err(|e| {
        CompetitionError::InvalidInput(format!("cannot open {}: {}", path.display(), e))
    })?;
    debug!("reading network from {}", path.display());
    parse_network(BufReader::new(f))
}

pub fn parse_network(reader: impl BufRead) -> Result<NetworkDescription, CompetitionError> {
    let mut lines = reader.lines().enumerate();

    // header: V E
    let mut header: Vec<usize> = Vec::with_capacity(2);
    while header.len() < 2 {
        let (line_no, line) = match lines.next() {
            Some((idx, line)) => (idx + 1, line?),
            None => {
                return Err(CompetitionError::InvalidInput(
                    "unexpected end of input while reading the header".to_string(),
                ))
            }
        };
        // remaining tokens on the line with E are dropped
        for token in line.split_whitespace().take(2 - header.len()) {
            header.push(token.parse::<usize>().map_err(|_| {
                malformed(line_no, format!("expected a vertex or edge count, got '{}'", token))
            })?);
        }
    }
    let (num_nodes, num_edges) = (header[0], header[1]);

    let mut arcs = Vec::with_capacity(num_edges.min(MAX_ARC_CAPACITY_HINT));
    for (idx, line) in lines {
        let line_no = idx + 1;
        let line = line?;
        let trimmed_line = line.trim();
        if trimmed_line.is_empty() {
            continue;
        }
        arcs.push(parse_arc(trimmed_line, line_no, num_nodes)?);
    }

    if arcs.len() != num_edges {
        warn!(
            "header announces {} streets but {} were listed",
            num_edges,
            arcs.len()
        );
    }

    Ok(NetworkDescription {
        num_nodes,
        num_edges,
        arcs,
    })
}

fn parse_arc(line: &str, line_no: usize, num_nodes: usize) -> Result<Arc, CompetitionError> {
    // from to distance
    let mut split = line.split_whitespace();
    let from = next_vertex(&mut split, line_no, num_nodes, "from")?;
    let to = next_vertex(&mut split, line_no, num_nodes, "to")?;
    let distance = split
        .next()
        .ok_or_else(|| malformed(line_no, "expected next split: distance"))?
        .parse::<Distance>()
        .map_err(|e| malformed(line_no, format!("distance: {}", e)))?;
    if !distance.is_finite() || distance < 0.0 {
        return Err(malformed(
            line_no,
            format!("distance must be a non-negative number, got {}", distance),
        ));
    }
    if let Some(extra) = split.next() {
        return Err(malformed(line_no, format!("unexpected trailing token '{}'", extra)));
    }
    Ok(Arc { from, to, distance })
}

fn next_vertex(
    split: &mut SplitWhitespace,
    line_no: usize,
    num_nodes: usize,
    field: &str,
) -> Result<Vertex, CompetitionError> {
    let vertex = split
        .next()
        .ok_or_else(|| malformed(line_no, format!("expected next split: {}", field)))?
        .parse::<Vertex>()
        .map_err(|e| malformed(line_no, format!("{}: {}", field, e)))?;
    if vertex >= num_nodes {
        return Err(malformed(
            line_no,
            format!("{} vertex {} is not below {}", field, vertex, num_nodes),
        ));
    }
    Ok(vertex)
}

fn malformed(line_no: usize, msg: impl AsRef<str>) -> CompetitionError {
    CompetitionError::InvalidInput(format!("line {}: {}", line_no, msg.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_city_network() -> anyhow::Result<()> {
        let network = read_network("resources/networks/city.txt")?;
        assert_eq!(network.num_nodes, 8);
        assert_eq!(network.num_edges, 15);
        assert_eq!(network.arcs.len(), 15);
        assert_eq!(network.arcs[0], Arc::new(2, 3, 0.39));
        assert_eq!(network.arcs[14], Arc::new(0, 1, 0.58));
        Ok(())
    }

    #[test]
    fn header_may_span_lines() -> anyhow::Result<()> {
        let network = read_network("resources/networks/tiny_cycle.txt")?;
        assert_eq!(network.num_nodes, 2);
        assert_eq!(network.num_edges, 2);
        assert_eq!(network.arcs, vec![Arc::new(0, 1, 5.0), Arc::new(1, 0, 5.0)]);
        Ok(())
    }

    #[test]
    fn trailing_header_tokens_are_ignored() -> anyhow::Result<()> {
        let network = parse_network("2 1 this is a comment\n0 1 3\n".as_bytes())?;
        assert_eq!(network.arcs, vec![Arc::new(0, 1, 3.0)]);
        Ok(())
    }

    #[test]
    fn edge_count_mismatch_is_tolerated() -> anyhow::Result<()> {
        let network = parse_network("2 5\n0 1 3\n".as_bytes())?;
        assert_eq!(network.num_edges, 5);
        assert_eq!(network.arcs.len(), 1);
        Ok(())
    }

    #[test]
    fn huge_edge_count_is_only_descriptive() -> anyhow::Result<()> {
        let network = parse_network("2 1000000000000000000\n0 1 1\n".as_bytes())?;
        assert_eq!(network.num_edges, 1_000_000_000_000_000_000);
        assert_eq!(network.arcs, vec![Arc::new(0, 1, 1.0)]);
        Ok(())
    }

    #[test]
    fn malformed_line_is_invalid_input() {
        let res = read_network("resources/networks/malformed.txt");
        match res {
            Err(CompetitionError::InvalidInput(msg)) => assert!(msg.starts_with("line 3")),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn missing_file_is_invalid_input() {
        let res = read_network("resources/networks/does_not_exist.txt");
        assert!(matches!(res, Err(CompetitionError::InvalidInput(_))));
    }

    #[test]
    fn truncated_header_is_invalid_input() {
        assert!(parse_network("4".as_bytes()).is_err());
        assert!(parse_network("".as_bytes()).is_err());
        assert!(parse_network("-1 0".as_bytes()).is_err());
    }

    #[test]
    fn rejects_bad_arcs() {
        for input in [
            "2 1\n0 1\n",
            "2 1\n0 1 2 3\n",
            "2 1\n0 2 1\n",
            "2 1\n0 1 -0.5\n",
            "2 1\n0 1 NaN\n",
            "2 1\n0 1 inf\n",
        ] {
            assert!(
                matches!(parse_network(input.as_bytes()), Err(CompetitionError::InvalidInput(_))),
                "accepted {:?}",
                input
            );
        }
    }
}
