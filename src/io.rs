//! Edge-list input and community output.
//!
//! Input is a plain-text edge list, one `node1 node2` pair per line:
//!
//! ```text
//! # comment
//! 1 2
//! 2 3   0.5     <- extra columns are ignored
//! ```
//!
//! Output has one community per line, a running index and the sorted members:
//!
//! ```text
//! 0	[1, 2, 3]
//! 1	[3, 4, 5, 6]
//! ```

use crate::community::Community;
use crate::error::{Error, Result};
use petgraph::graphmap::{NodeTrait, UnGraphMap};
use std::fmt::Display;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Parse an undirected edge list with integer node ids.
///
/// Blank lines and lines starting with `#` are skipped. A self-loop keeps its
/// node but adds no edge; repeated edges collapse into one.
///
/// # Errors
///
/// [`Error::Parse`] with the 1-based line number for a line without two
/// integer ids; [`Error::Io`] if reading fails.
pub fn read_edgelist<R: BufRead>(reader: R) -> Result<UnGraphMap<u64, ()>> {
    let mut graph = UnGraphMap::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut fields = trimmed.split_whitespace();
        let (a, b) = match (fields.next(), fields.next()) {
            (Some(a), Some(b)) => (parse_node(a, idx + 1)?, parse_node(b, idx + 1)?),
            _ => {
                return Err(Error::Parse {
                    line: idx + 1,
                    message: "expected two node ids".into(),
                })
            }
        };

        if a == b {
            graph.add_node(a);
        } else {
            graph.add_edge(a, b, ());
        }
    }

    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "edge list loaded"
    );
    Ok(graph)
}

/// [`read_edgelist`] on a file.
pub fn read_edgelist_path<P: AsRef<Path>>(path: P) -> Result<UnGraphMap<u64, ()>> {
    let file = File::open(path.as_ref())
        .map_err(|e| Error::Io(format!("{}: {e}", path.as_ref().display())))?;
    read_edgelist(BufReader::new(file))
}

fn parse_node(field: &str, line: usize) -> Result<u64> {
    field.parse().map_err(|_| Error::Parse {
        line,
        message: format!("invalid node id '{field}'"),
    })
}

/// Write communities, one per line: `index<TAB>[a, b, c]`.
pub fn write_communities<W, N>(mut writer: W, communities: &[Community<N>]) -> Result<()>
where
    W: Write,
    N: NodeTrait + Display,
{
    for (idx, community) in communities.iter().enumerate() {
        let members: Vec<String> = community.nodes().iter().map(|n| n.to_string()).collect();
        writeln!(writer, "{idx}\t[{}]", members.join(", "))?;
    }
    writer.flush()?;
    Ok(())
}

/// [`write_communities`] to a file, replacing it if present.
pub fn write_communities_path<P, N>(path: P, communities: &[Community<N>]) -> Result<()>
where
    P: AsRef<Path>,
    N: NodeTrait + Display,
{
    let file = File::create(path.as_ref())
        .map_err(|e| Error::Io(format!("{}: {e}", path.as_ref().display())))?;
    write_communities(BufWriter::new(file), communities)
}
