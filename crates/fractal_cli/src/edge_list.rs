//! Whitespace separated edge list reader.
//!
//! One `source target` pair per line. A line with a single token declares an
//! isolated node, extra columns (weights) are ignored. Blank lines and
//! everything after `#` are skipped. Node tokens are arbitrary strings and
//! get dense indices in order of first appearance.

use anyhow::{Context, Result};
use fractal_dim::AdjacencyGraph;
use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

/// Graph read from an edge list, with the original node labels.
#[derive(Debug, Default)]
pub struct EdgeList {
	pub graph: AdjacencyGraph,
	pub labels: Vec<String>,
}

impl EdgeList {
	/// Read an edge list file.
	pub fn load(path: &Path) -> Result<Self> {
		let file = std::fs::File::open(path)
			.with_context(|| format!("Failed to open graph file: {}", path.display()))?;
		Self::read(std::io::BufReader::new(file))
			.with_context(|| format!("Failed to read graph file: {}", path.display()))
	}

	/// Parse an edge list from any buffered reader.
	pub fn read<R: BufRead>(reader: R) -> Result<Self> {
		let mut list = EdgeList::default();
		let mut index: HashMap<String, usize> = HashMap::new();

		for (line_no, line) in reader.lines().enumerate() {
			let line = line.with_context(|| format!("line {}", line_no + 1))?;
			let content = line.split('#').next().unwrap_or_default();
			let mut tokens = content.split_whitespace();

			let Some(source) = tokens.next() else {
				continue;
			};
			let a = list.intern(&mut index, source);
			if let Some(target) = tokens.next() {
				let b = list.intern(&mut index, target);
				list.graph.add_edge(a, b);
			}
		}

		Ok(list)
	}

	fn intern(&mut self, index: &mut HashMap<String, usize>, token: &str) -> usize {
		if let Some(&idx) = index.get(token) {
			return idx;
		}
		let idx = self.graph.add_node();
		index.insert(token.to_owned(), idx);
		self.labels.push(token.to_owned());
		idx
	}
}
