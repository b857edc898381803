//! Compressed Sparse Row (CSR) link graph
//!
//! CSR is optimized for iteration over out-links, which is exactly what
//! both the transition model and power iteration need.

use rustc_hash::FxHashMap;

use super::builder::GraphBuilder;
use super::NodeId;

/// An immutable directed link graph in Compressed Sparse Row format
///
/// CSR stores out-links contiguously, making iteration over a page's links
/// very fast. Once built the graph is never mutated; both ranking algorithms
/// borrow it read-only.
#[derive(Debug, Clone)]
pub struct LinkGraph {
    /// Number of pages
    pub num_nodes: usize,
    /// Row pointers: node i's links are at indices row_ptr[i]..row_ptr[i+1]
    pub row_ptr: Vec<usize>,
    /// Column indices (target nodes) for each link, sorted per row
    pub col_idx: Vec<NodeId>,
    /// Out-degree for each node
    pub out_degree: Vec<u32>,
    /// Page names for each node
    pub names: Vec<String>,
    /// Page name -> node ID
    index: FxHashMap<String, NodeId>,
}

impl LinkGraph {
    /// Convert a GraphBuilder into CSR format
    pub fn from_builder(builder: &GraphBuilder) -> Self {
        let num_nodes = builder.node_count();
        let mut row_ptr = Vec::with_capacity(num_nodes + 1);
        let mut col_idx = Vec::with_capacity(builder.link_count());
        let mut out_degree = Vec::with_capacity(num_nodes);
        let mut names = Vec::with_capacity(num_nodes);
        let mut index = FxHashMap::with_capacity_and_hasher(num_nodes, Default::default());

        row_ptr.push(0);

        for (id, node) in builder.nodes() {
            names.push(node.name.clone());
            index.insert(node.name.clone(), id);

            // Sort links for deterministic iteration
            let mut links: Vec<_> = node.links.iter().copied().collect();
            links.sort_unstable();

            out_degree.push(links.len() as u32);
            col_idx.extend(links);
            row_ptr.push(col_idx.len());
        }

        Self {
            num_nodes,
            row_ptr,
            col_idx,
            out_degree,
            names,
            index,
        }
    }

    /// Build a graph straight from a `page -> linked pages` mapping
    ///
    /// See [`GraphBuilder::from_links`] for the filtering rules.
    pub fn from_links<K, V, I>(links: impl IntoIterator<Item = (K, I)>) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
        I: IntoIterator<Item = V>,
    {
        Self::from_builder(&GraphBuilder::from_links(links))
    }

    /// Out-links of a node as a sorted slice
    pub fn links(&self, node: NodeId) -> &[NodeId] {
        let start = self.row_ptr[node as usize];
        let end = self.row_ptr[node as usize + 1];
        &self.col_idx[start..end]
    }

    /// Iterate over the targets of a node's out-links
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.links(node).iter().copied()
    }

    /// Check whether `from` links directly to `to`
    pub fn has_link(&self, from: NodeId, to: NodeId) -> bool {
        self.links(from).binary_search(&to).is_ok()
    }

    /// Get the out-degree of a node
    pub fn degree(&self, node: NodeId) -> u32 {
        self.out_degree[node as usize]
    }

    /// A dangling page has no out-links
    pub fn is_dangling(&self, node: NodeId) -> bool {
        self.out_degree[node as usize] == 0
    }

    /// Get the page name for a node
    pub fn name(&self, node: NodeId) -> &str {
        &self.names[node as usize]
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.num_nodes == 0
    }

    /// Get the total number of directed links
    pub fn num_edges(&self) -> usize {
        self.col_idx.len()
    }

    /// All node IDs in order
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> {
        0..self.num_nodes as NodeId
    }

    /// Find dangling nodes (nodes with no outgoing links)
    pub fn dangling_nodes(&self) -> Vec<NodeId> {
        self.node_ids().filter(|&n| self.is_dangling(n)).collect()
    }

    /// Get node ID by page name
    pub fn get_node_by_name(&self, name: &str) -> Option<NodeId> {
        self.index.get(name).copied()
    }
}

impl Default for LinkGraph {
    fn default() -> Self {
        Self {
            num_nodes: 0,
            row_ptr: vec![0],
            col_idx: Vec::new(),
            out_degree: Vec::new(),
            names: Vec::new(),
            index: FxHashMap::default(),
        }
    }
}
