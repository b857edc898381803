//! Graph builder with set-semantics link handling
//!
//! This module provides a mutable graph builder that uses FxHashMap
//! for O(1) page lookups during construction. The builder is the only
//! mutable stage; once converted into a [`LinkGraph`](super::csr::LinkGraph)
//! the graph is read-only.

use rustc_hash::{FxHashMap, FxHashSet};

use super::NodeId;

/// A page in the graph builder
#[derive(Debug, Clone)]
pub struct BuilderNode {
    /// The page identifier
    pub name: String,
    /// Out-links: target node IDs
    pub links: FxHashSet<NodeId>,
}

impl BuilderNode {
    /// Create a new page with no out-links
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            links: FxHashSet::default(),
        }
    }
}

/// A mutable graph builder optimized for incremental construction
#[derive(Debug)]
pub struct GraphBuilder {
    /// Maps page name -> node ID
    name_to_id: FxHashMap<String, NodeId>,
    /// Node storage
    nodes: Vec<BuilderNode>,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphBuilder {
    /// Create a new empty graph builder
    pub fn new() -> Self {
        Self {
            name_to_id: FxHashMap::default(),
            nodes: Vec::new(),
        }
    }

    /// Create a graph builder with pre-allocated capacity
    pub fn with_capacity(node_capacity: usize) -> Self {
        Self {
            name_to_id: FxHashMap::with_capacity_and_hasher(node_capacity, Default::default()),
            nodes: Vec::with_capacity(node_capacity),
        }
    }

    /// Get or create a node for the given page, returning its ID
    pub fn add_page(&mut self, name: &str) -> NodeId {
        if let Some(&id) = self.name_to_id.get(name) {
            return id;
        }

        let id = self.nodes.len() as NodeId;
        self.name_to_id.insert(name.to_string(), id);
        self.nodes.push(BuilderNode::new(name));
        id
    }

    /// Add a directed link between two existing nodes
    ///
    /// Returns `true` if the link is new. Self-links and links touching an
    /// unknown node ID are ignored.
    pub fn add_link(&mut self, from: NodeId, to: NodeId) -> bool {
        if from == to || to as usize >= self.nodes.len() {
            return false;
        }

        match self.nodes.get_mut(from as usize) {
            Some(node) => node.links.insert(to),
            None => false,
        }
    }

    /// Build a graph from a `page -> linked pages` mapping
    ///
    /// Node IDs are assigned in sorted page order, so the result does not
    /// depend on the iteration order of the input. Links to pages that are
    /// not keys of the mapping are dropped, as are self-links. Repeated keys
    /// merge their link sets.
    pub fn from_links<K, V, I>(links: impl IntoIterator<Item = (K, I)>) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
        I: IntoIterator<Item = V>,
    {
        let mut entries: Vec<(K, Vec<V>)> = links
            .into_iter()
            .map(|(page, targets)| (page, targets.into_iter().collect()))
            .collect();
        entries.sort_by(|a, b| a.0.as_ref().cmp(b.0.as_ref()));

        let mut builder = Self::with_capacity(entries.len());
        for (page, _) in &entries {
            builder.add_page(page.as_ref());
        }

        for (page, targets) in &entries {
            let Some(from) = builder.get_node_id(page.as_ref()) else {
                continue;
            };
            for target in targets {
                // Only in-corpus pages are linkable
                if let Some(to) = builder.get_node_id(target.as_ref()) {
                    builder.add_link(from, to);
                }
            }
        }

        builder
    }

    /// Get the number of nodes in the graph
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the total number of directed links
    pub fn link_count(&self) -> usize {
        self.nodes.iter().map(|n| n.links.len()).sum()
    }

    /// Get a node by ID
    pub fn get_node(&self, id: NodeId) -> Option<&BuilderNode> {
        self.nodes.get(id as usize)
    }

    /// Get a node ID by page name
    pub fn get_node_id(&self, name: &str) -> Option<NodeId> {
        self.name_to_id.get(name).copied()
    }

    /// Get the page name for a node ID
    pub fn get_name(&self, id: NodeId) -> Option<&str> {
        self.nodes.get(id as usize).map(|n| n.name.as_str())
    }

    /// Iterate over all nodes
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &BuilderNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (i as NodeId, n))
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
