//! Forest of address trees
//!
//! Handles:
//! - Building trees from a root and its children, from links, or from bracket notation
//! - Keeping the whole forest acyclic on every change
//! - Membership and listing queries
//!
//! Rooted queries live in [`rooted`], mutations in [`mutation`].

pub mod acyclic;
pub mod mutation;
pub mod rooted;

pub use rooted::RootedView;

use crate::address::Address;
use crate::error::{Error, Result};
use crate::notation;
use petgraph::graphmap::UnGraphMap;
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};
use std::str::FromStr;

/// A link between two addresses
///
/// Links are undirected; `parent` and `child` record the orientation the
/// link was written or discovered in. Links reported by [`Forest::edges`]
/// put the smaller address first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Edge {
    pub parent: Address,
    pub child: Address,
}

impl Edge {
    pub fn new(parent: Address, child: Address) -> Self {
        Self { parent, child }
    }

    /// The same link with the smaller address first
    pub fn normalized(self) -> Self {
        if self.parent <= self.child {
            self
        } else {
            Self::new(self.child, self.parent)
        }
    }
}

/// One or more disjoint trees of addresses
///
/// Every member has at least one link; the smallest tree is a single link.
#[derive(Debug, Clone)]
pub struct Forest {
    graph: UnGraphMap<Address, ()>,
}

impl Forest {
    /// Create a two-level tree: `root` linked to every child
    pub fn new(root: Address, children: &[Address]) -> Result<Self> {
        if children.is_empty() {
            return Err(Error::InvariantViolation(format!(
                "{} needs at least one child",
                root
            )));
        }
        if children.contains(&root) {
            return Err(Error::InvariantViolation(format!(
                "{} cannot be its own child",
                root
            )));
        }
        let distinct: BTreeSet<&Address> = children.iter().collect();
        if distinct.len() != children.len() {
            return Err(Error::InvariantViolation(format!(
                "duplicate children under {}",
                root
            )));
        }

        let mut forest = Self::empty();
        for child in children {
            forest.install(Edge::new(root, *child));
        }
        Ok(forest)
    }

    /// Create a forest from explicit links
    ///
    /// Repeated links collapse into one; self-links and loops are rejected.
    pub fn from_edges<I>(edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = Edge>,
    {
        let edges: Vec<Edge> = edges.into_iter().collect();
        if edges.is_empty() {
            return Err(Error::InvariantViolation(
                "a forest needs at least one link".into(),
            ));
        }
        if let Some(edge) = acyclic::closing_edge(edges.iter().copied()) {
            return Err(Error::CycleDetected(edge.parent, edge.child));
        }

        let mut forest = Self::empty();
        for edge in edges {
            forest.install(edge);
        }
        Ok(forest)
    }

    /// Parse bracket notation into a forest holding one tree
    pub fn parse(text: &str) -> Result<Self> {
        let edges = notation::parse_edges(text)?;
        if edges.is_empty() {
            return Err(Error::InvalidNotation(format!(
                "'{}' describes no links",
                text.trim()
            )));
        }
        Self::from_edges(edges)
    }

    fn empty() -> Self {
        Self {
            graph: UnGraphMap::new(),
        }
    }

    /// All members in ascending order
    ///
    /// The returned list is a snapshot; changing it does not touch the forest.
    pub fn list(&self) -> Vec<Address> {
        let mut members: Vec<Address> = self.graph.nodes().collect();
        members.sort();
        members
    }

    /// Whether `addr` is a member
    pub fn contains(&self, addr: &Address) -> bool {
        self.graph.contains_node(*addr)
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Number of links
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Whether `a` and `b` are directly linked
    pub fn linked(&self, a: &Address, b: &Address) -> bool {
        self.graph.contains_edge(*a, *b)
    }

    /// All links, smaller address first, in ascending order
    pub fn edges(&self) -> Vec<Edge> {
        let mut edges: Vec<Edge> = self
            .graph
            .all_edges()
            .map(|(a, b, _)| Edge::new(a, b).normalized())
            .collect();
        edges.sort();
        edges
    }

    /// The disjoint trees, each as an ascending member list, ordered by smallest member
    pub fn components(&self) -> Vec<Vec<Address>> {
        let mut seen = HashSet::new();
        let mut components = Vec::new();

        for member in self.list() {
            if seen.contains(&member) {
                continue;
            }
            let tree = RootedView::build(self, member).members();
            seen.extend(tree.iter().copied());
            components.push(tree);
        }

        components
    }

    /// Direct neighbours of `addr` in ascending order
    pub(crate) fn neighbors(&self, addr: Address) -> Vec<Address> {
        if !self.graph.contains_node(addr) {
            return Vec::new();
        }
        let mut neighbors: Vec<Address> = self.graph.neighbors(addr).collect();
        neighbors.sort();
        neighbors
    }

    /// Add a link in both directions without any checks
    fn install(&mut self, edge: Edge) {
        self.graph.add_edge(edge.parent, edge.child, ());
    }
}

impl FromStr for Forest {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl PartialEq for Forest {
    fn eq(&self, other: &Self) -> bool {
        self.list() == other.list() && self.edges() == other.edges()
    }
}

impl Eq for Forest {}
