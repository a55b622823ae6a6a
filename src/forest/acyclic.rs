//! Loop detection over link sets

use crate::address::Address;
use crate::forest::Edge;
use petgraph::unionfind::UnionFind;
use std::collections::{HashMap, HashSet};

/// Find the first link that closes a loop, if any
///
/// Links are undirected and repeated pairs count once. A self-link closes
/// a loop on its own.
pub fn closing_edge<I>(edges: I) -> Option<Edge>
where
    I: IntoIterator<Item = Edge>,
{
    let mut seen = HashSet::new();
    let unique: Vec<Edge> = edges
        .into_iter()
        .filter(|edge| seen.insert(edge.normalized()))
        .collect();

    let mut index: HashMap<Address, usize> = HashMap::new();
    for edge in &unique {
        for addr in [edge.parent, edge.child] {
            let next = index.len();
            index.entry(addr).or_insert(next);
        }
    }

    let mut sets = UnionFind::<usize>::new(index.len());
    unique
        .into_iter()
        .find(|edge| !sets.union(index[&edge.parent], index[&edge.child]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(a: u8, b: u8) -> Edge {
        Edge::new(Address::new(a, a, a, a), Address::new(b, b, b, b))
    }

    #[test]
    fn test_tree_has_no_closing_edge() {
        let edges = vec![edge(1, 2), edge(1, 3), edge(3, 4), edge(3, 5)];
        assert_eq!(closing_edge(edges), None);
    }

    #[test]
    fn test_repeated_pair_is_not_a_loop() {
        let edges = vec![edge(1, 2), edge(2, 1), edge(1, 2)];
        assert_eq!(closing_edge(edges), None);
    }

    #[test]
    fn test_triangle() {
        let edges = vec![edge(1, 2), edge(2, 3), edge(3, 1)];
        assert_eq!(closing_edge(edges), Some(edge(3, 1)));
    }

    #[test]
    fn test_self_link() {
        assert_eq!(closing_edge(vec![edge(7, 7)]), Some(edge(7, 7)));
    }

    #[test]
    fn test_loop_across_two_trees() {
        // Two separate trees joined twice
        let edges = vec![edge(1, 2), edge(3, 4), edge(2, 3), edge(4, 1)];
        assert_eq!(closing_edge(edges), Some(edge(4, 1)));
    }
}
