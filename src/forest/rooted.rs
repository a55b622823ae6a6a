//! Rooted traversal of a single tree
//!
//! A [`RootedView`] hangs one tree of the forest from a chosen member and
//! records, for every node, the neighbours found one step further from the
//! root. It is rebuilt on every query and never stored.

use crate::address::Address;
use crate::forest::Forest;
use crate::notation;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};

/// Breadth-first parent-to-children view of one tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootedView {
    root: Address,
    /// Only nodes with at least one child have an entry
    children: BTreeMap<Address, BTreeSet<Address>>,
}

impl RootedView {
    /// Walk the tree containing `root` breadth-first, lowest address first
    pub(crate) fn build(forest: &Forest, root: Address) -> Self {
        let mut children = BTreeMap::new();
        let mut visited = HashSet::from([root]);
        let mut queue = VecDeque::from([root]);

        while let Some(node) = queue.pop_front() {
            let found: BTreeSet<Address> = forest
                .neighbors(node)
                .into_iter()
                .filter(|next| visited.insert(*next))
                .collect();

            if found.is_empty() {
                continue;
            }
            queue.extend(found.iter().copied());
            children.insert(node, found);
        }

        Self { root, children }
    }

    pub fn root(&self) -> Address {
        self.root
    }

    /// Children of `node`, ascending
    pub fn children(&self, node: Address) -> impl Iterator<Item = Address> + '_ {
        self.children.get(&node).into_iter().flatten().copied()
    }

    pub fn is_leaf(&self, node: Address) -> bool {
        !self.children.contains_key(&node)
    }

    /// Number of nodes reachable from the root, root included
    pub fn len(&self) -> usize {
        1 + self.children.values().map(BTreeSet::len).sum::<usize>()
    }

    /// A view always holds at least its root
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Every node in the view, ascending
    pub fn members(&self) -> Vec<Address> {
        let mut members: Vec<Address> = std::iter::once(self.root)
            .chain(self.children.values().flatten().copied())
            .collect();
        members.sort();
        members
    }

    /// Links on the longest root-to-leaf path
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack = vec![(self.root, 0)];

        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            stack.extend(self.children(node).map(|child| (child, depth + 1)));
        }

        height
    }

    /// Nodes grouped by distance from the root, each level ascending
    pub fn levels(&self) -> Vec<Vec<Address>> {
        let mut levels = Vec::new();
        let mut current = vec![self.root];

        while !current.is_empty() {
            let mut next: Vec<Address> = current
                .iter()
                .flat_map(|node| self.children(*node))
                .collect();
            next.sort();
            levels.push(current);
            current = next;
        }

        levels
    }

    /// Path from the root down to `end`, both inclusive; empty when `end` is not in the view
    pub fn path_to(&self, end: Address) -> Vec<Address> {
        let parents: HashMap<Address, Address> = self
            .children
            .iter()
            .flat_map(|(parent, children)| children.iter().map(move |child| (*child, *parent)))
            .collect();

        let mut path = vec![end];
        let mut node = end;
        while node != self.root {
            match parents.get(&node) {
                Some(parent) => {
                    path.push(*parent);
                    node = *parent;
                }
                None => return Vec::new(),
            }
        }

        path.reverse();
        path
    }
}

impl Forest {
    /// Rooted view of the tree containing `root`; `None` when `root` is not a member
    pub fn rooted(&self, root: &Address) -> Option<RootedView> {
        self.contains(root).then(|| RootedView::build(self, *root))
    }

    /// Height of the tree hung from `root`; 0 when `root` is not a member
    pub fn height(&self, root: &Address) -> usize {
        self.rooted(root).map_or(0, |view| view.height())
    }

    /// Levels of the tree hung from `root`; empty when `root` is not a member
    pub fn levels(&self, root: &Address) -> Vec<Vec<Address>> {
        self.rooted(root)
            .map(|view| view.levels())
            .unwrap_or_default()
    }

    /// Shortest route from `start` to `end`, both inclusive
    ///
    /// Empty when either address is unknown or the two sit in different trees.
    pub fn route(&self, start: &Address, end: &Address) -> Vec<Address> {
        if !self.contains(end) {
            return Vec::new();
        }
        self.rooted(start)
            .map(|view| view.path_to(*end))
            .unwrap_or_default()
    }

    /// Bracket notation of the tree hung from `root`; empty when `root` is not a member
    pub fn to_notation(&self, root: &Address) -> String {
        self.rooted(root)
            .map(|view| notation::write_tree(&view))
            .unwrap_or_default()
    }
}
