//! Bracket notation writing

use crate::forest::RootedView;
use std::fmt::Write;

/// Render a rooted view as bracket notation
///
/// Children always appear in ascending address order; a child with children
/// of its own becomes a nested group, a leaf is written bare.
pub fn write_tree(view: &RootedView) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write!(out, "({}", view.root());

    // One frame per open group, holding the children still to write
    let mut open = vec![view.children(view.root())];
    while let Some(frame) = open.last_mut() {
        match frame.next() {
            Some(child) if view.is_leaf(child) => {
                let _ = write!(out, " {}", child);
            }
            Some(child) => {
                let _ = write!(out, " ({}", child);
                open.push(view.children(child));
            }
            None => {
                out.push(')');
                open.pop();
            }
        }
    }

    out
}
