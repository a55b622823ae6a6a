//! Bracket notation codec
//!
//! Provides:
//! - Parsing `(root child (inner leaf) ...)` text into parent/child links
//! - Writing a rooted view back out with children in ascending order

pub mod parser;
pub mod writer;

pub use parser::parse_edges;
pub use writer::write_tree;
