//! ipforest - forests of IPv4 address trees
//!
//! Trees are written in bracket notation, e.g.
//! `(10.0.0.1 10.0.0.2 (10.0.0.3 10.0.0.4))`, where the first address of a
//! group is linked to every item that follows it. A [`Forest`] holds any
//! number of disjoint trees, stays acyclic across every change, and answers
//! rooted queries (height, levels, routes, notation) from any member.

pub mod address;
pub mod error;
pub mod forest;
pub mod logging;
pub mod manifest;
pub mod notation;

pub use address::Address;
pub use error::{Error, Outcome, Rejection, Result};
pub use forest::{Edge, Forest, RootedView};
