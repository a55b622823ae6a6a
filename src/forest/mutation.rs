//! Forest mutations
//!
//! Each operation validates first and commits only when every check passes,
//! so a rejected call leaves the forest untouched.

use crate::address::Address;
use crate::error::{Outcome, Rejection};
use crate::forest::{acyclic, Edge, Forest};
use petgraph::algo::has_path_connecting;
use tracing::debug;

impl Forest {
    /// Link two members of the forest
    ///
    /// Refused when the addresses are equal or unknown, already linked, or
    /// already reachable from one another.
    pub fn connect(&mut self, a: &Address, b: &Address) -> Outcome {
        let (a, b) = (*a, *b);

        if let Err(reason) = self.check_connect(a, b) {
            debug!(%a, %b, %reason, "connect rejected");
            return Err(reason);
        }

        self.install(Edge::new(a, b));
        debug!(%a, %b, "connected");
        Ok(())
    }

    fn check_connect(&self, a: Address, b: Address) -> Outcome {
        if a == b {
            return Err(Rejection::SelfLink(a));
        }
        self.require_member(a)?;
        self.require_member(b)?;
        if self.graph.contains_edge(a, b) {
            return Err(Rejection::AlreadyLinked(a, b));
        }
        if has_path_connecting(&self.graph, a, b, None) {
            return Err(Rejection::WouldCycle(a, b));
        }
        Ok(())
    }

    /// Remove the link between two members
    ///
    /// The last link of the whole forest is never removed. An address left
    /// without links stops being a member.
    pub fn disconnect(&mut self, a: &Address, b: &Address) -> Outcome {
        let (a, b) = (*a, *b);

        if let Err(reason) = self.check_disconnect(a, b) {
            debug!(%a, %b, %reason, "disconnect rejected");
            return Err(reason);
        }

        self.graph.remove_edge(a, b);
        for end in [a, b] {
            if self.graph.neighbors(end).next().is_none() {
                self.graph.remove_node(end);
                debug!(address = %end, "dropped unlinked address");
            }
        }
        debug!(%a, %b, "disconnected");
        Ok(())
    }

    fn check_disconnect(&self, a: Address, b: Address) -> Outcome {
        self.require_member(a)?;
        self.require_member(b)?;
        if !self.graph.contains_edge(a, b) {
            return Err(Rejection::NotLinked(a, b));
        }
        if self.graph.edge_count() == 1 {
            return Err(Rejection::LastLink(a, b));
        }
        Ok(())
    }

    /// Merge the trees of `other` into this forest
    ///
    /// Trees sharing no address with this forest are added as they are.
    /// Otherwise every link of `other` not yet present is added, unless the
    /// combined links would contain a loop or there is nothing new to add.
    /// `other` is only read; the merged links are copies.
    pub fn union(&mut self, other: &Forest) -> Outcome {
        let incoming: Vec<Edge> = other
            .edges()
            .into_iter()
            .filter(|edge| !self.graph.contains_edge(edge.parent, edge.child))
            .collect();
        let shared = other.graph.nodes().filter(|n| self.contains(n)).count();

        if shared > 0 {
            if let Err(reason) = self.check_union(&incoming) {
                debug!(shared, %reason, "union rejected");
                return Err(reason);
            }
        }

        for edge in &incoming {
            self.install(*edge);
        }
        debug!(shared, links = incoming.len(), "merged forest");
        Ok(())
    }

    fn check_union(&self, incoming: &[Edge]) -> Outcome {
        if incoming.is_empty() {
            return Err(Rejection::NothingToMerge);
        }
        // Existing links are already acyclic, so any loop found involves an incoming link
        let combined = self.edges().into_iter().chain(incoming.iter().copied());
        match acyclic::closing_edge(combined) {
            Some(edge) => Err(Rejection::WouldCycle(edge.parent, edge.child)),
            None => Ok(()),
        }
    }

    fn require_member(&self, addr: Address) -> Outcome {
        if self.contains(&addr) {
            Ok(())
        } else {
            Err(Rejection::UnknownAddress(addr))
        }
    }
}
