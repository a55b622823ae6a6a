//! Bracket notation parsing
//!
//! Tokens are whitespace-delimited. Each one is an address optionally
//! prefixed by a single `(` (opening a group whose head is that address)
//! and optionally followed by any number of `)` (each closing one group).

use crate::address::{address, Address};
use crate::error::{Error, Result};
use crate::forest::Edge;
use nom::{
    IResult, Parser,
    character::complete::char,
    combinator::{all_consuming, opt},
    multi::many0_count,
};
use tracing::trace;

/// A single notation token
#[derive(Debug, PartialEq, Eq)]
struct Token {
    opens: bool,
    address: Address,
    closes: usize,
}

fn token(input: &str) -> IResult<&str, Token> {
    let (input, open) = opt(char('(')).parse(input)?;
    let (input, address) = address(input)?;
    let (input, closes) = many0_count(char(')')).parse(input)?;

    Ok((
        input,
        Token {
            opens: open.is_some(),
            address,
            closes,
        },
    ))
}

/// Parse bracket notation into parent/child links, in document order
///
/// The result may contain repeated or cyclic links; acyclicity is checked
/// by the forest when the links are installed.
pub fn parse_edges(text: &str) -> Result<Vec<Edge>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidNotation("empty input".into()));
    }
    if !trimmed.starts_with('(') || !trimmed.ends_with(')') {
        return Err(Error::InvalidNotation(format!(
            "'{}' is not wrapped in ( ... )",
            trimmed
        )));
    }

    // Heads of the currently open groups, innermost last
    let mut parents: Vec<Address> = Vec::new();
    let mut edges = Vec::new();
    let mut closed = false;

    for raw in trimmed.split_whitespace() {
        if closed {
            return Err(Error::InvalidNotation(format!(
                "unexpected '{}' after the outer group closed",
                raw
            )));
        }

        let (_, token) = all_consuming(token)
            .parse(raw)
            .map_err(|_| Error::InvalidNotation(format!("malformed token '{}'", raw)))?;

        match parents.last() {
            Some(&parent) => edges.push(Edge::new(parent, token.address)),
            None if token.opens => {}
            None => {
                return Err(Error::InvalidNotation(format!(
                    "'{}' is outside of any group",
                    raw
                )));
            }
        }

        if token.opens {
            parents.push(token.address);
        }

        for _ in 0..token.closes {
            if parents.pop().is_none() {
                return Err(Error::InvalidNotation(format!(
                    "unbalanced ')' in '{}'",
                    raw
                )));
            }
        }

        closed = parents.is_empty();
    }

    if !parents.is_empty() {
        return Err(Error::InvalidNotation(format!(
            "{} group(s) left open",
            parents.len()
        )));
    }

    trace!(edges = edges.len(), "parsed bracket notation");
    Ok(edges)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ip(text: &str) -> Address {
        text.parse().unwrap()
    }

    fn edge(parent: &str, child: &str) -> Edge {
        Edge::new(ip(parent), ip(child))
    }

    #[test]
    fn test_token_shapes() {
        let (_, t) = token("(1.1.1.1").unwrap();
        assert_eq!(
            t,
            Token {
                opens: true,
                address: ip("1.1.1.1"),
                closes: 0
            }
        );

        let (_, t) = token("2.2.2.2)))").unwrap();
        assert!(!t.opens);
        assert_eq!(t.closes, 3);

        let (_, t) = token("(3.3.3.3)").unwrap();
        assert!(t.opens);
        assert_eq!(t.closes, 1);
    }

    #[test]
    fn test_parse_flat() {
        let edges = parse_edges("(1.1.1.1 2.2.2.2 3.3.3.3)").unwrap();
        assert_eq!(
            edges,
            vec![edge("1.1.1.1", "2.2.2.2"), edge("1.1.1.1", "3.3.3.3")]
        );
    }

    #[test]
    fn test_parse_nested() {
        let edges = parse_edges("(0.0.0.0 (1.1.1.1 2.2.2.2 3.3.3.3) (4.4.4.4 5.5.5.5))").unwrap();
        assert_eq!(
            edges,
            vec![
                edge("0.0.0.0", "1.1.1.1"),
                edge("1.1.1.1", "2.2.2.2"),
                edge("1.1.1.1", "3.3.3.3"),
                edge("0.0.0.0", "4.4.4.4"),
                edge("4.4.4.4", "5.5.5.5"),
            ]
        );
    }

    #[test]
    fn test_multiple_closing_parens_pop_one_level_each() {
        let edges = parse_edges(
            "(85.193.148.81 (141.255.1.133 34.49.145.239 (30.49.145.239 0.0.0.0 1.1.1.1)) 140.189.0.127)",
        )
        .unwrap();

        assert!(edges.contains(&edge("30.49.145.239", "1.1.1.1")));
        assert!(edges.contains(&edge("85.193.148.81", "140.189.0.127")));
        assert!(!edges.contains(&edge("141.255.1.133", "140.189.0.127")));
    }

    #[test]
    fn test_extra_whitespace() {
        let edges = parse_edges("  (1.1.1.1   2.2.2.2\n\t3.3.3.3)  ").unwrap();
        assert_eq!(edges.len(), 2);
    }

    #[test]
    fn test_invalid_notation() {
        for text in [
            "",
            "   ",
            "1.1.1.1 2.2.2.2",
            "(1.1.1.1 2.2.2.2",
            "(1.1.1.1 (2.2.2.2 3.3.3.3)",
            "(1.1.1.1 2.2.2.2))",
            "(1.1.1.1 2.2.2.2) (3.3.3.3 4.4.4.4)",
            "( 1.1.1.1 2.2.2.2 )",
            "((1.1.1.1 2.2.2.2))",
            "(1.1.1.1 2.2.2.256)",
            "(1.1.1.1 02.2.2.2)",
            "(1.1.1.1 2.2.2.2)x",
        ] {
            assert!(
                matches!(parse_edges(text), Err(Error::InvalidNotation(_))),
                "accepted '{}'",
                text
            );
        }
    }
}
