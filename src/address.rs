//! IPv4 addresses used as forest members
//!
//! Provides:
//! - Strict dotted-quad parsing (no leading zeros, octets up to 255)
//! - Octet-wise total order
//! - Canonical `a.b.c.d` rendering

use crate::error::{Error, Result};
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while_m_n},
    character::complete::{char, one_of},
    combinator::{all_consuming, map_res, recognize},
    sequence::pair,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// A validated four-octet address
///
/// Ordering compares octets most-significant first, so `2.0.0.0` sorts
/// before `10.0.0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(Ipv4Addr);

impl Address {
    /// Build an address from its four octets
    pub const fn new(a: u8, b: u8, c: u8, d: u8) -> Self {
        Self(Ipv4Addr::new(a, b, c, d))
    }

    /// The four octets, most significant first
    pub fn octets(&self) -> [u8; 4] {
        self.0.octets()
    }

    /// Parse an address from text, rejecting blank input and non-canonical octets
    pub fn parse(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Err(Error::InvalidFormat(text.to_string()));
        }

        all_consuming(address)
            .parse(text)
            .map(|(_, addr)| addr)
            .map_err(|_| Error::InvalidFormat(text.to_string()))
    }
}

// Nom parsers for dotted-quad text

/// A single octet: `0`, or a non-zero digit followed by up to two digits, at most 255
fn octet(input: &str) -> IResult<&str, u8> {
    map_res(
        alt((
            recognize(pair(
                one_of("123456789"),
                take_while_m_n(0, 2, |c: char| c.is_ascii_digit()),
            )),
            tag("0"),
        )),
        str::parse::<u8>,
    )
    .parse(input)
}

/// Four dot-separated octets; used by the notation tokenizer as well
pub(crate) fn address(input: &str) -> IResult<&str, Address> {
    let (input, a) = octet(input)?;
    let (input, _) = char('.').parse(input)?;
    let (input, b) = octet(input)?;
    let (input, _) = char('.').parse(input)?;
    let (input, c) = octet(input)?;
    let (input, _) = char('.').parse(input)?;
    let (input, d) = octet(input)?;

    Ok((input, Address::new(a, b, c, d)))
}

impl FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Address {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Address> for String {
    fn from(addr: Address) -> Self {
        addr.to_string()
    }
}

impl From<Ipv4Addr> for Address {
    fn from(addr: Ipv4Addr) -> Self {
        Self(addr)
    }
}

impl From<Address> for Ipv4Addr {
    fn from(addr: Address) -> Self {
        addr.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.octets();
        write!(f, "{}.{}.{}.{}", a, b, c, d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        for text in [
            "0.0.0.0",
            "1.2.3.4",
            "99.99.99.99",
            "199.199.199.199",
            "34.49.145.249",
            "252.29.23.0",
            "255.255.255.255",
            "78.203.0.0",
        ] {
            let addr: Address = text.parse().unwrap();
            assert_eq!(addr.to_string(), text);
        }
    }

    #[test]
    fn test_parse_invalid() {
        for text in [
            "",
            "  ",
            "03.0.0.0",
            "1.02.3.4",
            "99.99.099.99",
            "199.199.199.099",
            "256.255.255.255",
            "1.2.3",
            "1.2.3.4.5",
            "1.2.3.4 ",
            "1234.1.1.1",
            "a.b.c.d",
        ] {
            assert!(
                matches!(Address::parse(text), Err(Error::InvalidFormat(_))),
                "accepted '{}'",
                text
            );
        }
    }

    #[test]
    fn test_order_is_numeric() {
        let small: Address = "2.0.0.0".parse().unwrap();
        let large: Address = "10.0.0.0".parse().unwrap();
        assert!(small < large);
        assert!(small.to_string() > large.to_string());

        let a: Address = "1.1.1.2".parse().unwrap();
        let b: Address = "1.1.2.1".parse().unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_address_parser_leaves_remainder() {
        let (rest, addr) = address("10.0.0.1))").unwrap();
        assert_eq!(rest, "))");
        assert_eq!(addr, Address::new(10, 0, 0, 1));
    }

    #[test]
    fn test_serde_string_form() {
        let addr = Address::new(192, 168, 0, 1);
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, "\"192.168.0.1\"");

        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
        assert!(serde_json::from_str::<Address>("\"192.168.00.1\"").is_err());
    }
}
