//! Port model.
//!
//! This module defines the closed set of South African commercial ports
//! the tariff book prices.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// A port operated under the tariff book.
///
/// The serialized form is the exact identifier used as a key in the
/// tariff configuration (e.g. `"Richards_Bay"`). Parsing with
/// [`str::parse`] also accepts the spellings found in free text.
///
/// # Examples
///
/// ```
/// use port_tariff_engine::models::Port;
///
/// let port: Port = " Cape Town ".parse().unwrap();
/// assert_eq!(port, Port::CapeTown);
/// assert_eq!(port.to_string(), "Cape_Town");
/// assert!("Walvis Bay".parse::<Port>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Port {
    /// Port of Durban.
    #[serde(rename = "Durban")]
    Durban,
    /// Port of Cape Town.
    #[serde(rename = "Cape_Town")]
    CapeTown,
    /// Port of Richards Bay.
    #[serde(rename = "Richards_Bay")]
    RichardsBay,
    /// Port of Ngqura.
    #[serde(rename = "Ngqura")]
    Ngqura,
    /// Port of Port Elizabeth (Gqeberha).
    #[serde(rename = "Port_Elizabeth")]
    PortElizabeth,
    /// Port of Saldanha.
    #[serde(rename = "Saldanha")]
    Saldanha,
    /// Port of East London.
    #[serde(rename = "East_London")]
    EastLondon,
    /// Port of Mossel Bay.
    #[serde(rename = "Mossel_Bay")]
    MosselBay,
}

impl Port {
    /// All supported ports, in tariff book order.
    pub const ALL: [Port; 8] = [
        Port::Durban,
        Port::CapeTown,
        Port::RichardsBay,
        Port::Ngqura,
        Port::PortElizabeth,
        Port::Saldanha,
        Port::EastLondon,
        Port::MosselBay,
    ];

    /// Returns the configuration identifier of the port.
    pub fn as_str(&self) -> &'static str {
        match self {
            Port::Durban => "Durban",
            Port::CapeTown => "Cape_Town",
            Port::RichardsBay => "Richards_Bay",
            Port::Ngqura => "Ngqura",
            Port::PortElizabeth => "Port_Elizabeth",
            Port::Saldanha => "Saldanha",
            Port::EastLondon => "East_London",
            Port::MosselBay => "Mossel_Bay",
        }
    }

    /// Returns true for the ports billed at the Durban/Saldanha VTS rate.
    pub fn is_major_vts_port(&self) -> bool {
        matches!(self, Port::Durban | Port::Saldanha)
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses a port name, tolerating the spellings found in free text.
///
/// Spaces become underscores and apostrophes are dropped, so
/// `"Richards Bay"` and `"Richard's_Bay"` style inputs resolve. Matching is
/// otherwise exact against the configuration identifiers.
impl FromStr for Port {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace(' ', "_").replace('\'', "");
        Port::ALL
            .iter()
            .copied()
            .find(|port| port.as_str() == normalized)
            .ok_or_else(|| EngineError::InvalidPort {
                value: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_exact_identifiers() {
        for port in Port::ALL {
            assert_eq!(port.as_str().parse::<Port>().unwrap(), port);
        }
    }

    #[test]
    fn test_parse_normalizes_spaces_and_apostrophes() {
        assert_eq!("Port Elizabeth".parse::<Port>().unwrap(), Port::PortElizabeth);
        assert_eq!("  Mossel Bay".parse::<Port>().unwrap(), Port::MosselBay);
        assert_eq!("Richard's Bay".parse::<Port>().unwrap(), Port::RichardsBay);
    }

    #[test]
    fn test_parse_unknown_port_returns_error() {
        match "Walvis Bay".parse::<Port>() {
            Err(EngineError::InvalidPort { value }) => assert_eq!(value, "Walvis Bay"),
            other => panic!("Expected InvalidPort error, got {:?}", other),
        }
    }

    #[test]
    fn test_serde_uses_config_identifiers() {
        let json = serde_json::to_string(&Port::EastLondon).unwrap();
        assert_eq!(json, "\"East_London\"");

        let port: Port = serde_json::from_str("\"Cape_Town\"").unwrap();
        assert_eq!(port, Port::CapeTown);
    }

    #[test]
    fn test_major_vts_ports() {
        let major: Vec<Port> = Port::ALL
            .iter()
            .copied()
            .filter(Port::is_major_vts_port)
            .collect();
        assert_eq!(major, vec![Port::Durban, Port::Saldanha]);
    }
}
