//! Topology kinds and their short codes.
//!
//! Codes are the stable wire form used in share links and saved scenarios.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// The rule governing how links form as agents join.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Topology {
    /// Each joining agent links to at most `k` existing agents.
    #[default]
    BoundedDegree,
    /// Every pair of agents is linked.
    FullMesh,
    /// Every agent links to a hub, plus up to `k - 1` peers.
    HubAndSpoke,
    /// Agents form a chain.
    Pipeline,
}

impl Topology {
    /// All topologies, in display order.
    pub const ALL: [Self; 4] = [
        Self::BoundedDegree,
        Self::FullMesh,
        Self::HubAndSpoke,
        Self::Pipeline,
    ];

    /// Short code used in URLs and persisted data.
    pub const fn code(&self) -> &'static str {
        match self {
            Topology::BoundedDegree => "bounded",
            Topology::FullMesh => "mesh",
            Topology::HubAndSpoke => "hub",
            Topology::Pipeline => "pipeline",
        }
    }

    /// Human-readable label.
    pub const fn label(&self) -> &'static str {
        match self {
            Topology::BoundedDegree => "Bounded degree",
            Topology::FullMesh => "Full mesh",
            Topology::HubAndSpoke => "Hub and spoke",
            Topology::Pipeline => "Pipeline",
        }
    }

    /// Look up a topology by code, ignoring case and surrounding whitespace.
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.code().eq_ignore_ascii_case(code))
    }

    /// Whether the connection cap affects this topology's edge count at all.
    pub const fn uses_cap(&self) -> bool {
        !matches!(self, Topology::FullMesh)
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Topology {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| Error::UnknownTopology(s.to_string()))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Topology {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Topology {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        code.parse().map_err(serde::de::Error::custom)
    }
}
