//! Node kinds and device types.
//!
//! The endpoint category table is closed: names outside it are rejected with
//! [`WfError::Configuration`] rather than mapped to a default.

use core::fmt;
use core::str::FromStr;

use crate::error::WfError;

/// Leaf consumption point category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EndpointCategory {
    Home,
    Factory,
    #[cfg_attr(feature = "serde", serde(rename = "Agricultural_Channel"))]
    AgriculturalChannel,
    #[cfg_attr(feature = "serde", serde(rename = "Fire_Hydrant"))]
    FireHydrant,
}

impl EndpointCategory {
    /// Construction order used when populating a local junction.
    pub const ALL: [EndpointCategory; 4] = [
        EndpointCategory::Home,
        EndpointCategory::Factory,
        EndpointCategory::AgriculturalChannel,
        EndpointCategory::FireHydrant,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EndpointCategory::Home => "Home",
            EndpointCategory::Factory => "Factory",
            EndpointCategory::AgriculturalChannel => "Agricultural_Channel",
            EndpointCategory::FireHydrant => "Fire_Hydrant",
        }
    }
}

impl fmt::Display for EndpointCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for EndpointCategory {
    type Err = WfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EndpointCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s.trim())
            .ok_or_else(|| WfError::Configuration {
                message: format!("unknown endpoint category '{s}'"),
            })
    }
}

/// Role of an aggregation node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum JunctionRole {
    Master,
    Local,
}

impl JunctionRole {
    pub fn as_str(self) -> &'static str {
        match self {
            JunctionRole::Master => "Master",
            JunctionRole::Local => "Local",
        }
    }
}

/// The `type` column of a flow record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeType {
    Endpoint,
    Junction,
}

impl NodeType {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeType::Endpoint => "Endpoint",
            NodeType::Junction => "Junction",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `device_type` column of a flow record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeviceType {
    Home,
    Factory,
    #[cfg_attr(feature = "serde", serde(rename = "Agricultural_Channel"))]
    AgriculturalChannel,
    #[cfg_attr(feature = "serde", serde(rename = "Fire_Hydrant"))]
    FireHydrant,
    Local,
    Master,
}

impl DeviceType {
    pub fn node_type(self) -> NodeType {
        match self {
            DeviceType::Local | DeviceType::Master => NodeType::Junction,
            _ => NodeType::Endpoint,
        }
    }

    pub fn category(self) -> Option<EndpointCategory> {
        match self {
            DeviceType::Home => Some(EndpointCategory::Home),
            DeviceType::Factory => Some(EndpointCategory::Factory),
            DeviceType::AgriculturalChannel => Some(EndpointCategory::AgriculturalChannel),
            DeviceType::FireHydrant => Some(EndpointCategory::FireHydrant),
            DeviceType::Local | DeviceType::Master => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DeviceType::Local => JunctionRole::Local.as_str(),
            DeviceType::Master => JunctionRole::Master.as_str(),
            other => other.category().map_or("", EndpointCategory::as_str),
        }
    }
}

impl From<EndpointCategory> for DeviceType {
    fn from(c: EndpointCategory) -> Self {
        match c {
            EndpointCategory::Home => DeviceType::Home,
            EndpointCategory::Factory => DeviceType::Factory,
            EndpointCategory::AgriculturalChannel => DeviceType::AgriculturalChannel,
            EndpointCategory::FireHydrant => DeviceType::FireHydrant,
        }
    }
}

impl From<JunctionRole> for DeviceType {
    fn from(r: JunctionRole) -> Self {
        match r {
            JunctionRole::Master => DeviceType::Master,
            JunctionRole::Local => DeviceType::Local,
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
