// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Object categories known to the switch abstraction.
//!
//! The numeric value of an [`ObjectType`] is what the identifier allocator
//! stores in the top 16 bits of every virtual object id, so the values are
//! part of the wire contract and must never be renumbered.

use std::fmt;
use std::str::FromStr;

/// How objects of a given category are addressed by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Addressing {
    /// Opaque 64-bit handle minted by the allocator on create.
    Handle,
    /// Natural key: (mac address, vlan id).
    FdbEntry,
    /// Natural key: (router interface, ip address).
    NeighborEntry,
    /// Natural key: (virtual router, destination prefix).
    RouteEntry,
    /// Natural key: bare vlan id.
    VlanId,
}

/// Hardware object category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum ObjectType {
    Null = 0,
    Port = 1,
    Lag = 2,
    VirtualRouter = 3,
    NextHop = 4,
    NextHopGroup = 5,
    RouterInterface = 6,
    AclTable = 7,
    AclEntry = 8,
    AclCounter = 9,
    HostInterface = 10,
    Mirror = 11,
    Samplepacket = 12,
    StpInstance = 13,
    TrapGroup = 14,
    Policer = 15,
    Wred = 16,
    QosMaps = 17,
    Queue = 18,
    Scheduler = 19,
    SchedulerGroup = 20,
    BufferPool = 21,
    BufferProfile = 22,
    PriorityGroup = 23,
    LagMember = 24,
    Hash = 25,
    Fdb = 26,
    Switch = 27,
    Neighbor = 28,
    Route = 29,
    Vlan = 30,
    VlanMember = 31,
    Tunnel = 32,
}

const ALL: [ObjectType; 33] = [
    ObjectType::Null,
    ObjectType::Port,
    ObjectType::Lag,
    ObjectType::VirtualRouter,
    ObjectType::NextHop,
    ObjectType::NextHopGroup,
    ObjectType::RouterInterface,
    ObjectType::AclTable,
    ObjectType::AclEntry,
    ObjectType::AclCounter,
    ObjectType::HostInterface,
    ObjectType::Mirror,
    ObjectType::Samplepacket,
    ObjectType::StpInstance,
    ObjectType::TrapGroup,
    ObjectType::Policer,
    ObjectType::Wred,
    ObjectType::QosMaps,
    ObjectType::Queue,
    ObjectType::Scheduler,
    ObjectType::SchedulerGroup,
    ObjectType::BufferPool,
    ObjectType::BufferProfile,
    ObjectType::PriorityGroup,
    ObjectType::LagMember,
    ObjectType::Hash,
    ObjectType::Fdb,
    ObjectType::Switch,
    ObjectType::Neighbor,
    ObjectType::Route,
    ObjectType::Vlan,
    ObjectType::VlanMember,
    ObjectType::Tunnel,
];

impl ObjectType {
    /// Every defined category, in numeric order.
    pub fn all() -> &'static [ObjectType] {
        &ALL
    }

    /// Numeric tag (safe: `#[repr(u16)]`).
    pub fn as_u16(self) -> u16 {
        self as u16
    }

    /// Look up a category by its numeric tag.
    pub fn from_u16(value: u16) -> Option<Self> {
        ALL.get(value as usize).copied()
    }

    /// Addressing scheme callers use for this category.
    pub fn addressing(self) -> Addressing {
        match self {
            Self::Fdb => Addressing::FdbEntry,
            Self::Neighbor => Addressing::NeighborEntry,
            Self::Route => Addressing::RouteEntry,
            Self::Vlan => Addressing::VlanId,
            _ => Addressing::Handle,
        }
    }

    /// Wire name, e.g. `SAI_OBJECT_TYPE_PORT`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Null => "SAI_OBJECT_TYPE_NULL",
            Self::Port => "SAI_OBJECT_TYPE_PORT",
            Self::Lag => "SAI_OBJECT_TYPE_LAG",
            Self::VirtualRouter => "SAI_OBJECT_TYPE_VIRTUAL_ROUTER",
            Self::NextHop => "SAI_OBJECT_TYPE_NEXT_HOP",
            Self::NextHopGroup => "SAI_OBJECT_TYPE_NEXT_HOP_GROUP",
            Self::RouterInterface => "SAI_OBJECT_TYPE_ROUTER_INTERFACE",
            Self::AclTable => "SAI_OBJECT_TYPE_ACL_TABLE",
            Self::AclEntry => "SAI_OBJECT_TYPE_ACL_ENTRY",
            Self::AclCounter => "SAI_OBJECT_TYPE_ACL_COUNTER",
            Self::HostInterface => "SAI_OBJECT_TYPE_HOST_INTERFACE",
            Self::Mirror => "SAI_OBJECT_TYPE_MIRROR",
            Self::Samplepacket => "SAI_OBJECT_TYPE_SAMPLEPACKET",
            Self::StpInstance => "SAI_OBJECT_TYPE_STP_INSTANCE",
            Self::TrapGroup => "SAI_OBJECT_TYPE_TRAP_GROUP",
            Self::Policer => "SAI_OBJECT_TYPE_POLICER",
            Self::Wred => "SAI_OBJECT_TYPE_WRED",
            Self::QosMaps => "SAI_OBJECT_TYPE_QOS_MAPS",
            Self::Queue => "SAI_OBJECT_TYPE_QUEUE",
            Self::Scheduler => "SAI_OBJECT_TYPE_SCHEDULER",
            Self::SchedulerGroup => "SAI_OBJECT_TYPE_SCHEDULER_GROUP",
            Self::BufferPool => "SAI_OBJECT_TYPE_BUFFER_POOL",
            Self::BufferProfile => "SAI_OBJECT_TYPE_BUFFER_PROFILE",
            Self::PriorityGroup => "SAI_OBJECT_TYPE_PRIORITY_GROUP",
            Self::LagMember => "SAI_OBJECT_TYPE_LAG_MEMBER",
            Self::Hash => "SAI_OBJECT_TYPE_HASH",
            Self::Fdb => "SAI_OBJECT_TYPE_FDB",
            Self::Switch => "SAI_OBJECT_TYPE_SWITCH",
            Self::Neighbor => "SAI_OBJECT_TYPE_NEIGHBOR",
            Self::Route => "SAI_OBJECT_TYPE_ROUTE",
            Self::Vlan => "SAI_OBJECT_TYPE_VLAN",
            Self::VlanMember => "SAI_OBJECT_TYPE_VLAN_MEMBER",
            Self::Tunnel => "SAI_OBJECT_TYPE_TUNNEL",
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ObjectType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL.iter().copied().find(|t| t.name() == s).ok_or(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_tags_follow_table_order() {
        for (i, t) in ObjectType::all().iter().enumerate() {
            assert_eq!(t.as_u16() as usize, i);
            assert_eq!(ObjectType::from_u16(i as u16), Some(*t));
        }
        assert_eq!(ObjectType::from_u16(999), None);
    }

    #[test]
    fn name_roundtrip() {
        for t in ObjectType::all() {
            assert_eq!(t.name().parse::<ObjectType>(), Ok(*t));
        }
        assert!("SAI_OBJECT_TYPE_BOGUS".parse::<ObjectType>().is_err());
    }

    #[test]
    fn natural_key_categories() {
        assert_eq!(ObjectType::Fdb.addressing(), Addressing::FdbEntry);
        assert_eq!(ObjectType::Neighbor.addressing(), Addressing::NeighborEntry);
        assert_eq!(ObjectType::Route.addressing(), Addressing::RouteEntry);
        assert_eq!(ObjectType::Vlan.addressing(), Addressing::VlanId);
        assert_eq!(ObjectType::Port.addressing(), Addressing::Handle);
    }
}
