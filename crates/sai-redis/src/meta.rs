// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Attribute metadata: which wire kind each (object type, attribute id) uses.
//!
//! The lookup itself is a trait so deployments can plug in a generated table.
//! [`MetadataTable::standard`] registers the attributes this crate's callers
//! and tests use.

use crate::object_type::ObjectType;
use std::collections::HashMap;

/// Wire-serialization kind of an attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SerializationKind {
    Bool,
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    U64,
    I64,
    Mac,
    Ipv4,
    Ipv6,
    IpAddress,
    IpPrefix,
    ObjectId,
    ObjectList,
    U8List,
    U32List,
    I32List,
    VlanList,
    U32Range,
    I32Range,
}

impl SerializationKind {
    pub fn is_list(self) -> bool {
        matches!(
            self,
            Self::ObjectList | Self::U8List | Self::U32List | Self::I32List | Self::VlanList
        )
    }
}

/// Per-type attribute metadata lookup.
pub trait MetadataLookup: Send + Sync {
    /// `None` when the pair is not registered.
    fn kind(&self, object_type: ObjectType, attr_id: u32) -> Option<SerializationKind>;
}

/// Attribute ids, grouped by object type.
pub mod attr {
    pub mod switch {
        pub const PORT_NUMBER: u32 = 0;
        pub const PORT_LIST: u32 = 1;
        pub const CPU_PORT: u32 = 2;
        pub const SRC_MAC_ADDRESS: u32 = 3;
        pub const DEFAULT_VIRTUAL_ROUTER_ID: u32 = 4;
        pub const FDB_AGING_TIME: u32 = 5;
        pub const SWITCH_HARDWARE_INFO: u32 = 6;
        pub const FDB_USER_META_DATA_RANGE: u32 = 7;
        pub const ACL_ENTRY_PRIORITY_RANGE: u32 = 8;
    }

    pub mod port {
        pub const TYPE: u32 = 0;
        pub const OPER_STATUS: u32 = 1;
        pub const HW_LANE_LIST: u32 = 2;
        pub const SPEED: u32 = 3;
        pub const ADMIN_STATE: u32 = 4;
        pub const MTU: u32 = 5;
        pub const PORT_VLAN_ID: u32 = 6;
        pub const MEDIA_TYPE: u32 = 7;
        pub const SUPPORTED_SPEED: u32 = 8;
        pub const QOS_QUEUE_LIST: u32 = 9;
        pub const PRIORITY_FLOW_CONTROL: u32 = 10;
        pub const INGRESS_ACL: u32 = 11;
    }

    pub mod lag {
        pub const PORT_LIST: u32 = 0;
    }

    pub mod lag_member {
        pub const LAG_ID: u32 = 0;
        pub const PORT_ID: u32 = 1;
    }

    pub mod virtual_router {
        pub const ADMIN_V4_STATE: u32 = 0;
        pub const ADMIN_V6_STATE: u32 = 1;
        pub const SRC_MAC_ADDRESS: u32 = 2;
    }

    pub mod router_interface {
        pub const VIRTUAL_ROUTER_ID: u32 = 0;
        pub const TYPE: u32 = 1;
        pub const PORT_ID: u32 = 2;
        pub const VLAN_ID: u32 = 3;
        pub const SRC_MAC_ADDRESS: u32 = 4;
        pub const MTU: u32 = 5;
    }

    pub mod next_hop {
        pub const TYPE: u32 = 0;
        pub const IP: u32 = 1;
        pub const ROUTER_INTERFACE_ID: u32 = 2;
    }

    pub mod next_hop_group {
        pub const NEXT_HOP_COUNT: u32 = 0;
        pub const TYPE: u32 = 1;
        pub const NEXT_HOP_LIST: u32 = 2;
    }

    pub mod neighbor {
        pub const DST_MAC_ADDRESS: u32 = 0;
        pub const PACKET_ACTION: u32 = 1;
        pub const NO_HOST_ROUTE: u32 = 2;
    }

    pub mod route {
        pub const PACKET_ACTION: u32 = 0;
        pub const TRAP_PRIORITY: u32 = 1;
        pub const NEXT_HOP_ID: u32 = 2;
    }

    pub mod fdb {
        pub const TYPE: u32 = 0;
        pub const PORT_ID: u32 = 1;
        pub const PACKET_ACTION: u32 = 2;
        pub const META_DATA: u32 = 3;
    }

    pub mod vlan {
        pub const MEMBER_LIST: u32 = 0;
        pub const MAX_LEARNED_ADDRESSES: u32 = 1;
        pub const STP_INSTANCE: u32 = 2;
        pub const LEARN_DISABLE: u32 = 3;
    }

    pub mod vlan_member {
        pub const VLAN_ID: u32 = 0;
        pub const PORT_ID: u32 = 1;
        pub const TAGGING_MODE: u32 = 2;
    }

    pub mod stp_instance {
        pub const VLAN_LIST: u32 = 0;
    }

    pub mod host_interface {
        pub const TYPE: u32 = 0;
        pub const RIF_OR_PORT_ID: u32 = 1;
        pub const OPER_STATUS: u32 = 3;
    }

    pub mod acl_table {
        pub const STAGE: u32 = 0;
        pub const PRIORITY: u32 = 1;
        pub const SIZE: u32 = 2;
        pub const FIELD_SRC_IPV6: u32 = 3;
        pub const FIELD_DST_IPV6: u32 = 4;
        pub const FIELD_SRC_IP: u32 = 5;
    }

    pub mod acl_entry {
        pub const TABLE_ID: u32 = 0;
        pub const PRIORITY: u32 = 1;
        pub const FIELD_SRC_IPV4: u32 = 2;
        pub const FIELD_SRC_IPV6: u32 = 3;
        pub const ADMIN_STATE: u32 = 4;
    }

    pub mod acl_counter {
        pub const TABLE_ID: u32 = 0;
        pub const PACKETS: u32 = 1;
        pub const BYTES: u32 = 2;
    }

    pub mod queue {
        pub const TYPE: u32 = 0;
        pub const WRED_PROFILE_ID: u32 = 1;
        pub const BUFFER_PROFILE_ID: u32 = 2;
        pub const SCHEDULER_PROFILE_ID: u32 = 3;
    }

    pub mod policer {
        pub const METER_TYPE: u32 = 0;
        pub const MODE: u32 = 1;
        pub const CBS: u32 = 2;
        pub const CIR: u32 = 3;
        pub const PBS: u32 = 4;
        pub const PIR: u32 = 5;
    }

    pub mod tunnel {
        pub const TYPE: u32 = 0;
        pub const UNDERLAY_INTERFACE: u32 = 1;
        pub const ENCAP_SRC_IP: u32 = 2;
        pub const ENCAP_TTL_VAL: u32 = 3;
        pub const DECAP_TTL_MODE: u32 = 4;
    }
}

/// In-memory metadata registry.
#[derive(Debug, Clone, Default)]
pub struct MetadataTable {
    entries: HashMap<(ObjectType, u32), SerializationKind>,
}

impl MetadataTable {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pair, returning the kind it replaced.
    pub fn register(
        &mut self,
        object_type: ObjectType,
        attr_id: u32,
        kind: SerializationKind,
    ) -> Option<SerializationKind> {
        self.entries.insert((object_type, attr_id), kind)
    }

    /// Builder form of [`register`](Self::register).
    pub fn with(mut self, object_type: ObjectType, attr_id: u32, kind: SerializationKind) -> Self {
        self.register(object_type, attr_id, kind);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Table covering the attributes in [`attr`].
    pub fn standard() -> Self {
        use ObjectType as T;
        use SerializationKind as K;

        let rows: &[(ObjectType, u32, SerializationKind)] = &[
            (T::Switch, attr::switch::PORT_NUMBER, K::U32),
            (T::Switch, attr::switch::PORT_LIST, K::ObjectList),
            (T::Switch, attr::switch::CPU_PORT, K::ObjectId),
            (T::Switch, attr::switch::SRC_MAC_ADDRESS, K::Mac),
            (T::Switch, attr::switch::DEFAULT_VIRTUAL_ROUTER_ID, K::ObjectId),
            (T::Switch, attr::switch::FDB_AGING_TIME, K::U32),
            (T::Switch, attr::switch::SWITCH_HARDWARE_INFO, K::U8List),
            (T::Switch, attr::switch::FDB_USER_META_DATA_RANGE, K::U32Range),
            (T::Switch, attr::switch::ACL_ENTRY_PRIORITY_RANGE, K::I32Range),
            (T::Port, attr::port::TYPE, K::I32),
            (T::Port, attr::port::OPER_STATUS, K::I32),
            (T::Port, attr::port::HW_LANE_LIST, K::U32List),
            (T::Port, attr::port::SPEED, K::U32),
            (T::Port, attr::port::ADMIN_STATE, K::Bool),
            (T::Port, attr::port::MTU, K::U32),
            (T::Port, attr::port::PORT_VLAN_ID, K::U16),
            (T::Port, attr::port::MEDIA_TYPE, K::I32),
            (T::Port, attr::port::SUPPORTED_SPEED, K::U32List),
            (T::Port, attr::port::QOS_QUEUE_LIST, K::ObjectList),
            (T::Port, attr::port::PRIORITY_FLOW_CONTROL, K::U8),
            (T::Port, attr::port::INGRESS_ACL, K::ObjectId),
            (T::Lag, attr::lag::PORT_LIST, K::ObjectList),
            (T::LagMember, attr::lag_member::LAG_ID, K::ObjectId),
            (T::LagMember, attr::lag_member::PORT_ID, K::ObjectId),
            (T::VirtualRouter, attr::virtual_router::ADMIN_V4_STATE, K::Bool),
            (T::VirtualRouter, attr::virtual_router::ADMIN_V6_STATE, K::Bool),
            (T::VirtualRouter, attr::virtual_router::SRC_MAC_ADDRESS, K::Mac),
            (T::RouterInterface, attr::router_interface::VIRTUAL_ROUTER_ID, K::ObjectId),
            (T::RouterInterface, attr::router_interface::TYPE, K::I32),
            (T::RouterInterface, attr::router_interface::PORT_ID, K::ObjectId),
            (T::RouterInterface, attr::router_interface::VLAN_ID, K::U16),
            (T::RouterInterface, attr::router_interface::SRC_MAC_ADDRESS, K::Mac),
            (T::RouterInterface, attr::router_interface::MTU, K::U32),
            (T::NextHop, attr::next_hop::TYPE, K::I32),
            (T::NextHop, attr::next_hop::IP, K::IpAddress),
            (T::NextHop, attr::next_hop::ROUTER_INTERFACE_ID, K::ObjectId),
            (T::NextHopGroup, attr::next_hop_group::NEXT_HOP_COUNT, K::U32),
            (T::NextHopGroup, attr::next_hop_group::TYPE, K::I32),
            (T::NextHopGroup, attr::next_hop_group::NEXT_HOP_LIST, K::ObjectList),
            (T::Neighbor, attr::neighbor::DST_MAC_ADDRESS, K::Mac),
            (T::Neighbor, attr::neighbor::PACKET_ACTION, K::I32),
            (T::Neighbor, attr::neighbor::NO_HOST_ROUTE, K::Bool),
            (T::Route, attr::route::PACKET_ACTION, K::I32),
            (T::Route, attr::route::TRAP_PRIORITY, K::U8),
            (T::Route, attr::route::NEXT_HOP_ID, K::ObjectId),
            (T::Fdb, attr::fdb::TYPE, K::I32),
            (T::Fdb, attr::fdb::PORT_ID, K::ObjectId),
            (T::Fdb, attr::fdb::PACKET_ACTION, K::I32),
            (T::Fdb, attr::fdb::META_DATA, K::U32),
            (T::Vlan, attr::vlan::MEMBER_LIST, K::ObjectList),
            (T::Vlan, attr::vlan::MAX_LEARNED_ADDRESSES, K::U32),
            (T::Vlan, attr::vlan::STP_INSTANCE, K::ObjectId),
            (T::Vlan, attr::vlan::LEARN_DISABLE, K::Bool),
            (T::VlanMember, attr::vlan_member::VLAN_ID, K::U16),
            (T::VlanMember, attr::vlan_member::PORT_ID, K::ObjectId),
            (T::VlanMember, attr::vlan_member::TAGGING_MODE, K::I32),
            (T::StpInstance, attr::stp_instance::VLAN_LIST, K::VlanList),
            (T::HostInterface, attr::host_interface::TYPE, K::I32),
            (T::HostInterface, attr::host_interface::RIF_OR_PORT_ID, K::ObjectId),
            (T::HostInterface, attr::host_interface::OPER_STATUS, K::Bool),
            (T::AclTable, attr::acl_table::STAGE, K::I32),
            (T::AclTable, attr::acl_table::PRIORITY, K::U32),
            (T::AclTable, attr::acl_table::SIZE, K::U32),
            (T::AclTable, attr::acl_table::FIELD_SRC_IPV6, K::Bool),
            (T::AclTable, attr::acl_table::FIELD_DST_IPV6, K::Bool),
            (T::AclTable, attr::acl_table::FIELD_SRC_IP, K::Bool),
            (T::AclEntry, attr::acl_entry::TABLE_ID, K::ObjectId),
            (T::AclEntry, attr::acl_entry::PRIORITY, K::U32),
            (T::AclEntry, attr::acl_entry::FIELD_SRC_IPV4, K::Ipv4),
            (T::AclEntry, attr::acl_entry::FIELD_SRC_IPV6, K::Ipv6),
            (T::AclEntry, attr::acl_entry::ADMIN_STATE, K::Bool),
            (T::AclCounter, attr::acl_counter::TABLE_ID, K::ObjectId),
            (T::AclCounter, attr::acl_counter::PACKETS, K::U64),
            (T::AclCounter, attr::acl_counter::BYTES, K::U64),
            (T::Queue, attr::queue::TYPE, K::I32),
            (T::Queue, attr::queue::WRED_PROFILE_ID, K::ObjectId),
            (T::Queue, attr::queue::BUFFER_PROFILE_ID, K::ObjectId),
            (T::Queue, attr::queue::SCHEDULER_PROFILE_ID, K::ObjectId),
            (T::Policer, attr::policer::METER_TYPE, K::I32),
            (T::Policer, attr::policer::MODE, K::I32),
            (T::Policer, attr::policer::CBS, K::U64),
            (T::Policer, attr::policer::CIR, K::U64),
            (T::Policer, attr::policer::PBS, K::U64),
            (T::Policer, attr::policer::PIR, K::U64),
            (T::Tunnel, attr::tunnel::TYPE, K::I32),
            (T::Tunnel, attr::tunnel::UNDERLAY_INTERFACE, K::ObjectId),
            (T::Tunnel, attr::tunnel::ENCAP_SRC_IP, K::IpAddress),
            (T::Tunnel, attr::tunnel::ENCAP_TTL_VAL, K::U8),
            (T::Tunnel, attr::tunnel::DECAP_TTL_MODE, K::I32),
        ];

        let mut table = Self::new();
        for &(object_type, attr_id, kind) in rows {
            table.register(object_type, attr_id, kind);
        }
        table
    }
}

impl MetadataLookup for MetadataTable {
    fn kind(&self, object_type: ObjectType, attr_id: u32) -> Option<SerializationKind> {
        self.entries.get(&(object_type, attr_id)).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_lookups() {
        let meta = MetadataTable::standard();
        assert_eq!(
            meta.kind(ObjectType::Port, attr::port::SPEED),
            Some(SerializationKind::U32)
        );
        assert_eq!(
            meta.kind(ObjectType::Switch, attr::switch::PORT_LIST),
            Some(SerializationKind::ObjectList)
        );
        assert_eq!(meta.kind(ObjectType::Port, 9999), None);
        // Same id, different type, different kind.
        assert_eq!(
            meta.kind(ObjectType::Route, attr::route::PACKET_ACTION),
            Some(SerializationKind::I32)
        );
        assert_eq!(
            meta.kind(ObjectType::Vlan, 0),
            Some(SerializationKind::ObjectList)
        );
    }

    #[test]
    fn register_replaces() {
        let mut meta = MetadataTable::new();
        assert!(meta.is_empty());
        assert_eq!(meta.register(ObjectType::Port, 1, SerializationKind::U8), None);
        assert_eq!(
            meta.register(ObjectType::Port, 1, SerializationKind::U16),
            Some(SerializationKind::U8)
        );
        assert_eq!(meta.len(), 1);
    }
}
