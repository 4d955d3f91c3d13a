// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Wire keys: `<object-type>:<identifier>`.
//!
//! Examples:
//! - `SAI_OBJECT_TYPE_PORT:oid:0x100000000002a`
//! - `SAI_OBJECT_TYPE_FDB:{"mac":"00:11:22:33:44:55","vlan":10}`
//! - `SAI_OBJECT_TYPE_VLAN:100`
//!
//! Get responses append `:<status>` to the request key.

use crate::error::{SaiError, SaiResult};
use crate::object_type::{Addressing, ObjectType};
use crate::oid::ObjectId;
use crate::status::Status;
use crate::types::{FdbEntry, NeighborEntry, UnicastRouteEntry};

/// What identifies the target of a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierSource {
    ObjectId(ObjectId),
    Fdb(FdbEntry),
    Neighbor(NeighborEntry),
    Route(UnicastRouteEntry),
    Vlan(u16),
}

impl IdentifierSource {
    pub fn addressing(&self) -> Addressing {
        match self {
            Self::ObjectId(_) => Addressing::Handle,
            Self::Fdb(_) => Addressing::FdbEntry,
            Self::Neighbor(_) => Addressing::NeighborEntry,
            Self::Route(_) => Addressing::RouteEntry,
            Self::Vlan(_) => Addressing::VlanId,
        }
    }
}

impl From<ObjectId> for IdentifierSource {
    fn from(id: ObjectId) -> Self {
        Self::ObjectId(id)
    }
}

impl From<FdbEntry> for IdentifierSource {
    fn from(entry: FdbEntry) -> Self {
        Self::Fdb(entry)
    }
}

impl From<NeighborEntry> for IdentifierSource {
    fn from(entry: NeighborEntry) -> Self {
        Self::Neighbor(entry)
    }
}

impl From<UnicastRouteEntry> for IdentifierSource {
    fn from(entry: UnicastRouteEntry) -> Self {
        Self::Route(entry)
    }
}

/// Reject a source that cannot address `object_type`.
///
/// Handles must be non-null and carry the matching type tag.
pub fn check_source(object_type: ObjectType, source: &IdentifierSource) -> SaiResult<()> {
    if object_type == ObjectType::Null {
        return Err(SaiError::invalid("object type is NULL"));
    }

    if source.addressing() != object_type.addressing() {
        return Err(SaiError::invalid(format!(
            "{} is addressed by {:?}, got {:?}",
            object_type,
            object_type.addressing(),
            source.addressing()
        )));
    }

    if let IdentifierSource::ObjectId(id) = source {
        if id.is_null() {
            return Err(SaiError::invalid(format!("null object id for {}", object_type)));
        }
        if id.object_type() != Some(object_type) {
            return Err(SaiError::invalid(format!(
                "{} is not a {} handle",
                id, object_type
            )));
        }
    }
    Ok(())
}

fn to_json<T: serde::Serialize>(entry: &T) -> SaiResult<String> {
    serde_json::to_string(entry)
        .map_err(|e| SaiError::invalid(format!("entry serialization failed: {}", e)))
}

/// Serialized identifier, without the type prefix.
pub fn serialize_identifier(source: &IdentifierSource) -> SaiResult<String> {
    match source {
        IdentifierSource::ObjectId(id) => Ok(id.to_string()),
        IdentifierSource::Fdb(entry) => to_json(entry),
        IdentifierSource::Neighbor(entry) => to_json(entry),
        IdentifierSource::Route(entry) => to_json(entry),
        IdentifierSource::Vlan(vlan_id) => Ok(vlan_id.to_string()),
    }
}

/// `<object-type>:<identifier>`. Pure.
pub fn build_key(object_type: ObjectType, source: &IdentifierSource) -> SaiResult<String> {
    check_source(object_type, source)?;
    Ok(format!(
        "{}:{}",
        object_type.name(),
        serialize_identifier(source)?
    ))
}

/// Split a response key into the request key and the trailing status.
pub fn parse_response_key(key: &str) -> SaiResult<(&str, Status)> {
    let (base, status) = key
        .rsplit_once(':')
        .ok_or_else(|| SaiError::invalid(format!("response key {:?} has no status", key)))?;
    let status = Status::from_wire(status)
        .ok_or_else(|| SaiError::invalid(format!("response key {:?} has a bad status", key)))?;
    Ok((base, status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{IpPrefix, MacAddress};
    use std::net::{IpAddr, Ipv4Addr};

    #[test]
    fn handle_keys() {
        let id = ObjectId::compose(ObjectType::Port, 0x2a);
        let key = build_key(ObjectType::Port, &id.into()).expect("key");
        assert_eq!(key, "SAI_OBJECT_TYPE_PORT:oid:0x100000000002a");
    }

    #[test]
    fn entry_keys_are_compact_json() {
        let fdb = FdbEntry {
            mac_address: MacAddress([0, 0x11, 0x22, 0x33, 0x44, 0x55]),
            vlan_id: 10,
        };
        assert_eq!(
            build_key(ObjectType::Fdb, &fdb.into()).expect("fdb"),
            r#"SAI_OBJECT_TYPE_FDB:{"mac":"00:11:22:33:44:55","vlan":10}"#
        );

        let route = UnicastRouteEntry {
            vr_id: ObjectId::compose(ObjectType::VirtualRouter, 1),
            destination: IpPrefix::new(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 0)), 8).expect("prefix"),
        };
        assert_eq!(
            build_key(ObjectType::Route, &route.into()).expect("route"),
            r#"SAI_OBJECT_TYPE_ROUTE:{"vr":"oid:0x3000000000001","dest":"10.0.0.0/8"}"#
        );

        assert_eq!(
            build_key(ObjectType::Vlan, &IdentifierSource::Vlan(100)).expect("vlan"),
            "SAI_OBJECT_TYPE_VLAN:100"
        );
    }

    #[test]
    fn addressing_must_match() {
        let id = ObjectId::compose(ObjectType::Port, 1);
        assert!(build_key(ObjectType::Fdb, &id.into()).is_err());
        assert!(build_key(ObjectType::Port, &IdentifierSource::Vlan(1)).is_err());
        // Handle of the wrong type.
        assert!(build_key(ObjectType::Lag, &id.into()).is_err());
        assert!(build_key(ObjectType::Port, &ObjectId::NULL.into()).is_err());
    }

    #[test]
    fn response_key_status() {
        let (base, status) =
            parse_response_key("SAI_OBJECT_TYPE_PORT:oid:0x100000000002a:-8").expect("parse");
        assert_eq!(base, "SAI_OBJECT_TYPE_PORT:oid:0x100000000002a");
        assert_eq!(status, Status::BUFFER_OVERFLOW);

        let (_, status) = parse_response_key("SAI_OBJECT_TYPE_VLAN:100:0").expect("parse");
        assert!(status.is_success());

        assert!(parse_response_key("nocolon").is_err());
        assert!(parse_response_key("SAI_OBJECT_TYPE_VLAN:100:ok").is_err());
    }
}
