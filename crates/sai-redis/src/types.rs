// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Attribute values and composite entry keys.
//!
//! An [`Attribute`] carries no kind tag of its own. The serialization kind is
//! always taken from the metadata table for the (object type, attribute id)
//! pair, and the value variant must agree with it.

use crate::oid::ObjectId;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

/// 48-bit MAC address, wire form `aa:bb:cc:dd:ee:ff`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MacAddress(pub [u8; 6]);

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = &self.0;
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            m[0], m[1], m[2], m[3], m[4], m[5]
        )
    }
}

impl FromStr for MacAddress {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut mac = [0u8; 6];
        let mut parts = s.split(':');
        for byte in mac.iter_mut() {
            let part = parts.next().ok_or_else(|| format!("short mac {:?}", s))?;
            if part.len() != 2 {
                return Err(format!("bad mac octet {:?}", part));
            }
            *byte = u8::from_str_radix(part, 16).map_err(|e| e.to_string())?;
        }
        if parts.next().is_some() {
            return Err(format!("long mac {:?}", s));
        }
        Ok(MacAddress(mac))
    }
}

/// IP prefix, wire form `addr/len`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IpPrefix {
    pub addr: IpAddr,
    pub len: u8,
}

impl IpPrefix {
    /// Returns `None` when `len` exceeds the address width.
    pub fn new(addr: IpAddr, len: u8) -> Option<Self> {
        let max = if addr.is_ipv4() { 32 } else { 128 };
        (len <= max).then_some(Self { addr, len })
    }
}

impl fmt::Display for IpPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.addr, self.len)
    }
}

impl FromStr for IpPrefix {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (addr, len) = s
            .split_once('/')
            .ok_or_else(|| format!("prefix {:?} has no length", s))?;
        let addr: IpAddr = addr.parse().map_err(|e: std::net::AddrParseError| e.to_string())?;
        let len: u8 = len.parse().map_err(|e: std::num::ParseIntError| e.to_string())?;
        IpPrefix::new(addr, len).ok_or_else(|| format!("prefix length {} out of range", len))
    }
}

macro_rules! string_serde {
    ($ty:ty) => {
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(de::Error::custom)
            }
        }
    };
}

string_serde!(MacAddress);
string_serde!(IpPrefix);

/// Forwarding database entry key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FdbEntry {
    #[serde(rename = "mac")]
    pub mac_address: MacAddress,
    #[serde(rename = "vlan")]
    pub vlan_id: u16,
}

/// Neighbor table entry key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NeighborEntry {
    #[serde(rename = "rif")]
    pub rif_id: ObjectId,
    #[serde(rename = "ip")]
    pub ip_address: IpAddr,
}

/// Unicast route entry key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnicastRouteEntry {
    #[serde(rename = "vr")]
    pub vr_id: ObjectId,
    #[serde(rename = "dest")]
    pub destination: IpPrefix,
}

/// Caller-owned list buffer.
///
/// `items.len()` is the capacity the caller preallocated; `count` is the
/// number of meaningful elements. On a get, `count` may come back larger than
/// the capacity, in which case the caller must grow the buffer and retry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValueList<T> {
    pub count: u32,
    pub items: Vec<T>,
}

impl<T> ValueList<T> {
    /// List whose count equals the number of supplied elements.
    pub fn from_vec(items: Vec<T>) -> Self {
        Self {
            count: items.len() as u32,
            items,
        }
    }

    pub fn capacity(&self) -> usize {
        self.items.len()
    }

    /// Meaningful elements, clamped to storage.
    pub fn as_slice(&self) -> &[T] {
        let n = (self.count as usize).min(self.items.len());
        &self.items[..n]
    }
}

impl<T: Clone + Default> ValueList<T> {
    /// Empty buffer with `capacity` default-filled slots, ready for a get.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            count: 0,
            items: vec![T::default(); capacity],
        }
    }
}

/// Typed attribute value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    Bool(bool),
    U8(u8),
    I8(i8),
    U16(u16),
    I16(i16),
    U32(u32),
    I32(i32),
    U64(u64),
    I64(i64),
    Mac(MacAddress),
    Ipv4(Ipv4Addr),
    Ipv6(Ipv6Addr),
    IpAddress(IpAddr),
    IpPrefix(IpPrefix),
    ObjectId(ObjectId),
    ObjectList(ValueList<ObjectId>),
    U8List(ValueList<u8>),
    U32List(ValueList<u32>),
    I32List(ValueList<i32>),
    VlanList(ValueList<u16>),
    U32Range { min: u32, max: u32 },
    I32Range { min: i32, max: i32 },
}

impl AttrValue {
    /// Short shape name used in diagnostics.
    pub fn shape(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::U8(_) => "u8",
            Self::I8(_) => "i8",
            Self::U16(_) => "u16",
            Self::I16(_) => "i16",
            Self::U32(_) => "u32",
            Self::I32(_) => "i32",
            Self::U64(_) => "u64",
            Self::I64(_) => "i64",
            Self::Mac(_) => "mac",
            Self::Ipv4(_) => "ipv4",
            Self::Ipv6(_) => "ipv6",
            Self::IpAddress(_) => "ipaddr",
            Self::IpPrefix(_) => "ipprefix",
            Self::ObjectId(_) => "oid",
            Self::ObjectList(_) => "objlist",
            Self::U8List(_) => "u8list",
            Self::U32List(_) => "u32list",
            Self::I32List(_) => "s32list",
            Self::VlanList(_) => "vlanlist",
            Self::U32Range { .. } => "u32range",
            Self::I32Range { .. } => "s32range",
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(
            self,
            Self::ObjectList(_)
                | Self::U8List(_)
                | Self::U32List(_)
                | Self::I32List(_)
                | Self::VlanList(_)
        )
    }

    /// `(count, capacity)` for list values.
    pub fn list_dims(&self) -> Option<(u32, usize)> {
        match self {
            Self::ObjectList(l) => Some((l.count, l.capacity())),
            Self::U8List(l) => Some((l.count, l.capacity())),
            Self::U32List(l) => Some((l.count, l.capacity())),
            Self::I32List(l) => Some((l.count, l.capacity())),
            Self::VlanList(l) => Some((l.count, l.capacity())),
            _ => None,
        }
    }
}

/// One (id, value) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub id: u32,
    pub value: AttrValue,
}

impl Attribute {
    pub fn new(id: u32, value: AttrValue) -> Self {
        Self { id, value }
    }
}
