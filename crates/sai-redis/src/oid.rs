// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Virtual object identifiers.
//!
//! Layout of a virtual id:
//!
//! ```text
//!  63            48 47                                            0
//! +----------------+-----------------------------------------------+
//! |  object type   |              allocator counter                |
//! +----------------+-----------------------------------------------+
//! ```
//!
//! The counter is shared by every object type, so the full 64-bit value is
//! unique for the lifetime of one allocator. Ids are never recycled.

use crate::object_type::ObjectType;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

const TYPE_SHIFT: u32 = 48;
const COUNTER_MASK: u64 = (1u64 << TYPE_SHIFT) - 1;

/// 64-bit object handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ObjectId(pub u64);

impl ObjectId {
    /// The null handle.
    pub const NULL: ObjectId = ObjectId(0);

    /// Compose a handle from a type tag and counter value.
    pub fn compose(object_type: ObjectType, counter: u64) -> Self {
        Self(((object_type.as_u16() as u64) << TYPE_SHIFT) | (counter & COUNTER_MASK))
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }

    pub fn is_null(self) -> bool {
        self.0 == 0
    }

    /// Type tag carried in the top 16 bits, if it names a known category.
    pub fn object_type(self) -> Option<ObjectType> {
        ObjectType::from_u16((self.0 >> TYPE_SHIFT) as u16)
    }

    /// Low 48 bits.
    pub fn counter(self) -> u64 {
        self.0 & COUNTER_MASK
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "oid:0x{:x}", self.0)
    }
}

/// Error returned when a string is not a valid `oid:0x...` handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseObjectIdError(pub String);

impl fmt::Display for ParseObjectIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid object id {:?}", self.0)
    }
}

impl std::error::Error for ParseObjectIdError {}

impl FromStr for ObjectId {
    type Err = ParseObjectIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .strip_prefix("oid:0x")
            .ok_or_else(|| ParseObjectIdError(s.to_string()))?;
        u64::from_str_radix(hex, 16)
            .map(ObjectId)
            .map_err(|_| ParseObjectIdError(s.to_string()))
    }
}

impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// Mints process-unique, type-tagged virtual object ids.
///
/// The counter starts at zero and only moves forward. Sharing an allocator
/// between threads is safe: the increment is a single atomic `fetch_add`.
/// Exhausting the 48-bit counter is an unchecked precondition (asserted in
/// debug builds only).
#[derive(Debug, Default)]
pub struct VirtualIdAllocator {
    counter: AtomicU64,
}

impl VirtualIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next id for `object_type`.
    pub fn allocate(&self, object_type: ObjectType) -> ObjectId {
        let virtual_id = self.counter.fetch_add(1, Ordering::Relaxed);
        debug_assert!(virtual_id <= COUNTER_MASK, "virtual id counter exhausted");
        let oid = ObjectId::compose(object_type, virtual_id);
        log::trace!("[oid] allocated {} for {}", oid, object_type);
        oid
    }

    /// Number of ids handed out so far.
    pub fn issued(&self) -> u64 {
        self.counter.load(Ordering::Relaxed)
    }
}
