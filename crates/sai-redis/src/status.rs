// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Status codes exchanged with the remote agent.
//!
//! Codes are signed 32-bit values: zero is success, negative values are
//! failures. Attribute-related failures occupy 64K-wide ranges counting down
//! from a base code; the distance from the base is the index of the offending
//! attribute in the caller's list.

use std::fmt;

/// Switch abstraction status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Status(i32);

impl Status {
    pub const SUCCESS: Status = Status(0);
    pub const FAILURE: Status = Status(-1);
    pub const NOT_SUPPORTED: Status = Status(-2);
    pub const NO_MEMORY: Status = Status(-3);
    pub const INSUFFICIENT_RESOURCES: Status = Status(-4);
    pub const INVALID_PARAMETER: Status = Status(-5);
    pub const ITEM_ALREADY_EXISTS: Status = Status(-6);
    pub const ITEM_NOT_FOUND: Status = Status(-7);
    pub const BUFFER_OVERFLOW: Status = Status(-8);
    pub const INVALID_PORT_NUMBER: Status = Status(-9);
    pub const INVALID_PORT_MEMBER: Status = Status(-10);
    pub const INVALID_VLAN_ID: Status = Status(-11);
    pub const UNINITIALIZED: Status = Status(-12);
    pub const TABLE_FULL: Status = Status(-13);
    pub const MANDATORY_ATTRIBUTE_MISSING: Status = Status(-14);
    pub const NOT_IMPLEMENTED: Status = Status(-15);
    pub const ADDR_NOT_FOUND: Status = Status(-16);
    pub const OBJECT_IN_USE: Status = Status(-17);
    pub const INVALID_OBJECT_TYPE: Status = Status(-18);
    pub const INVALID_OBJECT_ID: Status = Status(-19);

    pub const INVALID_ATTRIBUTE_0: Status = Status(-0x0001_0000);
    pub const INVALID_ATTR_VALUE_0: Status = Status(-0x0002_0000);
    pub const ATTR_NOT_IMPLEMENTED_0: Status = Status(-0x0003_0000);
    pub const UNKNOWN_ATTRIBUTE_0: Status = Status(-0x0004_0000);
    pub const ATTR_NOT_SUPPORTED_0: Status = Status(-0x0005_0000);

    pub const fn from_code(code: i32) -> Self {
        Status(code)
    }

    pub const fn code(self) -> i32 {
        self.0
    }

    pub fn is_success(self) -> bool {
        self == Self::SUCCESS
    }

    /// `INVALID_ATTR_VALUE_0` shifted by `index`.
    pub fn invalid_attr_value(index: usize) -> Self {
        Self::indexed(Self::INVALID_ATTR_VALUE_0, index)
    }

    /// `UNKNOWN_ATTRIBUTE_0` shifted by `index`.
    pub fn unknown_attribute(index: usize) -> Self {
        Self::indexed(Self::UNKNOWN_ATTRIBUTE_0, index)
    }

    fn indexed(base: Status, index: usize) -> Self {
        Status(base.0 - (index.min(0xFFFF) as i32))
    }

    /// Base of the attribute range this code falls in, and the attribute index.
    pub fn attribute_range(self) -> Option<(Status, u16)> {
        [
            Self::INVALID_ATTRIBUTE_0,
            Self::INVALID_ATTR_VALUE_0,
            Self::ATTR_NOT_IMPLEMENTED_0,
            Self::UNKNOWN_ATTRIBUTE_0,
            Self::ATTR_NOT_SUPPORTED_0,
        ]
        .into_iter()
        .find(|base| self.0 <= base.0 && self.0 > base.0 - 0x1_0000)
        .map(|base| (base, (base.0 - self.0) as u16))
    }

    /// Symbolic name for the fixed codes.
    pub fn name(self) -> Option<&'static str> {
        let name = match self {
            Self::SUCCESS => "SAI_STATUS_SUCCESS",
            Self::FAILURE => "SAI_STATUS_FAILURE",
            Self::NOT_SUPPORTED => "SAI_STATUS_NOT_SUPPORTED",
            Self::NO_MEMORY => "SAI_STATUS_NO_MEMORY",
            Self::INSUFFICIENT_RESOURCES => "SAI_STATUS_INSUFFICIENT_RESOURCES",
            Self::INVALID_PARAMETER => "SAI_STATUS_INVALID_PARAMETER",
            Self::ITEM_ALREADY_EXISTS => "SAI_STATUS_ITEM_ALREADY_EXISTS",
            Self::ITEM_NOT_FOUND => "SAI_STATUS_ITEM_NOT_FOUND",
            Self::BUFFER_OVERFLOW => "SAI_STATUS_BUFFER_OVERFLOW",
            Self::INVALID_PORT_NUMBER => "SAI_STATUS_INVALID_PORT_NUMBER",
            Self::INVALID_PORT_MEMBER => "SAI_STATUS_INVALID_PORT_MEMBER",
            Self::INVALID_VLAN_ID => "SAI_STATUS_INVALID_VLAN_ID",
            Self::UNINITIALIZED => "SAI_STATUS_UNINITIALIZED",
            Self::TABLE_FULL => "SAI_STATUS_TABLE_FULL",
            Self::MANDATORY_ATTRIBUTE_MISSING => "SAI_STATUS_MANDATORY_ATTRIBUTE_MISSING",
            Self::NOT_IMPLEMENTED => "SAI_STATUS_NOT_IMPLEMENTED",
            Self::ADDR_NOT_FOUND => "SAI_STATUS_ADDR_NOT_FOUND",
            Self::OBJECT_IN_USE => "SAI_STATUS_OBJECT_IN_USE",
            Self::INVALID_OBJECT_TYPE => "SAI_STATUS_INVALID_OBJECT_TYPE",
            Self::INVALID_OBJECT_ID => "SAI_STATUS_INVALID_OBJECT_ID",
            _ => return None,
        };
        Some(name)
    }

    /// Decimal wire form, as carried in the get-response key suffix.
    pub fn to_wire(self) -> String {
        self.0.to_string()
    }

    pub fn from_wire(s: &str) -> Option<Self> {
        s.trim().parse::<i32>().ok().map(Status)
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::SUCCESS
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "SAI_STATUS({})", self.0),
        }
    }
}
