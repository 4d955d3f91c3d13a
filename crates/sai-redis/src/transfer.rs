// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Copy a decoded get response into the caller's attribute slots.

use crate::codec::{kind_of, DecodeMode};
use crate::error::CodecError;
use crate::types::{AttrValue, Attribute, ValueList};

/// Result of a get that reached the agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GetOutcome {
    /// Every requested value fit in the caller's buffers.
    Complete,
    /// At least one list needs more room; its `count` holds the required size.
    Overflow,
}

/// Returns `true` when `src` did not fit.
fn transfer_list<T: Clone>(dst: &mut ValueList<T>, src: &ValueList<T>, mode: DecodeMode) -> bool {
    let capacity = dst.capacity();
    if mode == DecodeMode::Full {
        let n = capacity.min(src.items.len());
        dst.items[..n].clone_from_slice(&src.items[..n]);
    }
    dst.count = src.count;
    src.count as usize > capacity
}

fn transfer_value(
    attr_id: u32,
    dst: &mut AttrValue,
    src: &AttrValue,
    mode: DecodeMode,
) -> Result<bool, CodecError> {
    if kind_of(dst) != kind_of(src) {
        return Err(CodecError::SlotMismatch {
            attr_id,
            expected: dst.shape(),
            found: src.shape(),
        });
    }

    let overflowed = match (dst, src) {
        (AttrValue::ObjectList(d), AttrValue::ObjectList(s)) => transfer_list(d, s, mode),
        (AttrValue::U8List(d), AttrValue::U8List(s)) => transfer_list(d, s, mode),
        (AttrValue::U32List(d), AttrValue::U32List(s)) => transfer_list(d, s, mode),
        (AttrValue::I32List(d), AttrValue::I32List(s)) => transfer_list(d, s, mode),
        (AttrValue::VlanList(d), AttrValue::VlanList(s)) => transfer_list(d, s, mode),
        (d, s) => {
            *d = s.clone();
            false
        }
    };
    Ok(overflowed)
}

/// Fill `requested` from `decoded`, matching by attribute id.
///
/// Slots with no matching id in the response are left as they were. In
/// count-only mode lists get their `count` updated and nothing else.
pub fn reconcile(
    requested: &mut [Attribute],
    decoded: &[Attribute],
    mode: DecodeMode,
) -> Result<GetOutcome, CodecError> {
    let mut overflowed = false;

    for slot in requested.iter_mut() {
        let Some(found) = decoded.iter().find(|a| a.id == slot.id) else {
            log::debug!("[transfer] attribute {} missing from response", slot.id);
            continue;
        };
        overflowed |= transfer_value(slot.id, &mut slot.value, &found.value, mode)?;
    }

    if overflowed || mode == DecodeMode::CountOnly {
        Ok(GetOutcome::Overflow)
    } else {
        Ok(GetOutcome::Complete)
    }
}
