// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Attribute codec.
//!
//! Turns typed attributes into `(field, value)` string pairs and back. The
//! field is the decimal attribute id; the value format is chosen by the
//! [`SerializationKind`] registered for the (object type, attribute id) pair.
//!
//! Decoding has two modes. [`DecodeMode::Full`] expects every value in full.
//! [`DecodeMode::CountOnly`] is used for overflow responses, where the agent
//! only reports how many elements each list would need.

use crate::error::{CodecError, SaiError, SaiResult};
use crate::meta::{MetadataLookup, SerializationKind};
use crate::object_type::ObjectType;
use crate::serialize::{
    format_count_only, format_list, format_range, parse_bool, parse_count_only, parse_list,
    parse_range, parse_scalar, NULL_VALUE,
};
use crate::transport::FieldValue;
use crate::types::{AttrValue, Attribute, ValueList};

/// How list values in a response are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeMode {
    Full,
    CountOnly,
}

/// Serialization kind for `attr_id`, reported against position `index` in the
/// caller's list when missing.
pub fn lookup_kind(
    meta: &dyn MetadataLookup,
    object_type: ObjectType,
    attr_id: u32,
    index: usize,
) -> SaiResult<SerializationKind> {
    meta.kind(object_type, attr_id).ok_or_else(|| {
        log::error!(
            "[codec] no metadata for {} attribute {} (index {})",
            object_type,
            attr_id,
            index
        );
        SaiError::UnknownAttribute {
            object_type,
            attr_id,
            index,
        }
    })
}

fn mismatch(kind: SerializationKind, value: &AttrValue) -> CodecError {
    CodecError::ShapeMismatch {
        expected: kind,
        found: value.shape(),
    }
}

/// Kind a value variant encodes as.
pub fn kind_of(value: &AttrValue) -> SerializationKind {
    use SerializationKind as K;

    match value {
        AttrValue::Bool(_) => K::Bool,
        AttrValue::U8(_) => K::U8,
        AttrValue::I8(_) => K::I8,
        AttrValue::U16(_) => K::U16,
        AttrValue::I16(_) => K::I16,
        AttrValue::U32(_) => K::U32,
        AttrValue::I32(_) => K::I32,
        AttrValue::U64(_) => K::U64,
        AttrValue::I64(_) => K::I64,
        AttrValue::Mac(_) => K::Mac,
        AttrValue::Ipv4(_) => K::Ipv4,
        AttrValue::Ipv6(_) => K::Ipv6,
        AttrValue::IpAddress(_) => K::IpAddress,
        AttrValue::IpPrefix(_) => K::IpPrefix,
        AttrValue::ObjectId(_) => K::ObjectId,
        AttrValue::ObjectList(_) => K::ObjectList,
        AttrValue::U8List(_) => K::U8List,
        AttrValue::U32List(_) => K::U32List,
        AttrValue::I32List(_) => K::I32List,
        AttrValue::VlanList(_) => K::VlanList,
        AttrValue::U32Range { .. } => K::U32Range,
        AttrValue::I32Range { .. } => K::I32Range,
    }
}

/// Wire text for `value`.
pub fn encode_value(kind: SerializationKind, value: &AttrValue) -> Result<String, CodecError> {
    use SerializationKind as K;

    let text = match (kind, value) {
        (K::Bool, AttrValue::Bool(v)) => v.to_string(),
        (K::U8, AttrValue::U8(v)) => v.to_string(),
        (K::I8, AttrValue::I8(v)) => v.to_string(),
        (K::U16, AttrValue::U16(v)) => v.to_string(),
        (K::I16, AttrValue::I16(v)) => v.to_string(),
        (K::U32, AttrValue::U32(v)) => v.to_string(),
        (K::I32, AttrValue::I32(v)) => v.to_string(),
        (K::U64, AttrValue::U64(v)) => v.to_string(),
        (K::I64, AttrValue::I64(v)) => v.to_string(),
        (K::Mac, AttrValue::Mac(v)) => v.to_string(),
        (K::Ipv4, AttrValue::Ipv4(v)) => v.to_string(),
        (K::Ipv6, AttrValue::Ipv6(v)) => v.to_string(),
        (K::IpAddress, AttrValue::IpAddress(v)) => v.to_string(),
        (K::IpPrefix, AttrValue::IpPrefix(v)) => v.to_string(),
        (K::ObjectId, AttrValue::ObjectId(v)) => v.to_string(),
        (K::ObjectList, AttrValue::ObjectList(l)) => format_list(l)?,
        (K::U8List, AttrValue::U8List(l)) => format_list(l)?,
        (K::U32List, AttrValue::U32List(l)) => format_list(l)?,
        (K::I32List, AttrValue::I32List(l)) => format_list(l)?,
        (K::VlanList, AttrValue::VlanList(l)) => format_list(l)?,
        (K::U32Range, AttrValue::U32Range { min, max }) => format_range(min, max),
        (K::I32Range, AttrValue::I32Range { min, max }) => format_range(min, max),
        _ => return Err(mismatch(kind, value)),
    };
    Ok(text)
}

/// Full `(field, value)` pair for a set or create.
pub fn encode(kind: SerializationKind, attr: &Attribute) -> Result<FieldValue, CodecError> {
    Ok(FieldValue::new(
        attr.id.to_string(),
        encode_value(kind, &attr.value)?,
    ))
}

/// Get-request form: scalars carry `null`, lists carry `<capacity>:null` so
/// the agent knows how much room the caller has.
pub fn encode_placeholder(
    kind: SerializationKind,
    attr: &Attribute,
) -> Result<FieldValue, CodecError> {
    if kind_of(&attr.value) != kind {
        return Err(mismatch(kind, &attr.value));
    }
    let value = match attr.value.list_dims() {
        Some((_, capacity)) => format_count_only(capacity as u32),
        None => NULL_VALUE.to_string(),
    };
    Ok(FieldValue::new(attr.id.to_string(), value))
}

fn encode_with(
    meta: &dyn MetadataLookup,
    object_type: ObjectType,
    attrs: &[Attribute],
    f: fn(SerializationKind, &Attribute) -> Result<FieldValue, CodecError>,
) -> SaiResult<Vec<FieldValue>> {
    let mut entry = Vec::with_capacity(attrs.len());
    for (index, attr) in attrs.iter().enumerate() {
        let kind = lookup_kind(meta, object_type, attr.id, index)?;
        let fv = f(kind, attr).map_err(|source| {
            log::error!(
                "[codec] {} attribute {} (index {}) failed to encode: {}",
                object_type,
                attr.id,
                index,
                source
            );
            SaiError::Encode {
                attr_id: attr.id,
                index,
                source,
            }
        })?;
        entry.push(fv);
    }
    Ok(entry)
}

/// Encode every attribute in input order. Stops at the first failure.
pub fn encode_attributes(
    meta: &dyn MetadataLookup,
    object_type: ObjectType,
    attrs: &[Attribute],
) -> SaiResult<Vec<FieldValue>> {
    encode_with(meta, object_type, attrs, encode)
}

/// Placeholder entry for a get request.
pub fn encode_placeholders(
    meta: &dyn MetadataLookup,
    object_type: ObjectType,
    attrs: &[Attribute],
) -> SaiResult<Vec<FieldValue>> {
    encode_with(meta, object_type, attrs, encode_placeholder)
}

fn decode_list<T: std::str::FromStr>(
    input: &str,
    what: &'static str,
    mode: DecodeMode,
) -> Result<ValueList<T>, CodecError> {
    match mode {
        DecodeMode::Full => parse_list(input, what),
        DecodeMode::CountOnly => parse_count_only(input),
    }
}

/// Typed value from wire text.
pub fn decode_value(
    kind: SerializationKind,
    input: &str,
    mode: DecodeMode,
) -> Result<AttrValue, CodecError> {
    use SerializationKind as K;

    let value = match kind {
        K::Bool => AttrValue::Bool(parse_bool(input)?),
        K::U8 => AttrValue::U8(parse_scalar(input, "u8")?),
        K::I8 => AttrValue::I8(parse_scalar(input, "i8")?),
        K::U16 => AttrValue::U16(parse_scalar(input, "u16")?),
        K::I16 => AttrValue::I16(parse_scalar(input, "i16")?),
        K::U32 => AttrValue::U32(parse_scalar(input, "u32")?),
        K::I32 => AttrValue::I32(parse_scalar(input, "i32")?),
        K::U64 => AttrValue::U64(parse_scalar(input, "u64")?),
        K::I64 => AttrValue::I64(parse_scalar(input, "i64")?),
        K::Mac => AttrValue::Mac(parse_scalar(input, "mac")?),
        K::Ipv4 => AttrValue::Ipv4(parse_scalar(input, "ipv4")?),
        K::Ipv6 => AttrValue::Ipv6(parse_scalar(input, "ipv6")?),
        K::IpAddress => AttrValue::IpAddress(parse_scalar(input, "ip address")?),
        K::IpPrefix => AttrValue::IpPrefix(parse_scalar(input, "ip prefix")?),
        K::ObjectId => AttrValue::ObjectId(parse_scalar(input, "object id")?),
        K::ObjectList => AttrValue::ObjectList(decode_list(input, "object id", mode)?),
        K::U8List => AttrValue::U8List(decode_list(input, "u8", mode)?),
        K::U32List => AttrValue::U32List(decode_list(input, "u32", mode)?),
        K::I32List => AttrValue::I32List(decode_list(input, "i32", mode)?),
        K::VlanList => AttrValue::VlanList(decode_list(input, "vlan id", mode)?),
        K::U32Range => {
            let (min, max) = parse_range(input, "u32 range")?;
            AttrValue::U32Range { min, max }
        }
        K::I32Range => {
            let (min, max) = parse_range(input, "i32 range")?;
            AttrValue::I32Range { min, max }
        }
    };
    Ok(value)
}

/// Decode a response entry.
///
/// In count-only mode a scalar carrying `null` is dropped from the result:
/// the agent had nothing to report for it.
pub fn decode(
    meta: &dyn MetadataLookup,
    object_type: ObjectType,
    entry: &[FieldValue],
    mode: DecodeMode,
) -> SaiResult<Vec<Attribute>> {
    let mut attrs = Vec::with_capacity(entry.len());
    for (index, fv) in entry.iter().enumerate() {
        let attr_id: u32 = fv
            .field
            .parse()
            .map_err(|_| CodecError::BadField(fv.field.clone()))?;
        let kind = lookup_kind(meta, object_type, attr_id, index)?;

        if mode == DecodeMode::CountOnly && !kind.is_list() && fv.value == NULL_VALUE {
            continue;
        }

        let value = decode_value(kind, &fv.value, mode).map_err(|e| {
            log::error!(
                "[codec] {} attribute {} failed to decode from {:?}: {}",
                object_type,
                attr_id,
                fv.value,
                e
            );
            e
        })?;
        attrs.push(Attribute::new(attr_id, value));
    }
    Ok(attrs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::{attr, MetadataTable};
    use crate::oid::ObjectId;
    use crate::types::{IpPrefix, MacAddress};
    use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

    fn round_trip(kind: SerializationKind, value: AttrValue) {
        let text = encode_value(kind, &value).expect("encode");
        let back = decode_value(kind, &text, DecodeMode::Full).expect("decode");
        assert_eq!(back, value, "kind {:?} via {:?}", kind, text);
    }

    #[test]
    fn every_kind_survives_the_wire() {
        use SerializationKind as K;

        round_trip(K::Bool, AttrValue::Bool(true));
        round_trip(K::U8, AttrValue::U8(200));
        round_trip(K::I8, AttrValue::I8(-3));
        round_trip(K::U16, AttrValue::U16(4094));
        round_trip(K::I16, AttrValue::I16(-300));
        round_trip(K::U32, AttrValue::U32(100_000));
        round_trip(K::I32, AttrValue::I32(-42));
        round_trip(K::U64, AttrValue::U64(u64::MAX));
        round_trip(K::I64, AttrValue::I64(i64::MIN));
        round_trip(K::Mac, AttrValue::Mac(MacAddress([2, 0, 0, 0, 0, 1])));
        round_trip(K::Ipv4, AttrValue::Ipv4(Ipv4Addr::new(10, 1, 2, 3)));
        round_trip(K::Ipv6, AttrValue::Ipv6(Ipv6Addr::LOCALHOST));
        round_trip(
            K::IpAddress,
            AttrValue::IpAddress(IpAddr::V6("fe80::1".parse().expect("v6"))),
        );
        round_trip(
            K::IpPrefix,
            AttrValue::IpPrefix(
                IpPrefix::new(IpAddr::V4(Ipv4Addr::new(192, 168, 0, 0)), 16).expect("prefix"),
            ),
        );
        round_trip(K::ObjectId, AttrValue::ObjectId(ObjectId(0x1b_0000_0000_0003)));
        round_trip(
            K::ObjectList,
            AttrValue::ObjectList(ValueList::from_vec(vec![ObjectId(1), ObjectId(0x10)])),
        );
        round_trip(K::U8List, AttrValue::U8List(ValueList::from_vec(vec![1, 2, 3])));
        round_trip(K::U32List, AttrValue::U32List(ValueList::from_vec(Vec::new())));
        round_trip(K::I32List, AttrValue::I32List(ValueList::from_vec(vec![-1, 0, 1])));
        round_trip(K::VlanList, AttrValue::VlanList(ValueList::from_vec(vec![1, 4094])));
        round_trip(K::U32Range, AttrValue::U32Range { min: 1, max: 9 });
        round_trip(K::I32Range, AttrValue::I32Range { min: -9, max: 9 });
    }

    #[test]
    fn shape_must_match_metadata() {
        let err = encode_value(SerializationKind::U32, &AttrValue::Bool(true))
            .expect_err("bool into u32");
        assert_eq!(
            err,
            CodecError::ShapeMismatch {
                expected: SerializationKind::U32,
                found: "bool"
            }
        );
    }

    #[test]
    fn placeholders() {
        let scalar = Attribute::new(attr::port::SPEED, AttrValue::U32(0));
        let fv = encode_placeholder(SerializationKind::U32, &scalar).expect("scalar");
        assert_eq!(fv, FieldValue::new("3", "null"));

        let list = Attribute::new(
            attr::port::HW_LANE_LIST,
            AttrValue::U32List(ValueList::with_capacity(4)),
        );
        let fv = encode_placeholder(SerializationKind::U32List, &list).expect("list");
        assert_eq!(fv, FieldValue::new("2", "4:null"));

        assert!(encode_placeholder(SerializationKind::U32List, &scalar).is_err());
        assert!(encode_placeholder(SerializationKind::U32, &list).is_err());
        assert!(encode_placeholder(SerializationKind::ObjectList, &list).is_err());
    }

    #[test]
    fn unknown_attribute_reports_its_index() {
        let meta = MetadataTable::standard();
        let attrs = [
            Attribute::new(attr::port::SPEED, AttrValue::U32(1)),
            Attribute::new(999, AttrValue::U32(1)),
        ];
        let err = encode_attributes(&meta, ObjectType::Port, &attrs).expect_err("unknown");
        assert!(matches!(
            err,
            SaiError::UnknownAttribute {
                attr_id: 999,
                index: 1,
                ..
            }
        ));
    }

    #[test]
    fn encode_error_carries_index() {
        let meta = MetadataTable::standard();
        let attrs = [
            Attribute::new(attr::port::SPEED, AttrValue::U32(1)),
            Attribute::new(attr::port::MTU, AttrValue::U32(9100)),
            Attribute::new(attr::port::ADMIN_STATE, AttrValue::U8(1)),
        ];
        let err = encode_attributes(&meta, ObjectType::Port, &attrs).expect_err("bad shape");
        assert!(matches!(err, SaiError::Encode { attr_id: 4, index: 2, .. }));
    }

    #[test]
    fn decode_full_and_count_only() {
        let meta = MetadataTable::standard();
        let entry = vec![
            FieldValue::new("3", "40000"),
            FieldValue::new("2", "2:1,2"),
        ];
        let attrs = decode(&meta, ObjectType::Port, &entry, DecodeMode::Full).expect("full");
        assert_eq!(
            attrs,
            vec![
                Attribute::new(3, AttrValue::U32(40000)),
                Attribute::new(2, AttrValue::U32List(ValueList::from_vec(vec![1, 2]))),
            ]
        );

        let entry = vec![FieldValue::new("3", "null"), FieldValue::new("2", "5:null")];
        let attrs = decode(&meta, ObjectType::Port, &entry, DecodeMode::CountOnly).expect("count");
        assert_eq!(
            attrs,
            vec![Attribute::new(
                2,
                AttrValue::U32List(ValueList {
                    count: 5,
                    items: Vec::new()
                })
            )]
        );
    }

    #[test]
    fn decode_rejects_bad_fields() {
        let meta = MetadataTable::standard();
        let entry = vec![FieldValue::new("speed", "1")];
        assert!(matches!(
            decode(&meta, ObjectType::Port, &entry, DecodeMode::Full),
            Err(SaiError::Decode(CodecError::BadField(_)))
        ));

        let entry = vec![FieldValue::new("2", "3:1,2")];
        assert!(matches!(
            decode(&meta, ObjectType::Port, &entry, DecodeMode::Full),
            Err(SaiError::Decode(CodecError::CountMismatch { .. }))
        ));
    }
}
