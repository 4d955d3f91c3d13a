// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Primitive text encodings shared by the codec and key builder.
//!
//! Formats:
//! - scalars: `Display` / `FromStr` of the Rust type
//! - lists: `<count>:<e1>,<e2>,...` (`0:` when empty)
//! - count-only lists: `<count>:null`
//! - ranges: `<min>,<max>`

use crate::error::CodecError;
use crate::types::ValueList;
use std::fmt::Display;
use std::str::FromStr;

/// Placeholder carried instead of a value.
pub const NULL_VALUE: &str = "null";

pub fn parse_scalar<T: FromStr>(input: &str, what: &'static str) -> Result<T, CodecError> {
    input.parse().map_err(|_| CodecError::parse(what, input))
}

pub fn parse_bool(input: &str) -> Result<bool, CodecError> {
    match input {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(CodecError::parse("bool", input)),
    }
}

/// `count` elements taken from the front of `list`.
pub fn format_list<T: Display>(list: &ValueList<T>) -> Result<String, CodecError> {
    if list.count as usize > list.items.len() {
        return Err(CodecError::CountExceedsStorage {
            count: list.count,
            capacity: list.items.len(),
        });
    }

    let mut out = format!("{}:", list.count);
    for (i, item) in list.items[..list.count as usize].iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&item.to_string());
    }
    Ok(out)
}

pub fn format_count_only(count: u32) -> String {
    format!("{}:{}", count, NULL_VALUE)
}

fn split_count(input: &str) -> Result<(u32, &str), CodecError> {
    let (count, rest) = input
        .split_once(':')
        .ok_or_else(|| CodecError::parse("list", input))?;
    let count = count
        .parse::<u32>()
        .map_err(|_| CodecError::parse("list count", input))?;
    Ok((count, rest))
}

/// Full list: element count must equal the declared count.
pub fn parse_list<T: FromStr>(input: &str, what: &'static str) -> Result<ValueList<T>, CodecError> {
    let (count, rest) = split_count(input)?;

    let items = if rest.is_empty() {
        Vec::new()
    } else {
        rest.split(',')
            .map(|e| parse_scalar(e, what))
            .collect::<Result<Vec<T>, _>>()?
    };

    if items.len() != count as usize {
        return Err(CodecError::CountMismatch {
            declared: count,
            actual: items.len(),
        });
    }

    Ok(ValueList { count, items })
}

/// Count-only list: elements, if any, are ignored.
pub fn parse_count_only<T>(input: &str) -> Result<ValueList<T>, CodecError> {
    let (count, _) = split_count(input)?;
    Ok(ValueList {
        count,
        items: Vec::new(),
    })
}

pub fn format_range<T: Display>(min: T, max: T) -> String {
    format!("{},{}", min, max)
}

pub fn parse_range<T: FromStr>(input: &str, what: &'static str) -> Result<(T, T), CodecError> {
    let (min, max) = input
        .split_once(',')
        .ok_or_else(|| CodecError::parse(what, input))?;
    Ok((parse_scalar(min, what)?, parse_scalar(max, what)?))
}
