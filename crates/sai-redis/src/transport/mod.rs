// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Broker transport seam.
//!
//! The remote agent is reachable only through named channels carrying
//! ordered (key, op, entry) records. Publishing is fire-and-forget; receiving
//! is poll-then-pop. Nothing here correlates requests with responses, that is
//! the get correlator's job.
//!
//! # Channels
//!
//! | Channel | Direction | Ops |
//! |---------|-----------|-----|
//! | state (`ASIC_STATE`) | client -> agent | `create`, `set`, `remove`, `get` |
//! | get response (`GETRESPONSE`) | both | `delget` out, `getresponse` in |

pub mod memory;

use std::fmt;
use std::time::Duration;
use thiserror::Error;

pub use memory::{Broker, MemoryConsumer, MemoryProducer};

/// One (field, value) pair of a serialized entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldValue {
    pub field: String,
    pub value: String,
}

impl FieldValue {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Operation tags understood by the agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Create,
    Set,
    Remove,
    Get,
    DelGet,
    GetResponse,
}

impl Op {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Set => "set",
            Self::Remove => "remove",
            Self::Get => "get",
            Self::DelGet => "delget",
            Self::GetResponse => "getresponse",
        }
    }

    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "create" => Some(Self::Create),
            "set" => Some(Self::Set),
            "remove" => Some(Self::Remove),
            "get" => Some(Self::Get),
            "delget" => Some(Self::DelGet),
            "getresponse" => Some(Self::GetResponse),
            _ => None,
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record popped from a channel.
///
/// `op` stays a free-form string: channels are shared and may carry tags this
/// crate does not know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub key: String,
    pub op: String,
    pub entry: Vec<FieldValue>,
}

impl Envelope {
    pub fn new(key: impl Into<String>, op: impl Into<String>, entry: Vec<FieldValue>) -> Self {
        Self {
            key: key.into(),
            op: op.into(),
            entry,
        }
    }

    pub fn is(&self, op: Op) -> bool {
        self.op == op.as_str()
    }
}

/// Result of waiting on a consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    Ready,
    NoData,
}

/// Transport failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("channel {0} is closed")]
    Closed(String),

    #[error("transport failure on {channel}: {reason}")]
    Failed { channel: String, reason: String },
}

/// Outbound half of a channel.
pub trait Producer: Send + Sync {
    fn publish(&self, key: &str, entry: &[FieldValue], op: &str) -> Result<(), TransportError>;
}

/// Inbound half of a channel.
pub trait Consumer: Send + Sync {
    /// Wait up to `timeout` for a record to become available.
    fn poll(&self, timeout: Duration) -> Result<Readiness, TransportError>;

    /// Take the next record, if any.
    fn pop(&self) -> Result<Option<Envelope>, TransportError>;
}
