// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types for switch abstraction calls.

use crate::config::ConfigError;
use crate::meta::SerializationKind;
use crate::object_type::ObjectType;
use crate::status::Status;
use crate::transport::TransportError;
use std::time::Duration;
use thiserror::Error;

/// Result type for switch abstraction calls
pub type SaiResult<T> = Result<T, SaiError>;

/// Value-level encode/decode failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("value shape {found} does not match declared kind {expected:?}")]
    ShapeMismatch {
        expected: SerializationKind,
        found: &'static str,
    },

    #[error("list count {count} exceeds element storage {capacity}")]
    CountExceedsStorage { count: u32, capacity: usize },

    #[error("list declares {declared} elements but carries {actual}")]
    CountMismatch { declared: u32, actual: usize },

    #[error("cannot parse {what} from {input:?}")]
    Parse { what: &'static str, input: String },

    #[error("field {0:?} is not an attribute id")]
    BadField(String),

    #[error("response slot for attribute {attr_id} is {expected}, agent sent {found}")]
    SlotMismatch {
        attr_id: u32,
        expected: &'static str,
        found: &'static str,
    },
}

impl CodecError {
    pub(crate) fn parse(what: &'static str, input: &str) -> Self {
        Self::Parse {
            what,
            input: input.to_string(),
        }
    }
}

/// Errors returned by every call shape.
#[derive(Debug, Error)]
pub enum SaiError {
    /// Missing or inconsistent caller input.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Metadata has no entry for the pair. Never retried.
    #[error("unknown attribute {attr_id} for {object_type}")]
    UnknownAttribute {
        object_type: ObjectType,
        attr_id: u32,
        index: usize,
    },

    /// Attribute `index` in the caller's list could not be encoded.
    #[error("attribute {attr_id} (index {index}) encode failed: {source}")]
    Encode {
        attr_id: u32,
        index: usize,
        #[source]
        source: CodecError,
    },

    /// Response payload could not be decoded or reconciled.
    #[error("decode failed: {0}")]
    Decode(#[from] CodecError),

    /// No response arrived within the poll window.
    #[error("get response timed out after {0:?}")]
    Timeout(Duration),

    /// Agent returned a non-success, non-overflow status.
    #[error("remote agent returned {0}")]
    RemoteFailure(Status),

    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl SaiError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    /// Status code equivalent, for callers that speak the C-style API.
    pub fn status(&self) -> Status {
        match self {
            Self::InvalidParameter(_) | Self::Config(_) | Self::UnknownAttribute { .. } => {
                Status::INVALID_PARAMETER
            }
            Self::Encode { index, .. } => Status::invalid_attr_value(*index),
            Self::Decode(_) | Self::Timeout(_) | Self::Transport(_) => Status::FAILURE,
            Self::RemoteFailure(status) => *status,
        }
    }
}
