// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Switch abstraction client over broker channels
//!
//! Translates create / get / set / remove calls on switch objects into
//! records on named broker channels, for a remote agent that owns the
//! hardware. There is no request/response primitive on the broker, so gets
//! are correlated by key on a dedicated response channel.
//!
//! # Features
//!
//! - **Virtual ids**: type-tagged 64-bit handles minted locally on create
//! - **Attribute codec**: metadata-driven text encoding of typed values
//! - **Blocking get**: timeout, foreign-traffic skip, buffer overflow reporting
//! - **In-memory broker**: loopback transport for tests and single-process setups
//!
//! # Wire format
//!
//! ```text
//! key    SAI_OBJECT_TYPE_PORT:oid:0x1000000000000
//! op     create | set | remove | get | delget | getresponse
//! entry  [("3", "100000"), ("2", "2:0,1")]
//! ```
//!
//! Get responses arrive as `getresponse` records keyed `<request key>:<status>`.
//!
//! # Configuration File
//!
//! ```toml
//! state_channel = "ASIC_STATE"
//! get_response_channel = "GETRESPONSE"
//! poll_timeout_ms = 2000
//! get_deadline_ms = 6000
//! log_level = "info"
//! ```

pub mod client;
pub mod codec;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod get;
pub mod key;
pub mod meta;
pub mod object_type;
pub mod oid;
pub mod serialize;
pub mod status;
pub mod transfer;
pub mod transport;
pub mod types;

pub use client::{SaiRedis, SaiRedisBuilder, Transport};
pub use codec::DecodeMode;
pub use config::{ConfigError, SaiRedisConfig};
pub use dispatch::Dispatcher;
pub use error::{CodecError, SaiError, SaiResult};
pub use get::{Clock, GetCall, GetCorrelator, GetState, SystemClock};
pub use key::IdentifierSource;
pub use meta::{MetadataLookup, MetadataTable, SerializationKind};
pub use object_type::{Addressing, ObjectType};
pub use oid::{ObjectId, VirtualIdAllocator};
pub use status::Status;
pub use transfer::GetOutcome;
pub use transport::{
    Broker, Consumer, Envelope, FieldValue, Op, Producer, Readiness, TransportError,
};
pub use types::{
    AttrValue, Attribute, FdbEntry, IpPrefix, MacAddress, NeighborEntry, UnicastRouteEntry,
    ValueList,
};
