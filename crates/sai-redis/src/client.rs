// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Caller-facing client.
//!
//! [`SaiRedis`] owns the identifier allocator and wires the dispatcher and
//! get correlator onto one transport. Each object category gets the same four
//! call shapes; only the way the target is named differs.
//!
//! # Example
//!
//! ```
//! use sai_redis::meta::attr;
//! use sai_redis::{AttrValue, Attribute, Broker, ObjectType, SaiRedis, SaiRedisConfig};
//!
//! let broker = Broker::new();
//! let client = SaiRedis::memory(&broker, SaiRedisConfig::default())?;
//!
//! let port = client.create_object(
//!     ObjectType::Port,
//!     &[Attribute::new(attr::port::SPEED, AttrValue::U32(100_000))],
//! )?;
//! client.set_object(
//!     ObjectType::Port,
//!     port,
//!     &Attribute::new(attr::port::ADMIN_STATE, AttrValue::Bool(true)),
//! )?;
//! assert_eq!(broker.backlog("ASIC_STATE"), 2);
//! # Ok::<(), sai_redis::SaiError>(())
//! ```

use crate::config::SaiRedisConfig;
use crate::dispatch::Dispatcher;
use crate::error::SaiResult;
use crate::get::{Clock, GetCorrelator, SystemClock};
use crate::key::IdentifierSource;
use crate::meta::{MetadataLookup, MetadataTable};
use crate::object_type::ObjectType;
use crate::oid::{ObjectId, VirtualIdAllocator};
use crate::transfer::GetOutcome;
use crate::transport::{Broker, Consumer, Producer};
use crate::types::{Attribute, FdbEntry, NeighborEntry, UnicastRouteEntry};
use std::sync::Arc;

/// The three channel ends a client needs.
#[derive(Clone)]
pub struct Transport {
    /// Outbound state channel.
    pub state: Arc<dyn Producer>,
    /// Outbound half of the get-response channel (tombstones).
    pub get_response_out: Arc<dyn Producer>,
    /// Inbound half of the get-response channel.
    pub get_response_in: Arc<dyn Consumer>,
}

impl Transport {
    /// Channel ends on an in-process broker, named by `config`.
    pub fn memory(broker: &Broker, config: &SaiRedisConfig) -> Self {
        Self {
            state: Arc::new(broker.producer(&config.state_channel)),
            get_response_out: Arc::new(broker.producer(&config.get_response_channel)),
            get_response_in: Arc::new(broker.consumer(&config.get_response_channel)),
        }
    }
}

/// Builder for [`SaiRedis`].
pub struct SaiRedisBuilder {
    config: SaiRedisConfig,
    meta: Option<Arc<dyn MetadataLookup>>,
    clock: Option<Arc<dyn Clock>>,
    allocator: Option<Arc<VirtualIdAllocator>>,
}

impl SaiRedisBuilder {
    /// Attribute metadata. Defaults to [`MetadataTable::standard`].
    pub fn metadata(mut self, meta: Arc<dyn MetadataLookup>) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Time source for get deadlines. Defaults to the wall clock.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Share an allocator with another client.
    pub fn allocator(mut self, allocator: Arc<VirtualIdAllocator>) -> Self {
        self.allocator = Some(allocator);
        self
    }

    pub fn build(self, transport: Transport) -> SaiResult<SaiRedis> {
        self.config.validate()?;

        let meta: Arc<dyn MetadataLookup> = match self.meta {
            Some(meta) => meta,
            None => Arc::new(MetadataTable::standard()),
        };
        let clock: Arc<dyn Clock> = match self.clock {
            Some(clock) => clock,
            None => Arc::new(SystemClock),
        };
        let allocator = self.allocator.unwrap_or_default();

        let dispatcher = Dispatcher::new(transport.state.clone(), meta.clone(), allocator.clone());
        let correlator = GetCorrelator::new(
            transport.state,
            transport.get_response_out,
            transport.get_response_in,
            meta,
        )
        .with_clock(clock)
        .with_poll_timeout(self.config.poll_timeout())
        .with_deadline(self.config.get_deadline());

        log::debug!(
            "[sai-redis] client ready: state={} get_response={} poll={:?} deadline={:?}",
            self.config.state_channel,
            self.config.get_response_channel,
            correlator.poll_timeout(),
            correlator.deadline()
        );

        Ok(SaiRedis {
            config: self.config,
            allocator,
            dispatcher,
            correlator,
        })
    }
}

/// Switch abstraction client backed by broker channels.
pub struct SaiRedis {
    config: SaiRedisConfig,
    allocator: Arc<VirtualIdAllocator>,
    dispatcher: Dispatcher,
    correlator: GetCorrelator,
}

impl SaiRedis {
    pub fn builder(config: SaiRedisConfig) -> SaiRedisBuilder {
        SaiRedisBuilder {
            config,
            meta: None,
            clock: None,
            allocator: None,
        }
    }

    /// Client with default metadata and clock.
    pub fn new(config: SaiRedisConfig, transport: Transport) -> SaiResult<Self> {
        Self::builder(config).build(transport)
    }

    /// Client on an in-process broker.
    pub fn memory(broker: &Broker, config: SaiRedisConfig) -> SaiResult<Self> {
        let transport = Transport::memory(broker, &config);
        Self::new(config, transport)
    }

    pub fn config(&self) -> &SaiRedisConfig {
        &self.config
    }

    pub fn allocator(&self) -> &Arc<VirtualIdAllocator> {
        &self.allocator
    }

    // Handle-addressed objects.

    pub fn create_object(
        &self,
        object_type: ObjectType,
        attrs: &[Attribute],
    ) -> SaiResult<ObjectId> {
        self.dispatcher.create_object(object_type, Some(attrs))
    }

    pub fn get_object(
        &self,
        object_type: ObjectType,
        oid: ObjectId,
        attrs: &mut [Attribute],
    ) -> SaiResult<GetOutcome> {
        self.correlator.get(object_type, &oid.into(), attrs)
    }

    pub fn set_object(
        &self,
        object_type: ObjectType,
        oid: ObjectId,
        attr: &Attribute,
    ) -> SaiResult<()> {
        self.dispatcher.set(object_type, &oid.into(), attr)
    }

    pub fn remove_object(&self, object_type: ObjectType, oid: ObjectId) -> SaiResult<()> {
        self.dispatcher.remove(object_type, &oid.into())
    }

    // Forwarding database entries.

    pub fn create_fdb_entry(&self, entry: &FdbEntry, attrs: &[Attribute]) -> SaiResult<()> {
        self.dispatcher
            .create_entry(ObjectType::Fdb, &(*entry).into(), Some(attrs))
    }

    pub fn get_fdb_entry(
        &self,
        entry: &FdbEntry,
        attrs: &mut [Attribute],
    ) -> SaiResult<GetOutcome> {
        self.correlator.get(ObjectType::Fdb, &(*entry).into(), attrs)
    }

    pub fn set_fdb_entry(&self, entry: &FdbEntry, attr: &Attribute) -> SaiResult<()> {
        self.dispatcher.set(ObjectType::Fdb, &(*entry).into(), attr)
    }

    pub fn remove_fdb_entry(&self, entry: &FdbEntry) -> SaiResult<()> {
        self.dispatcher.remove(ObjectType::Fdb, &(*entry).into())
    }

    // Neighbor entries.

    pub fn create_neighbor_entry(
        &self,
        entry: &NeighborEntry,
        attrs: &[Attribute],
    ) -> SaiResult<()> {
        self.dispatcher
            .create_entry(ObjectType::Neighbor, &(*entry).into(), Some(attrs))
    }

    pub fn get_neighbor_entry(
        &self,
        entry: &NeighborEntry,
        attrs: &mut [Attribute],
    ) -> SaiResult<GetOutcome> {
        self.correlator
            .get(ObjectType::Neighbor, &(*entry).into(), attrs)
    }

    pub fn set_neighbor_entry(&self, entry: &NeighborEntry, attr: &Attribute) -> SaiResult<()> {
        self.dispatcher
            .set(ObjectType::Neighbor, &(*entry).into(), attr)
    }

    pub fn remove_neighbor_entry(&self, entry: &NeighborEntry) -> SaiResult<()> {
        self.dispatcher
            .remove(ObjectType::Neighbor, &(*entry).into())
    }

    // Unicast route entries.

    pub fn create_route_entry(
        &self,
        entry: &UnicastRouteEntry,
        attrs: &[Attribute],
    ) -> SaiResult<()> {
        self.dispatcher
            .create_entry(ObjectType::Route, &(*entry).into(), Some(attrs))
    }

    pub fn get_route_entry(
        &self,
        entry: &UnicastRouteEntry,
        attrs: &mut [Attribute],
    ) -> SaiResult<GetOutcome> {
        self.correlator.get(ObjectType::Route, &(*entry).into(), attrs)
    }

    pub fn set_route_entry(&self, entry: &UnicastRouteEntry, attr: &Attribute) -> SaiResult<()> {
        self.dispatcher.set(ObjectType::Route, &(*entry).into(), attr)
    }

    pub fn remove_route_entry(&self, entry: &UnicastRouteEntry) -> SaiResult<()> {
        self.dispatcher.remove(ObjectType::Route, &(*entry).into())
    }

    // Vlans, addressed by bare vlan id.

    /// Vlans are created empty; members are added as separate objects.
    pub fn create_vlan(&self, vlan_id: u16) -> SaiResult<()> {
        self.dispatcher
            .create_entry(ObjectType::Vlan, &IdentifierSource::Vlan(vlan_id), Some(&[]))
    }

    pub fn get_vlan(&self, vlan_id: u16, attrs: &mut [Attribute]) -> SaiResult<GetOutcome> {
        self.correlator
            .get(ObjectType::Vlan, &IdentifierSource::Vlan(vlan_id), attrs)
    }

    pub fn set_vlan(&self, vlan_id: u16, attr: &Attribute) -> SaiResult<()> {
        self.dispatcher
            .set(ObjectType::Vlan, &IdentifierSource::Vlan(vlan_id), attr)
    }

    pub fn remove_vlan(&self, vlan_id: u16) -> SaiResult<()> {
        self.dispatcher
            .remove(ObjectType::Vlan, &IdentifierSource::Vlan(vlan_id))
    }
}

impl std::fmt::Debug for SaiRedis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SaiRedis")
            .field("config", &self.config)
            .field("issued", &self.allocator.issued())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SaiError;
    use crate::meta::attr;
    use crate::types::{AttrValue, MacAddress};
    use std::net::{IpAddr, Ipv4Addr};

    #[test]
    fn test_invalid_config_is_rejected() {
        let broker = Broker::new();
        let config = SaiRedisConfig {
            poll_timeout_ms: 0,
            ..Default::default()
        };
        assert!(matches!(
            SaiRedis::memory(&broker, config),
            Err(SaiError::Config(_))
        ));
    }

    #[test]
    fn test_natural_key_creates() {
        let broker = Broker::new();
        let client = SaiRedis::memory(&broker, SaiRedisConfig::default()).expect("client");

        let rif = client
            .create_object(ObjectType::RouterInterface, &[])
            .expect("rif");
        let neighbor = NeighborEntry {
            rif_id: rif,
            ip_address: IpAddr::V4(Ipv4Addr::new(10, 0, 0, 2)),
        };
        client
            .create_neighbor_entry(
                &neighbor,
                &[Attribute::new(
                    attr::neighbor::DST_MAC_ADDRESS,
                    AttrValue::Mac(MacAddress([2, 0, 0, 0, 0, 2])),
                )],
            )
            .expect("neighbor");
        client.create_vlan(100).expect("vlan");
        client.remove_neighbor_entry(&neighbor).expect("remove");

        let rx = broker.consumer("ASIC_STATE");
        let ops: Vec<(String, String)> = std::iter::from_fn(|| rx.pop().ok().flatten())
            .map(|e| (e.op, e.key))
            .collect();
        assert_eq!(
            ops,
            vec![
                (
                    "create".to_string(),
                    format!("SAI_OBJECT_TYPE_ROUTER_INTERFACE:{}", rif)
                ),
                (
                    "create".to_string(),
                    format!(
                        r#"SAI_OBJECT_TYPE_NEIGHBOR:{{"rif":"{}","ip":"10.0.0.2"}}"#,
                        rif
                    )
                ),
                ("create".to_string(), "SAI_OBJECT_TYPE_VLAN:100".to_string()),
                (
                    "remove".to_string(),
                    format!(
                        r#"SAI_OBJECT_TYPE_NEIGHBOR:{{"rif":"{}","ip":"10.0.0.2"}}"#,
                        rif
                    )
                ),
            ]
        );
    }

    #[test]
    fn test_shared_allocator() {
        let broker = Broker::new();
        let allocator = Arc::new(VirtualIdAllocator::new());
        let config = SaiRedisConfig::default();
        let a = SaiRedis::builder(config.clone())
            .allocator(allocator.clone())
            .build(Transport::memory(&broker, &config))
            .expect("a");
        let b = SaiRedis::builder(config.clone())
            .allocator(allocator.clone())
            .build(Transport::memory(&broker, &config))
            .expect("b");

        let x = a.create_object(ObjectType::Port, &[]).expect("x");
        let y = b.create_object(ObjectType::Port, &[]).expect("y");
        assert_ne!(x, y);
        assert_eq!(allocator.issued(), 2);
    }
}
