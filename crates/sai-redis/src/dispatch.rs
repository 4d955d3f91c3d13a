// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Create / set / remove publishing.
//!
//! Every call encodes its whole entry before touching the transport, so a
//! failing attribute means zero publishes. A successful call publishes exactly
//! one record on the state channel. Nothing waits for the agent.

use crate::codec;
use crate::error::{SaiError, SaiResult};
use crate::key::{self, IdentifierSource};
use crate::meta::MetadataLookup;
use crate::object_type::{Addressing, ObjectType};
use crate::oid::{ObjectId, VirtualIdAllocator};
use crate::transport::{FieldValue, Op, Producer};
use crate::types::Attribute;
use std::sync::Arc;

/// Publishes state-changing operations.
pub struct Dispatcher {
    producer: Arc<dyn Producer>,
    meta: Arc<dyn MetadataLookup>,
    allocator: Arc<VirtualIdAllocator>,
}

impl Dispatcher {
    pub fn new(
        producer: Arc<dyn Producer>,
        meta: Arc<dyn MetadataLookup>,
        allocator: Arc<VirtualIdAllocator>,
    ) -> Self {
        Self {
            producer,
            meta,
            allocator,
        }
    }

    pub fn allocator(&self) -> &Arc<VirtualIdAllocator> {
        &self.allocator
    }

    fn publish(&self, key: &str, entry: &[FieldValue], op: Op) -> SaiResult<()> {
        log::debug!("[dispatch] {} {} ({} fields)", op, key, entry.len());
        self.producer.publish(key, entry, op.as_str())?;
        Ok(())
    }

    /// Create an object addressed by handle and return its new id.
    ///
    /// The id is consumed even if the agent later rejects the create.
    pub fn create_object(
        &self,
        object_type: ObjectType,
        attrs: Option<&[Attribute]>,
    ) -> SaiResult<ObjectId> {
        if object_type == ObjectType::Null || object_type.addressing() != Addressing::Handle {
            return Err(SaiError::invalid(format!(
                "{} is not created by handle",
                object_type
            )));
        }
        let attrs = attrs.ok_or_else(|| SaiError::invalid("null attribute list"))?;
        let entry = codec::encode_attributes(self.meta.as_ref(), object_type, attrs)?;

        let oid = self.allocator.allocate(object_type);
        let key = key::build_key(object_type, &IdentifierSource::ObjectId(oid))?;
        self.publish(&key, &entry, Op::Create)?;
        Ok(oid)
    }

    /// Create an object addressed by a natural key (fdb, neighbor, route, vlan).
    pub fn create_entry(
        &self,
        object_type: ObjectType,
        source: &IdentifierSource,
        attrs: Option<&[Attribute]>,
    ) -> SaiResult<()> {
        if matches!(source, IdentifierSource::ObjectId(_)) {
            return Err(SaiError::invalid(format!(
                "{} handles are minted by create_object",
                object_type
            )));
        }
        let key = key::build_key(object_type, source)?;
        let attrs = attrs.ok_or_else(|| SaiError::invalid("null attribute list"))?;
        let entry = codec::encode_attributes(self.meta.as_ref(), object_type, attrs)?;
        self.publish(&key, &entry, Op::Create)
    }

    /// Set a single attribute.
    pub fn set(
        &self,
        object_type: ObjectType,
        source: &IdentifierSource,
        attr: &Attribute,
    ) -> SaiResult<()> {
        let key = key::build_key(object_type, source)?;
        let entry =
            codec::encode_attributes(self.meta.as_ref(), object_type, std::slice::from_ref(attr))?;
        self.publish(&key, &entry, Op::Set)
    }

    /// Remove the target. The entry is empty.
    pub fn remove(&self, object_type: ObjectType, source: &IdentifierSource) -> SaiResult<()> {
        let key = key::build_key(object_type, source)?;
        self.publish(&key, &[], Op::Remove)
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("allocator", &self.allocator)
            .finish_non_exhaustive()
    }
}
