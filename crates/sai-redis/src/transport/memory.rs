// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! In-process broker.
//!
//! Named MPMC channels (crossbeam) standing in for the real broker. Useful
//! for loopback deployments where the agent runs in the same process, and
//! for driving the client from tests.

use super::{Consumer, Envelope, FieldValue, Producer, Readiness, TransportError};
use crossbeam::channel::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

type Pipe = (Sender<Envelope>, Receiver<Envelope>);

/// Registry of named channels. Cheap to clone.
#[derive(Clone, Default)]
pub struct Broker {
    channels: Arc<Mutex<HashMap<String, Pipe>>>,
}

impl Broker {
    pub fn new() -> Self {
        Self::default()
    }

    fn pipe(&self, name: &str) -> Pipe {
        let mut channels = self.channels.lock();
        channels
            .entry(name.to_string())
            .or_insert_with(channel::unbounded)
            .clone()
    }

    /// Producer for `name`, creating the channel on first use.
    pub fn producer(&self, name: &str) -> MemoryProducer {
        let (tx, _) = self.pipe(name);
        MemoryProducer {
            channel: name.to_string(),
            tx,
        }
    }

    /// Consumer for `name`, creating the channel on first use.
    ///
    /// Consumers on the same channel compete: each record goes to one of them.
    pub fn consumer(&self, name: &str) -> MemoryConsumer {
        let (_, rx) = self.pipe(name);
        MemoryConsumer {
            channel: name.to_string(),
            rx,
            pending: Mutex::new(VecDeque::new()),
        }
    }

    /// Records queued on `name` and not yet taken by any consumer.
    pub fn backlog(&self, name: &str) -> usize {
        self.channels
            .lock()
            .get(name)
            .map(|(_, rx)| rx.len())
            .unwrap_or(0)
    }
}

impl std::fmt::Debug for Broker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let channels = self.channels.lock();
        f.debug_struct("Broker")
            .field("channels", &channels.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Publishing end of a named in-memory channel.
#[derive(Debug, Clone)]
pub struct MemoryProducer {
    channel: String,
    tx: Sender<Envelope>,
}

impl MemoryProducer {
    pub fn channel(&self) -> &str {
        &self.channel
    }
}

impl Producer for MemoryProducer {
    fn publish(&self, key: &str, entry: &[FieldValue], op: &str) -> Result<(), TransportError> {
        log::trace!("[memory] {} <- {} {}", self.channel, op, key);
        self.tx
            .send(Envelope::new(key, op, entry.to_vec()))
            .map_err(|_| TransportError::Closed(self.channel.clone()))
    }
}

/// Receiving end of a named in-memory channel.
///
/// `poll` moves at most one record into a local buffer so that a following
/// `pop` never blocks.
#[derive(Debug)]
pub struct MemoryConsumer {
    channel: String,
    rx: Receiver<Envelope>,
    pending: Mutex<VecDeque<Envelope>>,
}

impl MemoryConsumer {
    pub fn channel(&self) -> &str {
        &self.channel
    }
}

impl Consumer for MemoryConsumer {
    fn poll(&self, timeout: Duration) -> Result<Readiness, TransportError> {
        let mut pending = self.pending.lock();
        if !pending.is_empty() {
            return Ok(Readiness::Ready);
        }

        match self.rx.recv_timeout(timeout) {
            Ok(env) => {
                pending.push_back(env);
                Ok(Readiness::Ready)
            }
            Err(RecvTimeoutError::Timeout) => Ok(Readiness::NoData),
            Err(RecvTimeoutError::Disconnected) => {
                Err(TransportError::Closed(self.channel.clone()))
            }
        }
    }

    fn pop(&self) -> Result<Option<Envelope>, TransportError> {
        if let Some(env) = self.pending.lock().pop_front() {
            return Ok(Some(env));
        }

        match self.rx.try_recv() {
            Ok(env) => Ok(Some(env)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(TransportError::Closed(self.channel.clone())),
        }
    }
}
