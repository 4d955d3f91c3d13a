// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Blocking get over a broker with no request/response primitive.
//!
//! A call walks a fixed state machine:
//!
//! ```text
//! Idle --send--> Sent --wait--> Waiting --+--> Resolved
//!                                         +--> TimedOut
//!                                         +--> Failed
//! ```
//!
//! - `send` first discards whatever is already queued on the get-response
//!   channel. Anything there was addressed to an earlier call, possibly one
//!   on the same key that timed out.
//! - It then publishes the placeholder entry tagged `get` on the state channel,
//!   then a `delget` tombstone for the same key on the get-response channel.
//! - `wait` polls the get-response channel. Records with another tag or
//!   another key are skipped. The first matching `getresponse` resolves the
//!   call; its key suffix is the agent's status.
//! - A poll that comes back empty ends the call. So does running past the
//!   overall deadline, measured on the injected [`Clock`].
//! - A transport error while waiting ends the call in `Failed`.
//!
//! No terminal state is ever left, and a late response is never taken as the
//! answer to a later call.

use crate::codec::{self, DecodeMode};
use crate::error::{SaiError, SaiResult};
use crate::key::{self, IdentifierSource};
use crate::meta::MetadataLookup;
use crate::object_type::ObjectType;
use crate::status::Status;
use crate::transfer::{self, GetOutcome};
use crate::transport::{Consumer, Envelope, Op, Producer, Readiness};
use crate::types::Attribute;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default bound on a single poll.
pub const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_secs(2);

/// Default bound on a whole call.
pub const DEFAULT_GET_DEADLINE: Duration = Duration::from_secs(6);

/// Time source for the call deadline.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Where a get call is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GetState {
    Idle,
    Sent,
    Waiting,
    Resolved,
    TimedOut,
    /// The transport failed mid-wait.
    Failed,
}

impl GetState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Resolved | Self::TimedOut | Self::Failed)
    }
}

/// Correlates get requests with their asynchronous responses.
pub struct GetCorrelator {
    requests: Arc<dyn Producer>,
    tombstones: Arc<dyn Producer>,
    responses: Arc<dyn Consumer>,
    meta: Arc<dyn MetadataLookup>,
    clock: Arc<dyn Clock>,
    poll_timeout: Duration,
    deadline: Duration,
}

impl GetCorrelator {
    /// `requests` is the state channel; `tombstones` and `responses` are the
    /// two halves of the get-response channel.
    pub fn new(
        requests: Arc<dyn Producer>,
        tombstones: Arc<dyn Producer>,
        responses: Arc<dyn Consumer>,
        meta: Arc<dyn MetadataLookup>,
    ) -> Self {
        Self {
            requests,
            tombstones,
            responses,
            meta,
            clock: Arc::new(SystemClock),
            poll_timeout: DEFAULT_POLL_TIMEOUT,
            deadline: DEFAULT_GET_DEADLINE,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_poll_timeout(mut self, poll_timeout: Duration) -> Self {
        self.poll_timeout = poll_timeout;
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn poll_timeout(&self) -> Duration {
        self.poll_timeout
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    /// Start a call in the `Idle` state.
    pub fn begin(
        &self,
        object_type: ObjectType,
        source: &IdentifierSource,
    ) -> SaiResult<GetCall<'_>> {
        let key = key::build_key(object_type, source)?;
        Ok(GetCall {
            correlator: self,
            object_type,
            key,
            state: GetState::Idle,
            started: None,
        })
    }

    /// Fetch `attrs` for the target, filling the slots in place.
    pub fn get(
        &self,
        object_type: ObjectType,
        source: &IdentifierSource,
        attrs: &mut [Attribute],
    ) -> SaiResult<GetOutcome> {
        let mut call = self.begin(object_type, source)?;
        call.send(attrs)?;
        call.wait(attrs)
    }
}

impl std::fmt::Debug for GetCorrelator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GetCorrelator")
            .field("poll_timeout", &self.poll_timeout)
            .field("deadline", &self.deadline)
            .finish_non_exhaustive()
    }
}

/// One in-flight get.
#[derive(Debug)]
pub struct GetCall<'a> {
    correlator: &'a GetCorrelator,
    object_type: ObjectType,
    key: String,
    state: GetState,
    started: Option<Instant>,
}

impl<'a> GetCall<'a> {
    pub fn state(&self) -> GetState {
        self.state
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    fn expect_state(&self, expected: GetState) -> SaiResult<()> {
        if self.state != expected {
            return Err(SaiError::invalid(format!(
                "get call for {} is {:?}, expected {:?}",
                self.key, self.state, expected
            )));
        }
        Ok(())
    }

    /// `Idle -> Sent`. Nothing is published if the placeholders do not encode.
    pub fn send(&mut self, attrs: &[Attribute]) -> SaiResult<()> {
        self.expect_state(GetState::Idle)?;
        if attrs.is_empty() {
            return Err(SaiError::invalid("get with no attributes"));
        }

        let c = self.correlator;
        let entry = codec::encode_placeholders(c.meta.as_ref(), self.object_type, attrs)?;

        self.discard_stale()?;
        log::debug!("[get] request {} ({} attributes)", self.key, entry.len());
        c.requests.publish(&self.key, &entry, Op::Get.as_str())?;
        c.tombstones.publish(&self.key, &[], Op::DelGet.as_str())?;

        self.started = Some(c.clock.now());
        self.state = GetState::Sent;
        Ok(())
    }

    /// Drop everything queued before our request goes out.
    fn discard_stale(&self) -> SaiResult<()> {
        let mut dropped = 0usize;
        while let Some(envelope) = self.correlator.responses.pop()? {
            log::debug!(
                "[get] dropping stale {} record for {} before requesting {}",
                envelope.op,
                envelope.key,
                self.key
            );
            dropped += 1;
        }
        if dropped > 0 {
            log::warn!("[get] dropped {} stale record(s) before {}", dropped, self.key);
        }
        Ok(())
    }

    /// `Sent -> Waiting -> {Resolved, TimedOut, Failed}`.
    pub fn wait(&mut self, attrs: &mut [Attribute]) -> SaiResult<GetOutcome> {
        self.expect_state(GetState::Sent)?;
        self.state = GetState::Waiting;

        let result = self.wait_inner(attrs);
        if self.state == GetState::Waiting {
            self.state = GetState::Failed;
        }
        result
    }

    fn wait_inner(&mut self, attrs: &mut [Attribute]) -> SaiResult<GetOutcome> {
        let c = self.correlator;
        let started = self.started.unwrap_or_else(|| c.clock.now());

        loop {
            let elapsed = c.clock.now().saturating_duration_since(started);
            if elapsed >= c.deadline {
                log::warn!("[get] {} passed its {:?} deadline", self.key, c.deadline);
                self.state = GetState::TimedOut;
                return Err(SaiError::Timeout(elapsed));
            }

            let wait = c.poll_timeout.min(c.deadline - elapsed);
            let readiness = c.responses.poll(wait).map_err(|e| {
                log::error!("[get] transport failed while waiting on {}: {}", self.key, e);
                e
            })?;
            if readiness == Readiness::NoData {
                log::warn!("[get] no response for {} within {:?}", self.key, wait);
                self.state = GetState::TimedOut;
                return Err(SaiError::Timeout(
                    c.clock.now().saturating_duration_since(started),
                ));
            }

            let Some(envelope) = c.responses.pop()? else {
                continue;
            };

            if let Some(status) = self.match_response(&envelope) {
                self.state = GetState::Resolved;
                return self.resolve(status, &envelope, attrs);
            }
        }
    }

    /// Status of `envelope` if it answers this call, `None` for foreign traffic.
    fn match_response(&self, envelope: &Envelope) -> Option<Status> {
        if !envelope.is(Op::GetResponse) {
            log::debug!(
                "[get] skipping {} record for {} while waiting on {}",
                envelope.op,
                envelope.key,
                self.key
            );
            return None;
        }

        match key::parse_response_key(&envelope.key) {
            Ok((base, status)) if base == self.key => Some(status),
            Ok((base, _)) => {
                log::warn!(
                    "[get] skipping response for {} while waiting on {}",
                    base,
                    self.key
                );
                None
            }
            Err(e) => {
                log::warn!("[get] skipping malformed response key: {}", e);
                None
            }
        }
    }

    fn resolve(
        &self,
        status: Status,
        envelope: &Envelope,
        attrs: &mut [Attribute],
    ) -> SaiResult<GetOutcome> {
        let mode = match status {
            Status::SUCCESS => DecodeMode::Full,
            Status::BUFFER_OVERFLOW => DecodeMode::CountOnly,
            other => {
                log::warn!("[get] agent answered {} with {}", self.key, other);
                return Err(SaiError::RemoteFailure(other));
            }
        };

        let meta = self.correlator.meta.as_ref();
        let decoded = codec::decode(meta, self.object_type, &envelope.entry, mode)?;
        let outcome = transfer::reconcile(attrs, &decoded, mode)?;
        log::debug!("[get] {} resolved: {:?}", self.key, outcome);
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::{attr, MetadataTable};
    use crate::oid::ObjectId;
    use crate::transport::{FieldValue, TransportError};
    use crate::types::{AttrValue, ValueList};
    use parking_lot::Mutex;
    use std::collections::VecDeque;

    /// Clock that only moves when told to.
    struct ManualClock {
        now: Mutex<Instant>,
    }

    impl ManualClock {
        fn new() -> Self {
            Self {
                now: Mutex::new(Instant::now()),
            }
        }

        fn advance(&self, by: Duration) {
            *self.now.lock() += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            *self.now.lock()
        }
    }

    #[derive(Default)]
    struct RecordingProducer {
        sent: Mutex<Vec<Envelope>>,
        answers: Option<Arc<ScriptedConsumer>>,
    }

    impl Producer for RecordingProducer {
        fn publish(
            &self,
            key: &str,
            entry: &[FieldValue],
            op: &str,
        ) -> Result<(), TransportError> {
            self.sent.lock().push(Envelope::new(key, op, entry.to_vec()));
            if let Some(answers) = &self.answers {
                answers.release();
            }
            Ok(())
        }
    }

    /// Replays a fixed script, released once the request is published.
    /// Each poll costs its full timeout on the clock when nothing is queued,
    /// and one millisecond otherwise.
    struct ScriptedConsumer {
        held: Mutex<VecDeque<Envelope>>,
        queue: Mutex<VecDeque<Envelope>>,
        clock: Arc<ManualClock>,
        polls: Mutex<usize>,
        broken: Mutex<bool>,
    }

    impl ScriptedConsumer {
        fn release(&self) {
            let mut held = self.held.lock();
            self.queue.lock().extend(held.drain(..));
        }
    }

    impl Consumer for ScriptedConsumer {
        fn poll(&self, timeout: Duration) -> Result<Readiness, TransportError> {
            *self.polls.lock() += 1;
            if *self.broken.lock() {
                return Err(TransportError::Closed("GETRESPONSE".into()));
            }
            if self.queue.lock().is_empty() {
                self.clock.advance(timeout);
                Ok(Readiness::NoData)
            } else {
                self.clock.advance(Duration::from_millis(1));
                Ok(Readiness::Ready)
            }
        }

        fn pop(&self) -> Result<Option<Envelope>, TransportError> {
            Ok(self.queue.lock().pop_front())
        }
    }

    struct Harness {
        requests: Arc<RecordingProducer>,
        tombstones: Arc<RecordingProducer>,
        responses: Arc<ScriptedConsumer>,
        correlator: GetCorrelator,
    }

    /// `stale` is queued before the call starts; `script` answers the request.
    fn harness_with_stale(stale: Vec<Envelope>, script: Vec<Envelope>) -> Harness {
        let clock = Arc::new(ManualClock::new());
        let responses = Arc::new(ScriptedConsumer {
            held: Mutex::new(script.into()),
            queue: Mutex::new(stale.into()),
            clock: clock.clone(),
            polls: Mutex::new(0),
            broken: Mutex::new(false),
        });
        let requests = Arc::new(RecordingProducer {
            sent: Mutex::new(Vec::new()),
            answers: Some(responses.clone()),
        });
        let tombstones = Arc::new(RecordingProducer::default());
        let correlator = GetCorrelator::new(
            requests.clone(),
            tombstones.clone(),
            responses.clone(),
            Arc::new(MetadataTable::standard()),
        )
        .with_clock(clock)
        .with_poll_timeout(Duration::from_secs(2))
        .with_deadline(Duration::from_secs(6));

        Harness {
            requests,
            tombstones,
            responses,
            correlator,
        }
    }

    fn harness(script: Vec<Envelope>) -> Harness {
        harness_with_stale(Vec::new(), script)
    }

    fn port() -> IdentifierSource {
        ObjectId::compose(ObjectType::Port, 7).into()
    }

    const PORT_KEY: &str = "SAI_OBJECT_TYPE_PORT:oid:0x1000000000007";

    #[test]
    fn send_publishes_request_then_tombstone() {
        let h = harness(Vec::new());
        let mut call = h.correlator.begin(ObjectType::Port, &port()).expect("begin");
        assert_eq!(call.state(), GetState::Idle);
        assert_eq!(call.key(), PORT_KEY);

        let attrs = [
            Attribute::new(attr::port::SPEED, AttrValue::U32(0)),
            Attribute::new(
                attr::port::HW_LANE_LIST,
                AttrValue::U32List(ValueList::with_capacity(4)),
            ),
        ];
        call.send(&attrs).expect("send");
        assert_eq!(call.state(), GetState::Sent);

        let sent = h.requests.sent.lock();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].op, "get");
        assert_eq!(sent[0].key, PORT_KEY);
        assert_eq!(
            sent[0].entry,
            vec![FieldValue::new("3", "null"), FieldValue::new("2", "4:null")]
        );

        let tomb = h.tombstones.sent.lock();
        assert_eq!(tomb.len(), 1);
        assert_eq!(tomb[0].op, "delget");
        assert_eq!(tomb[0].key, PORT_KEY);
        assert!(tomb[0].entry.is_empty());
    }

    #[test]
    fn resolves_on_matching_response_after_foreign_traffic() {
        let h = harness(vec![
            Envelope::new(PORT_KEY, "delget", Vec::new()),
            Envelope::new(
                "SAI_OBJECT_TYPE_PORT:oid:0x1000000000001:0",
                "getresponse",
                Vec::new(),
            ),
            Envelope::new(
                format!("{}:0", PORT_KEY),
                "getresponse",
                vec![FieldValue::new("5", "9100"), FieldValue::new("3", "100000")],
            ),
        ]);

        let mut attrs = [
            Attribute::new(attr::port::SPEED, AttrValue::U32(0)),
            Attribute::new(attr::port::MTU, AttrValue::U32(0)),
        ];
        let mut call = h.correlator.begin(ObjectType::Port, &port()).expect("begin");
        call.send(&attrs).expect("send");
        let outcome = call.wait(&mut attrs).expect("wait");

        assert_eq!(outcome, GetOutcome::Complete);
        assert_eq!(call.state(), GetState::Resolved);
        assert_eq!(attrs[0].value, AttrValue::U32(100_000));
        assert_eq!(attrs[1].value, AttrValue::U32(9100));
    }

    #[test]
    fn empty_poll_times_out_without_retry() {
        let h = harness(Vec::new());
        let mut attrs = [Attribute::new(attr::port::SPEED, AttrValue::U32(0))];
        let mut call = h.correlator.begin(ObjectType::Port, &port()).expect("begin");
        call.send(&attrs).expect("send");

        let err = call.wait(&mut attrs).expect_err("timeout");
        assert!(matches!(err, SaiError::Timeout(_)));
        assert_eq!(err.status(), Status::FAILURE);
        assert_eq!(call.state(), GetState::TimedOut);
        assert_eq!(*h.responses.polls.lock(), 1);
        assert_eq!(attrs[0].value, AttrValue::U32(0));
    }

    #[test]
    fn endless_foreign_traffic_hits_the_deadline() {
        let script = (0..10_000)
            .map(|_| Envelope::new("SAI_OBJECT_TYPE_VLAN:1", "set", Vec::new()))
            .collect();
        let h = harness(script);
        let mut attrs = [Attribute::new(attr::port::SPEED, AttrValue::U32(0))];

        let err = h
            .correlator
            .get(ObjectType::Port, &port(), &mut attrs)
            .expect_err("deadline");
        assert!(matches!(err, SaiError::Timeout(d) if d >= Duration::from_secs(6)));
        // One millisecond per foreign record.
        assert_eq!(*h.responses.polls.lock(), 6000);
    }

    #[test]
    fn overflow_reports_counts_only() {
        let h = harness(vec![Envelope::new(
            format!("{}:-8", PORT_KEY),
            "getresponse",
            vec![FieldValue::new("2", "5:null")],
        )]);
        let mut attrs = [Attribute::new(
            attr::port::HW_LANE_LIST,
            AttrValue::U32List(ValueList {
                count: 0,
                items: vec![91, 92],
            }),
        )];

        let outcome = h
            .correlator
            .get(ObjectType::Port, &port(), &mut attrs)
            .expect("overflow is not an error");
        assert_eq!(outcome, GetOutcome::Overflow);
        assert_eq!(
            attrs[0].value,
            AttrValue::U32List(ValueList {
                count: 5,
                items: vec![91, 92],
            })
        );
    }

    #[test]
    fn other_status_is_passed_through() {
        let h = harness(vec![Envelope::new(
            format!("{}:-7", PORT_KEY),
            "getresponse",
            vec![FieldValue::new("3", "1")],
        )]);
        let mut attrs = [Attribute::new(attr::port::SPEED, AttrValue::U32(0))];
        let err = h
            .correlator
            .get(ObjectType::Port, &port(), &mut attrs)
            .expect_err("remote failure");
        assert!(matches!(err, SaiError::RemoteFailure(Status::ITEM_NOT_FOUND)));
        assert_eq!(attrs[0].value, AttrValue::U32(0));
    }

    #[test]
    fn calls_cannot_be_replayed() {
        let h = harness(Vec::new());
        let mut attrs = [Attribute::new(attr::port::SPEED, AttrValue::U32(0))];
        let mut call = h.correlator.begin(ObjectType::Port, &port()).expect("begin");

        assert!(call.wait(&mut attrs).is_err());
        call.send(&attrs).expect("send");
        assert!(call.send(&attrs).is_err());
        assert!(call.wait(&mut attrs).is_err());
        assert!(call.state().is_terminal());
        assert!(call.wait(&mut attrs).is_err());
        assert_eq!(h.requests.sent.lock().len(), 1);
    }

    #[test]
    fn bad_placeholder_publishes_nothing() {
        let h = harness(Vec::new());
        let mut attrs = [
            Attribute::new(attr::port::SPEED, AttrValue::U32(0)),
            Attribute::new(4242, AttrValue::U32(0)),
        ];
        let err = h
            .correlator
            .get(ObjectType::Port, &port(), &mut attrs)
            .expect_err("unknown attribute");
        assert!(matches!(err, SaiError::UnknownAttribute { index: 1, .. }));
        assert_eq!(err.status(), Status::INVALID_PARAMETER);
        assert!(h.requests.sent.lock().is_empty());
        assert!(h.tombstones.sent.lock().is_empty());

        assert!(h
            .correlator
            .get(ObjectType::Port, &port(), &mut [])
            .is_err());
    }

    #[test]
    fn stale_response_on_same_key_is_discarded() {
        let late = Envelope::new(
            format!("{}:0", PORT_KEY),
            "getresponse",
            vec![FieldValue::new("3", "111")],
        );
        let fresh = Envelope::new(
            format!("{}:0", PORT_KEY),
            "getresponse",
            vec![FieldValue::new("3", "222")],
        );
        let h = harness_with_stale(vec![late], vec![fresh]);

        let mut attrs = [Attribute::new(attr::port::SPEED, AttrValue::U32(0))];
        let outcome = h
            .correlator
            .get(ObjectType::Port, &port(), &mut attrs)
            .expect("get");
        assert_eq!(outcome, GetOutcome::Complete);
        assert_eq!(attrs[0].value, AttrValue::U32(222));
        assert!(h.responses.queue.lock().is_empty());
    }

    #[test]
    fn transport_error_while_waiting_is_terminal() {
        let h = harness(Vec::new());
        let mut attrs = [Attribute::new(attr::port::SPEED, AttrValue::U32(0))];
        let mut call = h.correlator.begin(ObjectType::Port, &port()).expect("begin");
        call.send(&attrs).expect("send");

        *h.responses.broken.lock() = true;
        let err = call.wait(&mut attrs).expect_err("closed");
        assert!(matches!(err, SaiError::Transport(_)));
        assert_eq!(err.status(), Status::FAILURE);
        assert_eq!(call.state(), GetState::Failed);
        assert!(call.state().is_terminal());
        assert!(call.wait(&mut attrs).is_err());
    }
}
