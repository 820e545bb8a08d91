//! Recording fakes of the platform seams, for unit tests.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::{LocationError, PermissionError};
use crate::permission::PermissionState;
use crate::platform::{EventSink, FixOrigin, LocationSource, PermissionSource, SubscriptionHandle};
use crate::sample::{LocationOptions, LocationSample};

#[derive(Default)]
struct LocationState {
    next_id: i32,
    one_shot_sinks: Vec<EventSink>,
    subscriptions: Vec<(SubscriptionHandle, EventSink)>,
    live: Vec<SubscriptionHandle>,
    one_shot_calls: usize,
    subscribe_calls: usize,
    cancel_calls: usize,
    last_options: Option<LocationOptions>,
    fail_request_once: Option<String>,
    fail_subscribe: Option<String>,
}

#[derive(Clone, Default)]
pub(crate) struct FakeLocation {
    state: Rc<RefCell<LocationState>>,
}

impl FakeLocation {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn one_shot_calls(&self) -> usize {
        self.state.borrow().one_shot_calls
    }

    pub(crate) fn subscribe_calls(&self) -> usize {
        self.state.borrow().subscribe_calls
    }

    pub(crate) fn cancel_calls(&self) -> usize {
        self.state.borrow().cancel_calls
    }

    pub(crate) fn live_subscriptions(&self) -> usize {
        self.state.borrow().live.len()
    }

    pub(crate) fn last_options(&self) -> Option<LocationOptions> {
        self.state.borrow().last_options
    }

    pub(crate) fn fail_next_request_once(&self, message: &str) {
        self.state.borrow_mut().fail_request_once = Some(message.to_string());
    }

    pub(crate) fn fail_next_subscribe(&self, message: &str) {
        self.state.borrow_mut().fail_subscribe = Some(message.to_string());
    }

    pub(crate) fn emit_one_shot_fix(&self, sample: LocationSample) {
        let st = self.state.borrow();
        if let Some(sink) = st.one_shot_sinks.last() {
            sink.fix(FixOrigin::OneShot, sample);
        }
    }

    pub(crate) fn emit_one_shot_failure(&self, error: LocationError) {
        let st = self.state.borrow();
        if let Some(sink) = st.one_shot_sinks.last() {
            sink.failed(FixOrigin::OneShot, error);
        }
    }

    pub(crate) fn emit_subscription_fix(&self, sample: LocationSample) {
        let st = self.state.borrow();
        if let Some((h, sink)) = st.subscriptions.last() {
            sink.fix(FixOrigin::Subscription(*h), sample);
        }
    }

    pub(crate) fn emit_subscription_failure(&self, error: LocationError) {
        let st = self.state.borrow();
        if let Some((h, sink)) = st.subscriptions.last() {
            sink.failed(FixOrigin::Subscription(*h), error);
        }
    }
}

impl LocationSource for FakeLocation {
    fn request_once(&self, options: &LocationOptions, sink: EventSink) -> Result<(), LocationError> {
        let mut st = self.state.borrow_mut();
        st.one_shot_calls += 1;
        st.last_options = Some(*options);
        if let Some(msg) = st.fail_request_once.take() {
            return Err(LocationError::platform(msg));
        }
        st.one_shot_sinks.push(sink);
        Ok(())
    }

    fn subscribe(
        &self,
        options: &LocationOptions,
        sink: EventSink,
    ) -> Result<SubscriptionHandle, LocationError> {
        let mut st = self.state.borrow_mut();
        st.subscribe_calls += 1;
        st.last_options = Some(*options);
        if let Some(msg) = st.fail_subscribe.take() {
            return Err(LocationError::platform(msg));
        }
        st.next_id += 1;
        let handle = SubscriptionHandle::from_raw(st.next_id);
        st.subscriptions.push((handle, sink));
        st.live.push(handle);
        Ok(handle)
    }

    fn cancel(&self, handle: SubscriptionHandle) {
        let mut st = self.state.borrow_mut();
        st.cancel_calls += 1;
        st.live.retain(|h| *h != handle);
    }
}

#[derive(Default)]
struct PermissionsState {
    names: Vec<String>,
    sinks: Vec<EventSink>,
    failing: bool,
}

#[derive(Clone, Default)]
pub(crate) struct FakePermissions {
    state: Rc<RefCell<PermissionsState>>,
}

impl FakePermissions {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn failing() -> Self {
        let p = Self::default();
        p.state.borrow_mut().failing = true;
        p
    }

    pub(crate) fn watched_names(&self) -> Vec<String> {
        self.state.borrow().names.clone()
    }

    /// Simulate the platform pushing a state change.
    pub(crate) fn push(&self, state: PermissionState) {
        for sink in &self.state.borrow().sinks {
            sink.permission(state);
        }
    }
}

impl PermissionSource for FakePermissions {
    fn watch(&self, name: &str, sink: EventSink) -> Result<(), PermissionError> {
        let mut st = self.state.borrow_mut();
        if st.failing {
            return Err(PermissionError::QueryFailed("query() rejected".to_string()));
        }
        st.names.push(name.to_string());
        st.sinks.push(sink);
        Ok(())
    }
}
