//! Seams to the host platform's location and permission capabilities.
//!
//! Platform calls never report back synchronously. Adapters hold an
//! [`EventSink`] and push [`TrackerEvent`]s into it from their callbacks; the
//! owner of the matching receiver feeds them to
//! [`LocationController::handle_event`](crate::controller::LocationController::handle_event)
//! in arrival order.

use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::error::{LocationError, PermissionError};
use crate::permission::PermissionState;
use crate::sample::{LocationOptions, LocationSample};

/// Opaque id of a continuous subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle(i32);

impl SubscriptionHandle {
    pub fn from_raw(id: i32) -> Self {
        Self(id)
    }

    pub fn raw(self) -> i32 {
        self.0
    }
}

/// Which platform call a fix or failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixOrigin {
    OneShot,
    Subscription(SubscriptionHandle),
}

#[derive(Debug, Clone, PartialEq)]
pub enum TrackerEvent {
    Fix {
        origin: FixOrigin,
        sample: LocationSample,
    },
    Failed {
        origin: FixOrigin,
        error: LocationError,
    },
    Permission(PermissionState),
}

/// Sending half handed to platform adapters.
#[derive(Debug, Clone)]
pub struct EventSink {
    tx: UnboundedSender<TrackerEvent>,
}

pub fn event_channel() -> (EventSink, UnboundedReceiver<TrackerEvent>) {
    let (tx, rx) = mpsc::unbounded();
    (EventSink { tx }, rx)
}

impl EventSink {
    pub fn send(&self, event: TrackerEvent) {
        if self.tx.unbounded_send(event).is_err() {
            tracing::debug!("tracker event dropped: receiver closed");
        }
    }

    pub fn fix(&self, origin: FixOrigin, sample: LocationSample) {
        self.send(TrackerEvent::Fix { origin, sample });
    }

    pub fn failed(&self, origin: FixOrigin, error: LocationError) {
        self.send(TrackerEvent::Failed { origin, error });
    }

    pub fn permission(&self, state: PermissionState) {
        self.send(TrackerEvent::Permission(state));
    }
}

/// Location sensing capability.
pub trait LocationSource {
    /// Ask for a single fix. The answer arrives later through `sink`
    /// tagged [`FixOrigin::OneShot`]. Cannot be cancelled.
    fn request_once(&self, options: &LocationOptions, sink: EventSink) -> Result<(), LocationError>;

    /// Open a continuous subscription. Every update arrives through `sink`
    /// tagged with the returned handle until [`cancel`](Self::cancel).
    fn subscribe(
        &self,
        options: &LocationOptions,
        sink: EventSink,
    ) -> Result<SubscriptionHandle, LocationError>;

    fn cancel(&self, handle: SubscriptionHandle);
}

/// Permission query capability.
pub trait PermissionSource {
    /// Start mirroring permission `name`. The current state, and every later
    /// change, arrive through `sink` as [`TrackerEvent::Permission`].
    fn watch(&self, name: &str, sink: EventSink) -> Result<(), PermissionError>;
}
