//! The location controller: one optional subscription, two commands, and the
//! callback path that reflects fixes into the presentation surface.

use futures::channel::mpsc::UnboundedReceiver;

use crate::config::TrackerConfig;
use crate::error::{LocationError, TrackerError};
use crate::fmt::fmt_fixed;
use crate::permission::{PermissionState, Unavailable, GEOLOCATION_PERMISSION};
use crate::platform::{
    event_channel, EventSink, FixOrigin, LocationSource, PermissionSource, SubscriptionHandle,
    TrackerEvent,
};
use crate::sample::LocationSample;
use crate::surface::{PresentationSurface, Slot, Status};

impl From<&LocationError> for Status {
    fn from(e: &LocationError) -> Self {
        match e {
            LocationError::PermissionDenied => Status::PermissionDenied,
            LocationError::PositionUnavailable => Status::PositionUnavailable,
            LocationError::Timeout => Status::TimedOut,
            LocationError::Unknown { .. } => Status::Failed,
        }
    }
}

pub struct LocationController<L, S> {
    /// `None` when the host has no location capability.
    source: Option<L>,
    surface: S,
    config: TrackerConfig,
    sink: EventSink,
    active: Option<SubscriptionHandle>,
}

impl<L: LocationSource, S: PresentationSurface> LocationController<L, S> {
    /// Build a controller and the receiver its platform events arrive on.
    /// The receiver must be drained into [`handle_event`](Self::handle_event).
    pub fn new(
        source: Option<L>,
        surface: S,
        config: TrackerConfig,
    ) -> (Self, UnboundedReceiver<TrackerEvent>) {
        let (sink, rx) = event_channel();
        let mut controller = Self {
            source,
            surface,
            config,
            sink,
            active: None,
        };
        controller.surface.set_stop_enabled(false);
        (controller, rx)
    }

    pub fn is_tracking(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_subscription(&self) -> Option<SubscriptionHandle> {
        self.active
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Ask for a fix now and keep following the position.
    ///
    /// Calling this while a subscription is open issues another one-shot
    /// request but never opens a second subscription.
    pub fn start_tracking(&mut self) -> Result<(), TrackerError> {
        let Some(source) = self.source.as_ref() else {
            self.status(Status::CapabilityAbsent);
            return Err(TrackerError::CapabilityAbsent);
        };

        self.surface.write(Slot::Status, Status::Acquiring.text());

        let options = self.config.location;
        if let Err(e) = source.request_once(&options, self.sink.clone()) {
            self.report_failure(FixOrigin::OneShot, &e);
            return Err(e.into());
        }

        if self.active.is_some() {
            return Ok(());
        }

        match source.subscribe(&options, self.sink.clone()) {
            Ok(handle) => {
                tracing::info!(handle = handle.raw(), "location tracking started");
                self.active = Some(handle);
                self.surface.set_stop_enabled(true);
                self.status(Status::TrackingStarted);
                Ok(())
            }
            Err(e) => {
                self.report_failure(FixOrigin::OneShot, &e);
                Err(e.into())
            }
        }
    }

    /// Cancel the subscription if there is one. No-op otherwise.
    pub fn stop_tracking(&mut self) {
        let Some(handle) = self.active.take() else {
            return;
        };
        if let Some(source) = self.source.as_ref() {
            source.cancel(handle);
        }
        tracing::info!(handle = handle.raw(), "location tracking stopped");
        self.status(Status::Stopped);
        self.surface.set_stop_enabled(false);
    }

    /// Read the permission state once and mirror every later change.
    pub fn mirror_permissions<P: PermissionSource>(&mut self, source: Option<&P>) {
        let Some(source) = source else {
            self.show_permission(PermissionState::Unavailable(Unavailable::CapabilityAbsent));
            return;
        };
        if let Err(e) = source.watch(GEOLOCATION_PERMISSION, self.sink.clone()) {
            tracing::warn!(error = %e, "permission query failed");
            self.show_permission(PermissionState::Unavailable(Unavailable::QueryFailed));
        }
    }

    pub fn handle_event(&mut self, event: TrackerEvent) {
        match event {
            TrackerEvent::Fix { origin, sample } => {
                if self.is_stale(origin) {
                    tracing::debug!(?origin, "dropping fix from a cancelled subscription");
                    return;
                }
                self.show_sample(&sample);
            }
            TrackerEvent::Failed { origin, error } => {
                if self.is_stale(origin) {
                    tracing::debug!(?origin, "dropping failure from a cancelled subscription");
                    return;
                }
                self.report_failure(origin, &error);
            }
            TrackerEvent::Permission(state) => self.show_permission(state),
        }
    }

    /// Apply every event already queued on `rx` without waiting.
    pub fn drain(&mut self, rx: &mut UnboundedReceiver<TrackerEvent>) -> usize {
        let mut n = 0;
        while let Ok(event) = rx.try_recv() {
            self.handle_event(event);
            n += 1;
        }
        n
    }

    fn is_stale(&self, origin: FixOrigin) -> bool {
        match origin {
            FixOrigin::OneShot => false,
            FixOrigin::Subscription(h) => self.active != Some(h),
        }
    }

    fn show_sample(&mut self, sample: &LocationSample) {
        let coord = self.config.coordinate_decimals;
        self.surface
            .write(Slot::Latitude, &fmt_fixed(sample.latitude, coord));
        self.surface
            .write(Slot::Longitude, &fmt_fixed(sample.longitude, coord));
        self.surface.write(
            Slot::Accuracy,
            &fmt_fixed(sample.accuracy_m, self.config.accuracy_decimals),
        );
        self.surface.write_timestamp(sample.captured_at_epoch_ms);
        self.status(Status::Updated);
        self.surface
            .reveal_map_link(&sample.maps_url_with_base(&self.config.maps_base_url));
    }

    fn show_permission(&mut self, state: PermissionState) {
        self.surface.write(Slot::Permission, state.label());
    }

    // The subscription is left alone: the platform keeps retrying on its own.
    fn report_failure(&mut self, origin: FixOrigin, error: &LocationError) {
        tracing::warn!(?origin, %error, "location failure");
        self.status(Status::from(error));
    }

    fn status(&mut self, status: Status) {
        self.surface.write(Slot::Status, status.text());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::SurfaceModel;
    use crate::testing::{FakeLocation, FakePermissions};

    type Controller = LocationController<FakeLocation, SurfaceModel>;

    fn controller() -> (
        Controller,
        FakeLocation,
        UnboundedReceiver<TrackerEvent>,
    ) {
        let fake = FakeLocation::new();
        let (c, rx) = LocationController::new(
            Some(fake.clone()),
            SurfaceModel::new(),
            TrackerConfig::default(),
        );
        (c, fake, rx)
    }

    #[test]
    fn start_twice_opens_one_subscription() {
        let (mut c, fake, _rx) = controller();
        c.start_tracking().unwrap();
        let first = c.active_subscription();
        c.start_tracking().unwrap();

        assert_eq!(fake.subscribe_calls(), 1);
        assert_eq!(fake.one_shot_calls(), 2);
        assert_eq!(fake.live_subscriptions(), 1);
        assert_eq!(c.active_subscription(), first);
        assert!(c.surface().stop_enabled);
    }

    #[test]
    fn start_uses_configured_options() {
        let (mut c, fake, _rx) = controller();
        c.start_tracking().unwrap();
        let o = fake.last_options().unwrap();
        assert!(o.high_accuracy_preferred);
        assert_eq!(o.timeout_ms, 10_000);
        assert_eq!(o.max_cached_age_ms, 0);
    }

    #[test]
    fn stop_when_idle_is_a_no_op() {
        let (mut c, fake, _rx) = controller();
        c.stop_tracking();
        assert_eq!(fake.cancel_calls(), 0);
        assert!(c.surface().status.is_empty());
        assert!(!c.surface().stop_enabled);
    }

    #[test]
    fn stop_cancels_and_disables_the_command() {
        let (mut c, fake, _rx) = controller();
        c.start_tracking().unwrap();
        c.stop_tracking();

        assert!(!c.is_tracking());
        assert_eq!(fake.cancel_calls(), 1);
        assert_eq!(fake.live_subscriptions(), 0);
        assert_eq!(c.surface().status, Status::Stopped.text());
        assert!(!c.surface().stop_enabled);

        c.start_tracking().unwrap();
        assert_eq!(fake.subscribe_calls(), 2);
        assert_eq!(fake.live_subscriptions(), 1);
    }

    #[test]
    fn fix_fills_slots_and_reveals_map_link() {
        let (mut c, fake, mut rx) = controller();
        c.start_tracking().unwrap();
        assert!(c.surface().map_link.is_none());

        fake.emit_one_shot_fix(LocationSample::new(37.422, -122.084, 14.25, 1_700_000_000_000));
        assert_eq!(c.drain(&mut rx), 1);

        let s = c.surface();
        assert_eq!(
            s.map_link.as_deref(),
            Some("https://www.google.com/maps?q=37.422,-122.084")
        );
        assert_eq!(s.latitude, "37.422000");
        assert_eq!(s.longitude, "-122.084000");
        assert_eq!(s.accuracy, "14.25");
        assert!(!s.timestamp.is_empty());
        assert_eq!(s.status, Status::Updated.text());
    }

    #[test]
    fn subscription_fixes_overwrite_the_link() {
        let (mut c, fake, mut rx) = controller();
        c.start_tracking().unwrap();

        fake.emit_subscription_fix(LocationSample::new(1.5, 2.5, 3.0, 0));
        fake.emit_subscription_fix(LocationSample::new(4.25, -5.75, 3.0, 0));
        c.drain(&mut rx);

        assert_eq!(
            c.surface().map_link.as_deref(),
            Some("https://www.google.com/maps?q=4.25,-5.75")
        );
    }

    #[test]
    fn permission_denied_keeps_subscription() {
        let (mut c, fake, mut rx) = controller();
        c.start_tracking().unwrap();
        let before = c.active_subscription();

        fake.emit_subscription_failure(LocationError::PermissionDenied);
        c.drain(&mut rx);

        assert_eq!(c.surface().status, Status::PermissionDenied.text());
        assert_eq!(c.active_subscription(), before);
        assert_eq!(fake.cancel_calls(), 0);
    }

    #[test]
    fn failure_while_idle_leaves_no_subscription() {
        let (mut c, fake, mut rx) = controller();
        c.start_tracking().unwrap();
        c.stop_tracking();

        fake.emit_one_shot_failure(LocationError::Timeout);
        c.drain(&mut rx);

        assert_eq!(c.surface().status, Status::TimedOut.text());
        assert!(!c.is_tracking());
    }

    #[test]
    fn failures_map_to_their_status() {
        let (mut c, fake, mut rx) = controller();
        c.start_tracking().unwrap();

        fake.emit_one_shot_failure(LocationError::PositionUnavailable);
        c.drain(&mut rx);
        assert_eq!(c.surface().status, Status::PositionUnavailable.text());

        fake.emit_one_shot_failure(LocationError::from_code(42, "odd"));
        c.drain(&mut rx);
        assert_eq!(c.surface().status, Status::Failed.text());
    }

    #[test]
    fn events_from_a_cancelled_subscription_are_ignored() {
        let (mut c, fake, mut rx) = controller();
        c.start_tracking().unwrap();
        fake.emit_subscription_fix(LocationSample::new(10.0, 20.0, 1.0, 0));
        c.stop_tracking();

        c.drain(&mut rx);
        assert!(c.surface().map_link.is_none());
        assert_eq!(c.surface().status, Status::Stopped.text());
    }

    #[test]
    fn missing_capability_only_reports() {
        let (mut c, _rx) = LocationController::<FakeLocation, _>::new(
            None,
            SurfaceModel::new(),
            TrackerConfig::default(),
        );
        assert_eq!(c.start_tracking(), Err(TrackerError::CapabilityAbsent));
        assert_eq!(c.surface().status, Status::CapabilityAbsent.text());
        assert!(!c.is_tracking());
        assert!(!c.surface().stop_enabled);
        c.stop_tracking();
    }

    #[test]
    fn throwing_subscribe_is_reported_as_unknown() {
        let (mut c, fake, _rx) = controller();
        fake.fail_next_subscribe("watchPosition threw");
        assert!(matches!(
            c.start_tracking(),
            Err(TrackerError::Location(LocationError::Unknown { .. }))
        ));
        assert_eq!(c.surface().status, Status::Failed.text());
        assert!(!c.is_tracking());
        assert!(!c.surface().stop_enabled);
    }

    #[test]
    fn throwing_request_once_skips_the_subscription() {
        let (mut c, fake, _rx) = controller();
        fake.fail_next_request_once("getCurrentPosition threw");
        assert!(matches!(
            c.start_tracking(),
            Err(TrackerError::Location(LocationError::Unknown { .. }))
        ));
        assert_eq!(fake.one_shot_calls(), 1);
        assert_eq!(fake.subscribe_calls(), 0);
        assert_eq!(c.surface().status, Status::Failed.text());
        assert!(!c.is_tracking());
        assert!(!c.surface().stop_enabled);

        c.start_tracking().unwrap();
        assert_eq!(fake.subscribe_calls(), 1);
        assert!(c.surface().stop_enabled);
    }

    #[test]
    fn second_start_while_tracking_shows_acquiring() {
        let (mut c, fake, _rx) = controller();
        c.start_tracking().unwrap();
        assert_eq!(c.surface().status, Status::TrackingStarted.text());

        c.start_tracking().unwrap();
        assert_eq!(c.surface().status, Status::Acquiring.text());
        assert_eq!(fake.subscribe_calls(), 1);
    }

    #[test]
    fn permission_changes_are_mirrored() {
        let (mut c, _fake, mut rx) = controller();
        let perms = FakePermissions::new();
        c.mirror_permissions(Some(&perms));
        assert_eq!(perms.watched_names(), vec!["geolocation".to_string()]);

        perms.push(PermissionState::Prompt);
        c.drain(&mut rx);
        assert_eq!(c.surface().permission, "prompt");

        perms.push(PermissionState::Granted);
        c.drain(&mut rx);
        assert_eq!(c.surface().permission, "granted");
    }

    #[test]
    fn permission_capability_absent_or_failing() {
        let (mut c, _fake, _rx) = controller();
        c.mirror_permissions::<FakePermissions>(None);
        assert_eq!(
            c.surface().permission,
            PermissionState::Unavailable(Unavailable::CapabilityAbsent).label()
        );

        let perms = FakePermissions::failing();
        c.mirror_permissions(Some(&perms));
        assert_eq!(
            c.surface().permission,
            PermissionState::Unavailable(Unavailable::QueryFailed).label()
        );
    }

    #[test]
    fn custom_precision_and_map_base() {
        let fake = FakeLocation::new();
        let cfg = TrackerConfig {
            coordinate_decimals: 3,
            accuracy_decimals: 0,
            maps_base_url: "https://maps.example.test/".to_string(),
            ..TrackerConfig::default()
        };
        let (mut c, mut rx) = LocationController::new(Some(fake.clone()), SurfaceModel::new(), cfg);
        c.start_tracking().unwrap();
        fake.emit_one_shot_fix(LocationSample::new(1.23456, 2.0, 7.6, 0));
        c.drain(&mut rx);

        assert_eq!(c.surface().latitude, "1.235");
        assert_eq!(c.surface().accuracy, "8");
        assert_eq!(
            c.surface().map_link.as_deref(),
            Some("https://maps.example.test/?q=1.23456,2")
        );
    }
}
