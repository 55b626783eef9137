use bevy::prelude::*;
use std::sync::Mutex;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use super::anchor::AnchorUpdate;
use super::config::PlaneDetectionConfig;
use crate::error::Result;

/// Boundary to the platform's spatial tracking subsystem.
///
/// Implementations forward their anchor callbacks into an
/// [`AnchorUpdateSender`] obtained from [`anchor_channel`] and hand the
/// matching stream back from [`SpatialTrackingProvider::run`].
pub trait SpatialTrackingProvider: Send + Sync + 'static {
    /// Capability probe, checked once before `run`.
    fn is_supported(&self) -> bool;

    /// Start tracking. Failures are reported once and never retried.
    fn run(&mut self, config: &PlaneDetectionConfig) -> Result<AnchorUpdateStream>;

    /// Stop delivering updates. Called on explicit teardown.
    fn stop(&mut self) {}
}

/// Resource holding the active tracking provider.
#[derive(Resource)]
pub struct TrackingProvider(pub Box<dyn SpatialTrackingProvider>);

impl TrackingProvider {
    pub fn new(provider: impl SpatialTrackingProvider) -> Self {
        Self(Box::new(provider))
    }
}

/// Producer half of the anchor event stream, owned by the callback side.
#[derive(Clone)]
pub struct AnchorUpdateSender(Sender<AnchorUpdate>);

impl AnchorUpdateSender {
    /// Returns `false` once the consuming session has gone away.
    pub fn send(&self, update: AnchorUpdate) -> bool {
        self.0.send(update).is_ok()
    }
}

/// Result of pulling from the stream without blocking the frame.
#[derive(Debug)]
pub enum StreamPoll {
    Ready(AnchorUpdate),
    Pending,
    Closed,
}

/// Consumer half of the anchor event stream. Delivery order is preserved.
pub struct AnchorUpdateStream(Mutex<Receiver<AnchorUpdate>>);

impl AnchorUpdateStream {
    /// Pull the next update, if one is queued.
    pub fn poll_next(&self) -> StreamPoll {
        let Ok(receiver) = self.0.lock() else {
            return StreamPoll::Closed;
        };
        match receiver.try_recv() {
            Ok(update) => StreamPoll::Ready(update),
            Err(TryRecvError::Empty) => StreamPoll::Pending,
            Err(TryRecvError::Disconnected) => StreamPoll::Closed,
        }
    }
}

/// Create a connected sender/stream pair.
pub fn anchor_channel() -> (AnchorUpdateSender, AnchorUpdateStream) {
    let (tx, rx) = mpsc::channel();
    (AnchorUpdateSender(tx), AnchorUpdateStream(Mutex::new(rx)))
}
