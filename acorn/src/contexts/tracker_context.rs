use log::info;
use serde::{Deserialize, Serialize};

use crate::{camera::CameraParameters, events::SdkEvent, AcornResult};

/// The tracking mode requested from the SDK.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TrackingMode {
    /// Anchor the experience to a flat surface found by hit-testing
    #[default]
    Surface,
    /// Anchor the experience to a recognised image marker
    Image,
    /// Free world tracking
    Spatial,
}

/// Startup configuration handed to the tracking SDK.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TrackingConfig {
    pub mode: TrackingMode,
    /// Project token identifying the published experience
    pub token: String,
}

/// The contract consumed from the AR tracking SDK.
///
/// The SDK owns the camera feed and the pose estimation algorithm; the
/// runtime only ever initialises it, starts it, asks for the camera
/// intrinsics and drains its event queue. Everything else is out of
/// scope.
pub trait ArTracking {
    /// Initialise tracking. Failures here carry the SDK's flat error
    /// taxonomy and are surfaced once, at startup.
    fn init(&mut self, config: &TrackingConfig) -> AcornResult<()>;

    /// Begin world tracking. In surface mode this is called once the
    /// user has anchored the experience.
    fn start(&mut self);

    fn camera_parameters(&self) -> CameraParameters;

    /// Drain the events produced since the last poll.
    fn poll_events(&mut self) -> Vec<SdkEvent>;
}

/// Wrapper around the tracking SDK.
pub struct TrackerContext {
    inner: Box<dyn ArTracking>,
    started: bool,
}

impl TrackerContext {
    /// Initialise the SDK and wrap it. Returns the SDK's startup error
    /// unchanged so the caller can map it to the error panel.
    pub fn new(mut inner: Box<dyn ArTracking>, config: &TrackingConfig) -> AcornResult<Self> {
        inner.init(config)?;
        Ok(Self {
            inner,
            started: false,
        })
    }

    /// Begin world tracking. Subsequent calls are no-ops.
    pub fn start(&mut self) {
        if !self.started {
            info!("[TRACKER] starting world tracking");
            self.inner.start();
            self.started = true;
        }
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn camera_parameters(&self) -> CameraParameters {
        self.inner.camera_parameters()
    }

    pub fn poll_events(&mut self) -> Vec<SdkEvent> {
        self.inner.poll_events()
    }
}
