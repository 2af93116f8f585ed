//! Headless stand-ins for the two SDK seams.
//!
//! Real deployments sit on proprietary SDKs that need a camera and a
//! licensed project behind them. The simulator lets the demos and the
//! test suites run the full experience loop on a desk: a scripted
//! tracker that replays canned event batches, and a recording scene
//! backend that captures every call made to it.

use std::{cell::RefCell, collections::VecDeque, rc::Rc};

use glam::Vec3;

use crate::{
    camera::CameraParameters,
    components::LocalTransform,
    contexts::{ArTracking, SceneBackend, TrackingConfig},
    events::SdkEvent,
    AcornError, AcornResult,
};

/// A scripted tracking SDK: every poll returns the next batch of events
/// from the script, then nothing once the script runs dry.
#[derive(Default)]
pub struct SimulatedTracking {
    script: VecDeque<Vec<SdkEvent>>,
    parameters: CameraParameters,
    init_failure: Option<AcornError>,
    started: bool,
}

impl SimulatedTracking {
    pub fn new() -> Self {
        Default::default()
    }

    /// Queue a batch of events to be returned by one future poll.
    pub fn push_events(&mut self, batch: Vec<SdkEvent>) {
        self.script.push_back(batch);
    }

    /// Make the next `init` call fail with the given error.
    pub fn fail_on_init(&mut self, error: AcornError) {
        self.init_failure = Some(error);
    }

    pub fn started(&self) -> bool {
        self.started
    }

    /// A canned surface-mode session: ready, an early hit-test result,
    /// then a resize and a stream of slowly orbiting camera poses.
    pub fn scripted_orbit(frames: usize) -> Self {
        let mut sdk = Self::new();
        sdk.push_events(vec![SdkEvent::Ready]);
        sdk.push_events(vec![SdkEvent::HitTestResult {
            position: Vec3::new(0., 0., -0.5),
        }]);
        sdk.push_events(vec![SdkEvent::Resize {
            parameters: CameraParameters {
                fov: 60.,
                aspect: 9. / 16.,
            },
        }]);

        for frame in 0..frames {
            let angle = frame as f32 * 0.05;
            let eye = glam::Mat4::from_rotation_y(angle)
                * glam::Mat4::from_translation(Vec3::new(0., 1.4, 1.2));
            sdk.push_events(vec![
                SdkEvent::Pose {
                    matrix: eye.to_cols_array(),
                },
                SdkEvent::Frame { delta: 1. / 60. },
            ]);
        }
        sdk
    }
}

impl ArTracking for SimulatedTracking {
    fn init(&mut self, _config: &TrackingConfig) -> AcornResult<()> {
        match self.init_failure.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn start(&mut self) {
        self.started = true;
    }

    fn camera_parameters(&self) -> CameraParameters {
        self.parameters
    }

    fn poll_events(&mut self) -> Vec<SdkEvent> {
        self.script.pop_front().unwrap_or_default()
    }
}

/// One call made to the scene backend.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneOp {
    LoadModel {
        name: String,
        path: String,
    },
    Enable {
        element: String,
    },
    Disable {
        element: String,
    },
    SetTransform {
        element: String,
        transform: LocalTransform,
    },
    PlayAnimation {
        element: String,
        clip: String,
        looped: bool,
    },
    StopAnimation {
        element: String,
        clip: String,
    },
    PlaySound {
        sound: String,
    },
    PauseSound {
        sound: String,
    },
    MoveToElement {
        mover: String,
        target: String,
        seconds: f32,
    },
}

/// A scene backend that records every call in order.
///
/// Events can be queued to surface on a later poll, and `auto_click` acts
/// as a player bot: every element the scene is asked to enable gets a
/// click event queued for it.
#[derive(Default)]
pub struct RecordingScene {
    /// The recorded calls, shared so a test can keep a handle after the
    /// backend is boxed. `render` is deliberately not recorded: it fires
    /// every update and would drown everything else out.
    pub ops: Rc<RefCell<Vec<SceneOp>>>,
    queued: VecDeque<SdkEvent>,
    /// Queue an `ElementClick` for every element that gets enabled
    pub auto_click: bool,
}

impl RecordingScene {
    pub fn new() -> Self {
        Default::default()
    }

    /// Queue an event to surface on the next poll.
    pub fn queue_event(&mut self, event: SdkEvent) {
        self.queued.push_back(event);
    }

    fn record(&mut self, op: SceneOp) {
        self.ops.borrow_mut().push(op);
    }
}

impl SceneBackend for RecordingScene {
    fn load_model(&mut self, name: &str, path: &str) -> AcornResult<()> {
        self.record(SceneOp::LoadModel {
            name: name.into(),
            path: path.into(),
        });
        Ok(())
    }

    fn enable(&mut self, element: &str) {
        self.record(SceneOp::Enable {
            element: element.into(),
        });
        if self.auto_click {
            self.queued.push_back(SdkEvent::ElementClick {
                name: element.into(),
            });
        }
    }

    fn disable(&mut self, element: &str) {
        self.record(SceneOp::Disable {
            element: element.into(),
        });
    }

    fn set_transform(&mut self, element: &str, transform: &LocalTransform) {
        self.record(SceneOp::SetTransform {
            element: element.into(),
            transform: *transform,
        });
    }

    fn play_animation(&mut self, element: &str, clip: &str, looped: bool) {
        self.record(SceneOp::PlayAnimation {
            element: element.into(),
            clip: clip.into(),
            looped,
        });
    }

    fn stop_animation(&mut self, element: &str, clip: &str) {
        self.record(SceneOp::StopAnimation {
            element: element.into(),
            clip: clip.into(),
        });
    }

    fn play_sound(&mut self, sound: &str) {
        self.record(SceneOp::PlaySound {
            sound: sound.into(),
        });
    }

    fn pause_sound(&mut self, sound: &str) {
        self.record(SceneOp::PauseSound {
            sound: sound.into(),
        });
    }

    fn move_to_element(&mut self, mover: &str, target: &str, seconds: f32) {
        self.record(SceneOp::MoveToElement {
            mover: mover.into(),
            target: target.into(),
            seconds,
        });
    }

    fn render(&mut self) {}

    fn poll_events(&mut self) -> Vec<SdkEvent> {
        self.queued.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    pub fn script_batches_drain_in_order_test() {
        let mut sdk = SimulatedTracking::new();
        sdk.push_events(vec![SdkEvent::Ready]);
        sdk.push_events(vec![SdkEvent::Frame { delta: 0.016 }]);

        assert_eq!(sdk.poll_events(), vec![SdkEvent::Ready]);
        assert_eq!(sdk.poll_events(), vec![SdkEvent::Frame { delta: 0.016 }]);
        assert!(sdk.poll_events().is_empty());
    }

    #[test]
    pub fn auto_click_queues_a_click_per_enable_test() {
        let mut scene = RecordingScene::new();
        scene.auto_click = true;

        scene.enable("nut_0");
        scene.disable("nut_0");
        scene.enable("nut_1");

        assert_eq!(
            scene.poll_events(),
            vec![
                SdkEvent::ElementClick {
                    name: "nut_0".into()
                },
                SdkEvent::ElementClick {
                    name: "nut_1".into()
                },
            ]
        );
        assert!(scene.poll_events().is_empty());
    }
}
