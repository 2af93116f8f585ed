use std::{cell::RefCell, collections::HashMap, rc::Rc, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{components::LocalTransform, events::SdkEvent, AcornResult};

/// An animation clip as declared by the scene's asset tables.
///
/// The scene engine plays clips by name and does not report completion;
/// the declared duration is what the runtime waits out instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationClip {
    pub name: String,
    pub duration_secs: f32,
}

impl AnimationClip {
    pub fn new(name: &str, duration_secs: f32) -> Self {
        Self {
            name: name.into(),
            duration_secs,
        }
    }

    pub fn duration(&self) -> Duration {
        Duration::from_secs_f32(self.duration_secs)
    }
}

/// The contract consumed from the scene/embed engine.
///
/// The engine owns the scene graph, the renderer and the audio mixer; the
/// runtime addresses its elements by name and never sees geometry or
/// materials.
pub trait SceneBackend {
    /// Load a model into the scene under `name`. Failures are reported
    /// so the caller can decide whether to degrade or abort.
    fn load_model(&mut self, name: &str, path: &str) -> AcornResult<()>;

    fn enable(&mut self, element: &str);
    fn disable(&mut self, element: &str);

    /// Set the element's transform, absolute.
    fn set_transform(&mut self, element: &str, transform: &LocalTransform);

    fn play_animation(&mut self, element: &str, clip: &str, looped: bool);
    fn stop_animation(&mut self, element: &str, clip: &str);

    fn play_sound(&mut self, sound: &str);
    fn pause_sound(&mut self, sound: &str);

    /// Steer `mover` towards `target` over the given number of seconds.
    fn move_to_element(&mut self, mover: &str, target: &str, seconds: f32);

    /// Render a frame from the current scene and camera state.
    fn render(&mut self);

    /// Drain the events produced since the last poll.
    fn poll_events(&mut self) -> Vec<SdkEvent>;
}

#[derive(Debug, Clone, PartialEq, Default)]
struct MirroredElement {
    visible: bool,
    transform: LocalTransform,
}

/// Wrapper around the scene engine.
///
/// Adds two things to the raw backend: per-element last-animation
/// bookkeeping (starting a clip stops whatever the element was playing
/// before, the engine does not do this itself), and a cache of the last
/// pushed visibility/transform per element so the sync system only sends
/// changes.
pub struct SceneContext {
    backend: Box<dyn SceneBackend>,
    last_animation: HashMap<String, String>,
    mirrored: HashMap<String, MirroredElement>,
}

impl SceneContext {
    pub fn new(backend: Box<dyn SceneBackend>) -> Self {
        Self {
            backend,
            last_animation: HashMap::new(),
            mirrored: HashMap::new(),
        }
    }

    pub fn load_model(&mut self, name: &str, path: &str) -> AcornResult<()> {
        self.backend.load_model(name, path)
    }

    /// Start `clip` on `element`, stopping the clip the element was
    /// playing before, if any.
    pub fn start_animation(&mut self, element: &str, clip: &AnimationClip, looped: bool) {
        if let Some(previous) = self
            .last_animation
            .insert(element.to_owned(), clip.name.clone())
        {
            self.backend.stop_animation(element, &previous);
        }
        self.backend.play_animation(element, &clip.name, looped);
    }

    /// Stop a named clip on `element`.
    pub fn stop_animation(&mut self, element: &str, clip: &str) {
        if self.last_animation.get(element).map(String::as_str) == Some(clip) {
            self.last_animation.remove(element);
        }
        self.backend.stop_animation(element, clip);
    }

    pub fn play_sound(&mut self, sound: &str) {
        self.backend.play_sound(sound);
    }

    pub fn pause_sound(&mut self, sound: &str) {
        self.backend.pause_sound(sound);
    }

    pub fn move_to_element(&mut self, mover: &str, target: &str, seconds: f32) {
        self.backend.move_to_element(mover, target, seconds);
    }

    pub fn render(&mut self) {
        self.backend.render();
    }

    pub fn poll_events(&mut self) -> Vec<SdkEvent> {
        self.backend.poll_events()
    }

    /// Reconcile one element's desired state with what was last pushed.
    /// Transform changes go out before visibility changes so an element
    /// never pops in at a stale position.
    pub fn apply(&mut self, element: &str, transform: &LocalTransform, visible: bool) {
        let mirrored = self.mirrored.entry(element.to_owned()).or_default();

        if mirrored.transform != *transform {
            mirrored.transform = *transform;
            self.backend.set_transform(element, transform);
        }
        if mirrored.visible != visible {
            mirrored.visible = visible;
            if visible {
                self.backend.enable(element);
            } else {
                self.backend.disable(element);
            }
        }
    }
}

/// Play `clip` on `element` and wait out its declared duration.
///
/// The scene engine gives no completion callback, so this is a
/// cooperative sleep matching the declared clip length; drift between the
/// declared and actual length is an accepted approximation.
pub async fn play_clip(
    scene: &Rc<RefCell<SceneContext>>,
    element: &str,
    clip: &AnimationClip,
    looped: bool,
) {
    scene.borrow_mut().start_animation(element, clip, looped);
    tokio::time::sleep(clip.duration()).await;
}
