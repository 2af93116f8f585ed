use std::{cell::RefCell, rc::Rc};

use hecs::{Entity, World};

use crate::{
    camera::Camera,
    components::{Info, LocalTransform, Visible},
    contexts::{ArTracking, SceneBackend, SceneContext, TrackerContext, TrackingConfig},
    events::{EventBus, SdkEvent},
    systems::sync_system,
    AcornResult,
};

/// The experience runtime.
///
/// Owns the world mirror, the render camera, the event bus and the SDK
/// contexts. Call [`Experience::update`] once per iteration of the host
/// loop: it drains both SDK event queues, keeps the camera current,
/// re-emits every event on the bus, flushes the world mirror to the
/// scene and asks for a frame.
pub struct Experience {
    /// The world mirror: one entity per controlled scene element
    pub world: World,
    /// The render camera, tracker-driven
    pub camera: Camera,
    /// Synchronous publish/subscribe for SDK events
    pub events: EventBus,
    /// The scene engine, shared so animation choreography can run as
    /// spawned local tasks
    pub scene: Rc<RefCell<SceneContext>>,
    /// The tracking engine, absent in embedded experiences where the
    /// scene engine owns tracking itself
    pub tracker: Option<TrackerContext>,
}

impl Experience {
    /// An embedded experience: the scene engine owns tracking and the
    /// camera, we only ever hear about clicks and scene lifecycle.
    pub fn new(backend: Box<dyn SceneBackend>) -> Self {
        Self {
            world: World::new(),
            camera: Camera::default(),
            events: EventBus::new(),
            scene: Rc::new(RefCell::new(SceneContext::new(backend))),
            tracker: None,
        }
    }

    /// A tracked experience. Initialises the tracking SDK; a startup
    /// failure is returned unchanged for the caller to map onto the
    /// error panel, once, with no retry.
    pub fn with_tracker(
        backend: Box<dyn SceneBackend>,
        tracking: Box<dyn ArTracking>,
        config: &TrackingConfig,
    ) -> AcornResult<Self> {
        let tracker = TrackerContext::new(tracking, config)?;
        let camera = Camera::new(tracker.camera_parameters());

        Ok(Self {
            world: World::new(),
            camera,
            events: EventBus::new(),
            scene: Rc::new(RefCell::new(SceneContext::new(backend))),
            tracker: Some(tracker),
        })
    }

    /// Register a scene element under the runtime's control and return
    /// the entity that mirrors it.
    pub fn add_element(&mut self, name: &str, transform: LocalTransform, visible: bool) -> Entity {
        let entity = self.world.spawn((Info::named(name), transform));
        if visible {
            self.world.insert_one(entity, Visible {}).unwrap();
        }
        entity
    }

    /// Look up the entity mirroring the named element.
    pub fn entity(&self, name: &str) -> Option<Entity> {
        self.world
            .query::<&Info>()
            .iter()
            .find(|(_, info)| info.name == name)
            .map(|(entity, _)| entity)
    }

    /// Drive one iteration of the experience.
    ///
    /// Returns the drained events so imperative callers can react to
    /// them; the same events have already been emitted on the bus, in
    /// order, by the time this returns.
    pub fn update(&mut self) -> Vec<SdkEvent> {
        let mut pending = Vec::new();
        if let Some(tracker) = self.tracker.as_mut() {
            pending.append(&mut tracker.poll_events());
        }
        pending.append(&mut self.scene.borrow_mut().poll_events());

        for event in &pending {
            match event {
                SdkEvent::Pose { matrix } => self.camera.update_pose(matrix),
                SdkEvent::Resize { parameters } => self.camera.update_projection(*parameters),
                _ => {}
            }
            self.events.emit(event);
        }

        let mut scene = self.scene.borrow_mut();
        sync_system(&mut self.world, &mut scene);
        scene.render();

        pending
    }
}
