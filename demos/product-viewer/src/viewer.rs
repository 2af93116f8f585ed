use std::collections::HashMap;

use acorn::{
    components::{LocalTransform, Visible},
    contexts::TrackingConfig,
    hecs::Entity,
    Experience, SdkEvent,
};
use glam::{Quat, Vec3};
use log::warn;
use serde::{Deserialize, Serialize};

/// A named model variant of the product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelVariant {
    pub name: String,
    pub path: String,
}

/// Typed configuration for the product viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// The variants offered by the page's buttons
    pub variants: Vec<ModelVariant>,
    pub initial_variant: String,
    pub tracking: TrackingConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            variants: ["blue", "orange", "black", "silver"]
                .map(|name| ModelVariant {
                    name: name.into(),
                    path: format!("models/{name}.glb"),
                })
                .to_vec(),
            initial_variant: "blue".into(),
            tracking: TrackingConfig::default(),
        }
    }
}

/// Scale every variant starts at
pub const BASE_SCALE: f32 = 0.5;

/// The product viewer: one model shown at a time, swappable variants,
/// dragged along by hit-testing until the user pins it down.
pub struct Viewer {
    variants: HashMap<String, Entity>,
    active: Option<String>,
    placed: bool,
}

impl Viewer {
    /// Load every variant and show the initial one.
    ///
    /// A variant that fails to load is logged and skipped rather than
    /// aborting the session: the viewer prefers an incomplete scene over
    /// a crash.
    pub fn new(experience: &mut Experience, config: &ViewerConfig) -> Self {
        let mut variants = HashMap::new();
        for variant in &config.variants {
            if let Err(error) = experience
                .scene
                .borrow_mut()
                .load_model(&variant.name, &variant.path)
            {
                warn!("[VIEWER] could not load `{}`: {error}", variant.name);
                continue;
            }

            let transform = LocalTransform {
                scale: Vec3::splat(BASE_SCALE),
                ..Default::default()
            };
            let entity = experience.add_element(&variant.name, transform, false);
            variants.insert(variant.name.clone(), entity);
        }

        let mut viewer = Self {
            variants,
            active: None,
            placed: false,
        };
        viewer.set_active_variant(experience, &config.initial_variant);
        viewer
    }

    pub fn active_entity(&self) -> Option<Entity> {
        self.active
            .as_ref()
            .and_then(|name| self.variants.get(name))
            .copied()
    }

    /// Swap the displayed variant, carrying the current placement over
    /// so the product does not jump. Unknown names are ignored.
    pub fn set_active_variant(&mut self, experience: &mut Experience, name: &str) {
        let Some(&entity) = self.variants.get(name) else {
            warn!("[VIEWER] no variant named `{name}`");
            return;
        };

        if let Some(previous) = self.active_entity() {
            let transform = *experience.world.get::<&LocalTransform>(previous).unwrap();
            *experience.world.get::<&mut LocalTransform>(entity).unwrap() = transform;
            let _ = experience.world.remove_one::<Visible>(previous);
        }

        experience.world.insert_one(entity, Visible {}).unwrap();
        self.active = Some(name.to_owned());
    }

    /// Until the model is placed, every hit-test result drags it along
    /// the detected surface.
    pub fn handle_event(&mut self, experience: &mut Experience, event: &SdkEvent) {
        if let SdkEvent::HitTestResult { position } = event {
            if self.placed {
                return;
            }
            if let Some(entity) = self.active_entity() {
                experience
                    .world
                    .get::<&mut LocalTransform>(entity)
                    .unwrap()
                    .translation = *position;
            }
        }
    }

    /// Pin the model where it is and begin world tracking.
    pub fn place(&mut self, experience: &mut Experience) {
        self.placed = true;
        if let Some(tracker) = experience.tracker.as_mut() {
            tracker.start();
        }
    }

    pub fn is_placed(&self) -> bool {
        self.placed
    }

    /// Uniform scale of the active variant.
    pub fn set_scale(&mut self, experience: &mut Experience, value: f32) {
        if let Some(entity) = self.active_entity() {
            experience
                .world
                .get::<&mut LocalTransform>(entity)
                .unwrap()
                .scale = Vec3::splat(value);
        }
    }

    /// Absolute yaw of the active variant, in radians.
    pub fn set_rotation(&mut self, experience: &mut Experience, radians: f32) {
        if let Some(entity) = self.active_entity() {
            experience
                .world
                .get::<&mut LocalTransform>(entity)
                .unwrap()
                .rotation = Quat::from_rotation_y(radians);
        }
    }
}
