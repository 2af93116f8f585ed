pub mod scene_context;
pub mod tracker_context;

pub use scene_context::{play_clip, AnimationClip, SceneBackend, SceneContext};
pub use tracker_context::{ArTracking, TrackerContext, TrackingConfig, TrackingMode};
