//! Acorn is a small runtime for tabletop AR experiences.
//!
//! AR product pages tend to sit on two black-box SDKs: a tracking engine
//! that owns the camera feed and pose estimation, and a scene engine that
//! owns the 3D assets and their animations. Acorn models both as traits
//! ([`contexts::ArTracking`] and [`contexts::SceneBackend`]), keeps a
//! mirror of the scene elements it controls in a [`hecs::World`], and
//! pumps SDK events through a synchronous [`EventBus`].
//!
//! The `demos/` directory contains two complete experiences built on this
//! crate: a product viewer (tap to place, scale, rotate, swap variants)
//! and a timed nut-catching mini-game.

pub use glam;
pub use hecs;

pub use acorn_error::AcornError;
pub use camera::{Camera, CameraParameters};
pub use events::{EventBus, EventKind, SdkEvent};
pub use experience::Experience;

mod acorn_error;
mod camera;
/// Components are data attached to the entities that mirror scene elements
pub mod components;
/// Contexts wrap the external SDK state the runtime interacts with
pub mod contexts;
mod events;
mod experience;
/// Headless stand-ins for the SDK seams, used by the demos and in tests
pub mod simulator;
/// Systems are functions called each update to reconcile the world mirror
/// with the external scene
pub mod systems;

/// Acorn result type
pub type AcornResult<T> = std::result::Result<T, AcornError>;
