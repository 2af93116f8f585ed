pub mod info;
pub mod local_transform;
pub mod visible;

pub use info::Info;
pub use local_transform::LocalTransform;
pub use visible::Visible;
