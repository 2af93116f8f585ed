use glam::Mat4;
use serde::{Deserialize, Serialize};

/// Near clip plane distance
pub const NEAR_PLANE: f32 = 0.1;
/// Far clip plane distance
pub const FAR_PLANE: f32 = 1000.;

/// Camera intrinsics reported by the tracking SDK on startup and on every
/// viewport resize.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraParameters {
    /// Vertical field of view, in degrees
    pub fov: f32,
    /// Viewport aspect ratio
    pub aspect: f32,
}

impl Default for CameraParameters {
    fn default() -> Self {
        Self {
            fov: 70.,
            aspect: 16. / 9.,
        }
    }
}

/// The render camera.
///
/// The camera is entirely tracker-driven: its view matrix is assigned from
/// the pose event of each frame, and its projection is rebuilt whenever
/// the tracker reports new intrinsics. Nothing else may move it.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    parameters: CameraParameters,
    view: Mat4,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Default::default())
    }
}

impl Camera {
    pub fn new(parameters: CameraParameters) -> Self {
        Self {
            parameters,
            view: Mat4::IDENTITY,
        }
    }

    /// Assign the camera pose from a column-major tracker matrix.
    pub fn update_pose(&mut self, matrix: &[f32; 16]) {
        self.view = Mat4::from_cols_array(matrix);
    }

    /// Rebuild the projection from new intrinsics.
    pub fn update_projection(&mut self, parameters: CameraParameters) {
        self.parameters = parameters;
    }

    pub fn parameters(&self) -> CameraParameters {
        self.parameters
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.view
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.parameters.fov.to_radians(),
            self.parameters.aspect,
            NEAR_PLANE,
            FAR_PLANE,
        )
    }
}
