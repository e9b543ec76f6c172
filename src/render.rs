//! Render handoff. Builds matrices and packages borrowed geometry; all GPU
//! work belongs to the host.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3};

use crate::config::CameraParams;

/// View matrix for the pilot pose: undo the orientation, then the position.
pub fn view_matrix(orientation: Quat, position: Vec3) -> Mat4 {
    Mat4::from_quat(orientation.inverse()) * Mat4::from_translation(-position)
}

pub fn projection_matrix(camera: &CameraParams, aspect: f32) -> Mat4 {
    Mat4::perspective_rh(
        camera.fov_y_degrees.to_radians(),
        aspect,
        camera.z_near,
        camera.z_far,
    )
}

/// One frame's worth of renderable state, borrowed from the simulation.
///
/// `trail_positions` holds 3 floats per vertex and `trail_masses` one, laid
/// out body by body; `current_slice` tells the renderer where the newest
/// trail segment sits so it can fade the bridge to the oldest one.
pub struct FramePacket<'a> {
    pub trail_positions: &'a [f32],
    pub trail_masses: &'a [f32],
    pub current_slice: usize,
    pub bodies: usize,
    pub segments_per_body: usize,
    pub vertices_per_body: usize,
    pub view: Mat4,
    pub projection: Mat4,
    pub paused: bool,
}

/// Camera block in std140-compatible layout, ready for a uniform buffer.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

impl FramePacket<'_> {
    pub fn camera_uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: (self.projection * self.view).to_cols_array_2d(),
        }
    }
}
