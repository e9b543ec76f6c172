//! Quaternion helpers shared by the flight controller.

use glam::{EulerRot, Quat, Vec3};

/// Rotation increment from stick intent (x pitch, y yaw, z roll), Z-X-Y order.
pub fn turn_increment(intent: Vec3, scale: f32) -> Quat {
    Quat::from_euler(
        EulerRot::ZXY,
        intent.z * scale,
        intent.x * scale,
        intent.y * scale,
    )
}

/// Bounded step from identity toward `target`.
///
/// The step covers at most `max_step` radians; once the residual angle drops
/// below one radian the step shrinks proportionally so the approach settles
/// instead of oscillating. Degenerate targets (w outside [-1, 1] after float
/// error) return the identity.
pub fn bounded_slerp(target: Quat, max_step: f32) -> Quat {
    let angle = 2.0 * target.w.acos();
    let mut t = max_step / angle;
    if t.is_nan() {
        return Quat::IDENTITY;
    }
    if t > max_step {
        t = max_step;
    }
    Quat::IDENTITY.slerp(target, t)
}

/// Scales the rotation angle of `q` by `factor`, keeping its axis.
pub fn scale_rotation(q: Quat, factor: f32) -> Quat {
    let (axis, angle) = q.to_axis_angle();
    if !angle.is_finite() || angle == 0.0 {
        return Quat::IDENTITY;
    }
    Quat::from_axis_angle(axis, angle * factor)
}
