//! Six degree of freedom flight controller for the observer ship.

use glam::{Quat, Vec3};

use crate::config::FlightTuning;
use crate::math;

/// Control mode. Hold modes carry only the desired state they act on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlMode {
    /// Stick drives spin and thrust directly.
    Direct,
    /// Autopilot chases a held velocity and orientation.
    VelocityHold { orientation: Quat, velocity: Vec3 },
    /// Autopilot flies toward a held point, stick drags the point.
    PositionSeek { orientation: Quat, position: Vec3 },
}

impl ControlMode {
    pub fn name(&self) -> &'static str {
        match self {
            ControlMode::Direct => "direct",
            ControlMode::VelocityHold { .. } => "velocity hold",
            ControlMode::PositionSeek { .. } => "position seek",
        }
    }
}

/// Quaternion-based ship pose integrator.
///
/// `orientation` is the ship's attitude, `rotation` the spin applied to it
/// every tick. All three mode branches feed the same epilogue: renormalize,
/// compose, advance position by velocity. Runs every tick, paused or not.
pub struct FlightController {
    orientation: Quat,
    rotation: Quat,
    position: Vec3,
    velocity: Vec3,
    mode: ControlMode,
    tuning: FlightTuning,
}

impl FlightController {
    pub fn new(tuning: FlightTuning) -> Self {
        Self {
            orientation: Quat::IDENTITY,
            rotation: Quat::IDENTITY,
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            mode: ControlMode::Direct,
            tuning,
        }
    }

    /// Applies one tick of pilot input. Intent vectors beyond the unit ball
    /// are clamped, so device mapping can be sloppy about magnitudes.
    pub fn control(&mut self, angular: Vec3, linear: Vec3) {
        let angular = angular.clamp_length_max(1.0);
        let linear = linear.clamp_length_max(1.0);
        let thrust = self.orientation * (linear * self.tuning.force_scale);

        match &mut self.mode {
            ControlMode::Direct => {
                self.rotation *= math::turn_increment(angular, self.tuning.force_scale);
                self.velocity += thrust;
            }
            ControlMode::VelocityHold {
                orientation: held,
                velocity: desired,
            } => {
                *held = (*held * math::turn_increment(angular, self.tuning.rotation_scale))
                    .normalize();
                *desired += thrust;
                chase_orientation(&mut self.rotation, self.orientation, *held, &self.tuning);
                chase_velocity(&mut self.velocity, *desired, self.tuning.force_scale);
            }
            ControlMode::PositionSeek {
                orientation: held,
                position: target,
            } => {
                *held = (*held * math::turn_increment(angular, self.tuning.rotation_scale))
                    .normalize();
                // measure the offset before the stick drags the target
                let offset = *target - self.position;
                *target += thrust * self.tuning.position_scale;

                let mut desired = offset.normalize_or_zero();
                if self.velocity != Vec3::ZERO && offset != Vec3::ZERO {
                    // cancel the velocity component orbiting the target
                    desired -= (self.velocity.normalize() * self.tuning.damp_gain)
                        .reject_from(offset);
                }
                let desired =
                    desired.normalize_or_zero() * (offset.length() * self.tuning.approach_scale);
                chase_orientation(&mut self.rotation, self.orientation, *held, &self.tuning);
                chase_velocity(&mut self.velocity, desired, self.tuning.force_scale);
            }
        }

        self.rotation = self.rotation.normalize();
        self.orientation = (self.orientation * self.rotation).normalize();
        self.position += self.velocity;
    }

    /// Advances to the next mode. Entering a hold mode snapshots the current
    /// pose as the held target; the actual pose never jumps on a switch.
    pub fn cycle_mode(&mut self) {
        self.mode = match self.mode {
            ControlMode::Direct => ControlMode::VelocityHold {
                orientation: self.orientation,
                velocity: self.velocity,
            },
            ControlMode::VelocityHold { .. } => ControlMode::PositionSeek {
                orientation: self.orientation,
                position: self.position,
            },
            ControlMode::PositionSeek { .. } => ControlMode::Direct,
        };
        log::info!("flight mode switched to {}", self.mode.name());
    }

    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn mode(&self) -> ControlMode {
        self.mode
    }
}

/// Steers the spin toward the held orientation, anticipating the spin the
/// ship already carries so it brakes instead of overshooting.
fn chase_orientation(rotation: &mut Quat, orientation: Quat, held: Quat, tuning: &FlightTuning) {
    let mut residual = orientation.inverse() * held;
    residual *= math::scale_rotation(rotation.inverse(), tuning.spin_lookahead);
    *rotation *= math::bounded_slerp(residual, tuning.max_turn_step);
}

/// Nudges velocity toward `desired` by one fixed-length correction step.
fn chase_velocity(velocity: &mut Vec3, desired: Vec3, force_scale: f32) {
    *velocity += (desired - *velocity).normalize_or_zero() * force_scale;
}
