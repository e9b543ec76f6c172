//! Per-tick input schema. The host owns device polling and key mapping.

use glam::Vec3;

/// One tick of pilot input.
///
/// Axis vectors may arrive unnormalized; the flight controller clamps them
/// to the unit ball. Command flags are edge-triggered: set only on the tick
/// the key went down.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputFrame {
    /// Angular intent about the ship axes (x pitch, y yaw, z roll).
    pub rotation: Vec3,
    /// Linear thrust intent in ship-local axes.
    pub translation: Vec3,
    /// Rebuild the star field and trails, keeping the body count.
    pub reset: bool,
    /// Advance the flight controller to its next mode.
    pub cycle_mode: bool,
    /// Freeze or resume physics. Flight control keeps running.
    pub toggle_pause: bool,
    /// Ask the host to grab or release the pointer.
    pub toggle_capture: bool,
    /// End the session.
    pub quit: bool,
}
