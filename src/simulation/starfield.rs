//! Structure-of-arrays body state for the star field.

use glam::{Mat3, Vec3};
use rand::Rng;

use crate::config::FieldParams;

/// All per-body state, stored as parallel arrays.
///
/// Positions are double buffered: `positions` holds the last completed tick,
/// `prev_positions` the tick before. The force step swaps the buffers and
/// rewrites `positions` in full, so between ticks readers always see one
/// complete snapshot. Body count is fixed after construction.
pub struct StarField {
    positions: Vec<Vec3>,
    prev_positions: Vec<Vec3>,
    velocities: Vec<Vec3>,
    masses: Vec<f32>,
}

/// Split borrows handed to the force workers: shared reads of the last
/// snapshot, exclusive writes of the next one.
pub(crate) struct StepBuffers<'a> {
    pub prev: &'a [Vec3],
    pub masses: &'a [f32],
    pub positions: &'a mut [Vec3],
    pub velocities: &'a mut [Vec3],
}

impl StarField {
    /// Builds a spinning disk galaxy.
    ///
    /// Each body starts on a near-circular orbit: radial distance in
    /// [0.1, 1.1), a little vertical jitter, tangential speed
    /// sqrt(orbit_speed / r), the whole sample rotated around +Y by a random
    /// angle. Masses follow a bounded power law, 2^[0, mass_doublings).
    /// Zero disk thickness and zero mass doublings are valid, giving a flat
    /// disk of unit masses.
    pub fn generate<R: Rng>(params: &FieldParams, rng: &mut R) -> Self {
        let n = params.num_bodies;
        let mut positions = Vec::with_capacity(n);
        let mut velocities = Vec::with_capacity(n);
        let mut masses = Vec::with_capacity(n);
        for _ in 0..n {
            let radius = rng.gen_range(0.0..1.0f32) + 0.1;
            let height = (rng.gen::<f32>() * 2.0 - 1.0) * params.disk_thickness;
            let spin = Mat3::from_rotation_y(rng.gen_range(0.0..std::f32::consts::TAU));
            positions.push(spin * Vec3::new(radius, height, 0.0));
            velocities.push(spin * Vec3::new(0.0, 0.0, (params.orbit_speed / radius).sqrt()));
            masses.push(2.0f32.powf(rng.gen::<f32>() * params.mass_doublings));
        }
        Self {
            prev_positions: positions.clone(),
            positions,
            velocities,
            masses,
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn velocities(&self) -> &[Vec3] {
        &self.velocities
    }

    pub fn masses(&self) -> &[f32] {
        &self.masses
    }

    /// Retires the current snapshot to the read side of the double buffer.
    pub(crate) fn swap_buffers(&mut self) {
        std::mem::swap(&mut self.positions, &mut self.prev_positions);
    }

    pub(crate) fn step_buffers(&mut self) -> StepBuffers<'_> {
        StepBuffers {
            prev: &self.prev_positions,
            masses: &self.masses,
            positions: &mut self.positions,
            velocities: &mut self.velocities,
        }
    }

    #[cfg(test)]
    pub(crate) fn from_parts(positions: Vec<Vec3>, velocities: Vec<Vec3>, masses: Vec<f32>) -> Self {
        assert_eq!(positions.len(), velocities.len());
        assert_eq!(positions.len(), masses.len());
        Self {
            prev_positions: positions.clone(),
            positions,
            velocities,
            masses,
        }
    }
}
