//! Parallel force stepping over the star field.

use glam::Vec3;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use thiserror::Error;

use super::starfield::{StarField, StepBuffers};
use crate::config::FieldParams;

#[derive(Error, Debug)]
pub enum SchedulerError {
    #[error("Failed to build force worker pool: {0}")]
    PoolBuild(#[from] rayon::ThreadPoolBuildError),
}

/// Runs the O(N²) gravity pass on a fixed pool of workers.
///
/// The body index space splits into at most `workers` contiguous ranges, one
/// task per range. Every task reads the shared previous snapshot and owns the
/// writes to its own range, so the pass takes no locks. `step` returns only
/// once every range has finished; a tick is never left half-computed.
pub struct ForceScheduler {
    pool: ThreadPool,
    workers: usize,
}

impl ForceScheduler {
    /// Builds the worker pool. Pool construction failure is fatal to the
    /// simulation and must be surfaced by the caller.
    pub fn new(workers: usize) -> Result<Self, SchedulerError> {
        // rayon treats zero as "pick a default"; pin the count instead
        let workers = workers.max(1);
        let pool = ThreadPoolBuilder::new().num_threads(workers).build()?;
        log::debug!("force pool ready with {workers} workers");
        Ok(Self { pool, workers })
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Advances every body by one tick: swap buffers, accumulate gravity,
    /// integrate, then apply the escape/stall rule.
    pub fn step(&self, field: &mut StarField, params: &FieldParams) {
        let n = field.len();
        if n == 0 {
            return;
        }
        field.swap_buffers();
        let chunk = chunk_len(n, self.workers);
        let StepBuffers {
            prev,
            masses,
            positions,
            velocities,
        } = field.step_buffers();
        self.pool.install(|| {
            positions
                .par_chunks_mut(chunk)
                .zip(velocities.par_chunks_mut(chunk))
                .enumerate()
                .for_each(|(index, (pos_chunk, vel_chunk))| {
                    integrate_range(index * chunk, prev, masses, pos_chunk, vel_chunk, params);
                });
        });
    }
}

/// Chunk length that yields at most `workers` contiguous ranges over `n`.
fn chunk_len(n: usize, workers: usize) -> usize {
    n.div_ceil(workers).max(1)
}

fn integrate_range(
    start: usize,
    prev: &[Vec3],
    masses: &[f32],
    positions: &mut [Vec3],
    velocities: &mut [Vec3],
    params: &FieldParams,
) {
    for offset in 0..positions.len() {
        let i = start + offset;
        let mut velocity = velocities[offset];
        for j in 0..prev.len() {
            if j == i {
                continue;
            }
            let toward = prev[j] - prev[i];
            let length = toward.length();
            // coincident bodies contribute nothing
            if length == 0.0 {
                continue;
            }
            let dist = length * params.softening_scale;
            velocity += (toward / length) * (masses[j] * params.gravity_scale) / (dist * dist);
        }
        let position = prev[i] + velocity;
        if position.length() > params.escape_radius && velocity.length() < params.stall_epsilon {
            velocity = Vec3::ZERO;
        }
        positions[offset] = position;
        velocities[offset] = velocity;
    }
}
