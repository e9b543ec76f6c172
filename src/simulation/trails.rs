//! Fixed-depth motion trails stored as flat line-list geometry.

use glam::Vec3;

use super::starfield::StarField;
use crate::config::TrailParams;

/// Per-body trail rings over two flat arrays (vertex positions, vertex
/// masses) sized for direct upload by a host renderer.
///
/// Each body owns `slices + 1` two-vertex segments. Recording a slice stores
/// the sample into the trailing vertex of that slice's segment and the
/// leading vertex of the next, so adjacent segments share their junction
/// exactly. The spare final segment is never written and keeps the wrap from
/// splitting a real segment; the segment just ahead of the current slice
/// bridges the newest sample to the oldest, and renderers fade it out using
/// `current_slice`. Rings start saturated with each body's initial sample,
/// so an unwritten cell is always stale data, never a sentinel.
pub struct TrailBuffer {
    bodies: usize,
    slices: usize,
    ticks_per_slice: u32,
    // ticks since the last wrap; slice advances every ticks_per_slice and
    // both reset in the same record call
    ticks: u32,
    slice: usize,
    positions: Vec<f32>,
    masses: Vec<f32>,
}

impl TrailBuffer {
    pub fn new(field: &StarField, params: &TrailParams) -> Self {
        let bodies = field.len();
        let slices = params.slices.max(1);
        let verts = 2 * (slices + 1);
        let mut buffer = Self {
            bodies,
            slices,
            ticks_per_slice: params.ticks_per_slice.max(1),
            ticks: 0,
            slice: 0,
            positions: vec![0.0; bodies * verts * 3],
            masses: vec![0.0; bodies * verts],
        };
        for body in 0..bodies {
            for vert in 0..verts {
                buffer.store(body, vert, field.positions()[body], field.masses()[body]);
            }
        }
        buffer
    }

    /// Records the current field state, once per unpaused tick.
    pub fn record(&mut self, field: &StarField) {
        debug_assert_eq!(field.len(), self.bodies);
        if self.ticks % self.ticks_per_slice == 0 {
            let next = (self.ticks / self.ticks_per_slice) as usize;
            if next == self.slices {
                self.ticks = 0;
                self.slice = 0;
            } else {
                self.slice = next;
            }
        }
        let ring = 2 * self.slices;
        for body in 0..self.bodies {
            let pos = field.positions()[body];
            let mass = field.masses()[body];
            self.store(body, (2 * self.slice + 1) % ring, pos, mass);
            self.store(body, (2 * self.slice + 2) % ring, pos, mass);
        }
        self.ticks += 1;
    }

    fn store(&mut self, body: usize, vert: usize, pos: Vec3, mass: f32) {
        let index = body * self.vertices_per_body() + vert;
        self.positions[index * 3..index * 3 + 3].copy_from_slice(&pos.to_array());
        self.masses[index] = mass;
    }

    /// Flat vertex positions, 3 floats per vertex.
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Flat vertex masses, 1 float per vertex.
    pub fn masses(&self) -> &[f32] {
        &self.masses
    }

    /// Slice most recently written. Drives the renderer's trail fade.
    pub fn current_slice(&self) -> usize {
        self.slice
    }

    pub fn bodies(&self) -> usize {
        self.bodies
    }

    pub fn segments_per_body(&self) -> usize {
        self.slices + 1
    }

    pub fn vertices_per_body(&self) -> usize {
        2 * (self.slices + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_body(pos: Vec3, mass: f32) -> StarField {
        StarField::from_parts(vec![pos], vec![Vec3::ZERO], vec![mass])
    }

    fn vertex(trails: &TrailBuffer, body: usize, vert: usize) -> (Vec3, f32) {
        let index = body * trails.vertices_per_body() + vert;
        let p = &trails.positions()[index * 3..index * 3 + 3];
        (Vec3::new(p[0], p[1], p[2]), trails.masses()[index])
    }

    #[test]
    fn test_rings_prefill_with_initial_sample() {
        let field = StarField::from_parts(
            vec![Vec3::new(1.0, 2.0, 3.0), Vec3::new(-4.0, 0.0, 4.0)],
            vec![Vec3::ZERO, Vec3::ZERO],
            vec![2.0, 8.0],
        );
        let trails = TrailBuffer::new(&field, &TrailParams::default());
        assert_eq!(trails.positions().len(), 2 * 151 * 2 * 3);
        assert_eq!(trails.masses().len(), 2 * 151 * 2);
        for body in 0..2 {
            for vert in 0..trails.vertices_per_body() {
                let (pos, mass) = vertex(&trails, body, vert);
                assert_eq!(pos, field.positions()[body]);
                assert_eq!(mass, field.masses()[body]);
            }
        }
    }

    #[test]
    fn test_record_writes_shared_junction() {
        let params = TrailParams {
            slices: 4,
            ticks_per_slice: 1,
        };
        let start = single_body(Vec3::ZERO, 3.0);
        let mut trails = TrailBuffer::new(&start, &params);

        let a = Vec3::new(1.0, 0.0, 0.0);
        trails.record(&single_body(a, 3.0));
        assert_eq!(trails.current_slice(), 0);
        assert_eq!(vertex(&trails, 0, 1), (a, 3.0));
        assert_eq!(vertex(&trails, 0, 2), (a, 3.0));

        let b = Vec3::new(2.0, 0.0, 0.0);
        trails.record(&single_body(b, 3.0));
        assert_eq!(trails.current_slice(), 1);
        assert_eq!(vertex(&trails, 0, 3), (b, 3.0));
        assert_eq!(vertex(&trails, 0, 4), (b, 3.0));
        // slice 0 untouched by the second record
        assert_eq!(vertex(&trails, 0, 1), (a, 3.0));
    }

    #[test]
    fn test_last_slice_wraps_onto_vertex_zero() {
        let params = TrailParams {
            slices: 3,
            ticks_per_slice: 1,
        };
        let mut trails = TrailBuffer::new(&single_body(Vec3::ZERO, 1.0), &params);
        for step in 1..=3 {
            trails.record(&single_body(Vec3::splat(step as f32), 1.0));
        }
        // slice 2 writes vertices 5 and (6 mod 6) = 0
        assert_eq!(vertex(&trails, 0, 5).0, Vec3::splat(3.0));
        assert_eq!(vertex(&trails, 0, 0).0, Vec3::splat(3.0));
    }

    #[test]
    fn test_wrap_resets_slice_and_counter_together() {
        let params = TrailParams {
            slices: 3,
            ticks_per_slice: 2,
        };
        let body = single_body(Vec3::ZERO, 1.0);
        let mut trails = TrailBuffer::new(&body, &params);
        let mut seen = Vec::new();
        for _ in 0..14 {
            trails.record(&body);
            seen.push(trails.current_slice());
        }
        // two ticks per slice, wrap after slice 2, then a full two ticks on
        // slice 0 again: the counter reset rode along with the wrap
        assert_eq!(seen, vec![0, 0, 1, 1, 2, 2, 0, 0, 1, 1, 2, 2, 0, 0]);
    }

    #[test]
    fn test_spare_segment_keeps_prefill() {
        let params = TrailParams {
            slices: 2,
            ticks_per_slice: 1,
        };
        let initial = Vec3::new(9.0, 9.0, 9.0);
        let mut trails = TrailBuffer::new(&single_body(initial, 5.0), &params);
        for step in 0..20 {
            trails.record(&single_body(Vec3::splat(step as f32), 5.0));
        }
        // vertices 4 and 5 form the spare segment past the writable ring
        assert_eq!(vertex(&trails, 0, 4).0, initial);
        assert_eq!(vertex(&trails, 0, 5).0, initial);
    }
}
