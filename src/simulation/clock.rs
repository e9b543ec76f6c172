//! Tick orchestration: command handling, pause gating, render handoff.

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::scheduler::{ForceScheduler, SchedulerError};
use super::starfield::StarField;
use super::trails::TrailBuffer;
use crate::config::SimConfig;
use crate::flight::FlightController;
use crate::input::InputFrame;
use crate::render::{self, FramePacket};

/// Owns the whole simulation and advances it one tick at a time.
///
/// Commands are applied first, then the ship integrates, then physics and
/// trail recording run unless paused. A paused clock keeps flying the ship
/// and keeps handing out frames built from the last completed tick; the
/// force step joins before returning, so pause can never catch a tick half
/// done.
pub struct SimulationClock {
    config: SimConfig,
    rng: StdRng,
    field: StarField,
    scheduler: ForceScheduler,
    trails: TrailBuffer,
    ship: FlightController,
    paused: bool,
    mouse_captured: bool,
    quit_requested: bool,
    ticks: u64,
}

impl SimulationClock {
    pub fn new(config: SimConfig) -> Result<Self, SchedulerError> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let scheduler = ForceScheduler::new(config.scheduler.workers)?;
        let field = StarField::generate(&config.field, &mut rng);
        let trails = TrailBuffer::new(&field, &config.trails);
        let ship = FlightController::new(config.flight.clone());
        log::info!(
            "simulation ready: {} bodies, {} trail slices, {} workers",
            field.len(),
            config.trails.slices,
            scheduler.workers()
        );
        Ok(Self {
            config,
            rng,
            field,
            scheduler,
            trails,
            ship,
            paused: false,
            mouse_captured: true,
            quit_requested: false,
            ticks: 0,
        })
    }

    /// Advances the session by one tick of input.
    pub fn tick(&mut self, input: &InputFrame) {
        if input.quit {
            self.quit_requested = true;
            log::info!("quit requested");
        }
        if input.reset {
            self.reset();
        }
        if input.cycle_mode {
            self.ship.cycle_mode();
        }
        if input.toggle_pause {
            self.paused = !self.paused;
            log::info!("physics {}", if self.paused { "paused" } else { "resumed" });
        }
        if input.toggle_capture {
            self.mouse_captured = !self.mouse_captured;
        }

        self.ship.control(input.rotation, input.translation);
        if !self.paused {
            self.scheduler.step(&mut self.field, &self.config.field);
            self.trails.record(&self.field);
        }
        self.ticks += 1;
    }

    /// Assembles the render handoff for the current state.
    pub fn frame(&self, aspect: f32) -> FramePacket<'_> {
        FramePacket {
            trail_positions: self.trails.positions(),
            trail_masses: self.trails.masses(),
            current_slice: self.trails.current_slice(),
            bodies: self.trails.bodies(),
            segments_per_body: self.trails.segments_per_body(),
            vertices_per_body: self.trails.vertices_per_body(),
            view: render::view_matrix(self.ship.orientation(), self.ship.position()),
            projection: render::projection_matrix(&self.config.camera, aspect),
            paused: self.paused,
        }
    }

    // Tears down and regrows the galaxy from the ongoing RNG stream. The
    // body count comes from config, so it survives every reset.
    fn reset(&mut self) {
        self.field = StarField::generate(&self.config.field, &mut self.rng);
        self.trails = TrailBuffer::new(&self.field, &self.config.trails);
        log::info!("star field reset ({} bodies)", self.field.len());
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn mouse_captured(&self) -> bool {
        self.mouse_captured
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn ship(&self) -> &FlightController {
        &self.ship
    }

    pub fn field(&self) -> &StarField {
        &self.field
    }

    pub fn trails(&self) -> &TrailBuffer {
        &self.trails
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flight::ControlMode;
    use glam::Vec3;

    fn small_config() -> SimConfig {
        let mut config = SimConfig::default();
        config.field.num_bodies = 8;
        config.scheduler.workers = 2;
        config.trails.slices = 4;
        config.trails.ticks_per_slice = 1;
        config.seed = Some(5);
        config
    }

    fn thrust() -> InputFrame {
        InputFrame {
            translation: Vec3::Z,
            ..InputFrame::default()
        }
    }

    #[test]
    fn test_pause_freezes_physics_but_not_flight() {
        let mut clock = SimulationClock::new(small_config()).unwrap();
        for _ in 0..3 {
            clock.tick(&thrust());
        }
        let frozen = clock.field().positions().to_vec();
        let slice = clock.trails().current_slice();

        clock.tick(&InputFrame {
            toggle_pause: true,
            ..InputFrame::default()
        });
        assert!(clock.is_paused());
        let ship_before = clock.ship().position();
        for _ in 0..5 {
            clock.tick(&thrust());
        }
        assert_eq!(clock.field().positions(), &frozen[..]);
        assert_eq!(clock.trails().current_slice(), slice);
        assert_ne!(clock.ship().position(), ship_before);

        clock.tick(&InputFrame {
            toggle_pause: true,
            ..InputFrame::default()
        });
        assert!(!clock.is_paused());
        clock.tick(&InputFrame::default());
        assert_ne!(clock.field().positions(), &frozen[..]);
    }

    #[test]
    fn test_reset_preserves_body_count_and_regrows() {
        let mut clock = SimulationClock::new(small_config()).unwrap();
        for _ in 0..10 {
            clock.tick(&InputFrame::default());
        }
        let before = clock.field().positions().to_vec();
        clock.tick(&InputFrame {
            reset: true,
            ..InputFrame::default()
        });
        assert_eq!(clock.field().len(), 8);
        assert_ne!(clock.field().positions(), &before[..]);
        // fresh trails start their cycle over
        assert_eq!(clock.trails().current_slice(), 0);
    }

    #[test]
    fn test_mode_cycle_command_reaches_the_ship() {
        let mut clock = SimulationClock::new(small_config()).unwrap();
        clock.tick(&InputFrame {
            cycle_mode: true,
            ..InputFrame::default()
        });
        assert!(matches!(
            clock.ship().mode(),
            ControlMode::VelocityHold { .. }
        ));
    }

    #[test]
    fn test_quit_and_capture_flags() {
        let mut clock = SimulationClock::new(small_config()).unwrap();
        assert!(clock.mouse_captured());
        clock.tick(&InputFrame {
            toggle_capture: true,
            ..InputFrame::default()
        });
        assert!(!clock.mouse_captured());
        assert!(!clock.quit_requested());
        clock.tick(&InputFrame {
            quit: true,
            ..InputFrame::default()
        });
        assert!(clock.quit_requested());
        assert_eq!(clock.ticks(), 2);
    }

    #[test]
    fn test_frame_packet_matches_trail_shape() {
        let mut clock = SimulationClock::new(small_config()).unwrap();
        clock.tick(&InputFrame::default());
        let frame = clock.frame(16.0 / 9.0);
        assert_eq!(frame.bodies, 8);
        assert_eq!(frame.segments_per_body, 5);
        assert_eq!(frame.vertices_per_body, 2 * frame.segments_per_body);
        assert_eq!(
            frame.trail_positions.len(),
            frame.bodies * frame.vertices_per_body * 3
        );
        assert_eq!(
            frame.trail_masses.len(),
            frame.bodies * frame.vertices_per_body
        );
        assert!(!frame.paused);
        let uniform = frame.camera_uniform();
        assert!(uniform.view_proj.iter().flatten().all(|v| v.is_finite()));
    }

    #[test]
    fn test_same_seed_replays_identically() {
        let mut a = SimulationClock::new(small_config()).unwrap();
        let mut b = SimulationClock::new(small_config()).unwrap();
        for _ in 0..20 {
            a.tick(&thrust());
            b.tick(&thrust());
        }
        assert_eq!(a.field().positions(), b.field().positions());
        assert_eq!(a.field().velocities(), b.field().velocities());
    }
}
