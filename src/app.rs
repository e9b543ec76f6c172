//! Headless demo session: drives the simulation clock through a scripted
//! flight and logs tick throughput.

use std::path::Path;
use std::time::{Duration, Instant};

use glam::Vec3;
use thiserror::Error;

use crate::config::{ConfigError, SimConfig};
use crate::input::InputFrame;
use crate::simulation::{SchedulerError, SimulationClock};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Failed to load configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Failed to start the simulation: {0}")]
    Scheduler(#[from] SchedulerError),
}

const ASPECT: f32 = 16.0 / 9.0;

pub fn run() -> Result<(), AppError> {
    env_logger::init();
    let started = Instant::now();

    let config = match std::env::args().nth(1) {
        Some(path) => SimConfig::load(Path::new(&path))?,
        None => SimConfig::default(),
    };
    let mut clock = SimulationClock::new(config)?;
    log::info!("init took {:.2?}", started.elapsed());

    let mut rate_ticks = 0u32;
    let mut step_time = Duration::ZERO;
    let mut rate_timer = Instant::now();
    for tick in 0.. {
        let step_started = Instant::now();
        clock.tick(&scripted_input(tick));
        step_time += step_started.elapsed();
        if clock.quit_requested() {
            break;
        }
        rate_ticks += 1;
        if rate_timer.elapsed().as_secs_f32() >= 1.0 {
            let frame = clock.frame(ASPECT);
            log::info!(
                "{} ticks/s, mode {}, slice {}, ship at {:.3?}",
                rate_ticks,
                clock.ship().mode().name(),
                frame.current_slice,
                clock.ship().position()
            );
            log::debug!("mean step {:.2?}", step_time / rate_ticks);
            rate_ticks = 0;
            step_time = Duration::ZERO;
            rate_timer = Instant::now();
        }
    }

    let frame = clock.frame(ASPECT);
    log::info!(
        "session over after {} ticks, slice {}, {:.2?} elapsed",
        clock.ticks(),
        frame.current_slice,
        started.elapsed()
    );
    Ok(())
}

/// Canned pilot session, roughly 50 seconds at the usual 60 Hz cadence.
fn scripted_input(tick: u64) -> InputFrame {
    let mut frame = InputFrame::default();
    match tick {
        // spiral out through the disk under direct control
        0..=599 => {
            frame.rotation = Vec3::new(0.0, 0.3, 0.0);
            frame.translation = Vec3::new(0.0, 0.0, 1.0);
        }
        600 => frame.cycle_mode = true,
        // hold velocity, feed it occasional thrust bursts
        601..=1499 => {
            if (tick / 150) % 2 == 0 {
                frame.translation = Vec3::new(0.0, 0.0, 1.0);
            }
        }
        1500 => frame.cycle_mode = true,
        // drag the seek target across the field
        1501..=1800 => frame.translation = Vec3::new(1.0, 0.0, 0.0),
        1900 => frame.toggle_pause = true,
        // look around the frozen field
        1901..=2199 => frame.rotation = Vec3::new(0.2, 0.0, 0.1),
        2200 => frame.toggle_pause = true,
        2400 => frame.reset = true,
        2500 => frame.cycle_mode = true,
        3000 => frame.quit = true,
        _ => {}
    }
    frame
}
