//! Simulation core: body state, the parallel force pass, trail recording,
//! and the clock that drives them.

pub mod clock;
pub mod scheduler;
pub mod starfield;
pub mod trails;

pub use clock::SimulationClock;
pub use scheduler::{ForceScheduler, SchedulerError};
pub use starfield::StarField;
pub use trails::TrailBuffer;
