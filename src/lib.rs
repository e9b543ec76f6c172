//! # startrails
//!
//! Real-time N-body "star field" simulation with renderable motion trails
//! and a pilotable observer ship.
//!
//! The crate owns all simulation state and produces plain data for a host
//! renderer: flat trail geometry, view/projection matrices, and session
//! flags. Windowing, GPU upload, shader work, and input device polling stay
//! on the host side.
//!
//! ## Architecture
//!
//! - [`simulation::StarField`] - structure-of-arrays body state with double
//!   buffered positions
//! - [`simulation::ForceScheduler`] - softened inverse-square gravity on a
//!   fixed rayon pool, one task per contiguous index range, joined every tick
//! - [`simulation::TrailBuffer`] - per-body trail rings flattened into
//!   line-list vertex arrays a renderer can upload directly
//! - [`flight::FlightController`] - quaternion ship pose with direct,
//!   velocity-hold, and position-seek modes
//! - [`simulation::SimulationClock`] - command handling, pause gating, and
//!   the per-tick ordering of everything above
//!
//! ## Data flow
//!
//! ```text
//! InputFrame -> SimulationClock -> FlightController         (every tick)
//!                              \-> ForceScheduler -> StarField -> TrailBuffer
//!                                                        (unpaused ticks)
//! FramePacket <- trail slices + current slice + view/projection matrices
//! ```
//!
//! ## Dependencies
//!
//! - **Math**: `glam` (vectors, quaternions, matrices), `bytemuck` (Pod
//!   camera uniform)
//! - **Concurrency**: `rayon` (fixed-size force worker pool)
//! - **Serialization**: `serde` + `serde_yaml` (config files)
//! - **Diagnostics**: `log` + `env_logger` (session logging), `thiserror`
//!   (typed errors)
//! - **Generation**: `rand` (seedable star field initialization)

pub mod app;
pub mod config;
pub mod flight;
pub mod input;
pub mod math;
pub mod render;
pub mod simulation;
