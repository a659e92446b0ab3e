//! Simulation harness for the skysphere scene.
//!
//! Provides scripted motion profiles, a tick runner and frame export used
//! by the integration tests and the `sphere_view` binary.

pub mod motion_profiles;
pub mod runner;

pub use motion_profiles::{Jittered, MotionProfile, PitchSweep, SensorFrame, SteadyHold, Tumble};
pub use runner::{run_scene, RunnerResults};
