//! Simulated celestial sphere rendering driven by device orientation.
//!
//! This crate implements the numeric core of the sky viewer: a fixed-point
//! angle domain with table-backed trig, an orientation filter smoothing
//! raw accelerometer/compass samples into a camera pose, a sphere-to-screen
//! projection engine, a horizon rasterizer and the per-tick frame driver
//! that glues them together. Host concerns (windowing, buttons, timers)
//! stay outside; they talk to the scene through `SensorSource` and the
//! button/tick/render entry points on `SkyScene`.

pub mod angle;
pub mod camera;
pub mod catalog;
pub mod config;
pub mod error;
pub mod framebuffer;
pub mod horizon;
pub mod overlay;
pub mod projection;
pub mod scene;
pub mod sensors;

pub use angle::{atan2_lookup, cos_lookup, sin_lookup, Angle, TRIG_SCALE};
pub use camera::{AccelSample, CameraPose, OrientationFilter, YawSource};
pub use catalog::{SkyCatalog, SkyPoint};
pub use config::{CatalogConfig, DisplaySize, Palette, SceneConfig};
pub use error::SphereError;
pub use framebuffer::FrameBuffer;
pub use horizon::{render_horizon, sweep_axis, SweepAxis};
pub use overlay::TriangleOverlay;
pub use projection::{project, ScreenPoint, ZoomLevel};
pub use scene::{SceneReadout, SkyScene};
pub use sensors::{SensorSource, StaticSensor};
