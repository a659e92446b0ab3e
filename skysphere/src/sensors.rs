//! Sensor interface consumed by the frame driver.
//!
//! Peek-latest semantics: each call returns the most recent sample, never
//! a queue. There is no error path; a source with nothing fresh returns a
//! stale (or zero) reading and the orientation filter simply tracks it
//! until real data resumes.

use crate::angle::Angle;
use crate::camera::AccelSample;

/// Synchronous, non-blocking sensor snapshot provider.
pub trait SensorSource {
    /// Latest accelerometer sample.
    fn accel(&mut self) -> AccelSample;

    /// Latest compass heading, if the deployment has one.
    fn compass(&mut self) -> Option<Angle> {
        None
    }
}

/// A source that always returns the same sample. Handy for tests and for
/// holding the scene at a fixed attitude.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticSensor {
    pub accel: AccelSample,
    pub compass: Option<Angle>,
}

impl StaticSensor {
    pub fn level() -> Self {
        Self {
            accel: AccelSample::new(0, -1000, 0),
            compass: None,
        }
    }
}

impl SensorSource for StaticSensor {
    fn accel(&mut self) -> AccelSample {
        self.accel
    }

    fn compass(&mut self) -> Option<Angle> {
        self.compass
    }
}
