//! Scripted sensor motion for exercising the scene.
//!
//! Profiles generate the accelerometer/compass stream a device would
//! produce under some attitude history. Jitter is layered on separately so
//! every profile can run clean or noisy, and always from a seeded RNG so
//! runs reproduce exactly.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use skysphere::{AccelSample, Angle};
use std::f64::consts::TAU;

/// One scripted sensor snapshot.
#[derive(Debug, Clone, Copy)]
pub struct SensorFrame {
    pub accel: AccelSample,
    pub compass: Option<Angle>,
}

/// A deterministic attitude script, sampled once per tick.
pub trait MotionProfile {
    fn sample(&mut self, tick: u64) -> SensorFrame;

    fn description(&self) -> &str;
}

/// Device held still at a fixed attitude.
pub struct SteadyHold {
    accel: AccelSample,
    compass: Option<Angle>,
}

impl SteadyHold {
    pub fn new(accel: AccelSample, compass: Option<Angle>) -> Self {
        Self { accel, compass }
    }

    /// Upright and level, no heading sensor.
    pub fn level() -> Self {
        Self::new(AccelSample::new(0, -1000, 0), None)
    }
}

impl MotionProfile for SteadyHold {
    fn sample(&mut self, _tick: u64) -> SensorFrame {
        SensorFrame {
            accel: self.accel,
            compass: self.compass,
        }
    }

    fn description(&self) -> &str {
        "steady hold"
    }
}

/// Pitch oscillation: the vertical axis swings sinusoidally while the
/// device stays level side-to-side.
pub struct PitchSweep {
    amplitude: f64,
    period_ticks: f64,
}

impl PitchSweep {
    pub fn new(amplitude: i16, period_ticks: u64) -> Self {
        Self {
            amplitude: amplitude as f64,
            period_ticks: period_ticks.max(1) as f64,
        }
    }
}

impl MotionProfile for PitchSweep {
    fn sample(&mut self, tick: u64) -> SensorFrame {
        let phase = TAU * tick as f64 / self.period_ticks;
        let z = (self.amplitude * phase.sin()).round() as i16;
        SensorFrame {
            accel: AccelSample::new(0, -1000, z),
            compass: None,
        }
    }

    fn description(&self) -> &str {
        "sinusoidal pitch sweep"
    }
}

/// Constant side tilt: under the dead-reckoned yaw policy this spins the
/// view at a steady rate; the compass heading, when asked for, walks the
/// turn slowly.
pub struct Tumble {
    tilt_x: i16,
    heading_step: i16,
}

impl Tumble {
    pub fn new(tilt_x: i16, heading_step: i16) -> Self {
        Self {
            tilt_x,
            heading_step,
        }
    }
}

impl MotionProfile for Tumble {
    fn sample(&mut self, tick: u64) -> SensorFrame {
        let heading = Angle::from_raw((tick as i64 * self.heading_step as i64) as i16);
        SensorFrame {
            accel: AccelSample::new(self.tilt_x, -1000, 0),
            compass: Some(heading),
        }
    }

    fn description(&self) -> &str {
        "constant tilt tumble"
    }
}

/// Wraps any profile with Gaussian sensor jitter.
pub struct Jittered<P> {
    inner: P,
    noise: Normal<f64>,
    rng: StdRng,
}

impl<P: MotionProfile> Jittered<P> {
    pub fn new(inner: P, sigma: f64, seed: u64) -> Self {
        Self {
            inner,
            noise: Normal::new(0.0, sigma).expect("sigma must be finite and non-negative"),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn jitter(&mut self, value: i16) -> i16 {
        (value as f64 + self.noise.sample(&mut self.rng)).round() as i16
    }
}

impl<P: MotionProfile> MotionProfile for Jittered<P> {
    fn sample(&mut self, tick: u64) -> SensorFrame {
        let frame = self.inner.sample(tick);
        SensorFrame {
            accel: AccelSample::new(
                self.jitter(frame.accel.x),
                self.jitter(frame.accel.y),
                self.jitter(frame.accel.z),
            ),
            compass: frame.compass,
        }
    }

    fn description(&self) -> &str {
        self.inner.description()
    }
}
