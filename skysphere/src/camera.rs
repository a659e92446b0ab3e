//! Camera pose and the orientation filter that feeds it.
//!
//! The filter turns raw accelerometer (and optionally compass) samples into
//! a smoothed pitch/roll/yaw pose once per tick. Smoothing uses a leaky
//! filter with an exact-convergence rounding rule: the truncation remainder
//! is added back each step, so the pose reaches the target in a small
//! bounded number of ticks instead of approaching it asymptotically.

use crate::angle::{atan2_lookup, Angle};
use serde::{Deserialize, Serialize};

/// One raw accelerometer sample, in device axes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccelSample {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

impl AccelSample {
    pub const fn new(x: i16, y: i16, z: i16) -> Self {
        Self { x, y, z }
    }
}

/// The smoothed camera orientation, read by the projection engine and the
/// horizon rasterizer. Owned by the scene; mutated only by the filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CameraPose {
    /// Tilt up/down. Zero faces the horizon.
    pub pitch: Angle,
    /// Side-to-side tilt.
    pub roll: Angle,
    /// Compass-facing direction.
    pub yaw: Angle,
}

/// Where the yaw estimate comes from. One profile per deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode")]
pub enum YawSource {
    /// No heading sensor: accumulate a fraction of the roll target each
    /// tick, so the view rotates at a rate proportional to device tilt.
    DeadReckoned { rate_shift: u8 },
    /// Pull yaw toward the compass heading with the leaky filter, but only
    /// while the device is near portrait (both raw pitch and roll targets
    /// within `portrait_band` raw units of zero). Outside the band the
    /// compass is unreliable and the sample is ignored for the tick.
    CompassGated { portrait_band: i16 },
}

impl Default for YawSource {
    fn default() -> Self {
        YawSource::DeadReckoned { rate_shift: 4 }
    }
}

/// Accelerometer vertical-axis clamp bounding the pitch estimate.
const ACCEL_Z_CLAMP: i16 = 1024;

/// Leaky smoothing step: `current + delta/n + delta%n`.
///
/// Both the truncating division and the remainder use the sign of `delta`,
/// so the step never overshoots and the remainder term guarantees exact
/// convergence once `|delta| < n`.
fn leaky_step(current: Angle, target: Angle, n: i16) -> Angle {
    let delta = target.raw().wrapping_sub(current.raw());
    Angle::from_raw(current.raw().wrapping_add(delta / n + delta % n))
}

/// Per-tick orientation filter.
#[derive(Debug, Clone)]
pub struct OrientationFilter {
    divisor: i16,
    yaw_source: YawSource,
}

impl OrientationFilter {
    pub fn new(divisor: i16, yaw_source: YawSource) -> Self {
        Self { divisor, yaw_source }
    }

    /// Fold one sensor snapshot into the pose.
    ///
    /// The pitch target is a linear function of the clamped vertical
    /// reading rather than an arctangent tilt estimate; the cheap form
    /// behaves better on real sensor noise despite the lower geometric
    /// accuracy. The roll target is the arctangent of the two horizontal
    /// axes.
    pub fn update(&self, pose: &mut CameraPose, accel: AccelSample, compass: Option<Angle>) {
        let z = accel.z.clamp(-ACCEL_Z_CLAMP, ACCEL_Z_CLAMP);
        let pitch_target = Angle::from_raw((z as i32 * -16) as i16);
        pose.pitch = leaky_step(pose.pitch, pitch_target, self.divisor);

        let roll_target = -atan2_lookup(accel.x as i32, -(accel.y as i32));
        pose.roll = leaky_step(pose.roll, roll_target, self.divisor);

        match self.yaw_source {
            YawSource::DeadReckoned { rate_shift } => {
                pose.yaw = pose.yaw + Angle::from_raw(roll_target.raw() >> rate_shift);
            }
            YawSource::CompassGated { portrait_band } => {
                let near_portrait = (pitch_target.raw() as i32).abs() <= portrait_band as i32
                    && (roll_target.raw() as i32).abs() <= portrait_band as i32;
                if let (true, Some(heading)) = (near_portrait, compass) {
                    pose.yaw = leaky_step(pose.yaw, heading, self.divisor);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter_with(yaw_source: YawSource) -> OrientationFilter {
        OrientationFilter::new(8, yaw_source)
    }

    /// Steady upright sample: zero pitch and roll targets.
    const LEVEL: AccelSample = AccelSample::new(0, -1000, 0);

    #[test]
    fn test_leaky_step_exact_convergence() {
        let target = Angle::from_raw(100);
        let mut current = Angle::ZERO;
        let mut ticks = 0;
        while current != target {
            current = leaky_step(current, target, 8);
            ticks += 1;
            assert!(ticks < 32, "filter failed to converge");
        }
        // Held target: stays put, no oscillation.
        for _ in 0..10 {
            current = leaky_step(current, target, 8);
            assert_eq!(current, target);
        }
    }

    #[test]
    fn test_leaky_step_negative_delta() {
        let target = Angle::from_raw(-3000);
        let mut current = Angle::from_raw(2000);
        for _ in 0..32 {
            current = leaky_step(current, target, 8);
        }
        assert_eq!(current, target);
    }

    #[test]
    fn test_leaky_step_wraps_short_way() {
        // From just below the wrap point to just above it: the wrapping
        // delta is +16, so the filter crosses the seam instead of sweeping
        // the long way around.
        let mut current = Angle::from_raw(32760);
        let target = Angle::from_raw(-32760);
        for _ in 0..8 {
            current = leaky_step(current, target, 8);
        }
        assert_eq!(current, target);
    }

    #[test]
    fn test_pitch_tracks_clamped_z() {
        let filter = filter_with(YawSource::default());
        let mut pose = CameraPose::default();
        // Well out of range: clamps to 1024, pitch target -16384.
        let accel = AccelSample::new(0, -1000, 4000);
        for _ in 0..64 {
            filter.update(&mut pose, accel, None);
        }
        assert_eq!(pose.pitch.raw(), -16384);
    }

    #[test]
    fn test_dead_reckoned_yaw_accumulates_with_tilt() {
        let filter = filter_with(YawSource::DeadReckoned { rate_shift: 4 });
        let mut pose = CameraPose::default();
        // Tilted on the x axis: nonzero roll target drives yaw.
        let tilted = AccelSample::new(700, -700, 0);
        filter.update(&mut pose, tilted, None);
        let after_one = pose.yaw;
        assert_ne!(after_one, Angle::ZERO);
        filter.update(&mut pose, tilted, None);
        assert_ne!(pose.yaw, after_one);
    }

    #[test]
    fn test_dead_reckoned_yaw_still_when_level() {
        let filter = filter_with(YawSource::DeadReckoned { rate_shift: 4 });
        let mut pose = CameraPose::default();
        for _ in 0..20 {
            filter.update(&mut pose, LEVEL, None);
        }
        assert_eq!(pose.yaw, Angle::ZERO);
    }

    #[test]
    fn test_compass_pulls_yaw_in_band() {
        let filter = filter_with(YawSource::CompassGated { portrait_band: 4096 });
        let mut pose = CameraPose::default();
        let heading = Angle::from_raw(8000);
        for _ in 0..64 {
            filter.update(&mut pose, LEVEL, Some(heading));
        }
        assert_eq!(pose.yaw, heading);
    }

    #[test]
    fn test_compass_ignored_outside_band() {
        let filter = filter_with(YawSource::CompassGated { portrait_band: 4096 });
        let mut pose = CameraPose::default();
        // Face-up: pitch target is -16384, far outside the band.
        let face_up = AccelSample::new(0, -100, 1024);
        for _ in 0..10 {
            filter.update(&mut pose, face_up, Some(Angle::from_raw(8000)));
        }
        assert_eq!(pose.yaw, Angle::ZERO);
        assert_ne!(pose.pitch, Angle::ZERO);
    }

    #[test]
    fn test_compass_absent_leaves_yaw() {
        let filter = filter_with(YawSource::CompassGated { portrait_band: 4096 });
        let mut pose = CameraPose::default();
        for _ in 0..10 {
            filter.update(&mut pose, LEVEL, None);
        }
        assert_eq!(pose.yaw, Angle::ZERO);
    }
}
