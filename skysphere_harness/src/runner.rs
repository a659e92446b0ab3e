//! Drive a scene against a motion profile for a fixed number of ticks.

use crate::motion_profiles::MotionProfile;
use log::debug;
use skysphere::{CameraPose, SceneReadout, SkyScene, StaticSensor};

/// Aggregate results from a run.
#[derive(Debug, Clone)]
pub struct RunnerResults {
    /// Ticks executed (one render per tick).
    pub ticks: u64,
    /// Frames in which the triangle overlay was drawn.
    pub overlay_frames: u64,
    /// Dots drawn in the final frame.
    pub final_dots: usize,
    pub final_pose: CameraPose,
    pub final_readout: SceneReadout,
}

/// Run `scene` for `ticks` ticks, rendering after every tick.
///
/// Mirrors the frame driver's real cadence: the sensor snapshot and filter
/// update happen first, the render follows, and only then does the next
/// tick begin. One frame in flight at a time.
pub fn run_scene(
    scene: &mut SkyScene,
    profile: &mut dyn MotionProfile,
    ticks: u64,
) -> RunnerResults {
    let mut overlay_frames = 0;

    for tick in 0..ticks {
        let frame = profile.sample(tick);
        let mut snapshot = StaticSensor {
            accel: frame.accel,
            compass: frame.compass,
        };
        scene.tick(&mut snapshot);
        scene.render();
        if scene.overlay_drawn() {
            overlay_frames += 1;
        }
        debug!(
            "tick {tick}: {} dots, pose {:?}",
            scene.dots_drawn(),
            scene.pose()
        );
    }

    RunnerResults {
        ticks,
        overlay_frames,
        final_dots: scene.dots_drawn(),
        final_pose: *scene.pose(),
        final_readout: scene.readout(),
    }
}
