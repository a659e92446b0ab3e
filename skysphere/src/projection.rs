//! Fixed-point projection from the celestial sphere to screen pixels.
//!
//! Spherical coordinates are rotated into the camera frame (yaw on the
//! sphere, then pitch, then roll), perspective-divided by the rotated depth
//! and translated to the display center. Every intermediate product is
//! arithmetically right-shifted by 8 to keep fixed-point magnitudes
//! bounded; all division truncates, so coordinates carry a consistent
//! floor bias near zero crossings.

use crate::angle::{cos_lookup, sin_lookup, Angle};
use crate::camera::CameraPose;
use crate::catalog::SkyPoint;
use crate::config::DisplaySize;

/// Integer pixel coordinates of a successfully projected point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

/// Power-of-two perspective scale exponent.
pub type ZoomLevel = i8;

/// Shift left by `zoom` bits; negative zoom shifts right.
pub(crate) fn scale_by_zoom(value: i64, zoom: ZoomLevel) -> i64 {
    if zoom >= 0 {
        value << zoom
    } else {
        value >> (-(zoom as i32))
    }
}

/// Project a sky point through the camera pose onto the display.
///
/// Returns `None` for points behind the camera (rotated depth <= 0, the
/// only hard rejection in the pipeline) and for projections landing
/// outside the display rectangle. Callers can draw any returned point
/// without re-checking bounds.
pub fn project(
    point: SkyPoint,
    pose: &CameraPose,
    zoom: ZoomLevel,
    display: DisplaySize,
) -> Option<ScreenPoint> {
    let ra = point.ra + pose.yaw;

    // Sphere direction; the half-turn offset folds the declination sine
    // into the camera's vertical sign convention.
    let y = sin_lookup(point.dec + Angle::HALF_TURN) >> 8;
    let cos_dec = cos_lookup(point.dec) >> 8;
    let z1 = (cos_dec * (cos_lookup(ra) >> 8)) >> 8;

    let cos_p = cos_lookup(pose.pitch) >> 8;
    let sin_p = sin_lookup(pose.pitch) >> 8;

    let z = y * sin_p + z1 * cos_p;
    if z <= 0 {
        return None; // behind the camera
    }

    let y = (y * cos_p - z1 * sin_p) >> 8;
    let x = (cos_dec * (sin_lookup(ra) >> 8)) >> 8;

    let cos_r = cos_lookup(pose.roll) >> 8;
    let sin_r = sin_lookup(pose.roll) >> 8;

    let z = z as i64;
    let sx = scale_by_zoom((x * cos_r - y * sin_r) as i64, zoom) / z + (display.width / 2) as i64;
    let sy = scale_by_zoom((x * sin_r + y * cos_r) as i64, zoom) / z + (display.height / 2) as i64;

    if sx < 0 || sx >= display.width as i64 || sy < 0 || sy >= display.height as i64 {
        return None;
    }

    Some(ScreenPoint {
        x: sx as i32,
        y: sy as i32,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sky(ra: i16, dec: i16) -> SkyPoint {
        SkyPoint::new(Angle::from_raw(ra), Angle::from_raw(dec))
    }

    fn display() -> DisplaySize {
        DisplaySize::default() // 144x168
    }

    #[test]
    fn test_forward_point_hits_center() {
        let pose = CameraPose::default();
        for zoom in [0i8, 4, 8, 12] {
            let p = project(sky(0, 0), &pose, zoom, display()).unwrap();
            assert_eq!((p.x, p.y), (72, 84), "zoom {zoom}");
        }
    }

    #[test]
    fn test_behind_camera_rejected() {
        let pose = CameraPose::default();
        // Directly behind: half a turn away in right ascension.
        assert_eq!(project(sky(i16::MIN, 0), &pose, 8, display()), None);
        // And anywhere on the back hemisphere.
        for ra in [-30000i16, -20000, 20000, 30000] {
            assert_eq!(project(sky(ra, 0), &pose, 8, display()), None, "ra {ra}");
        }
    }

    #[test]
    fn test_yaw_recenters_point() {
        // A point off to the side comes back to center when yaw cancels
        // its right ascension.
        let pose = CameraPose {
            yaw: Angle::from_raw(-4096),
            ..CameraPose::default()
        };
        let p = project(sky(4096, 0), &pose, 8, display()).unwrap();
        assert_eq!((p.x, p.y), (72, 84));
    }

    #[test]
    fn test_off_screen_is_not_visible() {
        let pose = CameraPose::default();
        // In front of the camera but far off-axis at high zoom: the
        // projection lands outside the display rectangle.
        assert_eq!(project(sky(12000, 0), &pose, 12, display()), None);
    }

    #[test]
    fn test_small_offset_lands_off_center() {
        let pose = CameraPose::default();
        let center = project(sky(0, 0), &pose, 8, display()).unwrap();
        let right = project(sky(1024, 0), &pose, 8, display()).unwrap();
        assert!(right.x > center.x);
        assert_eq!(right.y, center.y);

        let up = project(sky(0, 1024), &pose, 8, display()).unwrap();
        assert_eq!(up.x, center.x);
        assert_ne!(up.y, center.y);
    }

    #[test]
    fn test_zoom_scales_offsets() {
        let pose = CameraPose::default();
        let at8 = project(sky(1024, 0), &pose, 8, display()).unwrap();
        let at9 = project(sky(1024, 0), &pose, 9, display()).unwrap();
        let off8 = at8.x - 72;
        let off9 = at9.x - 72;
        // Doubling the zoom exponent roughly doubles the offset
        // (truncating division keeps it within a pixel).
        assert!((off9 - 2 * off8).abs() <= 1, "off8={off8} off9={off9}");
    }

    #[test]
    fn test_negative_zoom_shrinks_toward_center() {
        let pose = CameraPose::default();
        let p = project(sky(8192, 0), &pose, -2, display()).unwrap();
        assert!((p.x - 72).abs() <= 1);
    }

    #[test]
    fn test_roll_quarter_turn_swaps_axes() {
        // Quarter-turn roll maps a horizontal offset onto the vertical axis.
        let pose = CameraPose {
            roll: Angle::QUARTER_TURN,
            ..CameraPose::default()
        };
        let p = project(sky(1024, 0), &pose, 8, display()).unwrap();
        assert_eq!(p.x, 72);
        assert!(p.y > 84);
    }
}
