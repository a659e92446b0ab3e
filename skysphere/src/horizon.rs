//! Horizon plane rasterization.
//!
//! Fills the frame with two regions (sky above the horizon, ground below)
//! consistent with the camera pose. The sweep axis is chosen by comparing
//! |cos roll| against |sin roll|: whichever trig value is larger in
//! magnitude becomes the per-pixel divisor, so the slope division can never
//! hit a near-zero denominator. That branch selection, not the sign of the
//! roll alone, is the correctness-critical invariant here, and it keeps the
//! fill continuous as the roll crosses the 45/135 degree boundaries.

use crate::angle::{cos_lookup, sin_lookup, Angle};
use crate::camera::CameraPose;
use crate::config::Palette;
use crate::framebuffer::FrameBuffer;
use crate::projection::{scale_by_zoom, ZoomLevel};

/// Which way the rasterizer sweeps the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepAxis {
    /// Horizon closer to horizontal on screen: walk columns, fill rows.
    Columns,
    /// Horizon closer to vertical: walk rows, fill columns.
    Rows,
}

/// Select the sweep axis for a given roll.
pub fn sweep_axis(roll: Angle) -> SweepAxis {
    if cos_lookup(roll).abs() > sin_lookup(roll).abs() {
        SweepAxis::Columns
    } else {
        SweepAxis::Rows
    }
}

/// Screen offset of the horizon at the display center.
///
/// At pitch = ±quarter turn the cosine vanishes; the offset saturates so
/// the horizon leaves the screen and the frame fills with a single region,
/// which is the geometric limit of looking straight up or down.
fn center_offset(sin_p: i64, cos_p: i64, zoom: ZoomLevel) -> i64 {
    if cos_p == 0 {
        if sin_p >= 0 {
            i32::MAX as i64
        } else {
            i32::MIN as i64
        }
    } else {
        scale_by_zoom(sin_p, zoom) / cos_p
    }
}

/// Rasterize the horizon into the framebuffer.
pub fn render_horizon(pose: &CameraPose, zoom: ZoomLevel, palette: &Palette, fb: &mut FrameBuffer) {
    let cos_r = cos_lookup(pose.roll) as i64;
    let sin_r = sin_lookup(pose.roll) as i64;
    let cos_p = cos_lookup(-pose.pitch) as i64;
    let sin_p = sin_lookup(-pose.pitch) as i64;

    let w = fb.width() as i64;
    let h = fb.height() as i64;
    let center = center_offset(sin_p, cos_p, zoom);
    let pixels = fb.pixels_mut();

    match sweep_axis(pose.roll) {
        SweepAxis::Columns => {
            // cos_r is the larger-magnitude trig value here, never zero.
            let (below, above) = if cos_r > 0 {
                (palette.ground, palette.sky)
            } else {
                (palette.sky, palette.ground)
            };
            for x in 0..w {
                let y_start = center + ((x - w / 2) * sin_r) / cos_r + h / 2;
                for y in 0..h {
                    pixels[[y as usize, x as usize]] = if y > y_start { below } else { above };
                }
            }
        }
        SweepAxis::Rows => {
            let (right, left) = if sin_r < 0 {
                (palette.ground, palette.sky)
            } else {
                (palette.sky, palette.ground)
            };
            for y in 0..h {
                let x_start = center + ((y - h / 2) * cos_r) / sin_r + w / 2;
                for x in 0..w {
                    pixels[[y as usize, x as usize]] = if x > x_start { right } else { left };
                }
            }
        }
    }
}
