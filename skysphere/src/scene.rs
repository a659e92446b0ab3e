//! The frame driver: per-tick orchestration of the whole pipeline.
//!
//! One `SkyScene` owns every piece of mutable state (pose, zoom, catalog,
//! overlay, framebuffer) and everything runs on the caller's single
//! thread. A tick snapshots the sensors and advances the orientation
//! filter; a render pass rasterizes the horizon, the triangle overlay and
//! the catalog dots in that order. The host schedules the next tick only
//! after rendering completes, so at most one frame is ever in flight.

use crate::camera::{CameraPose, OrientationFilter};
use crate::catalog::{SkyCatalog, SkyPoint};
use crate::config::SceneConfig;
use crate::error::SphereError;
use crate::framebuffer::FrameBuffer;
use crate::horizon::render_horizon;
use crate::overlay::TriangleOverlay;
use crate::projection::{project, ZoomLevel};
use crate::sensors::SensorSource;
use log::{debug, warn};

/// Zoom clamp keeping shift amounts in range.
const ZOOM_MIN: ZoomLevel = -16;
const ZOOM_MAX: ZoomLevel = 24;

/// Numeric readout of the current view, for the host's text box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneReadout {
    /// Right ascension faced, degrees in [0, 360).
    pub ra_deg: i32,
    /// Declination faced, degrees.
    pub dec_deg: i32,
    pub pitch: i16,
    pub roll: i16,
    pub yaw: i16,
    pub zoom: ZoomLevel,
}

#[derive(Debug)]
pub struct SkyScene {
    config: SceneConfig,
    pose: CameraPose,
    filter: OrientationFilter,
    zoom: ZoomLevel,
    catalog: SkyCatalog,
    overlay: TriangleOverlay,
    frame: FrameBuffer,
    dirty: bool,
    dots_drawn: usize,
    overlay_drawn: bool,
}

impl SkyScene {
    pub fn new(config: SceneConfig) -> Result<Self, SphereError> {
        config.validate()?;

        let catalog = SkyCatalog::populated(&config.catalog);
        // A bad overlay binding disables the overlay for the run instead of
        // failing the scene; the rest of the sphere is still useful.
        let overlay = match TriangleOverlay::new([0, 1, 2], &catalog) {
            Ok(overlay) => overlay,
            Err(err) => {
                warn!("overlay disabled: {err}");
                TriangleOverlay::disabled()
            }
        };
        let frame = FrameBuffer::new(config.display, config.palette.sky);
        let filter = OrientationFilter::new(config.filter_divisor, config.yaw_source);

        Ok(Self {
            zoom: config.zoom,
            pose: CameraPose::default(),
            filter,
            catalog,
            overlay,
            frame,
            dirty: true,
            dots_drawn: 0,
            overlay_drawn: false,
            config,
        })
    }

    /// One timer tick: snapshot the sensors, advance the filter, mark the
    /// scene dirty for the next render.
    pub fn tick(&mut self, sensors: &mut dyn SensorSource) {
        let accel = sensors.accel();
        let compass = sensors.compass();
        self.filter.update(&mut self.pose, accel, compass);
        self.dirty = true;
    }

    /// Rasterize the current state: horizon, then overlay, then dots.
    pub fn render(&mut self) -> &FrameBuffer {
        render_horizon(&self.pose, self.zoom, &self.config.palette, &mut self.frame);

        self.overlay_drawn = false;
        if let Some(points) =
            self.overlay
                .resolve(&self.catalog, &self.pose, self.zoom, self.config.display)
        {
            self.frame
                .fill_triangle(points, self.config.palette.overlay_fill);
            self.frame
                .draw_line(points[0], points[1], self.config.palette.overlay_edge);
            self.frame
                .draw_line(points[1], points[2], self.config.palette.overlay_edge);
            self.frame
                .draw_line(points[2], points[0], self.config.palette.overlay_edge);
            self.overlay_drawn = true;
        }

        let size = self.marker_size();
        let mut drawn = 0;
        for point in self.catalog.iter() {
            if let Some(p) = project(*point, &self.pose, self.zoom, self.config.display) {
                self.frame.draw_rect(
                    p.x - size / 2,
                    p.y - size / 2,
                    size,
                    size,
                    self.config.palette.star,
                );
                drawn += 1;
            }
        }
        self.dots_drawn = drawn;
        self.dirty = false;
        debug!("rendered {drawn} dots, overlay {}", self.overlay_drawn);
        &self.frame
    }

    /// Star marker edge length: an eighth of the zoom scale, never less
    /// than a single pixel.
    fn marker_size(&self) -> i32 {
        if self.zoom > 5 {
            1i32 << (self.zoom - 5)
        } else {
            1
        }
    }

    /// Button: increase the perspective scale exponent.
    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom + 1).min(ZOOM_MAX);
    }

    /// Button: decrease the perspective scale exponent.
    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom - 1).max(ZOOM_MIN);
    }

    /// Button: append a catalog point at the direction the camera faces.
    /// Silently a no-op once the catalog saturates.
    pub fn mark_point(&mut self) {
        self.catalog
            .push(SkyPoint::new(-self.pose.yaw, -self.pose.pitch));
    }

    /// Facing direction and pose in display units.
    pub fn readout(&self) -> SceneReadout {
        let yaw = self.pose.yaw.raw() as i32;
        let pitch = self.pose.pitch.raw() as i32;
        SceneReadout {
            ra_deg: ((((yaw >> 9) * -360) >> 7) + 360) % 360,
            dec_deg: ((pitch >> 9) * -360) >> 7,
            pitch: self.pose.pitch.raw(),
            roll: self.pose.roll.raw(),
            yaw: self.pose.yaw.raw(),
            zoom: self.zoom,
        }
    }

    pub fn pose(&self) -> &CameraPose {
        &self.pose
    }

    pub fn zoom(&self) -> ZoomLevel {
        self.zoom
    }

    pub fn catalog(&self) -> &SkyCatalog {
        &self.catalog
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Dots drawn by the most recent render.
    pub fn dots_drawn(&self) -> usize {
        self.dots_drawn
    }

    /// Whether the most recent render drew the overlay.
    pub fn overlay_drawn(&self) -> bool {
        self.overlay_drawn
    }
}
