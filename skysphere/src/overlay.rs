//! Triangle marker overlay.
//!
//! Three fixed catalog indices re-projected every frame. The draw policy
//! is all-visible: the triangle is rendered only when every vertex
//! projects onto the display. A vertex behind the camera or off screen has
//! no coordinates at all, so partial triangles are never drawn.

use crate::camera::CameraPose;
use crate::catalog::SkyCatalog;
use crate::config::DisplaySize;
use crate::error::SphereError;
use crate::projection::{project, ScreenPoint, ZoomLevel};

#[derive(Debug, Clone)]
pub struct TriangleOverlay {
    indices: [usize; 3],
    enabled: bool,
}

impl TriangleOverlay {
    /// Bind the overlay to three catalog indices.
    ///
    /// Fails if any index is not already populated. The catalog is
    /// append-only, so an index valid here stays valid for the whole run.
    pub fn new(indices: [usize; 3], catalog: &SkyCatalog) -> Result<Self, SphereError> {
        for &index in &indices {
            if index >= catalog.len() {
                return Err(SphereError::OverlayIndex {
                    index,
                    len: catalog.len(),
                });
            }
        }
        Ok(Self {
            indices,
            enabled: true,
        })
    }

    /// An overlay that never draws. Used when construction fails: the
    /// overlay stays off for the rest of the run, it is never retried.
    pub fn disabled() -> Self {
        Self {
            indices: [0; 3],
            enabled: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn indices(&self) -> [usize; 3] {
        self.indices
    }

    /// Re-project the three vertices for this frame.
    ///
    /// `Some` only when the overlay is enabled and all three vertices are
    /// visible.
    pub fn resolve(
        &self,
        catalog: &SkyCatalog,
        pose: &CameraPose,
        zoom: ZoomLevel,
        display: DisplaySize,
    ) -> Option<[ScreenPoint; 3]> {
        if !self.enabled {
            return None;
        }
        let mut points = [ScreenPoint { x: 0, y: 0 }; 3];
        for (slot, &index) in points.iter_mut().zip(&self.indices) {
            *slot = project(catalog.get(index)?, pose, zoom, display)?;
        }
        Some(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angle::Angle;
    use crate::config::CatalogConfig;

    fn catalog() -> SkyCatalog {
        SkyCatalog::populated(&CatalogConfig::default())
    }

    #[test]
    fn test_new_validates_indices() {
        let cat = catalog();
        assert!(TriangleOverlay::new([0, 1, 2], &cat).is_ok());
        let err = TriangleOverlay::new([0, 1, cat.len()], &cat).unwrap_err();
        match err {
            SphereError::OverlayIndex { index, len } => {
                assert_eq!(index, cat.len());
                assert_eq!(len, cat.len());
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn test_disabled_never_resolves() {
        let cat = catalog();
        let overlay = TriangleOverlay::disabled();
        assert!(!overlay.is_enabled());
        let pose = CameraPose::default();
        assert!(overlay
            .resolve(&cat, &pose, 8, DisplaySize::default())
            .is_none());
    }

    #[test]
    fn test_resolves_when_all_vertices_visible() {
        let cat = catalog();
        let overlay = TriangleOverlay::new([0, 1, 2], &cat).unwrap();
        // The seed triangle sits near dec 2048..4096, ra 0..2048; a level
        // pose looking at ra 0 has all of it on screen at zoom 7 (at zoom 8
        // the highest vertex projects above the display).
        let pose = CameraPose::default();
        let points = overlay
            .resolve(&cat, &pose, 7, DisplaySize::default())
            .expect("seed triangle visible from identity pose");
        // Three distinct vertices.
        assert_ne!(points[0], points[1]);
        assert_ne!(points[1], points[2]);
    }

    #[test]
    fn test_any_vertex_hidden_hides_triangle() {
        let cat = catalog();
        let overlay = TriangleOverlay::new([0, 1, 2], &cat).unwrap();
        // Facing the opposite hemisphere: vertices are behind the camera.
        let pose = CameraPose {
            yaw: Angle::HALF_TURN,
            ..CameraPose::default()
        };
        assert!(overlay
            .resolve(&cat, &pose, 8, DisplaySize::default())
            .is_none());
    }
}
