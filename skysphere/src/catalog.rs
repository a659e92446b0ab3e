//! Append-only, capacity-bounded store of sky points.
//!
//! The catalog is populated once at startup with the overlay seed points
//! and a declination/right-ascension grid, then only ever grows (by user
//! "mark" actions) until it saturates. Because it is strictly append-only
//! and saturation is a no-op, an index handed out once stays valid and
//! immutable for the life of the run.

use crate::angle::Angle;
use crate::config::CatalogConfig;
use log::debug;

/// A fixed point on the simulated celestial sphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkyPoint {
    /// Declination, the vertical spherical coordinate.
    pub dec: Angle,
    /// Right ascension, the horizontal spherical coordinate.
    pub ra: Angle,
}

impl SkyPoint {
    pub const fn new(ra: Angle, dec: Angle) -> Self {
        Self { dec, ra }
    }
}

/// Ordered, capacity-bounded sequence of [`SkyPoint`]s.
#[derive(Debug, Clone)]
pub struct SkyCatalog {
    points: Vec<SkyPoint>,
    capacity: usize,
}

impl SkyCatalog {
    /// Create an empty catalog with the given hard capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a point. Saturates silently at capacity: the insert becomes
    /// a no-op and every previously stored point is left untouched.
    pub fn push(&mut self, point: SkyPoint) {
        if self.points.len() >= self.capacity {
            debug!("catalog full ({} points), dropping insert", self.capacity);
            return;
        }
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn get(&self, index: usize) -> Option<SkyPoint> {
        self.points.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SkyPoint> {
        self.points.iter()
    }

    /// Build the startup catalog: three overlay seed points (indices 0..=2)
    /// followed by a full declination/right-ascension grid.
    pub fn populated(config: &CatalogConfig) -> Self {
        let mut catalog = Self::new(config.capacity);

        // Overlay seeds. The overlay references these by index, so they go
        // in first and, the catalog being append-only, stay at 0..=2.
        catalog.push(SkyPoint::new(Angle::from_raw(0), Angle::from_raw(2048)));
        catalog.push(SkyPoint::new(Angle::from_raw(0), Angle::from_raw(4096)));
        catalog.push(SkyPoint::new(Angle::from_raw(2048), Angle::from_raw(2048)));

        let dec_step = config.dec_step as i32;
        let ra_step = config.ra_step as i32;
        let mut dec = -16384i32;
        while dec <= 16384 {
            let mut ra = 0i32;
            while ra < 65536 {
                catalog.push(SkyPoint::new(
                    Angle::from_raw(ra as i16),
                    Angle::from_raw(dec as i16),
                ));
                ra += ra_step;
            }
            dec += dec_step;
        }

        debug!("catalog populated with {} points", catalog.len());
        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(raw: i16) -> SkyPoint {
        SkyPoint::new(Angle::from_raw(raw), Angle::from_raw(raw))
    }

    #[test]
    fn test_push_and_order() {
        let mut catalog = SkyCatalog::new(10);
        for i in 0..5 {
            catalog.push(point(i));
        }
        assert_eq!(catalog.len(), 5);
        for i in 0..5 {
            assert_eq!(catalog.get(i as usize), Some(point(i)));
        }
    }

    #[test]
    fn test_saturating_insert() {
        let mut catalog = SkyCatalog::new(3);
        for i in 0..8 {
            catalog.push(point(i));
        }
        // min(N, capacity), and the last stored slot is never re-written.
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get(2), Some(point(2)));
        assert_eq!(catalog.get(3), None);
    }

    #[test]
    fn test_populated_layout() {
        let catalog = SkyCatalog::populated(&CatalogConfig::default());

        // 3 seeds + 17 declination rows of 32 right-ascension columns.
        assert_eq!(catalog.len(), 3 + 17 * 32);
        assert!(catalog.len() <= catalog.capacity());

        // Reserved overlay seeds at the front.
        assert_eq!(catalog.get(0).unwrap().dec.raw(), 2048);
        assert_eq!(catalog.get(0).unwrap().ra.raw(), 0);
        assert_eq!(catalog.get(2).unwrap().ra.raw(), 2048);

        // Grid starts at the bottom of the declination range.
        assert_eq!(catalog.get(3).unwrap().dec.raw(), -16384);
    }

    #[test]
    fn test_capacity_bounds_population() {
        let config = CatalogConfig {
            capacity: 50,
            ..CatalogConfig::default()
        };
        let catalog = SkyCatalog::populated(&config);
        assert_eq!(catalog.len(), 50);
    }
}
