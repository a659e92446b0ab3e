//! Scene configuration.

use crate::camera::YawSource;
use crate::error::SphereError;
use serde::{Deserialize, Serialize};

/// Display pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySize {
    pub width: i32,
    pub height: i32,
}

impl Default for DisplaySize {
    fn default() -> Self {
        Self {
            width: 144,
            height: 168,
        }
    }
}

/// Palette indices written into the framebuffer. Values follow the
/// reference hardware's 2-bit-per-channel color encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub sky: u8,
    pub ground: u8,
    pub star: u8,
    pub overlay_fill: u8,
    pub overlay_edge: u8,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            sky: 0b1100_0011,
            ground: 0b1100_0100,
            star: 0b1111_1111,
            overlay_fill: 0b1100_1100,
            overlay_edge: 0b1111_0000,
        }
    }
}

/// Catalog capacity and startup grid spacing (raw angle units).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub capacity: usize,
    pub dec_step: i16,
    pub ra_step: i16,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            capacity: 5000,
            dec_step: 2048,
            ra_step: 2048,
        }
    }
}

/// Complete scene configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub display: DisplaySize,
    pub palette: Palette,
    pub catalog: CatalogConfig,
    /// Initial power-of-two perspective scale exponent.
    pub zoom: i8,
    /// Leaky filter divisor N in `next = current + delta/N + delta%N`.
    pub filter_divisor: i16,
    pub yaw_source: YawSource,
    /// Tick period of the frame driver, milliseconds.
    pub tick_period_ms: u64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            display: DisplaySize::default(),
            palette: Palette::default(),
            catalog: CatalogConfig::default(),
            zoom: 8,
            filter_divisor: 8,
            yaw_source: YawSource::default(),
            tick_period_ms: 50,
        }
    }
}

impl SceneConfig {
    pub fn validate(&self) -> Result<(), SphereError> {
        if self.display.width <= 0 || self.display.height <= 0 {
            return Err(SphereError::Config(format!(
                "display must be positive, got {}x{}",
                self.display.width, self.display.height
            )));
        }
        if self.filter_divisor <= 0 {
            return Err(SphereError::Config(format!(
                "filter divisor must be positive, got {}",
                self.filter_divisor
            )));
        }
        if self.catalog.dec_step <= 0 || self.catalog.ra_step <= 0 {
            return Err(SphereError::Config("grid steps must be positive".into()));
        }
        if self.catalog.capacity < 3 {
            return Err(SphereError::Config(format!(
                "catalog capacity {} cannot hold the overlay seeds",
                self.catalog.capacity
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SceneConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_display() {
        let mut config = SceneConfig::default();
        config.display.width = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_divisor() {
        let config = SceneConfig {
            filter_divisor: 0,
            ..SceneConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_tiny_catalog() {
        let mut config = SceneConfig::default();
        config.catalog.capacity = 2;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = SceneConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: SceneConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.zoom, config.zoom);
        assert_eq!(back.display, config.display);
        assert_eq!(back.yaw_source, config.yaw_source);
    }
}
