use thiserror::Error;

/// Library-level failures. Geometric outcomes (behind-camera points,
/// off-screen projections, a saturated catalog) are ordinary values, not
/// errors.
#[derive(Error, Debug)]
pub enum SphereError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("overlay vertex index {index} outside catalog (len {len})")]
    OverlayIndex { index: usize, len: usize },
}
