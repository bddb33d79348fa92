mod app_config;
mod config;

pub mod candidates;
pub mod geodesic;
pub mod kcenter;
pub mod point;

use thiserror::Error;

pub use app_config::{AppConfig, CandidateStrategy};
// Re-exported because `CandidateStrategy::Hex` embeds it.
pub use h3o::Resolution as HexResolution;
pub use config::{load_app_config, load_app_config_from_env};
pub use point::GeodeticPoint;

/// Upper bound on the number of sites a single request may ask for.
pub const MAX_K: u32 = 50;

/// Upper bound on the grid lattice resolution (resolution² lattice points).
pub const MAX_GRID_RESOLUTION: u32 = 1000;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("k must be between 1 and {MAX_K}, got {0}")]
    InvalidK(u32),
    #[error("grid resolution must be between 2 and {MAX_GRID_RESOLUTION}, got {0}")]
    InvalidResolution(u32),
    #[error("boundary geometry rejected by tessellation: {0}")]
    InvalidBoundary(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Check a requested site count against the allowed `[1, MAX_K]` range.
///
/// # Errors
///
/// Returns [`CoreError::InvalidK`] when `k` is zero or exceeds [`MAX_K`].
pub fn validate_k(k: u32) -> Result<usize, CoreError> {
    if k == 0 || k > MAX_K {
        return Err(CoreError::InvalidK(k));
    }
    Ok(k as usize)
}

/// Check a grid lattice resolution against the allowed `[2, MAX_GRID_RESOLUTION]` range.
///
/// # Errors
///
/// Returns [`CoreError::InvalidResolution`] for resolutions that would produce
/// a degenerate lattice or an unbounded amount of work.
pub fn validate_resolution(resolution: u32) -> Result<usize, CoreError> {
    if resolution < 2 || resolution > MAX_GRID_RESOLUTION {
        return Err(CoreError::InvalidResolution(resolution));
    }
    Ok(resolution as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_k_accepts_range_bounds() {
        assert_eq!(validate_k(1).unwrap(), 1);
        assert_eq!(validate_k(MAX_K).unwrap(), MAX_K as usize);
    }

    #[test]
    fn validate_k_rejects_zero_and_excess() {
        assert!(matches!(validate_k(0), Err(CoreError::InvalidK(0))));
        assert!(matches!(
            validate_k(MAX_K + 1),
            Err(CoreError::InvalidK(_))
        ));
    }

    #[test]
    fn validate_resolution_rejects_degenerate_lattice() {
        assert!(matches!(
            validate_resolution(1),
            Err(CoreError::InvalidResolution(1))
        ));
        assert!(matches!(
            validate_resolution(MAX_GRID_RESOLUTION + 1),
            Err(CoreError::InvalidResolution(_))
        ));
        assert_eq!(validate_resolution(100).unwrap(), 100);
    }
}
