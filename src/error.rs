//! Error types for grid setup.

use thiserror::Error;

/// Errors raised when a grid or extractor is set up with inconsistent sizes.
///
/// Extraction itself never fails: every bound is checked once at setup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContourError {
    /// Resolution must cover at least one cell.
    #[error("Resolution must be at least 1")]
    ZeroResolution,

    /// Grid has no samples along some axis.
    #[error("Grid has no samples along axis {axis}")]
    EmptyGrid {
        /// Axis index (0 = x, 1 = y, 2 = z).
        axis: usize,
    },

    /// Grid samples along an axis don't match `resolution + 1`.
    #[error("Grid axis {axis} has {actual} samples, expected {expected} (resolution + 1)")]
    DimensionMismatch {
        /// Axis index (0 = x, 1 = y, 2 = z).
        axis: usize,
        /// Samples required by the resolution.
        expected: usize,
        /// Samples actually present.
        actual: usize,
    },

    /// Flat sample buffer length doesn't match the grid dimensions.
    #[error("Sample buffer holds {actual} values, expected {expected}")]
    BufferLength {
        /// Product of the grid dimensions.
        expected: usize,
        /// Length of the buffer passed in.
        actual: usize,
    },

    /// Sample count for the requested size doesn't fit in `usize`.
    #[error("Grid sample count overflows usize")]
    SampleOverflow,
}

/// Result type for contouring setup.
pub type ContourResult<T> = std::result::Result<T, ContourError>;

/// Samples along one axis of a lattice with `resolution` cells.
pub(crate) fn samples_per_axis(resolution: usize) -> ContourResult<usize> {
    if resolution == 0 {
        return Err(ContourError::ZeroResolution);
    }
    resolution.checked_add(1).ok_or(ContourError::SampleOverflow)
}

/// Total sample count of a lattice with the given per-axis dimensions.
pub(crate) fn sample_count(dims: &[usize]) -> ContourResult<usize> {
    dims.iter()
        .try_fold(1usize, |acc, &n| acc.checked_mul(n))
        .ok_or(ContourError::SampleOverflow)
}

/// Checks that every axis of `dims` holds exactly `resolution + 1` samples.
pub(crate) fn check_dims(resolution: usize, dims: &[usize]) -> ContourResult<()> {
    let expected = samples_per_axis(resolution)?;

    for (axis, &actual) in dims.iter().enumerate() {
        if actual != expected {
            return Err(ContourError::DimensionMismatch {
                axis,
                expected,
                actual,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ContourError::ZeroResolution;
        assert_eq!(format!("{err}"), "Resolution must be at least 1");

        let err = ContourError::DimensionMismatch {
            axis: 2,
            expected: 9,
            actual: 8,
        };
        let msg = format!("{err}");
        assert!(msg.contains("axis 2"));
        assert!(msg.contains("expected 9"));
    }

    #[test]
    fn test_check_dims() {
        assert!(check_dims(4, &[5, 5]).is_ok());
        assert!(check_dims(4, &[5, 5, 5]).is_ok());
        assert_eq!(check_dims(0, &[1, 1]), Err(ContourError::ZeroResolution));
        assert_eq!(
            check_dims(4, &[5, 4]),
            Err(ContourError::DimensionMismatch {
                axis: 1,
                expected: 5,
                actual: 4
            })
        );
    }

    #[test]
    fn test_oversized_resolution() {
        assert_eq!(samples_per_axis(usize::MAX), Err(ContourError::SampleOverflow));
        assert_eq!(check_dims(usize::MAX, &[0, 0]), Err(ContourError::SampleOverflow));
        assert_eq!(sample_count(&[3, 4, 5]), Ok(60));
        assert_eq!(sample_count(&[usize::MAX, 2]), Err(ContourError::SampleOverflow));
    }
}
