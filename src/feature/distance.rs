//! Distance calculation between word embeddings.

use crate::error::{Result, SpellError};

/// Verify that a vector has the dimensionality an index was built for.
pub fn check_dimensions(expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(SpellError::invalid_argument(format!(
            "embedding has {actual} dimensions, index expects {expected}"
        )));
    }
    Ok(())
}

/// Squared Euclidean (L2) distance.
///
/// Both slices must have the same length; the index checks this on insertion.
pub fn squared_euclidean(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y).powi(2)).sum()
}

/// Euclidean (L2) distance.
pub fn euclidean(a: &[f32], b: &[f32]) -> f32 {
    squared_euclidean(a, b).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_euclidean() {
        let a = [0.0, 0.0, 0.0];
        let b = [3.0, 4.0, 0.0];

        assert!((euclidean(&a, &b) - 5.0).abs() < 1e-6);
        assert!((squared_euclidean(&a, &b) - 25.0).abs() < 1e-6);
        assert_eq!(euclidean(&b, &b), 0.0);
    }

    #[test]
    fn test_check_dimensions() {
        assert!(check_dimensions(5, 5).is_ok());

        let err = check_dimensions(5, 3).unwrap_err();
        assert!(matches!(err, SpellError::InvalidArgument(_)));
    }
}
