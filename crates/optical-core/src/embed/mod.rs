//! Embedding strategies
//!
//! An [`Embedder`] turns an `n × d` feature matrix into `n × k` coordinates
//! with `k` given by [`EmbeddingDims`]. Plotting code only depends on the
//! trait, so any manifold-learning backend can be swapped in.
//!
//! Native strategies:
//!
//! - [`Pca`] - principal components through linfa-reduction
//! - [`RandomProjection`] - seeded Gaussian projection
//!
//! # Example
//!
//! ```rust
//! use ndarray::array;
//! use optical_core::embed::{Embedder, EmbeddingDims, Pca};
//!
//! let features = array![[0.0, 0.0, 1.0], [1.0, 1.0, 0.0], [2.0, 2.0, 1.0]];
//! let coords = Pca::new().embed(features.view(), EmbeddingDims::Two).unwrap();
//! assert_eq!(coords.dim(), (3, 2));
//! ```

mod pca;
mod random;

use std::fmt;

use ndarray::{Array2, ArrayView2};

use crate::error::{VizError, VizResult};

pub use pca::Pca;
pub use random::RandomProjection;

/// Output dimensionality of an embedding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmbeddingDims {
    Two,
    Three,
}

impl EmbeddingDims {
    pub fn count(self) -> usize {
        match self {
            EmbeddingDims::Two => 2,
            EmbeddingDims::Three => 3,
        }
    }
}

impl TryFrom<usize> for EmbeddingDims {
    type Error = VizError;

    fn try_from(dims: usize) -> VizResult<Self> {
        match dims {
            2 => Ok(EmbeddingDims::Two),
            3 => Ok(EmbeddingDims::Three),
            other => Err(VizError::invalid_argument(format!(
                "embedding_dims must be 2 or 3, got {}",
                other
            ))),
        }
    }
}

impl fmt::Display for EmbeddingDims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}D", self.count())
    }
}

/// Contract for dimensionality reduction backends.
pub trait Embedder {
    /// Short algorithm name used in titles and file names.
    fn name(&self) -> &str;

    /// Project `features` (one row per sample) to `dims` coordinates per sample.
    fn embed(&self, features: ArrayView2<'_, f64>, dims: EmbeddingDims) -> VizResult<Array2<f64>>;
}

/// Reject empty or non-finite feature matrices.
pub fn validate_features(features: ArrayView2<'_, f64>) -> VizResult<()> {
    if features.nrows() == 0 || features.ncols() == 0 {
        return Err(VizError::invalid_argument(format!(
            "feature matrix is empty ({}x{})",
            features.nrows(),
            features.ncols()
        )));
    }
    if features.iter().any(|v| !v.is_finite()) {
        return Err(VizError::invalid_argument(
            "feature matrix contains non-finite values",
        ));
    }
    Ok(())
}

/// Check a strategy's output has one row per sample and `dims` finite columns.
pub fn check_coordinates(
    algorithm: &str,
    coordinates: &Array2<f64>,
    n_samples: usize,
    dims: EmbeddingDims,
) -> VizResult<()> {
    let expected = (n_samples, dims.count());
    if coordinates.dim() != expected {
        return Err(VizError::Embedding {
            algorithm: algorithm.to_string(),
            message: format!(
                "expected {}x{} coordinates, got {}x{}",
                expected.0,
                expected.1,
                coordinates.nrows(),
                coordinates.ncols()
            ),
        });
    }
    if coordinates.iter().any(|v| !v.is_finite()) {
        return Err(VizError::Embedding {
            algorithm: algorithm.to_string(),
            message: "coordinates contain non-finite values".to_string(),
        });
    }
    Ok(())
}
