//! Seeded Gaussian random projection

use ndarray::{Array2, ArrayView2};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

use super::{check_coordinates, validate_features, EmbeddingDims, Embedder};
use crate::error::{VizError, VizResult};

const NAME: &str = "random_projection";

/// Multiplies features by a `d × k` matrix with entries drawn from `N(0, 1/k)`.
#[derive(Debug, Clone)]
pub struct RandomProjection {
    seed: u64,
}

impl RandomProjection {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for RandomProjection {
    fn default() -> Self {
        Self::new(42)
    }
}

impl Embedder for RandomProjection {
    fn name(&self) -> &str {
        NAME
    }

    fn embed(&self, features: ArrayView2<'_, f64>, dims: EmbeddingDims) -> VizResult<Array2<f64>> {
        validate_features(features)?;
        let k = dims.count();

        let normal = Normal::new(0.0, (1.0 / k as f64).sqrt()).map_err(|e| VizError::Embedding {
            algorithm: NAME.to_string(),
            message: e.to_string(),
        })?;
        let mut rng = StdRng::seed_from_u64(self.seed);
        let projection = Array2::from_shape_fn((features.ncols(), k), |_| normal.sample(&mut rng));

        let coordinates = features.dot(&projection);
        check_coordinates(NAME, &coordinates, features.nrows(), dims)?;
        Ok(coordinates)
    }
}
