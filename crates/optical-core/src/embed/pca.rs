//! Principal component analysis backed by linfa-reduction

use linfa::traits::{Fit, Predict};
use linfa::DatasetBase;
use ndarray::{Array2, ArrayView2, Axis};

use super::{check_coordinates, validate_features, EmbeddingDims, Embedder};
use crate::error::{VizError, VizResult};

const NAME: &str = "pca";

/// Projects centered features onto their top principal components.
///
/// Each component's sign is chosen so its largest-magnitude coordinate is
/// positive, which keeps plots stable across runs.
#[derive(Debug, Clone, Default)]
pub struct Pca;

impl Pca {
    pub fn new() -> Self {
        Self
    }
}

fn embedding_error(message: impl Into<String>) -> VizError {
    VizError::Embedding {
        algorithm: NAME.to_string(),
        message: message.into(),
    }
}

impl Embedder for Pca {
    fn name(&self) -> &str {
        NAME
    }

    fn embed(&self, features: ArrayView2<'_, f64>, dims: EmbeddingDims) -> VizResult<Array2<f64>> {
        validate_features(features)?;
        let (n, d) = features.dim();
        let k = dims.count();

        if n < 2 {
            return Err(embedding_error(format!("need at least 2 samples, got {}", n)));
        }
        if d < k {
            return Err(embedding_error(format!(
                "cannot extract {} components from {} features",
                k, d
            )));
        }

        let records = features.to_owned();
        let dataset = DatasetBase::from(records.clone());
        let model = linfa_reduction::Pca::params(k)
            .fit(&dataset)
            .map_err(|e| embedding_error(e.to_string()))?;
        let mut coordinates: Array2<f64> = model.predict(&records);

        orient_components(&mut coordinates);
        check_coordinates(NAME, &coordinates, n, dims)?;
        Ok(coordinates)
    }
}

/// Flip each column so its largest-magnitude entry is positive.
fn orient_components(coordinates: &mut Array2<f64>) {
    for mut column in coordinates.axis_iter_mut(Axis(1)) {
        let pivot = column
            .iter()
            .copied()
            .fold(0.0f64, |acc, x| if x.abs() > acc.abs() { x } else { acc });
        if pivot < 0.0 {
            column.mapv_inplace(|x| -x);
        }
    }
}
