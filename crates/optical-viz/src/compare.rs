//! Embedding Comparison
//!
//! Runs several [`Embedder`] variants over the same feature matrix and lays
//! the resulting scatter plots out on a near-square grid. Each variant also
//! keeps a standalone figure that can be written separately.

use std::path::{Path, PathBuf};
use std::time::Instant;

use ndarray::{Array2, ArrayView2};
use optical_core::embed::{check_coordinates, validate_features};
use optical_core::{Embedder, EmbeddingDims, GridLayout, Label, VizError, VizResult};
use tracing::{debug, info};

use crate::config::RenderConfig;
use crate::figure::{compose, Figure, Tile};
use crate::scatter::{color_indices, scatter_tile};

/// Output of one embedding variant.
#[derive(Debug, Clone)]
pub struct VariantEmbedding {
    pub name: String,
    pub coordinates: Array2<f64>,
    /// Standalone scatter figure for this variant.
    pub figure: Figure,
    pub embed_ms: u64,
}

/// Combined figure plus every variant's result.
#[derive(Debug, Clone)]
pub struct Comparison {
    pub dims: EmbeddingDims,
    pub figure: Figure,
    pub variants: Vec<VariantEmbedding>,
}

impl Comparison {
    /// Write each variant's figure into `dir` as `<dims>d_<name>_embedding.png`.
    pub fn save_variants(&self, dir: impl AsRef<Path>) -> VizResult<Vec<PathBuf>> {
        let dir = dir.as_ref();
        let mut written = Vec::with_capacity(self.variants.len());
        for variant in &self.variants {
            let path = dir.join(format!(
                "{}d_{}_embedding.png",
                self.dims.count(),
                file_stem(&variant.name)
            ));
            variant.figure.save(&path)?;
            written.push(path);
        }
        Ok(written)
    }
}

fn file_stem(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

/// Builder running a set of embedding variants.
pub struct EmbeddingComparison<'a> {
    variants: &'a [&'a dyn Embedder],
    dims: EmbeddingDims,
    output_path: Option<PathBuf>,
    config: RenderConfig,
}

impl<'a> EmbeddingComparison<'a> {
    pub fn new(variants: &'a [&'a dyn Embedder]) -> Self {
        Self {
            variants,
            dims: EmbeddingDims::Two,
            output_path: None,
            config: RenderConfig::default(),
        }
    }

    pub fn dims(mut self, dims: EmbeddingDims) -> Self {
        self.dims = dims;
        self
    }

    pub fn output_path(mut self, path: impl AsRef<Path>) -> Self {
        self.output_path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn config(mut self, config: RenderConfig) -> Self {
        self.config = config;
        self
    }

    /// Embed `features` with every variant and render the comparison.
    pub fn run<L: Label>(&self, features: ArrayView2<'_, f64>, labels: &[L]) -> VizResult<Comparison> {
        validate_features(features)?;
        if features.nrows() != labels.len() {
            return Err(VizError::invalid_argument(format!(
                "features and labels differ in length ({} vs {})",
                features.nrows(),
                labels.len()
            )));
        }
        if self.variants.is_empty() {
            return Err(VizError::invalid_argument(
                "at least one embedding variant is required",
            ));
        }
        self.config.validate()?;

        let layout = GridLayout::square(self.variants.len())?;
        let colors = color_indices(labels);
        let size = self.config.scatter_size;

        let mut tiles = Vec::with_capacity(self.variants.len());
        let mut results = Vec::with_capacity(self.variants.len());
        for (slot, variant) in self.variants.iter().enumerate() {
            let name = variant.name().to_string();
            let start = Instant::now();
            let coordinates = variant.embed(features, self.dims)?;
            let embed_ms = start.elapsed().as_millis() as u64;
            check_coordinates(&name, &coordinates, features.nrows(), self.dims)?;
            debug!(
                "{} produced {} {} points in {}ms",
                name,
                coordinates.nrows(),
                self.dims,
                embed_ms
            );

            let title = format!("{} ({})", name, self.dims);
            let pixels = scatter_tile(coordinates.view(), &colors, size, &self.config);
            let figure =
                single_tile_figure(pixels.clone(), Some(title.clone()), size, &self.config)?;

            tiles.push(Tile {
                slot,
                source_index: slot,
                title: Some(title),
                pixels,
            });
            results.push(VariantEmbedding {
                name,
                coordinates,
                figure,
                embed_ms,
            });
        }

        let figure = compose(layout, size, tiles, &self.config)?;
        info!(
            "Compared {} embedding variants on {}x{} grid",
            results.len(),
            layout.rows,
            layout.cols
        );
        if let Some(path) = &self.output_path {
            figure.save(path)?;
        }

        Ok(Comparison {
            dims: self.dims,
            figure,
            variants: results,
        })
    }
}

fn single_tile_figure(
    pixels: image::RgbImage,
    title: Option<String>,
    size: u32,
    config: &RenderConfig,
) -> VizResult<Figure> {
    let tile = Tile {
        slot: 0,
        source_index: 0,
        title,
        pixels,
    };
    compose(GridLayout::with_cols(1, 1)?, size, vec![tile], config)
}

/// Embed `features` with each variant and arrange the scatter plots in one figure.
pub fn embed_and_compare<L: Label>(
    features: ArrayView2<'_, f64>,
    labels: &[L],
    embedding_dims: usize,
    variants: &[&dyn Embedder],
    output_path: Option<&Path>,
) -> VizResult<Figure> {
    let dims = EmbeddingDims::try_from(embedding_dims)?;
    let mut comparison = EmbeddingComparison::new(variants).dims(dims);
    if let Some(path) = output_path {
        comparison = comparison.output_path(path);
    }
    Ok(comparison.run(features, labels)?.figure)
}

/// Builder for a standalone scatter plot of precomputed 2D or 3D coordinates.
pub struct ScatterPlot<'a, L> {
    coordinates: ArrayView2<'a, f64>,
    labels: &'a [L],
    title: Option<String>,
    output_path: Option<PathBuf>,
    config: RenderConfig,
}

impl<'a, L: Label> ScatterPlot<'a, L> {
    pub fn new(coordinates: ArrayView2<'a, f64>, labels: &'a [L]) -> Self {
        Self {
            coordinates,
            labels,
            title: None,
            output_path: None,
            config: RenderConfig::default(),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn output_path(mut self, path: impl AsRef<Path>) -> Self {
        self.output_path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn config(mut self, config: RenderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn render(&self) -> VizResult<Figure> {
        let coordinates = self.coordinates;
        validate_features(coordinates)?;
        EmbeddingDims::try_from(coordinates.ncols())?;
        if coordinates.nrows() != self.labels.len() {
            return Err(VizError::invalid_argument(format!(
                "coordinates and labels differ in length ({} vs {})",
                coordinates.nrows(),
                self.labels.len()
            )));
        }
        self.config.validate()?;

        let size = self.config.scatter_size;
        let colors = color_indices(self.labels);
        let pixels = scatter_tile(coordinates, &colors, size, &self.config);
        let figure = single_tile_figure(pixels, self.title.clone(), size, &self.config)?;

        if let Some(path) = &self.output_path {
            figure.save(path)?;
        }
        Ok(figure)
    }
}

/// Scatter plot of precomputed 2D or 3D coordinates with default styling.
pub fn plot_embedding<'a, L: Label>(
    coordinates: ArrayView2<'a, f64>,
    labels: &'a [L],
    title: &str,
    output_path: Option<&Path>,
) -> VizResult<Figure> {
    let mut plot = ScatterPlot::new(coordinates, labels).title(title);
    if let Some(path) = output_path {
        plot = plot.output_path(path);
    }
    plot.render()
}
