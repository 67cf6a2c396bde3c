//! Class Summarizer
//!
//! Builds a catalog figure with one row per class: the first
//! `num_images_per_class` images of each of the first `num_classes` labels.
//! Classes smaller than the row width leave the rest of their row blank.

use std::path::{Path, PathBuf};

use optical_core::{select_per_class, GridLayout, Image, Label, VizResult};
use tracing::debug;

use crate::config::RenderConfig;
use crate::figure::Figure;
use crate::grid::{check_parallel, render_placements, validate_images};

/// Builder for a per-class catalog figure.
#[derive(Debug, Clone)]
pub struct ClassSummarizer {
    num_images_per_class: usize,
    num_classes: usize,
    output_path: Option<PathBuf>,
    config: RenderConfig,
}

impl ClassSummarizer {
    pub fn new(num_images_per_class: usize, num_classes: usize) -> Self {
        Self {
            num_images_per_class,
            num_classes,
            output_path: None,
            config: RenderConfig::default(),
        }
    }

    pub fn output_path(mut self, path: impl AsRef<Path>) -> Self {
        self.output_path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn config(mut self, config: RenderConfig) -> Self {
        self.config = config;
        self
    }

    /// Select per class and render the catalog.
    pub fn summarize<L: Label>(&self, images: &[Image], targets: &[L]) -> VizResult<Figure> {
        check_parallel(images.len(), targets.len())?;
        let groups = select_per_class(targets, self.num_images_per_class, self.num_classes)?;
        validate_images(images)?;
        self.config.validate()?;

        let widest = groups.iter().map(|g| g.len()).max().unwrap_or(0);
        let selected: usize = groups.iter().map(|g| g.len()).sum();
        let layout = GridLayout::explicit(groups.len(), widest, selected)?;
        debug!(
            "Summarizing {} classes, {} images on {}x{} grid",
            groups.len(),
            selected,
            layout.rows,
            layout.cols
        );

        let placements = groups.iter().enumerate().flat_map(|(row, group)| {
            group.indices.iter().enumerate().map(move |(col, &index)| {
                (row * widest + col, index, Some(group.label.to_string()))
            })
        });
        let figure = render_placements(images, layout, placements, &self.config)?;

        if let Some(path) = &self.output_path {
            figure.save(path)?;
        }
        Ok(figure)
    }
}

/// Catalog of up to `num_images_per_class` images for each of the first
/// `num_classes` labels.
pub fn summarize_images<L: Label>(
    images: &[Image],
    targets: &[L],
    num_images_per_class: usize,
    num_classes: usize,
    output_path: Option<&Path>,
) -> VizResult<Figure> {
    let mut summarizer = ClassSummarizer::new(num_images_per_class, num_classes);
    if let Some(path) = output_path {
        summarizer = summarizer.output_path(path);
    }
    summarizer.summarize(images, targets)
}
