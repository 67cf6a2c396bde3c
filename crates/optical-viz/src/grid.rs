//! Image Grid Renderer

use std::path::{Path, PathBuf};

use optical_core::{stable_order, GridLayout, Image, Label, VizError, VizResult};
use tracing::debug;

use crate::config::RenderConfig;
use crate::figure::{compose, Figure, Tile};
use crate::raster::{fit_to_cell, to_rgb};

/// Builder for an image grid figure.
///
/// Titles are drawn whenever targets are given; `ordered` only changes the
/// placement order.
///
/// # Example
///
/// ```rust,no_run
/// use optical_core::Image;
/// use optical_viz::ImageGrid;
///
/// let images: Vec<Image> = (0..6)
///     .map(|i| Image::gray(8, 8, vec![i as f32; 64]).unwrap())
///     .collect();
/// let labels = ["odd", "even", "odd", "even", "odd", "even"];
///
/// let figure = ImageGrid::new(&images, 3)
///     .targets(&labels)
///     .ordered(true)
///     .output_path("grid.png")
///     .render()
///     .unwrap();
/// assert_eq!(figure.layout().rows, 2);
/// ```
#[derive(Debug, Clone)]
pub struct ImageGrid<'a, L = String> {
    images: &'a [Image],
    cols: usize,
    targets: Option<&'a [L]>,
    ordered: bool,
    output_path: Option<PathBuf>,
    config: RenderConfig,
}

impl<'a> ImageGrid<'a> {
    pub fn new(images: &'a [Image], cols: usize) -> Self {
        Self {
            images,
            cols,
            targets: None,
            ordered: false,
            output_path: None,
            config: RenderConfig::default(),
        }
    }
}

impl<'a, L: Label> ImageGrid<'a, L> {
    /// Attach one label per image.
    pub fn targets<M: Label>(self, targets: &'a [M]) -> ImageGrid<'a, M> {
        ImageGrid {
            images: self.images,
            cols: self.cols,
            targets: Some(targets),
            ordered: self.ordered,
            output_path: self.output_path,
            config: self.config,
        }
    }

    /// Group images sharing a label, in first-seen label order.
    pub fn ordered(mut self, ordered: bool) -> Self {
        self.ordered = ordered;
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

    /// Validate the inputs, then render and optionally save the grid.
    pub fn render(&self) -> VizResult<Figure> {
        validate_images(self.images)?;
        if let Some(targets) = self.targets {
            check_parallel(self.images.len(), targets.len())?;
        }
        self.config.validate()?;
        let layout = GridLayout::with_cols(self.images.len(), self.cols)?;

        let order: Vec<usize> = match (self.targets, self.ordered) {
            (Some(targets), true) => stable_order(targets),
            _ => (0..self.images.len()).collect(),
        };
        debug!(
            "Rendering {} images in {}x{} grid (ordered: {})",
            self.images.len(),
            layout.rows,
            layout.cols,
            self.ordered && self.targets.is_some()
        );

        let placements = order
            .into_iter()
            .enumerate()
            .map(|(slot, index)| (slot, index, self.targets.map(|t| t[index].to_string())));
        let figure = render_placements(self.images, layout, placements, &self.config)?;

        if let Some(path) = &self.output_path {
            figure.save(path)?;
        }
        Ok(figure)
    }
}

/// Render `(slot, image index, title)` placements onto `layout`.
pub(crate) fn render_placements(
    images: &[Image],
    layout: GridLayout,
    placements: impl IntoIterator<Item = (usize, usize, Option<String>)>,
    config: &RenderConfig,
) -> VizResult<Figure> {
    let tiles = placements
        .into_iter()
        .map(|(slot, index, title)| {
            let rgb = to_rgb(&images[index], config.background);
            Tile {
                slot,
                source_index: index,
                title,
                pixels: fit_to_cell(&rgb, config.cell_size),
            }
        })
        .collect();
    compose(layout, config.cell_size, tiles, config)
}

/// Reject an empty collection or any image that cannot be rendered.
pub(crate) fn validate_images(images: &[Image]) -> VizResult<()> {
    if images.is_empty() {
        return Err(VizError::invalid_argument("images list cannot be empty"));
    }
    for (index, image) in images.iter().enumerate() {
        image.validate().map_err(|e| match e {
            VizError::InvalidArgument(message) => {
                VizError::invalid_argument(format!("image {}: {}", index, message))
            }
            other => other,
        })?;
    }
    Ok(())
}

/// Parallel sequences must have equal length.
pub(crate) fn check_parallel(images: usize, targets: usize) -> VizResult<()> {
    if images != targets {
        return Err(VizError::invalid_argument(format!(
            "images and targets differ in length ({} vs {})",
            images, targets
        )));
    }
    Ok(())
}

/// Plot `images` on a grid with `cols` columns.
///
/// See [`ImageGrid`] for the builder form.
pub fn plot_images<L: Label>(
    images: &[Image],
    cols: usize,
    targets: Option<&[L]>,
    ordered_plot: bool,
    output_path: Option<&Path>,
) -> VizResult<Figure> {
    let mut grid = ImageGrid::new(images, cols).ordered(ordered_plot);
    if let Some(path) = output_path {
        grid = grid.output_path(path);
    }
    match targets {
        Some(targets) => grid.targets(targets).render(),
        None => grid.render(),
    }
}
