//! Optical Visualization
//!
//! Quick exploratory figures for labeled image datasets:
//!
//! - **Image grids** - [`plot_images`] / [`ImageGrid`] place images on a
//!   `rows × cols` grid, optionally titled and grouped by label
//! - **Class catalogs** - [`summarize_images`] / [`ClassSummarizer`] show a few
//!   samples of each class, one row per class
//! - **Embedding comparisons** - [`embed_and_compare`] / [`EmbeddingComparison`]
//!   scatter the output of several [`Embedder`]s side by side
//!
//! Every call returns a [`Figure`] that owns its canvas. Passing an output
//! path also writes the figure; the parent directory must exist.
//!
//! # Example
//!
//! ```rust,no_run
//! use optical_viz::{plot_images, summarize_images, Image};
//! use std::path::Path;
//!
//! let images: Vec<Image> = (0..10)
//!     .map(|i| Image::gray(8, 8, vec![i as f32; 64]).unwrap())
//!     .collect();
//! let targets: Vec<String> = (0..10).map(|i| format!("Class_{}", i % 3)).collect();
//!
//! let grid = plot_images(&images, 5, Some(targets.as_slice()), true, None).unwrap();
//! assert_eq!(grid.hidden_slots(), 0);
//!
//! let catalog = summarize_images(
//!     &images,
//!     &targets,
//!     2,
//!     3,
//!     Some(Path::new("catalog.png")),
//! )
//! .unwrap();
//! assert_eq!(catalog.layout().rows, 3);
//! ```

pub mod compare;
pub mod config;
pub mod figure;
pub mod grid;
pub mod summary;

mod raster;
mod scatter;
mod text;

pub use compare::{
    embed_and_compare, plot_embedding, Comparison, EmbeddingComparison, ScatterPlot,
    VariantEmbedding,
};
pub use config::RenderConfig;
pub use figure::{Figure, Subplot};
pub use grid::{plot_images, ImageGrid};
pub use summary::{summarize_images, ClassSummarizer};

// Core types callers need alongside the renderers
pub use optical_core::{
    Embedder, EmbeddingDims, GridLayout, Image, Label, Pca, RandomProjection, VizError,
    VizResult,
};
