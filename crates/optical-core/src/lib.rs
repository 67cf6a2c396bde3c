//! Optical Core
//!
//! Rendering-free building blocks for dataset visualization: image values,
//! grid layout arithmetic, label grouping, and embedding strategies. The
//! `optical-viz` crate turns these into figures.
//!
//! # Example
//!
//! ```rust
//! use optical_core::{stable_order, GridLayout};
//!
//! let layout = GridLayout::with_cols(7, 3).unwrap();
//! assert_eq!((layout.rows, layout.hidden()), (3, 2));
//!
//! let order = stable_order(&["b", "a", "b", "a"]);
//! assert_eq!(order, vec![0, 2, 1, 3]);
//! ```

pub mod embed;
pub mod error;
pub mod group;
pub mod image;
pub mod layout;

// Re-export main types at crate root
pub use embed::{Embedder, EmbeddingDims, Pca, RandomProjection};
pub use error::{VizError, VizResult};
pub use group::{partition_by_label, select_per_class, stable_order, Label, LabelGroup};
pub use image::{Image, ValueScale};
pub use layout::GridLayout;
