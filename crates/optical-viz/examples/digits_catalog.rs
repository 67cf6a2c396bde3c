//! Render a grid, a class catalog and an embedding comparison for a
//! synthetic digits set into `target/optical/`.
//!
//! Usage: cargo run -p optical-viz --example digits_catalog

use std::path::Path;

use ndarray::Array2;
use optical_viz::{
    plot_images, summarize_images, Embedder, EmbeddingComparison, EmbeddingDims, Image, Pca,
    RandomProjection,
};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

const SIDE: usize = 8;

fn digit(class: usize, sample: usize) -> Vec<f32> {
    let mut pixels = vec![0.0f32; SIDE * SIDE];
    for i in 0..SIDE {
        pixels[i * SIDE + class % SIDE] = 16.0;
        pixels[((3 * class) % SIDE) * SIDE + i] = 12.0;
    }
    pixels[(sample * 5) % (SIDE * SIDE)] = 8.0;
    pixels
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .with_target(false)
        .init();

    let out = Path::new("target/optical");
    std::fs::create_dir_all(out)?;

    let n = 300;
    let images = (0..n)
        .map(|i| Image::gray(SIDE, SIDE, digit(i % 10, i)))
        .collect::<Result<Vec<_>, _>>()?;
    let targets: Vec<usize> = (0..n).map(|i| i % 10).collect();

    plot_images(
        &images[..10],
        5,
        Some(&targets[..10]),
        true,
        Some(out.join("digits_grid.png").as_path()),
    )?;
    summarize_images(&images, &targets, 10, 10, Some(out.join("digits_catalog.png").as_path()))?;

    let features = Array2::from_shape_fn((n, SIDE * SIDE), |(i, j)| f64::from(digit(i % 10, i)[j]));
    let pca = Pca::new();
    let projection = RandomProjection::new(42);
    let variants: [&dyn Embedder; 2] = [&pca, &projection];

    for dims in [EmbeddingDims::Two, EmbeddingDims::Three] {
        let comparison = EmbeddingComparison::new(&variants)
            .dims(dims)
            .output_path(out.join(format!("{}d_embedding_comparison.png", dims.count())))
            .run(features.view(), &targets)?;
        comparison.save_variants(out)?;
    }

    info!("Figures written to {}", out.display());
    Ok(())
}
