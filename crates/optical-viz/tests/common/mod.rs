//! Shared fixtures: a synthetic 8x8 digit-like dataset and tracing setup

#![allow(dead_code)]

use ndarray::Array2;
use optical_viz::Image;

pub const SIDE: usize = 8;

/// Install a test subscriber once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Intensities on the 0..=16 scale of the classic digits set.
///
/// Class `k` lights column `k % 8` and row `(3 * k) % 8`; the sample index
/// shifts a single extra pixel so images within a class differ.
fn digit_pixels(class: usize, sample: usize) -> Vec<f32> {
    let mut pixels = vec![0.0f32; SIDE * SIDE];
    let col = class % SIDE;
    let row = (3 * class) % SIDE;
    for i in 0..SIDE {
        pixels[i * SIDE + col] = 16.0;
        pixels[row * SIDE + i] = 12.0;
    }
    pixels[(sample * 5) % (SIDE * SIDE)] = 8.0;
    pixels
}

/// `n` images cycling through `classes` labels 0, 1, 2, ...
pub fn digits(n: usize, classes: usize) -> (Vec<Image>, Vec<u8>) {
    let images = (0..n)
        .map(|i| Image::gray(SIDE, SIDE, digit_pixels(i % classes, i)).expect("8x8 digit"))
        .collect();
    let targets = (0..n).map(|i| (i % classes) as u8).collect();
    (images, targets)
}

/// Flattened pixels, one row per image, for embedding tests.
pub fn digit_features(n: usize, classes: usize) -> (Array2<f64>, Vec<u8>) {
    let features = Array2::from_shape_fn((n, SIDE * SIDE), |(i, j)| {
        f64::from(digit_pixels(i % classes, i)[j])
    });
    let targets = (0..n).map(|i| (i % classes) as u8).collect();
    (features, targets)
}

/// Ten random-looking RGB images in `[0, 1]`, reproducible.
pub fn color_images(n: usize, side: usize) -> Vec<Image> {
    (0..n)
        .map(|k| {
            let values = (0..side * side * 3)
                .map(|j| (((j * 7919 + k * 104729) % 1000) as f32) / 999.0)
                .collect();
            Image::stacked(side, side, 3, values).expect("rgb image")
        })
        .collect()
}

pub fn class_targets(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("Class_{}", i % 3)).collect()
}
