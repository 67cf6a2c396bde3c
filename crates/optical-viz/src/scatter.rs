//! Scatter tiles for 2D and 3D coordinates

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_hollow_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;
use ndarray::ArrayView2;
use optical_core::{partition_by_label, Label};

use crate::config::RenderConfig;

/// Ten-color categorical palette, cycled when there are more classes.
pub(crate) const PALETTE: [[u8; 3]; 10] = [
    [31, 119, 180],
    [255, 127, 14],
    [44, 160, 44],
    [214, 39, 40],
    [148, 103, 189],
    [140, 86, 75],
    [227, 119, 194],
    [127, 127, 127],
    [188, 189, 34],
    [23, 190, 207],
];

const FRAME: Rgb<u8> = Rgb([200, 200, 200]);
const MARGIN: u32 = 12;

/// Fixed camera for 3D plots, in radians.
const YAW: f64 = -0.6;
const PITCH: f64 = 0.45;

/// Palette index per point: labels take colors in first-seen order.
pub(crate) fn color_indices<L: Label>(labels: &[L]) -> Vec<usize> {
    let mut colors = vec![0; labels.len()];
    for (group_index, group) in partition_by_label(labels).iter().enumerate() {
        for &i in &group.indices {
            colors[i] = group_index % PALETTE.len();
        }
    }
    colors
}

/// Draw `coordinates` (2 or 3 columns) as a square scatter tile of side `size`.
pub(crate) fn scatter_tile(
    coordinates: ArrayView2<'_, f64>,
    colors: &[usize],
    size: u32,
    config: &RenderConfig,
) -> RgbImage {
    let mut tile = RgbImage::from_pixel(size, size, Rgb(config.background));
    if coordinates.ncols() == 3 {
        draw_3d(&mut tile, coordinates, colors, config.point_radius);
    } else {
        draw_2d(&mut tile, coordinates, colors, config.point_radius);
    }
    tile
}

/// Map each column of `coordinates` onto `[-1, 1]`; constant columns map to 0.
fn normalized_columns(coordinates: ArrayView2<'_, f64>) -> Vec<Vec<f64>> {
    coordinates
        .columns()
        .into_iter()
        .map(|column| {
            let lo = column.iter().copied().fold(f64::INFINITY, f64::min);
            let hi = column.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let range = hi - lo;
            column
                .iter()
                .map(|&v| if range > 0.0 { 2.0 * (v - lo) / range - 1.0 } else { 0.0 })
                .collect()
        })
        .collect()
}

fn draw_2d(tile: &mut RgbImage, coordinates: ArrayView2<'_, f64>, colors: &[usize], radius: u32) {
    let size = tile.width();
    let inner = size.saturating_sub(2 * MARGIN).max(1);
    draw_hollow_rect_mut(tile, Rect::at(MARGIN as i32, MARGIN as i32).of_size(inner, inner), FRAME);

    let columns = normalized_columns(coordinates);
    let half = f64::from(inner) / 2.0;
    let center = f64::from(MARGIN) + half;
    for (i, &color) in colors.iter().enumerate() {
        let x = center + columns[0][i] * half;
        let y = center - columns[1][i] * half;
        draw_filled_circle_mut(tile, (x as i32, y as i32), radius as i32, Rgb(PALETTE[color]));
    }
}

/// Orthographic projection: `(screen_x, screen_up, depth)`.
fn project(x: f64, y: f64, z: f64) -> (f64, f64, f64) {
    let (sy, cy) = YAW.sin_cos();
    let (sp, cp) = PITCH.sin_cos();
    let rx = x * cy - y * sy;
    let ry = x * sy + y * cy;
    (rx, ry * sp + z * cp, ry * cp - z * sp)
}

fn draw_3d(tile: &mut RgbImage, coordinates: ArrayView2<'_, f64>, colors: &[usize], radius: u32) {
    let size = tile.width();
    let half = f64::from(size) / 2.0;
    // the unit cube's projection never exceeds sqrt(3)
    let scale = (half - f64::from(MARGIN)).max(1.0) / 3f64.sqrt();
    let to_screen = |p: (f64, f64, f64)| (half + p.0 * scale, half - p.1 * scale);

    let corners: Vec<(f64, f64, f64)> = (0..8)
        .map(|bits| {
            let pick = |bit: u32| if bits & (1 << bit) == 0 { -1.0 } else { 1.0 };
            (pick(0), pick(1), pick(2))
        })
        .collect();
    for a in 0..8usize {
        for bit in 0..3 {
            let b = a | (1 << bit);
            if b != a {
                let (ax, ay) = to_screen(project(corners[a].0, corners[a].1, corners[a].2));
                let (bx, by) = to_screen(project(corners[b].0, corners[b].1, corners[b].2));
                draw_line_segment_mut(tile, (ax as f32, ay as f32), (bx as f32, by as f32), FRAME);
            }
        }
    }

    let columns = normalized_columns(coordinates);
    let mut points: Vec<(f64, f64, f64, usize)> = colors
        .iter()
        .enumerate()
        .map(|(i, &color)| {
            let p = project(columns[0][i], columns[1][i], columns[2][i]);
            let (sx, sy) = to_screen(p);
            (sx, sy, p.2, color)
        })
        .collect();
    // far points first so near ones paint over them
    points.sort_by(|a, b| b.2.partial_cmp(&a.2).unwrap_or(std::cmp::Ordering::Equal));

    for (sx, sy, _, color) in points {
        draw_filled_circle_mut(tile, (sx as i32, sy as i32), radius as i32, Rgb(PALETTE[color]));
    }
}
