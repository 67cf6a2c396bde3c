//! Figures and the grid compositor
//!
//! Every renderer produces one pre-rendered [`Tile`] per visible slot and
//! hands them to [`compose`], which lays the tiles out on a fresh canvas,
//! leaves unassigned slots blank, and draws titles. The resulting [`Figure`]
//! owns its canvas; nothing is kept between calls.

use std::path::{Path, PathBuf};

use image::{imageops, ImageFormat, Rgb, RgbImage};
use optical_core::{GridLayout, VizError, VizResult};
use tracing::{debug, info};

use crate::config::{RenderConfig, MAX_CANVAS_PIXELS, MAX_CANVAS_SIDE};
use crate::text::{draw_titles, TitleSpec};

/// One visible slot of a figure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subplot {
    pub slot: usize,
    pub row: usize,
    pub col: usize,
    pub title: Option<String>,
    /// Position of the plotted item in the caller's input.
    pub source_index: usize,
}

/// Pre-rendered content for one slot.
pub(crate) struct Tile {
    pub slot: usize,
    pub source_index: usize,
    pub title: Option<String>,
    pub pixels: RgbImage,
}

/// A rendered grid of subplots.
#[derive(Debug, Clone)]
pub struct Figure {
    layout: GridLayout,
    subplots: Vec<Subplot>,
    canvas: RgbImage,
    missing_titles: usize,
}

impl Figure {
    pub fn layout(&self) -> GridLayout {
        self.layout
    }

    /// Visible subplots in slot order.
    pub fn subplots(&self) -> &[Subplot] {
        &self.subplots
    }

    pub fn titles(&self) -> Vec<Option<&str>> {
        self.subplots.iter().map(|s| s.title.as_deref()).collect()
    }

    /// Input indices in the order they were placed.
    pub fn source_order(&self) -> Vec<usize> {
        self.subplots.iter().map(|s| s.source_index).collect()
    }

    /// Number of blank slots.
    pub fn hidden_slots(&self) -> usize {
        self.layout.capacity() - self.subplots.len()
    }

    /// Titles kept in [`Subplot::title`] that could not be rasterized,
    /// usually because no system font was found.
    pub fn missing_titles(&self) -> usize {
        self.missing_titles
    }

    pub fn canvas(&self) -> &RgbImage {
        &self.canvas
    }

    pub fn into_canvas(self) -> RgbImage {
        self.canvas
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.canvas.dimensions()
    }

    /// Write the canvas to `path`, creating or overwriting the file.
    ///
    /// The format follows the extension; PNG when the extension is missing or
    /// unknown. The parent directory must already exist.
    pub fn save(&self, path: impl AsRef<Path>) -> VizResult<()> {
        let path = path.as_ref();
        let format = ImageFormat::from_path(path).unwrap_or(ImageFormat::Png);
        self.canvas
            .save_with_format(path, format)
            .map_err(|e| save_error(path, e))?;
        info!(
            "Figure {}x{} saved to {}",
            self.canvas.width(),
            self.canvas.height(),
            path.display()
        );
        Ok(())
    }
}

fn save_error(path: &Path, err: image::ImageError) -> VizError {
    match err {
        image::ImageError::IoError(source) => VizError::Io {
            path: PathBuf::from(path),
            source,
        },
        other => VizError::Encode {
            path: PathBuf::from(path),
            message: other.to_string(),
        },
    }
}

/// Cell geometry for a layout.
struct Geometry {
    cell: u32,
    padding: u32,
    title_band: u32,
}

impl Geometry {
    /// Top-left corner of a slot. Only called for slots inside a canvas that
    /// [`Geometry::canvas_size`] accepted, so the sums stay below its sides.
    fn slot_origin(&self, row: usize, col: usize) -> (u32, u32) {
        let x = self.padding + col as u32 * (self.cell + self.padding);
        let y = self.padding + row as u32 * (self.title_band + self.cell + self.padding);
        (x, y)
    }

    fn canvas_size(&self, layout: &GridLayout) -> VizResult<(u32, u32)> {
        let side = |count: usize, step: u32| -> Option<u64> {
            u64::try_from(count)
                .ok()?
                .checked_mul(u64::from(step))?
                .checked_add(u64::from(self.padding))
        };
        let width = side(layout.cols, self.cell + self.padding);
        let height = side(layout.rows, self.title_band + self.cell + self.padding);

        match (width, height) {
            (Some(w), Some(h))
                if w <= u64::from(MAX_CANVAS_SIDE)
                    && h <= u64::from(MAX_CANVAS_SIDE)
                    && w * h <= MAX_CANVAS_PIXELS =>
            {
                Ok((w as u32, h as u32))
            }
            _ => Err(VizError::invalid_argument(format!(
                "a {}x{} grid of {}px cells exceeds the {}px canvas limit",
                layout.rows, layout.cols, self.cell, MAX_CANVAS_SIDE
            ))),
        }
    }
}

/// Lay tiles out on a new canvas.
///
/// `cell` is the side of the square area each tile is centered in. Tiles must
/// target distinct slots inside `layout`.
pub(crate) fn compose(
    layout: GridLayout,
    cell: u32,
    mut tiles: Vec<Tile>,
    config: &RenderConfig,
) -> VizResult<Figure> {
    if tiles.len() != layout.count {
        return Err(VizError::invalid_argument(format!(
            "{} tiles for a layout of {} items",
            tiles.len(),
            layout.count
        )));
    }
    tiles.sort_by_key(|t| t.slot);
    if let Some(pair) = tiles.windows(2).find(|w| w[0].slot == w[1].slot) {
        return Err(VizError::invalid_argument(format!(
            "slot {} assigned twice",
            pair[0].slot
        )));
    }
    if let Some(last) = tiles.last() {
        if last.slot >= layout.capacity() {
            return Err(VizError::invalid_argument(format!(
                "slot {} outside a {}x{} grid",
                last.slot, layout.rows, layout.cols
            )));
        }
    }

    let titled = tiles.iter().any(|t| t.title.is_some());
    let geometry = Geometry {
        cell,
        padding: config.padding,
        title_band: if titled { config.title_height } else { 0 },
    };
    let (width, height) = geometry.canvas_size(&layout)?;
    debug!(
        "Composing {}x{} grid ({} tiles, {} hidden) on {}x{} canvas",
        layout.rows,
        layout.cols,
        tiles.len(),
        layout.hidden(),
        width,
        height
    );

    let mut canvas = RgbImage::from_pixel(width, height, Rgb(config.background));
    let mut subplots = Vec::with_capacity(tiles.len());
    let mut title_centers = Vec::new();

    for tile in tiles {
        let (row, col) = layout.position(tile.slot);
        let (x, y) = geometry.slot_origin(row, col);
        let cell_top = y + geometry.title_band;

        let (tw, th) = tile.pixels.dimensions();
        let offset_x = x + cell.saturating_sub(tw) / 2;
        let offset_y = cell_top + cell.saturating_sub(th) / 2;
        imageops::replace(
            &mut canvas,
            &tile.pixels,
            i64::from(offset_x),
            i64::from(offset_y),
        );

        if tile.title.is_some() {
            let center = (
                (x + cell / 2) as i32,
                (y + geometry.title_band / 2) as i32,
            );
            title_centers.push((subplots.len(), center));
        }

        subplots.push(Subplot {
            slot: tile.slot,
            row,
            col,
            title: tile.title,
            source_index: tile.source_index,
        });
    }

    let specs: Vec<TitleSpec<'_>> = title_centers
        .iter()
        .filter_map(|&(i, center)| {
            subplots[i]
                .title
                .as_deref()
                .map(|text| TitleSpec { text, center })
        })
        .collect();
    let drawn = draw_titles(&mut canvas, &specs, config.font_size);
    let missing_titles = specs.len() - drawn;

    Ok(Figure {
        layout,
        subplots,
        canvas,
        missing_titles,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_tile(slot: usize, color: [u8; 3], title: Option<&str>) -> Tile {
        Tile {
            slot,
            source_index: slot,
            title: title.map(str::to_string),
            pixels: RgbImage::from_pixel(4, 4, Rgb(color)),
        }
    }

    #[test]
    fn test_canvas_size_without_titles() {
        let config = RenderConfig {
            padding: 2,
            ..RenderConfig::default()
        };
        let layout = GridLayout::with_cols(3, 2).unwrap();
        let tiles = (0..3).map(|i| solid_tile(i, [0, 0, 0], None)).collect();
        let figure = compose(layout, 4, tiles, &config).unwrap();

        // 2 + 2 * (4 + 2) = 14 wide, 2 rows high
        assert_eq!(figure.dimensions(), (14, 14));
        assert_eq!(figure.hidden_slots(), 1);
        assert_eq!(figure.missing_titles(), 0);
        assert_eq!(figure.canvas().get_pixel(2, 2), &Rgb([0, 0, 0]));
        // hidden slot (row 1, col 1) stays background
        assert_eq!(figure.canvas().get_pixel(9, 9), &Rgb([255, 255, 255]));
    }

    #[test]
    fn test_title_band_reserved() {
        let config = RenderConfig {
            padding: 0,
            title_height: 10,
            font_size: 6,
            ..RenderConfig::default()
        };
        let layout = GridLayout::with_cols(1, 1).unwrap();
        let figure = compose(layout, 4, vec![solid_tile(0, [9, 9, 9], Some("t"))], &config)
            .unwrap();
        assert_eq!(figure.dimensions(), (4, 14));
        assert_eq!(figure.titles(), vec![Some("t")]);
        assert_eq!(figure.missing_titles(), 0);
        assert_eq!(figure.canvas().get_pixel(0, 13), &Rgb([9, 9, 9]));
    }

    #[test]
    fn test_oversized_grid_rejected() {
        let config = RenderConfig::default();
        let layout = GridLayout::with_cols(1, 30_000_000).unwrap();
        let err = compose(layout, 4, vec![solid_tile(0, [0, 0, 0], None)], &config).unwrap_err();
        assert!(err.is_invalid_argument());

        // 65535 / (4 + 8) leaves room for 5460 columns
        let layout = GridLayout::with_cols(1, 5_460).unwrap();
        let figure = compose(layout, 4, vec![solid_tile(0, [0, 0, 0], None)], &config).unwrap();
        assert_eq!(figure.dimensions(), (8 + 5_460 * 12, 20));
    }

    #[test]
    fn test_duplicate_slot_rejected() {
        let layout = GridLayout::explicit(1, 2, 2).unwrap();
        let tiles = vec![solid_tile(1, [0, 0, 0], None), solid_tile(1, [0, 0, 0], None)];
        assert!(compose(layout, 4, tiles, &RenderConfig::default()).is_err());
    }

    #[test]
    fn test_sparse_slots() {
        let layout = GridLayout::explicit(2, 2, 2).unwrap();
        let tiles = vec![solid_tile(3, [1, 1, 1], None), solid_tile(0, [2, 2, 2], None)];
        let figure = compose(layout, 4, tiles, &RenderConfig::default()).unwrap();
        let slots: Vec<usize> = figure.subplots().iter().map(|s| s.slot).collect();
        assert_eq!(slots, vec![0, 3]);
        assert_eq!(figure.hidden_slots(), 2);
    }

    #[test]
    fn test_save_into_missing_directory_is_io_error() {
        let layout = GridLayout::with_cols(1, 1).unwrap();
        let figure = compose(
            layout,
            4,
            vec![solid_tile(0, [0, 0, 0], None)],
            &RenderConfig::default(),
        )
        .unwrap();
        let dir = tempfile::tempdir().unwrap();
        let err = figure
            .save(dir.path().join("missing").join("figure.png"))
            .unwrap_err();
        assert!(matches!(err, VizError::Io { .. }));
    }
}
