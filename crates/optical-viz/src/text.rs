//! Title rasterization through plotters' bitmap backend

use image::RgbImage;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::warn;

/// A title centered on `center` in canvas pixels.
pub(crate) struct TitleSpec<'a> {
    pub text: &'a str,
    pub center: (i32, i32),
}

/// Draw every title onto `canvas` in one backend session.
///
/// Text depends on a system font; when none can be loaded the titles are
/// skipped with a warning and the canvas keeps everything else. Returns the
/// number of titles drawn.
pub(crate) fn draw_titles(canvas: &mut RgbImage, titles: &[TitleSpec<'_>], font_size: u32) -> usize {
    if titles.is_empty() {
        return 0;
    }

    let (width, height) = canvas.dimensions();
    let buffer: &mut [u8] = canvas;
    let root = BitMapBackend::with_buffer(buffer, (width, height)).into_drawing_area();

    let style = ("sans-serif", font_size as f64)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center));

    let mut drawn = 0;
    for title in titles {
        match root.draw_text(title.text, &style, title.center) {
            Ok(()) => drawn += 1,
            Err(e) => {
                warn!("Skipping title '{}': {}", title.text, e);
                break;
            }
        }
    }

    if let Err(e) = root.present() {
        warn!("Failed to flush title layer: {}", e);
    }
    drawn
}
