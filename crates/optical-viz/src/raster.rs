//! Pixel conversion from [`Image`] values to RGB tiles

use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use optical_core::{Image, ValueScale};

/// Convert an image to 8-bit RGB.
///
/// Single-channel images are min-max normalized. Color images are read on
/// their inferred [`ValueScale`]; alpha is composited over `background`.
/// Non-finite values become 0.
pub(crate) fn to_rgb(image: &Image, background: [u8; 3]) -> RgbImage {
    let view = image.view3();
    let (height, width, channels) = view.dim();

    if channels == 1 {
        let (lo, hi) = image.finite_range().unwrap_or((0.0, 0.0));
        let span = hi - lo;
        return RgbImage::from_fn(width as u32, height as u32, |x, y| {
            let v = view[[y as usize, x as usize, 0]];
            let g = if v.is_finite() && span > 0.0 {
                to_byte((v - lo) / span, ValueScale::Unit)
            } else {
                0
            };
            Rgb([g, g, g])
        });
    }

    let scale = image.value_scale();
    RgbImage::from_fn(width as u32, height as u32, |x, y| {
        let (x, y) = (x as usize, y as usize);
        let rgb = [
            to_byte(view[[y, x, 0]], scale),
            to_byte(view[[y, x, 1]], scale),
            to_byte(view[[y, x, 2]], scale),
        ];
        if channels == 4 {
            let alpha = f32::from(to_byte(view[[y, x, 3]], scale)) / 255.0;
            let mut out = [0u8; 3];
            for i in 0..3 {
                let blended =
                    alpha * f32::from(rgb[i]) + (1.0 - alpha) * f32::from(background[i]);
                out[i] = blended.round().clamp(0.0, 255.0) as u8;
            }
            Rgb(out)
        } else {
            Rgb(rgb)
        }
    })
}

fn to_byte(v: f32, scale: ValueScale) -> u8 {
    if !v.is_finite() {
        return 0;
    }
    let scaled = match scale {
        ValueScale::Unit => v * 255.0,
        ValueScale::Byte => v,
    };
    scaled.round().clamp(0.0, 255.0) as u8
}

/// Resize `tile` to fit a `size × size` cell, keeping its aspect ratio.
pub(crate) fn fit_to_cell(tile: &RgbImage, size: u32) -> RgbImage {
    let (w, h) = tile.dimensions();
    let ratio = f64::from(size) / f64::from(w.max(h));
    let tw = ((f64::from(w) * ratio).round() as u32).clamp(1, size);
    let th = ((f64::from(h) * ratio).round() as u32).clamp(1, size);
    imageops::resize(tile, tw, th, FilterType::Nearest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gray_is_min_max_normalized() {
        let image = Image::gray(1, 3, vec![2.0, 4.0, 6.0]).unwrap();
        let rgb = to_rgb(&image, [255, 255, 255]);
        assert_eq!(rgb.get_pixel(0, 0), &Rgb([0, 0, 0]));
        assert_eq!(rgb.get_pixel(1, 0), &Rgb([128, 128, 128]));
        assert_eq!(rgb.get_pixel(2, 0), &Rgb([255, 255, 255]));
    }

    #[test]
    fn test_constant_gray_renders_black() {
        let image = Image::gray(2, 2, vec![7.0; 4]).unwrap();
        let rgb = to_rgb(&image, [255, 255, 255]);
        assert!(rgb.pixels().all(|p| p == &Rgb([0, 0, 0])));
    }

    #[test]
    fn test_unit_scale_color() {
        let image = Image::stacked(1, 1, 3, vec![1.0, 0.0, 0.5]).unwrap();
        let rgb = to_rgb(&image, [0, 0, 0]);
        assert_eq!(rgb.get_pixel(0, 0), &Rgb([255, 0, 128]));
    }

    #[test]
    fn test_byte_scale_color_is_clipped() {
        let image = Image::stacked(1, 1, 3, vec![300.0, 10.0, -5.0]).unwrap();
        let rgb = to_rgb(&image, [0, 0, 0]);
        assert_eq!(rgb.get_pixel(0, 0), &Rgb([255, 10, 0]));
    }

    #[test]
    fn test_transparent_pixel_shows_background() {
        let image = Image::stacked(1, 1, 4, vec![1.0, 0.0, 0.0, 0.0]).unwrap();
        let rgb = to_rgb(&image, [10, 20, 30]);
        assert_eq!(rgb.get_pixel(0, 0), &Rgb([10, 20, 30]));
    }

    #[test]
    fn test_fit_keeps_aspect() {
        let tile = RgbImage::new(8, 4);
        let fitted = fit_to_cell(&tile, 64);
        assert_eq!(fitted.dimensions(), (64, 32));

        let tall = RgbImage::new(3, 300);
        assert_eq!(fit_to_cell(&tall, 100).dimensions(), (1, 100));
    }
}
