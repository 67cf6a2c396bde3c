//! Image values
//!
//! An [`Image`] is an owned pixel array: either a 2D grayscale
//! plane or an `H × W × C` stack with 1, 3 or 4 channels. Images carry no
//! metadata; labels travel in a parallel slice.

use ndarray::{Array2, Array3, ArrayView3, Axis};

use crate::error::{VizError, VizResult};

/// Channel counts accepted for stacked images (gray, RGB, RGBA).
pub const SUPPORTED_CHANNELS: &[usize] = &[1, 3, 4];

/// Intensity scale inferred from an image's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueScale {
    /// Every finite value lies in `[0, 1]`.
    Unit,
    /// Values are read on a `0..=255` scale and clipped.
    Byte,
}

/// A single image to be placed on a grid.
#[derive(Debug, Clone, PartialEq)]
pub enum Image {
    /// `H × W` grayscale intensities.
    Gray(Array2<f32>),
    /// `H × W × C` intensities with `C` in [`SUPPORTED_CHANNELS`].
    Stacked(Array3<f32>),
}

impl Image {
    /// Build a grayscale image from row-major values.
    pub fn gray(height: usize, width: usize, values: Vec<f32>) -> VizResult<Self> {
        let array = Array2::from_shape_vec((height, width), values).map_err(|e| {
            VizError::invalid_argument(format!("gray image {}x{}: {}", height, width, e))
        })?;
        Ok(Image::Gray(array))
    }

    /// Build a stacked image from row-major, channel-last values.
    pub fn stacked(
        height: usize,
        width: usize,
        channels: usize,
        values: Vec<f32>,
    ) -> VizResult<Self> {
        let array = Array3::from_shape_vec((height, width, channels), values).map_err(|e| {
            VizError::invalid_argument(format!(
                "image {}x{}x{}: {}",
                height, width, channels, e
            ))
        })?;
        Ok(Image::Stacked(array))
    }

    pub fn height(&self) -> usize {
        match self {
            Image::Gray(a) => a.nrows(),
            Image::Stacked(a) => a.len_of(Axis(0)),
        }
    }

    pub fn width(&self) -> usize {
        match self {
            Image::Gray(a) => a.ncols(),
            Image::Stacked(a) => a.len_of(Axis(1)),
        }
    }

    /// Number of channels; grayscale planes report 1.
    pub fn channels(&self) -> usize {
        match self {
            Image::Gray(_) => 1,
            Image::Stacked(a) => a.len_of(Axis(2)),
        }
    }

    /// Check the shape is renderable.
    pub fn validate(&self) -> VizResult<()> {
        if self.height() == 0 || self.width() == 0 {
            return Err(VizError::invalid_argument(format!(
                "image has an empty axis ({}x{})",
                self.height(),
                self.width()
            )));
        }
        let channels = self.channels();
        if !SUPPORTED_CHANNELS.contains(&channels) {
            return Err(VizError::invalid_argument(format!(
                "unsupported channel count {}, expected one of {:?}",
                channels, SUPPORTED_CHANNELS
            )));
        }
        Ok(())
    }

    /// Channel-last view of the pixels; grayscale planes gain a unit channel axis.
    pub fn view3(&self) -> ArrayView3<'_, f32> {
        match self {
            Image::Gray(a) => a.view().insert_axis(Axis(2)),
            Image::Stacked(a) => a.view(),
        }
    }

    /// Infer the intensity scale from the finite values.
    pub fn value_scale(&self) -> ValueScale {
        let unit = self
            .view3()
            .iter()
            .filter(|v| v.is_finite())
            .all(|&v| (0.0..=1.0).contains(&v));
        if unit {
            ValueScale::Unit
        } else {
            ValueScale::Byte
        }
    }

    /// Minimum and maximum finite value, `None` when no value is finite.
    pub fn finite_range(&self) -> Option<(f32, f32)> {
        self.view3()
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

impl From<Array2<f32>> for Image {
    fn from(array: Array2<f32>) -> Self {
        Image::Gray(array)
    }
}

impl From<Array3<f32>> for Image {
    fn from(array: Array3<f32>) -> Self {
        Image::Stacked(array)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gray_dimensions() {
        let image = Image::gray(2, 3, vec![0.0; 6]).unwrap();
        assert_eq!(image.height(), 2);
        assert_eq!(image.width(), 3);
        assert_eq!(image.channels(), 1);
        assert_eq!(image.view3().shape(), &[2, 3, 1]);
        assert!(image.validate().is_ok());
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let err = Image::gray(2, 3, vec![0.0; 5]).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_unsupported_channels() {
        let image = Image::stacked(2, 2, 2, vec![0.0; 8]).unwrap();
        assert!(image.validate().unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_empty_axis() {
        let image = Image::from(Array2::<f32>::zeros((0, 4)));
        assert!(image.validate().unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_value_scale() {
        let unit = Image::gray(1, 2, vec![0.0, 1.0]).unwrap();
        assert_eq!(unit.value_scale(), ValueScale::Unit);

        let byte = Image::gray(1, 2, vec![0.0, 16.0]).unwrap();
        assert_eq!(byte.value_scale(), ValueScale::Byte);

        let with_nan = Image::gray(1, 2, vec![f32::NAN, 0.5]).unwrap();
        assert_eq!(with_nan.value_scale(), ValueScale::Unit);
    }

    #[test]
    fn test_finite_range() {
        let image = Image::gray(1, 3, vec![3.0, f32::INFINITY, -1.0]).unwrap();
        assert_eq!(image.finite_range(), Some((-1.0, 3.0)));

        let none = Image::gray(1, 1, vec![f32::NAN]).unwrap();
        assert_eq!(none.finite_range(), None);
    }
}
