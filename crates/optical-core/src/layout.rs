//! Grid layout arithmetic

use crate::error::{VizError, VizResult};

/// Rows and columns for `count` items, filled row by row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pub rows: usize,
    pub cols: usize,
    pub count: usize,
}

impl GridLayout {
    /// Layout with a fixed column count; `rows = ceil(count / cols)`.
    pub fn with_cols(count: usize, cols: usize) -> VizResult<Self> {
        if count == 0 {
            return Err(VizError::invalid_argument("grid needs at least one item"));
        }
        if cols == 0 {
            return Err(VizError::invalid_argument("cols must be at least 1"));
        }
        Ok(Self {
            rows: count.div_ceil(cols),
            cols,
            count,
        })
    }

    /// Near-square layout: `cols = ceil(sqrt(count))`, rows as in [`GridLayout::with_cols`].
    pub fn square(count: usize) -> VizResult<Self> {
        let mut cols = 1;
        while cols * cols < count {
            cols += 1;
        }
        Self::with_cols(count, cols)
    }

    /// Layout with explicit dimensions, used when slots are assigned sparsely.
    pub fn explicit(rows: usize, cols: usize, count: usize) -> VizResult<Self> {
        if rows == 0 || cols == 0 {
            return Err(VizError::invalid_argument(format!(
                "grid dimensions must be positive, got {}x{}",
                rows, cols
            )));
        }
        if count == 0 || count > rows * cols {
            return Err(VizError::invalid_argument(format!(
                "{} items do not fit a {}x{} grid",
                count, rows, cols
            )));
        }
        Ok(Self { rows, cols, count })
    }

    /// Total number of slots.
    pub fn capacity(&self) -> usize {
        self.rows * self.cols
    }

    /// Slots left blank.
    pub fn hidden(&self) -> usize {
        self.capacity() - self.count
    }

    /// `(row, col)` of a slot index.
    pub fn position(&self, slot: usize) -> (usize, usize) {
        (slot / self.cols, slot % self.cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ceiling_rows() {
        for count in 1..=40 {
            for cols in 1..=9 {
                let layout = GridLayout::with_cols(count, cols).unwrap();
                assert_eq!(layout.rows, (count + cols - 1) / cols);
                assert!(layout.capacity() >= count);
                assert!(layout.capacity() - count < cols);
                assert_eq!(layout.hidden(), layout.rows * cols - count);
            }
        }
    }

    #[test]
    fn test_exact_fit_has_no_hidden_slots() {
        let layout = GridLayout::with_cols(10, 5).unwrap();
        assert_eq!((layout.rows, layout.cols), (2, 5));
        assert_eq!(layout.hidden(), 0);
    }

    #[test]
    fn test_zero_cols_rejected() {
        assert!(GridLayout::with_cols(3, 0).unwrap_err().is_invalid_argument());
        assert!(GridLayout::with_cols(0, 3).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_square() {
        let cases = [(1, 1, 1), (2, 1, 2), (4, 2, 2), (5, 2, 3), (7, 3, 3), (10, 3, 4)];
        for (count, rows, cols) in cases {
            let layout = GridLayout::square(count).unwrap();
            assert_eq!((layout.rows, layout.cols), (rows, cols), "count {}", count);
        }
    }

    #[test]
    fn test_explicit() {
        let layout = GridLayout::explicit(3, 4, 7).unwrap();
        assert_eq!(layout.hidden(), 5);
        assert_eq!(layout.position(6), (1, 2));
        assert!(GridLayout::explicit(2, 2, 5).is_err());
    }
}
