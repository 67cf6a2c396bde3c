//! Render configuration

use optical_core::{VizError, VizResult};
use serde::{Deserialize, Serialize};

/// Largest width or height of a composed canvas.
pub const MAX_CANVAS_SIDE: u32 = 65_535;

/// Largest pixel count of a composed canvas.
pub const MAX_CANVAS_PIXELS: u64 = 1 << 28;

/// Largest cell, padding or title band accepted by [`RenderConfig::validate`].
pub const MAX_CELL_SIDE: u32 = 4_096;

/// Pixel geometry and styling shared by every figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Side of the square cell an image is fitted into.
    #[serde(default = "default_cell_size")]
    pub cell_size: u32,
    /// Side of the square cell a scatter plot is drawn into.
    #[serde(default = "default_scatter_size")]
    pub scatter_size: u32,
    /// Gap around and between cells.
    #[serde(default = "default_padding")]
    pub padding: u32,
    /// Height of the band above each cell reserved for its title.
    #[serde(default = "default_title_height")]
    pub title_height: u32,
    #[serde(default = "default_font_size")]
    pub font_size: u32,
    #[serde(default = "default_background")]
    pub background: [u8; 3],
    #[serde(default = "default_point_radius")]
    pub point_radius: u32,
}

fn default_cell_size() -> u32 {
    160
}
fn default_scatter_size() -> u32 {
    360
}
fn default_padding() -> u32 {
    8
}
fn default_title_height() -> u32 {
    22
}
fn default_font_size() -> u32 {
    16
}
fn default_background() -> [u8; 3] {
    [255, 255, 255]
}
fn default_point_radius() -> u32 {
    3
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            cell_size: default_cell_size(),
            scatter_size: default_scatter_size(),
            padding: default_padding(),
            title_height: default_title_height(),
            font_size: default_font_size(),
            background: default_background(),
            point_radius: default_point_radius(),
        }
    }
}

impl RenderConfig {
    /// Parse a JSON object; missing fields take their defaults.
    pub fn from_json(json: &str) -> VizResult<Self> {
        let config: RenderConfig = serde_json::from_str(json)
            .map_err(|e| VizError::invalid_argument(format!("invalid render config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> VizResult<()> {
        if self.cell_size == 0 || self.scatter_size == 0 {
            return Err(VizError::invalid_argument("cell sizes must be positive"));
        }
        let largest = [
            ("cell_size", self.cell_size),
            ("scatter_size", self.scatter_size),
            ("padding", self.padding),
            ("title_height", self.title_height),
            ("font_size", self.font_size),
            ("point_radius", self.point_radius),
        ]
        .into_iter()
        .find(|&(_, value)| value > MAX_CELL_SIDE);
        if let Some((field, value)) = largest {
            return Err(VizError::invalid_argument(format!(
                "{} of {} exceeds {}",
                field, value, MAX_CELL_SIDE
            )));
        }
        if self.font_size == 0 {
            return Err(VizError::invalid_argument("font_size must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_json_is_default() {
        let config = RenderConfig::from_json("{}").unwrap();
        assert_eq!(config, RenderConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = RenderConfig::from_json(r#"{"cell_size": 64, "background": [0, 0, 0]}"#)
            .unwrap();
        assert_eq!(config.cell_size, 64);
        assert_eq!(config.background, [0, 0, 0]);
        assert_eq!(config.padding, 8);
    }

    #[test]
    fn test_zero_cell_rejected() {
        let err = RenderConfig::from_json(r#"{"cell_size": 0}"#).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_oversized_cells_rejected() {
        for json in [
            r#"{"cell_size": 4294967295}"#,
            r#"{"scatter_size": 100000}"#,
            r#"{"padding": 5000}"#,
        ] {
            let err = RenderConfig::from_json(json).unwrap_err();
            assert!(err.is_invalid_argument(), "{}", json);
        }
        let largest = RenderConfig {
            cell_size: MAX_CELL_SIDE,
            ..RenderConfig::default()
        };
        assert!(largest.validate().is_ok());
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = RenderConfig::from_json("{cell_size").unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_serde_roundtrip_keeps_fields() {
        let config = RenderConfig {
            point_radius: 5,
            ..RenderConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"point_radius\":5"));
    }
}
