//! Viewer-side settings: everything the host owns that the core does not.

use std::ops::RangeInclusive;

use sim_core::config::DEFAULT_GRID_SIZE;

pub const GRID_SIZE_RANGE: RangeInclusive<usize> = 10..=50;
pub const LIFESPAN_RANGE: RangeInclusive<u32> = 1..=50;
pub const INTERVAL_MS_RANGE: RangeInclusive<u32> = 50..=1000;
pub const INTERVAL_MS_STEP: f64 = 50.0;

/// Gap in pixels between drawn cells.
pub const CELL_GAP: f32 = 1.0;

/// Height reserved under the board for the legend row.
pub const LEGEND_HEIGHT: f32 = 24.0;

/// Side of one legend swatch in pixels.
pub const SWATCH_SIZE: f32 = 12.0;

/// Host settings that are not step parameters.
///
/// ### Fields
/// - `grid_size` - Side length requested from the slider.
/// - `interval_ms` - Minimum time between automatic steps, in milliseconds.
/// - `show_heatmap` - Color burning cells by age instead of a flat color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewConfig {
    pub grid_size: usize,
    pub interval_ms: u32,
    pub show_heatmap: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            interval_ms: 200,
            show_heatmap: false,
        }
    }
}

impl ViewConfig {
    /// Step interval in seconds, as compared against egui's input time.
    pub fn interval_secs(&self) -> f64 {
        f64::from(self.interval_ms) / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_sit_inside_slider_ranges() {
        let cfg = ViewConfig::default();
        assert!(GRID_SIZE_RANGE.contains(&cfg.grid_size));
        assert!(INTERVAL_MS_RANGE.contains(&cfg.interval_ms));
        assert!(!cfg.show_heatmap);
    }

    #[test]
    fn interval_converts_to_seconds() {
        let cfg = ViewConfig {
            interval_ms: 250,
            ..ViewConfig::default()
        };
        assert_eq!(cfg.interval_secs(), 0.25);
    }
}
