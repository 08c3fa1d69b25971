//! Pad color mapping
//!
//! Each row is shifted by `row_offset` scale degrees from the row below, and
//! the whole surface by `start_offset`, so a pad's color is
//!
//! ```text
//! template[(col - 1 + row * row_offset + start_offset) mod len]
//! ```
//!
//! Column 1 is the leftmost play column, so it is re-based to index 0.

use crate::config::{LayoutConfig, ScaleTemplate};
use crate::types::{DeviceVariant, LinnColor, PadCoordinate};

/// Maps pad coordinates to template colors
///
/// Pure and immutable once constructed.
#[derive(Debug, Clone)]
pub struct PadColorMapper {
    template: ScaleTemplate,
    start_offset: i32,
    row_offset: i32,
}

impl PadColorMapper {
    pub fn new(template: ScaleTemplate, start_offset: i32, row_offset: i32) -> Self {
        Self {
            template,
            start_offset,
            row_offset,
        }
    }

    pub fn from_config(config: &LayoutConfig) -> Self {
        Self::new(config.template.clone(), config.start_offset, config.row_offset)
    }

    pub fn template(&self) -> &ScaleTemplate {
        &self.template
    }

    pub fn row_offset(&self) -> i32 {
        self.row_offset
    }

    /// Template index for a pad, always in `0..template.len()`
    ///
    /// Computed in i64 with Euclidean remainder so negative offsets or
    /// columns still wrap into range.
    pub fn scale_index(&self, col: i32, row: i32) -> usize {
        let len = self.template.len() as i64;
        let row_degree = row as i64 * self.row_offset as i64 + self.start_offset as i64;
        (col as i64 - 1 + row_degree).rem_euclid(len) as usize
    }

    /// Color for the pad at (`col`, `row`)
    ///
    /// Total over all integers; coordinates outside the hardware range are
    /// computed the same way.
    pub fn color_for(&self, col: i32, row: i32) -> LinnColor {
        // scale_index is reduced modulo len, and the template is never empty
        self.template.colors()[self.scale_index(col, row)]
    }

    /// Every play pad of `variant` with its color, in transmission order
    /// (rows bottom to top, columns left to right within a row)
    pub fn pads(
        &self,
        variant: DeviceVariant,
    ) -> impl Iterator<Item = (PadCoordinate, LinnColor)> + '_ {
        variant.rows().flat_map(move |row| {
            variant.columns().map(move |column| {
                let color = self.color_for(column as i32, row as i32);
                (PadCoordinate::new(column, row), color)
            })
        })
    }
}

/// Render the layout as text, top row first, one glyph per pad
pub fn render_grid(mapper: &PadColorMapper, variant: DeviceVariant) -> Vec<String> {
    variant
        .rows()
        .rev()
        .map(|row| {
            variant
                .columns()
                .map(|col| mapper.color_for(col as i32, row as i32).glyph())
                .collect::<String>()
        })
        .collect()
}
