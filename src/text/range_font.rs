//! A synthetic font covering configured Unicode ranges.
//!
//! Every covered rune is drawn as a solid box, which makes layouts easy to
//! predict. Used by the `textface` binary and by tests in place of a real
//! font backend.

use std::collections::HashMap;

use ahash::RandomState;
use serde::Deserialize;

use super::fixed::{Fixed, FixedPoint, FixedRect};
use super::path::Path;
use super::traits::{FontMetrics, GlyphSource, RasterError, RasterRequest, Rasterizer};
use super::types::{GlyphBuffer, RasterizedGlyph};

/// Inclusive range of Unicode scalar values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct UnicodeRange {
    pub start: u32,
    pub end: u32,
}

impl UnicodeRange {
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, rune: char) -> bool {
        (self.start..=self.end).contains(&(rune as u32))
    }
}

pub const DEFAULT_ADVANCE_RATIO: f64 = 0.6;

/// Box-glyph font over a set of Unicode ranges.
#[derive(Debug, Clone)]
pub struct RangeFont {
    size_px: f64,
    advance_ratio: f64,
    ranges: Vec<UnicodeRange>,
    kerning: HashMap<(char, char), Fixed, RandomState>,
}

impl RangeFont {
    pub fn new(size_px: f64, ranges: Vec<UnicodeRange>) -> Self {
        Self {
            size_px,
            advance_ratio: DEFAULT_ADVANCE_RATIO,
            ranges,
            kerning: HashMap::default(),
        }
    }

    /// Sets the advance as a fraction of the font size (1.0 for full-width
    /// scripts such as CJK).
    pub fn with_advance_ratio(mut self, ratio: f64) -> Self {
        self.advance_ratio = ratio;
        self
    }

    /// Adds a kerning adjustment, in pixels, between `prev` and `rune`.
    pub fn with_kerning(mut self, prev: char, rune: char, px: f64) -> Self {
        self.kerning.insert((prev, rune), Fixed::from_f64(px));
        self
    }

    pub fn size_px(&self) -> f64 {
        self.size_px
    }

    pub fn covers(&self, rune: char) -> bool {
        self.ranges.iter().any(|r| r.contains(rune))
    }

    fn advance_px(&self) -> f64 {
        self.size_px * self.advance_ratio
    }

    /// Ink box of a visible rune in pixels: 10% side bearings, cap height
    /// at 70% of the size.
    fn ink_box(&self) -> (f64, f64, f64, f64) {
        let advance = self.advance_px();
        (advance * 0.1, -self.size_px * 0.7, advance * 0.9, 0.0)
    }
}

impl GlyphSource for RangeFont {
    fn metrics(&self) -> FontMetrics {
        FontMetrics {
            height: Fixed::from_f64(self.size_px * 1.2),
            ascent: Fixed::from_f64(self.size_px * 0.8),
            descent: Fixed::from_f64(self.size_px * 0.2),
        }
    }

    fn glyph_bounds(&self, rune: char) -> Option<(FixedRect, Fixed)> {
        if !self.covers(rune) {
            return None;
        }
        let advance = Fixed::from_f64(self.advance_px());
        if rune.is_whitespace() || rune.is_control() {
            return Some((FixedRect::default(), advance));
        }
        let (x0, y0, x1, y1) = self.ink_box();
        let bounds = FixedRect::new(FixedPoint::from_f64(x0, y0), FixedPoint::from_f64(x1, y1));
        Some((bounds, advance))
    }

    fn notdef_advance(&self) -> Fixed {
        Fixed::from_f64(self.advance_px())
    }

    fn kern(&self, prev: char, rune: char) -> Fixed {
        self.kerning.get(&(prev, rune)).copied().unwrap_or_default()
    }

    fn glyph_outline(&self, rune: char) -> Option<Path> {
        if !self.covers(rune) || rune.is_whitespace() || rune.is_control() {
            return None;
        }
        let (x0, y0, x1, y1) = self.ink_box();
        let (x0, y0, x1, y1) = (x0 as f32, y0 as f32, x1 as f32, y1 as f32);
        let mut path = Path::new();
        path.move_to(x0, y0);
        path.line_to(x1, y0);
        path.line_to(x1, y1);
        path.line_to(x0, y1);
        path.close();
        Some(path)
    }
}

/// Largest bitmap edge [`BoxRasterizer`] agrees to paint.
pub const MAX_BITMAP_EDGE: u32 = 4096;

/// Paints the ink bounds of a glyph as an anti-aliased solid box.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoxRasterizer;

impl Rasterizer for BoxRasterizer {
    fn rasterize(&self, request: &RasterRequest) -> Result<RasterizedGlyph, RasterError> {
        let (width, height) = (request.width, request.height);
        if width > MAX_BITMAP_EDGE || height > MAX_BITMAP_EDGE {
            return Err(RasterError::TooLarge { width, height });
        }

        let x0 = request.subpixel_offset.x.to_f64();
        let y0 = request.subpixel_offset.y.to_f64();
        let x1 = x0 + request.bounds.width().to_f64();
        let y1 = y0 + request.bounds.height().to_f64();

        let mut coverage = Vec::with_capacity((width * height) as usize);
        for py in 0..height {
            let cy = overlap(py as f64, y0, y1);
            for px in 0..width {
                let cx = overlap(px as f64, x0, x1);
                coverage.push((cx * cy * 255.0).round() as u8);
            }
        }

        Ok(RasterizedGlyph {
            width,
            height,
            buffer: GlyphBuffer::Alpha(coverage),
        })
    }
}

/// Length of the intersection of the pixel `[p, p + 1)` with `[lo, hi)`.
fn overlap(p: f64, lo: f64, hi: f64) -> f64 {
    ((p + 1.0).min(hi) - p.max(lo)).max(0.0)
}
