use super::fixed::{Fixed, FixedPoint, FixedRect};
use super::path::Path;
use super::types::{Direction, Glyph, Metrics, RasterizedGlyph};

/// A source of laid-out glyphs for one line of text.
///
/// Implemented by [`StdFace`](super::StdFace) over a single font and by
/// [`MultiFace`](super::MultiFace) over a priority-ordered list of faces.
pub trait Face: Send + Sync {
    fn metrics(&self) -> Metrics;

    /// Advance of `text` along the writing direction, in pixels.
    fn advance(&self, text: &str) -> f64;

    fn has_glyph(&self, rune: char) -> bool;

    /// Appends the glyphs of `line` to `glyphs`, in text order.
    ///
    /// Byte indices of the new glyphs are relative to `line` plus
    /// `index_offset`.
    ///
    /// Runes the face knows but that have no ink (spaces, failed
    /// rasterizations) still get a [`Glyph`] with `image: None`. Runes the
    /// face cannot render get no glyph at all, only their advance.
    fn append_glyphs_for_line(
        &self,
        glyphs: &mut Vec<Glyph>,
        line: &str,
        index_offset: usize,
        origin_x: f64,
        origin_y: f64,
    );

    fn append_vector_path_for_line(&self, path: &mut Path, line: &str, origin_x: f64, origin_y: f64);

    fn direction(&self) -> Direction;
}

/// Font metrics as reported by a glyph source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FontMetrics {
    pub height: Fixed,
    pub ascent: Fixed,
    pub descent: Fixed,
}

/// Measuring side of a single font.
///
/// Answers must be deterministic: the same rune always yields the same
/// bounds, advance and kerning.
pub trait GlyphSource: Send + Sync {
    fn metrics(&self) -> FontMetrics;

    /// Ink bounds relative to the dot, plus the advance. `None` if the font
    /// has no glyph for `rune`.
    fn glyph_bounds(&self, rune: char) -> Option<(FixedRect, Fixed)>;

    fn glyph_advance(&self, rune: char) -> Option<Fixed> {
        self.glyph_bounds(rune).map(|(_, advance)| advance)
    }

    /// Advance consumed by a rune the font cannot render.
    fn notdef_advance(&self) -> Fixed;

    fn kern(&self, _prev: char, _rune: char) -> Fixed {
        Fixed::ZERO
    }

    /// Outline of `rune` relative to the dot, if the font exposes outlines.
    fn glyph_outline(&self, _rune: char) -> Option<Path> {
        None
    }
}

/// Everything a rasterizer needs to paint one glyph variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterRequest {
    pub rune: char,
    /// Fractional pixel offset of the ink's top-left corner.
    pub subpixel_offset: FixedPoint,
    /// Un-quantized ink bounds relative to the dot.
    pub bounds: FixedRect,
    /// Target bitmap size, already padded.
    pub width: u32,
    pub height: u32,
}

impl RasterRequest {
    /// Where the dot lands inside the target bitmap.
    pub fn dot(&self) -> FixedPoint {
        FixedPoint::new(
            self.subpixel_offset.x - self.bounds.min.x,
            self.subpixel_offset.y - self.bounds.min.y,
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    #[error("No outline for glyph {0:?}")]
    MissingGlyph(char),
    #[error("Glyph bitmap too large: {width}x{height}")]
    TooLarge { width: u32, height: u32 },
    #[error("Rasterizer backend failed: {0}")]
    Backend(String),
}

/// Paints glyph bitmaps.
pub trait Rasterizer: Send + Sync {
    fn rasterize(&self, request: &RasterRequest) -> Result<RasterizedGlyph, RasterError>;
}
