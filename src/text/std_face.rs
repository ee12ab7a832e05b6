use std::sync::Arc;

use clap::ValueEnum;
use serde::Deserialize;

use super::cache::{GlyphImageCache, OwnerId, StdFaceGlyphKey};
use super::fixed::{Fixed, FixedPoint, FixedRect, ONE};
use super::path::Path;
use super::traits::{Face, GlyphSource, RasterRequest, Rasterizer};
use super::types::{Direction, Glyph, GlyphImage, Metrics};

/// How finely horizontal glyph origins are distinguished in the glyph cache.
///
/// Every rune is rendered in at most `variations()` horizontal sub-pixel
/// positions. Coarser grids mean fewer cache entries but glyphs that sit up
/// to one grid step away from their true position inside their bitmap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// One variation per rune: origins snap to whole pixels.
    #[default]
    Pixel,
    Half,
    Quarter,
    Eighth,
    /// Picks the grid from the face size: small text gets more variations.
    Auto,
}

impl Granularity {
    /// Number of sub-pixel variations for a face with the given metrics.
    pub fn variations(self, metrics: &Metrics) -> i32 {
        match self {
            Granularity::Pixel => 1,
            Granularity::Half => 2,
            Granularity::Quarter => 4,
            Granularity::Eighth => 8,
            Granularity::Auto => {
                let size = metrics.h_ascent + metrics.h_descent;
                if size < 20.0 {
                    8
                } else if size < 40.0 {
                    4
                } else if size < 80.0 {
                    2
                } else {
                    1
                }
            }
        }
    }
}

/// A [`Face`] over a single font.
///
/// Applies kerning, snaps glyphs onto the pixel grid and keeps every glyph
/// bitmap it rasterizes in a private cache keyed by rune and quantized
/// horizontal sub-pixel offset.
///
/// A `StdFace` is a single identity: its cache belongs to it alone, so it
/// cannot be cloned. Share it through an `Arc` instead.
///
/// ```compile_fail
/// use textface::text::{BoxRasterizer, RangeFont, StdFace, UnicodeRange};
///
/// let font = RangeFont::new(16.0, vec![UnicodeRange::new(0x20, 0x7E)]);
/// let face = StdFace::new(font, BoxRasterizer::default());
/// let copy = face.clone();
/// ```
pub struct StdFace<S, R> {
    source: S,
    rasterizer: R,
    granularity: Granularity,
    id: OwnerId,
    glyph_image_cache: GlyphImageCache<StdFaceGlyphKey>,
}

impl<S: GlyphSource, R: Rasterizer> StdFace<S, R> {
    pub fn new(source: S, rasterizer: R) -> Self {
        Self::with_granularity(source, rasterizer, Granularity::default())
    }

    pub fn with_granularity(source: S, rasterizer: R, granularity: Granularity) -> Self {
        let id = OwnerId::next();
        Self {
            source,
            rasterizer,
            granularity,
            id,
            glyph_image_cache: GlyphImageCache::new(id),
        }
    }

    pub fn owner_id(&self) -> OwnerId {
        self.id
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn rasterizer(&self) -> &R {
        &self.rasterizer
    }

    /// Number of glyph variants rasterized (or known to be empty) so far.
    pub fn cached_glyph_count(&self) -> usize {
        self.glyph_image_cache.len()
    }

    fn adjust_granularity(&self, x: Fixed) -> Fixed {
        let variations = self.granularity.variations(&self.metrics());
        x.quantize(ONE / variations)
    }

    /// Returns the (possibly empty) image for `rune` and its integer draw
    /// position.
    fn glyph_image(
        &self,
        rune: char,
        origin: FixedPoint,
        bounds: FixedRect,
    ) -> (Option<GlyphImage>, i32, i32) {
        // Only the cache key is quantized. Vertical positions are always
        // snapped to whole pixels.
        let quantized = FixedPoint::new(
            self.adjust_granularity(origin.x),
            origin.y.floor_to_pixel(),
        );
        let subpixel_offset = FixedPoint::new(
            (quantized.x + bounds.min.x).fract(),
            (quantized.y + bounds.min.y).fract(),
        );
        let key = StdFaceGlyphKey::new(rune, subpixel_offset.x);
        let image = self.glyph_image_cache.get_or_create(self.id, key, || {
            self.rasterize(rune, subpixel_offset, bounds)
        });

        let x = (origin.x + bounds.min.x).floor();
        let y = (origin.y + bounds.min.y).floor();
        (image, x, y)
    }

    fn rasterize(
        &self,
        rune: char,
        subpixel_offset: FixedPoint,
        bounds: FixedRect,
    ) -> Option<GlyphImage> {
        if bounds.is_empty() {
            return None;
        }

        // Always pad by one pixel; the quantized offset can push ink past
        // the ceiling of the unpadded bounds.
        let request = RasterRequest {
            rune,
            subpixel_offset,
            bounds,
            width: bounds.width().ceil() as u32 + 1,
            height: bounds.height().ceil() as u32 + 1,
        };

        log::debug!(
            "Rasterizing {:?} at sub-pixel offset ({}, {})/64 into {}x{}",
            rune,
            subpixel_offset.x.0,
            subpixel_offset.y.0,
            request.width,
            request.height
        );

        match self.rasterizer.rasterize(&request) {
            Ok(glyph) => Some(Arc::new(glyph)),
            Err(e) => {
                log::warn!("Failed to rasterize {:?}: {}", rune, e);
                None
            }
        }
    }

    fn rune_advance(&self, rune: char) -> Fixed {
        self.source
            .glyph_advance(rune)
            .unwrap_or_else(|| self.source.notdef_advance())
    }
}

impl<S: GlyphSource, R: Rasterizer> Face for StdFace<S, R> {
    fn metrics(&self) -> Metrics {
        let m = self.source.metrics();
        Metrics {
            height: m.height.to_f64(),
            h_ascent: m.ascent.to_f64(),
            h_descent: m.descent.to_f64(),
            ..Default::default()
        }
    }

    fn advance(&self, text: &str) -> f64 {
        let mut advance = Fixed::ZERO;
        let mut prev = None;
        for rune in text.chars() {
            if let Some(prev) = prev {
                advance += self.source.kern(prev, rune);
            }
            advance += self.rune_advance(rune);
            prev = Some(rune);
        }
        advance.to_f64()
    }

    fn has_glyph(&self, rune: char) -> bool {
        self.source.glyph_advance(rune).is_some()
    }

    fn append_glyphs_for_line(
        &self,
        glyphs: &mut Vec<Glyph>,
        line: &str,
        index_offset: usize,
        origin_x: f64,
        origin_y: f64,
    ) {
        let mut origin = FixedPoint::from_f64(origin_x, origin_y);
        let mut prev = None;

        for (i, rune) in line.char_indices() {
            if let Some(prev) = prev {
                origin.x += self.source.kern(prev, rune);
            }
            prev = Some(rune);

            let Some((bounds, advance)) = self.source.glyph_bounds(rune) else {
                origin.x += self.source.notdef_advance();
                continue;
            };

            let (image, x, y) = self.glyph_image(rune, origin, bounds);
            glyphs.push(Glyph {
                start_index_in_bytes: index_offset + i,
                end_index_in_bytes: index_offset + i + rune.len_utf8(),
                image,
                x,
                y,
            });
            origin.x += advance;
        }
    }

    fn append_vector_path_for_line(&self, path: &mut Path, line: &str, origin_x: f64, origin_y: f64) {
        let mut origin = FixedPoint::from_f64(origin_x, origin_y);
        let mut prev = None;

        for rune in line.chars() {
            if let Some(prev) = prev {
                origin.x += self.source.kern(prev, rune);
            }
            prev = Some(rune);

            if let Some(outline) = self.source.glyph_outline(rune) {
                path.append_translated(&outline, origin.x.to_f64() as f32, origin.y.to_f64() as f32);
            }
            origin.x += self.rune_advance(rune);
        }
    }

    fn direction(&self) -> Direction {
        Direction::LeftToRight
    }
}
