use std::sync::Arc;

/// Line metrics of a face, in pixels.
///
/// Horizontal fields apply to horizontal writing, vertical fields to
/// vertical writing. A face that only supports one orientation leaves the
/// other fields at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Metrics {
    /// Recommended distance between two baselines.
    pub height: f64,
    pub h_ascent: f64,
    pub h_descent: f64,
    /// Recommended distance between two vertical baselines.
    pub width: f64,
    pub v_ascent: f64,
    pub v_descent: f64,
}

impl Metrics {
    /// Per-field maximum of two metrics records.
    pub fn max(self, other: Metrics) -> Metrics {
        Metrics {
            height: self.height.max(other.height),
            h_ascent: self.h_ascent.max(other.h_ascent),
            h_descent: self.h_descent.max(other.h_descent),
            width: self.width.max(other.width),
            v_ascent: self.v_ascent.max(other.v_ascent),
            v_descent: self.v_descent.max(other.v_descent),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    #[default]
    LeftToRight,
    RightToLeft,
    TopToBottomAndLeftToRight,
    TopToBottomAndRightToLeft,
}

impl Direction {
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Direction::LeftToRight | Direction::RightToLeft)
    }
}

/// Pixel storage of a rasterized glyph.
#[derive(Clone, PartialEq, Eq)]
pub enum GlyphBuffer {
    /// One coverage byte per pixel.
    Alpha(Vec<u8>),
    /// Premultiplied RGBA, for color glyphs.
    Rgba(Vec<u8>),
}

impl GlyphBuffer {
    pub fn is_colored(&self) -> bool {
        matches!(self, GlyphBuffer::Rgba(_))
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            GlyphBuffer::Alpha(b) | GlyphBuffer::Rgba(b) => b,
        }
    }
}

/// A glyph bitmap produced by a [`Rasterizer`](super::Rasterizer).
#[derive(Clone)]
pub struct RasterizedGlyph {
    pub width: u32,
    pub height: u32,
    pub buffer: GlyphBuffer,
}

impl std::fmt::Debug for RasterizedGlyph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterizedGlyph")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("colored", &self.buffer.is_colored())
            .field("buffer_len", &self.buffer.as_bytes().len())
            .finish()
    }
}

/// Shared handle to a cached glyph bitmap.
///
/// Two handles refer to the same cache entry exactly when
/// `Arc::ptr_eq` holds for them.
pub type GlyphImage = Arc<RasterizedGlyph>;

/// A glyph placed on the pixel grid.
#[derive(Debug, Clone)]
pub struct Glyph {
    /// Byte offset of the glyph's rune in the caller's text (inclusive).
    pub start_index_in_bytes: usize,
    /// Byte offset one past the glyph's rune (exclusive).
    pub end_index_in_bytes: usize,
    /// `None` when the glyph has no visible ink, e.g. a space.
    pub image: Option<GlyphImage>,
    /// Left edge of the image in pixels.
    pub x: i32,
    /// Top edge of the image in pixels.
    pub y: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_default_is_zero() {
        let m = Metrics::default();
        assert_eq!(m.height, 0.0);
        assert_eq!(m.h_ascent, 0.0);
        assert_eq!(m.v_descent, 0.0);
    }

    #[test]
    fn test_metrics_max_is_per_field() {
        let a = Metrics {
            height: 20.0,
            h_ascent: 5.0,
            h_descent: 4.0,
            ..Default::default()
        };
        let b = Metrics {
            height: 10.0,
            h_ascent: 16.0,
            width: 3.0,
            ..Default::default()
        };
        let m = a.max(b);
        assert_eq!(m.height, 20.0);
        assert_eq!(m.h_ascent, 16.0);
        assert_eq!(m.h_descent, 4.0);
        assert_eq!(m.width, 3.0);
    }

    #[test]
    fn test_direction_orientation() {
        assert!(Direction::LeftToRight.is_horizontal());
        assert!(Direction::RightToLeft.is_horizontal());
        assert!(!Direction::TopToBottomAndLeftToRight.is_horizontal());
        assert!(!Direction::TopToBottomAndRightToLeft.is_horizontal());
        assert_eq!(Direction::default(), Direction::LeftToRight);
    }

    #[test]
    fn test_glyph_buffer_kind() {
        assert!(!GlyphBuffer::Alpha(vec![0; 4]).is_colored());
        assert!(GlyphBuffer::Rgba(vec![0; 16]).is_colored());
        assert_eq!(GlyphBuffer::Alpha(vec![1, 2]).as_bytes(), &[1, 2]);
    }
}
