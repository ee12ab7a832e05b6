mod cache;
mod fixed;
mod multi;
mod path;
mod range_font;
mod std_face;
mod traits;
mod types;

pub use cache::{GlyphImageCache, OwnerId, StdFaceGlyphKey};
pub use fixed::{Fixed, FixedPoint, FixedRect};
pub use multi::{MultiFace, TextChunk, TextChunks};
pub use path::{Path, PathCommand};
pub use range_font::{BoxRasterizer, RangeFont, UnicodeRange, DEFAULT_ADVANCE_RATIO};
pub use std_face::{Granularity, StdFace};
pub use traits::{Face, FontMetrics, GlyphSource, RasterError, RasterRequest, Rasterizer};
pub use types::{Direction, Glyph, GlyphBuffer, GlyphImage, Metrics, RasterizedGlyph};
