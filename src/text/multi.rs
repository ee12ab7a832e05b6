use std::sync::Arc;

use super::path::Path;
use super::traits::Face;
use super::types::{Direction, Glyph, Metrics};

/// A byte range of a line assigned to one face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextChunk {
    /// Byte offset of the first rune (inclusive).
    pub start: usize,
    /// Byte offset one past the last rune (exclusive).
    pub end: usize,
    /// Index of the face that renders the chunk, `None` if no face can.
    pub face_index: Option<usize>,
}

impl TextChunk {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Iterator that groups consecutive runes into chunks by their face.
///
/// A new chunk starts whenever the first face able to render a rune differs
/// from the one of the previous rune. Runes no face can render are grouped
/// the same way under `face_index: None`.
pub struct TextChunks<'a> {
    faces: &'a [Arc<dyn Face>],
    text: &'a str,
    pos: usize,
}

impl<'a> TextChunks<'a> {
    pub fn new(faces: &'a [Arc<dyn Face>], text: &'a str) -> Self {
        Self { faces, text, pos: 0 }
    }

    fn face_for(&self, rune: char) -> Option<usize> {
        self.faces.iter().position(|f| f.has_glyph(rune))
    }
}

impl<'a> Iterator for TextChunks<'a> {
    type Item = TextChunk;

    fn next(&mut self) -> Option<TextChunk> {
        let start = self.pos;
        let mut runes = self.text[start..].chars();
        let first = runes.next()?;
        let face_index = self.face_for(first);
        let mut end = start + first.len_utf8();

        for rune in runes {
            if self.face_for(rune) != face_index {
                break;
            }
            end += rune.len_utf8();
        }

        self.pos = end;
        Some(TextChunk {
            start,
            end,
            face_index,
        })
    }
}

/// A [`Face`] made of several faces, highest priority first.
///
/// Each rune is drawn with the first face that has a glyph for it. Runes
/// that no face supports are dropped.
///
/// The writing direction is taken from the first face. Mixing faces with
/// different directions is not supported and gives an undefined glyph
/// order.
#[derive(Clone, Default)]
pub struct MultiFace {
    faces: Vec<Arc<dyn Face>>,
}

impl MultiFace {
    pub fn new(faces: Vec<Arc<dyn Face>>) -> Self {
        Self { faces }
    }

    pub fn faces(&self) -> &[Arc<dyn Face>] {
        &self.faces
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Partitions `text` into maximal chunks rendered by the same face.
    ///
    /// The chunks are contiguous and cover every byte of `text`.
    pub fn split_text(&self, text: &str) -> Vec<TextChunk> {
        let chunks: Vec<TextChunk> = TextChunks::new(&self.faces, text).collect();
        log::trace!("Split {} bytes into {} chunks", text.len(), chunks.len());
        chunks
    }

    /// Chunks that some face renders, paired with that face.
    fn rendered_chunks<'a>(
        &'a self,
        text: &'a str,
    ) -> impl Iterator<Item = (TextChunk, &'a Arc<dyn Face>)> + 'a {
        TextChunks::new(&self.faces, text)
            .filter_map(move |c| c.face_index.map(|i| (c, &self.faces[i])))
    }
}

impl std::fmt::Debug for MultiFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultiFace")
            .field("faces", &self.faces.len())
            .finish()
    }
}

impl Face for MultiFace {
    fn metrics(&self) -> Metrics {
        self.faces
            .iter()
            .fold(Metrics::default(), |m, f| m.max(f.metrics()))
    }

    fn advance(&self, text: &str) -> f64 {
        self.rendered_chunks(text)
            .map(|(c, face)| face.advance(&text[c.start..c.end]))
            .sum()
    }

    fn has_glyph(&self, rune: char) -> bool {
        self.faces.iter().any(|f| f.has_glyph(rune))
    }

    fn append_glyphs_for_line(
        &self,
        glyphs: &mut Vec<Glyph>,
        line: &str,
        index_offset: usize,
        mut origin_x: f64,
        mut origin_y: f64,
    ) {
        for (c, face) in self.rendered_chunks(line) {
            let t = &line[c.start..c.end];
            face.append_glyphs_for_line(glyphs, t, index_offset + c.start, origin_x, origin_y);

            let a = face.advance(t);
            if face.direction().is_horizontal() {
                origin_x += a;
            } else {
                origin_y += a;
            }
        }
    }

    fn append_vector_path_for_line(
        &self,
        path: &mut Path,
        line: &str,
        mut origin_x: f64,
        mut origin_y: f64,
    ) {
        for (c, face) in self.rendered_chunks(line) {
            let t = &line[c.start..c.end];
            face.append_vector_path_for_line(path, t, origin_x, origin_y);

            let a = face.advance(t);
            if face.direction().is_horizontal() {
                origin_x += a;
            } else {
                origin_y += a;
            }
        }
    }

    fn direction(&self) -> Direction {
        self.faces
            .first()
            .map(|f| f.direction())
            .unwrap_or_default()
    }
}
