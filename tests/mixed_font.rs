use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use textface::config::Config;
use textface::text::{
    BoxRasterizer, Face, Glyph, Granularity, MultiFace, RangeFont, RasterError, RasterRequest,
    RasterizedGlyph, Rasterizer, StdFace, TextChunk, UnicodeRange,
};

const MIXED: &str = "HelloこんにちはWorld世界";

fn single(rune: char) -> UnicodeRange {
    UnicodeRange::new(rune as u32, rune as u32)
}

/// Face A covers exactly "HeloWrd ", face B covers the CJK runes.
fn scenario_faces() -> MultiFace {
    let a = RangeFont::new(24.0, "HeloWrd ".chars().map(single).collect());
    let b = RangeFont::new(32.0, "こんにちは世界".chars().map(single).collect())
        .with_advance_ratio(1.0);
    MultiFace::new(vec![
        Arc::new(StdFace::new(a, BoxRasterizer)) as Arc<dyn Face>,
        Arc::new(StdFace::new(b, BoxRasterizer)) as Arc<dyn Face>,
    ])
}

fn assert_covers(chunks: &[TextChunk], text: &str) {
    let mut pos = 0;
    for c in chunks {
        assert_eq!(c.start, pos, "chunks must be contiguous: {:?}", chunks);
        assert!(c.end > c.start);
        pos = c.end;
    }
    assert_eq!(pos, text.len());
    for pair in chunks.windows(2) {
        assert_ne!(pair[0].face_index, pair[1].face_index, "chunks must be maximal");
    }
}

#[derive(Default)]
struct CountingRasterizer {
    calls: AtomicUsize,
}

impl Rasterizer for CountingRasterizer {
    fn rasterize(&self, request: &RasterRequest) -> Result<RasterizedGlyph, RasterError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        BoxRasterizer.rasterize(request)
    }
}

#[test]
fn test_mixed_script_chunks() {
    let face = scenario_faces();
    let chunks = face.split_text(MIXED);

    let parts: Vec<(&str, Option<usize>)> = chunks
        .iter()
        .map(|c| (&MIXED[c.start..c.end], c.face_index))
        .collect();
    assert_eq!(
        parts,
        vec![
            ("Hello", Some(0)),
            ("こんにちは", Some(1)),
            ("World", Some(0)),
            ("世界", Some(1)),
        ]
    );
    assert_covers(&chunks, MIXED);
}

#[test]
fn test_default_config_matches_scenario() {
    let face = Config::default().build_face();
    let indices: Vec<_> = face
        .split_text(MIXED)
        .iter()
        .map(|c| c.face_index)
        .collect();
    assert_eq!(indices, vec![Some(0), Some(1), Some(0), Some(1)]);
}

#[test]
fn test_chunk_coverage_with_gaps() {
    let face = scenario_faces();
    for text in ["", "H", "Hx", "xH", "??", "Hello, 世界!", "\u{1F600}こ\u{1F600}\u{1F600}"] {
        let chunks = face.split_text(text);
        assert_covers(&chunks, text);
    }
}

#[test]
fn test_advance_is_sum_of_chunks() {
    let face = scenario_faces();
    let expected: f64 = face
        .split_text(MIXED)
        .iter()
        .filter_map(|c| c.face_index.map(|i| face.faces()[i].advance(&MIXED[c.start..c.end])))
        .sum();
    assert_eq!(face.advance(MIXED), expected);
    // 10 Latin runes at 14.4px, 7 CJK runes at 32px.
    assert!((expected - (10.0 * 14.4 + 7.0 * 32.0)).abs() < 0.5);
}

#[test]
fn test_glyph_byte_ranges() {
    let face = scenario_faces();
    let offset = 42;
    let text = "Hi こんにちは?World";
    let mut glyphs: Vec<Glyph> = Vec::new();
    face.append_glyphs_for_line(&mut glyphs, text, offset, 0.0, 30.0);

    for g in &glyphs {
        let start = g.start_index_in_bytes - offset;
        let end = g.end_index_in_bytes - offset;
        assert!(end <= text.len());
        let rune = &text[start..end];
        assert_eq!(rune.chars().count(), 1, "{:?} is not one rune", rune);
    }

    // 'i' and '?' are not covered by any face.
    let drawn: String = glyphs
        .iter()
        .map(|g| &text[g.start_index_in_bytes - offset..g.end_index_in_bytes - offset])
        .collect();
    assert_eq!(drawn, "H こんにちはWorld");

    // Glyphs are left to right in text order.
    for pair in glyphs.windows(2) {
        assert!(pair[0].start_index_in_bytes < pair[1].start_index_in_bytes);
        assert!(pair[0].x <= pair[1].x);
    }
}

#[test]
fn test_metrics_are_max_of_faces() {
    let face = scenario_faces();
    let m = face.metrics();
    let expected = face
        .faces()
        .iter()
        .map(|f| f.metrics().height)
        .fold(0.0, f64::max);
    assert_eq!(m.height, expected);
    // The 32px CJK face dominates every horizontal field.
    assert_eq!(m.h_ascent, face.faces()[1].metrics().h_ascent);
    assert_eq!(m.h_descent, face.faces()[1].metrics().h_descent);
}

#[test]
fn test_shared_face_reuses_cached_images() {
    let std_face = Arc::new(StdFace::new(
        RangeFont::new(16.0, vec![UnicodeRange::new(0x20, 0x7E)]),
        CountingRasterizer::default(),
    ));
    let first = MultiFace::new(vec![std_face.clone() as Arc<dyn Face>]);
    let second = MultiFace::new(vec![
        Arc::new(first.clone()) as Arc<dyn Face>,
        std_face.clone() as Arc<dyn Face>,
    ]);

    let mut a = Vec::new();
    let mut b = Vec::new();
    first.append_glyphs_for_line(&mut a, "abab", 0, 0.0, 0.0);
    second.append_glyphs_for_line(&mut b, "abab", 0, 0.0, 0.0);

    assert_eq!(std_face.cached_glyph_count(), 2);
    assert_eq!(a.len(), b.len());
    for (x, y) in a.iter().zip(&b) {
        assert!(Arc::ptr_eq(x.image.as_ref().unwrap(), y.image.as_ref().unwrap()));
        assert_eq!((x.x, x.y), (y.x, y.y));
    }
}

#[test]
fn test_separate_faces_have_separate_caches() {
    let font = RangeFont::new(16.0, vec![UnicodeRange::new(0x20, 0x7E)]);
    let one = StdFace::new(font.clone(), BoxRasterizer);
    let two = StdFace::new(font, BoxRasterizer);

    let mut glyphs = Vec::new();
    one.append_glyphs_for_line(&mut glyphs, "a", 0, 0.0, 0.0);
    two.append_glyphs_for_line(&mut glyphs, "a", 0, 0.0, 0.0);

    assert_ne!(one.owner_id(), two.owner_id());
    assert!(!Arc::ptr_eq(
        glyphs[0].image.as_ref().unwrap(),
        glyphs[1].image.as_ref().unwrap()
    ));
}

#[test]
fn test_concurrent_draws_rasterize_once() {
    let face = Arc::new(StdFace::with_granularity(
        RangeFont::new(12.0, vec![UnicodeRange::new(0x20, 0x7E)]),
        CountingRasterizer::default(),
        Granularity::Pixel,
    ));
    let barrier = Arc::new(Barrier::new(8));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let face = Arc::clone(&face);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                let mut glyphs = Vec::new();
                face.append_glyphs_for_line(&mut glyphs, "xyz", 0, i as f64 * 0.1, 0.0);
                glyphs
            })
        })
        .collect();

    let results: Vec<Vec<Glyph>> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(face.source().size_px(), 12.0);
    assert_eq!(face.cached_glyph_count(), 3);
    assert_eq!(face.rasterizer().calls.load(Ordering::SeqCst), 3);
    for glyphs in &results[1..] {
        for (x, y) in results[0].iter().zip(glyphs) {
            assert!(Arc::ptr_eq(x.image.as_ref().unwrap(), y.image.as_ref().unwrap()));
        }
    }
}

#[test]
fn test_vector_path_per_chunk() {
    let face = scenario_faces();
    let mut path = textface::text::Path::new();
    face.append_vector_path_for_line(&mut path, "He 世?", 0.0, 0.0);
    // Three inked runes, five commands each; the space and '?' add nothing.
    assert_eq!(path.commands().len(), 15);
}
