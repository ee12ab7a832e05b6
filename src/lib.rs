//! Font fallback text layout with a sub-pixel glyph image cache.
//!
//! A [`text::MultiFace`] splits a line into chunks by the first face able to
//! render each rune, and a [`text::StdFace`] places the glyphs of one font on
//! the pixel grid while caching every glyph bitmap it rasterizes.

pub mod cli;
pub mod config;
pub mod text;

use log::info;

use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::text::Face;

pub fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load(),
    };
    if let Some(granularity) = cli.granularity {
        config.glyph_cache.granularity = granularity;
    }

    let face = config.build_face();
    info!(
        "Using {} faces with {:?} granularity",
        face.len(),
        config.glyph_cache.granularity
    );

    match cli.command {
        Command::Split { text } => {
            for chunk in face.split_text(&text) {
                let name = chunk
                    .face_index
                    .map_or("<none>", |i| config.faces[i].name.as_str());
                println!(
                    "{:>4}..{:<4} {:<8} {:?}",
                    chunk.start,
                    chunk.end,
                    name,
                    &text[chunk.start..chunk.end]
                );
            }
        }
        Command::Layout { text, x, y } => {
            let mut glyphs = Vec::new();
            face.append_glyphs_for_line(&mut glyphs, &text, 0, x, y);
            for glyph in &glyphs {
                let rune = &text[glyph.start_index_in_bytes..glyph.end_index_in_bytes];
                match &glyph.image {
                    Some(image) => println!(
                        "{:?} at ({}, {}) {}x{}",
                        rune, glyph.x, glyph.y, image.width, image.height
                    ),
                    None => println!("{:?} at ({}, {}) no ink", rune, glyph.x, glyph.y),
                }
            }
            println!("advance: {}", face.advance(&text));
        }
        Command::Metrics => {
            let m = face.metrics();
            println!("height:    {}", m.height);
            println!("h_ascent:  {}", m.h_ascent);
            println!("h_descent: {}", m.h_descent);
            println!("width:     {}", m.width);
            println!("v_ascent:  {}", m.v_ascent);
            println!("v_descent: {}", m.v_descent);
            println!("direction: {:?}", face.direction());
        }
    }

    Ok(())
}
