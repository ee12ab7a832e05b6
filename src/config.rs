use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::text::{
    BoxRasterizer, Face, Granularity, MultiFace, RangeFont, StdFace, UnicodeRange,
    DEFAULT_ADVANCE_RATIO,
};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub glyph_cache: GlyphCacheSettings,
    #[serde(default = "default_faces")]
    pub faces: Vec<FaceSettings>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct GlyphCacheSettings {
    #[serde(default)]
    pub granularity: Granularity,
}

/// One face of the fallback chain, highest priority first.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct FaceSettings {
    pub name: String,
    pub size: f64,
    pub advance_ratio: Option<f64>,
    pub ranges: Vec<UnicodeRange>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

fn default_faces() -> Vec<FaceSettings> {
    vec![
        FaceSettings {
            name: "latin".to_string(),
            size: 24.0,
            advance_ratio: None,
            ranges: vec![UnicodeRange::new(0x20, 0x7E)],
        },
        FaceSettings {
            name: "cjk".to_string(),
            size: 32.0,
            advance_ratio: Some(1.0),
            ranges: vec![
                UnicodeRange::new(0x3000, 0x30FF),
                UnicodeRange::new(0x4E00, 0x9FFF),
            ],
        },
    ]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            glyph_cache: GlyphCacheSettings::default(),
            faces: default_faces(),
        }
    }
}

impl Config {
    /// Loads the user config, falling back to defaults on any problem.
    pub fn load() -> Self {
        let config_path = match config_file_path() {
            Some(path) => path,
            None => return Config::default(),
        };

        if !config_path.exists() {
            return Config::default();
        }

        match Config::from_file(&config_path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{}", e);
                Config::default()
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Builds the fallback chain described by `faces`.
    pub fn build_face(&self) -> MultiFace {
        let faces = self
            .faces
            .iter()
            .map(|settings| {
                log::debug!(
                    "Adding face '{}' ({} px, {} ranges)",
                    settings.name,
                    settings.size,
                    settings.ranges.len()
                );
                let font = RangeFont::new(settings.size, settings.ranges.clone())
                    .with_advance_ratio(settings.advance_ratio.unwrap_or(DEFAULT_ADVANCE_RATIO));
                let face = StdFace::with_granularity(
                    font,
                    BoxRasterizer,
                    self.glyph_cache.granularity,
                );
                Arc::new(face) as Arc<dyn Face>
            })
            .collect();
        MultiFace::new(faces)
    }
}

fn config_file_path() -> Option<PathBuf> {
    if let Some(config_dir) = std::env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(config_dir).join("textface").join("config.toml"))
    } else {
        dirs::home_dir().map(|home| home.join(".config").join("textface").join("config.toml"))
    }
}
