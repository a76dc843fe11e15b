use std::{
    io,
    path::{Path, PathBuf},
};

use fs_err as fs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A list of plain rectangles to pack without any images behind them, like
/// the glyph boxes of a font that is rasterized somewhere else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct Layout {
    #[serde(default = "default_max_width")]
    pub max_width: u32,

    #[serde(default)]
    pub max_height: Option<u32>,

    #[serde(default)]
    pub max_trials: Option<u32>,

    #[serde(default, rename = "rect")]
    pub rects: Vec<LayoutRect>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayoutRect {
    pub name: String,
    pub width: u32,
    pub height: u32,
}

impl Layout {
    pub fn read_from_file<P: AsRef<Path>>(path: P) -> Result<Self, LayoutError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;

        Self::parse(&contents).map_err(|source| LayoutError::Toml {
            path: path.to_owned(),
            source,
        })
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }
}

fn default_max_width() -> u32 {
    1024
}

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("Error deserializing TOML from path {}", .path.display())]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error(transparent)]
    Io {
        #[from]
        source: io::Error,
    },
}
