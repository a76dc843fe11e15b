use std::{
    io,
    path::{Path, PathBuf},
};

use fs_err as fs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::glob::Glob;

static CONFIG_FILENAME: &str = "atlaspack.toml";

/// Configuration for one atlas, contained in an atlaspack.toml file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct Config {
    /// The name of the atlas, used in log output.
    pub name: String,

    /// The widest the atlas is allowed to be. Images wider than this are an
    /// error.
    #[serde(default = "default_max_width")]
    pub max_width: u32,

    /// If set, the tallest the atlas is allowed to be.
    #[serde(default)]
    pub max_height: Option<u32>,

    /// If set, how many canvas sizes the packer is allowed to try before
    /// settling for the best one it found.
    #[serde(default)]
    pub max_trials: Option<u32>,

    /// Transparent pixels to leave to the right of and below every image.
    #[serde(default)]
    pub padding: u32,

    /// Whether to fill the transparent pixels of each image with the color of
    /// its nearest opaque neighbors before packing.
    #[serde(default = "default_alpha_bleed")]
    pub alpha_bleed: bool,

    /// Globs, relative to this file, matching the images to pack.
    pub inputs: Vec<Glob>,

    /// Globs for files that should be left out even though they match one of
    /// `inputs`.
    #[serde(default)]
    pub exclude: Vec<Glob>,

    /// Where to write the atlas image, relative to this file.
    #[serde(default = "default_output_image")]
    pub output_image: PathBuf,

    /// Where to write the manifest describing the atlas, relative to this
    /// file.
    #[serde(default = "default_output_manifest")]
    pub output_manifest: PathBuf,

    /// The path that this config came from. Paths from this config should be
    /// relative to the folder containing this file.
    #[serde(skip)]
    pub file_path: PathBuf,
}

impl Config {
    pub fn read_from_folder_or_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if path.is_file() {
            Self::read_from_file(path)
        } else {
            Self::read_from_file(path.join(CONFIG_FILENAME))
        }
    }

    pub fn read_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read(path)?;

        let mut config: Self = toml::from_slice(&contents).map_err(|source| ConfigError::Toml {
            path: path.to_owned(),
            source,
        })?;
        config.file_path = path.to_owned();

        Ok(config)
    }

    /// The path that paths in this Config should be considered relative to.
    pub fn folder(&self) -> &Path {
        self.file_path.parent().unwrap_or_else(|| Path::new("."))
    }
}

fn default_max_width() -> u32 {
    1024
}

fn default_alpha_bleed() -> bool {
    true
}

fn default_output_image() -> PathBuf {
    PathBuf::from("atlas.png")
}

fn default_output_manifest() -> PathBuf {
    PathBuf::from("atlas.json")
}

#[derive(Debug, Error)]
pub enum ConfigError {
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
