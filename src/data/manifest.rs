use std::{
    collections::BTreeMap,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use cellpack::Rect;
use fs_err as fs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::asset_name::AssetName;

/// Describes where every input ended up in a packed atlas.
///
/// This is what consumers of the atlas read at runtime to find each sprite,
/// either by pixel rectangle or by normalized texture coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Manifest {
    /// The size of the atlas image in pixels.
    pub size: (u32, u32),

    /// The hexadecimal encoded blake3 hash of the encoded atlas image, if an
    /// image was written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,

    pub slices: BTreeMap<AssetName, ImageSlice>,
}

/// The portion of the atlas holding a single input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ImageSlice {
    pub offset: (u32, u32),
    pub size: (u32, u32),
    pub uv_min: (f32, f32),
    pub uv_max: (f32, f32),
}

impl ImageSlice {
    pub fn new(rect: Rect, atlas_size: (u32, u32)) -> Self {
        let (width, height) = (atlas_size.0 as f32, atlas_size.1 as f32);
        let (max_x, max_y) = rect.max();

        Self {
            offset: rect.pos,
            size: rect.size,
            uv_min: (rect.pos.0 as f32 / width, rect.pos.1 as f32 / height),
            uv_max: (max_x as f32 / width, max_y as f32 / height),
        }
    }
}

impl Manifest {
    pub fn new(size: (u32, u32)) -> Self {
        Self {
            size,
            hash: None,
            slices: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, name: AssetName, rect: Rect) {
        let slice = ImageSlice::new(rect, self.size);
        self.slices.insert(name, slice);
    }

    pub fn read_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        let contents = fs::read(path)?;

        serde_json::from_slice(&contents).map_err(|source| ManifestError::DeserializeJson {
            path: path.to_owned(),
            source,
        })
    }

    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ManifestError> {
        let path = path.as_ref();

        let mut file = BufWriter::new(fs::File::create(path)?);
        self.write(&mut file)?;
        file.flush()?;

        log::trace!("Saved manifest to {}", path.display());

        Ok(())
    }

    pub fn write<W: Write>(&self, output: W) -> Result<(), ManifestError> {
        serde_json::to_writer_pretty(output, self)
            .map_err(|source| ManifestError::SerializeJson { source })
    }
}

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Error deserializing JSON from path {}", .path.display())]
    DeserializeJson {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Error serializing manifest")]
    SerializeJson { source: serde_json::Error },

    #[error(transparent)]
    Io {
        #[from]
        source: io::Error,
    },
}

impl ManifestError {
    /// Tells whether this error came from the manifest not existing yet, which
    /// is expected the first time an atlas is built.
    pub fn is_not_found(&self) -> bool {
        match self {
            ManifestError::Io { source } => source.kind() == io::ErrorKind::NotFound,
            _ => false,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn slice_uvs() {
        let slice = ImageSlice::new(Rect::new((32, 0), (32, 16)), (128, 64));

        assert_eq!(slice.offset, (32, 0));
        assert_eq!(slice.size, (32, 16));
        assert_eq!(slice.uv_min, (0.25, 0.0));
        assert_eq!(slice.uv_max, (0.5, 0.25));
    }

    #[test]
    fn json_shape() {
        let mut manifest = Manifest::new((64, 32));
        manifest.insert(AssetName::from("b.png"), Rect::new((32, 0), (32, 32)));
        manifest.insert(AssetName::from("a.png"), Rect::new((0, 0), (32, 16)));

        let mut output = Vec::new();
        manifest.write(&mut output).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();

        assert_eq!(value["size"], serde_json::json!([64, 32]));
        assert!(value.get("hash").is_none());
        assert_eq!(value["slices"]["a.png"]["offset"], serde_json::json!([0, 0]));
        assert_eq!(value["slices"]["b.png"]["uv-min"], serde_json::json!([0.5, 0.0]));

        let keys: Vec<_> = value["slices"].as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["a.png", "b.png"]);

        let parsed: Manifest = serde_json::from_slice(&output).unwrap();
        assert_eq!(parsed, manifest);
    }
}
