use std::{
    fmt,
    path::{self, Path},
    sync::Arc,
};

use serde::{Deserialize, Serialize};

/// The key an input is packed and reported under: its path relative to the
/// folder containing the config file, always using `/` as the separator.
///
/// Keeping this as its own type instead of a bare string keeps keys built from
/// paths from being mixed up with other strings, like layout names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetName(Arc<str>);

impl AssetName {
    pub fn from_paths(root_path: &Path, asset_path: &Path) -> Self {
        let relative = asset_path.strip_prefix(root_path).unwrap_or(asset_path);
        let displayed = format!("{}", relative.display());

        // Keys should be the same no matter which platform built the atlas.
        let displayed = if path::MAIN_SEPARATOR == '/' {
            displayed
        } else {
            displayed.replace(path::MAIN_SEPARATOR, "/")
        };

        AssetName(displayed.into())
    }
}

impl From<&str> for AssetName {
    fn from(name: &str) -> Self {
        AssetName(name.into())
    }
}

impl AsRef<str> for AssetName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetName {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}
