//! Glob patterns as written in atlaspack.toml, and the filter that decides
//! which files under a config folder become atlas inputs.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};

pub use globset::Error;

/// A single pattern, kept alongside the text it was parsed from so that it
/// can be written back out and compared.
#[derive(Debug, Clone)]
pub struct Glob {
    inner: globset::Glob,
}

impl Glob {
    pub fn new(pattern: &str) -> Result<Self, Error> {
        // Separators have to be matched literally, otherwise "*.png" would
        // also pick up every PNG in every subfolder.
        let inner = GlobBuilder::new(pattern).literal_separator(true).build()?;

        Ok(Glob { inner })
    }

    pub fn as_str(&self) -> &str {
        self.inner.glob()
    }

    /// The leading part of the pattern that contains no wildcards. Searching
    /// for matches only needs to start from here.
    pub fn fixed_prefix(&self) -> PathBuf {
        Path::new(self.as_str())
            .iter()
            .take_while(|component| {
                let component = component.to_string_lossy();
                !GLOB_PATTERN_CHARACTERS
                    .chars()
                    .any(|special| component.contains(special))
            })
            .collect()
    }
}

// Characters that might start pattern syntax. Escapes like `[*]` are treated
// as patterns too, which only means searching from a folder higher up.
const GLOB_PATTERN_CHARACTERS: &str = "*?{}[]";

impl PartialEq for Glob {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl Eq for Glob {}

impl Serialize for Glob {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Glob {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let pattern = String::deserialize(deserializer)?;

        Glob::new(&pattern).map_err(D::Error::custom)
    }
}

impl fmt::Display for Glob {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Matches paths relative to a config folder against a list of patterns to
/// include and a list of patterns to leave out.
#[derive(Debug)]
pub struct InputFilter {
    include: GlobSet,
    exclude: GlobSet,
    search_roots: Vec<PathBuf>,
}

impl InputFilter {
    pub fn new(include: &[Glob], exclude: &[Glob]) -> Result<Self, Error> {
        let mut search_roots: Vec<PathBuf> = Vec::new();

        for glob in include {
            let prefix = glob.fixed_prefix();

            // A root that is already covered by a shorter one would make the
            // same files show up twice.
            if search_roots.iter().any(|root| prefix.starts_with(root)) {
                continue;
            }

            search_roots.retain(|root| !root.starts_with(&prefix));
            search_roots.push(prefix);
        }

        Ok(Self {
            include: build_set(include)?,
            exclude: build_set(exclude)?,
            search_roots,
        })
    }

    /// Folders, relative to the config folder, that need to be walked to find
    /// every possible match.
    pub fn search_roots(&self) -> &[PathBuf] {
        &self.search_roots
    }

    pub fn is_match<P: AsRef<Path>>(&self, relative_path: P) -> bool {
        let path = relative_path.as_ref();

        self.include.is_match(path) && !self.exclude.is_match(path)
    }
}

fn build_set(globs: &[Glob]) -> Result<GlobSet, Error> {
    let mut builder = GlobSetBuilder::new();
    for glob in globs {
        builder.add(glob.inner.clone());
    }

    builder.build()
}

#[cfg(test)]
mod test {
    use super::*;

    fn globs(patterns: &[&str]) -> Vec<Glob> {
        patterns
            .iter()
            .map(|pattern| Glob::new(pattern).unwrap())
            .collect()
    }

    #[test]
    fn simple_prefix() {
        assert_eq!(
            Glob::new("a/b/**/*.png").unwrap().fixed_prefix(),
            PathBuf::from("a/b")
        );
    }

    #[test]
    fn prefix_stops_at_first_pattern() {
        assert_eq!(
            Glob::new("a/**/b/*.png").unwrap().fixed_prefix(),
            PathBuf::from("a")
        );
    }

    #[test]
    fn no_prefix() {
        assert_eq!(
            Glob::new("**/b/*.png").unwrap().fixed_prefix(),
            PathBuf::from("")
        );
    }

    #[test]
    fn whole_path() {
        assert_eq!(
            Glob::new("a/b/foo.png").unwrap().fixed_prefix(),
            PathBuf::from("a/b/foo.png")
        );
    }

    #[test]
    fn star_does_not_cross_folders() {
        let filter = InputFilter::new(&globs(&["*.png"]), &[]).unwrap();

        assert!(filter.is_match("top.png"));
        assert!(!filter.is_match("nested/deep.png"));
    }

    #[test]
    fn exclude_wins() {
        let filter =
            InputFilter::new(&globs(&["icons/**/*.png"]), &globs(&["**/*-old.png"])).unwrap();

        assert!(filter.is_match("icons/close.png"));
        assert!(filter.is_match("icons/small/close.png"));
        assert!(!filter.is_match("icons/close-old.png"));
        assert!(!filter.is_match("fonts/a.png"));
    }

    #[test]
    fn nested_roots_are_merged() {
        let filter = InputFilter::new(
            &globs(&["ui/icons/*.png", "ui/**/*.png", "fonts/*.png"]),
            &[],
        )
        .unwrap();

        assert_eq!(
            filter.search_roots(),
            &[PathBuf::from("ui"), PathBuf::from("fonts")]
        );
    }
}
