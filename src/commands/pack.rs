use std::{
    collections::BTreeMap,
    env,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context};
use cellpack::{Rect, RectanglePacker};
use fs_err as fs;
use indicatif::{ProgressBar, ProgressStyle};
use walkdir::WalkDir;

use crate::{
    alpha_bleed::alpha_bleed,
    asset_name::AssetName,
    data::{Config, Manifest},
    glob::InputFilter,
    image::Image,
    options::{GlobalOptions, PackOptions},
};

pub fn pack(global: GlobalOptions, options: PackOptions) -> anyhow::Result<()> {
    let config_path = match options.config_path {
        Some(path) => path,
        None => env::current_dir()?,
    };

    let mut config = Config::read_from_folder_or_file(&config_path)?;
    if let Some(max_width) = global.max_width {
        config.max_width = max_width;
    }

    log::info!("Packing atlas \"{}\"", config.name);

    let paths = discover_inputs(&config)?;
    if paths.is_empty() {
        bail!(
            "No images in {} matched the inputs of atlas \"{}\"",
            config.folder().display(),
            config.name
        );
    }

    let inputs = load_inputs(&config, paths)?;
    let (atlas, mut manifest) = pack_inputs(&config, &inputs)?;

    let mut encoded = Vec::new();
    atlas.encode_png(&mut encoded)?;
    manifest.hash = Some(blake3::hash(&encoded).to_hex().to_string());

    let image_path = config.folder().join(&config.output_image);
    let manifest_path = config.folder().join(&config.output_manifest);

    if !options.force && is_up_to_date(&manifest, &manifest_path, &image_path) {
        log::info!("Atlas \"{}\" is already up to date", config.name);
        return Ok(());
    }

    for path in &[&image_path, &manifest_path] {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
    }

    fs::write(&image_path, &encoded)?;
    manifest.write_to_file(&manifest_path)?;

    log::info!(
        "Wrote {} and {}",
        image_path.display(),
        manifest_path.display()
    );

    Ok(())
}

/// A decoded image waiting to be put into the atlas.
#[derive(Debug)]
pub(crate) struct AtlasInput {
    pub name: AssetName,
    pub image: Image,
}

/// Finds every file under the config's folder matched by its input globs,
/// keyed by name so that the atlas comes out the same on every machine.
fn discover_inputs(config: &Config) -> anyhow::Result<BTreeMap<AssetName, PathBuf>> {
    let filter = InputFilter::new(&config.inputs, &config.exclude)?;
    let root = config.folder();

    let mut found = BTreeMap::new();

    for search_root in filter.search_roots() {
        let base_path = root.join(search_root);
        log::trace!("Searching for inputs in '{}'", base_path.display());

        for entry in WalkDir::new(&base_path).follow_links(true) {
            let entry =
                entry.with_context(|| format!("Could not search {}", base_path.display()))?;

            if !entry.file_type().is_file() {
                continue;
            }

            let relative_path = match entry.path().strip_prefix(root) {
                Ok(path) => path,
                Err(_) => continue,
            };

            if !filter.is_match(relative_path) {
                continue;
            }

            if !is_png(entry.path()) {
                log::warn!(
                    "Skipping {}, only PNG images can be packed",
                    entry.path().display()
                );
                continue;
            }

            let name = AssetName::from_paths(root, entry.path());
            log::trace!("Found input {}", name);

            found.insert(name, entry.into_path());
        }
    }

    Ok(found)
}

fn load_inputs(
    config: &Config,
    paths: BTreeMap<AssetName, PathBuf>,
) -> anyhow::Result<Vec<AtlasInput>> {
    let progress = ProgressBar::new(paths.len() as u64);
    progress.set_style(ProgressStyle::default_bar().template("{bar:40} {pos}/{len} {msg}"));

    let mut inputs = Vec::with_capacity(paths.len());

    for (name, path) in paths {
        progress.set_message(name.to_string());

        let file = fs::File::open(&path)?;
        let mut image = Image::decode_png(BufReader::new(file))
            .with_context(|| format!("Could not decode {}", path.display()))?;

        if config.alpha_bleed {
            alpha_bleed(&mut image);
        }

        inputs.push(AtlasInput { name, image });
        progress.inc(1);
    }

    progress.finish_and_clear();

    Ok(inputs)
}

/// Packs decoded inputs and copies them into a single atlas image.
pub(crate) fn pack_inputs(
    config: &Config,
    inputs: &[AtlasInput],
) -> anyhow::Result<(Image, Manifest)> {
    let mut packer = RectanglePacker::new(config.max_width);
    if let Some(max_height) = config.max_height {
        packer = packer.max_height(max_height);
    }
    if let Some(max_trials) = config.max_trials {
        packer = packer.max_trials(max_trials);
    }

    for input in inputs {
        let (width, height) = input.image.size();
        let size = width
            .checked_add(config.padding)
            .zip(height.checked_add(config.padding))
            .with_context(|| {
                format!(
                    "Padding of {} around {} ({}x{}) is too large",
                    config.padding, input.name, width, height
                )
            })?;

        packer.add_rectangle(input.name.to_string(), size, input)?;
    }

    let result = packer.pack()?;
    if !result.is_valid() {
        bail!(
            "Could not fit the {} images of atlas \"{}\" within its size limits",
            inputs.len(),
            config.name
        );
    }

    let canvas = result.canvas_size();
    log::info!(
        "Packed {} images into {}x{} ({:.1}% used)",
        result.len(),
        canvas.0,
        canvas.1,
        result.occupancy() * 100.0
    );

    let mut atlas = Image::new_empty_rgba8(canvas);
    let mut manifest = Manifest::new(canvas);

    for placement in result.placements() {
        let input = placement.payload();
        let position = placement.position();

        atlas.blit(&input.image, position);
        manifest.insert(input.name.clone(), Rect::new(position, input.image.size()));
    }

    Ok((atlas, manifest))
}

fn is_up_to_date(manifest: &Manifest, manifest_path: &Path, image_path: &Path) -> bool {
    match Manifest::read_from_file(manifest_path) {
        Ok(previous) => previous == *manifest && image_path.is_file(),
        Err(err) if err.is_not_found() => false,
        Err(err) => {
            log::warn!("Rebuilding atlas, the previous manifest could not be read: {}", err);
            false
        }
    }
}

fn is_png(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| ext.eq_ignore_ascii_case("png"))
}
