use std::io::{self, Write};

use anyhow::bail;
use cellpack::{PackResult, RectanglePacker};

use crate::{
    asset_name::AssetName,
    data::{Layout, LayoutRect, Manifest},
    options::{GlobalOptions, PlanOptions},
};

pub fn plan(global: GlobalOptions, options: PlanOptions) -> anyhow::Result<()> {
    let mut layout = Layout::read_from_file(&options.layout_path)?;
    if let Some(max_width) = global.max_width {
        layout.max_width = max_width;
    }

    let manifest = plan_layout(&layout)?;

    match options.output {
        Some(path) => manifest.write_to_file(path)?,
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();

            manifest.write(&mut handle)?;
            writeln!(handle)?;
        }
    }

    Ok(())
}

fn plan_layout(layout: &Layout) -> anyhow::Result<Manifest> {
    let mut packer = RectanglePacker::new(layout.max_width);
    if let Some(max_height) = layout.max_height {
        packer = packer.max_height(max_height);
    }
    if let Some(max_trials) = layout.max_trials {
        packer = packer.max_trials(max_trials);
    }

    for rect in &layout.rects {
        packer.add_rectangle(rect.name.as_str(), (rect.width, rect.height), rect)?;
    }

    let result = packer.pack()?;

    if !result.is_valid() && !layout.rects.is_empty() {
        bail!(
            "Could not fit {} rectangles within the layout's size limits",
            layout.rects.len()
        );
    }

    if layout.rects.is_empty() {
        log::warn!("Layout has no rectangles to pack");
    } else {
        log::info!(
            "Packed {} rectangles into {}x{} after {} trials",
            result.len(),
            result.canvas_size().0,
            result.canvas_size().1,
            result.trials()
        );
    }

    Ok(manifest_from_result(&result))
}

fn manifest_from_result(result: &PackResult<'_, LayoutRect>) -> Manifest {
    let mut manifest = Manifest::new(result.canvas_size());

    for placement in result.placements() {
        manifest.insert(AssetName::from(placement.key()), placement.rect());
    }

    manifest
}
