use cellpack::RectanglePacker;

struct Glyph {
    character: char,
    size: (u32, u32),
}

fn main() -> Result<(), cellpack::PackError> {
    env_logger::init();

    let glyphs: Vec<_> = "abcdefghijklmnopqrstuvwxyz"
        .chars()
        .enumerate()
        .map(|(i, character)| Glyph {
            character,
            size: (6 + (i as u32 % 5), 9 + (i as u32 % 4)),
        })
        .collect();

    let mut packer = RectanglePacker::new(64);
    for glyph in &glyphs {
        packer.add_rectangle(glyph.character.to_string(), glyph.size, glyph)?;
    }

    let result = packer.pack()?;
    let canvas = result.canvas_size();

    println!(
        "{} glyphs in {}x{} ({:.1}% used, {} trials)",
        result.len(),
        canvas.0,
        canvas.1,
        result.occupancy() * 100.0,
        result.trials()
    );

    for placement in result.placements() {
        let glyph = placement.payload();
        let ((u0, v0), (u1, v1)) = placement.uv(canvas);

        println!(
            "'{}' at {:?}, uv ({:.3}, {:.3}) - ({:.3}, {:.3})",
            glyph.character,
            placement.position(),
            u0,
            v0,
            u1,
            v1
        );
    }

    Ok(())
}
