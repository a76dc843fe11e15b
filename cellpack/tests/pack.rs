use cellpack::{PackError, PackResult, RectanglePacker};

fn assert_well_formed<T: ?Sized>(result: &PackResult<'_, T>, max_width: u32) {
    assert!(result.is_valid());

    let canvas = result.canvas_size();
    assert!(canvas.0 <= max_width);

    for placement in result.placements() {
        let (max_x, max_y) = placement.max();
        assert!(
            max_x <= canvas.0 && max_y <= canvas.1,
            "{:?} is outside of the {}x{} canvas",
            placement,
            canvas.0,
            canvas.1
        );
    }

    let placements = result.placements();
    for (i, a) in placements.iter().enumerate() {
        for b in &placements[i + 1..] {
            assert!(
                !a.rect().intersects(&b.rect()),
                "{:?} overlaps {:?}",
                a,
                b
            );
        }
    }
}

fn describe<T: ?Sized>(result: &PackResult<'_, T>) -> String {
    let canvas = result.canvas_size();
    let mut lines = vec![format!(
        "canvas {}x{} ({} trials)",
        canvas.0,
        canvas.1,
        result.trials()
    )];

    for placement in result.placements() {
        let pos = placement.position();
        let size = placement.size();
        lines.push(format!(
            "{} ({}, {}) {}x{}",
            placement.key(),
            pos.0,
            pos.1,
            size.0,
            size.1
        ));
    }

    lines.join("\n")
}

/// A small set whose search grows the canvas, shrinks it, and settles on a
/// packing that is narrower than the first one found.
fn small_set(packer: &mut RectanglePacker<'_, ()>) {
    packer.add_rectangle("a", (5, 3), &()).unwrap();
    packer.add_rectangle("b", (3, 3), &()).unwrap();
    packer.add_rectangle("c", (2, 2), &()).unwrap();
}

#[test]
fn three_rectangles() {
    let _ = env_logger::try_init();

    let mut packer = RectanglePacker::new(200);
    packer.add_rectangle("A", (100, 50), &()).unwrap();
    packer.add_rectangle("B", (80, 80), &()).unwrap();
    packer.add_rectangle("C", (60, 30), &()).unwrap();

    let result = packer.pack().unwrap();

    assert_well_formed(&result, 200);
    assert_eq!(result.len(), 3);
    assert!(result.canvas_size().1 >= 80);

    for key in &["A", "B", "C"] {
        assert!(result.get(key).is_some(), "{} was not placed", key);
    }

    assert_eq!(result.get("B").unwrap().size(), (80, 80));
}

#[test]
fn empty_is_invalid() {
    let packer: RectanglePacker<'_, ()> = RectanglePacker::new(200);
    let result = packer.pack().unwrap();

    assert!(!result.is_valid());
    assert!(result.is_empty());
    assert_eq!(result.trials(), 0);
}

#[test]
fn single_rectangle() {
    let mut packer = RectanglePacker::new(100);
    packer.add_rectangle("solo", (50, 50), &()).unwrap();

    let result = packer.pack().unwrap();

    assert!(result.is_valid());
    assert_eq!(result.canvas_size(), (50, 50));
    assert_eq!(result.area(), 2500);
    assert_eq!(result.get("solo").unwrap().position(), (0, 0));
    assert_eq!(result.occupancy(), 1.0);
}

#[test]
fn first_packing_narrows_to_its_right_edge() {
    let mut packer = RectanglePacker::new(100);
    packer.add_rectangle("solo", (50, 50), &()).unwrap();

    let result = packer.pack().unwrap();

    // The next width tried after 100 is 49, which is already too narrow.
    assert_eq!(result.trials(), 1);
    assert_eq!(result.canvas_size(), (50, 50));
}

#[test]
fn height_growth_stops_before_overflowing() {
    let mut packer = RectanglePacker::new(15);
    packer.add_rectangle("tall", (10, u32::MAX), &()).unwrap();
    packer.add_rectangle("short", (10, 1), &()).unwrap();

    let result = packer.pack().unwrap();

    assert!(!result.is_valid());
    assert_eq!(result.trials(), 1);
}

#[test]
fn too_wide_is_reported() {
    let mut packer = RectanglePacker::new(200);

    let err = packer.add_rectangle("huge", (500, 10), &()).unwrap_err();
    assert_eq!(
        err,
        PackError::TooWide {
            key: "huge".to_owned(),
            width: 500,
            max_width: 200,
        }
    );

    assert!(!packer.pack().unwrap().is_valid());
}

#[test]
fn narrowing_after_adding_is_reported() {
    let mut packer = RectanglePacker::new(200);
    packer.add_rectangle("wide", (150, 10), &()).unwrap();
    packer.set_max_width(100);

    match packer.pack() {
        Err(PackError::TooWide { key, .. }) => assert_eq!(key, "wide"),
        other => panic!("expected TooWide, got {:?}", other),
    }
}

#[test]
fn small_set_search() {
    let mut packer = RectanglePacker::new(8);
    small_set(&mut packer);

    let result = packer.pack().unwrap();
    assert_well_formed(&result, 8);

    insta::assert_snapshot!(describe(&result), @r###"
    canvas 5x6 (7 trials)
    a (0, 0) 5x3
    b (0, 3) 3x3
    c (3, 3) 2x2
    "###);
}

#[test]
fn trial_limit() {
    let mut packer = RectanglePacker::new(8).max_trials(2);
    small_set(&mut packer);

    let result = packer.pack().unwrap();
    assert!(!result.is_valid());
    assert_eq!(result.trials(), 2);

    let mut packer = RectanglePacker::new(8).max_trials(3);
    small_set(&mut packer);

    let result = packer.pack().unwrap();
    assert_well_formed(&result, 8);
    assert_eq!(result.canvas_size(), (8, 5));
    assert_eq!(result.trials(), 3);
}

#[test]
fn height_limit() {
    let mut packer = RectanglePacker::new(8).max_height(4);
    small_set(&mut packer);

    let result = packer.pack().unwrap();
    assert!(!result.is_valid());

    let mut packer = RectanglePacker::new(8).max_height(5);
    small_set(&mut packer);

    let result = packer.pack().unwrap();
    assert_well_formed(&result, 8);
    assert_eq!(result.canvas_size(), (8, 5));
    assert_eq!(result.get("c").unwrap().position(), (0, 3));
}

#[test]
fn equal_heights_keep_insertion_order() {
    let mut packer = RectanglePacker::new(30);
    packer.add_rectangle("first", (10, 10), &()).unwrap();
    packer.add_rectangle("second", (10, 10), &()).unwrap();
    packer.add_rectangle("third", (10, 10), &()).unwrap();

    let result = packer.pack().unwrap();

    assert_eq!(result.canvas_size(), (30, 10));
    assert_eq!(result.get("first").unwrap().position(), (0, 0));
    assert_eq!(result.get("second").unwrap().position(), (10, 0));
    assert_eq!(result.get("third").unwrap().position(), (20, 0));
}

#[test]
fn repeated_packing_is_identical() {
    let sizes = generated_sizes(40, 32);

    let mut packer = RectanglePacker::new(128);
    for (i, &size) in sizes.iter().enumerate() {
        packer.add_rectangle(format!("item{}", i), size, &()).unwrap();
    }

    let first = packer.pack().unwrap();
    let second = packer.pack().unwrap();

    assert_eq!(first.canvas_size(), second.canvas_size());
    assert_eq!(first.trials(), second.trials());

    let first_rects: Vec<_> = first.placements().iter().map(|p| p.rect()).collect();
    let second_rects: Vec<_> = second.placements().iter().map(|p| p.rect()).collect();
    assert_eq!(first_rects, second_rects);
}

#[test]
fn generated_sets_are_well_formed() {
    for &(count, max_side, max_width) in &[(1, 16, 16), (12, 20, 40), (40, 32, 128), (60, 9, 24)] {
        let sizes = generated_sizes(count, max_side);

        let mut packer = RectanglePacker::new(max_width);
        for (i, &size) in sizes.iter().enumerate() {
            packer.add_rectangle(format!("item{}", i), size, &()).unwrap();
        }

        let result = packer.pack().unwrap();

        assert_well_formed(&result, max_width);
        assert_eq!(result.len(), count);
        assert!(result.area() >= packer.total_area());
    }
}

#[test]
fn payloads_are_borrowed_through() {
    let names = vec!["grass".to_owned(), "stone".to_owned()];

    let mut packer = RectanglePacker::new(64);
    packer.add_rectangle("grass.png", (16, 16), &names[0]).unwrap();
    packer.add_rectangle("stone.png", (16, 32), &names[1]).unwrap();

    let result = packer.pack().unwrap();

    assert!(std::ptr::eq(
        result.get("grass.png").unwrap().payload(),
        &names[0]
    ));
    assert_eq!(result.get("stone.png").unwrap().payload(), "stone");
}

#[test]
fn clearing_between_packs() {
    let mut packer = RectanglePacker::new(100);
    packer.add_rectangle("solo", (50, 50), &()).unwrap();
    assert!(packer.pack().unwrap().is_valid());

    packer.clear();
    assert!(!packer.pack().unwrap().is_valid());

    packer.add_rectangle("solo", (20, 10), &()).unwrap();
    assert_eq!(packer.pack().unwrap().canvas_size(), (20, 10));
}

/// Deterministic pseudo-random sizes between 1 and `max_side`.
fn generated_sizes(count: usize, max_side: u32) -> Vec<(u32, u32)> {
    let mut state: u32 = 0x2545_f491;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        state % max_side + 1
    };

    (0..count).map(|_| (next(), next())).collect()
}
