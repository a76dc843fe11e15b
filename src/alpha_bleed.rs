//! Changes pixels in an image that are totally transparent to the average
//! color of their nearest non-transparent neighbors. Without this, filtering
//! an atlas on the GPU blends the transparent black around each sprite into
//! its edges.

use std::collections::VecDeque;

use crate::image::{Image, Pixel};

pub(crate) fn alpha_bleed(img: &mut Image) {
    let (w, h) = img.size();

    // Pixels that already hold a color that is safe to sample from. Starts
    // out as every pixel that isn't totally transparent.
    let mut can_be_sampled = Mask2::new(w, h);

    // Pixels that have been queued at some point and don't need queueing
    // again.
    let mut visited = Mask2::new(w, h);

    // Pixels to bleed into next, filled outwards from the opaque pixels one
    // ring at a time.
    let mut to_visit = VecDeque::new();

    let adjacent_positions = |x: u32, y: u32| {
        DIRECTIONS.iter().filter_map(move |&(x_offset, y_offset)| {
            let x_source = x as i64 + x_offset;
            let y_source = y as i64 + y_offset;

            if x_source < 0 || y_source < 0 || x_source >= w as i64 || y_source >= h as i64 {
                return None;
            }

            Some((x_source as u32, y_source as u32))
        })
    };

    for y in 0..h {
        for x in 0..w {
            if img.get_pixel((x, y)).a != 0 {
                can_be_sampled.set(x, y);
                visited.set(x, y);
                continue;
            }

            let borders_opaque = adjacent_positions(x, y)
                .any(|(x_source, y_source)| img.get_pixel((x_source, y_source)).a != 0);

            if borders_opaque {
                visited.set(x, y);
                to_visit.push_back((x, y));
            }
        }
    }

    while let Some((x, y)) = to_visit.pop_front() {
        let mut new_color = (0u32, 0u32, 0u32);
        let mut contributing = 0u32;

        for (x_source, y_source) in adjacent_positions(x, y) {
            if can_be_sampled.get(x_source, y_source) {
                let source = img.get_pixel((x_source, y_source));

                contributing += 1;
                new_color.0 += u32::from(source.r);
                new_color.1 += u32::from(source.g);
                new_color.2 += u32::from(source.b);
            } else if !visited.get(x_source, y_source) {
                visited.set(x_source, y_source);
                to_visit.push_back((x_source, y_source));
            }
        }

        // Every queued pixel borders the pixel that queued it, which is
        // sampleable by the time this one is popped, so contributing > 0.
        let pixel = Pixel::new(
            (new_color.0 / contributing) as u8,
            (new_color.1 / contributing) as u8,
            (new_color.2 / contributing) as u8,
            0,
        );

        img.set_pixel((x, y), pixel);
        can_be_sampled.set(x, y);
    }
}

const DIRECTIONS: &[(i64, i64)] = &[
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

struct Mask2 {
    width: u32,
    data: Vec<bool>,
}

impl Mask2 {
    fn new(w: u32, h: u32) -> Self {
        Self {
            width: w,
            data: vec![false; w as usize * h as usize],
        }
    }

    fn get(&self, x: u32, y: u32) -> bool {
        self.data[x as usize + y as usize * self.width as usize]
    }

    fn set(&mut self, x: u32, y: u32) {
        self.data[x as usize + y as usize * self.width as usize] = true;
    }
}
