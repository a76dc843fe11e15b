use std::{collections::HashMap, fmt};

use crate::geometry::Rect;

/// A rectangle waiting to be packed.
///
/// `Entry` pairs a size with the key it was registered under and a reference
/// to whatever the caller wants to get back once the entry has been placed,
/// like a decoded image or a glyph. The packer never looks at the payload.
pub struct Entry<'a, T: ?Sized> {
    pub(crate) key: String,
    pub(crate) size: (u32, u32),
    pub(crate) payload: &'a T,
}

impl<'a, T: ?Sized> Entry<'a, T> {
    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    #[inline]
    pub fn payload(&self) -> &'a T {
        self.payload
    }

    pub(crate) fn area(&self) -> u64 {
        u64::from(self.size.0) * u64::from(self.size.1)
    }
}

impl<'a, T: ?Sized> fmt::Debug for Entry<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("key", &self.key)
            .field("size", &self.size)
            .finish()
    }
}

/// An entry that was placed by [`RectanglePacker::pack`].
///
/// [`RectanglePacker::pack`]: struct.RectanglePacker.html#method.pack
pub struct Placement<'a, T: ?Sized> {
    pub(crate) key: String,
    pub(crate) rect: Rect,
    pub(crate) payload: &'a T,
}

impl<'a, T: ?Sized> Placement<'a, T> {
    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    #[inline]
    pub fn position(&self) -> (u32, u32) {
        self.rect.pos
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        self.rect.size
    }

    #[inline]
    pub fn max(&self) -> (u32, u32) {
        self.rect.max()
    }

    #[inline]
    pub fn payload(&self) -> &'a T {
        self.payload
    }

    /// Normalized texture coordinates of this placement inside a canvas of
    /// the given size, as `((u0, v0), (u1, v1))`.
    pub fn uv(&self, canvas: (u32, u32)) -> ((f32, f32), (f32, f32)) {
        let (width, height) = (canvas.0 as f32, canvas.1 as f32);
        let (max_x, max_y) = self.rect.max();

        (
            (self.rect.pos.0 as f32 / width, self.rect.pos.1 as f32 / height),
            (max_x as f32 / width, max_y as f32 / height),
        )
    }
}

impl<'a, T: ?Sized> Clone for Placement<'a, T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            rect: self.rect,
            payload: self.payload,
        }
    }
}

impl<'a, T: ?Sized> fmt::Debug for Placement<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Placement")
            .field("key", &self.key)
            .field("rect", &self.rect)
            .finish()
    }
}

/// The outcome of a packing search.
///
/// A result is only valid if every entry was placed. Packing an empty
/// registry, or stopping at a search limit before any trial placed everything,
/// produces an invalid result with no placements.
pub struct PackResult<'a, T: ?Sized> {
    pub(crate) placements: Vec<Placement<'a, T>>,
    pub(crate) index: HashMap<String, usize>,
    pub(crate) canvas: (u32, u32),
    pub(crate) packed_area: u64,
    pub(crate) trials: u32,
}

impl<'a, T: ?Sized> PackResult<'a, T> {
    pub(crate) fn invalid(trials: u32) -> Self {
        Self {
            placements: Vec::new(),
            index: HashMap::new(),
            canvas: (0, 0),
            packed_area: 0,
            trials,
        }
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        !self.placements.is_empty()
    }

    /// The size of the canvas the placements fit in. The width is the right
    /// edge of the rightmost placement, not the width that was searched with.
    #[inline]
    pub fn canvas_size(&self) -> (u32, u32) {
        self.canvas
    }

    /// Width times height of the canvas.
    #[inline]
    pub fn area(&self) -> u64 {
        u64::from(self.canvas.0) * u64::from(self.canvas.1)
    }

    /// How many trial canvases the search went through.
    #[inline]
    pub fn trials(&self) -> u32 {
        self.trials
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// All placements, in the order their entries were added.
    #[inline]
    pub fn placements(&self) -> &[Placement<'a, T>] {
        &self.placements
    }

    pub fn get(&self, key: &str) -> Option<&Placement<'a, T>> {
        self.index.get(key).map(|&index| &self.placements[index])
    }

    /// The fraction of the canvas covered by placed rectangles.
    pub fn occupancy(&self) -> f64 {
        match self.area() {
            0 => 0.0,
            area => self.packed_area as f64 / area as f64,
        }
    }
}

impl<'a, T: ?Sized> Clone for PackResult<'a, T> {
    fn clone(&self) -> Self {
        Self {
            placements: self.placements.clone(),
            index: self.index.clone(),
            canvas: self.canvas,
            packed_area: self.packed_area,
            trials: self.trials,
        }
    }
}

impl<'a, T: ?Sized> fmt::Debug for PackResult<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PackResult")
            .field("valid", &self.is_valid())
            .field("canvas", &self.canvas)
            .field("trials", &self.trials)
            .field("placements", &self.placements)
            .finish()
    }
}
