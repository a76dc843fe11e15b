//! Tracks the empty space left in the canvas during a single trial.
//!
//! The cells are kept in a flat `Vec` and scanned linearly. Atlases hold tens
//! to low hundreds of rectangles, where a spatial index would cost more than
//! it saves.

use crate::geometry::Rect;

#[derive(Debug, Default)]
pub(crate) struct FreeCells {
    cells: Vec<Rect>,
}

impl FreeCells {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every cell and starts over with one cell spanning the canvas.
    pub fn reset(&mut self, canvas: (u32, u32)) {
        self.cells.clear();
        self.insert(Rect::new((0, 0), canvas));
    }

    #[cfg(test)]
    pub fn cells(&self) -> &[Rect] {
        &self.cells
    }

    /// Finds the smallest cell that can hold a rectangle of the given size.
    /// The first cell found wins between cells of equal area.
    pub fn best_fit(&self, size: (u32, u32)) -> Option<usize> {
        let mut best: Option<(usize, u64)> = None;

        for (index, cell) in self.cells.iter().enumerate() {
            if !cell.can_hold(size) {
                continue;
            }

            let area = cell.area();
            match best {
                Some((_, best_area)) if best_area <= area => {}
                _ => best = Some((index, area)),
            }
        }

        best.map(|(index, _)| index)
    }

    /// Removes a cell, keeping the order of the remaining cells.
    pub fn take(&mut self, index: usize) -> Rect {
        self.cells.remove(index)
    }

    pub fn insert(&mut self, cell: Rect) {
        if cell.area() > 0 {
            self.cells.push(cell);
        }
    }

    /// Returns the space left over after placing a rectangle of `size` in
    /// the top-left corner of `cell`: first the strip to the right of the
    /// rectangle, then the strip below it spanning the full cell width.
    pub fn split(&mut self, cell: Rect, size: (u32, u32)) {
        let right = Rect::new(
            (cell.pos.0 + size.0, cell.pos.1),
            (cell.size.0 - size.0, size.1),
        );
        let bottom = Rect::new(
            (cell.pos.0, cell.pos.1 + size.1),
            (cell.size.0, cell.size.1 - size.1),
        );

        self.insert(right);
        self.insert(bottom);
    }

    /// Places a rectangle into the best fitting cell, returning its origin.
    pub fn place(&mut self, size: (u32, u32)) -> Option<(u32, u32)> {
        let index = self.best_fit(size)?;
        let cell = self.take(index);
        self.split(cell, size);

        Some(cell.pos)
    }
}
