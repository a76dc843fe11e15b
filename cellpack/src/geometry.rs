/// An axis-aligned rectangle with its origin in the top-left corner.
///
/// Used both for the free cells tracked during a search and for the final
/// placement of each entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub pos: (u32, u32),
    pub size: (u32, u32),
}

impl Rect {
    #[inline]
    pub fn new(pos: (u32, u32), size: (u32, u32)) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.size.0
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.size.1
    }

    #[inline]
    pub fn area(&self) -> u64 {
        u64::from(self.size.0) * u64::from(self.size.1)
    }

    /// The exclusive bottom-right corner.
    #[inline]
    pub fn max(&self) -> (u32, u32) {
        (self.pos.0 + self.size.0, self.pos.1 + self.size.1)
    }

    /// Whether a rectangle of the given size would fit inside this one.
    #[inline]
    pub fn can_hold(&self, size: (u32, u32)) -> bool {
        self.size.0 >= size.0 && self.size.1 >= size.1
    }

    pub fn contains(&self, other: &Rect) -> bool {
        let (max_x, max_y) = self.max();
        let (other_max_x, other_max_y) = other.max();

        other.pos.0 >= self.pos.0
            && other.pos.1 >= self.pos.1
            && other_max_x <= max_x
            && other_max_y <= max_y
    }

    /// Rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        let (max_x, max_y) = self.max();
        let (other_max_x, other_max_y) = other.max();

        let x_overlap = self.pos.0 < other_max_x && other.pos.0 < max_x;
        let y_overlap = self.pos.1 < other_max_y && other.pos.1 < max_y;

        x_overlap && y_overlap
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn area_does_not_overflow() {
        let rect = Rect::new((0, 0), (u32::MAX, u32::MAX));
        assert_eq!(rect.area(), u64::from(u32::MAX) * u64::from(u32::MAX));
    }

    #[test]
    fn touching_edges() {
        let a = Rect::new((0, 0), (10, 10));
        let right = Rect::new((10, 0), (5, 10));
        let below = Rect::new((0, 10), (10, 5));

        assert!(!a.intersects(&right));
        assert!(!a.intersects(&below));
    }

    #[test]
    fn overlapping() {
        let a = Rect::new((0, 0), (10, 10));
        let b = Rect::new((9, 9), (10, 10));

        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn nested() {
        let outer = Rect::new((0, 0), (10, 10));
        let inner = Rect::new((2, 3), (4, 4));

        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
        assert!(outer.intersects(&inner));
    }

    #[test]
    fn can_hold() {
        let cell = Rect::new((4, 4), (8, 3));

        assert!(cell.can_hold((8, 3)));
        assert!(cell.can_hold((1, 1)));
        assert!(!cell.can_hold((9, 1)));
        assert!(!cell.can_hold((1, 4)));
    }
}
