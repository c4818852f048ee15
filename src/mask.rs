//! Per-pixel classification flags, packed one byte per pixel of the
//! rendered buffer.

const CHECKED: u8 = 1;
const QUEUED: u8 = 2;
const PAINTABLE: u8 = 4;
const NOT_PAINTABLE: u8 = 8;
const COLORED: u8 = 16;

/// The classification buffer, co-indexed with the rendered raster. Bits
/// accumulate monotonically during a fill, except the paintability pair,
/// which is invalidated wholesale when the seed color changes.
pub struct TraceMap {
    pub width: usize,
    pub height: usize,

    cells: Vec<u8>,
}

impl TraceMap {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![0; width * height],
        }
    }

    fn cell(&self, x: usize, y: usize) -> u8 {
        self.cells[x + y * self.width]
    }

    pub fn is_checked(&self, x: usize, y: usize) -> bool {
        self.cell(x, y) & CHECKED != 0
    }

    pub fn is_queued(&self, x: usize, y: usize) -> bool {
        self.cell(x, y) & QUEUED != 0
    }

    pub fn is_colored(&self, x: usize, y: usize) -> bool {
        self.cell(x, y) & COLORED != 0
    }

    /// Whether paintability has been decided for this pixel: exactly one of
    /// the PAINTABLE/NOT_PAINTABLE flags is set.
    pub fn paintability_known(&self, x: usize, y: usize) -> bool {
        let cell = self.cell(x, y);

        (cell & PAINTABLE != 0) != (cell & NOT_PAINTABLE != 0)
    }

    /// Only meaningful when [`Self::paintability_known`] holds.
    pub fn is_paintable(&self, x: usize, y: usize) -> bool {
        self.cell(x, y) & PAINTABLE != 0
    }

    pub fn mark_checked(&mut self, x: usize, y: usize) {
        self.cells[x + y * self.width] |= CHECKED;
    }

    pub fn mark_queued(&mut self, x: usize, y: usize) {
        self.cells[x + y * self.width] |= QUEUED;
    }

    pub fn mark_colored(&mut self, x: usize, y: usize) {
        self.cells[x + y * self.width] |= COLORED;
    }

    pub fn mark_paintable(&mut self, x: usize, y: usize) {
        let cell = &mut self.cells[x + y * self.width];
        *cell = (*cell | PAINTABLE) & !NOT_PAINTABLE;
    }

    pub fn mark_not_paintable(&mut self, x: usize, y: usize) {
        let cell = &mut self.cells[x + y * self.width];
        *cell = (*cell | NOT_PAINTABLE) & !PAINTABLE;
    }

    /// Forget every cached paintability decision. Used when the fill switches
    /// to a new, unrelated seed color.
    pub fn invalidate_paintability(&mut self) {
        for cell in self.cells.iter_mut() {
            *cell &= !(PAINTABLE | NOT_PAINTABLE);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_flags_are_idempotent() {
        let mut t = TraceMap::new(4, 4);

        assert!(!t.is_checked(1, 1));
        t.mark_checked(1, 1);
        t.mark_checked(1, 1);
        assert!(t.is_checked(1, 1));

        t.mark_queued(1, 1);
        t.mark_colored(1, 1);
        assert!(t.is_queued(1, 1));
        assert!(t.is_colored(1, 1));
        assert!(!t.is_checked(0, 1));
    }

    #[test]
    fn test_paintability_mutual_exclusion() {
        let mut t = TraceMap::new(2, 2);

        assert!(!t.paintability_known(0, 0));

        t.mark_paintable(0, 0);
        assert!(t.paintability_known(0, 0));
        assert!(t.is_paintable(0, 0));

        // Flipping the decision clears the other flag.
        t.mark_not_paintable(0, 0);
        assert!(t.paintability_known(0, 0));
        assert!(!t.is_paintable(0, 0));

        t.mark_paintable(0, 0);
        assert!(t.is_paintable(0, 0));
    }

    #[test]
    fn test_invalidate_paintability() {
        let mut t = TraceMap::new(2, 2);

        t.mark_paintable(0, 0);
        t.mark_not_paintable(1, 0);
        t.mark_checked(0, 0);
        t.mark_colored(0, 0);

        t.invalidate_paintability();

        assert!(!t.paintability_known(0, 0));
        assert!(!t.paintability_known(1, 0));
        // Other flags survive the sweep.
        assert!(t.is_checked(0, 0));
        assert!(t.is_colored(0, 0));
    }
}
