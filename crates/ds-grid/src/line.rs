//! Symmetric integer line walker.
//!
//! Classic all-octant Bresenham: the error term tracks both axes at once,
//! so the same loop handles every slope sign and magnitude without
//! floating point.  Consecutive cells are always 8-connected and both
//! endpoints are included.

use std::iter::FusedIterator;

use crate::CellKey;

/// Iterator over every cell on the segment `from → to`, inclusive.
///
/// A degenerate segment (`from == to`) yields exactly one cell.
#[derive(Clone, Debug)]
pub struct LineCells {
    x:    i64,
    y:    i64,
    x1:   i64,
    y1:   i64,
    dx:   i64,
    dy:   i64,
    sx:   i64,
    sy:   i64,
    err:  i64,
    done: bool,
}

impl LineCells {
    pub fn new(from: CellKey, to: CellKey) -> Self {
        let (x0, y0) = (from.x as i64, from.y as i64);
        let (x1, y1) = (to.x as i64, to.y as i64);
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        Self {
            x: x0,
            y: y0,
            x1,
            y1,
            dx,
            dy,
            sx: if x0 < x1 { 1 } else { -1 },
            sy: if y0 < y1 { 1 } else { -1 },
            err: dx + dy,
            done: false,
        }
    }

    fn remaining(&self) -> usize {
        if self.done {
            return 0;
        }
        let rx = (self.x1 - self.x).unsigned_abs();
        let ry = (self.y1 - self.y).unsigned_abs();
        rx.max(ry) as usize + 1
    }
}

impl Iterator for LineCells {
    type Item = CellKey;

    fn next(&mut self) -> Option<CellKey> {
        if self.done {
            return None;
        }
        // Coordinates stay between the two i32 endpoints.
        let current = CellKey::new(self.x as i32, self.y as i32);
        if self.x == self.x1 && self.y == self.y1 {
            self.done = true;
            return Some(current);
        }
        let e2 = 2 * self.err;
        if e2 >= self.dy {
            self.err += self.dy;
            self.x += self.sx;
        }
        if e2 <= self.dx {
            self.err += self.dx;
            self.y += self.sy;
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

impl ExactSizeIterator for LineCells {}

impl FusedIterator for LineCells {}
