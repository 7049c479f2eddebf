//! `CoverageGrid` — the append-only set of visited cells.

use crate::{CellKey, LineCells};

/// Visited-cell set.  FxHash with the `fx-hash` feature, SipHash otherwise.
#[cfg(feature = "fx-hash")]
pub type CellSet = rustc_hash::FxHashSet<CellKey>;
#[cfg(not(feature = "fx-hash"))]
pub type CellSet = std::collections::HashSet<CellKey>;

/// Sparse record of every cell any probe has crossed.
///
/// Entries are never removed, so [`len`](Self::len) is non-decreasing over
/// the lifetime of a grid.  Marking an already-visited cell is a no-op that
/// does not count as new coverage.
#[derive(Debug, Default, Clone)]
pub struct CoverageGrid {
    cells:     CellSet,
    last_cell: Option<CellKey>,
}

impl CoverageGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark one cell.  Returns `true` if it had not been visited before.
    #[inline]
    pub fn mark(&mut self, key: CellKey) -> bool {
        self.last_cell = Some(key);
        self.cells.insert(key)
    }

    /// Mark every cell on the segment `(x0, y0) → (x1, y1)`, both endpoints
    /// included.  Returns the number of newly marked cells.
    pub fn rasterize(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) -> usize {
        self.rasterize_segment(CellKey::new(x0, y0), CellKey::new(x1, y1))
    }

    /// [`rasterize`](Self::rasterize) taking cell keys.
    pub fn rasterize_segment(&mut self, from: CellKey, to: CellKey) -> usize {
        self.merge(LineCells::new(from, to))
    }

    /// Mark a batch of cells in iteration order.  Returns the newly marked
    /// count.  Used to apply per-probe cell lists collected off-thread.
    pub fn merge<I>(&mut self, cells: I) -> usize
    where
        I: IntoIterator<Item = CellKey>,
    {
        cells.into_iter().filter(|&key| self.mark(key)).count()
    }

    #[inline]
    pub fn contains(&self, key: CellKey) -> bool {
        self.cells.contains(&key)
    }

    /// Number of explored cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The most recent cell touched by marking or rasterization.
    /// Diagnostic only.
    #[inline]
    pub fn last_cell(&self) -> Option<CellKey> {
        self.last_cell
    }

    /// Visited cells in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = CellKey> + '_ {
        self.cells.iter().copied()
    }
}
