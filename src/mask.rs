//! Layout masks: which cells of the rectangle belong to the playable shape.

use crate::cell_set::{CellSet, CellSetError};
use crate::config::MAX_SIZE;

/// Allow-list or block-list of coordinates. Cells excluded by the mask are void.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutMask {
    /// Every cell of the rectangle is playable.
    #[default]
    None,
    /// Only the listed cells are playable.
    Allow(CellSet),
    /// The listed cells are void.
    Block(CellSet),
}

impl LayoutMask {
    /// Mask keeping only `cells`.
    pub fn allow<I>(cells: I) -> Result<Self, CellSetError>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        Ok(LayoutMask::Allow(CellSet::try_from_iter(cells)?).normalized())
    }

    /// Mask voiding `cells`.
    pub fn block<I>(cells: I) -> Result<Self, CellSetError>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        Ok(LayoutMask::Block(CellSet::try_from_iter(cells)?).normalized())
    }

    /// Resolve an optional allow-set and block-set pair. A non-empty allow-set
    /// wins, an empty one falls back to the block-set, and two empty sets mean
    /// no mask at all.
    pub fn from_sets(allow: Option<CellSet>, block: Option<CellSet>) -> Self {
        match (allow, block) {
            (Some(a), _) if !a.is_empty() => LayoutMask::Allow(a),
            (_, Some(b)) if !b.is_empty() => LayoutMask::Block(b),
            _ => LayoutMask::None,
        }
    }

    /// Block mask of every `(row, col)` in `rows × cols` for which `blocked` holds.
    pub fn from_predicate(rows: usize, cols: usize, blocked: impl Fn(usize, usize) -> bool) -> Self {
        let mut set = CellSet::new();
        for row in 0..rows.min(MAX_SIZE) {
            for col in 0..cols.min(MAX_SIZE) {
                if blocked(row, col) {
                    // bounds are clamped above
                    let _ = set.insert(row, col);
                }
            }
        }
        LayoutMask::Block(set).normalized()
    }

    /// Collapse empty sets to [`LayoutMask::None`].
    pub fn normalized(self) -> Self {
        match self {
            LayoutMask::Allow(s) | LayoutMask::Block(s) if s.is_empty() => LayoutMask::None,
            other => other,
        }
    }

    /// True when the mask removes `(row, col)` from the playable area.
    #[inline]
    pub fn is_void(&self, row: usize, col: usize) -> bool {
        match self {
            LayoutMask::None => false,
            LayoutMask::Allow(set) => !set.contains(row, col),
            LayoutMask::Block(set) => set.contains(row, col),
        }
    }

    /// Void cells of a `rows × cols` board.
    pub fn void_cells(&self, rows: usize, cols: usize) -> CellSet {
        let mut set = CellSet::new();
        for row in 0..rows.min(MAX_SIZE) {
            for col in 0..cols.min(MAX_SIZE) {
                if self.is_void(row, col) {
                    let _ = set.insert(row, col);
                }
            }
        }
        set
    }

    /// Number of cells of a `rows × cols` board left playable by the mask.
    pub fn playable_count(&self, rows: usize, cols: usize) -> usize {
        rows * cols - self.void_cells(rows, cols).len()
    }
}
