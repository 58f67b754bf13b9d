use std::collections::BTreeMap;

use super::loader::LoadError;
use super::model::Element;

/// Columns of the periodic table (groups 1–18).
pub const GRID_COLUMNS: usize = 18;
/// Seven periods, a spacer row and the two f-block rows.
pub const GRID_ROWS: usize = 10;

/// A 0-based position in the 18×10 grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GridCell {
    pub row: usize,
    pub column: usize,
}

impl GridCell {
    /// Convert the 1-based `xpos`/`ypos` of an element, if it lies inside the grid.
    pub fn of(element: &Element) -> Option<Self> {
        let (x, y) = (element.xpos as usize, element.ypos as usize);
        if (1..=GRID_COLUMNS).contains(&x) && (1..=GRID_ROWS).contains(&y) {
            Some(GridCell {
                column: x - 1,
                row: y - 1,
            })
        } else {
            None
        }
    }
}

/// Cell → element index lookup for a validated dataset.
#[derive(Debug, Clone, Default)]
pub struct PeriodicGrid {
    cells: BTreeMap<GridCell, usize>,
}

impl PeriodicGrid {
    /// Check that every element sits in its own in-range cell and index them.
    pub fn layout(elements: &[Element]) -> Result<Self, LoadError> {
        let mut cells = BTreeMap::new();
        for (idx, el) in elements.iter().enumerate() {
            let cell = GridCell::of(el).ok_or(LoadError::OutOfGrid {
                number: el.number,
                xpos: el.xpos,
                ypos: el.ypos,
            })?;
            if let Some(&other) = cells.get(&cell) {
                let first: &Element = &elements[other];
                return Err(LoadError::GridCollision {
                    first: first.number,
                    second: el.number,
                    xpos: el.xpos,
                    ypos: el.ypos,
                });
            }
            cells.insert(cell, idx);
        }
        Ok(PeriodicGrid { cells })
    }

    /// Index into the element slice of whatever occupies `cell`.
    pub fn element_at(&self, cell: GridCell) -> Option<usize> {
        self.cells.get(&cell).copied()
    }

    /// Occupied cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (GridCell, usize)> + '_ {
        self.cells.iter().map(|(c, i)| (*c, *i))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
