/// Coordinate of one grid cell, usable as a map key.
///
/// `row` counts from the top of the sheet, so the header row is row 0 and
/// data rows start at 1. Two positions are equal iff both components match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellPosition {
    pub col: u32,
    pub row: u32,
}

impl CellPosition {
    pub fn new(col: u32, row: u32) -> Self {
        Self { col, row }
    }
}
