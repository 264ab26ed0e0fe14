use std::path::Path;

use embedder_core::CellPosition;

/// Display policy applied to every embedded image.
#[derive(Debug, Clone)]
pub struct ImageDisplay {
    /// Column width in Excel character units.
    pub column_width_chars: f64,
    /// Row height in points.
    pub row_height_points: f64,
    /// Anchor the picture to its single cell instead of an absolute offset.
    pub one_cell_anchor: bool,
    pub lock_aspect_ratio: bool,
    pub auto_fit: bool,
}

impl Default for ImageDisplay {
    fn default() -> Self {
        Self {
            column_width_chars: 8.0,
            row_height_points: 60.0,
            one_cell_anchor: true,
            lock_aspect_ratio: true,
            auto_fit: true,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WorkbookError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed workbook: {0}")]
    Malformed(String),
}

/// Spreadsheet container seam.
///
/// The engine only ever reads a string grid and writes back individual cells;
/// the actual file format lives behind this trait. Implementations are
/// mutated by the single-threaded placement step only, never from fetch
/// tasks.
pub trait Workbook: Send {
    /// Full cell grid, row 0 being the header row.
    fn rows(&self) -> &[Vec<String>];

    fn set_cell_text(&mut self, pos: CellPosition, value: &str);

    /// Embed image bytes at `pos`. Returns false when the container rejects
    /// the picture.
    fn set_cell_image(&mut self, pos: CellPosition, bytes: Vec<u8>, display: &ImageDisplay)
        -> bool;

    /// Presentation tweaks; callers treat failures as best-effort.
    fn set_column_width(&mut self, col: u32, chars: f64) -> Result<(), WorkbookError>;
    fn set_row_height(&mut self, row: u32, points: f64) -> Result<(), WorkbookError>;

    fn save_as(&self, path: &Path) -> Result<(), WorkbookError>;
}

/// Opens workbooks from disk locations.
pub trait WorkbookStore: Send + Sync {
    fn open(&self, path: &Path) -> Result<Box<dyn Workbook>, WorkbookError>;
}
