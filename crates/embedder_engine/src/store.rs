use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use embedder_core::CellPosition;
use serde::{Deserialize, Serialize};

use crate::output::write_bytes_atomic;
use crate::workbook::{ImageDisplay, Workbook, WorkbookError, WorkbookStore};

/// On-disk shape of the JSON grid document. Maps are ordered so that saving
/// the same workbook twice produces byte-identical files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct GridDocument {
    rows: Vec<Vec<String>>,
    #[serde(default)]
    images: BTreeMap<String, EmbeddedImage>,
    #[serde(default)]
    column_widths: BTreeMap<u32, f64>,
    #[serde(default)]
    row_heights: BTreeMap<u32, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct EmbeddedImage {
    png: Vec<u8>,
    one_cell_anchor: bool,
    lock_aspect_ratio: bool,
    auto_fit: bool,
}

fn image_key(pos: CellPosition) -> String {
    format!("{}:{}", pos.col, pos.row)
}

/// In-memory workbook over a plain string grid.
///
/// This is the reference container implementation: tests run the whole
/// pipeline against it, and it documents what a real XLSX binding has to
/// provide. Saved as a JSON grid document.
#[derive(Debug, Clone, Default)]
pub struct MemoryWorkbook {
    doc: GridDocument,
}

impl MemoryWorkbook {
    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        Self {
            doc: GridDocument {
                rows,
                ..GridDocument::default()
            },
        }
    }

    /// PNG bytes embedded at `pos`, if any.
    pub fn image_at(&self, pos: CellPosition) -> Option<&[u8]> {
        self.doc
            .images
            .get(&image_key(pos))
            .map(|img| img.png.as_slice())
    }

    pub fn cell_text(&self, pos: CellPosition) -> Option<&str> {
        self.doc
            .rows
            .get(pos.row as usize)
            .and_then(|row| row.get(pos.col as usize))
            .map(String::as_str)
    }
}

impl Workbook for MemoryWorkbook {
    fn rows(&self) -> &[Vec<String>] {
        &self.doc.rows
    }

    fn set_cell_text(&mut self, pos: CellPosition, value: &str) {
        let row_idx = pos.row as usize;
        let col_idx = pos.col as usize;
        if self.doc.rows.len() <= row_idx {
            self.doc.rows.resize_with(row_idx + 1, Vec::new);
        }
        let row = &mut self.doc.rows[row_idx];
        if row.len() <= col_idx {
            row.resize(col_idx + 1, String::new());
        }
        row[col_idx] = value.to_string();
    }

    fn set_cell_image(
        &mut self,
        pos: CellPosition,
        bytes: Vec<u8>,
        display: &ImageDisplay,
    ) -> bool {
        if bytes.is_empty() {
            return false;
        }
        self.doc.images.insert(
            image_key(pos),
            EmbeddedImage {
                png: bytes,
                one_cell_anchor: display.one_cell_anchor,
                lock_aspect_ratio: display.lock_aspect_ratio,
                auto_fit: display.auto_fit,
            },
        );
        true
    }

    fn set_column_width(&mut self, col: u32, chars: f64) -> Result<(), WorkbookError> {
        self.doc.column_widths.insert(col, chars);
        Ok(())
    }

    fn set_row_height(&mut self, row: u32, points: f64) -> Result<(), WorkbookError> {
        self.doc.row_heights.insert(row, points);
        Ok(())
    }

    fn save_as(&self, path: &Path) -> Result<(), WorkbookError> {
        let content = serde_json::to_vec_pretty(&self.doc)
            .map_err(|err| WorkbookError::Malformed(err.to_string()))?;
        write_bytes_atomic(path, &content)?;
        Ok(())
    }
}

/// Store reading JSON grid documents from disk.
#[derive(Debug, Clone, Default)]
pub struct JsonWorkbookStore;

impl WorkbookStore for JsonWorkbookStore {
    fn open(&self, path: &Path) -> Result<Box<dyn Workbook>, WorkbookError> {
        let content = fs::read(path)?;
        let doc: GridDocument = serde_json::from_slice(&content)
            .map_err(|err| WorkbookError::Malformed(err.to_string()))?;
        Ok(Box::new(MemoryWorkbook { doc }))
    }
}
