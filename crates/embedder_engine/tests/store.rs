use std::fs;

use embedder_engine::{
    derive_output_path, CellPosition, ImageDisplay, JsonWorkbookStore, MemoryWorkbook, Workbook,
    WorkbookStore,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn sample_rows() -> Vec<Vec<String>> {
    vec![
        vec!["id".to_string(), "image".to_string()],
        vec!["1".to_string(), "http://example.com/a.png".to_string()],
    ]
}

#[test]
fn save_and_reopen_roundtrips_the_grid() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("grid.json");

    let mut workbook = MemoryWorkbook::from_rows(sample_rows());
    let pos = CellPosition::new(1, 1);
    workbook.set_cell_text(pos, "");
    assert!(workbook.set_cell_image(pos, vec![1, 2, 3], &ImageDisplay::default()));
    workbook.set_column_width(1, 8.0).unwrap();
    workbook.set_row_height(1, 60.0).unwrap();
    workbook.save_as(&path).unwrap();

    let reopened = JsonWorkbookStore.open(&path).unwrap();
    assert_eq!(reopened.rows()[0], vec!["id".to_string(), "image".to_string()]);
    assert_eq!(reopened.rows()[1][1], "");
}

#[test]
fn empty_image_bytes_are_rejected() {
    let mut workbook = MemoryWorkbook::from_rows(sample_rows());
    let pos = CellPosition::new(1, 1);
    assert!(!workbook.set_cell_image(pos, Vec::new(), &ImageDisplay::default()));
    assert!(workbook.image_at(pos).is_none());
}

#[test]
fn set_cell_text_grows_short_rows() {
    let mut workbook = MemoryWorkbook::from_rows(vec![vec!["only".to_string()]]);
    workbook.set_cell_text(CellPosition::new(2, 3), "x");
    assert_eq!(workbook.cell_text(CellPosition::new(2, 3)), Some("x"));
    assert_eq!(workbook.cell_text(CellPosition::new(0, 3)), Some(""));
}

#[test]
fn opening_garbage_fails_as_malformed() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("junk.json");
    fs::write(&path, b"not json at all").unwrap();
    assert!(JsonWorkbookStore.open(&path).is_err());
}

#[test]
fn saving_twice_produces_identical_bytes() {
    let temp = TempDir::new().unwrap();
    let first = temp.path().join("a.json");
    let second = temp.path().join("b.json");

    let mut workbook = MemoryWorkbook::from_rows(sample_rows());
    workbook.set_cell_image(
        CellPosition::new(1, 1),
        vec![9, 9, 9],
        &ImageDisplay::default(),
    );
    workbook.save_as(&first).unwrap();
    workbook.save_as(&second).unwrap();

    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
}

#[test]
fn output_path_keeps_directory_and_extension() {
    let derived = derive_output_path(std::path::Path::new("/data/in/products.xlsx"));
    assert_eq!(
        derived,
        std::path::PathBuf::from("/data/in/products_output.xlsx")
    );

    let no_ext = derive_output_path(std::path::Path::new("/data/in/products"));
    assert_eq!(no_ext, std::path::PathBuf::from("/data/in/products_output"));
}
