use std::collections::HashSet;
use std::fmt;

use crate::CellPosition;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractError {
    /// The grid has no rows at all, not even a header row.
    EmptySheet,
    /// None of the selected header names appear in the header row.
    NoMatchingHeader,
    /// The selected columns contain no URL-like cell values.
    NoUrlsFound,
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractError::EmptySheet => write!(f, "sheet has no rows"),
            ExtractError::NoMatchingHeader => write!(f, "no selected header matched the header row"),
            ExtractError::NoUrlsFound => write!(f, "no image links found in the selected columns"),
        }
    }
}

impl std::error::Error for ExtractError {}

/// Position → URL table built by one extraction pass.
///
/// Entries are kept in row-major scan order and a position appears at most
/// once. The same URL may appear at several positions; that many-to-one
/// relationship is preserved here and only collapsed for fetching.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlTable {
    entries: Vec<(CellPosition, String)>,
}

impl UrlTable {
    /// Number of positions holding a URL. This is the progress `total`.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[(CellPosition, String)] {
        &self.entries
    }

    /// Distinct URLs in first-seen order, by exact string equality.
    pub fn unique_urls(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.entries
            .iter()
            .filter(|(_, url)| seen.insert(url.as_str()))
            .map(|(_, url)| url.clone())
            .collect()
    }
}

/// Resolve selected header names to column indices.
///
/// Both the selection and the header cells are compared after trimming
/// surrounding whitespace; matching is otherwise exact.
pub fn resolve_columns(header: &[String], selected: &[String]) -> Result<Vec<usize>, ExtractError> {
    let wanted: HashSet<&str> = selected.iter().map(|name| name.trim()).collect();
    let columns: Vec<usize> = header
        .iter()
        .enumerate()
        .filter(|(_, name)| wanted.contains(name.trim()))
        .map(|(idx, _)| idx)
        .collect();
    if columns.is_empty() {
        return Err(ExtractError::NoMatchingHeader);
    }
    Ok(columns)
}

/// Scan the grid for URL-like values in the selected columns.
///
/// Row 0 is the header row; data rows are scanned in order. A cell counts
/// when its trimmed value is non-empty and starts with `http`.
pub fn extract_url_table(
    rows: &[Vec<String>],
    selected: &[String],
) -> Result<UrlTable, ExtractError> {
    let header = rows.first().ok_or(ExtractError::EmptySheet)?;
    let columns = resolve_columns(header, selected)?;

    let mut entries = Vec::new();
    for (row_idx, row) in rows.iter().enumerate().skip(1) {
        for &col in &columns {
            let Some(cell) = row.get(col) else {
                continue;
            };
            let value = cell.trim();
            if !value.is_empty() && value.starts_with("http") {
                entries.push((
                    CellPosition::new(col as u32, row_idx as u32),
                    value.to_string(),
                ));
            }
        }
    }

    if entries.is_empty() {
        return Err(ExtractError::NoUrlsFound);
    }
    Ok(UrlTable { entries })
}
