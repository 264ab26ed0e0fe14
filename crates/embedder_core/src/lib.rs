//! Embedder core: pure URL extraction and progress accounting.
mod extract;
mod position;
mod progress;

pub use extract::{extract_url_table, resolve_columns, ExtractError, UrlTable};
pub use position::CellPosition;
pub use progress::Progress;
