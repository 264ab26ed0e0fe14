//! Embedder engine: concurrent fetch/normalize/embed pipeline.
mod embed;
mod engine;
mod fetch;
mod normalize;
mod output;
mod sniff;
mod store;
mod types;
mod workbook;

pub use embedder_core::{CellPosition, ExtractError, Progress};

pub use embed::{run_embed, EmbedSettings, NullProgressSink, ProgressSink};
pub use engine::{list_headers, EngineHandle};
pub use fetch::{fetch_all, FetchSettings, HttpImageSource, ImageSource, DEFAULT_CONCURRENCY};
pub use normalize::{normalize, NormalizeError, NormalizeSettings};
pub use output::{derive_output_path, write_bytes_atomic};
pub use sniff::{classify, Sniffed, ACCEPT_IMAGE_TYPES};
pub use store::{JsonWorkbookStore, MemoryWorkbook};
pub use types::{EngineEvent, FailureKind, FetchError, ProcessError};
pub use workbook::{ImageDisplay, Workbook, WorkbookError, WorkbookStore};
