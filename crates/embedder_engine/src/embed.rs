use std::path::{Path, PathBuf};
use std::time::Duration;

use embedder_core::{extract_url_table, CellPosition, Progress};
use engine_logging::{engine_debug, engine_info, engine_warn};

use crate::fetch::{fetch_all, ImageSource};
use crate::output::derive_output_path;
use crate::types::ProcessError;
use crate::workbook::{ImageDisplay, Workbook};

/// Tunables for one embed run.
#[derive(Debug, Clone)]
pub struct EmbedSettings {
    /// In-flight fetch cap used by the placement engine.
    pub fetch_concurrency: usize,
    /// Overall deadline for the fetch batch; elapsing it fails the run.
    pub batch_timeout: Duration,
    pub display: ImageDisplay,
}

impl Default for EmbedSettings {
    fn default() -> Self {
        Self {
            fetch_concurrency: 8,
            batch_timeout: Duration::from_secs(120),
            display: ImageDisplay::default(),
        }
    }
}

/// Receives progress updates from a running embed.
pub trait ProgressSink: Send + Sync {
    fn emit(&self, progress: Progress);
}

/// Sink that drops every update, for callers that do not track progress.
#[derive(Debug, Default)]
pub struct NullProgressSink;

impl ProgressSink for NullProgressSink {
    fn emit(&self, _progress: Progress) {}
}

/// Run the fetch/normalize/embed pipeline against an opened workbook and
/// save the result next to `input_path` with an `_output` suffix.
///
/// Progress is reported once as `(0, total)` before fetching starts and then
/// once per table entry, success or failure alike, so the final report is
/// always `(total, total)`. Every URL position is visited exactly once; a
/// position whose fetch failed keeps its original cell content.
pub async fn run_embed(
    workbook: &mut dyn Workbook,
    input_path: &Path,
    selected_headers: &[String],
    source: &dyn ImageSource,
    settings: &EmbedSettings,
    sink: &dyn ProgressSink,
) -> Result<PathBuf, ProcessError> {
    let table = extract_url_table(workbook.rows(), selected_headers)?;
    let mut progress = Progress::start(table.len());
    sink.emit(progress);

    let unique = table.unique_urls();
    engine_info!(
        "fetching {} unique urls for {} cells",
        unique.len(),
        table.len()
    );
    let fetched = tokio::time::timeout(
        settings.batch_timeout,
        fetch_all(source, &unique, settings.fetch_concurrency),
    )
    .await
    .map_err(|_| ProcessError::Timeout(settings.batch_timeout))?;

    for (pos, url) in table.entries() {
        match fetched.get(url).filter(|bytes| !bytes.is_empty()) {
            Some(bytes) => place_image(workbook, *pos, bytes.clone(), &settings.display),
            None => engine_debug!("no image for cell ({}, {})", pos.col, pos.row),
        }
        progress.advance();
        sink.emit(progress);
    }

    let output = derive_output_path(input_path);
    workbook.save_as(&output).map_err(ProcessError::Save)?;
    engine_info!("saved workbook to {}", output.display());
    Ok(output)
}

fn place_image(
    workbook: &mut dyn Workbook,
    pos: CellPosition,
    bytes: Vec<u8>,
    display: &ImageDisplay,
) {
    workbook.set_cell_text(pos, "");
    // Sizing is presentation only; a container that cannot resize columns
    // still gets the picture.
    if let Err(err) = workbook.set_column_width(pos.col, display.column_width_chars) {
        engine_debug!("column width for col {}: {err}", pos.col);
    }
    if let Err(err) = workbook.set_row_height(pos.row, display.row_height_points) {
        engine_debug!("row height for row {}: {err}", pos.row);
    }
    if !workbook.set_cell_image(pos, bytes, display) {
        engine_warn!("container rejected image at ({}, {})", pos.col, pos.row);
    }
}
