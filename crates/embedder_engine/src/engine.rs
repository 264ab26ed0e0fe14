use std::path::{Path, PathBuf};
use std::sync::{mpsc, Arc};
use std::thread;

use embedder_core::Progress;

use crate::embed::{run_embed, EmbedSettings, ProgressSink};
use crate::fetch::ImageSource;
use crate::types::{EngineEvent, ProcessError};
use crate::workbook::WorkbookStore;

enum EngineCommand {
    ListHeaders {
        path: PathBuf,
    },
    Process {
        path: PathBuf,
        selected_headers: Vec<String>,
    },
}

/// Handle to the engine worker thread.
///
/// Commands are queued over a channel and executed one at a time on a
/// dedicated thread owning its own tokio runtime, so callers (a UI thread,
/// typically) never block on network or image work. Events come back on the
/// paired channel.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(
        store: Arc<dyn WorkbookStore>,
        source: Arc<dyn ImageSource>,
        settings: EmbedSettings,
    ) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let event_tx = event_tx.clone();
                runtime.block_on(handle_command(
                    store.as_ref(),
                    source.as_ref(),
                    &settings,
                    command,
                    event_tx,
                ));
            }
        });

        Self { cmd_tx, event_rx }
    }

    /// Queue a header-row read for `path`.
    pub fn list_headers(&self, path: impl Into<PathBuf>) {
        let _ = self.cmd_tx.send(EngineCommand::ListHeaders { path: path.into() });
    }

    /// Queue a full embed run for `path`.
    pub fn process(&self, path: impl Into<PathBuf>, selected_headers: Vec<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Process {
            path: path.into(),
            selected_headers,
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Blocking receive; returns None once the worker is gone.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }
}

/// Header row of the workbook at `path`, empty when the grid has no rows.
pub fn list_headers(store: &dyn WorkbookStore, path: &Path) -> Result<Vec<String>, ProcessError> {
    let workbook = store.open(path).map_err(ProcessError::Open)?;
    Ok(workbook.rows().first().cloned().unwrap_or_default())
}

struct ChannelProgressSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, progress: Progress) {
        let _ = self.tx.send(EngineEvent::Progress(progress));
    }
}

async fn handle_command(
    store: &dyn WorkbookStore,
    source: &dyn ImageSource,
    settings: &EmbedSettings,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::ListHeaders { path } => {
            let result = list_headers(store, &path);
            let _ = event_tx.send(EngineEvent::HeadersLoaded { result });
        }
        EngineCommand::Process {
            path,
            selected_headers,
        } => {
            let sink = ChannelProgressSink {
                tx: event_tx.clone(),
            };
            let result = match store.open(&path) {
                Ok(mut workbook) => {
                    run_embed(
                        workbook.as_mut(),
                        &path,
                        &selected_headers,
                        source,
                        settings,
                        &sink,
                    )
                    .await
                }
                Err(err) => Err(ProcessError::Open(err)),
            };
            let _ = event_tx.send(EngineEvent::RunCompleted { result });
        }
    }
}
