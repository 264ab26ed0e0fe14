use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use embedder_core::{ExtractError, Progress};

use crate::normalize::NormalizeError;
use crate::workbook::WorkbookError;

/// Events emitted by the engine worker to its caller.
#[derive(Debug)]
pub enum EngineEvent {
    /// Header row of a workbook, for column selection.
    HeadersLoaded {
        result: Result<Vec<String>, ProcessError>,
    },
    /// Per-position progress of a running embed.
    Progress(Progress),
    /// Terminal outcome of an embed run; on success carries the output path.
    RunCompleted {
        result: Result<PathBuf, ProcessError>,
    },
}

/// Run-fatal failure of one embed run. Per-URL failures never surface here;
/// they only show up as absent entries in the fetch result.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error(transparent)]
    Extract(#[from] ExtractError),
    #[error("image fetch batch timed out after {0:?}")]
    Timeout(Duration),
    #[error("failed to open workbook: {0}")]
    Open(#[source] WorkbookError),
    #[error("failed to save workbook: {0}")]
    Save(#[source] WorkbookError),
}

/// Per-URL failure. Swallowed by the batch fetcher; the kind is kept for
/// logging and for callers that fetch single URLs directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for FetchError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    UnsupportedFormat,
    Decode,
    InvalidDimensions,
    Encode,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::UnsupportedFormat => write!(f, "unsupported image format"),
            FailureKind::Decode => write!(f, "image decode failed"),
            FailureKind::InvalidDimensions => write!(f, "invalid image dimensions"),
            FailureKind::Encode => write!(f, "png encode failed"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

impl From<NormalizeError> for FetchError {
    fn from(err: NormalizeError) -> Self {
        let kind = match err {
            NormalizeError::Decode(_) => FailureKind::Decode,
            NormalizeError::InvalidDimensions => FailureKind::InvalidDimensions,
            NormalizeError::Encode(_) => FailureKind::Encode,
        };
        FetchError::new(kind, err.to_string())
    }
}
