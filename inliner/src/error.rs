use std::fmt;
use std::io;
use std::ops::Range;
use std::path::PathBuf;

use fence::SpliceError;

#[derive(Debug)]
pub enum SyncError {
    ReadDocument {
        path: PathBuf,
        error: io::Error,
    },
    /// A referenced file could not be read. `span` locates the path in the document.
    ReadSource {
        path: PathBuf,
        span: Range<usize>,
        source_id: usize,
        error: io::Error,
    },
    WriteDocument {
        path: PathBuf,
        error: io::Error,
    },
    Output(io::Error),
    Splice(SpliceError),
}

impl SyncError {
    /// Document location to label when rendering this error, if any.
    pub fn span(&self) -> Option<(usize, Range<usize>)> {
        match self {
            SyncError::ReadSource {
                span, source_id, ..
            } => Some((*source_id, span.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncError::ReadDocument { path, error } => {
                write!(f, "cannot read '{}': {}", path.display(), error)
            }
            SyncError::ReadSource { path, error, .. } => {
                write!(f, "cannot read source file '{}': {}", path.display(), error)
            }
            SyncError::WriteDocument { path, error } => {
                write!(f, "cannot write '{}': {}", path.display(), error)
            }
            SyncError::Output(error) => write!(f, "cannot write output: {}", error),
            SyncError::Splice(error) => write!(f, "{}", error),
        }
    }
}

impl std::error::Error for SyncError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SyncError::ReadDocument { error, .. }
            | SyncError::ReadSource { error, .. }
            | SyncError::WriteDocument { error, .. }
            | SyncError::Output(error) => Some(error),
            SyncError::Splice(error) => Some(error),
        }
    }
}

impl From<SpliceError> for SyncError {
    fn from(error: SpliceError) -> Self {
        SyncError::Splice(error)
    }
}
