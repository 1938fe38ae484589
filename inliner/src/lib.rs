pub mod error;
pub mod executor;

pub use error::SyncError;
pub use executor::{BlockOutcome, Inliner, UpdatedDocument, read_document};
