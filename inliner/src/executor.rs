use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use fence::block::AnnotatedBlock;
use fence::{Document, Scanner, Splicer};

use crate::error::SyncError;

/// What happened to one annotated block during a sync.
#[derive(Debug, Clone)]
pub struct BlockOutcome {
    pub block: AnnotatedBlock,
    /// False when the body already matched the referenced file.
    pub changed: bool,
}

/// A documentation text with every annotated block inlined.
#[derive(Debug, Clone)]
pub struct UpdatedDocument {
    pub original: String,
    pub text: String,
    /// One outcome per block, in document order.
    pub blocks: Vec<BlockOutcome>,
}

impl UpdatedDocument {
    pub fn is_changed(&self) -> bool {
        self.text != self.original
    }

    pub fn stale_blocks(&self) -> impl Iterator<Item = &AnnotatedBlock> {
        self.blocks.iter().filter(|o| o.changed).map(|o| &o.block)
    }

    /// Overwrite `path` with the updated text. Always writes, even when nothing changed.
    pub fn write_to(&self, path: &Path) -> Result<(), SyncError> {
        fs::write(path, &self.text).map_err(|error| SyncError::WriteDocument {
            path: path.to_path_buf(),
            error,
        })?;
        log::debug!("wrote {} ({} bytes)", path.display(), self.text.len());
        Ok(())
    }
}

/// Keeps annotated blocks in sync with the files they reference.
pub struct Inliner {
    scanner: Scanner,
    /// Directory `source=` paths are resolved against. Empty means the working directory.
    base_dir: PathBuf,
}

impl Inliner {
    pub fn new() -> Self {
        Self::with_base(PathBuf::new())
    }

    pub fn with_base(base_dir: impl Into<PathBuf>) -> Self {
        Inliner {
            scanner: Scanner::new(),
            base_dir: base_dir.into(),
        }
    }

    pub fn with_scanner(mut self, scanner: Scanner) -> Self {
        self.scanner = scanner;
        self
    }

    /// Replace every block of `document` with the current contents of its source.
    ///
    /// Blocks are visited last-to-first; each source is read, announced on
    /// `output` as `inlined <path>`, then spliced in. The first unreadable
    /// source aborts the whole run.
    pub fn inline_document(
        &self,
        document: &Document,
        output: &mut dyn Write,
    ) -> Result<UpdatedDocument, SyncError> {
        let mut splicer = Splicer::new(document.text.clone());
        let mut blocks = Vec::with_capacity(document.blocks.len());

        for block in document.blocks.iter().rev() {
            let path = self.base_dir.join(&block.source);
            let contents = fs::read_to_string(&path).map_err(|error| SyncError::ReadSource {
                path,
                span: block.source_span.clone(),
                source_id: document.source_id,
                error,
            })?;

            writeln!(output, "inlined {}", block.source).map_err(SyncError::Output)?;

            splicer.replace(block.span.clone(), &block.render(&contents))?;
            blocks.push(BlockOutcome {
                block: block.clone(),
                changed: !block.is_current(&contents),
            });
        }
        blocks.reverse();

        Ok(UpdatedDocument {
            original: document.text.clone(),
            text: splicer.finish(),
            blocks,
        })
    }

    /// Read and scan `path`, then inline its blocks. Does not write.
    pub fn sync(&self, path: &Path, output: &mut dyn Write) -> Result<UpdatedDocument, SyncError> {
        let text = read_document(path)?;
        let document = self.scanner.scan(text, 0);
        log::debug!(
            "{}: {} annotated block(s)",
            path.display(),
            document.blocks.len()
        );
        self.inline_document(&document, output)
    }

    /// Sync `path` and overwrite it with the result.
    pub fn sync_in_place(
        &self,
        path: &Path,
        output: &mut dyn Write,
    ) -> Result<UpdatedDocument, SyncError> {
        let updated = self.sync(path, output)?;
        updated.write_to(path)?;
        Ok(updated)
    }
}

impl Default for Inliner {
    fn default() -> Self {
        Self::new()
    }
}

/// Read a documentation file.
pub fn read_document(path: &Path) -> Result<String, SyncError> {
    fs::read_to_string(path).map_err(|error| SyncError::ReadDocument {
        path: path.to_path_buf(),
        error,
    })
}
