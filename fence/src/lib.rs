pub mod block;
pub mod scanner;
pub mod splice;

pub use scanner::{PatternError, Scanner};
pub use splice::{Edit, SpliceError, Splicer, apply_edits};

use crate::block::AnnotatedBlock;

/// A scanned documentation file.
#[derive(Debug, Clone)]
pub struct Document {
    /// Full text as read from disk.
    pub text: String,
    /// Annotated blocks in order of appearance, located against `text`.
    pub blocks: Vec<AnnotatedBlock>,
    /// The source file ID (for error reporting with codespan-reporting).
    pub source_id: usize,
}

impl Document {
    /// Scan `text` with the built-in block pattern.
    pub fn scan(text: String, source_id: usize) -> Self {
        Scanner::new().scan(text, source_id)
    }

    /// 1-based line on which `offset` falls.
    pub fn line_of(&self, offset: usize) -> usize {
        self.text[..offset.min(self.text.len())]
            .bytes()
            .filter(|&b| b == b'\n')
            .count()
            + 1
    }
}
