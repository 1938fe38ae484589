use std::fmt;
use std::ops::Range;

/// Replacement of one byte span of an original text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub span: Range<usize>,
    pub replacement: String,
}

impl Edit {
    pub fn new(span: Range<usize>, replacement: impl Into<String>) -> Self {
        Edit {
            span,
            replacement: replacement.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpliceError {
    /// The span ends after the start of an edit already applied (or past the text).
    OutOfOrder { span: Range<usize>, floor: usize },
    InvertedSpan(Range<usize>),
    NotCharBoundary(usize),
}

impl fmt::Display for SpliceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpliceError::OutOfOrder { span, floor } => write!(
                f,
                "edit {}..{} overlaps or follows text that was already replaced (limit {})",
                span.start, span.end, floor
            ),
            SpliceError::InvertedSpan(span) => {
                write!(f, "edit span {}..{} is inverted", span.start, span.end)
            }
            SpliceError::NotCharBoundary(offset) => {
                write!(f, "offset {} is not on a character boundary", offset)
            }
        }
    }
}

impl std::error::Error for SpliceError {}

/// Applies span replacements to a text, last span first.
///
/// Each span is expressed in coordinates of the original text. Replacing from
/// the end backwards leaves everything before the current span untouched, so
/// those coordinates stay valid until their own turn.
#[derive(Debug)]
pub struct Splicer {
    text: String,
    /// Start of the most recently applied span; later edits must end at or before it.
    floor: usize,
}

impl Splicer {
    pub fn new(text: String) -> Self {
        let floor = text.len();
        Splicer { text, floor }
    }

    pub fn replace(&mut self, span: Range<usize>, replacement: &str) -> Result<(), SpliceError> {
        if span.start > span.end {
            return Err(SpliceError::InvertedSpan(span));
        }
        if span.end > self.floor {
            return Err(SpliceError::OutOfOrder {
                span,
                floor: self.floor,
            });
        }
        for offset in [span.start, span.end] {
            if !self.text.is_char_boundary(offset) {
                return Err(SpliceError::NotCharBoundary(offset));
            }
        }
        log::trace!(
            "splicing {}..{} ({} -> {} bytes)",
            span.start,
            span.end,
            span.len(),
            replacement.len()
        );
        self.floor = span.start;
        self.text.replace_range(span, replacement);
        Ok(())
    }

    pub fn finish(self) -> String {
        self.text
    }
}

/// Apply a batch of non-overlapping edits computed against `text`.
pub fn apply_edits(text: &str, mut edits: Vec<Edit>) -> Result<String, SpliceError> {
    edits.sort_by(|a, b| b.span.start.cmp(&a.span.start).then(b.span.end.cmp(&a.span.end)));
    let mut splicer = Splicer::new(text.to_string());
    for edit in &edits {
        splicer.replace(edit.span.clone(), &edit.replacement)?;
    }
    Ok(splicer.finish())
}
