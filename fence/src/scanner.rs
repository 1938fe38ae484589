use std::fmt;

use regex::{Captures, Regex};

use crate::Document;
use crate::block::AnnotatedBlock;

/// The built-in block pattern.
///
/// An opening fence with a language tag, a `{source=<path>}` attribute on the
/// same line (closing brace optional), then a body that stops at the nearest
/// closing fence. The opening line may end in `\r\n`; the `\r` stays in `open`.
pub const DEFAULT_PATTERN: &str =
    r"(?s)(?P<open>```(?P<language>\S+)[ \t]*\{source=(?P<source>[^\r\n]+?)\}?\r?\n)(?P<body>.*?)```";

/// Named groups every block pattern must define.
pub const REQUIRED_GROUPS: [&str; 4] = ["open", "language", "source", "body"];

#[derive(Debug)]
pub enum PatternError {
    Regex(regex::Error),
    MissingGroup(&'static str),
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternError::Regex(e) => write!(f, "invalid block pattern: {}", e),
            PatternError::MissingGroup(name) => {
                write!(f, "block pattern has no named group `{}`", name)
            }
        }
    }
}

impl std::error::Error for PatternError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PatternError::Regex(e) => Some(e),
            PatternError::MissingGroup(_) => None,
        }
    }
}

impl From<regex::Error> for PatternError {
    fn from(e: regex::Error) -> Self {
        PatternError::Regex(e)
    }
}

/// Locates annotated blocks in a document.
#[derive(Debug, Clone)]
pub struct Scanner {
    pattern: Regex,
}

impl Scanner {
    pub fn new() -> Self {
        Self::with_pattern(DEFAULT_PATTERN).expect("built-in block pattern is valid")
    }

    /// Build a scanner from a custom pattern defining [`REQUIRED_GROUPS`].
    pub fn with_pattern(pattern: &str) -> Result<Self, PatternError> {
        let pattern = Regex::new(pattern)?;
        for group in REQUIRED_GROUPS {
            if !pattern.capture_names().flatten().any(|name| name == group) {
                return Err(PatternError::MissingGroup(group));
            }
        }
        Ok(Scanner { pattern })
    }

    /// Find every non-overlapping annotated block in `text`, in order of appearance.
    pub fn find_blocks(&self, text: &str) -> Vec<AnnotatedBlock> {
        let blocks: Vec<AnnotatedBlock> = self
            .pattern
            .captures_iter(text)
            .filter_map(|caps| block_from_captures(&caps))
            .collect();
        log::debug!("found {} annotated block(s)", blocks.len());
        blocks
    }

    pub fn scan(&self, text: String, source_id: usize) -> Document {
        let blocks = self.find_blocks(&text);
        Document {
            text,
            blocks,
            source_id,
        }
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

fn block_from_captures(caps: &Captures<'_>) -> Option<AnnotatedBlock> {
    let whole = caps.get(0)?;
    let source = caps.name("source")?;
    let block = AnnotatedBlock {
        span: whole.range(),
        opening: caps.name("open")?.as_str().to_string(),
        language: caps.name("language")?.as_str().to_string(),
        source: source.as_str().to_string(),
        source_span: source.range(),
        body: caps.name("body")?.as_str().to_string(),
    };
    log::trace!(
        "annotated block at {:?} sourced from {}",
        block.span,
        block.source
    );
    Some(block)
}
