use std::ops::Range;

/// The closing fence marker.
pub const FENCE: &str = "```";

/// A fenced code block whose opening line carries a `{source=<path>}` attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedBlock {
    /// Byte span in the original document, opening fence through closing fence.
    pub span: Range<usize>,
    /// The opening line verbatim, trailing newline included.
    pub opening: String,
    /// Language tag as written.
    pub language: String,
    /// Referenced file path as written.
    pub source: String,
    /// Byte span of `source` in the original document.
    pub source_span: Range<usize>,
    /// Everything between the opening line and the closing fence.
    pub body: String,
}

impl AnnotatedBlock {
    /// The text that replaces `span` when `contents` is inlined.
    pub fn render(&self, contents: &str) -> String {
        let mut out = String::with_capacity(self.opening.len() + contents.len() + FENCE.len() + 1);
        out.push_str(&self.opening);
        out.push_str(contents);
        out.push('\n');
        out.push_str(FENCE);
        out
    }

    /// Whether inlining `contents` would leave this block unchanged.
    ///
    /// Rendering inserts one newline before the closing fence, so a synced
    /// body is the contents plus that newline.
    pub fn is_current(&self, contents: &str) -> bool {
        self.body.strip_suffix('\n') == Some(contents)
    }
}
