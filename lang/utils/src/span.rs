use std::{
    fmt::{Debug, Display},
    path::PathBuf,
    sync::Arc,
};

pub type Cursor1 = usize;

/// A human-facing position: 1-based line, 0-based column counted in chars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor2 {
    pub line: usize,
    pub column: usize,
}
impl Display for Cursor2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Cursor2 { line, column } = self;
        write!(f, "{line}:{column}",)
    }
}

/// Line table of one source text, translating byte offsets into
/// line/column positions and recovering the text of a line.
#[derive(Clone, Debug)]
pub struct FileInfo {
    source: Arc<str>,
    line_starts: Vec<Cursor1>,
    path: Option<Arc<PathBuf>>,
}

impl FileInfo {
    pub fn new(s: &str, path: Option<Arc<PathBuf>>) -> Self {
        let mut line_starts = vec![0];
        for (i, c) in s.char_indices() {
            if c == '\n' {
                line_starts.push(i + 1);
            }
        }
        FileInfo { source: Arc::from(s), line_starts, path }
    }
    pub fn trans_span2(&self, offset: Cursor1) -> Cursor2 {
        let offset = offset.min(self.source.len());
        // the last line start at or before the offset
        let idx = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let start = self.line_starts[idx];
        let column = self.source.get(start..offset).map(|s| s.chars().count()).unwrap_or(0);
        Cursor2 { line: idx + 1, column }
    }
    /// Text of a 1-based line, without its line terminator.
    pub fn line_text(&self, line: usize) -> &str {
        let Some(&start) = self.line_starts.get(line.saturating_sub(1)) else { return "" };
        let end = self.line_starts.get(line).map(|&next| next - 1).unwrap_or(self.source.len());
        self.source[start..end].trim_end_matches('\r')
    }
    pub fn path(&self) -> Option<&PathBuf> {
        self.path.as_deref()
    }
}

/// A byte range into the source of a [`FileInfo`].
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    span1: (Cursor1, Cursor1),
}

impl Span {
    pub fn new(l: Cursor1, r: Cursor1) -> Span {
        Span { span1: (l, r) }
    }
    pub fn get_cursor1(&self) -> (Cursor1, Cursor1) {
        self.span1
    }
    pub fn start(&self) -> Cursor1 {
        self.span1.0
    }
}

impl Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (l, r) = self.span1;
        write!(f, "{l}-{r}")
    }
}

impl Debug for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn positions() {
        let info = FileInfo::new("(a / alpha\n   :ARG0 (b))\n", None);
        assert_eq!(info.trans_span2(0), Cursor2 { line: 1, column: 0 });
        assert_eq!(info.trans_span2(5), Cursor2 { line: 1, column: 5 });
        assert_eq!(info.trans_span2(14), Cursor2 { line: 2, column: 3 });
        assert_eq!(info.line_text(2), "   :ARG0 (b))");
        assert_eq!(info.line_text(1), "(a / alpha");
        assert_eq!(info.line_text(9), "");
    }
}
