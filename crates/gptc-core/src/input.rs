//! Multi-line question collection.
//!
//! A question ends after [`END_BLANK_LINES`] consecutive blank lines. The
//! collector is fed one line at a time so the same logic serves the
//! interactive readline prompt and piped stdin.

/// Consecutive blank lines that end a question.
pub const END_BLANK_LINES: u8 = 2;

/// Result of feeding one line to a [`QuestionCollector`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feed {
    /// Keep reading.
    NeedMore,
    /// The terminating blank lines were seen; here is the question.
    Complete(String),
}

/// Accumulates lines until the blank-line terminator.
#[derive(Debug)]
pub struct QuestionCollector {
    lines: Vec<String>,
    /// Blank lines seen since the last non-blank line, not yet committed.
    pending_blanks: Vec<String>,
    remaining: u8,
    waiting_to_end: bool,
}

impl Default for QuestionCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl QuestionCollector {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            pending_blanks: Vec::new(),
            remaining: END_BLANK_LINES,
            waiting_to_end: false,
        }
    }

    /// Feed one line (without its trailing newline).
    ///
    /// A blank line starts the end countdown; any other line resets it and
    /// keeps the blank lines it interrupted as part of the question.
    pub fn push(&mut self, line: String) -> Feed {
        if line.is_empty() {
            self.waiting_to_end = true;
            self.remaining = self.remaining.saturating_sub(1);
            if self.remaining == 0 {
                let question = self.lines.join("\n");
                *self = Self::new();
                return Feed::Complete(question);
            }
            self.pending_blanks.push(line);
        } else {
            self.waiting_to_end = false;
            self.remaining = END_BLANK_LINES;
            self.lines.append(&mut self.pending_blanks);
            self.lines.push(line);
        }
        Feed::NeedMore
    }

    /// Whether the collector is counting down to the end of a question.
    #[cfg(test)]
    fn is_waiting_to_end(&self) -> bool {
        self.waiting_to_end
    }

    /// Whether any line has been fed since the last completed question.
    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.pending_blanks.is_empty()
    }

    /// Flush on end-of-input.
    ///
    /// Returns the partial question if it holds any non-blank text.
    pub fn finish(self) -> Option<String> {
        if self.lines.is_empty() {
            None
        } else {
            Some(self.lines.join("\n"))
        }
    }
}

/// Collect one question from an iterator of lines.
///
/// Returns `None` when the lines run out before a question with content was
/// completed or could be flushed.
pub fn collect_question<I>(lines: I) -> Option<String>
where
    I: IntoIterator<Item = String>,
{
    let mut collector = QuestionCollector::new();
    for line in lines {
        if let Feed::Complete(question) = collector.push(line) {
            return Some(question);
        }
    }
    collector.finish()
}
