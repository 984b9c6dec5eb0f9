/// Style tag carried by a transcript entry; the UI maps these to colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    Plain,
    Info,
    Error,
    Success,
    TypingText,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptEntry {
    pub text: String,
    pub style: TextStyle,
}

/// Default number of entries kept before the oldest are dropped.
pub const DEFAULT_SCROLLBACK: usize = 500;

/// Everything the shell has printed, in order, plus the prompt label used
/// when echoing submitted lines. The UI renders this; the session only
/// appends to it.
#[derive(Debug)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
    banner: String,
    prompt: String,
    max_entries: usize,
}

impl Transcript {
    pub fn new(banner: String, prompt: String) -> Self {
        let mut transcript = Self {
            entries: Vec::new(),
            banner,
            prompt,
            max_entries: DEFAULT_SCROLLBACK,
        };
        transcript.reset_to_banner();
        transcript
    }

    pub fn push(&mut self, text: impl Into<String>, style: TextStyle) {
        self.entries.push(TranscriptEntry {
            text: text.into(),
            style,
        });
        if self.entries.len() > self.max_entries {
            let excess = self.entries.len() - self.max_entries;
            self.entries.drain(..excess);
        }
    }

    pub fn plain(&mut self, text: impl Into<String>) {
        self.push(text, TextStyle::Plain);
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.push(text, TextStyle::Info);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.push(text, TextStyle::Error);
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.push(text, TextStyle::Success);
    }

    pub fn typing_text(&mut self, text: impl Into<String>) {
        self.push(text, TextStyle::TypingText);
    }

    /// Echo a submitted line the way a real shell would: `<prompt> <line>`.
    pub fn echo(&mut self, line: &str) {
        self.plain(format!("{} {}", self.prompt, line));
    }

    /// Drop everything and show the welcome banner again (the `clear`
    /// command). Presentation only; no session state is touched.
    pub fn reset_to_banner(&mut self) {
        self.entries.clear();
        self.entries.push(TranscriptEntry {
            text: self.banner.clone(),
            style: TextStyle::Plain,
        });
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn last(&self) -> Option<&TranscriptEntry> {
        self.entries.last()
    }

    /// True if any entry contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.entries.iter().any(|e| e.text.contains(needle))
    }
}
