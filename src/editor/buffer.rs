use chrono::{DateTime, Local};
use ropey::Rope;

/// Source text of the script being authored, one appended line at a time
pub struct ScriptBuffer {
    name: String,
    created_at: DateTime<Local>,
    text: Rope,
    lines: usize,
}

impl ScriptBuffer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            created_at: Local::now(),
            text: Rope::new(),
            lines: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_at(&self) -> DateTime<Local> {
        self.created_at
    }

    /// Append a line; lines are joined with `\n` and the first gets no separator
    pub fn push_line(&mut self, line: &str) {
        let end = self.text.len_chars();
        if self.lines > 0 {
            self.text.insert_char(end, '\n');
        }
        self.text.insert(self.text.len_chars(), line);
        self.lines += 1;
    }

    /// Drop every line, keeping the name and creation time
    pub fn clear(&mut self) {
        self.text = Rope::new();
        self.lines = 0;
    }

    pub fn line_count(&self) -> usize {
        self.lines
    }

    /// Number shown in the prompt for the next line
    pub fn next_line_number(&self) -> usize {
        self.line_count() + 1
    }

    pub fn source(&self) -> String {
        self.text.to_string()
    }
}
