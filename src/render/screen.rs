use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Print, Stylize},
    terminal::{Clear, ClearType},
};

const RULE_WIDTH: usize = 60;

/// Line-oriented console output for menus and the editor
pub struct Screen<W: Write> {
    out: W,
    clear_enabled: bool,
}

impl<W: Write> Screen<W> {
    pub fn new(out: W, clear_enabled: bool) -> Self {
        Self { out, clear_enabled }
    }

    /// Wipe the terminal and home the cursor, when enabled
    pub fn clear(&mut self) -> io::Result<()> {
        if self.clear_enabled {
            queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        Ok(())
    }

    /// Boxed title across the top of a screen
    pub fn banner(&mut self, title: &str) -> io::Result<()> {
        let bar = "═".repeat(RULE_WIDTH);
        writeln!(self.out, "╔{bar}╗")?;
        writeln!(self.out, "║ {:<width$} ║", title, width = RULE_WIDTH - 2)?;
        writeln!(self.out, "╚{bar}╝")?;
        Ok(())
    }

    pub fn rule(&mut self) -> io::Result<()> {
        writeln!(self.out, "{}", "─".repeat(RULE_WIDTH))
    }

    pub fn line(&mut self, text: impl AsRef<str>) -> io::Result<()> {
        writeln!(self.out, "{}", text.as_ref())
    }

    pub fn blank(&mut self) -> io::Result<()> {
        writeln!(self.out)
    }

    pub fn success(&mut self, text: impl AsRef<str>) -> io::Result<()> {
        queue!(self.out, Print(text.as_ref().green()), Print("\n"))
    }

    pub fn error(&mut self, text: impl AsRef<str>) -> io::Result<()> {
        queue!(self.out, Print(text.as_ref().red()), Print("\n"))
    }

    pub fn notice(&mut self, text: impl AsRef<str>) -> io::Result<()> {
        queue!(self.out, Print(text.as_ref().yellow()), Print("\n"))
    }

    /// Print a prompt without a newline and flush so it shows before input
    pub fn prompt(&mut self, text: impl AsRef<str>) -> io::Result<()> {
        write!(self.out, "{}", text.as_ref())?;
        self.out.flush()
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    #[cfg(test)]
    pub fn output(&self) -> &W {
        &self.out
    }
}

#[cfg(test)]
impl Screen<Vec<u8>> {
    /// Everything written so far, lossily decoded
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.out).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen(clear: bool) -> Screen<Vec<u8>> {
        Screen::new(Vec::new(), clear)
    }

    #[test]
    fn banner_contains_title() {
        let mut s = screen(false);
        s.banner("Scripts").unwrap();
        assert!(s.text().contains("║ Scripts"));
        assert_eq!(s.text().lines().count(), 3);
    }

    #[test]
    fn clear_disabled_writes_nothing() {
        let mut s = screen(false);
        s.clear().unwrap();
        assert!(s.output().is_empty());
    }

    #[test]
    fn clear_enabled_emits_escape_sequence() {
        let mut s = screen(true);
        s.clear().unwrap();
        assert!(s.text().starts_with('\u{1b}'));
    }

    #[test]
    fn styled_lines_keep_text() {
        let mut s = screen(false);
        s.success("saved").unwrap();
        s.error("broken").unwrap();
        let text = s.text();
        assert!(text.contains("saved"));
        assert!(text.contains("broken"));
    }

    #[test]
    fn prompt_has_no_newline() {
        let mut s = screen(false);
        s.prompt("Choice: ").unwrap();
        assert_eq!(s.text(), "Choice: ");
    }
}
