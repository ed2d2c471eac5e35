use std::io::{self, Write};

use super::{Directive, ScriptBuffer};
use crate::app::App;
use crate::input::{InputEvent, LineSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Editing,
    Terminated,
}

/// The interactive loop for one script.
///
/// Owns the live buffer. Leaves `Editing` on the exit directive, on end of
/// input, or after answering the interrupt prompt.
pub struct EditingSession {
    buffer: ScriptBuffer,
    state: SessionState,
}

impl EditingSession {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            buffer: ScriptBuffer::new(name),
            state: SessionState::default(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn buffer(&self) -> &ScriptBuffer {
        &self.buffer
    }

    pub fn run<W: Write>(
        &mut self,
        app: &mut App<W>,
        input: &mut dyn LineSource,
    ) -> io::Result<()> {
        self.show_editor(app)?;

        while self.state == SessionState::Editing {
            app.screen
                .prompt(format!("{:3} | ", self.buffer.next_line_number()))?;

            match input.read_line()? {
                InputEvent::Line(line) => self.handle_line(app, &line)?,
                InputEvent::Interrupted => self.handle_interrupt(app, input)?,
                InputEvent::Eof => {
                    app.screen.blank()?;
                    self.state = SessionState::Terminated;
                }
            }
        }

        Ok(())
    }

    /// Route one line to the buffer or to the directive handler
    pub fn handle_line<W: Write>(&mut self, app: &mut App<W>, line: &str) -> io::Result<()> {
        match Directive::parse(line, &app.settings.command_prefix) {
            Some(directive) => self.dispatch(app, directive),
            None => {
                self.buffer.push_line(line);
                Ok(())
            }
        }
    }

    fn dispatch<W: Write>(&mut self, app: &mut App<W>, directive: Directive) -> io::Result<()> {
        tracing::debug!(directive = directive.display(), "editor directive");
        match directive {
            Directive::Save => app.save_buffer(&self.buffer),
            Directive::Run => {
                let source = self.buffer.source();
                app.execute(self.buffer.name(), &source).map(|_| ())
            }
            Directive::Clear => {
                self.buffer.clear();
                self.show_editor(app)
            }
            Directive::Exit => {
                app.screen.line("[*] Exiting editor...")?;
                self.state = SessionState::Terminated;
                Ok(())
            }
            Directive::Unknown(text) => app
                .screen
                .notice(format!("Unknown command: {}{}", app.settings.command_prefix, text)),
        }
    }

    fn handle_interrupt<W: Write>(
        &mut self,
        app: &mut App<W>,
        input: &mut dyn LineSource,
    ) -> io::Result<()> {
        app.screen.blank()?;
        app.screen.blank()?;
        app.screen.prompt("[!] Interrupted. Save your work? (y/n): ")?;

        let confirmed = match input.read_line()? {
            InputEvent::Line(answer) => is_yes(&answer),
            InputEvent::Interrupted | InputEvent::Eof => false,
        };

        if confirmed {
            app.save_buffer(&self.buffer)?;
        } else {
            app.screen.blank()?;
            app.screen.line("Discarded unsaved changes.")?;
        }
        self.state = SessionState::Terminated;
        Ok(())
    }

    fn show_editor<W: Write>(&self, app: &mut App<W>) -> io::Result<()> {
        let prefix = &app.settings.command_prefix;
        let commands = ["save", "run", "clear", "exit"]
            .map(|c| format!("{prefix}{c}"))
            .join(", ");

        let screen = &mut app.screen;
        screen.clear()?;
        screen.banner("Scribe - Script Editor")?;
        screen.blank()?;
        screen.line(format!("Script: {}", self.buffer.name()))?;
        screen.rule()?;
        screen.blank()?;
        screen.line("[EDITOR MODE] - Type your script below")?;
        screen.line(format!("Commands: {commands}"))?;
        screen.rule()?;
        screen.blank()
    }
}

fn is_yes(answer: &str) -> bool {
    let answer = answer.trim();
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}
