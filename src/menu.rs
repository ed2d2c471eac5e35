//! Top-level menu: create, list, and run scripts
//!
//! The controller only reads the registry. Saving happens inside the
//! editing session.

use std::io::{self, Write};

use crate::app::App;
use crate::editor::EditingSession;
use crate::input::{InputEvent, LineSource};
use crate::registry::validate_name;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Create,
    List,
    Run,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::Create),
            "2" => Some(MenuChoice::List),
            "3" => Some(MenuChoice::Run),
            "4" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

/// What the loop should do after handling a choice
enum Flow {
    Continue,
    Quit,
}

pub struct Controller<W: Write> {
    app: App<W>,
}

impl<W: Write> Controller<W> {
    pub fn new(app: App<W>) -> Self {
        Self { app }
    }

    /// Run until the user exits or input runs out
    pub fn run(&mut self, input: &mut dyn LineSource) -> io::Result<()> {
        loop {
            self.show_menu()?;

            let choice = match input.read_line()? {
                InputEvent::Line(line) => line,
                InputEvent::Interrupted | InputEvent::Eof => {
                    self.app.screen.blank()?;
                    break;
                }
            };

            let flow = match MenuChoice::parse(&choice) {
                Some(MenuChoice::Create) => self.create(input)?,
                Some(MenuChoice::List) => {
                    self.list()?;
                    self.pause(input)?
                }
                Some(MenuChoice::Run) => self.run_existing(input)?,
                Some(MenuChoice::Exit) => {
                    self.app.screen.line("Exiting Scribe...")?;
                    Flow::Quit
                }
                None => Flow::Continue,
            };

            if let Flow::Quit = flow {
                break;
            }
        }

        self.app.screen.flush()
    }

    fn show_menu(&mut self) -> io::Result<()> {
        let screen = &mut self.app.screen;
        screen.clear()?;
        screen.banner("Scribe - Script Workbench")?;
        screen.blank()?;
        screen.line("1. Create New Script")?;
        screen.line("2. List Scripts")?;
        screen.line("3. Run Script")?;
        screen.line("4. Exit")?;
        screen.blank()?;
        screen.prompt("Choice: ")
    }

    fn create(&mut self, input: &mut dyn LineSource) -> io::Result<Flow> {
        self.app.screen.prompt("Script Name: ")?;
        let Some(name) = read_answer(input)? else {
            return Ok(Flow::Quit);
        };
        if name.is_empty() {
            return Ok(Flow::Continue);
        }
        if let Err(e) = validate_name(&name) {
            self.app.screen.error(e.to_string())?;
            return self.pause(input);
        }

        let mut session = EditingSession::new(name);
        session.run(&mut self.app, input)?;
        tracing::debug!(
            state = ?session.state(),
            lines = session.buffer().line_count(),
            "editing session ended"
        );

        self.list()?;
        self.pause(input)
    }

    /// Print every registered script, or a note when there are none
    fn list(&mut self) -> io::Result<()> {
        let App { store, screen, .. } = &mut self.app;
        screen.clear()?;
        screen.banner("Saved Scripts")?;
        screen.line(format!("Storage: {}", store.root().display()))?;
        screen.blank()?;

        let registry = store.registry();
        if registry.is_empty() {
            screen.line("No scripts saved yet.")?;
            return screen.blank();
        }

        for (name, record) in registry.iter() {
            screen.line(format!("* {name}"))?;
            screen.line(format!(
                "   Size: {} bytes | Created: {}",
                record.size_bytes,
                record.created_at.format("%Y-%m-%d %H:%M:%S")
            ))?;
            screen.blank()?;
        }
        Ok(())
    }

    fn run_existing(&mut self, input: &mut dyn LineSource) -> io::Result<Flow> {
        self.list()?;
        self.app.screen.prompt("Script to run: ")?;
        let Some(name) = read_answer(input)? else {
            return Ok(Flow::Quit);
        };
        if name.is_empty() {
            return Ok(Flow::Continue);
        }

        if !self.app.store.registry().contains(&name) {
            self.app
                .screen
                .error(format!("Script '{}' not found", name))?;
            return self.pause(input);
        }

        match self.app.store.load_source(&name) {
            Ok(source) => {
                self.app.execute(&name, &source)?;
            }
            Err(e) => {
                tracing::warn!(name = %name, error = %e, "could not load script");
                self.app.screen.error(format!("Error: {}", e))?;
            }
        }

        self.app.screen.blank()?;
        self.pause(input)
    }

    /// Wait for Enter. Ctrl-C or end of input ends the menu instead.
    fn pause(&mut self, input: &mut dyn LineSource) -> io::Result<Flow> {
        self.app.screen.prompt("Press Enter to continue...")?;
        Ok(match input.read_line()? {
            InputEvent::Line(_) => Flow::Continue,
            InputEvent::Interrupted | InputEvent::Eof => Flow::Quit,
        })
    }
}

/// Read a trimmed answer; None when the user interrupts or input ends
fn read_answer(input: &mut dyn LineSource) -> io::Result<Option<String>> {
    Ok(match input.read_line()? {
        InputEvent::Line(line) => Some(line.trim().to_string()),
        InputEvent::Interrupted | InputEvent::Eof => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::testing::app;
    use crate::input::ScriptedInput;
    use crate::config::Settings;
    use crate::scripting::{Outcome, RecordingExecutor, RhaiExecutor};

    fn controller(exec: RecordingExecutor) -> (tempfile::TempDir, Controller<Vec<u8>>) {
        let (dir, app) = app(exec);
        (dir, Controller::new(app))
    }

    fn text(controller: &Controller<Vec<u8>>) -> String {
        controller.app.screen.text()
    }

    #[test]
    fn parse_choices() {
        assert_eq!(MenuChoice::parse("1"), Some(MenuChoice::Create));
        assert_eq!(MenuChoice::parse(" 2 "), Some(MenuChoice::List));
        assert_eq!(MenuChoice::parse("3"), Some(MenuChoice::Run));
        assert_eq!(MenuChoice::parse("4"), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("5"), None);
        assert_eq!(MenuChoice::parse("list"), None);
    }

    #[test]
    fn exit_choice_stops_loop() {
        let (_dir, mut c) = controller(RecordingExecutor::succeeding());
        let mut input = ScriptedInput::lines(&["4", "2"]);

        c.run(&mut input).unwrap();

        assert_eq!(input.remaining(), 1);
        assert!(text(&c).contains("Exiting Scribe..."));
    }

    #[test]
    fn end_of_input_stops_loop() {
        let (_dir, mut c) = controller(RecordingExecutor::succeeding());
        c.run(&mut ScriptedInput::default()).unwrap();
        assert!(text(&c).contains("Choice: "));
    }

    #[test]
    fn interrupt_at_menu_stops_loop() {
        let (_dir, mut c) = controller(RecordingExecutor::succeeding());
        let mut input = ScriptedInput::events(vec![
            InputEvent::Interrupted,
            InputEvent::Line("4".into()),
        ]);

        c.run(&mut input).unwrap();

        assert_eq!(input.remaining(), 1);
    }

    #[test]
    fn list_empty_registry() {
        let (_dir, mut c) = controller(RecordingExecutor::succeeding());
        let mut input = ScriptedInput::lines(&["2", "", "4"]);

        c.run(&mut input).unwrap();

        assert!(text(&c).contains("No scripts saved yet."));
    }

    #[test]
    fn unknown_choice_redraws_menu() {
        let (_dir, mut c) = controller(RecordingExecutor::succeeding());
        let mut input = ScriptedInput::lines(&["9", "4"]);

        c.run(&mut input).unwrap();

        assert_eq!(text(&c).matches("1. Create New Script").count(), 2);
    }

    #[test]
    fn create_save_and_list() {
        let (_dir, mut c) = controller(RecordingExecutor::succeeding());
        let mut input =
            ScriptedInput::lines(&["1", "hello", r#"print("hi")"#, ":save", ":exit", "", "4"]);

        c.run(&mut input).unwrap();

        assert_eq!(c.app.store.registry().len(), 1);
        let out = text(&c);
        assert!(out.contains("* hello"));
        assert!(out.contains("Size: 11 bytes"));
        // The listing after the editor waits before the menu redraws
        let listing = out.rfind("* hello").unwrap();
        assert!(out[listing..].contains("Press Enter to continue..."));
        assert_eq!(input.remaining(), 0);
    }

    #[test]
    fn create_with_blank_name_returns_to_menu() {
        let (_dir, mut c) = controller(RecordingExecutor::succeeding());
        let mut input = ScriptedInput::lines(&["1", "   ", "4"]);

        c.run(&mut input).unwrap();

        assert!(!text(&c).contains("Script Editor"));
        assert!(c.app.store.registry().is_empty());
    }

    #[test]
    fn create_with_invalid_name_is_rejected() {
        let (_dir, mut c) = controller(RecordingExecutor::succeeding());
        let mut input = ScriptedInput::lines(&["1", "../evil", "", "4"]);

        c.run(&mut input).unwrap();

        let out = text(&c);
        assert!(out.contains("invalid script name"));
        assert!(!out.contains("Script Editor"));
    }

    #[test]
    fn run_missing_script_reports_not_found() {
        let exec = RecordingExecutor::succeeding();
        let (_dir, mut c) = controller(exec.clone());
        let mut input = ScriptedInput::lines(&["3", "ghost", "", "4"]);

        c.run(&mut input).unwrap();

        assert!(text(&c).contains("Script 'ghost' not found"));
        assert!(exec.calls().is_empty());
        assert!(c.app.store.registry().is_empty());
    }

    #[test]
    fn run_existing_executes_stored_source() {
        let exec = RecordingExecutor::succeeding();
        let (_dir, mut c) = controller(exec.clone());
        let mut first = ScriptedInput::lines(&["1", "hello", "let x = 2;", "print(x);", ":save", ":exit", "", "4"]);
        c.run(&mut first).unwrap();

        // Fresh process: the registry is reloaded from disk
        let settings = c.app.settings.clone();
        let reopened = App::new(settings, Box::new(exec.clone()), Vec::new());
        let mut c = Controller::new(reopened);
        let mut second = ScriptedInput::lines(&["3", "hello", "", "4"]);
        c.run(&mut second).unwrap();

        assert_eq!(exec.calls(), vec!["let x = 2;\nprint(x);".to_string()]);
        assert!(text(&c).contains("Running hello..."));
    }

    /// App running scripts on the real engine, stored under `dir`
    fn rhai_app(dir: &std::path::Path) -> App<Vec<u8>> {
        let settings = Settings {
            storage_dir: dir.join("apps"),
            clear_screen: false,
            ..Settings::default()
        };
        let executor = RhaiExecutor::new(&settings);
        App::new(settings, Box::new(executor), Vec::new())
    }

    #[test]
    fn hello_script_runs_before_and_after_restart() {
        let dir = tempfile::tempdir().unwrap();

        let mut c = Controller::new(rhai_app(dir.path()));
        let mut input = ScriptedInput::lines(&[
            "1", "hello", r#"print("hi")"#, ":save", ":run", ":exit", "", "4",
        ]);
        c.run(&mut input).unwrap();

        let out = text(&c);
        assert!(out.contains("Running hello..."));
        assert!(!out.contains("Error:"));
        assert_eq!(c.app.store.registry().get("hello").unwrap().size_bytes, 11);

        // Fresh process on the same storage directory
        let mut c = Controller::new(rhai_app(dir.path()));
        let source = c.app.store.load_source("hello").unwrap();
        assert_eq!(c.app.execute("hello", &source).unwrap(), Outcome::Success);

        let mut input = ScriptedInput::lines(&["3", "hello", "", "4"]);
        c.run(&mut input).unwrap();

        let out = text(&c);
        assert_eq!(out.matches("Running hello...").count(), 2);
        assert!(!out.contains("Error:"));
    }

    #[test]
    fn stored_script_fault_is_reported_after_restart() {
        let dir = tempfile::tempdir().unwrap();

        let mut c = Controller::new(rhai_app(dir.path()));
        let mut input =
            ScriptedInput::lines(&["1", "broken", r#"throw "x";"#, ":save", ":exit", "", "4"]);
        c.run(&mut input).unwrap();

        let mut c = Controller::new(rhai_app(dir.path()));
        let source = c.app.store.load_source("broken").unwrap();
        assert!(matches!(
            c.app.execute("broken", &source).unwrap(),
            Outcome::Failure(msg) if msg.contains('x')
        ));

        let mut input = ScriptedInput::lines(&["3", "broken", "", "4"]);
        c.run(&mut input).unwrap();

        assert!(text(&c).contains("Error:"));
        assert_eq!(c.app.store.registry().len(), 1);
    }
}
