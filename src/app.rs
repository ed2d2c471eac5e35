use std::io::{self, Write};

use crate::config::Settings;
use crate::editor::ScriptBuffer;
use crate::registry::RegistryStore;
use crate::render::Screen;
use crate::scripting::{Executor, Outcome};

/// Process-wide state shared by the menu and the editing session
pub struct App<W: Write> {
    pub settings: Settings,
    pub store: RegistryStore,
    pub executor: Box<dyn Executor>,
    pub screen: Screen<W>,
}

impl<W: Write> App<W> {
    pub fn new(settings: Settings, executor: Box<dyn Executor>, out: W) -> Self {
        let store = RegistryStore::open(&settings.storage_dir);
        let screen = Screen::new(out, settings.clear_screen);
        Self {
            settings,
            store,
            executor,
            screen,
        }
    }

    /// Persist the buffer under its name and report the result.
    ///
    /// A failed save is shown to the user and leaves the registry as it was.
    pub fn save_buffer(&mut self, buffer: &ScriptBuffer) -> io::Result<()> {
        let source = buffer.source();
        match self
            .store
            .save_script(buffer.name(), buffer.created_at(), &source)
        {
            Ok(record) => {
                self.screen.blank()?;
                self.screen
                    .success(format!("Script '{}' saved!", buffer.name()))?;
                self.screen
                    .line(format!("Location: {}", record.storage_path.display()))?;
            }
            Err(e) => {
                tracing::warn!(name = buffer.name(), error = %e, "save failed");
                self.screen.error(format!("Save failed: {}", e))?;
            }
        }
        Ok(())
    }

    /// Hand `source` to the executor and report a fault if there is one
    pub fn execute(&mut self, label: &str, source: &str) -> io::Result<Outcome> {
        self.screen.blank()?;
        self.screen.line(format!("Running {}...", label))?;
        self.screen.blank()?;
        // Script output goes straight to stdout, so ours must land first
        self.screen.flush()?;

        tracing::debug!(label, bytes = source.len(), "dispatching script");
        let outcome = self.executor.execute(source);
        tracing::debug!(label, success = outcome.is_success(), "script finished");

        if let Outcome::Failure(message) = &outcome {
            self.screen.error(format!("Error: {}", message))?;
        }
        Ok(outcome)
    }
}
