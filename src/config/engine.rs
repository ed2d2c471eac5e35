//! Rhai-driven configuration
//!
//! The init file lives at `~/.config/scribe/init.rhai` and talks to the
//! `scribe::config` namespace:
//! ```rhai
//! scribe::config::set_storage_dir("/srv/apps");
//! scribe::config::set_command_prefix("!");
//! scribe::config::set_max_operations(1_000_000);
//! scribe::config::set_max_expr_depth(64);
//! scribe::config::set_clear_screen(false);
//! ```

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use rhai::{Engine, EvalAltResult, Module, Scope};

use super::Settings;

/// The Rhai engine that evaluates the init file
pub struct ConfigEngine {
    engine: Engine,
    settings: Arc<RwLock<Settings>>,
}

impl ConfigEngine {
    pub fn new() -> Self {
        let settings = Arc::new(RwLock::new(Settings::default()));
        let engine = Self::create_engine(Arc::clone(&settings));

        Self { engine, settings }
    }

    fn create_engine(settings: Arc<RwLock<Settings>>) -> Engine {
        let mut engine = Engine::new();

        // An init file has no business recursing deeply or looping forever
        engine.set_max_expr_depths(64, 64);
        engine.set_max_operations(100_000);

        let mut scribe_module = Module::new();
        scribe_module.set_sub_module("config", create_module(settings));
        engine.register_static_module("scribe", scribe_module.into());

        engine.on_print(|msg| tracing::info!(target: "scribe::config", "{msg}"));

        engine
    }

    /// Load and execute a config file
    pub fn load_file(&mut self, path: &Path) -> Result<(), String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        self.eval(&content)
    }

    /// Evaluate a Rhai config string
    pub fn eval(&mut self, script: &str) -> Result<(), String> {
        let ast = self
            .engine
            .compile(script)
            .map_err(|e| format!("Config parse error: {}", e))?;

        let mut scope = Scope::new();
        self.engine
            .run_ast_with_scope(&mut scope, &ast)
            .map_err(|e| format!("Config error: {}", e))?;

        Ok(())
    }

    /// Get the current settings (cloned)
    pub fn settings(&self) -> Settings {
        self.settings.read().map(|s| s.clone()).unwrap_or_default()
    }

    /// Get the config directory path
    /// Uses ~/.config/scribe/ on all platforms for consistency
    pub fn config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("scribe"))
    }

    /// Get the default config file path
    pub fn config_file() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("init.rhai"))
    }

    /// Load the default config file if it exists
    pub fn load_default(&mut self) -> Result<(), String> {
        if let Some(config_file) = Self::config_file() {
            if config_file.exists() {
                tracing::debug!(path = %config_file.display(), "loading init file");
                return self.load_file(&config_file);
            }
        }
        Ok(()) // No config file is fine
    }
}

impl Default for ConfigEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Build `scribe::config` with access to settings
fn create_module(settings: Arc<RwLock<Settings>>) -> Module {
    let mut module = Module::new();

    // set_storage_dir(path: &str)
    {
        let s = Arc::clone(&settings);
        module.set_native_fn(
            "set_storage_dir",
            move |path: &str| -> Result<(), Box<EvalAltResult>> {
                if let Ok(mut settings) = s.write() {
                    settings.storage_dir = PathBuf::from(path);
                }
                Ok(())
            },
        );
    }

    // get_storage_dir() -> String
    {
        let s = Arc::clone(&settings);
        module.set_native_fn(
            "get_storage_dir",
            move || -> Result<String, Box<EvalAltResult>> {
                Ok(s
                    .read()
                    .map(|s| s.storage_dir.display().to_string())
                    .unwrap_or_default())
            },
        );
    }

    // set_command_prefix(prefix: &str), empty prefixes are ignored
    {
        let s = Arc::clone(&settings);
        module.set_native_fn(
            "set_command_prefix",
            move |prefix: &str| -> Result<(), Box<EvalAltResult>> {
                if prefix.is_empty() {
                    tracing::warn!("ignoring empty command prefix");
                    return Ok(());
                }
                if let Ok(mut settings) = s.write() {
                    settings.command_prefix = prefix.to_string();
                }
                Ok(())
            },
        );
    }

    // get_command_prefix() -> String
    {
        let s = Arc::clone(&settings);
        module.set_native_fn(
            "get_command_prefix",
            move || -> Result<String, Box<EvalAltResult>> {
                Ok(s.read()
                    .map(|s| s.command_prefix.clone())
                    .unwrap_or_default())
            },
        );
    }

    // set_max_operations(limit: i64)
    {
        let s = Arc::clone(&settings);
        module.set_native_fn(
            "set_max_operations",
            move |limit: i64| -> Result<(), Box<EvalAltResult>> {
                if let Ok(mut settings) = s.write() {
                    settings.max_operations = limit.max(0) as u64;
                }
                Ok(())
            },
        );
    }

    // set_max_expr_depth(depth: i64)
    {
        let s = Arc::clone(&settings);
        module.set_native_fn(
            "set_max_expr_depth",
            move |depth: i64| -> Result<(), Box<EvalAltResult>> {
                if let Ok(mut settings) = s.write() {
                    settings.max_expr_depth = depth.max(0) as usize;
                }
                Ok(())
            },
        );
    }

    // set_clear_screen(enabled: bool)
    {
        let s = Arc::clone(&settings);
        module.set_native_fn(
            "set_clear_screen",
            move |enabled: bool| -> Result<(), Box<EvalAltResult>> {
                if let Ok(mut settings) = s.write() {
                    settings.clear_screen = enabled;
                }
                Ok(())
            },
        );
    }

    module
}
