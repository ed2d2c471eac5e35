//! Rhai-backed script execution
//!
//! Every run compiles the text on its own and evaluates it against a new
//! `Scope`, so variables and functions from one run never leak into the next.

use rhai::{Engine, Scope};

use super::{Executor, Outcome};
use crate::config::Settings;

/// Runs scripts with the embedded Rhai engine
pub struct RhaiExecutor {
    engine: Engine,
}

impl RhaiExecutor {
    pub fn new(settings: &Settings) -> Self {
        Self {
            engine: Self::create_engine(settings),
        }
    }

    fn create_engine(settings: &Settings) -> Engine {
        let mut engine = Engine::new();

        // 0 leaves the engine unlimited
        engine.set_max_expr_depths(settings.max_expr_depth, settings.max_expr_depth);
        engine.set_max_operations(settings.max_operations);

        engine.on_print(|msg| println!("{msg}"));
        engine.on_debug(|msg, _source, pos| {
            if pos.is_none() {
                println!("{msg}");
            } else {
                println!("{pos:?} | {msg}");
            }
        });

        engine
    }
}

impl Default for RhaiExecutor {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

impl Executor for RhaiExecutor {
    fn execute(&mut self, source: &str) -> Outcome {
        let ast = match self.engine.compile(source) {
            Ok(ast) => ast,
            Err(e) => {
                tracing::debug!(error = %e, "script failed to parse");
                return Outcome::Failure(format!("Script parse error: {}", e));
            }
        };

        let mut scope = Scope::new();
        match self.engine.run_ast_with_scope(&mut scope, &ast) {
            Ok(()) => Outcome::Success,
            Err(e) => {
                tracing::debug!(error = %e, "script raised a fault");
                Outcome::Failure(format!("Script error: {}", e))
            }
        }
    }
}
