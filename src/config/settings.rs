use std::path::PathBuf;

/// Settings that can be customized via the Rhai init file
#[derive(Debug, Clone)]
pub struct Settings {
    // Storage
    pub storage_dir: PathBuf,

    // Editing
    pub command_prefix: String, // Marks a line as a directive

    // Execution
    pub max_operations: u64, // 0 = unlimited
    pub max_expr_depth: usize, // 0 = unlimited

    // Display
    pub clear_screen: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage_dir: default_storage_dir(),
            command_prefix: ":".to_string(),
            max_operations: 0,
            max_expr_depth: 0,
            clear_screen: true,
        }
    }
}

fn default_storage_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".config").join("scribe").join("apps"))
        .unwrap_or_else(|| PathBuf::from(".scribe/apps"))
}
