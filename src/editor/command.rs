/// A control line typed in the editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    Save,
    Run,
    Clear,
    Exit,
    /// Anything else after the prefix, trimmed
    Unknown(String),
}

impl Directive {
    /// Classify `line`. Every line starting with `prefix` is a directive,
    /// recognized or not; everything else is script content.
    pub fn parse(line: &str, prefix: &str) -> Option<Self> {
        let rest = line.strip_prefix(prefix)?;
        let directive = match rest.trim() {
            "save" => Directive::Save,
            "run" => Directive::Run,
            "clear" => Directive::Clear,
            "exit" => Directive::Exit,
            other => Directive::Unknown(other.to_string()),
        };
        Some(directive)
    }

    pub fn display(&self) -> &str {
        match self {
            Directive::Save => "save",
            Directive::Run => "run",
            Directive::Clear => "clear",
            Directive::Exit => "exit",
            Directive::Unknown(text) => text,
        }
    }
}
