mod buffer;
mod command;
mod session;

pub use buffer::ScriptBuffer;
pub use command::Directive;
pub use session::EditingSession;
