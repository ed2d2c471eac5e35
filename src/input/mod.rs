//! Input module - where interactive lines come from

mod console;

pub use console::ConsoleInput;

use std::io;

/// One unit of interactive input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A line with its terminator stripped
    Line(String),
    /// The user pressed Ctrl-C while we were waiting
    Interrupted,
    /// No more input will arrive
    Eof,
}

/// Blocking source of input lines
pub trait LineSource {
    fn read_line(&mut self) -> io::Result<InputEvent>;
}

#[cfg(test)]
pub use scripted::ScriptedInput;

#[cfg(test)]
mod scripted {
    use std::collections::VecDeque;
    use std::io;

    use super::{InputEvent, LineSource};

    /// Replays queued events, then reports end of input forever
    #[derive(Debug, Default)]
    pub struct ScriptedInput {
        events: VecDeque<InputEvent>,
    }

    impl ScriptedInput {
        pub fn lines(lines: &[&str]) -> Self {
            Self {
                events: lines
                    .iter()
                    .map(|l| InputEvent::Line(l.to_string()))
                    .collect(),
            }
        }

        pub fn events(events: Vec<InputEvent>) -> Self {
            Self {
                events: events.into(),
            }
        }

        pub fn remaining(&self) -> usize {
            self.events.len()
        }
    }

    impl LineSource for ScriptedInput {
        fn read_line(&mut self) -> io::Result<InputEvent> {
            Ok(self.events.pop_front().unwrap_or(InputEvent::Eof))
        }
    }
}
