//! Blocking line reader for the real terminal
//!
//! Reads happen on a single-threaded tokio runtime so that each pending
//! read can race `ctrl_c()`. Once the handler is installed, Ctrl-C no
//! longer kills the process: it surfaces as [`InputEvent::Interrupted`].

use std::io;

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::runtime::{Builder, Runtime};

use super::{InputEvent, LineSource};

pub struct ConsoleInput {
    // Option so Drop can shut the runtime down without waiting on stdin
    runtime: Option<Runtime>,
    lines: Lines<BufReader<Stdin>>,
}

impl ConsoleInput {
    pub fn new() -> io::Result<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        let lines = {
            let _guard = runtime.enter();
            BufReader::new(tokio::io::stdin()).lines()
        };

        Ok(Self {
            runtime: Some(runtime),
            lines,
        })
    }
}

impl LineSource for ConsoleInput {
    fn read_line(&mut self) -> io::Result<InputEvent> {
        let Some(runtime) = self.runtime.as_ref() else {
            return Ok(InputEvent::Eof);
        };
        let lines = &mut self.lines;

        runtime.block_on(async {
            tokio::select! {
                // next_line is cancel safe: a line that arrives after an
                // interrupt is handed out by the following call
                line = lines.next_line() => line.map(|line| match line {
                    Some(line) => InputEvent::Line(line),
                    None => InputEvent::Eof,
                }),
                signal = tokio::signal::ctrl_c() => signal.map(|()| InputEvent::Interrupted),
            }
        })
    }
}

impl Drop for ConsoleInput {
    fn drop(&mut self) {
        // A stdin read may still be parked on a blocking thread
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}
