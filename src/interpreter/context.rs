use super::SystemContext;
use std::{
    io::{self, Write},
    time::Duration,
};

pub struct StdioContext;

impl SystemContext for StdioContext {
    fn writeln(&mut self, text: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{text}")?;
        stdout.flush()
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Records output and sleeps instead of performing them.
#[derive(Debug, Default)]
pub struct BufferedContext {
    buffer: String,
    sleeps: Vec<Duration>,
}

impl BufferedContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output(&self) -> &str {
        &self.buffer
    }

    pub fn sleeps(&self) -> &[Duration] {
        &self.sleeps
    }

    pub fn into_data(self) -> String {
        self.buffer
    }
}

impl SystemContext for BufferedContext {
    fn writeln(&mut self, text: &str) -> io::Result<()> {
        self.buffer.push_str(text);
        self.buffer.push('\n');
        Ok(())
    }

    fn sleep(&mut self, duration: Duration) {
        self.sleeps.push(duration);
    }
}
