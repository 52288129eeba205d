pub mod context;
pub mod environment;
mod interpolate;
mod tree;

use std::{io, time::Duration};
pub use tree::{evaluate, TreeWalkInterpreter};

/// Everything the interpreter does to the outside world goes through here.
pub trait SystemContext {
    fn writeln(&mut self, text: &str) -> io::Result<()>;

    fn sleep(&mut self, duration: Duration);
}
