pub mod command;
pub mod terminal;

pub use command::{parse_line, Command};
pub use terminal::{TerminalView, HELP};
