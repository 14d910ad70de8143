pub mod console;
pub mod error;
pub mod logging;
pub mod pacing;
pub mod prompt;

pub use console::ConsoleShell;
pub use error::ShellError;
pub use pacing::{Beat, NoPacing, Pacing, SleepPacing};
