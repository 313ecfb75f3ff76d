mod console;
mod writer;

pub use console::{ColorMode, generate_summary};
pub use writer::{OutputFormat, write_snapshot};
