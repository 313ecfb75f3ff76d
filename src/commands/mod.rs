mod common;
mod init;
mod scan;
mod validate;

pub use init::{InitArgs, init_config};
pub use scan::{ScanArgs, run_scan};
pub use validate::{ValidateArgs, validate_config};
