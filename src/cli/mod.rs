/// CLI layer: clap definitions, structured output, error reporting.
pub mod args;
pub mod output;

pub use args::{Cli, OutputFormat, ViewArgs};
pub use output::{OutputCtx, write_error};
