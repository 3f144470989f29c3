/// Formatted reporter: text shaping and the terminal report.
pub mod render;
pub mod text;

pub use render::{RenderOptions, Reporter};
