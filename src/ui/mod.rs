// Output formatting module

pub mod formatters;
pub mod output;

pub use formatters::format_bytes;
pub use output::{render, render_fatal};
