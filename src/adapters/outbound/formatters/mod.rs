pub mod dot_formatter;
pub mod json_formatter;
pub mod tree_formatter;

pub use dot_formatter::DotFormatter;
pub use json_formatter::JsonFormatter;
pub use tree_formatter::TreeFormatter;
