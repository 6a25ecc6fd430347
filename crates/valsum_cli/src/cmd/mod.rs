/// Argument list decode command.
pub mod args;
/// Buffer-level information command.
pub mod info;
/// JSON rendering of decoded summaries.
pub mod json;
/// Indented text rendering of decoded summaries.
pub mod print;
/// Single value decode command.
pub mod value;

pub(crate) mod util;
