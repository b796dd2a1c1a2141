mod lines;

pub use lines::{Line, TextError, get_lines, split_lines};
