pub mod lines;
pub mod slice;
pub mod span;

pub use lines::{LineRef, expand_leading_tabs, lines_with_spans};
pub use slice::preview;
pub use span::Span;
