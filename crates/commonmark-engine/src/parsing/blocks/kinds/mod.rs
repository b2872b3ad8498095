pub mod block_quote;
pub mod code_fence;
pub mod paragraph;

pub use block_quote::BlockQuote;
pub use code_fence::{CodeFence, Fence, FencedCode};
pub use paragraph::Paragraph;
