//! # Inline Kinds
//!
//! One module per inline grammar production. Each owns its lead
//! character(s) as a `LEAD` constant; the dispatcher in
//! [`parser`](super::parser) reads them, it never hardcodes `<` or `[`.
//!
//! - **`escape`**: `\` + ASCII punctuation
//! - **`entity`**: named and numeric character references
//! - **`autolink`**: `<scheme:body>` with a scheme whitelist
//! - **`image_reference`**: `!` wrapped around `link_reference`
//! - **`link_reference`**: `[text][label]` resolved via the reference store
//! - **`all`** / **`composite`**: combinators for small sub-grammars

pub mod all;
pub mod autolink;
pub mod composite;
pub mod entity;
pub mod escape;
pub mod image_reference;
pub mod link_reference;

pub use all::AllParser;
pub use autolink::AutolinkParser;
pub use composite::CompositeInlineParser;
