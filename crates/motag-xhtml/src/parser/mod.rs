//! Tree construction from the token stream.

/// Stack-of-open-elements tree builder.
pub mod tree_builder;

pub use tree_builder::{VOID_ELEMENTS, XhtmlParser, is_void_element};
