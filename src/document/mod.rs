//! The rich-text document tree.
//!
//! A [`Document`] is an ordered list of [`Block`]s; blocks that carry text
//! hold [`Inline`] runs with per-run [`InlineStyle`] flags. The tree covers
//! the closed set of constructs the Markdown codec understands — headings,
//! paragraphs, quotes, code blocks, bullet/ordered lists, links, images,
//! and horizontal rules.
//!
//! The tree is plain data: parsing lives in [`crate::codec`] and mutation
//! policy (undo, commands) lives in [`crate::editor`].

mod types;

pub use types::{Block, Document, Inline, InlineStyle, ListKind};
