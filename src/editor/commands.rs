//! The editor's command vocabulary.
//!
//! Commands are the only way user-originated mutations reach the document;
//! the toolbar and the host harness both dispatch them through
//! [`Editor::dispatch`](super::Editor::dispatch).

use crate::image::ImagePayload;

/// A toggleable character format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextFormat {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Code,
}

/// A retargetable block kind for the active block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockType {
    Paragraph,
    Heading(u8),
    Quote,
    Code,
    BulletList,
    OrderedList,
}

/// All editor commands.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Insert text at the active position, with the pending formats.
    InsertText(String),
    /// Start a new paragraph (or list item when the active block is a list).
    InsertParagraph,
    /// Toggle a pending character format for subsequent insertions.
    FormatText(TextFormat),
    /// Retype the active block.
    SetBlockType(BlockType),
    /// Insert an image at the active position.
    InsertImage(ImagePayload),
    /// Insert a horizontal rule.
    InsertRule,
    /// Revert the last user edit.
    Undo,
    /// Re-apply the last undone edit.
    Redo,
    /// Drop all undo/redo state.
    ClearHistory,
}
