//! Toolbar glue: UI affordances mapped onto editor commands, plus the
//! derived display state the embedding surface renders from.

use crate::editor::{BlockType, Command, Editor, TextFormat};

/// A toolbar affordance. The set mirrors the buttons the editing surface
/// exposes: inline format toggles, undo/redo, and the block-type selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Undo,
    Redo,
    Paragraph,
    Heading(u8),
}

impl ToolbarAction {
    /// Parse an action from its wire name (used by the host harness).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "bold" => Some(Self::Bold),
            "italic" => Some(Self::Italic),
            "underline" => Some(Self::Underline),
            "strikethrough" => Some(Self::Strikethrough),
            "undo" => Some(Self::Undo),
            "redo" => Some(Self::Redo),
            "paragraph" => Some(Self::Paragraph),
            _ => {
                let level = name.strip_prefix('h')?.parse::<u8>().ok()?;
                (1..=6).contains(&level).then_some(Self::Heading(level))
            }
        }
    }

    /// The editor command this affordance dispatches.
    pub fn command(self) -> Command {
        match self {
            Self::Bold => Command::FormatText(TextFormat::Bold),
            Self::Italic => Command::FormatText(TextFormat::Italic),
            Self::Underline => Command::FormatText(TextFormat::Underline),
            Self::Strikethrough => Command::FormatText(TextFormat::Strikethrough),
            Self::Undo => Command::Undo,
            Self::Redo => Command::Redo,
            Self::Paragraph => Command::SetBlockType(BlockType::Paragraph),
            Self::Heading(level) => Command::SetBlockType(BlockType::Heading(level)),
        }
    }
}

/// Display state for the toolbar, recomputed after every dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolbarState {
    pub can_undo: bool,
    pub can_redo: bool,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub block_type: BlockType,
}

impl ToolbarState {
    /// Derive the toolbar state from the editor.
    pub fn read(editor: &Editor) -> Self {
        let style = editor.pending_style();
        Self {
            can_undo: editor.can_undo(),
            can_redo: editor.can_redo(),
            bold: style.bold,
            italic: style.italic,
            underline: style.underline,
            strikethrough: style.strikethrough,
            block_type: editor.active_block_type(),
        }
    }
}
