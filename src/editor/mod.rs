//! Editing state: command dispatch over the document plus undo history.
//!
//! The editor owns the live [`Document`] for one panel instance. User
//! mutations arrive as [`Command`]s and snapshot into [`UndoHistory`]
//! before applying; programmatic replacement (the sync bridge's overwrite
//! path) goes through [`Editor::replace_content`], which bypasses undo
//! recording and clears history in the same step.
//!
//! There is no range-selection machinery here: toggled formats are
//! "sticky" and apply to subsequently inserted text, and block commands
//! retarget the active (last) block.

mod commands;
mod history;

pub use commands::{BlockType, Command, TextFormat};
pub use history::UndoHistory;

use crate::document::{Block, Document, Inline, InlineStyle, ListKind};
use crate::image::ImagePayload;

/// The editing surface for one panel instance.
#[derive(Debug, Default)]
pub struct Editor {
    document: Document,
    history: UndoHistory,
    pending_style: InlineStyle,
}

impl Editor {
    /// Create an editor with an empty document.
    pub const fn new() -> Self {
        Self {
            document: Document::empty(),
            history: UndoHistory::new(),
            pending_style: InlineStyle::plain(),
        }
    }

    /// Create an editor seeded with an initial document.
    pub const fn from_document(document: Document) -> Self {
        Self {
            document,
            history: UndoHistory::new(),
            pending_style: InlineStyle::plain(),
        }
    }

    /// The live document.
    pub const fn document(&self) -> &Document {
        &self.document
    }

    /// The sticky formats applied to the next insertion.
    pub const fn pending_style(&self) -> InlineStyle {
        self.pending_style
    }

    /// Whether an undo step is available.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether a redo step is available.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// The kind of the active (last) block.
    pub fn active_block_type(&self) -> BlockType {
        match self.document.blocks().last() {
            Some(Block::Heading { level, .. }) => BlockType::Heading(*level),
            Some(Block::Quote(_)) => BlockType::Quote,
            Some(Block::CodeBlock { .. }) => BlockType::Code,
            Some(Block::List { kind: ListKind::Bullet, .. }) => BlockType::BulletList,
            Some(Block::List { kind: ListKind::Ordered, .. }) => BlockType::OrderedList,
            Some(Block::Paragraph(_) | Block::Rule) | None => BlockType::Paragraph,
        }
    }

    /// Apply a user command. Returns whether the document changed.
    ///
    /// Commands that only adjust editing state (pending formats, history
    /// bookkeeping) return `false` so callers do not schedule a host
    /// notification for them.
    pub fn dispatch(&mut self, command: Command) -> bool {
        match command {
            Command::InsertText(text) => self.insert_text(&text),
            Command::InsertParagraph => {
                self.history.record(self.document.clone());
                match self.document.blocks_mut().last_mut() {
                    Some(Block::List { items, .. }) => items.push(Vec::new()),
                    _ => self.document.push_block(Block::empty_paragraph()),
                }
                true
            }
            Command::FormatText(format) => {
                self.toggle_format(format);
                false
            }
            Command::SetBlockType(target) => self.set_block_type(target),
            Command::InsertImage(payload) => {
                self.history.record(self.document.clone());
                self.insert_image(&payload);
                true
            }
            Command::InsertRule => {
                self.history.record(self.document.clone());
                self.document.push_block(Block::Rule);
                true
            }
            Command::Undo => {
                let current = self.document.clone();
                self.history.undo(current).is_some_and(|previous| {
                    self.document = previous;
                    true
                })
            }
            Command::Redo => {
                let current = self.document.clone();
                self.history.redo(current).is_some_and(|next| {
                    self.document = next;
                    true
                })
            }
            Command::ClearHistory => {
                self.history.clear();
                false
            }
        }
    }

    /// Replace the whole document in one step.
    ///
    /// This is the programmatic mutation path used by the sync bridge: no
    /// undo snapshot is recorded, history is cleared, and sticky formats
    /// reset. Callers observe only the final state — there is no
    /// intermediate empty document.
    pub fn replace_content(&mut self, document: Document) {
        self.document = document;
        self.history.clear();
        self.pending_style = InlineStyle::plain();
    }

    fn insert_text(&mut self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        self.history.record(self.document.clone());
        let style = self.pending_style;
        match self.document.blocks_mut().last_mut() {
            Some(Block::CodeBlock { code, .. }) => code.push_str(text),
            _ => {
                let inlines = active_inlines(self.document.blocks_mut());
                inlines.push(Inline::Text {
                    text: text.to_string(),
                    style,
                });
            }
        }
        if let Some(block) = self.document.blocks_mut().last_mut() {
            block.normalize();
        }
        true
    }

    fn insert_image(&mut self, payload: &ImagePayload) {
        let inlines = active_inlines(self.document.blocks_mut());
        inlines.push(Inline::Image {
            alt: payload.alt_text.clone(),
            src: payload.src.clone(),
        });
    }

    const fn toggle_format(&mut self, format: TextFormat) {
        let style = &mut self.pending_style;
        match format {
            TextFormat::Bold => style.bold = !style.bold,
            TextFormat::Italic => style.italic = !style.italic,
            TextFormat::Underline => style.underline = !style.underline,
            TextFormat::Strikethrough => style.strikethrough = !style.strikethrough,
            TextFormat::Code => style.code = !style.code,
        }
    }

    fn set_block_type(&mut self, target: BlockType) -> bool {
        if self.active_block_type() == target {
            return false;
        }
        self.history.record(self.document.clone());
        let retyped = match self.document.blocks_mut().pop() {
            Some(block) => retype_block(block, target),
            None => retype_block(Block::empty_paragraph(), target),
        };
        self.document.push_block(retyped);
        true
    }
}

/// The inline list new content lands in, creating a paragraph when the
/// trailing block cannot hold inlines.
fn active_inlines(blocks: &mut Vec<Block>) -> &mut Vec<Inline> {
    let needs_paragraph = match blocks.last() {
        Some(Block::Paragraph(_) | Block::Quote(_) | Block::Heading { .. } | Block::List { .. }) => {
            false
        }
        Some(Block::CodeBlock { .. } | Block::Rule) | None => true,
    };
    if needs_paragraph {
        blocks.push(Block::empty_paragraph());
    }
    match blocks.last_mut() {
        Some(Block::List { items, .. }) => {
            if items.is_empty() {
                items.push(Vec::new());
            }
            items.last_mut().expect("just ensured an item")
        }
        Some(block) => block.inlines_mut().expect("trailing block holds inlines"),
        None => unreachable!("a paragraph was just pushed"),
    }
}

fn retype_block(block: Block, target: BlockType) -> Block {
    let inlines = flatten_inlines(block);
    match target {
        BlockType::Paragraph => Block::Paragraph(inlines),
        BlockType::Heading(level) => Block::Heading {
            level: level.clamp(1, 6),
            inlines,
        },
        BlockType::Quote => Block::Quote(inlines),
        BlockType::Code => {
            let mut code = String::new();
            for inline in &inlines {
                code.push_str(inline.visible_text());
            }
            Block::CodeBlock {
                language: None,
                code,
            }
        }
        BlockType::BulletList => Block::List {
            kind: ListKind::Bullet,
            items: vec![inlines],
        },
        BlockType::OrderedList => Block::List {
            kind: ListKind::Ordered,
            items: vec![inlines],
        },
    }
}

fn flatten_inlines(block: Block) -> Vec<Inline> {
    match block {
        Block::Paragraph(inlines) | Block::Quote(inlines) => inlines,
        Block::Heading { inlines, .. } => inlines,
        Block::CodeBlock { code, .. } => {
            if code.is_empty() {
                Vec::new()
            } else {
                vec![Inline::plain(code)]
            }
        }
        Block::List { items, .. } => {
            let mut merged = Vec::new();
            for (idx, item) in items.into_iter().enumerate() {
                if idx > 0 {
                    merged.push(Inline::plain(" "));
                }
                merged.extend(item);
            }
            merged
        }
        Block::Rule => Vec::new(),
    }
}
