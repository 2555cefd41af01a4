//! Core document tree types.

/// Character-level formatting flags for a text run.
///
/// `underline` has no Markdown syntax; it survives editing but is dropped
/// by serialization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct InlineStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub code: bool,
}

impl InlineStyle {
    /// Style with no flags set.
    pub const fn plain() -> Self {
        Self {
            bold: false,
            italic: false,
            underline: false,
            strikethrough: false,
            code: false,
        }
    }

    /// Whether no formatting flags are set.
    pub const fn is_plain(&self) -> bool {
        !(self.bold || self.italic || self.underline || self.strikethrough || self.code)
    }
}

/// Inline content within a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    /// A run of text with uniform style.
    Text { text: String, style: InlineStyle },
    /// A hyperlink with its display text.
    Link { text: String, url: String },
    /// An inline image (`src` may be a URL or a data URL).
    Image { alt: String, src: String },
}

impl Inline {
    /// Create a plain (unstyled) text run.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::Text {
            text: text.into(),
            style: InlineStyle::plain(),
        }
    }

    /// The user-visible text of this inline node.
    ///
    /// Images contribute nothing: a document holding only an image has
    /// empty text content, matching how the editing surface reports
    /// emptiness.
    pub fn visible_text(&self) -> &str {
        match self {
            Self::Text { text, .. } | Self::Link { text, .. } => text,
            Self::Image { .. } => "",
        }
    }
}

/// List flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Bullet,
    Ordered,
}

/// A top-level block in the document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Paragraph(Vec<Inline>),
    Heading { level: u8, inlines: Vec<Inline> },
    Quote(Vec<Inline>),
    CodeBlock { language: Option<String>, code: String },
    List { kind: ListKind, items: Vec<Vec<Inline>> },
    Rule,
}

impl Block {
    /// Create an empty paragraph.
    pub const fn empty_paragraph() -> Self {
        Self::Paragraph(Vec::new())
    }

    /// Inline children, for block kinds that carry them.
    pub fn inlines(&self) -> Option<&[Inline]> {
        match self {
            Self::Paragraph(inlines) | Self::Quote(inlines) => Some(inlines),
            Self::Heading { inlines, .. } => Some(inlines),
            Self::CodeBlock { .. } | Self::List { .. } | Self::Rule => None,
        }
    }

    /// Mutable inline children, for block kinds that carry them.
    pub fn inlines_mut(&mut self) -> Option<&mut Vec<Inline>> {
        match self {
            Self::Paragraph(inlines) | Self::Quote(inlines) => Some(inlines),
            Self::Heading { inlines, .. } => Some(inlines),
            Self::CodeBlock { .. } | Self::List { .. } | Self::Rule => None,
        }
    }

    /// Append this block's visible text to `out`.
    pub fn collect_text(&self, out: &mut String) {
        match self {
            Self::Paragraph(inlines) | Self::Quote(inlines) => {
                for inline in inlines {
                    out.push_str(inline.visible_text());
                }
            }
            Self::Heading { inlines, .. } => {
                for inline in inlines {
                    out.push_str(inline.visible_text());
                }
            }
            Self::CodeBlock { code, .. } => out.push_str(code),
            Self::List { items, .. } => {
                for item in items {
                    for inline in item {
                        out.push_str(inline.visible_text());
                    }
                }
            }
            Self::Rule => {}
        }
    }

    /// Merge adjacent text runs with identical style and drop empty runs,
    /// so equal documents have equal trees and serialization is canonical.
    pub fn normalize(&mut self) {
        if let Some(inlines) = self.inlines_mut() {
            normalize_inlines(inlines);
        }
        if let Self::List { items, .. } = self {
            for item in items {
                normalize_inlines(item);
            }
        }
    }
}

fn normalize_inlines(inlines: &mut Vec<Inline>) {
    let mut merged: Vec<Inline> = Vec::with_capacity(inlines.len());
    for inline in inlines.drain(..) {
        if let Inline::Text { text, .. } = &inline
            && text.is_empty()
        {
            continue;
        }
        if let Inline::Text { text, style } = &inline
            && let Some(Inline::Text { text: prev, style: prev_style }) = merged.last_mut()
            && style == prev_style
        {
            prev.push_str(text);
            continue;
        }
        merged.push(inline);
    }
    *inlines = merged;
}

/// The editable rich-text tree: an ordered sequence of blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    blocks: Vec<Block>,
}

impl Document {
    /// Create an empty document (no blocks).
    pub const fn empty() -> Self {
        Self { blocks: Vec::new() }
    }

    /// Create a document from a list of blocks.
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    /// The blocks in document order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Mutable access to the block list.
    pub fn blocks_mut(&mut self) -> &mut Vec<Block> {
        &mut self.blocks
    }

    /// Number of top-level blocks.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Append a block.
    pub fn push_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// The concatenated visible text of the whole document.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for block in &self.blocks {
            block.collect_text(&mut out);
        }
        out
    }

    /// Whether the document has no visible text.
    ///
    /// This is the emptiness signal the sync bridge consults: a document
    /// holding only empty paragraphs (or nothing) counts as empty.
    pub fn is_empty_text(&self) -> bool {
        self.blocks.iter().all(|block| {
            let mut text = String::new();
            block.collect_text(&mut text);
            text.is_empty()
        })
    }

    /// Normalize every block (merge adjacent same-style runs).
    pub fn normalize(&mut self) {
        for block in &mut self.blocks {
            block.normalize();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn styled(text: &str, style: InlineStyle) -> Inline {
        Inline::Text {
            text: text.to_string(),
            style,
        }
    }

    #[test]
    fn test_empty_document_has_no_text() {
        let doc = Document::empty();
        assert!(doc.is_empty_text());
        assert_eq!(doc.text_content(), "");
    }

    #[test]
    fn test_empty_paragraph_counts_as_empty() {
        let doc = Document::new(vec![Block::empty_paragraph()]);
        assert!(doc.is_empty_text());
    }

    #[test]
    fn test_image_only_document_counts_as_empty() {
        let doc = Document::new(vec![Block::Paragraph(vec![Inline::Image {
            alt: "photo".to_string(),
            src: "https://example.com/a.png".to_string(),
        }])]);
        assert!(doc.is_empty_text());
    }

    #[test]
    fn test_text_content_concatenates_blocks() {
        let doc = Document::new(vec![
            Block::Heading {
                level: 1,
                inlines: vec![Inline::plain("Title")],
            },
            Block::Paragraph(vec![Inline::plain("Body")]),
        ]);
        assert_eq!(doc.text_content(), "TitleBody");
        assert!(!doc.is_empty_text());
    }

    #[test]
    fn test_code_block_text_is_visible() {
        let doc = Document::new(vec![Block::CodeBlock {
            language: Some("rust".to_string()),
            code: "fn main() {}".to_string(),
        }]);
        assert!(!doc.is_empty_text());
    }

    #[test]
    fn test_rule_contributes_no_text() {
        let doc = Document::new(vec![Block::Rule]);
        assert!(doc.is_empty_text());
    }

    #[test]
    fn test_normalize_merges_same_style_runs() {
        let bold = InlineStyle {
            bold: true,
            ..InlineStyle::plain()
        };
        let mut block = Block::Paragraph(vec![
            styled("Hel", bold),
            styled("lo", bold),
            styled(" world", InlineStyle::plain()),
        ]);
        block.normalize();
        assert_eq!(
            block,
            Block::Paragraph(vec![
                styled("Hello", bold),
                styled(" world", InlineStyle::plain()),
            ])
        );
    }

    #[test]
    fn test_normalize_keeps_distinct_styles_separate() {
        let bold = InlineStyle {
            bold: true,
            ..InlineStyle::plain()
        };
        let mut block = Block::Paragraph(vec![styled("a", bold), styled("b", InlineStyle::plain())]);
        block.normalize();
        assert_eq!(block.inlines().map(<[Inline]>::len), Some(2));
    }

    #[test]
    fn test_normalize_drops_empty_runs() {
        let mut block = Block::Paragraph(vec![
            styled("", InlineStyle::plain()),
            styled("text", InlineStyle::plain()),
        ]);
        block.normalize();
        assert_eq!(block, Block::Paragraph(vec![Inline::plain("text")]));
    }

    #[test]
    fn test_normalize_does_not_merge_across_links() {
        let mut block = Block::Paragraph(vec![
            Inline::plain("see "),
            Inline::Link {
                text: "docs".to_string(),
                url: "https://example.com".to_string(),
            },
            Inline::plain(" here"),
        ]);
        block.normalize();
        assert_eq!(block.inlines().map(<[Inline]>::len), Some(3));
    }

    #[test]
    fn test_list_normalize_covers_items() {
        let mut block = Block::List {
            kind: ListKind::Bullet,
            items: vec![vec![
                styled("a", InlineStyle::plain()),
                styled("b", InlineStyle::plain()),
            ]],
        };
        block.normalize();
        let Block::List { items, .. } = &block else {
            panic!("expected list");
        };
        assert_eq!(items[0], vec![Inline::plain("ab")]);
    }
}
