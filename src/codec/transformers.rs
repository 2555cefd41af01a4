//! Per-syntax codec strategies.
//!
//! Each block transformer covers one construct of the closed set in both
//! directions: claiming a comrak AST node on import, and emitting Markdown
//! for a matching [`Block`] on export. Inline forms (emphasis, links,
//! images, inline code) are handled by [`collect_inlines`] /
//! [`write_inlines`], which apply the format markers in a fixed nesting
//! order so serialization is canonical.

use comrak::nodes::{AstNode, ListType, NodeValue};

use crate::document::{Block, Inline, InlineStyle, ListKind};

use super::{CodecError, Syntax};

/// A codec strategy for one block-level Markdown construct.
pub trait Transformer {
    /// The construct this strategy covers.
    fn syntax(&self) -> Syntax;

    /// Import a comrak AST node, if this strategy recognizes it.
    fn import<'a>(&self, node: &'a AstNode<'a>) -> Option<Block>;

    /// Whether this strategy serializes the given block.
    fn handles(&self, block: &Block) -> bool;

    /// Serialize a block this strategy handles.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError`] for malformed trees (defensive; editor-built
    /// trees never trip this).
    fn export(&self, block: &Block) -> Result<String, CodecError>;
}

pub struct HeadingTransformer;

impl Transformer for HeadingTransformer {
    fn syntax(&self) -> Syntax {
        Syntax::Heading
    }

    fn import<'a>(&self, node: &'a AstNode<'a>) -> Option<Block> {
        let level = match &node.data.borrow().value {
            NodeValue::Heading(heading) => heading.level,
            _ => return None,
        };
        Some(Block::Heading {
            level,
            inlines: collect_inlines(node),
        })
    }

    fn handles(&self, block: &Block) -> bool {
        matches!(block, Block::Heading { .. })
    }

    fn export(&self, block: &Block) -> Result<String, CodecError> {
        let Block::Heading { level, inlines } = block else {
            return Ok(String::new());
        };
        if !(1..=6).contains(level) {
            return Err(CodecError::HeadingLevel(*level));
        }
        let mut out = "#".repeat(usize::from(*level));
        out.push(' ');
        write_inlines(inlines, &mut out);
        Ok(out)
    }
}

pub struct QuoteTransformer;

impl Transformer for QuoteTransformer {
    fn syntax(&self) -> Syntax {
        Syntax::Quote
    }

    fn import<'a>(&self, node: &'a AstNode<'a>) -> Option<Block> {
        if !matches!(node.data.borrow().value, NodeValue::BlockQuote) {
            return None;
        }
        // A quote imports as a single run of inline content; paragraphs
        // inside the quote are joined with spaces.
        let mut inlines = Vec::new();
        for (idx, child) in node.children().enumerate() {
            if idx > 0 {
                inlines.push(Inline::plain(" "));
            }
            inlines.extend(collect_inlines(child));
        }
        Some(Block::Quote(inlines))
    }

    fn handles(&self, block: &Block) -> bool {
        matches!(block, Block::Quote(_))
    }

    fn export(&self, block: &Block) -> Result<String, CodecError> {
        let Block::Quote(inlines) = block else {
            return Ok(String::new());
        };
        let mut out = String::from("> ");
        write_inlines(inlines, &mut out);
        Ok(out)
    }
}

pub struct CodeBlockTransformer;

impl Transformer for CodeBlockTransformer {
    fn syntax(&self) -> Syntax {
        Syntax::CodeBlock
    }

    fn import<'a>(&self, node: &'a AstNode<'a>) -> Option<Block> {
        let data = node.data.borrow();
        let NodeValue::CodeBlock(code_block) = &data.value else {
            return None;
        };
        let language = code_block
            .info
            .split_whitespace()
            .next()
            .filter(|s| !s.is_empty())
            .map(ToOwned::to_owned);
        let code = code_block
            .literal
            .strip_suffix('\n')
            .unwrap_or(&code_block.literal)
            .to_string();
        Some(Block::CodeBlock { language, code })
    }

    fn handles(&self, block: &Block) -> bool {
        matches!(block, Block::CodeBlock { .. })
    }

    fn export(&self, block: &Block) -> Result<String, CodecError> {
        let Block::CodeBlock { language, code } = block else {
            return Ok(String::new());
        };
        // The fence must be longer than any backtick run in the content.
        let longest_run = code
            .lines()
            .map(|line| line.chars().take_while(|&c| c == '`').count())
            .max()
            .unwrap_or(0);
        let fence = "`".repeat(longest_run.max(2) + 1);
        let lang = language.as_deref().unwrap_or("");
        Ok(format!("{fence}{lang}\n{code}\n{fence}"))
    }
}

pub struct ListTransformer;

impl Transformer for ListTransformer {
    fn syntax(&self) -> Syntax {
        Syntax::List
    }

    fn import<'a>(&self, node: &'a AstNode<'a>) -> Option<Block> {
        let kind = match &node.data.borrow().value {
            NodeValue::List(list) => match list.list_type {
                ListType::Bullet => ListKind::Bullet,
                ListType::Ordered => ListKind::Ordered,
            },
            _ => return None,
        };
        let mut items = Vec::new();
        for item in node.children() {
            // Item content is one or more paragraphs, joined with a space.
            // Nested lists flatten into items of the enclosing list.
            let mut inlines = Vec::new();
            let mut nested = Vec::new();
            for child in item.children() {
                if matches!(child.data.borrow().value, NodeValue::List(_)) {
                    if let Some(Block::List { items: nested_items, .. }) = self.import(child) {
                        nested.extend(nested_items);
                    }
                    continue;
                }
                if !inlines.is_empty() {
                    inlines.push(Inline::plain(" "));
                }
                inlines.extend(collect_inlines(child));
            }
            if !inlines.is_empty() {
                items.push(inlines);
            }
            items.extend(nested);
        }
        Some(Block::List { kind, items })
    }

    fn handles(&self, block: &Block) -> bool {
        matches!(block, Block::List { .. })
    }

    fn export(&self, block: &Block) -> Result<String, CodecError> {
        let Block::List { kind, items } = block else {
            return Ok(String::new());
        };
        let mut lines = Vec::with_capacity(items.len());
        for (idx, item) in items.iter().enumerate() {
            let mut line = match kind {
                ListKind::Bullet => "- ".to_string(),
                ListKind::Ordered => format!("{}. ", idx + 1),
            };
            write_inlines(item, &mut line);
            lines.push(line);
        }
        Ok(lines.join("\n"))
    }
}

pub struct RuleTransformer;

impl Transformer for RuleTransformer {
    fn syntax(&self) -> Syntax {
        Syntax::Rule
    }

    fn import<'a>(&self, node: &'a AstNode<'a>) -> Option<Block> {
        matches!(node.data.borrow().value, NodeValue::ThematicBreak).then_some(Block::Rule)
    }

    fn handles(&self, block: &Block) -> bool {
        matches!(block, Block::Rule)
    }

    fn export(&self, _block: &Block) -> Result<String, CodecError> {
        Ok("---".to_string())
    }
}

/// Format markers in fixed nesting order (outermost first). Combined flags
/// always nest the same way, so a given style has exactly one rendering.
const FORMAT_MARKERS: [(Syntax, fn(InlineStyle) -> bool, &str); 3] = [
    (Syntax::Emphasis, |s| s.bold, "**"),
    (Syntax::Emphasis, |s| s.italic, "*"),
    (Syntax::Emphasis, |s| s.strikethrough, "~~"),
];

/// Collect the inline runs of a block-level AST node.
pub fn collect_inlines<'a>(node: &'a AstNode<'a>) -> Vec<Inline> {
    let mut inlines = Vec::new();
    for child in node.children() {
        collect_inline(child, InlineStyle::plain(), &mut inlines);
    }
    inlines
}

fn collect_inline<'a>(node: &'a AstNode<'a>, style: InlineStyle, out: &mut Vec<Inline>) {
    match &node.data.borrow().value {
        NodeValue::Text(text) => out.push(Inline::Text {
            text: text.clone(),
            style,
        }),
        NodeValue::Code(code) => {
            // Inline code is exclusive: other flags do not combine with it.
            let code_style = InlineStyle {
                code: true,
                ..InlineStyle::plain()
            };
            out.push(Inline::Text {
                text: code.literal.clone(),
                style: code_style,
            });
        }
        NodeValue::Emph => {
            let next = InlineStyle {
                italic: true,
                ..style
            };
            for child in node.children() {
                collect_inline(child, next, out);
            }
        }
        NodeValue::Strong => {
            let next = InlineStyle { bold: true, ..style };
            for child in node.children() {
                collect_inline(child, next, out);
            }
        }
        NodeValue::Strikethrough => {
            let next = InlineStyle {
                strikethrough: true,
                ..style
            };
            for child in node.children() {
                collect_inline(child, next, out);
            }
        }
        NodeValue::Link(link) => out.push(Inline::Link {
            text: extract_text(node),
            url: link.url.clone(),
        }),
        NodeValue::Image(image) => out.push(Inline::Image {
            alt: extract_text(node),
            src: image.url.clone(),
        }),
        NodeValue::SoftBreak | NodeValue::LineBreak => out.push(Inline::Text {
            text: " ".to_string(),
            style,
        }),
        _ => {
            for child in node.children() {
                collect_inline(child, style, out);
            }
        }
    }
}

fn extract_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut text = String::new();
    extract_text_into(node, &mut text);
    text
}

fn extract_text_into<'a>(node: &'a AstNode<'a>, out: &mut String) {
    match &node.data.borrow().value {
        NodeValue::Text(t) => out.push_str(t),
        NodeValue::Code(c) => out.push_str(&c.literal),
        NodeValue::SoftBreak | NodeValue::LineBreak => out.push(' '),
        _ => {
            for child in node.children() {
                extract_text_into(child, out);
            }
        }
    }
}

/// Write inline runs as Markdown.
pub fn write_inlines(inlines: &[Inline], out: &mut String) {
    for inline in inlines {
        match inline {
            Inline::Text { text, style } => write_text_run(text, *style, out),
            Inline::Link { text, url } => {
                out.push('[');
                out.push_str(text);
                out.push_str("](");
                out.push_str(url);
                out.push(')');
            }
            Inline::Image { alt, src } => {
                out.push_str("![");
                out.push_str(alt);
                out.push_str("](");
                out.push_str(src);
                out.push(')');
            }
        }
    }
}

fn write_text_run(text: &str, style: InlineStyle, out: &mut String) {
    if style.code {
        out.push('`');
        out.push_str(text);
        out.push('`');
        return;
    }
    let mut open = String::new();
    for (_, applies, token) in FORMAT_MARKERS {
        if applies(style) {
            out.push_str(token);
            open.push_str(token);
        }
    }
    out.push_str(text);
    // Close markers in reverse opening order.
    let mut close: Vec<char> = open.chars().collect();
    close.reverse();
    // Tokens are runs of a single character, so reversing chars suffices.
    for c in close {
        out.push(c);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style(f: impl Fn(&mut InlineStyle)) -> InlineStyle {
        let mut s = InlineStyle::plain();
        f(&mut s);
        s
    }

    #[test]
    fn test_write_text_run_plain() {
        let mut out = String::new();
        write_text_run("hi", InlineStyle::plain(), &mut out);
        assert_eq!(out, "hi");
    }

    #[test]
    fn test_write_text_run_bold_italic_nests_canonically() {
        let mut out = String::new();
        write_text_run("hi", style(|s| {
            s.bold = true;
            s.italic = true;
        }), &mut out);
        assert_eq!(out, "***hi***");
    }

    #[test]
    fn test_write_text_run_bold_strikethrough() {
        let mut out = String::new();
        write_text_run("hi", style(|s| {
            s.bold = true;
            s.strikethrough = true;
        }), &mut out);
        assert_eq!(out, "**~~hi~~**");
    }

    #[test]
    fn test_write_text_run_code_is_exclusive() {
        let mut out = String::new();
        write_text_run("x + y", style(|s| {
            s.code = true;
            s.bold = true;
        }), &mut out);
        assert_eq!(out, "`x + y`");
    }

    #[test]
    fn test_underline_is_not_serialized() {
        let mut out = String::new();
        write_text_run("hi", style(|s| s.underline = true), &mut out);
        assert_eq!(out, "hi");
    }

    #[test]
    fn test_image_markdown_shape() {
        let mut out = String::new();
        write_inlines(
            &[Inline::Image {
                alt: "diagram".to_string(),
                src: "data:image/jpeg;base64,AAAA".to_string(),
            }],
            &mut out,
        );
        assert_eq!(out, "![diagram](data:image/jpeg;base64,AAAA)");
    }

    #[test]
    fn test_list_export_numbers_from_one() {
        let block = Block::List {
            kind: ListKind::Ordered,
            items: vec![vec![Inline::plain("a")], vec![Inline::plain("b")]],
        };
        assert_eq!(ListTransformer.export(&block), Ok("1. a\n2. b".to_string()));
    }

    #[test]
    fn test_transformer_syntax_tags() {
        assert_eq!(HeadingTransformer.syntax(), Syntax::Heading);
        assert_eq!(QuoteTransformer.syntax(), Syntax::Quote);
        assert_eq!(CodeBlockTransformer.syntax(), Syntax::CodeBlock);
        assert_eq!(ListTransformer.syntax(), Syntax::List);
        assert_eq!(RuleTransformer.syntax(), Syntax::Rule);
    }
}
