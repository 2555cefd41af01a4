//! Markdown codec: bidirectional conversion between [`Document`] trees and
//! Markdown text.
//!
//! The codec is parameterized by a fixed, ordered list of per-syntax
//! [`Transformer`]s (the closed construct set: headings, quotes, code
//! blocks, lists, horizontal rules, plus the inline emphasis/link/image
//! forms handled by the inline writer). Serialization walks the list in
//! declaration order, so output is deterministic for a given tree.
//!
//! Grammar-level parsing is delegated to comrak; transformers only map the
//! parsed AST into the document tree. Constructs outside the closed set
//! degrade to plain paragraphs rather than failing.

mod transformers;

use comrak::nodes::AstNode;
use comrak::{Arena, Options, parse_document};
use thiserror::Error;

use crate::document::{Block, Document};

pub use transformers::{Transformer, collect_inlines, write_inlines};

/// Serialization failure for a malformed document tree.
///
/// These cannot arise from trees built by the editor or the importer; they
/// guard against hand-built trees that violate document invariants.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("heading level {0} is outside the supported range 1..=6")]
    HeadingLevel(u8),
}

/// Capability tag: which Markdown construct a transformer covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Syntax {
    Heading,
    Quote,
    CodeBlock,
    List,
    Rule,
    Emphasis,
    Link,
    Image,
}

/// The fixed block-transformer list, in priority order.
///
/// Both directions use this order: import tries each transformer against
/// an AST node until one claims it, and export emits with the first
/// transformer that handles the block. The set is closed; extending the
/// supported syntax means adding an entry here.
pub fn transformers() -> &'static [&'static (dyn Transformer + Sync)] {
    static TRANSFORMERS: [&(dyn Transformer + Sync); 5] = [
        &transformers::HeadingTransformer,
        &transformers::QuoteTransformer,
        &transformers::CodeBlockTransformer,
        &transformers::ListTransformer,
        &transformers::RuleTransformer,
    ];
    &TRANSFORMERS
}

fn comrak_options() -> Options {
    let mut options = Options::default();
    // Strikethrough is the only extension in the supported set. Everything
    // else (tables, footnotes, tasklists) stays off so unsupported
    // constructs fall through as plain paragraphs.
    options.extension.strikethrough = true;
    options
}

/// Parse Markdown text into a document tree.
///
/// Total: any input produces a document. Constructs outside the closed
/// transformer set are imported as plain paragraphs of their visible text.
pub fn from_markdown(source: &str) -> Document {
    let arena = Arena::new();
    let options = comrak_options();
    let root = parse_document(&arena, source, &options);

    let mut blocks = Vec::new();
    for node in root.children() {
        blocks.push(import_block(node));
    }

    let mut document = Document::new(blocks);
    document.normalize();
    document
}

fn import_block<'a>(node: &'a AstNode<'a>) -> Block {
    for transformer in transformers() {
        if let Some(block) = transformer.import(node) {
            return block;
        }
    }
    // Paragraphs are the default block kind, and the fallback for anything
    // no transformer claims.
    Block::Paragraph(collect_inlines(node))
}

/// Serialize a document tree to Markdown.
///
/// Output is deterministic: blocks are emitted through the transformer
/// list in its fixed order and joined by blank lines, with no trailing
/// newline.
///
/// # Errors
///
/// Returns [`CodecError`] if the tree is malformed (e.g. a heading level
/// outside 1..=6).
pub fn to_markdown(document: &Document) -> Result<String, CodecError> {
    let mut rendered = Vec::with_capacity(document.block_count());
    for block in document.blocks() {
        rendered.push(export_block(block)?);
    }
    Ok(rendered.join("\n\n"))
}

fn export_block(block: &Block) -> Result<String, CodecError> {
    for transformer in transformers() {
        if transformer.handles(block) {
            return transformer.export(block);
        }
    }
    // Paragraph fallback: bare inline content.
    let mut out = String::new();
    if let Some(inlines) = block.inlines() {
        write_inlines(inlines, &mut out);
    }
    Ok(out)
}
