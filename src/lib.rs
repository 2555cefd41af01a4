// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. image::ImagePayload)
    clippy::module_name_repetitions
)]

//! # Markdock
//!
//! An embeddable Markdown rich-text editor panel for dashboard hosts.
//!
//! The host and the panel exchange one piece of data — a Markdown string —
//! across two paths with real invariants:
//!
//! - **Inbound**: a changed external value may overwrite the live document
//!   only when the document is empty or the host forces it, and a value
//!   equal to what this panel last emitted is recognized as an echo and
//!   ignored (no update loops).
//! - **Outbound**: user edits are serialized and pushed to the host after
//!   a trailing-edge debounce window, one notification per burst, carrying
//!   the final document state. Programmatic overwrites never notify.
//!
//! ## Modules
//!
//! - [`document`]: the rich-text block/inline tree
//! - [`codec`]: Markdown conversion via an ordered transformer list
//! - [`editor`]: command dispatch and undo history
//! - [`sync`]: the sync bridge, debounce timer, and change notifier
//! - [`panel`]: the per-instance component root and host boundary
//! - [`toolbar`]: action-to-command glue and derived toolbar state
//! - [`image`]: insert-image payloads with client-side downscaling

pub mod codec;
pub mod document;
pub mod editor;
pub mod image;
pub mod panel;
pub mod sync;
pub mod toolbar;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::document::Document;
    pub use crate::editor::{BlockType, Command, Editor, TextFormat};
    pub use crate::image::ImagePayload;
    pub use crate::panel::{Host, MarkdownPanel, PanelProps};
    pub use crate::sync::SyncDecision;
    pub use crate::toolbar::{ToolbarAction, ToolbarState};
}
