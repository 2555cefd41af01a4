//! The embeddable panel: one editor instance behind the host boundary.
//!
//! A [`MarkdownPanel`] is the per-instance coordinator the host talks to.
//! Inbound, the host supplies [`PanelProps`] on every render;
//! [`MarkdownPanel::apply_props`] runs the sync bridge over them. Outbound,
//! the panel forwards debounced change notifications to the [`Host`]
//! trait's single call. All mutable state (the editor, the notifier's
//! `last_sent` and timer) lives on the panel instance, so any number of
//! independent panels can coexist in one process.

use serde::Deserialize;
use tracing::debug;

use crate::codec::{self, CodecError};
use crate::editor::{Command, Editor};
use crate::sync::{ChangeNotifier, SyncDecision, decide};

/// Host-supplied configuration, fresh on every render.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PanelProps {
    /// Editor viewport height in pixels (display concern, carried for the
    /// embedding surface).
    pub min_height: u32,
    /// The external Markdown value.
    pub value: String,
    /// Placeholder text shown while the document is empty.
    pub placeholder: String,
    /// Debounce window for outbound notifications, in milliseconds.
    pub debounce: u64,
    /// Instance namespace, distinguishing multiple panels per page.
    pub key: String,
    /// Whether a changed external value may replace unsaved content.
    pub overwrite: bool,
}

impl Default for PanelProps {
    fn default() -> Self {
        Self {
            min_height: 400,
            value: String::new(),
            placeholder: "Enter some text...".to_string(),
            debounce: 500,
            key: "editor".to_string(),
            overwrite: false,
        }
    }
}

/// The outbound host boundary: a fire-and-forget value push.
///
/// Idempotent from the host's perspective; the last value wins.
pub trait Host {
    fn set_value(&mut self, markdown: &str);
}

/// One editor component instance.
#[derive(Debug)]
pub struct MarkdownPanel {
    props: PanelProps,
    editor: Editor,
    notifier: ChangeNotifier,
    // The (value, overwrite) pair last evaluated by the sync bridge; the
    // bridge only re-runs when it changes, which makes re-applying
    // identical props a no-op.
    applied_value: String,
    applied_overwrite: bool,
}

impl MarkdownPanel {
    /// Create a panel, seeding the editor from the initial external value.
    pub fn new(props: PanelProps) -> Self {
        let editor = Editor::from_document(codec::from_markdown(&props.value));
        let notifier = ChangeNotifier::new(props.value.clone(), props.debounce);
        Self {
            applied_value: props.value.clone(),
            applied_overwrite: props.overwrite,
            editor,
            notifier,
            props,
        }
    }

    /// The most recently applied props.
    pub const fn props(&self) -> &PanelProps {
        &self.props
    }

    /// Read access to the editor (toolbar state, tests).
    pub const fn editor(&self) -> &Editor {
        &self.editor
    }

    /// The Markdown this panel last pushed to the host (or the initial
    /// value).
    pub fn last_sent(&self) -> &str {
        self.notifier.last_sent()
    }

    /// Serialize the current document on demand.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError`] for malformed trees; never occurs for
    /// documents built through the editor.
    pub fn markdown(&self) -> Result<String, CodecError> {
        codec::to_markdown(self.editor.document())
    }

    /// Accept a new render's props and run the sync bridge.
    ///
    /// Re-evaluated only when the `(value, overwrite)` pair actually
    /// changed; calling this twice with identical props performs no
    /// further mutation. An overwrite replaces the document in one step
    /// and clears undo history; it never schedules a host notification.
    pub fn apply_props(&mut self, props: PanelProps) {
        self.notifier.set_debounce(props.debounce);
        let inputs_changed =
            props.value != self.applied_value || props.overwrite != self.applied_overwrite;
        if inputs_changed {
            let decision = decide(
                &props.value,
                props.overwrite,
                self.notifier.last_sent(),
                self.editor.document().is_empty_text(),
            );
            debug!(key = %props.key, ?decision, "applied external value");
            if decision == SyncDecision::Overwrite {
                self.editor.replace_content(codec::from_markdown(&props.value));
                // The edits a pending notification was reporting no longer
                // exist; firing it would only echo the host's own value.
                self.notifier.cancel();
            }
            self.applied_value.clone_from(&props.value);
            self.applied_overwrite = props.overwrite;
        }
        self.props = props;
    }

    /// Dispatch a user command at `now_ms`. Arms the notifier when the
    /// document changed; state-only commands never notify.
    pub fn dispatch(&mut self, command: Command, now_ms: u64) -> bool {
        let mutated = self.editor.dispatch(command);
        if mutated {
            self.notifier.document_mutated(now_ms);
        }
        mutated
    }

    /// Drive the debounce timer; forwards at most one pending notification
    /// to the host. Returns whether a value was pushed.
    pub fn tick(&mut self, now_ms: u64, host: &mut dyn Host) -> bool {
        match self.notifier.poll(now_ms, self.editor.document()) {
            Some(markdown) => {
                host.set_value(&markdown);
                true
            }
            None => false,
        }
    }

    /// Whether a debounced notification is waiting to fire.
    pub const fn has_pending_notification(&self) -> bool {
        self.notifier.is_pending()
    }

    /// Cancel any pending notification (teardown). Dropping the panel has
    /// the same effect, since the timer is owned state.
    pub const fn cancel_pending(&mut self) {
        self.notifier.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::BlockType;

    #[derive(Default)]
    struct RecordingHost {
        values: Vec<String>,
    }

    impl Host for RecordingHost {
        fn set_value(&mut self, markdown: &str) {
            self.values.push(markdown.to_string());
        }
    }

    fn props(value: &str, overwrite: bool) -> PanelProps {
        PanelProps {
            value: value.to_string(),
            overwrite,
            debounce: 500,
            ..PanelProps::default()
        }
    }

    #[test]
    fn test_new_panel_seeds_editor_from_value() {
        let panel = MarkdownPanel::new(props("# Title", false));
        assert_eq!(panel.editor().active_block_type(), BlockType::Heading(1));
        assert_eq!(panel.last_sent(), "# Title");
    }

    #[test]
    fn test_apply_props_is_idempotent() {
        let mut panel = MarkdownPanel::new(props("", false));
        panel.dispatch(Command::InsertText("typed".to_string()), 0);
        let next = props("external", true);
        panel.apply_props(next.clone());
        let after_first = panel.editor().document().clone();
        panel.apply_props(next);
        assert_eq!(panel.editor().document(), &after_first);
    }

    #[test]
    fn test_echoed_value_does_not_overwrite() {
        let mut panel = MarkdownPanel::new(props("", false));
        let mut host = RecordingHost::default();
        panel.dispatch(Command::InsertText("Hello".to_string()), 0);
        panel.tick(500, &mut host);
        assert_eq!(host.values, vec!["Hello".to_string()]);

        // The host echoes back what we just sent.
        panel.apply_props(props("Hello", false));
        assert!(panel.editor().can_undo(), "echo must not clear history");
        assert_eq!(panel.markdown().expect("markdown"), "Hello");
    }

    #[test]
    fn test_overwrite_is_not_notified_to_host() {
        let mut panel = MarkdownPanel::new(props("", false));
        let mut host = RecordingHost::default();
        panel.apply_props(props("# Pushed", true));
        assert!(!panel.has_pending_notification());
        panel.tick(10_000, &mut host);
        assert!(host.values.is_empty(), "programmatic overwrite must not echo");
    }

    #[test]
    fn test_overwrite_cancels_pending_user_notification() {
        let mut panel = MarkdownPanel::new(props("", false));
        let mut host = RecordingHost::default();
        panel.dispatch(Command::InsertText("typed".to_string()), 0);
        assert!(panel.has_pending_notification());
        panel.apply_props(props("# Forced", true));
        assert!(!panel.has_pending_notification());
        assert!(!panel.tick(10_000, &mut host));
        assert!(host.values.is_empty());
    }

    #[test]
    fn test_state_only_commands_do_not_arm_notifier() {
        let mut panel = MarkdownPanel::new(props("", false));
        panel.dispatch(
            Command::FormatText(crate::editor::TextFormat::Bold),
            0,
        );
        assert!(!panel.has_pending_notification());
    }

    #[test]
    fn test_debounce_change_between_renders_takes_effect() {
        let mut panel = MarkdownPanel::new(props("", false));
        let mut host = RecordingHost::default();
        let mut fast = props("", false);
        fast.debounce = 10;
        panel.apply_props(fast);
        panel.dispatch(Command::InsertText("x".to_string()), 0);
        assert!(panel.tick(10, &mut host));
    }

    #[test]
    fn test_cancel_pending_prevents_post_teardown_fire() {
        let mut panel = MarkdownPanel::new(props("", false));
        let mut host = RecordingHost::default();
        panel.dispatch(Command::InsertText("bye".to_string()), 0);
        panel.cancel_pending();
        assert!(!panel.tick(10_000, &mut host));
        assert!(host.values.is_empty());
    }

    #[test]
    fn test_props_deserialize_with_defaults() {
        let props: PanelProps = serde_json::from_str(r#"{"value": "hi"}"#).expect("parse");
        assert_eq!(props.value, "hi");
        assert_eq!(props.debounce, 500);
        assert!(!props.overwrite);
    }
}
