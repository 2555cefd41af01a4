//! Markdock host harness - a stdio stand-in for a dashboarding host.
//!
//! Reads one JSON message per line (from `--script` and then stdin) and
//! prints a JSON line on stdout whenever the panel pushes a value:
//!
//! ```text
//! {"render": {"value": "# Hi", "overwrite": true}}
//! {"edit": {"text": "Hello"}}
//! {"action": {"name": "bold"}}
//! {"image": {"alt_text": "logo", "src": "https://example.com/l.png"}}
//! "paragraph"
//! "rule"
//! ```
//!
//! # Usage
//!
//! ```bash
//! markdock --debounce 250
//! markdock --script demo_session.jsonl
//! echo '{"edit": {"text": "Hi"}}' | markdock --debounce 0
//! ```

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;

use markdock::editor::Command;
use markdock::image::ImagePayload;
use markdock::panel::{Host, MarkdownPanel, PanelProps};
use markdock::toolbar::ToolbarAction;

/// An embeddable Markdown rich-text editor panel, driven over stdio
#[derive(Parser, Debug)]
#[command(name = "markdock", version, about, long_about = None)]
struct Cli {
    /// Initial Markdown value
    #[arg(long, default_value = "")]
    value: String,

    /// Debounce window for outbound notifications, in milliseconds
    #[arg(long, default_value_t = 500)]
    debounce: u64,

    /// Allow changed external values to overwrite unsaved content
    #[arg(long)]
    overwrite: bool,

    /// Instance namespace
    #[arg(long, default_value = "editor")]
    key: String,

    /// Replay host messages from a file before reading stdin
    #[arg(long, value_name = "PATH")]
    script: Option<PathBuf>,
}

/// One inbound message from the embedding host.
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
enum HostMessage {
    /// A re-render with fresh props.
    Render(PanelProps),
    /// User typed text.
    Edit { text: String },
    /// A toolbar affordance by wire name (`bold`, `undo`, `h2`, ...).
    Action { name: String },
    /// Insert an image payload.
    Image(ImagePayload),
    /// Start a new paragraph.
    Paragraph,
    /// Insert a horizontal rule.
    Rule,
}

/// Prints every pushed value as a JSON line on stdout.
struct StdoutHost;

impl Host for StdoutHost {
    fn set_value(&mut self, markdown: &str) {
        // Fire-and-forget: the panel never awaits an acknowledgment.
        let mut out = std::io::stdout();
        let _ = writeln!(out, "{}", serde_json::json!({ "value": markdown }));
        let _ = out.flush();
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let props = PanelProps {
        value: cli.value,
        debounce: cli.debounce,
        overwrite: cli.overwrite,
        key: cli.key,
        ..PanelProps::default()
    };

    let mut panel = MarkdownPanel::new(props);
    let mut host = StdoutHost;
    let start = Instant::now();

    if let Some(path) = &cli.script {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display()))?;
        for line in content.lines() {
            handle_line(&mut panel, line, elapsed_ms(start));
        }
    }

    // Stdin is read on a separate thread so the main loop can keep driving
    // the debounce timer while the host is quiet.
    let (tx, rx) = mpsc::channel::<String>();
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });

    loop {
        panel.tick(elapsed_ms(start), &mut host);

        match rx.recv_timeout(Duration::from_millis(25)) {
            Ok(line) => handle_line(&mut panel, &line, elapsed_ms(start)),
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    // Host hung up: teardown. A pending notification must not fire after
    // the panel is gone.
    if panel.has_pending_notification() {
        tracing::debug!("dropping pending notification at teardown");
        panel.cancel_pending();
    }
    Ok(())
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

fn handle_line(panel: &mut MarkdownPanel, line: &str, now_ms: u64) {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return;
    }
    // Protocol errors degrade to no-op plus log; the harness never dies on
    // a malformed message.
    match serde_json::from_str::<HostMessage>(line) {
        Ok(message) => handle_message(panel, message, now_ms),
        Err(err) => tracing::warn!(%err, line, "unrecognized host message"),
    }
}

fn handle_message(panel: &mut MarkdownPanel, message: HostMessage, now_ms: u64) {
    match message {
        HostMessage::Render(props) => panel.apply_props(props),
        HostMessage::Edit { text } => {
            panel.dispatch(Command::InsertText(text), now_ms);
        }
        HostMessage::Action { name } => match ToolbarAction::from_name(&name) {
            Some(action) => {
                panel.dispatch(action.command(), now_ms);
            }
            None => tracing::warn!(%name, "unknown toolbar action"),
        },
        HostMessage::Image(payload) => {
            panel.dispatch(Command::InsertImage(payload), now_ms);
        }
        HostMessage::Paragraph => {
            panel.dispatch(Command::InsertParagraph, now_ms);
        }
        HostMessage::Rule => {
            panel.dispatch(Command::InsertRule, now_ms);
        }
    }
}
