//! Scripted plan stream.
//!
//! Stands in for the upstream plan producer: a JSON-lines file where each line
//! is either a reply chunk for the main panel or a dashboard [`StreamEvent`].
//!
//! ```text
//! {"type":"starting"}
//! {"type":"reply","chunk":"Updating the parser...\n"}
//! {"type":"tokens_streamed","path":"src/parser.rs","delta":18}
//! ```

use std::{fs, path::Path, time::Duration};

use anyhow::{Context, Result, anyhow};
use serde_json::Value;
use tokio::{sync::mpsc, task::JoinHandle};

use planview_engine::{Dashboard, StreamEvent};
use planview_tui::ReplyViewport;

const CHANNEL_CAPACITY: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ScriptItem {
    Reply(String),
    Stream(StreamEvent),
}

fn parse_line(line: &str) -> Result<ScriptItem> {
    let value: Value = serde_json::from_str(line)?;
    if value.get("type").and_then(Value::as_str) == Some("reply") {
        let chunk = value
            .get("chunk")
            .and_then(Value::as_str)
            .ok_or_else(|| anyhow!("reply line is missing a string `chunk`"))?;
        return Ok(ScriptItem::Reply(chunk.to_owned()));
    }
    Ok(ScriptItem::Stream(serde_json::from_value(value)?))
}

/// Parse a whole script up front so bad input fails before the terminal is
/// taken over. Blank lines are skipped.
pub(crate) fn load(path: &Path) -> Result<Vec<ScriptItem>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;

    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            parse_line(line).with_context(|| format!("{}:{}", path.display(), i + 1))
        })
        .collect()
}

/// A script being replayed on a background task.
///
/// The producer runs ahead of the render loop, so delivered items sit in the
/// channel until [`Playback::drain`] applies them.
pub(crate) struct Playback {
    stream: mpsc::Receiver<ScriptItem>,
    producer: JoinHandle<()>,
}

impl Playback {
    /// Replay `items`, one every `interval`.
    pub(crate) fn start(items: Vec<ScriptItem>, interval: Duration) -> Self {
        let (tx, stream) = mpsc::channel(CHANNEL_CAPACITY);
        let producer = tokio::spawn(async move {
            for item in items {
                tokio::time::sleep(interval).await;
                if tx.send(item).await.is_err() {
                    break;
                }
            }
            tracing::debug!("Script producer finished");
        });
        Self { stream, producer }
    }

    /// Apply every item delivered so far, in order.
    pub(crate) fn drain(&mut self, dashboard: &mut Dashboard, reply: &mut ReplyViewport) {
        while let Ok(item) = self.stream.try_recv() {
            match item {
                ScriptItem::Reply(chunk) => reply.push_str(&chunk),
                ScriptItem::Stream(event) => dashboard.apply_stream(event),
            }
        }
    }

    /// End the replay. Items already queued are discarded so nothing lands
    /// after the stop.
    pub(crate) fn stop(&mut self) {
        self.producer.abort();
        self.stream.close();
        let mut discarded = 0usize;
        while self.stream.try_recv().is_ok() {
            discarded += 1;
        }
        tracing::debug!(discarded, "Script playback stopped");
    }
}
