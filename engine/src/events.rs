//! Inbound events and outbound outcomes for the dashboard.

use serde::Deserialize;

use planview_types::{Direction, Selection};

/// Events delivered by the plan stream producer.
///
/// Scripts encode these as JSON objects tagged by `type`, e.g.
/// `{"type":"tokens_streamed","path":"src/main.rs","delta":12}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamEvent {
    /// The request was sent; waiting on the first reply bytes.
    Starting,
    /// Reply tokens are arriving.
    Processing,
    /// The reply stream ended.
    ReplyDone,
    BuildStarted,
    BuildStopped,
    TokensStreamed {
        path: String,
        delta: u32,
    },
    FileFinished {
        path: String,
    },
    FileMissing {
        path: String,
        token_cost: u32,
    },
}

/// Logical actions decoded from keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    MoveSelection(Direction),
    Confirm,
    /// Dismiss the missing-file prompt without choosing.
    Cancel,
    /// Abort the running plan.
    Stop,
}

/// Results the controller must act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    SelectionCommitted(Selection),
    StopRequested,
}
