//! Dashboard state for planview.
//!
//! [`Dashboard`] owns the phase, the build tracker and the viewport geometry.
//! It is driven one event at a time by the stream producer and the input
//! layer, and read by the renderer between events.

mod config;
mod events;

pub use config::{AppConfig, ConfigError, PlanviewConfig, StreamConfig};
pub use events::{InputAction, Outcome, StreamEvent};

pub use planview_types::{
    Activity, BuildSnapshot, BuildTracker, Composition, Direction, FileProgress, Geometry,
    GeometryError, MissingFileChoice, MissingFilePrompt, Phase, PhaseKind, Selection, UiOptions,
};

use tracing::{debug, info, warn};

#[derive(Debug)]
pub struct Dashboard {
    phase: Phase,
    progress: BuildTracker,
    geometry: Geometry,
}

impl Dashboard {
    #[must_use]
    pub fn new(geometry: Geometry) -> Self {
        Self {
            phase: Phase::default(),
            progress: BuildTracker::new(),
            geometry,
        }
    }

    #[must_use]
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    #[must_use]
    pub fn progress(&self) -> &BuildTracker {
        &self.progress
    }

    #[must_use]
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Apply a terminal resize. A zero dimension is rejected and the previous
    /// geometry kept.
    pub fn resize(&mut self, width: u16, height: u16) -> Result<(), GeometryError> {
        match Geometry::new(width, height) {
            Ok(geometry) => {
                self.geometry = geometry;
                Ok(())
            }
            Err(err) => {
                warn!(width, height, "Ignoring empty viewport size");
                Err(err)
            }
        }
    }

    pub fn apply_stream(&mut self, event: StreamEvent) {
        match event {
            StreamEvent::Starting => self.phase.activity_mut().starting = true,
            StreamEvent::Processing => self.phase.activity_mut().processing = true,
            StreamEvent::ReplyDone => {
                let activity = self.phase.activity_mut();
                activity.starting = false;
                activity.processing = false;
                self.log_if_idle();
            }
            StreamEvent::BuildStarted => {
                self.progress.clear();
                self.phase.activity_mut().building = true;
                info!("Build started");
            }
            StreamEvent::BuildStopped => {
                self.progress.clear();
                self.phase.activity_mut().building = false;
                info!("Build stopped");
                self.log_if_idle();
            }
            StreamEvent::TokensStreamed { path, delta } => {
                if !self.progress.record_tokens(&path, delta) {
                    debug!(%path, delta, "Ignoring tokens for finished file");
                }
            }
            StreamEvent::FileFinished { path } => {
                debug!(%path, "File finished");
                self.progress.mark_finished(&path);
            }
            StreamEvent::FileMissing { path, token_cost } => {
                info!(%path, token_cost, "File missing from context");
                self.phase.open_prompt(path, token_cost);
                if self.phase.pending_prompts() > 0 {
                    debug!(queued = self.phase.pending_prompts(), "Missing file prompt queued");
                }
            }
        }
        debug!(phase = ?self.phase.kind(), "Applied stream event");
    }

    fn log_if_idle(&self) {
        if self.phase.activity().is_idle() {
            info!("Plan cycle finished");
        }
    }

    pub fn apply_input(&mut self, action: InputAction) -> Option<Outcome> {
        match action {
            InputAction::MoveSelection(direction) => {
                if let Some(prompt) = self.phase.prompt_mut() {
                    prompt.move_selection(direction);
                }
                None
            }
            InputAction::Confirm => {
                let selection = self.phase.close_prompt()?.commit();
                info!(path = %selection.path, choice = ?selection.choice, "Missing file choice committed");
                Some(Outcome::SelectionCommitted(selection))
            }
            InputAction::Cancel => {
                if let Some(prompt) = self.phase.close_prompt() {
                    debug!(path = %prompt.path(), "Missing file prompt dismissed");
                }
                None
            }
            InputAction::Stop => {
                self.phase.reset();
                self.progress.clear();
                info!("Stop requested");
                Some(Outcome::StopRequested)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        Activity, Composition, Dashboard, Direction, FileProgress, Geometry, InputAction,
        MissingFileChoice, Outcome, PhaseKind, Selection, StreamEvent,
    };

    fn dashboard() -> Dashboard {
        Dashboard::new(Geometry::new(80, 24).expect("valid geometry"))
    }

    fn tokens(path: &str, delta: u32) -> StreamEvent {
        StreamEvent::TokensStreamed {
            path: path.to_string(),
            delta,
        }
    }

    #[test]
    fn happy_path_cycle() {
        let mut dash = dashboard();
        assert_eq!(dash.phase().kind(), PhaseKind::Idle);

        dash.apply_stream(StreamEvent::Starting);
        assert_eq!(dash.phase().kind(), PhaseKind::Starting);

        dash.apply_stream(StreamEvent::Processing);
        assert_eq!(dash.phase().kind(), PhaseKind::Processing);

        dash.apply_stream(StreamEvent::BuildStarted);
        assert_eq!(dash.phase().kind(), PhaseKind::Building);

        dash.apply_stream(StreamEvent::ReplyDone);
        assert_eq!(
            dash.phase().composition(),
            Composition::Dashboard {
                processing: false,
                build: true
            }
        );

        dash.apply_stream(StreamEvent::BuildStopped);
        assert_eq!(dash.phase().kind(), PhaseKind::Idle);
        assert!(dash.progress().is_empty());
    }

    #[test]
    fn build_start_discards_previous_progress() {
        let mut dash = dashboard();
        dash.apply_stream(StreamEvent::BuildStarted);
        dash.apply_stream(tokens("old.rs", 3));
        dash.apply_stream(StreamEvent::BuildStarted);
        assert!(dash.progress().is_empty());
    }

    #[test]
    fn tokens_after_finish_are_ignored() {
        let mut dash = dashboard();
        dash.apply_stream(StreamEvent::BuildStarted);
        dash.apply_stream(tokens("a.go", 4));
        dash.apply_stream(StreamEvent::FileFinished {
            path: "a.go".to_string(),
        });
        dash.apply_stream(tokens("a.go", 9));

        assert_eq!(
            dash.progress().get("a.go"),
            Some(FileProgress {
                tokens: 4,
                finished: true
            })
        );
    }

    #[test]
    fn missing_file_prompt_commit_flow() {
        let mut dash = dashboard();
        dash.apply_stream(StreamEvent::BuildStarted);
        dash.apply_stream(StreamEvent::FileMissing {
            path: "missing.ts".to_string(),
            token_cost: 120,
        });
        assert!(matches!(dash.phase().composition(), Composition::Modal(_)));

        assert_eq!(
            dash.apply_input(InputAction::MoveSelection(Direction::Up)),
            None
        );
        let outcome = dash.apply_input(InputAction::Confirm);

        assert_eq!(
            outcome,
            Some(Outcome::SelectionCommitted(Selection {
                choice: MissingFileChoice::Overwrite,
                path: "missing.ts".to_string(),
            }))
        );
        assert_eq!(dash.phase().kind(), PhaseKind::Building);
    }

    #[test]
    fn every_missing_file_gets_a_decision() {
        let mut dash = dashboard();
        dash.apply_stream(StreamEvent::BuildStarted);
        for path in ["first.ts", "second.ts"] {
            dash.apply_stream(StreamEvent::FileMissing {
                path: path.to_string(),
                token_cost: 10,
            });
        }

        let mut committed = Vec::new();
        while let Some(outcome) = dash.apply_input(InputAction::Confirm) {
            match outcome {
                Outcome::SelectionCommitted(selection) => committed.push(selection.path),
                Outcome::StopRequested => panic!("confirm never stops"),
            }
        }

        assert_eq!(committed, ["first.ts", "second.ts"]);
        assert_eq!(dash.phase().kind(), PhaseKind::Building);
    }

    #[test]
    fn cancel_moves_on_to_the_queued_prompt() {
        let mut dash = dashboard();
        for path in ["first.ts", "second.ts"] {
            dash.apply_stream(StreamEvent::FileMissing {
                path: path.to_string(),
                token_cost: 10,
            });
        }

        assert_eq!(dash.apply_input(InputAction::Cancel), None);
        assert_eq!(
            dash.phase().prompt().map(|prompt| prompt.path()),
            Some("second.ts")
        );
    }

    #[test]
    fn stream_keeps_flowing_under_the_prompt() {
        let mut dash = dashboard();
        dash.apply_stream(StreamEvent::BuildStarted);
        dash.apply_stream(StreamEvent::FileMissing {
            path: "missing.ts".to_string(),
            token_cost: 5,
        });
        dash.apply_stream(tokens("b.go", 42));
        dash.apply_stream(StreamEvent::Processing);

        assert_eq!(dash.phase().kind(), PhaseKind::PromptingMissingFile);
        assert_eq!(dash.progress().get("b.go").map(|p| p.tokens), Some(42));

        assert_eq!(dash.apply_input(InputAction::Cancel), None);
        assert_eq!(
            dash.phase().activity(),
            Activity {
                starting: false,
                processing: true,
                building: true
            }
        );
    }

    #[test]
    fn prompt_inputs_without_prompt_are_noops() {
        let mut dash = dashboard();
        assert_eq!(
            dash.apply_input(InputAction::MoveSelection(Direction::Down)),
            None
        );
        assert_eq!(dash.apply_input(InputAction::Confirm), None);
        assert_eq!(dash.apply_input(InputAction::Cancel), None);
        assert_eq!(dash.phase().kind(), PhaseKind::Idle);
    }

    #[test]
    fn stop_clears_everything() {
        let mut dash = dashboard();
        dash.apply_stream(StreamEvent::Starting);
        dash.apply_stream(StreamEvent::BuildStarted);
        dash.apply_stream(tokens("a.go", 1));
        for path in ["m.go", "n.go"] {
            dash.apply_stream(StreamEvent::FileMissing {
                path: path.to_string(),
                token_cost: 1,
            });
        }

        assert_eq!(
            dash.apply_input(InputAction::Stop),
            Some(Outcome::StopRequested)
        );
        assert_eq!(dash.phase().kind(), PhaseKind::Idle);
        assert_eq!(dash.phase().pending_prompts(), 0);
        assert!(dash.progress().is_empty());
    }

    #[test]
    fn resize_rejects_empty_viewport() {
        let mut dash = dashboard();
        assert!(dash.resize(120, 40).is_ok());
        assert!(dash.resize(0, 40).is_err());
        assert_eq!(dash.geometry(), Geometry::new(120, 40).expect("valid"));
    }

    #[test]
    fn stream_events_decode_from_script_lines() {
        let event: StreamEvent =
            serde_json::from_str(r#"{"type":"file_missing","path":"x.ts","token_cost":7}"#)
                .expect("valid event");
        assert_eq!(
            event,
            StreamEvent::FileMissing {
                path: "x.ts".to_string(),
                token_cost: 7
            }
        );

        let event: StreamEvent =
            serde_json::from_str(r#"{"type":"build_started"}"#).expect("valid event");
        assert_eq!(event, StreamEvent::BuildStarted);
    }
}
