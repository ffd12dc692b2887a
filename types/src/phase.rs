//! Top-level dashboard phase.
//!
//! The dashboard is either showing its panels, driven by a set of activity
//! flags, or showing the missing-file modal. The modal remembers the
//! activity it interrupted so closing it restores the same panels.
//! Missing-file reports that arrive while the modal is up wait their turn
//! behind it, so every reported file gets its own decision.

use std::collections::VecDeque;

use crate::prompt::MissingFilePrompt;

/// Activity flags for the dashboard panels.
///
/// `starting` and `processing` are independent: either may be set on its own
/// and both share the processing panel. `building` controls the build panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Activity {
    pub starting: bool,
    pub processing: bool,
    pub building: bool,
}

impl Activity {
    #[must_use]
    pub const fn shows_processing(self) -> bool {
        self.starting || self.processing
    }

    #[must_use]
    pub const fn is_idle(self) -> bool {
        !self.starting && !self.processing && !self.building
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Dashboard(Activity),
    PromptingMissingFile {
        prompt: MissingFilePrompt,
        /// Reported while `prompt` was open, oldest first.
        pending: VecDeque<MissingFilePrompt>,
        resume: Activity,
    },
}

impl Default for Phase {
    fn default() -> Self {
        Phase::Dashboard(Activity::default())
    }
}

/// Coarse label for the active phase, used for logs and assertions.
///
/// When several activity flags are set the furthest-along one wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseKind {
    Idle,
    Starting,
    Processing,
    Building,
    PromptingMissingFile,
}

/// Which panels a render pass draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Composition<'a> {
    /// Missing-file modal only.
    Modal(&'a MissingFilePrompt),
    /// Main content and help always; the rest as flagged.
    Dashboard { processing: bool, build: bool },
}

impl Phase {
    #[must_use]
    pub fn kind(&self) -> PhaseKind {
        match self {
            Phase::PromptingMissingFile { .. } => PhaseKind::PromptingMissingFile,
            Phase::Dashboard(activity) if activity.building => PhaseKind::Building,
            Phase::Dashboard(activity) if activity.processing => PhaseKind::Processing,
            Phase::Dashboard(activity) if activity.starting => PhaseKind::Starting,
            Phase::Dashboard(_) => PhaseKind::Idle,
        }
    }

    #[must_use]
    pub fn composition(&self) -> Composition<'_> {
        match self {
            Phase::PromptingMissingFile { prompt, .. } => Composition::Modal(prompt),
            Phase::Dashboard(activity) => Composition::Dashboard {
                processing: activity.shows_processing(),
                build: activity.building,
            },
        }
    }

    /// Activity flags in effect, or the ones the modal will restore.
    #[must_use]
    pub fn activity(&self) -> Activity {
        match self {
            Phase::Dashboard(activity) | Phase::PromptingMissingFile { resume: activity, .. } => {
                *activity
            }
        }
    }

    /// Stream events keep updating the flags while the modal is up.
    pub fn activity_mut(&mut self) -> &mut Activity {
        match self {
            Phase::Dashboard(activity) | Phase::PromptingMissingFile { resume: activity, .. } => {
                activity
            }
        }
    }

    #[must_use]
    pub fn prompt(&self) -> Option<&MissingFilePrompt> {
        match self {
            Phase::PromptingMissingFile { prompt, .. } => Some(prompt),
            Phase::Dashboard(_) => None,
        }
    }

    pub fn prompt_mut(&mut self) -> Option<&mut MissingFilePrompt> {
        match self {
            Phase::PromptingMissingFile { prompt, .. } => Some(prompt),
            Phase::Dashboard(_) => None,
        }
    }

    /// Show the modal for `path`, or queue it behind the prompt already open.
    pub fn open_prompt(&mut self, path: impl Into<String>, token_cost: u32) {
        let next = MissingFilePrompt::open(path, token_cost);
        if let Phase::PromptingMissingFile { pending, .. } = self {
            pending.push_back(next);
            return;
        }
        *self = Phase::PromptingMissingFile {
            prompt: next,
            pending: VecDeque::new(),
            resume: self.activity(),
        };
    }

    /// Number of prompts waiting behind the open one.
    #[must_use]
    pub fn pending_prompts(&self) -> usize {
        match self {
            Phase::PromptingMissingFile { pending, .. } => pending.len(),
            Phase::Dashboard(_) => 0,
        }
    }

    /// Dismiss the open prompt. The next queued prompt takes its place;
    /// with none left, the interrupted panels are restored.
    ///
    /// Returns the prompt that was open, if any.
    pub fn close_prompt(&mut self) -> Option<MissingFilePrompt> {
        match std::mem::take(self) {
            Phase::PromptingMissingFile {
                prompt,
                mut pending,
                resume,
            } => {
                *self = match pending.pop_front() {
                    Some(next) => Phase::PromptingMissingFile {
                        prompt: next,
                        pending,
                        resume,
                    },
                    None => Phase::Dashboard(resume),
                };
                Some(prompt)
            }
            dashboard @ Phase::Dashboard(_) => {
                *self = dashboard;
                None
            }
        }
    }

    pub fn reset(&mut self) {
        *self = Phase::default();
    }
}
