//! Missing-file decision prompt.
//!
//! Opened when a plan references a file that exists in the project but is not
//! loaded into context. The user picks one of a fixed set of choices.

use serde::{Deserialize, Serialize};

/// What to do with a file the plan wants to write but the context lacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingFileChoice {
    Load,
    Skip,
    Overwrite,
}

impl MissingFileChoice {
    pub const ALL: [MissingFileChoice; 3] = [
        MissingFileChoice::Load,
        MissingFileChoice::Skip,
        MissingFileChoice::Overwrite,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            MissingFileChoice::Load => "Load the file into context",
            MissingFileChoice::Skip => "Skip generating this file",
            MissingFileChoice::Overwrite => "Allow the plan to overwrite this file",
        }
    }

    /// Only loading costs context tokens, so only Load shows a count.
    #[must_use]
    pub const fn shows_token_cost(self) -> bool {
        matches!(self, MissingFileChoice::Load)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// The choice a user committed for a missing file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub choice: MissingFileChoice,
    pub path: String,
}

/// Selection state for the missing-file prompt.
///
/// `selected` always indexes [`MissingFileChoice::ALL`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingFilePrompt {
    path: String,
    token_cost: u32,
    selected: usize,
}

impl MissingFilePrompt {
    /// Open a prompt for `path` with the first option selected.
    #[must_use]
    pub fn open(path: impl Into<String>, token_cost: u32) -> Self {
        Self {
            path: path.into(),
            token_cost,
            selected: 0,
        }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Tokens it would take to load the file. Supplied by the caller, never
    /// recomputed here.
    #[must_use]
    pub fn token_cost(&self) -> u32 {
        self.token_cost
    }

    #[must_use]
    pub fn options(&self) -> &'static [MissingFileChoice] {
        &MissingFileChoice::ALL
    }

    #[must_use]
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    #[must_use]
    pub fn selected(&self) -> MissingFileChoice {
        MissingFileChoice::ALL[self.selected]
    }

    /// Move the cursor one step, wrapping at either end.
    pub fn move_selection(&mut self, direction: Direction) {
        let count = MissingFileChoice::ALL.len();
        self.selected = match direction {
            Direction::Up => (self.selected + count - 1) % count,
            Direction::Down => (self.selected + 1) % count,
        };
    }

    #[must_use]
    pub fn commit(self) -> Selection {
        Selection {
            choice: self.selected(),
            path: self.path,
        }
    }
}
