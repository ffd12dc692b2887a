//! Core dashboard types for planview.
//!
//! This crate holds the render-state model for the plan-build dashboard: the
//! per-file progress tracker, the row packer, the missing-file prompt and the
//! phase machine that decides which panels are visible. Everything here is
//! pure data with no IO, no async, and no rendering dependency, so every layer
//! above can drive and inspect it.

mod geometry;
mod label;
mod layout;
mod options;
mod phase;
mod progress;
mod prompt;

pub use geometry::{Geometry, GeometryError};
pub use label::{LabelGlyphs, format_label};
pub use layout::{LayoutError, ROW_SEPARATOR, pack_rows};
pub use options::UiOptions;
pub use phase::{Activity, Composition, Phase, PhaseKind};
pub use progress::{BuildSnapshot, BuildTracker, FileProgress};
pub use prompt::{Direction, MissingFileChoice, MissingFilePrompt, Selection};
