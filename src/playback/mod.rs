//! Playback module - Timed replay of recorded traces onto visual state.
//!
//! [`Player`] schedules and emits events from a finished log against
//! injected time; [`VisualState`] projects applied events into per-position
//! roles; the session types bundle both behind the start/pause control
//! surface a page-level caller drives.

mod player;
mod projector;
mod session;

pub use player::{Emitted, PlaybackStatus, Player};
pub use projector::{Role, VisualElement, VisualState};
pub use session::{SearchSession, SortSession};
