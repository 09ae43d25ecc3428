//! Algoview - Trace-and-replay visualization engine for classic sorting and
//! searching algorithms.
//!
//! The engine separates "compute all steps eagerly" from "play steps back
//! over time": a trace generator runs a textbook algorithm to completion
//! over a private copy of the input and records every observable state
//! transition as an animation event, then a playback scheduler replays the
//! finished log at a speed-derived cadence with pause and resume by step
//! index, never by re-running the algorithm.
//!
//! # Architecture
//!
//! The crate is split into three main modules:
//!
//! - `schema`: Algorithm selectors and playback pacing configuration
//! - `trace`: Eager trace generation (sorting, searching, tree synthesis)
//! - `playback`: Timed replay, visual-state projection, and sessions
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//!
//! use algoview::{
//!     playback::SortSession,
//!     schema::{PlaybackConfig, SortAlgorithm},
//! };
//!
//! let mut session = SortSession::new(
//!     vec![5, 3, 8, 1],
//!     SortAlgorithm::Bubble,
//!     PlaybackConfig::with_speed(100),
//! )
//! .expect("valid config");
//!
//! // Raise the running flag, then poll with a monotonic clock reading.
//! session.set_running(true, Duration::ZERO);
//! let mut now = Duration::ZERO;
//! while !session.poll(now) {
//!     now += Duration::from_millis(100);
//! }
//!
//! assert_eq!(session.visual().values(), vec![1, 3, 5, 8]);
//! ```

pub mod playback;
pub mod schema;
pub mod trace;

// WebAssembly bindings (only for wasm32 target)
#[cfg(target_arch = "wasm32")]
pub mod wasm;

// Re-export commonly used types
pub use playback::{PlaybackStatus, Player, Role, SearchSession, SortSession, VisualState};
pub use schema::{PlaybackConfig, SearchAlgorithm, SortAlgorithm};
pub use trace::{AnimationEvent, EventKind, EventLog, SearchOutcome, SearchTrace};
