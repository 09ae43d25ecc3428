//! Trace module - Eager trace generation for sorting and searching runs.
//!
//! A trace generator runs its algorithm to completion over a private copy of
//! the input and records one [`AnimationEvent`] per observable state
//! transition. The finished [`EventLog`] is immutable; playback replays it on
//! a timeline without re-running the algorithm.

mod event;
pub mod search;
pub mod sort;
mod tree;

pub use event::{AnimationEvent, EventKind, EventLog};
pub use search::{SearchOutcome, SearchTrace};
pub use tree::{NodeId, SyntheticTree, TreeNode};
