//! Animation events - the recorded, replayable trace of one algorithm run.

use serde::{Deserialize, Serialize};

/// A single observable state transition recorded by a trace generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    /// Two positions under comparison; no value mutation.
    Compare { a: usize, b: usize },
    /// Values at two positions exchanged in the working copy.
    Swap { a: usize, b: usize },
    /// Value written into a position (merge placement).
    Overwrite { index: usize, value: u32 },
    /// Positions permanently flagged sorted. Monotonic, never unset.
    MarkSorted { indices: Vec<usize> },
    /// Position currently being examined.
    Visit { index: usize },
    /// Position queued for a later visit.
    Enqueue { index: usize },
    /// Target located. Terminal for a search run.
    Found { index: usize },
    /// Narration only, no visual effect.
    Narrate,
}

/// One replayable step: a state transition plus optional narration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationEvent {
    pub kind: EventKind,
    /// Human-readable description shown alongside the visual change.
    pub narration: Option<String>,
}

impl AnimationEvent {
    /// Event with no narration.
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            narration: None,
        }
    }

    /// Event with an accompanying description.
    pub fn narrated(kind: EventKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            narration: Some(text.into()),
        }
    }
}

/// Ordered sequence of animation events for one algorithm run.
///
/// Produced once per (array, algorithm) pair and never modified afterwards;
/// log order is the sole timeline for playback.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<AnimationEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Number of events in the log.
    #[inline]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Event at the given log index.
    pub fn get(&self, index: usize) -> Option<&AnimationEvent> {
        self.events.get(index)
    }

    /// All events in log order.
    pub fn events(&self) -> &[AnimationEvent] {
        &self.events
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AnimationEvent> {
        self.events.iter()
    }

    /// Index reported by the log's `Found` event, if any.
    pub fn found_index(&self) -> Option<usize> {
        self.events.iter().find_map(|event| match event.kind {
            EventKind::Found { index } => Some(index),
            _ => None,
        })
    }

    pub(crate) fn push(&mut self, event: AnimationEvent) {
        self.events.push(event);
    }

    pub(crate) fn compare(&mut self, a: usize, b: usize) {
        self.push(AnimationEvent::new(EventKind::Compare { a, b }));
    }

    pub(crate) fn swap(&mut self, a: usize, b: usize) {
        self.push(AnimationEvent::new(EventKind::Swap { a, b }));
    }

    pub(crate) fn overwrite(&mut self, index: usize, value: u32) {
        self.push(AnimationEvent::new(EventKind::Overwrite { index, value }));
    }

    pub(crate) fn mark_sorted(&mut self, indices: Vec<usize>) {
        self.push(AnimationEvent::new(EventKind::MarkSorted { indices }));
    }

    pub(crate) fn visit(&mut self, index: usize, text: impl Into<String>) {
        self.push(AnimationEvent::narrated(EventKind::Visit { index }, text));
    }

    pub(crate) fn enqueue(&mut self, index: usize, text: impl Into<String>) {
        self.push(AnimationEvent::narrated(EventKind::Enqueue { index }, text));
    }

    pub(crate) fn found(&mut self, index: usize, text: impl Into<String>) {
        self.push(AnimationEvent::narrated(EventKind::Found { index }, text));
    }

    pub(crate) fn narrate(&mut self, text: impl Into<String>) {
        self.push(AnimationEvent::narrated(EventKind::Narrate, text));
    }
}

impl<'a> IntoIterator for &'a EventLog {
    type Item = &'a AnimationEvent;
    type IntoIter = std::slice::Iter<'a, AnimationEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
