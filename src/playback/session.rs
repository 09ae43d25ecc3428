//! Visualizer sessions - the caller-facing control surface for one run.
//!
//! A session owns the input array, the chosen algorithm and speed, the
//! projected visual state, and (while a run is live) the player. Callers
//! drive it with a running flag and periodic polls, exactly like flipping a
//! start/pause control: raising the flag from idle generates the trace and
//! starts playback, raising it from paused resumes without regenerating,
//! lowering it cancels all pending emissions in place. Changing the array or
//! algorithm invalidates the run synchronously before any new state is
//! visible; changing the speed only pauses it, keeping cursor and visual
//! state for a resume at the new cadence.

use std::time::Duration;

use log::info;

use super::player::{PlaybackStatus, Player};
use super::projector::VisualState;
use crate::schema::{ConfigError, PlaybackConfig, SearchAlgorithm, SortAlgorithm};
use crate::trace::{SearchOutcome, search, sort};

/// Sorting visualizer session.
#[derive(Debug)]
pub struct SortSession {
    array: Vec<u32>,
    algorithm: SortAlgorithm,
    config: PlaybackConfig,
    visual: VisualState,
    player: Option<Player>,
    total_steps: usize,
    narration: Option<String>,
}

impl SortSession {
    pub fn new(
        array: Vec<u32>,
        algorithm: SortAlgorithm,
        config: PlaybackConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let visual = VisualState::new(&array);
        Ok(Self {
            array,
            algorithm,
            config,
            visual,
            player: None,
            total_steps: 0,
            narration: None,
        })
    }

    /// Raise or lower the running flag at time `now`.
    pub fn set_running(&mut self, running: bool, now: Duration) {
        if running {
            self.start_or_resume(now);
        } else if let Some(player) = &mut self.player {
            player.pause();
        }
    }

    fn start_or_resume(&mut self, now: Duration) {
        // A finished run restarts from scratch; a paused one resumes.
        if matches!(
            self.player.as_ref().map(Player::status),
            Some(PlaybackStatus::Completed)
        ) {
            self.invalidate();
        }

        match &mut self.player {
            Some(player) => player.play(now),
            None => {
                let log = sort::trace(&self.array, self.algorithm);
                self.total_steps = log.len();
                info!(
                    "sort session: {} over {} elements, {} steps",
                    self.algorithm,
                    self.array.len(),
                    self.total_steps
                );
                let mut player = Player::new(log, self.config.interval());
                player.play(now);
                self.player = Some(player);
            }
        }
    }

    /// Apply every due emission. Returns true on the poll that completes
    /// the run; the visual array is fully sorted at that point.
    pub fn poll(&mut self, now: Duration) -> bool {
        let Some(player) = &mut self.player else {
            return false;
        };

        let emitted = player.poll(now);
        for event in emitted.events {
            self.visual.apply(event);
            if event.narration.is_some() {
                self.narration = event.narration.clone();
            }
        }
        emitted.completed
    }

    /// Replace the input array, cancelling any in-flight run.
    pub fn set_array(&mut self, array: Vec<u32>) {
        self.array = array;
        self.invalidate();
    }

    /// Switch algorithm, cancelling any in-flight run.
    pub fn set_algorithm(&mut self, algorithm: SortAlgorithm) {
        self.algorithm = algorithm;
        self.invalidate();
    }

    /// Change playback speed. Progress survives: a live run is paused and
    /// resumes from its cursor at the new cadence.
    pub fn set_speed(&mut self, speed: u32) -> Result<(), ConfigError> {
        let config = PlaybackConfig::with_speed(speed);
        config.validate()?;
        self.config = config;
        if let Some(player) = &mut self.player {
            player.set_interval(self.config.interval());
        }
        Ok(())
    }

    fn invalidate(&mut self) {
        // Dropping the player drops its schedule, so every pending emission
        // of the old run is cancelled before new state is set.
        self.player = None;
        self.total_steps = 0;
        self.narration = None;
        self.visual = VisualState::new(&self.array);
    }

    pub fn visual(&self) -> &VisualState {
        &self.visual
    }

    pub fn array(&self) -> &[u32] {
        &self.array
    }

    pub fn algorithm(&self) -> SortAlgorithm {
        self.algorithm
    }

    /// 1-based count of applied steps.
    pub fn current_step(&self) -> usize {
        self.player.as_ref().map_or(0, Player::cursor)
    }

    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    /// Narration of the most recently applied narrated event.
    pub fn description(&self) -> Option<&str> {
        self.narration.as_deref()
    }

    pub fn status(&self) -> PlaybackStatus {
        self.player
            .as_ref()
            .map_or(PlaybackStatus::Idle, Player::status)
    }

    pub fn is_completed(&self) -> bool {
        self.status() == PlaybackStatus::Completed
    }
}

/// Searching visualizer session.
///
/// Identical control surface to [`SortSession`], plus the search target and
/// the rendered view array (the sorted copy for binary search). Completion
/// reports the [`SearchOutcome`] exactly once.
#[derive(Debug)]
pub struct SearchSession {
    array: Vec<u32>,
    target: u32,
    algorithm: SearchAlgorithm,
    config: PlaybackConfig,
    view: Vec<u32>,
    visual: VisualState,
    player: Option<Player>,
    outcome: Option<SearchOutcome>,
    total_steps: usize,
    narration: Option<String>,
}

impl SearchSession {
    pub fn new(
        array: Vec<u32>,
        target: u32,
        algorithm: SearchAlgorithm,
        config: PlaybackConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let view = render_view(&array, algorithm);
        let visual = VisualState::new(&view);
        Ok(Self {
            array,
            target,
            algorithm,
            config,
            view,
            visual,
            player: None,
            outcome: None,
            total_steps: 0,
            narration: None,
        })
    }

    /// Raise or lower the running flag at time `now`.
    pub fn set_running(&mut self, running: bool, now: Duration) {
        if running {
            self.start_or_resume(now);
        } else if let Some(player) = &mut self.player {
            player.pause();
        }
    }

    fn start_or_resume(&mut self, now: Duration) {
        if matches!(
            self.player.as_ref().map(Player::status),
            Some(PlaybackStatus::Completed)
        ) {
            self.invalidate();
        }

        match &mut self.player {
            Some(player) => player.play(now),
            None => {
                let trace = search::trace(&self.array, self.target, self.algorithm);
                self.view = trace.view;
                self.visual = VisualState::new(&self.view);
                self.outcome = Some(trace.outcome);
                self.total_steps = trace.log.len();
                info!(
                    "search session: {} for {} over {} elements, {} steps",
                    self.algorithm,
                    self.target,
                    self.array.len(),
                    self.total_steps
                );
                let mut player = Player::new(trace.log, self.config.interval());
                player.play(now);
                self.player = Some(player);
            }
        }
    }

    /// Apply every due emission. Returns the outcome on the poll that
    /// completes the run, exactly once.
    pub fn poll(&mut self, now: Duration) -> Option<SearchOutcome> {
        let Some(player) = &mut self.player else {
            return None;
        };

        let emitted = player.poll(now);
        for event in emitted.events {
            self.visual.apply(event);
            if event.narration.is_some() {
                self.narration = event.narration.clone();
            }
        }

        if emitted.completed {
            self.outcome.or(Some(SearchOutcome::NotFound))
        } else {
            None
        }
    }

    /// Replace the input array, cancelling any in-flight run.
    pub fn set_array(&mut self, array: Vec<u32>) {
        self.array = array;
        self.invalidate();
    }

    /// Change the search target, cancelling any in-flight run.
    pub fn set_target(&mut self, target: u32) {
        self.target = target;
        self.invalidate();
    }

    /// Switch algorithm, cancelling any in-flight run.
    pub fn set_algorithm(&mut self, algorithm: SearchAlgorithm) {
        self.algorithm = algorithm;
        self.invalidate();
    }

    /// Change playback speed. Progress survives: a live run is paused and
    /// resumes from its cursor at the new cadence.
    pub fn set_speed(&mut self, speed: u32) -> Result<(), ConfigError> {
        let config = PlaybackConfig::with_speed(speed);
        config.validate()?;
        self.config = config;
        if let Some(player) = &mut self.player {
            player.set_interval(self.config.interval());
        }
        Ok(())
    }

    fn invalidate(&mut self) {
        self.player = None;
        self.outcome = None;
        self.total_steps = 0;
        self.narration = None;
        self.view = render_view(&self.array, self.algorithm);
        self.visual = VisualState::new(&self.view);
    }

    pub fn visual(&self) -> &VisualState {
        &self.visual
    }

    /// The array playback renders: the sorted copy for binary search, the
    /// caller's order otherwise.
    pub fn view(&self) -> &[u32] {
        &self.view
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    pub fn algorithm(&self) -> SearchAlgorithm {
        self.algorithm
    }

    /// 1-based count of applied steps.
    pub fn current_step(&self) -> usize {
        self.player.as_ref().map_or(0, Player::cursor)
    }

    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    /// Narration of the most recently applied narrated event.
    pub fn description(&self) -> Option<&str> {
        self.narration.as_deref()
    }

    pub fn status(&self) -> PlaybackStatus {
        self.player
            .as_ref()
            .map_or(PlaybackStatus::Idle, Player::status)
    }

    pub fn is_completed(&self) -> bool {
        self.status() == PlaybackStatus::Completed
    }
}

/// The array a search run is rendered against.
fn render_view(array: &[u32], algorithm: SearchAlgorithm) -> Vec<u32> {
    if algorithm.requires_sorted_view() {
        let mut sorted = array.to_vec();
        sorted.sort_unstable();
        sorted
    } else {
        array.to_vec()
    }
}
