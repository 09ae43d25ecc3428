//! Playback scheduler - timed replay of a finished event log.
//!
//! The player owns the log for the duration of one run and replays it at a
//! fixed per-event interval. Time is injected: callers pass a monotonic
//! [`Duration`] reading into [`Player::play`] and [`Player::poll`], so the
//! scheduler itself never touches a clock and pause/resume is exactly
//! reproducible in tests. All pending emissions belong to the schedule
//! created by the last `play` call; pausing drops that schedule, which
//! cancels every outstanding emission at once. No emission can fire for a
//! cancelled run because no timer state outlives the schedule.

use std::time::Duration;

use log::debug;

use crate::trace::{AnimationEvent, EventLog};

/// Lifecycle of one playback run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackStatus {
    Idle,
    Playing,
    Paused,
    Completed,
}

/// Pending emissions for the active play call.
///
/// Emission of the event at absolute log index `k` is due at
/// `started_at + (k - start_index) * interval`; the first resumed event
/// fires immediately, matching a zero-delay first timeout.
#[derive(Debug, Clone, Copy)]
struct Schedule {
    started_at: Duration,
    start_index: usize,
}

/// Events applied by one [`Player::poll`] call.
#[derive(Debug)]
pub struct Emitted<'a> {
    /// Events applied this poll, in log order.
    pub events: &'a [AnimationEvent],
    /// Absolute log index of `events[0]`.
    pub first_index: usize,
    /// True exactly once per run: on the poll that applies the final event
    /// (or the first poll of an empty log).
    pub completed: bool,
}

/// Replays an owned [`EventLog`] against injected time.
#[derive(Debug)]
pub struct Player {
    log: EventLog,
    interval: Duration,
    /// Index of the next event to apply. Monotonically non-decreasing while
    /// playing; reset only by constructing a new player.
    cursor: usize,
    status: PlaybackStatus,
    schedule: Option<Schedule>,
    completion_reported: bool,
}

impl Player {
    /// Wrap a finished log for playback at the given per-event interval.
    pub fn new(log: EventLog, interval: Duration) -> Self {
        Self {
            log,
            interval,
            cursor: 0,
            status: PlaybackStatus::Idle,
            schedule: None,
            completion_reported: false,
        }
    }

    #[inline]
    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    /// Index of the next event to apply.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Total number of events in the log.
    #[inline]
    pub fn len(&self) -> usize {
        self.log.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Change the per-event interval, keeping the cursor where it is.
    ///
    /// A live run is paused, since its schedule was built at the old
    /// cadence; the new interval applies when the next [`Player::play`]
    /// builds its schedule.
    pub fn set_interval(&mut self, interval: Duration) {
        self.pause();
        self.interval = interval;
    }

    /// Start or resume playback at time `now`.
    ///
    /// From `Idle` this schedules the whole log from index 0; from `Paused`
    /// it schedules the remainder from the stored cursor without touching
    /// the log. No-op while already playing or after completion.
    pub fn play(&mut self, now: Duration) {
        match self.status {
            PlaybackStatus::Idle | PlaybackStatus::Paused => {
                debug!(
                    "playback: scheduling events {}..{} at {:?}/event",
                    self.cursor,
                    self.log.len(),
                    self.interval
                );
                self.schedule = Some(Schedule {
                    started_at: now,
                    start_index: self.cursor,
                });
                self.status = PlaybackStatus::Playing;
            }
            PlaybackStatus::Playing | PlaybackStatus::Completed => {}
        }
    }

    /// Cancel all pending emissions, retaining the cursor for resume.
    ///
    /// Idempotent: pausing while idle, paused or completed is a no-op.
    pub fn pause(&mut self) {
        if self.status == PlaybackStatus::Playing {
            debug!("playback: paused at event {}", self.cursor);
            self.schedule = None;
            self.status = PlaybackStatus::Paused;
        }
    }

    /// Apply every emission due at time `now`, in log order.
    ///
    /// Returns the applied events; `completed` is set on exactly one poll
    /// per run, when the final event lands.
    pub fn poll(&mut self, now: Duration) -> Emitted<'_> {
        let first_index = self.cursor;

        if self.status == PlaybackStatus::Playing {
            if let Some(schedule) = self.schedule {
                let due = due_index(schedule, self.interval, now, self.log.len());
                if due > self.cursor {
                    self.cursor = due;
                }
                if self.cursor >= self.log.len() {
                    debug!("playback: log exhausted after {} events", self.log.len());
                    self.schedule = None;
                    self.status = PlaybackStatus::Completed;
                }
            }
        }

        let completed = self.status == PlaybackStatus::Completed && !self.completion_reported;
        if completed {
            self.completion_reported = true;
        }

        Emitted {
            events: &self.log.events()[first_index..self.cursor],
            first_index,
            completed,
        }
    }
}

/// Exclusive upper bound of emissions due at `now` for this schedule.
fn due_index(schedule: Schedule, interval: Duration, now: Duration, len: usize) -> usize {
    let elapsed = now.checked_sub(schedule.started_at).unwrap_or(Duration::ZERO);

    // The emission at start_index is due immediately; each later one is due
    // a further `interval` out. A zero interval drains the whole log.
    let steps = if interval.is_zero() {
        len
    } else {
        (elapsed.as_nanos() / interval.as_nanos()) as usize
    };

    schedule.start_index.saturating_add(steps + 1).min(len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SortAlgorithm;
    use crate::trace::{EventKind, sort};

    const TICK: Duration = Duration::from_millis(100);

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn bubble_player() -> Player {
        let log = sort::trace(&[5, 3, 8, 1], SortAlgorithm::Bubble);
        Player::new(log, TICK)
    }

    #[test]
    fn test_first_event_fires_immediately() {
        let mut player = bubble_player();
        player.play(ms(0));

        let emitted = player.poll(ms(0));
        assert_eq!(emitted.events.len(), 1);
        assert_eq!(emitted.first_index, 0);
        assert_eq!(
            emitted.events[0].kind,
            EventKind::Compare { a: 0, b: 1 }
        );
    }

    #[test]
    fn test_emissions_follow_interval() {
        let mut player = bubble_player();
        player.play(ms(0));

        player.poll(ms(0));
        // 250 ms in: events at 0, 100, 200 ms are due; one was applied.
        let emitted = player.poll(ms(250));
        assert_eq!(emitted.first_index, 1);
        assert_eq!(emitted.events.len(), 2);
        assert_eq!(player.cursor(), 3);
    }

    #[test]
    fn test_poll_before_play_is_empty() {
        let mut player = bubble_player();
        let emitted = player.poll(ms(500));
        assert!(emitted.events.is_empty());
        assert!(!emitted.completed);
        assert_eq!(player.status(), PlaybackStatus::Idle);
    }

    #[test]
    fn test_pause_cancels_pending_emissions() {
        let mut player = bubble_player();
        player.play(ms(0));
        player.poll(ms(150));
        assert_eq!(player.cursor(), 2);

        player.pause();
        assert_eq!(player.status(), PlaybackStatus::Paused);

        // Time passing while paused emits nothing and moves nothing.
        let emitted = player.poll(ms(5000));
        assert!(emitted.events.is_empty());
        assert_eq!(player.cursor(), 2);
    }

    #[test]
    fn test_pause_is_idempotent() {
        let mut player = bubble_player();
        player.pause();
        assert_eq!(player.status(), PlaybackStatus::Idle);

        player.play(ms(0));
        player.pause();
        player.pause();
        assert_eq!(player.status(), PlaybackStatus::Paused);
    }

    #[test]
    fn test_resume_does_not_replay_or_skip() {
        let total = bubble_player().len();
        let mut player = bubble_player();
        let mut seen: Vec<usize> = Vec::new();

        player.play(ms(0));
        let emitted = player.poll(ms(320));
        seen.extend(emitted.first_index..emitted.first_index + emitted.events.len());
        player.pause();
        let resumed_from = player.cursor();

        // Resume much later; the wall-clock gap must not fast-forward
        // events, only the post-resume elapsed time counts.
        player.play(ms(10_000));
        let emitted = player.poll(ms(10_000));
        assert_eq!(emitted.first_index, resumed_from);
        seen.extend(emitted.first_index..emitted.first_index + emitted.events.len());

        let emitted = player.poll(ms(10_000) + TICK * (total as u32));
        seen.extend(emitted.first_index..emitted.first_index + emitted.events.len());
        assert!(emitted.completed);

        // Every event applied exactly once, in order.
        let expected: Vec<usize> = (0..total).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_set_interval_keeps_cursor_and_paces_resume() {
        let mut player = bubble_player();
        player.play(ms(0));
        player.poll(ms(150));
        assert_eq!(player.cursor(), 2);

        player.set_interval(ms(200));
        assert_eq!(player.status(), PlaybackStatus::Paused);
        assert_eq!(player.cursor(), 2);
        assert_eq!(player.interval(), ms(200));

        // Resume emits the next event immediately, then every 200 ms.
        player.play(ms(1_000));
        let emitted = player.poll(ms(1_000));
        assert_eq!(emitted.first_index, 2);
        assert_eq!(emitted.events.len(), 1);

        assert!(player.poll(ms(1_199)).events.is_empty());
        assert_eq!(player.poll(ms(1_200)).events.len(), 1);
    }

    #[test]
    fn test_completion_reported_exactly_once() {
        let mut player = bubble_player();
        let total = player.len() as u32;
        player.play(ms(0));

        let emitted = player.poll(TICK * total * 2);
        assert!(emitted.completed);
        assert_eq!(player.status(), PlaybackStatus::Completed);

        let emitted = player.poll(TICK * total * 3);
        assert!(!emitted.completed);
        assert!(emitted.events.is_empty());
    }

    #[test]
    fn test_empty_log_completes() {
        let mut player = Player::new(EventLog::new(), TICK);
        player.play(ms(0));

        let emitted = player.poll(ms(0));
        assert!(emitted.events.is_empty());
        assert!(emitted.completed);
        assert_eq!(player.status(), PlaybackStatus::Completed);

        assert!(!player.poll(ms(100)).completed);
    }

    #[test]
    fn test_play_after_completion_is_noop() {
        let mut player = Player::new(EventLog::new(), TICK);
        player.play(ms(0));
        player.poll(ms(0));

        player.play(ms(1000));
        assert_eq!(player.status(), PlaybackStatus::Completed);
        assert!(player.poll(ms(2000)).events.is_empty());
    }

    #[test]
    fn test_clock_going_backwards_emits_nothing_new() {
        let mut player = bubble_player();
        player.play(ms(500));
        player.poll(ms(500));

        let emitted = player.poll(ms(100));
        assert!(emitted.events.is_empty());
        assert_eq!(player.cursor(), 1);
    }
}
