use std::{fmt, time::Duration};

use crate::engine::trace::{Step, StepSequence};

/// Fastest automatic advance, in milliseconds per step.
pub const MIN_SPEED_MS: u64 = 100;
/// Slowest automatic advance, in milliseconds per step.
pub const MAX_SPEED_MS: u64 = 2000;
pub const DEFAULT_SPEED_MS: u64 = 500;

pub fn clamp_speed(ms: u64) -> u64 {
    ms.clamp(MIN_SPEED_MS, MAX_SPEED_MS)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    /// Before the first step.
    #[default]
    Idle,
    /// Advancing once per speed period.
    Playing,
    Paused,
    /// Parked on the last step.
    Completed,
}

/// Host-configurable playback settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PlaybackOpts {
    pub speed_ms: u64,
}

impl Default for PlaybackOpts {
    fn default() -> Self {
        Self {
            speed_ms: DEFAULT_SPEED_MS,
        }
    }
}

/// Time banked toward the next automatic tick. Exists only while playing.
#[derive(Clone, Copy, Debug, Default)]
struct TickTimer {
    banked: Duration,
}

type StepObserver<'a> = Box<dyn FnMut(&Step, usize) + 'a>;

/// Finite-state machine over a position in a [`StepSequence`].
///
/// The position is `None` before the first step and `Some(k)` afterwards. Every
/// position change is reported synchronously to the observer with the step at the new
/// position. Automatic advancement is cooperative: the host reports elapsed time via
/// [`PlaybackController::advance`], and the pending timer is dropped by every transition
/// that leaves `Playing`, so no tick can land after a pause, seek or reset.
///
/// Out-of-range requests and operations on an empty sequence are silent no-ops.
pub struct PlaybackController<'a> {
    steps: StepSequence,
    position: Option<usize>,
    state: PlaybackState,
    speed_ms: u64,
    timer: Option<TickTimer>,
    observer: Option<StepObserver<'a>>,
}

impl fmt::Debug for PlaybackController<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaybackController")
            .field("len", &self.steps.len())
            .field("position", &self.position)
            .field("state", &self.state)
            .field("speed_ms", &self.speed_ms)
            .field("timer", &self.timer)
            .finish_non_exhaustive()
    }
}

impl<'a> PlaybackController<'a> {
    pub fn new(steps: StepSequence) -> Self {
        Self::with_opts(steps, PlaybackOpts::default())
    }

    pub fn with_opts(steps: StepSequence, opts: PlaybackOpts) -> Self {
        Self {
            steps,
            position: None,
            state: PlaybackState::Idle,
            speed_ms: clamp_speed(opts.speed_ms),
            timer: None,
            observer: None,
        }
    }

    /// Register the step-change callback, replacing any previous one.
    pub fn on_step_change(mut self, f: impl FnMut(&Step, usize) + 'a) -> Self {
        self.set_observer(f);
        self
    }

    pub fn set_observer(&mut self, f: impl FnMut(&Step, usize) + 'a) {
        self.observer = Some(Box::new(f));
    }

    /// Swap in a new trace and return to `Idle`.
    pub fn load(&mut self, steps: StepSequence) {
        self.reset();
        self.steps = steps;
    }

    pub fn steps(&self) -> &StepSequence {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn position(&self) -> Option<usize> {
        self.position
    }

    /// Position as a signed index, `-1` before the first step.
    pub fn position_index(&self) -> i64 {
        self.position.map_or(-1, |p| p as i64)
    }

    pub fn current_step(&self) -> Option<&Step> {
        self.position.and_then(|p| self.steps.get(p))
    }

    pub fn speed_ms(&self) -> u64 {
        self.speed_ms
    }

    /// Set the tick period, clamped to `[MIN_SPEED_MS, MAX_SPEED_MS]`.
    ///
    /// While playing, the interval restarts: banked time is dropped and the next tick
    /// fires one full new period later.
    pub fn set_speed(&mut self, ms: u64) {
        self.speed_ms = clamp_speed(ms);
        if let Some(timer) = self.timer.as_mut() {
            timer.banked = Duration::ZERO;
        }
    }

    fn period(&self) -> Duration {
        Duration::from_millis(self.speed_ms)
    }

    fn last_index(&self) -> Option<usize> {
        self.steps.len().checked_sub(1)
    }

    pub fn play(&mut self) {
        if self.steps.is_empty() || self.state == PlaybackState::Playing {
            return;
        }
        if self.state == PlaybackState::Completed || self.position == self.last_index() {
            self.position = None;
        }
        self.timer = Some(TickTimer::default());
        self.transition(PlaybackState::Playing);
        if self.position.is_none() {
            self.tick();
        }
    }

    pub fn pause(&mut self) {
        if self.state != PlaybackState::Playing {
            return;
        }
        self.stop_timer();
        self.transition(PlaybackState::Paused);
    }

    pub fn step_forward(&mut self) {
        let next = self.position.map_or(0, |p| p + 1);
        if next >= self.steps.len() {
            return;
        }
        self.stop_timer();
        self.move_to(next);
        self.transition(PlaybackState::Paused);
    }

    pub fn step_backward(&mut self) {
        let Some(current) = self.position else {
            return;
        };
        self.stop_timer();
        match current.checked_sub(1) {
            Some(prev) => {
                self.move_to(prev);
                self.transition(PlaybackState::Paused);
            }
            None => {
                self.position = None;
                self.transition(PlaybackState::Idle);
            }
        }
    }

    /// Jump to `index`. Indices outside `0..len` are ignored rather than clamped.
    pub fn go_to_step(&mut self, index: i64) {
        let Ok(index) = usize::try_from(index) else {
            return;
        };
        if index >= self.steps.len() {
            return;
        }
        self.stop_timer();
        self.move_to(index);
        self.transition(PlaybackState::Paused);
    }

    pub fn reset(&mut self) {
        self.stop_timer();
        self.position = None;
        self.transition(PlaybackState::Idle);
    }

    /// Feed elapsed wall time into the tick timer. Returns the number of ticks fired.
    ///
    /// One tick fires per full period in `elapsed`, so a simulated clock can replay a
    /// span in one call. Hosts pacing real time should advance by `next_tick_in`.
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        let period = self.period();
        let Some(timer) = self.timer.as_mut() else {
            return 0;
        };
        timer.banked += elapsed;

        let mut fired = 0;
        loop {
            let Some(timer) = self.timer.as_mut() else {
                break;
            };
            if timer.banked < period {
                break;
            }
            timer.banked -= period;
            self.tick();
            fired += 1;
        }
        fired
    }

    /// Time until the next automatic tick, or `None` when not playing.
    pub fn next_tick_in(&self) -> Option<Duration> {
        self.timer.map(|t| self.period().saturating_sub(t.banked))
    }

    fn tick(&mut self) {
        let next = self.position.map_or(0, |p| p + 1);
        if next < self.steps.len() {
            self.move_to(next);
        }
        if next + 1 >= self.steps.len() {
            self.stop_timer();
            self.transition(PlaybackState::Completed);
        }
    }

    fn move_to(&mut self, index: usize) {
        self.position = Some(index);
        if let Some(observer) = self.observer.as_mut() {
            observer(&self.steps[index], index);
        }
    }

    fn stop_timer(&mut self) {
        self.timer = None;
    }

    fn transition(&mut self, to: PlaybackState) {
        if self.state != to {
            tracing::debug!(
                from = ?self.state,
                to = ?to,
                position = self.position_index(),
                "playback transition"
            );
            self.state = to;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/controller.rs"]
mod tests;
