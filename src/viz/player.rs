//! Playback engine
//!
//! The player owns the visualization state and pulls steps from an armed
//! sequence, either on the host's frame tick (gated by the speed-derived
//! interval) or one at a time via [`Player::step_once`]. Every applied step is
//! followed by a synchronous `draw`.

use std::fmt;
use std::time::{Duration, Instant};

use super::renderer::{Renderer, SetupError};
use super::types::{Instrumentation, Step, VizState};

/// Tick interval at speed 1.0
pub const BASE_INTERVAL: Duration = Duration::from_millis(60);

/// Slowest speed multiplier the UI offers
pub const MIN_SPEED: f64 = 0.25;

/// Fastest speed multiplier the UI offers
pub const MAX_SPEED: f64 = 3.0;

/// A boxed, lazily pulled step sequence
pub type StepSequence = Box<dyn Iterator<Item = Step>>;

/// Completion notification, fired once per armed run
pub type OnDone = Box<dyn FnMut()>;

/// Transport state of the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// No sequence armed
    #[default]
    Idle,
    /// Sequence armed, nothing applied yet by ticking
    Armed,
    Playing,
    Paused,
    /// Terminal step observed; waits for a new sequence
    Finished,
}

impl PlaybackState {
    pub fn label(self) -> &'static str {
        match self {
            PlaybackState::Idle => "idle",
            PlaybackState::Armed => "ready",
            PlaybackState::Playing => "playing",
            PlaybackState::Paused => "paused",
            PlaybackState::Finished => "done",
        }
    }
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Drives a step sequence over a [`VizState`] at a controllable pace
pub struct Player<R: Renderer> {
    renderer: R,
    state: VizState,
    steps: Option<StepSequence>,
    playback: PlaybackState,
    speed: f64,
    interval: Duration,
    last_tick: Option<Instant>,
    instrumentation: Instrumentation,
    on_done: OnDone,
    /// Completion already reported for the current run
    done_fired: bool,
}

impl<R: Renderer> Player<R> {
    /// Create a player bound to `renderer`.
    ///
    /// Fails when the renderer cannot prepare its surface. On success the
    /// initial state has been drawn once.
    pub fn new<F>(mut renderer: R, state: VizState, on_done: F) -> Result<Self, SetupError>
    where
        F: FnMut() + 'static,
    {
        renderer.setup()?;
        renderer.draw(&state);

        Ok(Self {
            renderer,
            state,
            steps: None,
            playback: PlaybackState::Idle,
            speed: 1.0,
            interval: BASE_INTERVAL,
            last_tick: None,
            instrumentation: Instrumentation::default(),
            on_done: Box::new(on_done),
            done_fired: false,
        })
    }

    /// Change the speed multiplier; the new interval applies from the next tick.
    ///
    /// Non-finite or non-positive multipliers are ignored.
    pub fn set_speed(&mut self, multiplier: f64) {
        if !(multiplier.is_finite() && multiplier > 0.0) {
            tracing::warn!(multiplier, "Ignoring invalid speed multiplier");
            return;
        }
        match Duration::try_from_secs_f64(BASE_INTERVAL.as_secs_f64() / multiplier) {
            Ok(interval) => {
                self.speed = multiplier;
                self.interval = interval;
                tracing::debug!(
                    multiplier,
                    interval_ms = interval.as_secs_f64() * 1000.0,
                    "Playback speed changed"
                );
            }
            Err(e) => {
                tracing::warn!(multiplier, error = %e, "Speed multiplier out of range");
            }
        }
    }

    /// Arm a new sequence, abandoning any run in progress.
    ///
    /// Resets instrumentation and the state's annotations.
    pub fn set_steps<I>(&mut self, steps: I)
    where
        I: IntoIterator<Item = Step>,
        I::IntoIter: 'static,
    {
        if matches!(
            self.playback,
            PlaybackState::Playing | PlaybackState::Paused
        ) {
            tracing::debug!(
                previous = %self.playback,
                "Abandoning in-flight run"
            );
        }

        self.steps = Some(Box::new(steps.into_iter()));
        self.instrumentation = Instrumentation::started_now();
        self.state.clear_annotations();
        self.playback = PlaybackState::Armed;
        self.last_tick = None;
        self.done_fired = false;
        self.renderer.draw(&self.state);
    }

    /// Flip between playing and paused. No-op when idle or finished.
    pub fn toggle_play(&mut self) {
        self.playback = match self.playback {
            PlaybackState::Armed | PlaybackState::Paused => PlaybackState::Playing,
            PlaybackState::Playing => PlaybackState::Paused,
            other => {
                tracing::debug!(state = %other, "Toggle ignored, no run to play");
                other
            }
        };
    }

    /// Frame callback. Applies one step when playing and the interval has
    /// elapsed since the last applied tick. Returns whether a step was pulled.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.playback != PlaybackState::Playing {
            return false;
        }
        if let Some(last) = self.last_tick {
            if now.saturating_duration_since(last) < self.interval {
                return false;
            }
        }
        self.last_tick = Some(now);
        self.advance();
        true
    }

    /// Pull and apply exactly one step regardless of play/pause.
    /// No-op when no sequence is armed.
    pub fn step_once(&mut self) {
        if self.steps.is_none() {
            return;
        }
        self.advance();
    }

    /// Replace the visualization state wholesale (new array).
    ///
    /// Drops any armed sequence and returns to idle.
    pub fn replace_state(&mut self, state: VizState) {
        self.state = state;
        self.steps = None;
        self.playback = PlaybackState::Idle;
        self.last_tick = None;
        self.instrumentation = Instrumentation::default();
        self.done_fired = false;
        self.renderer.draw(&self.state);
    }

    /// Draw the current state again, e.g. after the surface was resized
    pub fn redraw(&mut self) {
        self.renderer.draw(&self.state);
    }

    pub fn state(&self) -> &VizState {
        &self.state
    }

    pub fn instrumentation(&self) -> &Instrumentation {
        &self.instrumentation
    }

    pub fn playback(&self) -> PlaybackState {
        self.playback
    }

    pub fn is_playing(&self) -> bool {
        self.playback == PlaybackState::Playing
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    fn advance(&mut self) {
        let next = self.steps.as_mut().and_then(|steps| steps.next());
        match next {
            Some(step) => {
                self.apply(&step);
                if step.is_done() {
                    self.finish();
                }
            }
            // Exhaustion without a Done is still a normal end of run
            None => self.finish(),
        }
    }

    fn apply(&mut self, step: &Step) {
        if !self.state.apply(step) {
            tracing::warn!(?step, len = self.state.len(), "Skipping out-of-range step");
            return;
        }
        match step {
            Step::Compare { .. } => self.instrumentation.comparisons += 1,
            Step::Write { .. } => self.instrumentation.writes += 1,
            Step::MarkSorted { .. } | Step::Done => {}
        }
        self.renderer.draw(&self.state);
    }

    fn finish(&mut self) {
        if self.done_fired {
            return;
        }
        self.done_fired = true;
        self.playback = PlaybackState::Finished;
        self.steps = None;
        self.last_tick = None;
        self.instrumentation.end_time.get_or_insert_with(Instant::now);

        tracing::info!(
            comparisons = self.instrumentation.comparisons,
            writes = self.instrumentation.writes,
            elapsed_ms = self.instrumentation.elapsed().as_millis() as u64,
            "Sort run finished"
        );

        (self.on_done)();
    }
}
