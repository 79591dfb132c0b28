//! The animation control loop and its command handle.

use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};

use pathviz_core::GridGraph;
use pathviz_search::{Algorithm, Progress, Search};

use crate::config::{AnimationConfig, Speed};
use crate::sink::StepSink;
use crate::state::{AnimationState, RunOutcome};

// ---------------------------------------------------------------------------
// Shared signal block
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct Signals {
    state: AnimationState,
    /// Pending single-step grants.
    permits: usize,
    speed: Speed,
    /// Set by `request_run`, consumed when `run` starts.
    armed: bool,
}

#[derive(Debug)]
struct Shared {
    signals: Mutex<Signals>,
    wake: Condvar,
}

/// Whether the loop may pull the next step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

// ---------------------------------------------------------------------------
// ControllerHandle
// ---------------------------------------------------------------------------

/// Issues commands to an [`AnimationController`] from any thread, or from
/// inside a [`StepSink`] callback.
///
/// Commands only record the requested state; the control loop observes it at
/// its next suspension boundary. Each command returns `false` when it does
/// not apply in the current state (e.g. `pause` while idle).
#[derive(Clone, Debug)]
pub struct ControllerHandle {
    shared: Arc<Shared>,
}

impl ControllerHandle {
    fn new(speed: Speed) -> Self {
        Self {
            shared: Arc::new(Shared {
                signals: Mutex::new(Signals {
                    state: AnimationState::Idle,
                    permits: 0,
                    speed,
                    armed: false,
                }),
                wake: Condvar::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Signals> {
        self.shared
            .signals
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn command(&self, f: impl FnOnce(&mut Signals) -> bool) -> bool {
        let applied = f(&mut self.lock());
        if applied {
            self.shared.wake.notify_all();
        }
        applied
    }

    /// The last requested state.
    pub fn state(&self) -> AnimationState {
        self.lock().state
    }

    pub fn speed(&self) -> Speed {
        self.lock().speed
    }

    /// Takes effect from the next delay on; a delay already in progress
    /// keeps its length.
    pub fn set_speed(&self, speed: Speed) {
        self.lock().speed = speed;
    }

    /// Enter `Running` ahead of [`AnimationController::run`], so commands
    /// issued before the loop starts are kept. A `stop` in between makes the
    /// next `run` return [`RunOutcome::Stopped`] without applying any step.
    pub fn request_run(&self) -> bool {
        self.command(|s| {
            if s.state != AnimationState::Idle {
                return false;
            }
            s.state = AnimationState::Running;
            s.permits = 0;
            s.armed = true;
            true
        })
    }

    /// `Running` or `Stepping` to `Paused`.
    pub fn pause(&self) -> bool {
        self.command(|s| match s.state {
            AnimationState::Running | AnimationState::Stepping => {
                s.state = AnimationState::Paused;
                s.permits = 0;
                true
            }
            _ => false,
        })
    }

    /// `Paused` or `Stepping` to `Running`.
    pub fn resume(&self) -> bool {
        self.command(|s| match s.state {
            AnimationState::Paused | AnimationState::Stepping => {
                s.state = AnimationState::Running;
                s.permits = 0;
                true
            }
            _ => false,
        })
    }

    /// Grant one more step while paused. Grants accumulate.
    pub fn step(&self) -> bool {
        self.command(|s| match s.state {
            AnimationState::Paused | AnimationState::Stepping => {
                s.state = AnimationState::Stepping;
                s.permits += 1;
                true
            }
            _ => false,
        })
    }

    /// Abort the active run. Steps already applied stay applied.
    pub fn stop(&self) -> bool {
        self.command(|s| {
            if s.state == AnimationState::Idle {
                return false;
            }
            s.state = AnimationState::Idle;
            s.permits = 0;
            true
        })
    }

    /// Pause when running, resume when paused.
    pub fn toggle_pause(&self) -> bool {
        match self.state() {
            AnimationState::Paused => self.resume(),
            _ => self.pause(),
        }
    }
}

// ---------------------------------------------------------------------------
// AnimationController
// ---------------------------------------------------------------------------

/// Drives a [`Search`] one step at a time, forwarding every step to a
/// [`StepSink`] and suspending between steps according to the current
/// [`AnimationState`].
///
/// `run` blocks the calling thread until the search completes or is stopped.
/// Use [`handle`](Self::handle) to control it from elsewhere.
#[derive(Debug)]
pub struct AnimationController {
    config: AnimationConfig,
    handle: ControllerHandle,
}

impl Default for AnimationController {
    fn default() -> Self {
        Self::new(AnimationConfig::default())
    }
}

impl AnimationController {
    pub fn new(config: AnimationConfig) -> Self {
        let handle = ControllerHandle::new(config.speed);
        Self { config, handle }
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    /// A new handle to this controller.
    pub fn handle(&self) -> ControllerHandle {
        self.handle.clone()
    }

    pub fn state(&self) -> AnimationState {
        self.handle.state()
    }

    pub fn speed(&self) -> Speed {
        self.handle.speed()
    }

    pub fn set_speed(&self, speed: Speed) {
        self.handle.set_speed(speed)
    }

    pub fn pause(&self) -> bool {
        self.handle.pause()
    }

    pub fn resume(&self) -> bool {
        self.handle.resume()
    }

    pub fn step(&self) -> bool {
        self.handle.step()
    }

    pub fn stop(&self) -> bool {
        self.handle.stop()
    }

    /// Reset `graph` and animate `algorithm` over it.
    ///
    /// Enters `Running` unless [`ControllerHandle::request_run`] already
    /// armed the run, in which case the state requested since then is kept.
    /// Failures of the search or the sink end the run with
    /// [`RunOutcome::Error`]. The state is `Idle` again when this returns.
    pub fn run<S: StepSink + ?Sized>(
        &mut self,
        graph: &mut GridGraph,
        algorithm: Algorithm,
        sink: &mut S,
    ) -> RunOutcome {
        let start = {
            let mut s = self.handle.lock();
            if std::mem::take(&mut s.armed) {
                s.state
            } else {
                s.state = AnimationState::Running;
                s.permits = 0;
                AnimationState::Running
            }
        };
        if start == AnimationState::Idle {
            log::info!("{algorithm}: stopped before the first step");
            let outcome = RunOutcome::Stopped;
            sink.finished(&outcome);
            return outcome;
        }
        graph.reset(self.config.keep_walls);
        log::debug!(
            "{algorithm}: animating on a {}x{} grid at {} speed",
            graph.width(),
            graph.height(),
            self.speed()
        );

        let mut announced = AnimationState::Idle;
        announce(sink, &mut announced, start);
        let outcome = self.drive(graph, algorithm, sink, &mut announced);

        self.handle.command(|s| {
            s.state = AnimationState::Idle;
            s.permits = 0;
            true
        });
        announce(sink, &mut announced, AnimationState::Idle);
        match &outcome {
            RunOutcome::Error(msg) => log::warn!("{algorithm}: run failed: {msg}"),
            _ => log::info!("{algorithm}: {outcome}"),
        }
        sink.finished(&outcome);
        outcome
    }

    fn drive<S: StepSink + ?Sized>(
        &self,
        graph: &mut GridGraph,
        algorithm: Algorithm,
        sink: &mut S,
        announced: &mut AnimationState,
    ) -> RunOutcome {
        let mut search = Search::new(algorithm);
        let mut path_applied = false;
        loop {
            let progress = match search.next(graph) {
                Ok(p) => p,
                Err(err) => return RunOutcome::Error(err.to_string()),
            };
            match progress {
                Progress::Step(step) => {
                    log::trace!("{algorithm}: applying {:?}", step);
                    if let Err(err) = sink.apply_step(&step, graph) {
                        return RunOutcome::Error(err.to_string());
                    }
                    path_applied |= step.is_path();
                    if self.suspend(sink, announced) == Flow::Stop {
                        return RunOutcome::Stopped;
                    }
                }
                Progress::Done(result) => {
                    debug_assert!(!result.found || path_applied);
                    return RunOutcome::from(&result);
                }
            }
        }
    }

    /// Wait at the boundary after a step, as the requested state dictates.
    fn suspend<S: StepSink + ?Sized>(
        &self,
        sink: &mut S,
        announced: &mut AnimationState,
    ) -> Flow {
        let wake = &self.handle.shared.wake;
        let mut s = self.handle.lock();
        if s.state == AnimationState::Stepping {
            s.state = AnimationState::Paused;
        }
        loop {
            let state = s.state;
            if state != *announced {
                // the sink may issue commands, so call it unlocked
                drop(s);
                announce(sink, announced, state);
                s = self.handle.lock();
                continue;
            }
            match state {
                AnimationState::Idle => return Flow::Stop,
                AnimationState::Running => {
                    let delay = self.config.delays.delay(s.speed);
                    if delay.is_zero() {
                        return Flow::Continue;
                    }
                    let (guard, res) = wake
                        .wait_timeout_while(s, delay, |s| s.state == AnimationState::Running)
                        .unwrap_or_else(PoisonError::into_inner);
                    if res.timed_out() {
                        return Flow::Continue;
                    }
                    s = guard;
                }
                AnimationState::Paused | AnimationState::Stepping => {
                    if s.permits > 0 {
                        s.permits -= 1;
                        s.state = AnimationState::Stepping;
                        drop(s);
                        announce(sink, announced, AnimationState::Stepping);
                        return Flow::Continue;
                    }
                    s = wake
                        .wait_while(s, |s| {
                            matches!(
                                s.state,
                                AnimationState::Paused | AnimationState::Stepping
                            ) && s.permits == 0
                        })
                        .unwrap_or_else(PoisonError::into_inner);
                }
            }
        }
    }
}

fn announce<S: StepSink + ?Sized>(sink: &mut S, announced: &mut AnimationState, state: AnimationState) {
    if *announced == state {
        return;
    }
    log::debug!("animation state {announced} -> {state}");
    *announced = state;
    sink.state_changed(state);
}
