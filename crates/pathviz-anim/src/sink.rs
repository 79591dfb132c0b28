use std::error::Error;

use pathviz_core::GridGraph;
use pathviz_search::AnimationStep;

use crate::state::{AnimationState, RunOutcome};

/// Boxed error returned by a [`StepSink`].
pub type SinkError = Box<dyn Error + Send + Sync>;

/// Receiver of everything a run produces (usually a renderer).
///
/// `apply_step` may block, e.g. to animate a path reveal; the controller
/// waits for it before doing anything else. Commands may be issued from
/// inside any of these callbacks through a
/// [`ControllerHandle`](crate::ControllerHandle).
pub trait StepSink {
    /// Show one step. `graph` already reflects it.
    fn apply_step(&mut self, step: &AnimationStep, graph: &GridGraph) -> Result<(), SinkError>;

    /// The controller entered `state`.
    fn state_changed(&mut self, _state: AnimationState) {}

    /// The run is over.
    fn finished(&mut self, _outcome: &RunOutcome) {}
}

/// A [`StepSink`] built from a closure that only handles steps.
pub struct FnSink<F>(pub F);

impl<F> FnSink<F>
where
    F: FnMut(&AnimationStep, &GridGraph) -> Result<(), SinkError>,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> StepSink for FnSink<F>
where
    F: FnMut(&AnimationStep, &GridGraph) -> Result<(), SinkError>,
{
    fn apply_step(&mut self, step: &AnimationStep, graph: &GridGraph) -> Result<(), SinkError> {
        (self.0)(step, graph)
    }
}

impl<S: StepSink + ?Sized> StepSink for &mut S {
    fn apply_step(&mut self, step: &AnimationStep, graph: &GridGraph) -> Result<(), SinkError> {
        (**self).apply_step(step, graph)
    }

    fn state_changed(&mut self, state: AnimationState) {
        (**self).state_changed(state)
    }

    fn finished(&mut self, outcome: &RunOutcome) {
        (**self).finished(outcome)
    }
}
