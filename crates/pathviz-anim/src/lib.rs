//! Paced playback of search steps.
//!
//! An [`AnimationController`] pulls steps from a
//! [`Search`](pathviz_search::Search), hands each one to a [`StepSink`] and
//! then waits as the current [`AnimationState`] requires: a delay picked by
//! [`Speed`] while running, indefinitely while paused, or for a single grant
//! while stepping. Commands arrive through a cloneable [`ControllerHandle`].
//!
//! ```no_run
//! use pathviz_anim::{AnimationConfig, AnimationController, FnSink};
//! use pathviz_core::GridGraph;
//! use pathviz_search::{Algorithm, AnimationStep};
//!
//! let mut grid = GridGraph::default();
//! let mut ctl = AnimationController::new(AnimationConfig::default());
//! let mut sink = FnSink::new(|step: &AnimationStep, _: &GridGraph| {
//!     println!("{:?}", step);
//!     Ok(())
//! });
//! let outcome = ctl.run(&mut grid, Algorithm::Astar, &mut sink);
//! println!("{outcome}");
//! ```

mod config;
mod controller;
mod sink;
mod state;

pub use config::{AnimationConfig, DelayTable, ParseSpeedError, Speed};
pub use controller::{AnimationController, ControllerHandle};
pub use sink::{FnSink, SinkError, StepSink};
pub use state::{AnimationState, RunOutcome};
