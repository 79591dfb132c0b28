use std::fmt;

use pathviz_search::PathfindingResult;

/// Where the controller is in its run cycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AnimationState {
    /// No run in progress. Initial and terminal state.
    #[default]
    Idle,
    /// Steps are applied one after another, separated by the speed delay.
    Running,
    /// Waiting for `resume`, `step` or `stop`.
    Paused,
    /// One step was granted; reverts to `Paused` once it is applied.
    Stepping,
}

impl AnimationState {
    /// Whether a run is in progress.
    #[inline]
    pub fn is_active(self) -> bool {
        self != Self::Idle
    }
}

impl fmt::Display for AnimationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Stepping => "stepping",
        })
    }
}

/// How a run ended. `Display` gives the status line shown to the user.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RunOutcome {
    Stopped,
    Found {
        path_length: usize,
        nodes_visited: usize,
    },
    NotFound {
        nodes_visited: usize,
    },
    /// The search or the step sink failed; carries the error message.
    Error(String),
}

impl RunOutcome {
    #[inline]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }
}

impl From<&PathfindingResult> for RunOutcome {
    fn from(r: &PathfindingResult) -> Self {
        if r.found {
            Self::Found {
                path_length: r.path_length(),
                nodes_visited: r.nodes_visited,
            }
        } else {
            Self::NotFound {
                nodes_visited: r.nodes_visited,
            }
        }
    }
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stopped => f.write_str("Stopped"),
            Self::Found {
                path_length,
                nodes_visited,
            } => write!(
                f,
                "Path found! Length: {path_length}, Nodes visited: {nodes_visited}"
            ),
            Self::NotFound { nodes_visited } => {
                write!(f, "No path found. Nodes visited: {nodes_visited}")
            }
            Self::Error(_) => f.write_str("Error"),
        }
    }
}
