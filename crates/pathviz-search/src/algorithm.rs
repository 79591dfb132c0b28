use std::fmt;
use std::str::FromStr;

/// The search strategies a [`Search`](crate::Search) can run.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Algorithm {
    Bfs,
    Dfs,
    Dijkstra,
    Gbfs,
    #[default]
    Astar,
}

impl Algorithm {
    pub const ALL: [Algorithm; 5] = [
        Self::Bfs,
        Self::Dfs,
        Self::Dijkstra,
        Self::Gbfs,
        Self::Astar,
    ];

    /// Short lowercase key, as accepted by [`FromStr`].
    pub const fn key(self) -> &'static str {
        match self {
            Self::Bfs => "bfs",
            Self::Dfs => "dfs",
            Self::Dijkstra => "dijkstra",
            Self::Gbfs => "gbfs",
            Self::Astar => "astar",
        }
    }

    /// Whether the returned path is guaranteed shortest on a unit-cost grid.
    pub const fn is_optimal(self) -> bool {
        matches!(self, Self::Bfs | Self::Dijkstra | Self::Astar)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Bfs => "Breadth-First Search",
            Self::Dfs => "Depth-First Search",
            Self::Dijkstra => "Dijkstra",
            Self::Gbfs => "Greedy Best-First Search",
            Self::Astar => "A*",
        })
    }
}

/// Returned when a string names no known algorithm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseAlgorithmError(pub String);

impl fmt::Display for ParseAlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown algorithm \u{201c}{}\u{201d} (expected bfs, dfs, dijkstra, gbfs or astar)",
            self.0
        )
    }
}

impl std::error::Error for ParseAlgorithmError {}

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bfs" | "breadth-first" => Ok(Self::Bfs),
            "dfs" | "depth-first" => Ok(Self::Dfs),
            "dijkstra" => Ok(Self::Dijkstra),
            "gbfs" | "greedy" | "best-first" => Ok(Self::Gbfs),
            "astar" | "a*" | "a-star" => Ok(Self::Astar),
            _ => Err(ParseAlgorithmError(s.to_string())),
        }
    }
}
