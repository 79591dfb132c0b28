//! Text maps: build a [`GridGraph`] from ASCII art and render it back.
//!
//! | Char | Meaning |
//! |---|---|
//! | `S` | start |
//! | `E` | end |
//! | `#` | wall |
//! | `.` | open cell |
//! | `o` | visited (output only, parsed as open) |
//! | `*` | path (output only, parsed as open) |
//!
//! Lines are separated by `'\n'` and must all have the same width. Leading
//! and trailing whitespace of the whole string is trimmed, as are spaces
//! inside a line, so maps may be written with `S . . #` spacing.

use std::fmt;

use crate::geom::Point;
use crate::graph::GridGraph;

pub const START: char = 'S';
pub const END: char = 'E';
pub const WALL: char = '#';
pub const OPEN: char = '.';
pub const VISITED: char = 'o';
pub const PATH: char = '*';

/// Errors that can occur when parsing a text map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    /// Line `line` has `found` cells where `expected` were required.
    InconsistentWidth {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// A character outside the map alphabet.
    InvalidChar { ch: char, pos: Point },
    MissingStart,
    MissingEnd,
    DuplicateStart(Point),
    DuplicateEnd(Point),
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InconsistentWidth {
                line,
                expected,
                found,
            } => write!(
                f,
                "map: line {line} has {found} cells, expected {expected}"
            ),
            Self::InvalidChar { ch, pos } => {
                write!(f, "map contains invalid char \u{201c}{ch}\u{201d} at {pos}")
            }
            Self::MissingStart => f.write_str("map has no start cell 'S'"),
            Self::MissingEnd => f.write_str("map has no end cell 'E'"),
            Self::DuplicateStart(p) => write!(f, "map has a second start cell at {p}"),
            Self::DuplicateEnd(p) => write!(f, "map has a second end cell at {p}"),
        }
    }
}

impl std::error::Error for MapError {}

/// Parse a text map into a grid.
pub fn parse(s: &str) -> Result<GridGraph, MapError> {
    let rows: Vec<Vec<char>> = s
        .trim()
        .lines()
        .map(|l| l.chars().filter(|c| !c.is_whitespace()).collect())
        .collect();

    let width = rows.first().map_or(0, Vec::len);
    for (line, row) in rows.iter().enumerate() {
        if row.len() != width {
            return Err(MapError::InconsistentWidth {
                line,
                expected: width,
                found: row.len(),
            });
        }
    }

    let mut start = None;
    let mut end = None;
    let mut walls = Vec::new();
    for (y, row) in rows.iter().enumerate() {
        for (x, &ch) in row.iter().enumerate() {
            let pos = Point::new(x as i32, y as i32);
            match ch {
                START if start.is_some() => return Err(MapError::DuplicateStart(pos)),
                START => start = Some(pos),
                END if end.is_some() => return Err(MapError::DuplicateEnd(pos)),
                END => end = Some(pos),
                WALL => walls.push(pos),
                OPEN | VISITED | PATH => {}
                _ => return Err(MapError::InvalidChar { ch, pos }),
            }
        }
    }
    let start = start.ok_or(MapError::MissingStart)?;
    let end = end.ok_or(MapError::MissingEnd)?;

    let mut g = GridGraph::open(width as i32, rows.len() as i32);
    g.set_start(start);
    g.set_end(end);
    for p in walls {
        g.set_walkable(p, false);
    }
    Ok(g)
}

/// Render a grid as a text map, one line per row.
///
/// Path cells win over visited ones; start and end always show as `S`/`E`.
pub fn render(g: &GridGraph) -> String {
    let mut out = String::with_capacity(g.len() + g.height().max(0) as usize);
    for (i, node) in g.nodes().iter().enumerate() {
        if i > 0 && node.pos().x == 0 {
            out.push('\n');
        }
        let ch = if node.is_start() {
            START
        } else if node.is_end() {
            END
        } else if !node.walkable() {
            WALL
        } else if node.is_path {
            PATH
        } else if node.is_visited {
            VISITED
        } else {
            OPEN
        };
        out.push(ch);
    }
    out
}

impl std::str::FromStr for GridGraph {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

impl fmt::Display for GridGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(self))
    }
}
