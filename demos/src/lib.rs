//! Terminal front end used by the `visualize` binary.
//!
//! Demonstrates: loading text maps, running any of the five searches under
//! the animation controller, and drawing each step with crossterm as it
//! arrives.

use std::error::Error;
use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use crossterm::{
    cursor, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use pathviz_anim::{AnimationState, ParseSpeedError, RunOutcome, SinkError, Speed, StepSink};
use pathviz_core::{GridGraph, Node, map};
use pathviz_search::{Algorithm, AnimationStep, ParseAlgorithmError};

pub const USAGE: &str = "usage: visualize [algorithm] [speed] [map-file]";

const HELP_TEXT: &str = "space: pause/resume  n: step  +/-: speed  q: stop";

/// Pause between path cells while the path is revealed.
const PATH_DELAY: Duration = Duration::from_millis(15);

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Positional command-line options: `[algorithm] [speed] [map-file]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    pub algorithm: Algorithm,
    pub speed: Speed,
    /// Text map to load instead of the default grid.
    pub map: Option<PathBuf>,
}

#[derive(Debug)]
pub enum OptionsError {
    Algorithm(ParseAlgorithmError),
    Speed(ParseSpeedError),
    Unexpected(String),
}

impl fmt::Display for OptionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Algorithm(e) => fmt::Display::fmt(e, f),
            Self::Speed(e) => fmt::Display::fmt(e, f),
            Self::Unexpected(arg) => write!(f, "unexpected argument: {arg}"),
        }
    }
}

impl Error for OptionsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Algorithm(e) => Some(e),
            Self::Speed(e) => Some(e),
            Self::Unexpected(_) => None,
        }
    }
}

impl Options {
    /// Parse arguments, program name excluded. Missing ones keep defaults.
    pub fn parse<I, S>(args: I) -> Result<Self, OptionsError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut opts = Self::default();
        let mut args = args.into_iter();
        if let Some(a) = args.next() {
            opts.algorithm = a.as_ref().parse().map_err(OptionsError::Algorithm)?;
        }
        if let Some(s) = args.next() {
            opts.speed = s.as_ref().parse().map_err(OptionsError::Speed)?;
        }
        if let Some(m) = args.next() {
            opts.map = Some(PathBuf::from(m.as_ref()));
        }
        if let Some(extra) = args.next() {
            return Err(OptionsError::Unexpected(extra.as_ref().to_string()));
        }
        Ok(opts)
    }

    /// The grid to search: the map file if one was given, the default
    /// layout otherwise.
    pub fn load_grid(&self) -> Result<GridGraph, Box<dyn Error>> {
        match &self.map {
            Some(path) => Ok(std::fs::read_to_string(path)?.parse()?),
            None => Ok(GridGraph::default()),
        }
    }
}

// ---------------------------------------------------------------------------
// Drawing
// ---------------------------------------------------------------------------

/// Glyph and colour for a cell, same glyphs as text maps.
pub fn cell_glyph(node: &Node) -> (char, Color) {
    if node.is_start() {
        (map::START, Color::Green)
    } else if node.is_end() {
        (map::END, Color::Red)
    } else if !node.walkable() {
        (map::WALL, Color::DarkGrey)
    } else if node.is_path {
        (map::PATH, Color::Yellow)
    } else if node.is_visited {
        (map::VISITED, Color::Cyan)
    } else {
        (map::OPEN, Color::Grey)
    }
}

/// A [`StepSink`] drawing into a terminal. The grid sits at the top-left
/// corner, with a status line and a key help line below it.
pub struct TerminalSink<W: Write> {
    out: W,
    algorithm: Algorithm,
    status_row: u16,
    path_delay: Duration,
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W, algorithm: Algorithm, graph: &GridGraph) -> Self {
        Self {
            out,
            algorithm,
            status_row: u16::try_from(graph.height()).unwrap_or(u16::MAX - 2) + 1,
            path_delay: PATH_DELAY,
        }
    }

    /// Set the pause between path cells. Zero draws the path at once.
    pub fn with_path_delay(mut self, delay: Duration) -> Self {
        self.path_delay = delay;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Clear the screen and draw every cell.
    pub fn draw_grid(&mut self, graph: &GridGraph) -> io::Result<()> {
        queue!(self.out, terminal::Clear(ClearType::All))?;
        for node in graph.nodes() {
            self.draw_node(node)?;
        }
        self.out.flush()
    }

    /// Replace the status line.
    pub fn status(&mut self, text: &str) -> io::Result<()> {
        queue!(
            self.out,
            cursor::MoveTo(0, self.status_row),
            terminal::Clear(ClearType::CurrentLine),
            Print(text),
            cursor::MoveTo(0, self.status_row.saturating_add(1)),
            terminal::Clear(ClearType::CurrentLine),
            Print(HELP_TEXT)
        )?;
        self.out.flush()
    }

    fn draw_node(&mut self, node: &Node) -> io::Result<()> {
        let (ch, fg) = cell_glyph(node);
        let p = node.pos();
        queue!(
            self.out,
            cursor::MoveTo(p.x as u16, p.y as u16),
            SetForegroundColor(fg),
            Print(ch),
            ResetColor
        )
    }
}

impl<W: Write> StepSink for TerminalSink<W> {
    fn apply_step(&mut self, step: &AnimationStep, graph: &GridGraph) -> Result<(), SinkError> {
        match step {
            AnimationStep::Visit(ids) => {
                for node in ids.iter().filter_map(|&id| graph.node(id)) {
                    self.draw_node(node)?;
                }
            }
            AnimationStep::Path(ids) => {
                for node in ids.iter().filter_map(|&id| graph.node(id)) {
                    self.draw_node(node)?;
                    if !self.path_delay.is_zero() {
                        self.out.flush()?;
                        thread::sleep(self.path_delay);
                    }
                }
            }
        }
        self.out.flush()?;
        Ok(())
    }

    fn state_changed(&mut self, state: AnimationState) {
        let line = format!("{}: {state}", self.algorithm);
        if let Err(err) = self.status(&line) {
            log::warn!("status line: {err}");
        }
    }

    fn finished(&mut self, outcome: &RunOutcome) {
        let mut line = format!("{}: {outcome}", self.algorithm);
        if outcome.is_found() && self.algorithm.is_optimal() {
            line.push_str(" (shortest)");
        }
        if let Err(err) = self.status(&line) {
            log::warn!("status line: {err}");
        }
    }
}
