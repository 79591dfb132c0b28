//! Terminal search visualizer.
//!
//! Run: cargo run --bin visualize -- [algorithm] [speed] [map-file]

use std::env;
use std::error::Error;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, terminal,
};

use pathviz_anim::{AnimationConfig, AnimationController, ControllerHandle, RunOutcome};
use pathviz_demos::{Options, TerminalSink, USAGE};

/// Raw mode and the alternate screen, restored on drop.
struct Screen;

impl Screen {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;
        Ok(Self)
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Forward key presses to the controller until `done` is set.
fn read_keys(handle: ControllerHandle, done: &AtomicBool) -> io::Result<()> {
    while !done.load(Ordering::Relaxed) {
        if !event::poll(Duration::from_millis(50))? {
            continue;
        }
        let Event::Key(KeyEvent {
            code,
            kind: KeyEventKind::Press,
            ..
        }) = event::read()?
        else {
            continue;
        };
        match code {
            KeyCode::Char(' ') | KeyCode::Char('p') => {
                handle.toggle_pause();
            }
            KeyCode::Char('n') | KeyCode::Right => {
                handle.step();
            }
            KeyCode::Char('+') => handle.set_speed(handle.speed().faster()),
            KeyCode::Char('-') => handle.set_speed(handle.speed().slower()),
            KeyCode::Char('q') | KeyCode::Esc => {
                handle.stop();
            }
            _ => {}
        }
    }
    Ok(())
}

fn wait_for_key() -> io::Result<()> {
    loop {
        if let Event::Key(KeyEvent {
            kind: KeyEventKind::Press,
            ..
        }) = event::read()?
        {
            return Ok(());
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let opts = match Options::parse(env::args().skip(1)) {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("Error: {e}\n{USAGE}");
            std::process::exit(2);
        }
    };
    let mut grid = opts.load_grid()?;

    let (cols, rows) = terminal::size()?;
    if grid.width() > i32::from(cols) || grid.height() + 2 > i32::from(rows) {
        return Err(format!(
            "terminal is {cols}x{rows}, the grid needs {}x{}",
            grid.width(),
            grid.height() + 2
        )
        .into());
    }

    let mut ctl = AnimationController::new(AnimationConfig {
        speed: opts.speed,
        ..AnimationConfig::default()
    });
    let handle = ctl.handle();
    let done = AtomicBool::new(false);

    let screen = Screen::enter()?;
    let mut sink = TerminalSink::new(io::stdout(), opts.algorithm, &grid);
    sink.draw_grid(&grid)?;

    handle.request_run();
    let outcome = thread::scope(|s| -> Result<RunOutcome, Box<dyn Error>> {
        let keys = s.spawn(|| read_keys(handle, &done));
        let outcome = ctl.run(&mut grid, opts.algorithm, &mut sink);
        done.store(true, Ordering::Relaxed);
        match keys.join() {
            Ok(res) => res?,
            Err(_) => return Err("key reader panicked".into()),
        }
        Ok(outcome)
    })?;

    if outcome != RunOutcome::Stopped {
        wait_for_key()?;
    }
    drop(screen);
    println!("{}: {outcome}", opts.algorithm);
    Ok(())
}
