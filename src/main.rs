//! Terminal runner (default binary).
//!
//! Loads the optional config, then drives the simulation at a fixed frame
//! cadence: render, poll input until the next frame, advance the driver.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};

use blockfall::config::AppConfig;
use blockfall::driver::LoopDriver;
use blockfall::input::{handle_key_event, should_quit};
use blockfall::term::{FrameBuffer, GameView, SessionView, TerminalRenderer, Viewport};
use blockfall::types::FRAME_MS;

/// Falling-block puzzle in the terminal.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON config file; missing fields keep their defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Piece stream seed (overrides the config file).
    #[arg(short, long)]
    seed: Option<u32>,

    /// Print the effective config as JSON and exit.
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    config.validate()?;

    if args.print_config {
        println!("{}", config.to_json()?);
        return Ok(());
    }

    let seed = config.seed.unwrap_or_else(rand::random);
    let mut driver = config.build_driver(seed)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;
    let release_events = term.release_events();

    let mut finished = Vec::new();
    let result = run(&mut term, &mut driver, &mut finished);

    // Always try to restore terminal state.
    let _ = term.exit();

    for (i, score) in finished.iter().enumerate() {
        eprintln!("[blockfall] game {} over, final score {}", i + 1, score);
    }
    eprintln!(
        "[blockfall] seed {} release_events={} score {}",
        seed,
        release_events,
        driver.engine().score()
    );
    result
}

fn run(term: &mut TerminalRenderer, driver: &mut LoopDriver, finished: &mut Vec<u32>) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);

    let frame_duration = Duration::from_millis(FRAME_MS as u64);
    let mut last_frame = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let session = SessionView {
            games_played: driver.games_played(),
            last_final_score: driver.last_final_score(),
        };
        view.render_into(driver.engine(), Some(&session), Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next frame.
        let timeout = frame_duration
            .checked_sub(last_frame.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Press && should_quit(key) {
                        return Ok(());
                    }
                    if let Some(command) = handle_key_event(key) {
                        match key.kind {
                            KeyEventKind::Press => {
                                let frame = driver.press(command);
                                finished.extend(frame.game_over);
                            }
                            KeyEventKind::Repeat => driver.repeat(command),
                            KeyEventKind::Release => driver.release(command),
                        }
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Advance.
        let elapsed = last_frame.elapsed();
        if elapsed >= frame_duration {
            last_frame = Instant::now();
            let elapsed_ms = u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX);
            let frame = driver.advance(elapsed_ms);
            finished.extend(frame.game_over);
        }
    }
}
