//! Terminal runner (default binary).
//!
//! Owns the game state and drives it from a fixed-rate frame loop: render,
//! poll input until the next frame is due, then advance gravity.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use log::info;

use blockfall::config::{apply_overrides, load_config};
use blockfall::core::{GameConfig, GameSnapshot, GameState, ScoringRule};
use blockfall::input::{should_quit, InputHandler};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::GameAction;

/// Falling-block puzzle game for the terminal.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// RNG seed for the piece sequence (random when omitted)
    #[arg(long)]
    seed: Option<u32>,

    /// Line clear scoring: "doubling" or "flat"
    #[arg(long, value_parser = parse_scoring)]
    scoring: Option<ScoringRule>,

    /// Write logs to this file (the terminal is busy drawing the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn parse_scoring(s: &str) -> Result<ScoringRule, String> {
    ScoringRule::from_str(s).ok_or_else(|| format!("unknown scoring rule '{s}' (expected doubling or flat)"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let mut config = load_config(cli.config.as_deref())?;
    apply_overrides(&mut config, cli.seed, cli.scoring);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn run(term: &mut TerminalRenderer, config: &GameConfig) -> Result<()> {
    let seed = config.seed.unwrap_or_else(clock_seed);
    info!(
        "starting {}x{} game, seed {}, {} scoring",
        config.board_width,
        config.board_height,
        seed,
        config.scoring.as_str()
    );
    if !term.reports_key_release() {
        info!("terminal does not report key releases, soft drop ends on timeout");
    }

    let mut game_state = GameState::with_config(config, seed);
    game_state.start();

    let view = GameView::default();
    let mut input = InputHandler::new();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let frame_ms = config.frame_ms;
    let frame = Duration::from_millis(frame_ms as u64);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        game_state.snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next frame.
        let timeout = frame.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        if should_quit(key) {
                            info!(
                                "quit ({}), score {}",
                                game_state.status().as_str(),
                                game_state.score()
                            );
                            return Ok(());
                        }
                        for action in input.handle_key_press(key) {
                            let applied = game_state.apply_action(action);
                            if applied && action == GameAction::Restart {
                                input.reset();
                            }
                        }
                    }
                    KeyEventKind::Release => {
                        if let Some(action) = input.handle_key_release(key.code) {
                            game_state.apply_action(action);
                        }
                    }
                },
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Frame.
        if last_tick.elapsed() >= frame {
            last_tick = Instant::now();

            if let Some(action) = input.update(frame_ms) {
                game_state.apply_action(action);
            }
            game_state.tick(frame_ms);

            if let Some(event) = game_state.take_last_event() {
                if event.lines_cleared > 0 {
                    info!(
                        "{} lines for {} points, total {}",
                        event.lines_cleared,
                        event.line_clear_score,
                        game_state.score()
                    );
                }
            }
        }
    }
}
