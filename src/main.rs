//! Terminal maze puzzle runner (default binary).
//!
//! It uses crossterm for keyboard and mouse input and a custom
//! framebuffer-based renderer.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tui_maze::core::{catalog, rng, GameSnapshot, GameState};
use tui_maze::input::{handle_key_event, handle_mouse_event, should_quit, Pointer};
use tui_maze::term::{FrameBuffer, GameView, Hit, TerminalRenderer, Viewport, MAX_TILE_SIDE};
use tui_maze::types::{Click, MenuIntent, MouseButton, TICK_MS};

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Binary tile catalog to play with
    #[clap(long, default_value = "input/default.mze")]
    catalog: PathBuf,

    /// Fixed shuffle seed (defaults to the clock)
    #[clap(long)]
    seed: Option<u64>,

    /// Write logs here; filtered by RUST_LOG
    #[clap(long)]
    log_file: Option<PathBuf>,

    /// Terminal columns per tile
    #[clap(
        long,
        default_value_t = 8,
        value_parser = clap::value_parser!(u16).range(1..=i64::from(MAX_TILE_SIDE))
    )]
    tile_width: u16,

    /// Terminal rows per tile
    #[clap(
        long,
        default_value_t = 4,
        value_parser = clap::value_parser!(u16).range(1..=i64::from(MAX_TILE_SIDE))
    )]
    tile_height: u16,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        init_tracing(path)?;
    }

    // Load before touching the terminal so a bad catalog prints normally.
    let records = catalog::load(&args.catalog)
        .context("cannot start without a tile catalog")?;
    let seed = args.seed.unwrap_or_else(rng::time_seed);
    info!(path = %args.catalog.display(), tiles = records.len(), seed, "catalog loaded");

    let mut game = GameState::new(records, seed);
    let view = GameView::new(args.tile_width, args.tile_height);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut game, &view);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_tracing(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("installing log subscriber: {e}"))
}

fn run(term: &mut TerminalRenderer, game: &mut GameState, view: &GameView) -> Result<()> {
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = game.snapshot();
    let mut viewport = terminal_viewport();
    let mut drawn: Option<u32> = None;

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render only when something visible changed.
        if drawn != Some(game.revision()) {
            game.snapshot_into(&mut snap);
            view.render_into(&snap, viewport, &mut fb);
            term.draw_swap(&mut fb)?;
            drawn = Some(game.revision());
        }

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(intent) = handle_key_event(key) {
                        game.apply_intent(intent);
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some(pointer) = handle_mouse_event(mouse) {
                        if !dispatch_pointer(game, view, &snap, viewport, pointer) {
                            return Ok(());
                        }
                    }
                }
                Event::Resize(w, h) => {
                    viewport = Viewport::new(w, h);
                    term.invalidate();
                    drawn = None;
                }
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            game.tick(TICK_MS);
        }
    }
}

/// Route a pointer press to the menu or the controller; returns false on quit.
fn dispatch_pointer(
    game: &mut GameState,
    view: &GameView,
    snap: &GameSnapshot,
    viewport: Viewport,
    pointer: Pointer,
) -> bool {
    match view.hit_test(snap, viewport, pointer.column, pointer.row) {
        // Menu buttons only answer the primary button.
        Some(Hit::Menu(MenuIntent::Quit)) if pointer.button == MouseButton::Primary => false,
        Some(Hit::Menu(intent)) if pointer.button == MouseButton::Primary => {
            game.apply_intent(intent);
            true
        }
        Some(Hit::Click(target)) => {
            game.click(Click {
                target,
                button: pointer.button,
            });
            true
        }
        _ => true,
    }
}

fn terminal_viewport() -> Viewport {
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    Viewport::new(w, h)
}
