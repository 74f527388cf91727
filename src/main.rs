//! EcoQuest terminal arcade (default binary).
//!
//! Crossterm drives input; every screen is drawn into a framebuffer and
//! flushed as a diff. Game timers advance from the frame loop.

use std::fs::File;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};

use eco_quest::engine::{App, ArcadeConfig};
use eco_quest::input::handle_key_event;
use eco_quest::profile::{JsonFileStore, ProfileService};
use eco_quest::term::{AppView, FrameBuffer, TerminalRenderer, Viewport};

fn main() -> Result<()> {
    let config = ArcadeConfig::from_env();
    init_logging(&config)?;
    log::info!(
        "starting: profile={} seed={} tick={}ms",
        config.profile_path.display(),
        config.seed,
        config.tick_ms
    );

    let service = ProfileService::load(JsonFileStore::new(&config.profile_path));
    let mut app = App::new(service, config.seed);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut app, config.tick_ms);

    // Always try to restore terminal state.
    let _ = term.exit();
    log::info!("exiting");
    result
}

/// Log to a file only; the terminal belongs to the game.
fn init_logging(config: &ArcadeConfig) -> Result<()> {
    let Some(path) = &config.log_path else {
        return Ok(());
    };
    let file = File::create(path).with_context(|| format!("open log file {path}"))?;
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn run(term: &mut TerminalRenderer, app: &mut App<JsonFileStore>, tick_ms: u32) -> Result<()> {
    let view = AppView::new();
    let mut fb = FrameBuffer::new(0, 0);

    let tick_duration = Duration::from_millis(tick_ms as u64);
    let mut last_tick = Instant::now();

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(app, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if let Some(cmd) = handle_key_event(key, app.input_mode()) {
                        app.handle(cmd);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }
        if app.should_quit() {
            return Ok(());
        }

        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            app.update(elapsed.as_millis().min(u32::MAX as u128) as u32);
        }
    }
}
