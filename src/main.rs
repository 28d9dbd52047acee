//! Terminal falling-block game (default binary).
//!
//! crossterm for input, the framebuffer renderer for output. Logs go to
//! stderr; redirect them when running in a terminal, e.g.
//! `RUST_LOG=debug blockfall 2>blockfall.log`.

use std::time::{Duration, Instant};

use anyhow::Result;
use log::info;

use blockfall::config::AppConfig;
use blockfall::core::{Driver, GameSnapshot, HighScoreStore};
use blockfall::input::ActionQueue;
use blockfall::store::FileHighScoreStore;
use blockfall::term::{FrameBuffer, GameView, TerminalBell, TerminalRenderer, Viewport};
use blockfall::types::TICK_MS;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = AppConfig::from_env();
    info!(
        "seed {}, high score file {}, muted {}",
        config.seed,
        config.highscore_path.display(),
        config.muted
    );

    let store = FileHighScoreStore::new(&config.highscore_path);
    let bell = TerminalBell::stdout(config.muted);
    let mut driver = Driver::new(config.seed, bell, store);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut driver);

    // Always try to restore terminal state.
    let _ = term.exit();
    let session = driver.session();
    info!(
        "exit: score {}, level {}, lines {}, best {}",
        session.score(),
        session.level(),
        session.lines(),
        session.high_score()
    );
    result
}

fn run<A, S>(term: &mut TerminalRenderer, driver: &mut Driver<A, S>) -> Result<()>
where
    A: blockfall::core::AudioSink,
    S: HighScoreStore,
{
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();
    let mut input = ActionQueue::new();

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        driver.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb, snap.phase)?;

        // Input until the next tick is due.
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        input.poll(timeout)?;
        if input.quit_requested() {
            return Ok(());
        }
        if input.take_resized() {
            term.invalidate();
        }

        // Tick with the real time since the previous one.
        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            let elapsed_ms = u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX);
            driver.step(input.actions(), elapsed_ms);
            input.clear();
        }
    }
}
