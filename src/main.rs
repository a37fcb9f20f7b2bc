//! Terminal packet game runner (default binary).
//!
//! Uses crossterm for input and a framebuffer-based renderer. The game mode
//! is selected by the first CLI argument ("standard" or "speed"); the best
//! score is kept per mode for the lifetime of the process and carried across
//! restarts.

use std::collections::HashMap;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{bail, Result};
use crossterm::event::{self, Event, KeyEventKind};

use packetris::core::GameRound;
use packetris::input::{is_restart, map_key, should_quit};
use packetris::term::{GameView, TerminalRenderer, Viewport};
use packetris::types::GameMode;

const TICK_MS: u64 = 16;

fn main() -> Result<()> {
    let mode = match std::env::args().nth(1) {
        Some(arg) => match GameMode::from_str(&arg) {
            Some(mode) => mode,
            None => bail!("unknown mode {:?} (expected \"standard\" or \"speed\")", arg),
        },
        None => GameMode::Standard,
    };

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, mode);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn time_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn run(term: &mut TerminalRenderer, mode: GameMode) -> Result<()> {
    let view = GameView::default();
    let mut best: HashMap<GameMode, u32> = HashMap::new();
    let mut round = GameRound::new(mode, time_seed(), 0)?;

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let fb = view.render(&round, Viewport::new(w, h));
        term.draw(&fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if should_quit(key) {
                        return Ok(());
                    }

                    if round.is_over() {
                        if is_restart(key) {
                            // Carry the session best for this mode into the
                            // next round.
                            if let Some(result) = round.result() {
                                let entry = best.entry(result.mode).or_default();
                                *entry = (*entry).max(result.score);
                            }
                            let stored = best.get(&mode).copied().unwrap_or(0);
                            round = GameRound::new(mode, time_seed(), stored)?;
                            last_tick = Instant::now();
                        }
                    } else if let Some(action) = map_key(key) {
                        round.apply_action(action);
                    }
                }
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            let dt = last_tick.elapsed().as_secs_f32();
            last_tick = Instant::now();
            round.advance(dt)?;
        }
    }
}
