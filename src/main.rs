mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use space_shooter::assets::{load_glyphs, GlyphTheme, Silent, SoundPlayer, TerminalBell};
use space_shooter::compute::{init_state, restart_pressed, start_pressed, tick};
use space_shooter::config::{load_config, GameConfig, DEFAULT_CONFIG_PATH};
use space_shooter::entities::InputState;

/// A key is considered "held" if its last press/repeat event arrived within
/// this window.  Covers terminals that don't emit key-release events: the
/// OS key-repeat rate is ≥ 15 Hz, so ≈133 ms is always refreshed before
/// expiry.
const HOLD_WINDOW_SECS: f32 = 0.133;

/// Returns true if `key` was seen within the last `window` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64, window: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= window)
        .unwrap_or(false)
}

fn held_input(key_frame: &HashMap<KeyCode, u64>, frame: u64, window: u64) -> InputState {
    let any = |keys: &[KeyCode]| keys.iter().any(|k| is_held(key_frame, k, frame, window));
    InputState {
        left: any(&[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')]),
        right: any(&[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')]),
        up: any(&[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')]),
        down: any(&[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')]),
        fire: any(&[KeyCode::Char(' ')]),
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Input model: a `key_frame` map records the frame of the last press/repeat
/// event for every key.  Each frame the keys that are still "fresh" become
/// the held-direction/fire `InputState` fed to the simulation, so Space and
/// the arrows can be held at the same time.  Enter and R are one-shot
/// presses that drive the menu / restart transitions.
fn game_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: &GameConfig,
    glyphs: &GlyphTheme,
    sound: &mut dyn SoundPlayer,
) -> anyhow::Result<()> {
    let dt = config.frame_delta();
    let frame_time = Duration::from_secs_f32(dt);
    let hold_window = ((HOLD_WINDOW_SECS * config.frame_rate as f32).ceil() as u64).max(1);
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut world = init_state(config.rules);
    // Maps each held key → the frame it was last seen (press or repeat).
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) = ev
            else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(())
                        }
                        KeyCode::Enter => world = start_pressed(&world),
                        KeyCode::Char('r') | KeyCode::Char('R') => world = restart_pressed(&world),
                        _ => {}
                    }
                }
                // Repeat: refresh timestamp so key stays "held"
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                // Release: remove key immediately (keyboard-enhancement path)
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        let input = held_input(&key_frame, frame, hold_window);
        world = tick(&world, &input, dt, &mut rng);
        sound.play_all(&world.sounds);

        display::render(out, &world, glyphs, terminal::size()?)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// stdout is the game screen, so logs go to a file.
fn init_tracing(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("space_shooter=info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .with(filter)
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    // Bad configuration is reported before the terminal is taken over.
    let config = load_config(&config_path)?;
    init_tracing(&config.log_file)?;
    info!(config = %config_path.display(), seed = ?config.seed, "starting space shooter");

    let glyphs = load_glyphs(&config.glyphs);
    let mut sound: Box<dyn SoundPlayer> = if config.bell {
        Box::new(TerminalBell::new(stdout()))
    } else {
        Box::new(Silent)
    };

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = game_loop(&mut out, &rx, &config, &glyphs, sound.as_mut());

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        tracing::error!("fatal: {e:#}");
    }
    result
}
