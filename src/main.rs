use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    terminal, ExecutableCommand,
};
use rand::thread_rng;

use eco_cleaner::assets::Assets;
use eco_cleaner::compute::{apply_action, count_down_alert, init_world, tick};
use eco_cleaner::config::{GameConfig, LoggingConfig, CONFIG_FILE};
use eco_cleaner::display;
use eco_cleaner::entities::World;
use eco_cleaner::error::{ConfigError, GameError};
use eco_cleaner::input::KeyTracker;

const TITLE: &str = "EcoCleaner: your mission is clean air!";

// ── Logging ───────────────────────────────────────────────────────────────────

/// `RUST_LOG` controls the filter (default `warn`).  While the game owns the
/// terminal, anything above `warn` belongs in a file: set `logging.file`.
fn init_logging(config: &LoggingConfig) -> Result<(), ConfigError> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(path) = &config.file {
        let file = File::create(path).map_err(|source| ConfigError::LogFile {
            path: path.clone(),
            source,
        })?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits, or presses a key on the game-over screen.
///
/// Input is drained without blocking at the start of every frame, the world
/// advances one tick, the frame is drawn, and the alert timer counts down.
fn game_loop<W: Write>(
    out: &mut W,
    world: &mut World,
    assets: &Assets,
    frame_time: Duration,
) -> std::io::Result<()> {
    let mut rng = thread_rng();
    let mut keys = KeyTracker::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        let mut actions = Vec::new();
        while event::poll(Duration::ZERO)? {
            let ev = event::read()?;
            actions.extend(keys.on_event(&ev, frame));
        }
        actions.extend(keys.expire(frame));

        for action in actions {
            match apply_action(world, action) {
                Some(next) => *world = next,
                None => return Ok(()),
            }
        }

        *world = tick(world, &mut rng);

        let (cols, rows) = terminal::size()?;
        display::render(out, world, assets, cols, rows)?;
        *world = count_down_alert(world);

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            std::thread::sleep(frame_time - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), GameError> {
    let config = GameConfig::load_or_default(CONFIG_FILE)?;
    init_logging(&config.logging)?;
    log::info!(
        "starting: {}x{} canvas at {} fps, {} clouds",
        config.screen.width,
        config.screen.height,
        config.screen.fps,
        config.rules.hazard_pool
    );

    // Asset warnings print before the alternate screen takes over.
    let assets = Assets::load(&config.assets.dir);
    let mut world = init_world(&config, assets.sprite_sizes(), &mut thread_rng());
    let frame_time = Duration::from_secs(1) / config.screen.fps;

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(terminal::SetTitle(TITLE))?;
    out.execute(cursor::Hide)?;

    // Request key-release events; terminals without support fall back to
    // the tracker's hold window.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    let result = game_loop(&mut out, &mut world, &assets, frame_time);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result?;
    log::info!(
        "session ended: score {}, lives {}, pollution {}",
        world.state.score,
        world.state.lives,
        world.state.pollution_level()
    );
    Ok(())
}
