//! BLOCKFALL terminal front end

use blockfall::scene::{MenuScene, Scene, Transition};
use blockfall::settings::Settings;
use crossterm::{
    event::{
        self, Event, KeyEventKind, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    io::{self, stdout},
    time::{Duration, Instant},
};

/// Target frame rate
const TARGET_FPS: u64 = 60;
const FRAME_DURATION: Duration = Duration::from_micros(1_000_000 / TARGET_FPS);

/// Get the blockfall temp directory, creating it if needed
fn blockfall_temp_dir() -> std::path::PathBuf {
    let dir = std::env::temp_dir().join("blockfall");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

fn main() -> io::Result<()> {
    // Session ID names this run's log file
    let session_id: u32 = rand::random();

    let log_dir = blockfall_temp_dir();
    let log_file = format!("{:08x}.log", session_id);

    // The terminal belongs to the UI, so logs go to a file
    let file_appender = tracing_appender::rolling::never(&log_dir, &log_file);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    if let Ok(directive) = "blockfall=debug".parse::<tracing_subscriber::filter::Directive>() {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(filter)
        .with_ansi(false)
        .init();

    tracing::info!(
        "BLOCKFALL starting up, session={:08x}, log={}",
        session_id,
        log_dir.join(&log_file).display()
    );

    let settings = Settings::load();

    // Setup terminal
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;

    // Ask for release and repeat events where the terminal can report them
    let enhanced_keys = supports_keyboard_enhancement().unwrap_or(false);
    if enhanced_keys {
        execute!(
            stdout(),
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }
    tracing::debug!(enhanced_keys, "keyboard setup");

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, settings);

    // Restore terminal
    if enhanced_keys {
        execute!(stdout(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;

    if let Err(e) = &result {
        tracing::error!("Exited with error: {}", e);
    } else {
        println!("\nThanks for playing BLOCKFALL!");
    }
    tracing::info!("BLOCKFALL shutting down");

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    settings: Settings,
) -> io::Result<()> {
    let mut scene: Box<dyn Scene> = Box::new(MenuScene::new(settings));
    scene.on_enter(Instant::now());

    loop {
        terminal.draw(|frame| scene.on_render(frame))?;

        let mut transition = Transition::Stay;

        if event::poll(FRAME_DURATION)? {
            if let Event::Key(key) = event::read()? {
                // Auto-repeat events would defeat edge-triggered input
                if key.kind != KeyEventKind::Repeat {
                    transition = scene.on_input(key, Instant::now());
                }
            }
        }

        if matches!(transition, Transition::Stay) {
            transition = scene.on_tick(Instant::now());
        }

        match transition {
            Transition::Stay => {}
            Transition::Switch(next) => {
                scene = next;
                scene.on_enter(Instant::now());
            }
            Transition::Exit => return Ok(()),
        }
    }
}
