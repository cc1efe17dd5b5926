use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use prayer_player::audio::SimulatedAudio;
use prayer_player::config::Config;
use prayer_player::controller::PlayerController;
use prayer_player::logging;
use prayer_player::model::PlaybackStateStore;
use prayer_player::selection::Selection;
use prayer_player::source::JsonContentSource;
use prayer_player::view::AppView;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;

    // Keep the guard alive so buffered records are flushed on exit.
    let _log_guard = match logging::init_logging(&config.log_dir) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: Failed to initialize logging: {}", e);
            None
        }
    };

    tracing::info!("=== Prayer Player Starting ===");

    // `type=quran chapter=36 reciter=alafasy`; no arguments opens the idle screen.
    let args: Vec<String> = std::env::args().skip(1).collect();
    let selection = if args.is_empty() {
        None
    } else {
        Some(Selection::from_args(&args)?)
    };

    let source = Arc::new(JsonContentSource::new(config.content_dir.clone()));
    let tick_interval = Duration::from_millis(config.tick_interval_ms);
    let mut controller = PlayerController::new(
        PlaybackStateStore::new(),
        source,
        Box::new(SimulatedAudio::new()),
        config,
    );

    if let Some(selection) = selection {
        // A failure is shown as a notice with a retry hint.
        let _ = controller.start_session(selection).await;
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut controller, tick_interval).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("Prayer Player shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    controller: &mut PlayerController,
    tick_interval: Duration,
) -> io::Result<()> {
    let mut last_tick = Instant::now();
    let mut playback_rx = controller.store().subscribe();
    let mut playback = playback_rx.borrow_and_update().clone();
    let mut needs_redraw = true;

    loop {
        // A closed channel still leaves the last value readable.
        if playback_rx.has_changed().unwrap_or(false) {
            playback = playback_rx.borrow_and_update().clone();
            needs_redraw = true;
        }

        if needs_redraw {
            let view = controller.view_state();
            terminal.draw(|f| {
                AppView::render(f, &playback, &view);
            })?;
            needs_redraw = false;
        }

        if event::poll(Duration::from_millis(50))?
            && let Event::Key(key) = event::read()?
        {
            controller.handle_key_event(key).await;
            needs_redraw = true;
        }

        let elapsed = last_tick.elapsed();
        if elapsed >= tick_interval {
            last_tick = Instant::now();
            controller.tick(elapsed).await;
            // The idle clock and countdown move without the store changing.
            needs_redraw = true;
        }

        if controller.should_quit() {
            break;
        }
    }

    Ok(())
}
