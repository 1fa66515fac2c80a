// TUI event loop and terminal management
use crate::app::{Action, App};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use repostar_core::{session, Config, Debouncer, SearchOutcome, SearchProvider};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};

/// Everything the UI task reacts to
#[derive(Debug)]
pub enum AppEvent {
    Terminal(Event),
    /// Debounce window elapsed on a long-enough query
    Query(String),
    SearchDone(SearchOutcome),
}

pub async fn run_tui(
    mut app: App,
    provider: Arc<dyn SearchProvider>,
    config: &Config,
) -> anyhow::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if config.ui.mouse_enabled {
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    } else {
        execute!(stdout, EnterAlternateScreen)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (tx, rx) = mpsc::unbounded_channel();
    spawn_input_reader(tx.clone());

    let result = event_loop(&mut terminal, &mut app, provider, config, tx, rx).await;

    // Restore terminal even if the loop bailed
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    provider: Arc<dyn SearchProvider>,
    config: &Config,
    tx: UnboundedSender<AppEvent>,
    mut rx: UnboundedReceiver<AppEvent>,
) -> anyhow::Result<()> {
    // Lives exactly as long as the loop; dropping it cancels a pending search
    let mut debouncer = Debouncer::new(
        config.search.debounce(),
        config.search.min_query_length,
        tx.clone(),
        AppEvent::Query,
    );

    loop {
        terminal.draw(|f| crate::ui::render(f, app))?;

        let Some(event) = rx.recv().await else {
            break;
        };

        match event {
            AppEvent::Terminal(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                match app.handle_key(key) {
                    Action::QueryChanged(text) => debouncer.input(&text),
                    Action::Open(url) => {
                        if let Err(e) = open::that(&url) {
                            warn!("Failed to open browser for {}: {}", url, e);
                        }
                    }
                    Action::Quit | Action::None => {}
                }
            }
            AppEvent::Terminal(Event::Mouse(mouse)) => match mouse.kind {
                MouseEventKind::ScrollDown => app.next_item(),
                MouseEventKind::ScrollUp => app.previous_item(),
                _ => {}
            },
            AppEvent::Terminal(_) => {}
            AppEvent::Query(query) => {
                let ticket = app.begin_search(&query);
                let provider = Arc::clone(&provider);
                let tx = tx.clone();
                tokio::spawn(async move {
                    let outcome = session::execute(provider.as_ref(), ticket).await;
                    let _ = tx.send(AppEvent::SearchDone(outcome));
                });
            }
            AppEvent::SearchDone(outcome) => {
                let completion = app.complete_search(outcome);
                debug!("search completed: {:?}", completion);
            }
        }

        if app.should_quit {
            break;
        }
    }

    drop(debouncer);
    info!("leaving TUI with {} favorites", app.favorites.len());
    Ok(())
}

/// Read terminal events on a plain thread; crossterm's reader blocks
fn spawn_input_reader(tx: UnboundedSender<AppEvent>) {
    std::thread::spawn(move || loop {
        if tx.is_closed() {
            break;
        }
        match event::poll(Duration::from_millis(200)) {
            Ok(true) => match event::read() {
                Ok(ev) => {
                    if tx.send(AppEvent::Terminal(ev)).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!("terminal read failed: {}", e);
                    break;
                }
            },
            Ok(false) => {}
            Err(e) => {
                warn!("terminal poll failed: {}", e);
                break;
            }
        }
    });
}
