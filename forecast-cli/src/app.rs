//! Event loop for the interactive screen.

use std::{sync::Arc, time::Duration};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use forecast_core::{FetchError, ViewState, WeatherFetcher, WeatherReport};
use ratatui::Terminal;
use tokio::{
    sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel},
    task::JoinHandle,
};
use tracing::debug;

use crate::ui;

const POLL_INTERVAL: Duration = Duration::from_millis(80);

type FetchResult = Result<WeatherReport, FetchError>;

/// What a key press asks the loop to do.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    Fetch(String),
    Quit,
}

/// Must be called from inside the tokio runtime; fetches run on spawned tasks.
pub fn run<F>(fetcher: F, view: ViewState) -> Result<()>
where
    F: WeatherFetcher + 'static,
{
    // Also installs a panic hook that puts the terminal back.
    let mut terminal = ratatui::try_init().inspect_err(|_| ratatui::restore())?;

    let result = run_app(&mut terminal, Arc::new(fetcher), view);

    ratatui::restore();
    result
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    fetcher: Arc<dyn WeatherFetcher>,
    mut view: ViewState,
) -> Result<()> {
    let (tx, mut rx) = unbounded_channel();
    let mut tick: usize = 0;

    if let Some(query) = view.mount() {
        spawn_fetch(&fetcher, query, tx.clone());
    }

    loop {
        drain(&mut view, &mut rx);

        terminal.draw(|frame| ui::render(frame, frame.area(), &view, tick))?;

        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    match handle_key(&mut view, key) {
                        KeyOutcome::Continue => {}
                        KeyOutcome::Fetch(query) => {
                            spawn_fetch(&fetcher, query, tx.clone());
                        }
                        KeyOutcome::Quit => break,
                    }
                }
                _ => {}
            }
        }

        tick = tick.wrapping_add(1);
    }

    Ok(())
}

/// Settle every fetch that has finished since the last frame.
fn drain(view: &mut ViewState, rx: &mut UnboundedReceiver<FetchResult>) {
    while let Ok(result) = rx.try_recv() {
        view.settle(result);
    }
}

fn spawn_fetch(
    fetcher: &Arc<dyn WeatherFetcher>,
    query: String,
    tx: UnboundedSender<FetchResult>,
) -> JoinHandle<()> {
    debug!(query = %query, "spawning fetch");
    let fetcher = Arc::clone(fetcher);
    tokio::spawn(async move {
        let result = fetcher.fetch(&query).await;
        if tx.send(result).is_err() {
            debug!(query = %query, "fetch finished after the screen closed");
        }
    })
}

/// Apply one key press to the view.
pub fn handle_key(view: &mut ViewState, key: KeyEvent) -> KeyOutcome {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => KeyOutcome::Quit,
            _ => KeyOutcome::Continue,
        };
    }

    match key.code {
        KeyCode::Enter => match view.submit_search() {
            Some(query) => KeyOutcome::Fetch(query),
            None => {
                debug!(search = %view.search(), loading = view.is_loading(), "search ignored");
                KeyOutcome::Continue
            }
        },
        KeyCode::Esc if view.search().is_empty() => KeyOutcome::Quit,
        KeyCode::Esc => {
            view.clear_search();
            KeyOutcome::Continue
        }
        KeyCode::Backspace => {
            view.pop_search_char();
            KeyOutcome::Continue
        }
        KeyCode::Char(c) => {
            view.push_search_char(c);
            KeyOutcome::Continue
        }
        _ => KeyOutcome::Continue,
    }
}
