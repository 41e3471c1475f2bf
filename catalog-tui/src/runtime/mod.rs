//! Event loop for the catalog screen.
//!
//! All screen state lives on this task. Terminal events, the fetch outcome
//! and spinner ticks are multiplexed with `tokio::select!`.

mod terminal;

pub use terminal::Terminal;

use std::time::Duration;

use catalog_lib::CatalogClient;
use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use log::{debug, info, trace, warn};
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::error::AppError;
use crate::fetch::FetchHandle;
use crate::input::action_for_event;
use crate::screen::{CatalogScreen, Control, FetchResult};
use crate::view::{self, HitMap};

/// Spinner frame duration.
const SPINNER_FRAME: Duration = Duration::from_millis(60);

/// Connection timeout used when a request timeout is configured.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Builds the catalog client from the config.
pub fn catalog_client(config: &Config) -> Result<CatalogClient, catalog_lib::ApiError> {
    let mut builder = CatalogClient::builder().url(config.url.as_str());
    if let Some(timeout) = config.request_timeout() {
        builder = builder.timeout(timeout).connect_timeout(CONNECT_TIMEOUT.min(timeout));
    }
    builder.build()
}

/// Shows the catalog screen until the user quits.
pub async fn run(config: &Config) -> Result<(), AppError> {
    let shutdown = CancellationToken::new();
    let mut screen = CatalogScreen::new();

    let mut fetch = match catalog_client(config) {
        Ok(client) => {
            info!("Fetching products from {}", client.base_url());
            Some(FetchHandle::spawn_catalog(client, &shutdown))
        }
        Err(e) => {
            screen.apply_fetch(Err(e.into()));
            None
        }
    };

    let mut terminal = Terminal::new()?;
    let result = event_loop(&mut terminal, &mut screen, &mut fetch).await;

    // Teardown: anything the fetch still delivers is dropped.
    shutdown.cancel();
    if let Some(handle) = &fetch {
        debug!("Fetch task finished at teardown: {}", handle.is_finished());
    }
    drop(fetch);
    drop(terminal);

    info!("Selected on exit: {:?}", screen.selection().selected());
    result
}

async fn event_loop(
    terminal: &mut Terminal,
    screen: &mut CatalogScreen,
    fetch: &mut Option<FetchHandle>,
) -> Result<(), AppError> {
    let mut events = EventStream::new();
    let mut spinner = tokio::time::interval(SPINNER_FRAME);
    spinner.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let mut hits = redraw(terminal, screen)?;

    loop {
        tokio::select! {
            maybe_event = events.next() => {
                let Some(event) = maybe_event else {
                    warn!("Terminal event stream closed");
                    return Ok(());
                };
                let event = event?;
                trace!("Terminal event: {:?}", event);

                if let Event::Resize(_, height) = event {
                    screen.set_viewport_rows(view::rows_per_page(height));
                }
                if let Some(action) = action_for_event(&event, &hits, screen) {
                    debug!("Action: {:?}", action);
                    if screen.dispatch(action) == Control::Quit {
                        info!("Quit requested");
                        return Ok(());
                    }
                }
            }
            outcome = recv_fetch(fetch), if screen.is_loading() => match (fetch.as_ref(), outcome) {
                (Some(handle), Some(result)) => {
                    handle.deliver(screen, result);
                }
                _ => screen.abandon_fetch(),
            },
            _ = spinner.tick(), if screen.is_loading() => {
                screen.advance_tick();
            }
        }

        hits = redraw(terminal, screen)?;
    }
}

/// Waits for the fetch outcome, or forever if there is no fetch.
async fn recv_fetch(fetch: &mut Option<FetchHandle>) -> Option<FetchResult> {
    match fetch {
        Some(handle) => handle.recv().await,
        None => std::future::pending().await,
    }
}

fn redraw(terminal: &mut Terminal, screen: &mut CatalogScreen) -> Result<HitMap, AppError> {
    terminal.refresh_size()?;
    Ok(terminal.draw(|buf| view::draw(screen, buf))?)
}
