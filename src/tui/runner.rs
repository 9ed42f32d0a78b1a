//! Terminal setup and the async event loop.
//!
//! One loop owns `TuiApp`. Key events come from crossterm's `EventStream`;
//! fetch results come back over an mpsc channel from tasks spawned per
//! effect. Overlapping layout fetches race freely: the controller drops
//! stale responses by request id.

use std::io;
use std::sync::Arc;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::DefaultTerminal;
use tokio::sync::mpsc;
use tracing::{debug, info};

use super::app::{AppEvent, Effect, TuiApp};
use super::{input, layout};
use crate::controller::LayoutResponse;
use crate::source::{self, LayoutSource};

/// Take over the terminal, run until the user quits, then restore it.
pub async fn run(app: TuiApp, source: Arc<dyn LayoutSource>) -> io::Result<()> {
    let mut terminal = ratatui::init();
    info!("terminal UI started");
    let result = event_loop(&mut terminal, app, source).await;
    ratatui::restore();
    info!("terminal UI stopped");
    result
}

async fn event_loop(
    terminal: &mut DefaultTerminal,
    mut app: TuiApp,
    source: Arc<dyn LayoutSource>,
) -> io::Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<AppEvent>();
    let mut events = EventStream::new();

    loop {
        for effect in app.drain_effects() {
            spawn_effect(effect, &source, &tx);
        }

        terminal.draw(|f| layout::draw(f, &app))?;

        tokio::select! {
            maybe_event = events.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) => input::handle_key(&mut app, key),
                    Some(Ok(_)) => {} // resize: redrawn next iteration
                    Some(Err(e)) => return Err(e),
                    None => break,
                }
            }
            Some(event) = rx.recv() => app.apply_event(event),
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn spawn_effect(
    effect: Effect,
    source: &Arc<dyn LayoutSource>,
    tx: &mpsc::UnboundedSender<AppEvent>,
) {
    let source = Arc::clone(source);
    let tx = tx.clone();
    tokio::spawn(async move {
        let event = perform(effect, source.as_ref()).await;
        if tx.send(event).is_err() {
            debug!("event loop gone, dropping {effect:?} result");
        }
    });
}

/// Run one effect against `source`. Failures are already degraded by the
/// loaders, so every effect yields an event.
pub async fn perform(effect: Effect, source: &dyn LayoutSource) -> AppEvent {
    match effect {
        Effect::FetchInventory => AppEvent::Inventory(source::load_inventory(source).await),
        Effect::FetchServices { firmware_id } => AppEvent::Services {
            firmware_id,
            services: source::load_service_summaries(source, firmware_id).await,
        },
        Effect::FetchLayout(request) => AppEvent::Layout(LayoutResponse {
            request_id: request.request_id,
            layout: source::load_service_layout(source, request.service_id).await,
        }),
    }
}
