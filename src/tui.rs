use crate::api::{spawn_api_worker, QuestionSource, TagSource};
use crate::app::App;
use crate::error::AppError;
use crate::models::ApiResponse;
use crate::session::handle_key;
use crate::ui;
use crossterm::event::Event;
use futures::{Stream, StreamExt};
use ratatui::{backend::Backend, Terminal};
use std::io;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::info;

/// Run the app until it quits, the event stream ends, or either the stream or
/// the terminal fails. The API worker is stopped on every exit path.
pub async fn run<B, E, S>(terminal: &mut Terminal<B>, events: E, source: Arc<S>) -> Result<(), AppError>
where
    B: Backend,
    E: Stream<Item = io::Result<Event>>,
    S: QuestionSource + TagSource + 'static,
{
    let (request_tx, request_rx) = mpsc::unbounded_channel();
    let (response_tx, mut response_rx) = mpsc::unbounded_channel();
    let worker = spawn_api_worker(source, request_rx, response_tx);

    let mut app = App::new(Some(request_tx));
    app.activate_selection();

    let result = drive(terminal, events, &mut app, &mut response_rx).await;
    worker.abort();
    info!(ok = result.is_ok(), "Event loop finished");
    result
}

async fn drive<B, E>(
    terminal: &mut Terminal<B>,
    events: E,
    app: &mut App,
    responses: &mut UnboundedReceiver<ApiResponse>,
) -> Result<(), AppError>
where
    B: Backend,
    E: Stream<Item = io::Result<Event>>,
{
    let mut events = std::pin::pin!(events);
    while !app.should_quit {
        terminal.draw(|f| ui::draw(f, &*app))?;

        tokio::select! {
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) => handle_key(app, key),
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => break,
            },
            Some(response) = responses.recv() => app.process_api_response(response),
        }
    }
    Ok(())
}
