//! Terminal event loop.
//!
//! Single-threaded: terminal events and at most one in-flight request to the
//! rules service are multiplexed with `select!`, so the board stays
//! responsive while a move is being committed.

use crate::config::ClientConfig;
use crate::controller::InteractionController;
use crate::model::PositionModel;
use crate::render::{Notice, RenderAdapter};
use crate::sync::{SyncClient, SyncResult};
use crate::ui::board::{pointer_to_board, BoardWidget, TerminalBoard, MIN_HEIGHT, MIN_WIDTH};
use crate::ui::theme::Theme;
use board::{BoardGeometry, ChessMove, GameSnapshot, GameStateToken};
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyCode, KeyEvent,
        KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::future::LocalBoxFuture;
use futures::{FutureExt, StreamExt};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use rules_client::{RulesClient, RulesService};
use std::io;
use std::rc::Rc;

#[derive(Debug, Clone, Copy)]
enum Request {
    Fetch,
    Submit(ChessMove),
}

type InFlight<'a> = LocalBoxFuture<'a, (Request, SyncResult<Rc<GameSnapshot>>)>;

/// What woke the loop.
enum Wake {
    Terminal(Event),
    Response(Request, SyncResult<Rc<GameSnapshot>>),
    Nothing,
    Closed,
}

/// Connect, take over the terminal and run until the user quits.
pub async fn run_app(
    config: ClientConfig,
    geometry: BoardGeometry,
    start: GameStateToken,
) -> anyhow::Result<()> {
    let client = RulesClient::connect(&config.server_url, config.request_timeout)?;
    let mut board = TerminalBoard::new();

    match client.health_check().await {
        Ok(()) => tracing::info!(server = %client.base_url(), "Rules service reachable"),
        Err(e) => {
            tracing::warn!(server = %client.base_url(), "Health check failed: {}", e);
            board.notify(Notice::Warning(format!(
                "Rules service at {} is not answering: {}",
                client.base_url(),
                e
            )));
        }
    }

    let model = PositionModel::unsynced(start);
    let sync = SyncClient::new(client, model.clone());
    let mut controller = InteractionController::new(geometry, model);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_ui_loop(&mut terminal, &sync, &mut controller, &mut board).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

/// Where the board widget is drawn inside the frame.
fn board_area(frame: Rect) -> Rect {
    Rect::new(
        frame.x,
        frame.y,
        frame.width.min(MIN_WIDTH),
        frame.height.min(MIN_HEIGHT),
    )
}

fn fetch<'a, S: RulesService>(sync: &'a SyncClient<S>) -> InFlight<'a> {
    async move { (Request::Fetch, sync.fetch_legal_moves().await) }.boxed_local()
}

fn submit<'a, S: RulesService>(sync: &'a SyncClient<S>, mv: ChessMove) -> InFlight<'a> {
    async move { (Request::Submit(mv), sync.submit_move(mv).await) }.boxed_local()
}

async fn wait_for(
    in_flight: &mut Option<InFlight<'_>>,
) -> (Request, SyncResult<Rc<GameSnapshot>>) {
    match in_flight {
        Some(request) => request.await,
        None => std::future::pending().await,
    }
}

async fn run_ui_loop<B: ratatui::backend::Backend, S: RulesService>(
    terminal: &mut Terminal<B>,
    sync: &SyncClient<S>,
    controller: &mut InteractionController,
    board: &mut TerminalBoard,
) -> anyhow::Result<()> {
    let theme = Theme::detect();
    let mut term_events = EventStream::new();
    let mut in_flight: Option<InFlight<'_>> = Some(fetch(sync));
    let mut area = Rect::default();

    loop {
        terminal.draw(|frame| {
            area = board_area(frame.area());
            let widget =
                BoardWidget::new(&*board, &theme).side_to_move(sync.model().side_to_move());
            frame.render_widget(widget, area);
        })?;

        let wake = tokio::select! {
            maybe_event = term_events.next() => match maybe_event {
                Some(Ok(ev)) => Wake::Terminal(ev),
                Some(Err(e)) => {
                    tracing::warn!("Terminal event error: {}", e);
                    Wake::Nothing
                }
                None => Wake::Closed,
            },
            (request, result) = wait_for(&mut in_flight) => Wake::Response(request, result),
        };

        match wake {
            Wake::Terminal(Event::Key(key)) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if is_quit(&key) {
                    tracing::info!("Quit requested");
                    return Ok(());
                }
                if key.code == KeyCode::Char('r') {
                    if in_flight.is_some() || controller.is_dragging() {
                        board.notify(Notice::Info("Busy, try again in a moment".to_string()));
                    } else {
                        tracing::info!("Manual resync requested");
                        in_flight = Some(fetch(sync));
                    }
                }
            }
            Wake::Terminal(Event::Mouse(mouse)) => {
                if let Some(mv) = handle_mouse(mouse, area, in_flight.is_some(), controller, board)
                {
                    in_flight = Some(submit(sync, mv));
                }
            }
            Wake::Terminal(_) | Wake::Nothing => {}
            Wake::Response(request, result) => {
                in_flight = None;
                match request {
                    Request::Submit(mv) => {
                        tracing::debug!(mv = %mv, ok = result.is_ok(), "Commit answered");
                        controller.commit_finished(&result, board);
                    }
                    Request::Fetch => match result {
                        Ok(_) => controller.resync(board),
                        Err(e) => board.notify(Notice::Warning(format!(
                            "Could not sync with the rules service ({e}). Press r to retry."
                        ))),
                    },
                }
            }
            Wake::Closed => {
                tracing::warn!("Terminal event stream closed");
                return Ok(());
            }
        }
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Feed one mouse event to the controller. Returns a move to submit.
fn handle_mouse(
    mouse: MouseEvent,
    area: Rect,
    busy: bool,
    controller: &mut InteractionController,
    board: &mut TerminalBoard,
) -> Option<ChessMove> {
    let point = pointer_to_board(area, mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            // One request at a time: a drag may not start behind a refresh.
            if busy {
                if controller.geometry().contains(point) {
                    board.notify(Notice::Info("Waiting for the rules service".to_string()));
                }
                return None;
            }
            controller.pointer_down(point, board);
            None
        }
        MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
            controller.pointer_move(point, board);
            None
        }
        MouseEventKind::Up(MouseButton::Left) => controller.pointer_up(point, board),
        _ => None,
    }
}
