//! `stockdash browse`: pick warehouses and watch their detail load.
//!
//! Three kinds of events feed one channel: lines typed on stdin, finished
//! warehouse fetches, and the end of input. Fetches run on their own threads
//! so the prompt never blocks; a fetch that finishes after a newer selection
//! is dropped by [`WarehouseView::resolve`]. While idle the loop polls the
//! terminal size and redraws when the orientation flips.

use std::io::{self, BufRead, Write};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use colored::Colorize;
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use tracing::debug;

use crate::api::models::{WarehouseDetail, WarehouseList};
use crate::api::{ApiClient, FetchError, StatsSource};
use crate::config::StockdashConfig;
use crate::view::viewport::handle_resize;
use crate::view::{RequestToken, ResizeAction, ResizeTracker, Resolution, Viewport, WarehouseView};
use crate::view::render;

const RESIZE_POLL: Duration = Duration::from_millis(250);

#[derive(Debug)]
pub enum Event {
    Input(String),
    Fetched {
        token: RequestToken,
        result: Result<WarehouseDetail, FetchError>,
    },
    InputClosed,
}

/// What the event loop must do after an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Idle,
    Redraw,
    Fetch {
        token: RequestToken,
        warehouse_id: String,
    },
    Quit,
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Browse state independent of any terminal or network.
pub struct Session {
    warehouses: WarehouseList,
    view: WarehouseView,
}

impl Session {
    pub fn new(warehouses: WarehouseList, view: WarehouseView) -> Self {
        Self { warehouses, view }
    }

    pub fn view(&self) -> &WarehouseView {
        &self.view
    }

    pub fn apply(&mut self, event: Event) -> Step {
        match event {
            Event::InputClosed => Step::Quit,
            Event::Input(line) => self.apply_input(line.trim()),
            Event::Fetched { token, result } => match self.view.resolve(token, result) {
                Resolution::Applied => Step::Redraw,
                Resolution::Stale => Step::Idle,
            },
        }
    }

    fn apply_input(&mut self, input: &str) -> Step {
        match input {
            "q" | "quit" | "exit" => Step::Quit,
            "" => Step::Redraw,
            _ => {
                let warehouse_id = self.resolve_choice(input);
                let token = self.view.select(warehouse_id.clone());
                debug!(token = token.value(), warehouse = %warehouse_id, "warehouse selected");
                Step::Fetch {
                    token,
                    warehouse_id,
                }
            }
        }
    }

    /// A 1-based list number, or a warehouse id typed verbatim.
    fn resolve_choice(&self, input: &str) -> String {
        input
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|index| self.warehouses.warehouses.get(index))
            .map(|w| w.warehouse_id.clone())
            .unwrap_or_else(|| input.to_string())
    }

    pub fn screen(&self) -> String {
        let mut out = String::new();
        out.push_str(&numbered_list(&self.warehouses));
        out.push('\n');
        out.push_str(&render::detail_state(self.view.state()));
        out.push('\n');
        out.push_str(&"Warehouse number or id (q to quit): ".dimmed().to_string());
        out
    }
}

fn numbered_list(list: &WarehouseList) -> String {
    let mut out = format!("{}\n", "Warehouses".bold().cyan());
    if list.warehouses.is_empty() {
        out.push_str(&format!("  {}\n", "no warehouses with shipments".dimmed()));
        return out;
    }
    for (i, warehouse) in list.warehouses.iter().enumerate() {
        out.push_str(&format!(
            "  {:>3}. {:<24} {:>6} shipments\n",
            i + 1,
            render::truncate(&warehouse.warehouse_id, 24),
            warehouse.shipments.len()
        ));
    }
    out
}

// ---------------------------------------------------------------------------
// Event loop
// ---------------------------------------------------------------------------

pub fn run(config: &StockdashConfig) -> Result<()> {
    let client = ApiClient::from_config(&config.api);
    let warehouses = client
        .warehouse_list()
        .context("could not load the warehouse list")?;

    let view = WarehouseView::with_limits(config.display.top_products, config.display.top_sizes);
    let mut session = Session::new(warehouses, view);

    let (tx, rx) = mpsc::channel();
    spawn_input_reader(tx.clone());

    let mut tracker = ResizeTracker::new(Viewport::current());
    draw(&session)?;

    loop {
        let step = match rx.recv_timeout(RESIZE_POLL) {
            Ok(event) => session.apply(event),
            Err(RecvTimeoutError::Timeout) => Step::Idle,
            Err(RecvTimeoutError::Disconnected) => Step::Quit,
        };

        let (next, action) = handle_resize(tracker, Viewport::current());
        tracker = next;

        match step {
            Step::Quit => break,
            Step::Fetch {
                token,
                warehouse_id,
            } => {
                spawn_fetch(client.clone(), token, warehouse_id, tx.clone());
                draw(&session)?;
            }
            Step::Redraw => draw(&session)?,
            Step::Idle if action == ResizeAction::Redraw => draw(&session)?,
            Step::Idle => {}
        }
    }

    println!();
    Ok(())
}

fn draw(session: &Session) -> Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;
    write!(stdout, "{}", session.screen())?;
    stdout.flush()?;
    Ok(())
}

fn spawn_input_reader(tx: Sender<Event>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(Event::Input(line)).is_err() {
                return;
            }
        }
        let _ = tx.send(Event::InputClosed);
    });
}

fn spawn_fetch(client: ApiClient, token: RequestToken, warehouse_id: String, tx: Sender<Event>) {
    thread::spawn(move || {
        let result = client.warehouse_detail(&warehouse_id);
        // The loop may already have exited.
        let _ = tx.send(Event::Fetched { token, result });
    });
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
